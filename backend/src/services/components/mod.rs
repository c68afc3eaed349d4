//! # Component Palette Service
//!
//! Serves the catalog of blocks the builder canvas can place, with the
//! default props each new instance starts from. The editing surface uses it
//! to draw the palette; sessions use the same catalog when adding components.

use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::component::catalog;
use common::model::variable::TemplateVariable;
use serde::Serialize;

const API_PATH: &str = "/api/components";

/// Configures and returns the Actix `Scope` for the palette routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: every component type with name, icon, description and
///     default props, in palette order.
/// *   **`GET /variables`**: the recipient variables offered by the editor's
///     "Insert Variable" menu, with their `{{name}}` tokens.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list))
        .route("/variables", get().to(variables))
}

async fn list() -> impl Responder {
    HttpResponse::Ok().json(catalog())
}

#[derive(Serialize)]
struct VariableEntry {
    name: &'static str,
    label: &'static str,
    token: String,
}

async fn variables() -> impl Responder {
    let entries: Vec<VariableEntry> = TemplateVariable::ALL
        .into_iter()
        .map(|variable| VariableEntry {
            name: variable.name(),
            label: variable.label(),
            token: variable.token(),
        })
        .collect();
    HttpResponse::Ok().json(entries)
}
