//! # Template Service Module
//!
//! This module aggregates all API endpoints related to stored templates.
//! It acts as a router, directing incoming HTTP requests under the
//! `/api/templates` path to the appropriate handler in its sub-modules.
//!
//! ## Sub-modules:
//! - `get`: Retrieves a single template with its settings and document.
//! - `list`: Lists templates, optionally by category, and the categories in use.
//! - `save`: Creates and updates templates after validating the draft.
//! - `delete`: Removes a template.
//! - `preview`: Renders stored or ad-hoc documents to HTML.

mod delete;
mod get;
mod list;
mod preview;
mod save;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// The store is read from application data as `web::Data<dyn TemplateStore>`.
///
/// # Registered Routes:
///
/// *   **`GET /`** (`?category=`): `list::process`. All templates ordered by
///     name, or only those in `category`.
/// *   **`POST /`**: `save::create`. Validates a `TemplateDraft` payload and
///     stores it under a new id. Returns the stored `TemplateRecord`.
/// *   **`GET /categories`**: `list::categories`. Distinct categories in use.
/// *   **`POST /preview`**: `preview::render_adhoc`. Renders a document that is
///     not stored (`PreviewRequest`) and returns the HTML page.
/// *   **`GET /{template_id}`**: `get::process`. One template.
/// *   **`PUT /{template_id}`**: `save::update`. Replaces a template's draft.
/// *   **`DELETE /{template_id}`**: `delete::process`.
/// *   **`GET /{template_id}/preview`**: `preview::process`. Renders a stored
///     template for the sample recipient.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/categories", get().to(list::categories))
        .route("/preview", post().to(preview::render_adhoc))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}", put().to(save::update))
        .route("/{template_id}", delete().to(delete::process))
        .route("/{template_id}/preview", get().to(preview::process))
}
