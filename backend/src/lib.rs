//! HTTP service of the email template builder.
//!
//! Exposes the `common` core (component library, template documents,
//! variable substitution and rendering) to the builder's editing and preview
//! surfaces, and persists templates behind a [`storage::TemplateStore`].

pub mod config;
pub mod services;
pub mod session_controller;
pub mod storage;

use actix_web::web;

/// Registers every API scope. Shared by `main` and the integration tests.
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.service(services::components::configure_routes())
        .service(services::templates::configure_routes())
        .service(services::sessions::configure_routes());
}
