//! # Template Retrieval Service
//!
//! Backend logic for the `GET /api/templates/{template_id}` endpoint.
//!
//! The handler reads the template from the configured `TemplateStore` and
//! returns the full `TemplateRecord`: settings (name, category, subject,
//! sender, preview text, difficulty, tags), the generated `content` summary
//! and the `document` with its component structure and raw overrides.

use crate::services::ApiError;
use crate::storage::TemplateStore;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::TemplateRecord;

/// Actix web handler for the `GET /api/templates/{template_id}` endpoint.
///
/// # Returns
/// - `200 OK` with the `TemplateRecord` as a JSON payload on success.
/// - `404 Not Found` if no template has that id.
/// - `503 Service Unavailable` if the store cannot be read.
pub async fn process(
    template_id: web::Path<String>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match get_template(&template_id, store.get_ref()) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => e.error_response(),
    }
}

pub fn get_template(template_id: &str, store: &dyn TemplateStore) -> Result<TemplateRecord, ApiError> {
    Ok(store.get(template_id)?)
}
