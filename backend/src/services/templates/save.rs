//! # Template Save Service
//!
//! Handlers for `POST /api/templates` (create) and
//! `PUT /api/templates/{template_id}` (update).
//!
//! Both take a `TemplateDraft` JSON payload. The draft must have a name and a
//! subject; otherwise the request fails with `400 Bad Request` and nothing is
//! written. On success the stored `TemplateRecord` is returned, with its
//! `content` summary generated from the document.

use crate::services::ApiError;
use crate::storage::TemplateStore;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::{TemplateDraft, TemplateRecord};

pub async fn create(
    payload: web::Json<TemplateDraft>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match create_template(payload.into_inner(), store.get_ref()) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => e.error_response(),
    }
}

pub async fn update(
    template_id: web::Path<String>,
    payload: web::Json<TemplateDraft>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match update_template(&template_id, payload.into_inner(), store.get_ref()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => e.error_response(),
    }
}

pub fn create_template(
    draft: TemplateDraft,
    store: &dyn TemplateStore,
) -> Result<TemplateRecord, ApiError> {
    Ok(store.create(draft)?)
}

pub fn update_template(
    template_id: &str,
    draft: TemplateDraft,
    store: &dyn TemplateStore,
) -> Result<TemplateRecord, ApiError> {
    Ok(store.update(template_id, draft)?)
}
