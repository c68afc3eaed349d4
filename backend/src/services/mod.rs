//! HTTP endpoints of the template builder.
//!
//! - `components`: the palette of placeable blocks.
//! - `templates`: stored templates (CRUD, categories, previews).
//! - `sessions`: in-memory editing sessions for the builder canvas.
//!
//! Every handler maps its failures through [`ApiError`], so the status codes
//! are the same everywhere: unknown ids are `404`, invalid input is `400` and
//! storage failures are `503`.

pub mod components;
pub mod sessions;
pub mod templates;

use crate::storage::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Editing session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Template(TemplateError::ComponentNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Template(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Invalid(TemplateError::ComponentNotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Store(StoreError::Invalid(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// Header listing the `{{variables}}` a preview could not resolve.
pub const UNRESOLVED_HEADER: &str = "X-Unresolved-Variables";

/// Wraps a rendered preview in a `200 OK` HTML response. Unresolved
/// variable names, if any, are sent comma-separated in
/// [`UNRESOLVED_HEADER`].
pub(crate) fn preview_response(html: String, unresolved: &[String]) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    response.content_type("text/html; charset=utf-8");
    if !unresolved.is_empty() {
        response.insert_header((UNRESOLVED_HEADER, unresolved.join(",")));
    }
    response.body(html)
}
