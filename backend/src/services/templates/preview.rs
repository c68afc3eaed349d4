//! # Template Preview Service
//!
//! Renders documents into the self-contained HTML page shown in the
//! builder's sandboxed preview frame.
//!
//! - `GET /api/templates/{template_id}/preview` renders a stored template for
//!   the sample recipient, with the template subject as page title.
//! - `POST /api/templates/preview` renders a document sent in the request
//!   body (`PreviewRequest`) for its profile, its employee or the sample
//!   recipient.
//!
//! Unresolved `{{variables}}` are left visible in the output so the reviewer
//! can spot them, and are listed in the `X-Unresolved-Variables` header.

use crate::services::{preview_response, ApiError};
use crate::storage::TemplateStore;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::TemplateDocument;
use common::model::variable::RecipientProfile;
use common::render::{render, unresolved_variables, RenderMeta};
use common::requests::PreviewRequest;

pub async fn process(
    template_id: web::Path<String>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match preview_template(&template_id, store.get_ref()) {
        Ok(response) => response,
        Err(e) => e.error_response(),
    }
}

pub async fn render_adhoc(payload: web::Json<PreviewRequest>) -> impl Responder {
    let request = payload.into_inner();
    let profile = request.recipient();
    let meta = RenderMeta {
        subject: request.subject,
    };
    preview(&request.document, &profile, &meta)
}

fn preview_template(template_id: &str, store: &dyn TemplateStore) -> Result<HttpResponse, ApiError> {
    let record = store.get(template_id)?;
    let meta = RenderMeta::with_subject(record.draft.subject.clone());
    Ok(preview(
        &record.draft.document,
        &RecipientProfile::sample(),
        &meta,
    ))
}

/// Renders `document` and reports its unresolved variables.
fn preview(
    document: &TemplateDocument,
    profile: &RecipientProfile,
    meta: &RenderMeta,
) -> HttpResponse {
    let html = render(document, profile, meta);
    preview_response(html, &unresolved_variables(document, profile))
}
