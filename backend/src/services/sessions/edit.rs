use crate::services::sessions::edit_session;
use crate::services::ApiError;
use crate::session_controller::state::{SessionView, SessionsState};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::{MetaRequest, OverridesRequest};

/// Sets or clears the raw HTML/CSS overrides of the draft.
pub async fn overrides(
    session_id: web::Path<String>,
    payload: web::Json<OverridesRequest>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let request = payload.into_inner();
    respond(
        edit_session(&sessions, &session_id, |session| {
            let document = &mut session.draft.document;
            if let Some(html) = request.html_content {
                document.set_html_content(html);
            }
            if let Some(css) = request.css_content {
                document.set_css_content(css);
            }
            session.view(&session_id)
        })
        .await,
    )
}

/// Updates the template settings (name, category, subject, sender, preview
/// text, difficulty, tags).
pub async fn meta(
    session_id: web::Path<String>,
    payload: web::Json<MetaRequest>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let request = payload.into_inner();
    respond(
        edit_session(&sessions, &session_id, |session| {
            request.apply_to(&mut session.draft);
            session.view(&session_id)
        })
        .await,
    )
}

fn respond(result: Result<SessionView, ApiError>) -> HttpResponse {
    match result {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => e.error_response(),
    }
}
