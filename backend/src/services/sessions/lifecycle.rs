use crate::services::sessions::optional_json;
use crate::services::ApiError;
use crate::session_controller::state::{EditingSession, SessionView, SessionsState};
use crate::storage::TemplateStore;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::OpenSessionRequest;

/// Opens a session. The body is optional: without one, or without a
/// `template_id`, the session starts from an empty draft.
pub async fn open(
    body: web::Bytes,
    sessions: web::Data<SessionsState>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    let result = match optional_json::<OpenSessionRequest>(&body) {
        Ok(request) => open_session(request.unwrap_or_default(), &sessions, store.get_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(view) => HttpResponse::Created().json(view),
        Err(e) => e.error_response(),
    }
}

pub async fn view(
    session_id: web::Path<String>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let view = sessions.view(&session_id).await;
    match view {
        Some(view) => HttpResponse::Ok().json(view),
        None => ApiError::SessionNotFound(session_id.into_inner()).error_response(),
    }
}

pub async fn discard(
    session_id: web::Path<String>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    if sessions.discard(&session_id).await {
        HttpResponse::NoContent().finish()
    } else {
        ApiError::SessionNotFound(session_id.into_inner()).error_response()
    }
}

async fn open_session(
    request: OpenSessionRequest,
    sessions: &SessionsState,
    store: &dyn TemplateStore,
) -> Result<SessionView, ApiError> {
    let session = match request.template_id {
        Some(template_id) => EditingSession::from_record(store.get(&template_id)?),
        None => EditingSession::empty(),
    };
    let view_source = session.clone();
    let session_id = sessions.open(session).await;
    Ok(view_source.view(&session_id))
}
