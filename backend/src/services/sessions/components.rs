//! Component edits inside a session. Unknown component ids answer `404` and
//! leave the draft as it was.

use crate::services::sessions::edit_session;
use crate::services::ApiError;
use crate::session_controller::state::SessionsState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::ComponentInstance;
use common::requests::{AddComponentRequest, MoveComponentRequest, UpdateComponentRequest};

pub async fn add(
    session_id: web::Path<String>,
    payload: web::Json<AddComponentRequest>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let component_type = payload.into_inner().component_type;
    let result = edit_session(&sessions, &session_id, |session| {
        session
            .draft
            .document
            .add_component_named(&component_type)
            .cloned()
    })
    .await;

    match flatten(result) {
        Ok(component) => HttpResponse::Created().json(component),
        Err(e) => e.error_response(),
    }
}

pub async fn update(
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateComponentRequest>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let (session_id, component_id) = path.into_inner();
    let partial = payload.into_inner();
    let result = edit_session(&sessions, &session_id, |session| {
        let document = &mut session.draft.document;
        document
            .update_component(&component_id, partial)
            .map(|_| document.get(&component_id).cloned())
    })
    .await;

    match flatten(result) {
        Ok(component) => HttpResponse::Ok().json(component),
        Err(e) => e.error_response(),
    }
}

pub async fn remove(
    path: web::Path<(String, String)>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let (session_id, component_id) = path.into_inner();
    let result = edit_session(&sessions, &session_id, |session| {
        session.draft.document.remove_component(&component_id)
    })
    .await;

    match flatten(result) {
        Ok(removed) => {
            log::debug!("Removed component {} from session {}", removed.id, session_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => e.error_response(),
    }
}

pub async fn reorder(
    path: web::Path<(String, String)>,
    payload: web::Json<MoveComponentRequest>,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let (session_id, component_id) = path.into_inner();
    let index = payload.index;
    let result = edit_session(&sessions, &session_id, |session| {
        session
            .draft
            .document
            .move_component(&component_id, index)
            .map(|_| session.draft.document.components().to_vec())
    })
    .await;

    match flatten::<Vec<ComponentInstance>>(result) {
        Ok(structure) => HttpResponse::Ok().json(structure),
        Err(e) => e.error_response(),
    }
}

fn flatten<T>(result: Result<common::Result<T>, ApiError>) -> Result<T, ApiError> {
    Ok(result??)
}
