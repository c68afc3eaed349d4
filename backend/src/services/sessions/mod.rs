//! # Editing Sessions Service
//!
//! The builder canvas edits one template at a time through a session. A
//! session holds the draft in memory; every edit below changes only the
//! session, and nothing reaches the template store until `save`.

mod components;
mod edit;
mod lifecycle;
mod preview;
mod save;

use crate::services::ApiError;
use crate::session_controller::state::{EditingSession, SessionsState};
use actix_web::web::{delete, get, patch, post, put, scope};
use actix_web::Scope;
use common::TemplateError;
use serde::de::DeserializeOwned;

const API_PATH: &str = "/api/sessions";

/// Configures and returns the Actix `Scope` for all session routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: opens a session, empty or from `{"template_id": ...}`.
/// *   **`GET /{session_id}`** / **`DELETE /{session_id}`**: current state of
///     the session / discards it with its unsaved changes.
/// *   **`POST /{session_id}/components`**: appends a component `{"type": ...}`.
/// *   **`PATCH /{session_id}/components/{component_id}`**: merges props.
/// *   **`DELETE /{session_id}/components/{component_id}`**: removes it.
/// *   **`POST /{session_id}/components/{component_id}/move`**: `{"index": n}`.
/// *   **`PUT /{session_id}/overrides`**: raw HTML/CSS overrides.
/// *   **`PUT /{session_id}/meta`**: name, subject, sender, tags and so on.
/// *   **`POST /{session_id}/preview`**: renders the draft, optionally for the
///     recipient profile in the body.
/// *   **`POST /{session_id}/save`**: validates and stores the draft.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(lifecycle::open))
        .route("/{session_id}", get().to(lifecycle::view))
        .route("/{session_id}", delete().to(lifecycle::discard))
        .route("/{session_id}/components", post().to(components::add))
        .route(
            "/{session_id}/components/{component_id}",
            patch().to(components::update),
        )
        .route(
            "/{session_id}/components/{component_id}",
            delete().to(components::remove),
        )
        .route(
            "/{session_id}/components/{component_id}/move",
            post().to(components::reorder),
        )
        .route("/{session_id}/overrides", put().to(edit::overrides))
        .route("/{session_id}/meta", put().to(edit::meta))
        .route("/{session_id}/preview", post().to(preview::process))
        .route("/{session_id}/save", post().to(save::process))
}

/// Runs `f` on session `session_id`, failing with `SessionNotFound` when
/// there is no such session.
async fn edit_session<T, F>(
    sessions: &SessionsState,
    session_id: &str,
    f: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&mut EditingSession) -> T,
{
    sessions
        .with_session(session_id, f)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(session_id.to_string()))
}

/// Parses an optional JSON body. An empty body is `None`; anything else must
/// parse as `T`, otherwise the request fails with `400 Bad Request`.
fn optional_json<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value = serde_json::from_slice(body).map_err(TemplateError::Json)?;
    Ok(Some(value))
}
