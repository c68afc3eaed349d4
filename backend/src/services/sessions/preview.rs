use crate::services::preview_response;
use crate::services::sessions::{edit_session, optional_json};
use crate::session_controller::state::SessionsState;
use actix_web::{web, Responder, ResponseError};
use common::model::variable::RecipientProfile;
use common::render::{render, unresolved_variables, RenderMeta};

/// Renders the session's current draft, unsaved edits included. The body may
/// carry a recipient profile (`{"firstName": "Ann", ...}`); an empty body
/// uses the sample recipient, a body that is not a profile is `400`.
pub async fn process(
    session_id: web::Path<String>,
    body: web::Bytes,
    sessions: web::Data<SessionsState>,
) -> impl Responder {
    let profile = match optional_json::<RecipientProfile>(&body) {
        Ok(profile) => profile.unwrap_or_else(RecipientProfile::sample),
        Err(e) => return e.error_response(),
    };

    let result = edit_session(&sessions, &session_id, |session| {
        let document = &session.draft.document;
        let meta = RenderMeta::with_subject(session.draft.subject.clone());
        (
            render(document, &profile, &meta),
            unresolved_variables(document, &profile),
        )
    })
    .await;

    match result {
        Ok((html, unresolved)) => preview_response(html, &unresolved),
        Err(e) => e.error_response(),
    }
}
