use crate::services::sessions::edit_session;
use crate::services::ApiError;
use crate::session_controller::state::SessionsState;
use crate::storage::{StoreError, TemplateStore};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::TemplateRecord;

/// Stores the session's draft: updates the template it was opened from, or
/// creates a new one. Validation failures are `400` and leave the session
/// unsaved.
pub async fn process(
    session_id: web::Path<String>,
    sessions: web::Data<SessionsState>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match save_session(&session_id, &sessions, store.get_ref()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => e.error_response(),
    }
}

async fn save_session(
    session_id: &str,
    sessions: &SessionsState,
    store: &dyn TemplateStore,
) -> Result<TemplateRecord, ApiError> {
    let (draft, template_id) = edit_session(sessions, session_id, |session| {
        (session.draft.clone(), session.template_id.clone())
    })
    .await?;
    draft.validate()?;
    let fingerprint = draft.fingerprint();

    let record = match template_id {
        Some(id) => match store.update(&id, draft.clone()) {
            Err(StoreError::NotFound(_)) => {
                log::warn!("Template {} no longer exists, saving as new", id);
                store.create(draft)?
            }
            other => other?,
        },
        None => store.create(draft)?,
    };

    Ok(finish_save(sessions, session_id, record, fingerprint).await)
}

/// Marks the session saved. The template is already written, so a session
/// closed in the meantime only gets a warning.
async fn finish_save(
    sessions: &SessionsState,
    session_id: &str,
    record: TemplateRecord,
    fingerprint: String,
) -> TemplateRecord {
    let marked = sessions
        .with_session(session_id, |session| {
            session.mark_saved(record.id.clone(), fingerprint)
        })
        .await;
    if marked.is_none() {
        log::warn!(
            "Session {} was closed while saving template {}",
            session_id,
            record.id
        );
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_controller::state::EditingSession;
    use common::model::template::TemplateDraft;

    fn saved_record() -> (TemplateRecord, String) {
        let draft = TemplateDraft {
            name: "Invoice".to_string(),
            subject: "Invoice".to_string(),
            ..TemplateDraft::default()
        };
        let fingerprint = draft.fingerprint();
        (draft.into_record("t-1".into(), "t".into()).unwrap(), fingerprint)
    }

    #[actix_web::test]
    async fn test_finish_save_marks_open_session() {
        let sessions = SessionsState::new();
        let sid = sessions.open(EditingSession::empty()).await;
        sessions
            .with_session(&sid, |s| {
                s.draft.name = "Invoice".to_string();
                s.draft.subject = "Invoice".to_string();
            })
            .await;

        let (record, fingerprint) = saved_record();
        let returned = finish_save(&sessions, &sid, record.clone(), fingerprint).await;
        assert_eq!(returned, record);

        let view = sessions.view(&sid).await.unwrap();
        assert_eq!(view.template_id.as_deref(), Some("t-1"));
        assert!(!view.dirty);
    }

    #[actix_web::test]
    async fn test_finish_save_returns_record_when_session_closed() {
        let sessions = SessionsState::new();
        let sid = sessions.open(EditingSession::empty()).await;
        assert!(sessions.discard(&sid).await);

        let (record, fingerprint) = saved_record();
        let returned = finish_save(&sessions, &sid, record.clone(), fingerprint).await;
        assert_eq!(returned, record);
    }
}
