//! Holds the templates that are currently open in the builder.
//!
//! Each editing session owns one [`TemplateDraft`]; component edits, override
//! edits and settings changes are applied to it in memory and only reach the
//! template store on an explicit save. Discarding a session drops whatever
//! was not saved.
//!
//! The main components are:
//! - `SessionsState`: a clonable, thread-safe map from session id to
//!   `EditingSession`, injected into the Actix application state in `main.rs`.
//! - `EditingSession`: the draft being edited, the id of the stored template
//!   it belongs to (if it was ever saved), and the fingerprint of the last
//!   saved version used to report unsaved changes.
//! - `start_session_reaper`: a long-running task that drops sessions nobody
//!   has touched for longer than the idle TTL.

use common::model::template::{TemplateDraft, TemplateRecord};
use serde::Serialize;
use std::time::{Duration, Instant};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Idle time after which an abandoned session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// A thread-safe, shareable container for all open editing sessions.
///
/// A session has a single editor, so the write lock is only held for the
/// duration of one edit request.
#[derive(Clone)]
pub struct SessionsState {
    pub sessions: Arc<RwLock<HashMap<String, EditingSession>>>,
    ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct EditingSession {
    pub draft: TemplateDraft,
    /// Id of the stored template, set once the draft has been saved.
    pub template_id: Option<String>,
    /// Fingerprint of the draft as last loaded or saved.
    saved_fingerprint: Option<String>,
    last_touched: Instant,
}

/// What the editing surface receives for a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub template_id: Option<String>,
    pub dirty: bool,
    pub draft: TemplateDraft,
}

impl EditingSession {
    /// A session for a brand-new, empty template.
    pub fn empty() -> Self {
        Self {
            draft: TemplateDraft::default(),
            template_id: None,
            saved_fingerprint: None,
            last_touched: Instant::now(),
        }
    }

    /// A session editing a stored template. Components missing default props
    /// get them before the clean fingerprint is taken.
    pub fn from_record(record: TemplateRecord) -> Self {
        let mut draft = record.draft;
        draft.document.normalize();
        let fingerprint = draft.fingerprint();
        Self {
            draft,
            template_id: Some(record.id),
            saved_fingerprint: Some(fingerprint),
            last_touched: Instant::now(),
        }
    }

    /// Whether the draft differs from what was last loaded or saved.
    /// A never-saved session is dirty once it differs from an empty draft.
    pub fn is_dirty(&self) -> bool {
        let current = self.draft.fingerprint();
        match &self.saved_fingerprint {
            Some(saved) => saved != &current,
            None => current != TemplateDraft::default().fingerprint(),
        }
    }

    /// Records that the draft with `fingerprint` was stored as `template_id`.
    /// Edits made after that fingerprint was taken still count as unsaved.
    pub fn mark_saved(&mut self, template_id: String, fingerprint: String) {
        self.saved_fingerprint = Some(fingerprint);
        self.template_id = Some(template_id);
    }

    pub fn view(&self, session_id: &str) -> SessionView {
        SessionView {
            session_id: session_id.to_string(),
            template_id: self.template_id.clone(),
            dirty: self.is_dirty(),
            draft: self.draft.clone(),
        }
    }
}

impl Default for SessionsState {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions idle for longer than `ttl` are dropped by [`evict_idle`](Self::evict_idle).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Registers `session` under a new id and returns the id. Idle sessions
    /// are evicted first.
    pub async fn open(&self, mut session: EditingSession) -> String {
        self.evict_idle().await;
        let session_id = Uuid::new_v4().to_string();
        session.last_touched = Instant::now();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), session);
        log::info!("Opened editing session {}", session_id);
        session_id
    }

    /// Drops every session untouched for longer than the TTL, with its
    /// unsaved changes. Returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|session_id, session| {
            let keep = session.last_touched.elapsed() <= self.ttl;
            if !keep {
                log::info!("Evicting idle editing session {}", session_id);
            }
            keep
        });
        before - sessions.len()
    }

    /// Drops a session and its unsaved changes. Returns whether it existed.
    pub async fn discard(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        if removed {
            log::info!("Discarded editing session {}", session_id);
        }
        removed
    }

    pub async fn view(&self, session_id: &str) -> Option<SessionView> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).map(|s| s.view(session_id))
    }

    /// Runs `f` on session `session_id` under the write lock.
    /// Returns `None` when the session does not exist.
    pub async fn with_session<T, F>(&self, session_id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut EditingSession) -> T,
    {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(session_id).map(|session| {
            session.last_touched = Instant::now();
            f(session)
        })
    }
}

/// Starts the idle session reaper.
///
/// Spawned as a long-running task in `main.rs`; every `period` it evicts the
/// sessions that outlived the TTL of `state`.
pub async fn start_session_reaper(state: SessionsState, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let evicted = state.evict_idle().await;
        if evicted > 0 {
            log::info!("Evicted {} idle editing sessions", evicted);
        }
    }
}
