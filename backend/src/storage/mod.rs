//! # Template storage
//!
//! Saved templates live behind the [`TemplateStore`] trait. The concrete
//! store is chosen once at start-up from [`Config::store`] and shared by all
//! workers as an `Arc<dyn TemplateStore>`:
//!
//! - [`SqliteTemplateStore`]: a single SQLite file, one row per template.
//! - [`MemoryTemplateStore`]: a process-local map, useful for demos and tests.
//!
//! Every call is one complete request/response: a record is written or read
//! as a unit, never partially.

mod memory;
mod sqlite;

pub use memory::MemoryTemplateStore;
pub use sqlite::SqliteTemplateStore;

use crate::config::{Config, StoreKind};
use common::model::template::{TemplateDraft, TemplateRecord};
use common::requests::ListTemplatesQuery;
use common::TemplateError;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template: {0}")]
    Invalid(#[from] TemplateError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait TemplateStore: Send + Sync {
    /// All templates, ordered by name.
    fn list(&self) -> Result<Vec<TemplateRecord>>;

    /// Templates in `category`, ordered by name.
    fn list_by_category(&self, category: &str) -> Result<Vec<TemplateRecord>>;

    fn get(&self, id: &str) -> Result<TemplateRecord>;

    /// Validates `draft` and stores it under a new id.
    fn create(&self, draft: TemplateDraft) -> Result<TemplateRecord>;

    /// Validates `draft` and replaces template `id`, keeping its creation date.
    fn update(&self, id: &str, draft: TemplateDraft) -> Result<TemplateRecord>;

    fn delete(&self, id: &str) -> Result<()>;

    /// Templates matching `query`: its category, if any, and a
    /// case-insensitive `search` on name or subject. Ordered by name.
    fn find(&self, query: &ListTemplatesQuery) -> Result<Vec<TemplateRecord>> {
        let records = match non_blank(&query.category) {
            Some(category) => self.list_by_category(category)?,
            None => self.list()?,
        };
        Ok(match non_blank(&query.search) {
            Some(term) => records
                .into_iter()
                .filter(|record| record.draft.matches_search(term))
                .collect(),
            None => records,
        })
    }

    /// Distinct categories in use, sorted.
    fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = self
            .list()?
            .into_iter()
            .map(|record| record.draft.category)
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

/// Opens the store selected by `config`.
pub fn open_store(config: &Config) -> Result<Arc<dyn TemplateStore>> {
    match config.store {
        StoreKind::Sqlite => {
            log::info!("Using SQLite template store at {}", config.db_path.display());
            Ok(Arc::new(SqliteTemplateStore::open(&config.db_path)?))
        }
        StoreKind::Memory => {
            log::info!("Using in-memory template store");
            Ok(Arc::new(MemoryTemplateStore::new()))
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Builds the record for a newly created template.
fn new_record(draft: TemplateDraft) -> Result<TemplateRecord> {
    let id = Uuid::new_v4().to_string();
    let created_date = chrono::Utc::now().to_rfc3339();
    Ok(draft.into_record(id, created_date)?)
}
