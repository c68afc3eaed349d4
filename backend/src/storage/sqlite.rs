//! SQLite-backed template store.
//!
//! One row per template. `name` and `category` are real columns so listing
//! and filtering happen in SQL; the rest of the draft (settings, tags and the
//! document with its components and overrides) is stored as JSON in `draft`
//! and always read and written as a whole.

use super::{new_record, Result, StoreError, TemplateStore};
use common::model::template::{TemplateDraft, TemplateRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS templates (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    category     TEXT NOT NULL,
    content      TEXT NOT NULL,
    created_date TEXT NOT NULL,
    draft        TEXT NOT NULL
)";

const SELECT_COLUMNS: &str = "SELECT id, content, created_date, draft FROM templates";

pub struct SqliteTemplateStore {
    conn: Mutex<Connection>,
}

impl SqliteTemplateStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self, conn: &Connection, record: &TemplateRecord) -> Result<()> {
        let draft = serde_json::to_string(&record.draft)?;
        conn.execute(
            "INSERT OR REPLACE INTO templates (id, name, category, content, created_date, draft)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &record.id,
                &record.draft.name,
                &record.draft.category,
                &record.content,
                &record.created_date,
                draft
            ],
        )?;
        Ok(())
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<TemplateRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(args, raw_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(into_record(row?)?);
        }
        Ok(records)
    }
}

/// Columns of one row before the `draft` JSON is decoded.
struct RawRow {
    id: String,
    content: String,
    created_date: String,
    draft: String,
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        content: row.get(1)?,
        created_date: row.get(2)?,
        draft: row.get(3)?,
    })
}

fn into_record(raw: RawRow) -> Result<TemplateRecord> {
    let draft: TemplateDraft = serde_json::from_str(&raw.draft)?;
    Ok(TemplateRecord {
        id: raw.id,
        draft,
        content: raw.content,
        created_date: raw.created_date,
    })
}

impl TemplateStore for SqliteTemplateStore {
    fn list(&self) -> Result<Vec<TemplateRecord>> {
        self.query(&format!("{} ORDER BY name ASC, id ASC", SELECT_COLUMNS), &[])
    }

    fn list_by_category(&self, category: &str) -> Result<Vec<TemplateRecord>> {
        self.query(
            &format!("{} WHERE category = ?1 ORDER BY name ASC, id ASC", SELECT_COLUMNS),
            &[&category],
        )
    }

    fn get(&self, id: &str) -> Result<TemplateRecord> {
        self.query(&format!("{} WHERE id = ?1", SELECT_COLUMNS), &[&id])?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create(&self, draft: TemplateDraft) -> Result<TemplateRecord> {
        let record = new_record(draft)?;
        let conn = self.conn()?;
        self.write(&conn, &record)?;
        log::info!("Created template {} ({})", record.id, record.draft.name);
        Ok(record)
    }

    fn update(&self, id: &str, draft: TemplateDraft) -> Result<TemplateRecord> {
        let conn = self.conn()?;
        let created_date: Option<String> = conn
            .query_row(
                "SELECT created_date FROM templates WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let created_date = created_date.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let record = draft.into_record(id.to_string(), created_date)?;
        self.write(&conn, &record)?;
        log::info!("Updated template {}", record.id);
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM templates WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        log::info!("Deleted template {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::component::ComponentType;

    fn draft(name: &str, category: &str) -> TemplateDraft {
        let mut draft = TemplateDraft {
            name: name.to_string(),
            category: category.to_string(),
            subject: format!("{} subject", name),
            ..TemplateDraft::default()
        };
        draft.document.add_component(ComponentType::Heading);
        draft.document.add_component(ComponentType::Button);
        draft.document.set_html_content("<p>{{firstName}}</p>");
        draft
    }

    #[test]
    fn test_create_then_get_round_trips_the_document() {
        let store = SqliteTemplateStore::open_in_memory().unwrap();
        let created = store.create(draft("Invoice", "Financial Fraud")).unwrap();

        let loaded = store.get(&created.id).unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.draft.document.len(), 2);
        assert_eq!(loaded.content, "Your Heading Here [BUTTON: Click Here]");
    }

    #[test]
    fn test_list_is_ordered_by_name_and_filterable() {
        let store = SqliteTemplateStore::open_in_memory().unwrap();
        store.create(draft("Zeta", "Malware Delivery")).unwrap();
        store.create(draft("Alpha", "Financial Fraud")).unwrap();
        store.create(draft("Mid", "Financial Fraud")).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|r| r.draft.name).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);

        let fraud = store.list_by_category("Financial Fraud").unwrap();
        assert_eq!(fraud.len(), 2);

        assert_eq!(
            store.categories().unwrap(),
            vec!["Financial Fraud", "Malware Delivery"]
        );
    }

    #[test]
    fn test_update_keeps_created_date() {
        let store = SqliteTemplateStore::open_in_memory().unwrap();
        let created = store.create(draft("Invoice", "Financial Fraud")).unwrap();

        let mut changed = created.draft.clone();
        changed.subject = "Overdue invoice".to_string();
        let updated = store.update(&created.id, changed).unwrap();

        assert_eq!(updated.created_date, created.created_date);
        assert_eq!(store.get(&created.id).unwrap().draft.subject, "Overdue invoice");
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let store = SqliteTemplateStore::open_in_memory().unwrap();
        assert!(matches!(store.get("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.update("nope", draft("X", "Y")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_draft_is_not_written() {
        let store = SqliteTemplateStore::open_in_memory().unwrap();
        let mut invalid = draft("X", "Y");
        invalid.subject.clear();
        assert!(matches!(store.create(invalid), Err(StoreError::Invalid(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templify.sqlite");
        let id = {
            let store = SqliteTemplateStore::open(&path).unwrap();
            store.create(draft("Invoice", "Financial Fraud")).unwrap().id
        };

        let store = SqliteTemplateStore::open(&path).unwrap();
        let loaded = store.get(&id).unwrap();
        assert_eq!(loaded.draft.document.html_content.as_deref(), Some("<p>{{firstName}}</p>"));

        store.delete(&id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
