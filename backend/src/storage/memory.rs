use super::{new_record, Result, StoreError, TemplateStore};
use common::model::template::{TemplateDraft, TemplateRecord};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Template store kept in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryTemplateStore {
    records: RwLock<BTreeMap<String, TemplateRecord>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`.
    pub fn seeded(records: impl IntoIterator<Item = TemplateRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, TemplateRecord>>> {
        self.records.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, TemplateRecord>>> {
        self.records.write().map_err(|_| StoreError::Poisoned)
    }

    fn sorted<'a>(records: impl Iterator<Item = &'a TemplateRecord>) -> Vec<TemplateRecord> {
        let mut records: Vec<TemplateRecord> = records.cloned().collect();
        records.sort_by(|a, b| a.draft.name.cmp(&b.draft.name).then_with(|| a.id.cmp(&b.id)));
        records
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn list(&self) -> Result<Vec<TemplateRecord>> {
        Ok(Self::sorted(self.read()?.values()))
    }

    fn list_by_category(&self, category: &str) -> Result<Vec<TemplateRecord>> {
        Ok(Self::sorted(
            self.read()?
                .values()
                .filter(|record| record.draft.category == category),
        ))
    }

    fn get(&self, id: &str) -> Result<TemplateRecord> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create(&self, draft: TemplateDraft) -> Result<TemplateRecord> {
        let record = new_record(draft)?;
        self.write()?.insert(record.id.clone(), record.clone());
        log::info!("Created template {} ({})", record.id, record.draft.name);
        Ok(record)
    }

    fn update(&self, id: &str, draft: TemplateDraft) -> Result<TemplateRecord> {
        let mut records = self.write()?;
        let existing = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let record = draft.into_record(id.to_string(), existing.created_date.clone())?;
        *existing = record.clone();
        log::info!("Updated template {}", id);
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.write()?
            .remove(id)
            .map(|_| log::info!("Deleted template {}", id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
