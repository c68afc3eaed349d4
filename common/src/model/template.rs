//! Template metadata and the record shape stored by the backend.
//!
//! A [`TemplateDraft`] is what the builder edits: settings from the sidebar
//! (name, category, subject, sender, preview text, difficulty, tags) plus the
//! [`TemplateDocument`]. Saving turns a validated draft into a
//! [`TemplateRecord`] with an id, a creation date and a plain-text `content`
//! summary used by the template gallery.

use crate::error::{Result, TemplateError};
use crate::model::document::TemplateDocument;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Credential Harvesting";

/// Categories offered by the template settings form.
pub const CATEGORIES: [&str; 6] = [
    "Credential Harvesting",
    "Malware Delivery",
    "Social Engineering",
    "Business Email Compromise",
    "Information Gathering",
    "Financial Fraud",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Editable template settings and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub document: TemplateDocument,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: default_category(),
            subject: String::new(),
            sender: String::new(),
            preview: String::new(),
            difficulty: Difficulty::default(),
            tags: Vec::new(),
            document: TemplateDocument::new(),
        }
    }
}

impl TemplateDraft {
    /// Checks the fields required before a template can be saved.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::Validation(
                "Please enter a template name".to_string(),
            ));
        }
        if self.subject.trim().is_empty() {
            return Err(TemplateError::Validation(
                "Please enter an email subject".to_string(),
            ));
        }
        Ok(())
    }

    /// Adds a trimmed tag. Returns `false` for blank or duplicate tags.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        self.tags.retain(|t| t != tag);
    }

    /// Case-insensitive substring match of `term` against name or subject.
    /// A blank term matches every draft.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.subject.to_lowercase().contains(&term)
    }

    /// Text stored as the record's `content`: the document summary, else
    /// the HTML override, else the preview text.
    pub fn content(&self) -> String {
        let summary = self.document.content_summary();
        if !summary.is_empty() {
            return summary;
        }
        match &self.document.html_content {
            Some(html) if !html.is_empty() => html.clone(),
            _ => self.preview.clone(),
        }
    }

    /// MD5 of the draft's JSON form, used to detect unsaved changes.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        format!("{:x}", md5::compute(json))
    }

    /// Validates the draft and turns it into a stored record. Components get
    /// their full default key set.
    pub fn into_record(mut self, id: String, created_date: String) -> Result<TemplateRecord> {
        self.validate()?;
        self.document.normalize();
        let content = self.content();
        Ok(TemplateRecord {
            id,
            content,
            created_date,
            draft: self,
        })
    }
}

/// A saved template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub id: String,
    #[serde(flatten)]
    pub draft: TemplateDraft,
    pub content: String,
    pub created_date: String,
}
