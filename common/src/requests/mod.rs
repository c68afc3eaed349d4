//! Request payloads accepted by the backend HTTP endpoints.

use crate::model::component::Props;
use crate::model::document::TemplateDocument;
use crate::model::template::{Difficulty, TemplateDraft};
use crate::model::variable::RecipientProfile;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/templates/preview`: renders a document that is not
/// stored anywhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub document: TemplateDocument,
    /// Recipient to substitute. Takes precedence over `employee`.
    #[serde(default)]
    pub profile: Option<RecipientProfile>,
    /// Roster entry to preview for when no `profile` is given.
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// The employee fields a preview recipient can be derived from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}

impl PreviewRequest {
    /// The recipient to render for: `profile`, else one derived from
    /// `employee`, else the sample recipient.
    pub fn recipient(&self) -> RecipientProfile {
        match (&self.profile, &self.employee) {
            (Some(profile), _) => profile.clone(),
            (None, Some(e)) => RecipientProfile::from_employee(&e.name, &e.email, &e.department),
            (None, None) => RecipientProfile::sample(),
        }
    }
}

/// Body of `POST /api/sessions`. With a `template_id` the session starts
/// from that stored template, otherwise from an empty draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub template_id: Option<String>,
}

/// Body of `POST /api/sessions/{session_id}/components`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddComponentRequest {
    #[serde(rename = "type")]
    pub component_type: String,
}

/// Body of `PATCH /api/sessions/{session_id}/components/{component_id}`:
/// the props to merge.
pub type UpdateComponentRequest = Props;

/// Body of `POST /api/sessions/{session_id}/components/{component_id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveComponentRequest {
    pub index: usize,
}

/// Body of `PUT /api/sessions/{session_id}/overrides`. Absent fields are left
/// as they are; an empty string clears the override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverridesRequest {
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub css_content: Option<String>,
}

/// Body of `PUT /api/sessions/{session_id}/meta`. Absent fields are left as
/// they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub sender: Option<String>,
    pub preview: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Replaces the whole tag list.
    pub tags: Option<Vec<String>>,
    /// Tags to drop, applied after `tags`.
    pub remove_tags: Option<Vec<String>>,
}

impl MetaRequest {
    /// Applies the present fields to `draft`. Tags go through
    /// [`TemplateDraft::add_tag`], so they are trimmed and de-duplicated.
    pub fn apply_to(self, draft: &mut TemplateDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(subject) = self.subject {
            draft.subject = subject;
        }
        if let Some(sender) = self.sender {
            draft.sender = sender;
        }
        if let Some(preview) = self.preview {
            draft.preview = preview;
        }
        if let Some(difficulty) = self.difficulty {
            draft.difficulty = difficulty;
        }
        if let Some(tags) = self.tags {
            draft.tags.clear();
            for tag in &tags {
                draft.add_tag(tag);
            }
        }
        for tag in self.remove_tags.unwrap_or_default() {
            draft.remove_tag(&tag);
        }
    }
}

/// Query string of `GET /api/templates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTemplatesQuery {
    pub category: Option<String>,
    /// Case-insensitive substring of the template name or subject.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_recipient_precedence() {
        let req: PreviewRequest = serde_json::from_str(
            r#"{"document":{},"employee":{"name":"Ana Lopez","department":"Finance"}}"#,
        )
        .unwrap();
        let recipient = req.recipient();
        assert_eq!(recipient.get("lastName"), Some("Lopez"));
        assert_eq!(recipient.get("department"), Some("Finance"));

        let req: PreviewRequest = serde_json::from_str(
            r#"{"document":{},"profile":{"firstName":"Bo"},"employee":{"name":"Ana"}}"#,
        )
        .unwrap();
        assert_eq!(req.recipient().get("firstName"), Some("Bo"));

        let req: PreviewRequest = serde_json::from_str(r#"{"document":{}}"#).unwrap();
        assert_eq!(req.recipient(), RecipientProfile::sample());
    }

    #[test]
    fn test_meta_request_applies_present_fields_only() {
        let mut draft = TemplateDraft {
            name: "Old".to_string(),
            sender: "it@corp.test".to_string(),
            ..TemplateDraft::default()
        };
        let req: MetaRequest = serde_json::from_str(
            r#"{"name":"New","difficulty":"hard","tags":[" a ","a","b"]}"#,
        )
        .unwrap();
        req.apply_to(&mut draft);

        assert_eq!(draft.name, "New");
        assert_eq!(draft.sender, "it@corp.test");
        assert_eq!(draft.difficulty, Difficulty::Hard);
        assert_eq!(draft.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_meta_request_removes_tags() {
        let mut draft = TemplateDraft::default();
        draft.add_tag("finance");
        draft.add_tag("urgent");
        let req: MetaRequest = serde_json::from_str(r#"{"removeTags":["urgent"]}"#).unwrap();
        req.apply_to(&mut draft);
        assert_eq!(draft.tags, vec!["finance"]);
    }

    #[test]
    fn test_add_component_request_uses_type_key() {
        let req: AddComponentRequest = serde_json::from_str(r#"{"type":"button"}"#).unwrap();
        assert_eq!(req.component_type, "button");
    }

    #[test]
    fn test_preview_request_defaults() {
        let req: PreviewRequest = serde_json::from_str(r#"{"document":{}}"#).unwrap();
        assert!(req.document.is_empty());
        assert!(req.profile.is_none());
    }
}
