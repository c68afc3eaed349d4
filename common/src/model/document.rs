//! # Template Document
//!
//! The ordered list of components a user places on a template, plus the
//! optional raw HTML/CSS override written in the code editor.
//!
//! The order of `structure` is the render order. A document is owned by a
//! single editing session and is persisted as a unit in this exact shape:
//!
//! ```json
//! { "structure": [ { "id": "...", "type": "heading", "props": { ... } } ],
//!   "htmlContent": "<p>...</p>",
//!   "cssContent": ".x { ... }" }
//! ```

use crate::error::{Result, TemplateError};
use crate::model::component::{defaults_for, ComponentType, Props};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A component placed on a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// Stable identity used for selection, update and delete.
    pub id: String,
    /// Wire name of the component type. Kept as a raw string so documents
    /// written by other clients still load when they contain unknown types.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: Props,
}

impl ComponentInstance {
    /// Creates an instance of `component_type` with a fresh id and the
    /// type's default props.
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: component_type.as_str().to_string(),
            props: defaults_for(component_type),
        }
    }

    /// The parsed component type, or `None` when `kind` is not in the catalog.
    pub fn component_type(&self) -> Option<ComponentType> {
        ComponentType::parse(&self.kind).ok()
    }

    /// Merges `partial` into the current props. Keys absent from `partial`
    /// keep their current value.
    pub fn merge_props(&mut self, partial: Props) {
        for (key, value) in partial {
            self.props.insert(key, value);
        }
    }

    /// Adds any default key of the component's type that `props` lacks.
    /// Existing values, including ones of the wrong shape, are kept. Unknown
    /// types are left alone.
    pub fn normalize(&mut self) {
        let Some(component_type) = self.component_type() else {
            return;
        };
        for (key, value) in defaults_for(component_type) {
            self.props.entry(key).or_insert(value);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    #[serde(default)]
    pub structure: Vec<ComponentInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_content: Option<String>,
}

impl TemplateDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the persisted JSON form of a document and fills in missing
    /// default props.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: Self = serde_json::from_str(json).map_err(TemplateError::Json)?;
        document.normalize();
        Ok(document)
    }

    /// Gives every component the full default key set of its type.
    pub fn normalize(&mut self) {
        self.structure.iter_mut().for_each(ComponentInstance::normalize);
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(TemplateError::Json)
    }

    pub fn components(&self) -> &[ComponentInstance] {
        &self.structure
    }

    pub fn get(&self, id: &str) -> Option<&ComponentInstance> {
        self.structure.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.structure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }

    /// Appends a new component of `component_type` and returns it.
    pub fn add_component(&mut self, component_type: ComponentType) -> &ComponentInstance {
        let instance = ComponentInstance::new(component_type);
        log::debug!("adding {} component {}", component_type, instance.id);
        self.structure.push(instance);
        &self.structure[self.structure.len() - 1]
    }

    /// Same as [`add_component`](Self::add_component) for a type given by name.
    pub fn add_component_named(&mut self, name: &str) -> Result<&ComponentInstance> {
        let component_type = ComponentType::parse(name)?;
        Ok(self.add_component(component_type))
    }

    /// Merges `partial` into the props of component `id`.
    ///
    /// Returns `ComponentNotFound` when no component has that id; the
    /// document is left untouched in that case.
    pub fn update_component(&mut self, id: &str, partial: Props) -> Result<()> {
        let component = self
            .structure
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TemplateError::ComponentNotFound(id.to_string()))?;
        component.merge_props(partial);
        Ok(())
    }

    /// Removes component `id` and returns it.
    ///
    /// Returns `ComponentNotFound` when no component has that id; the
    /// document is left untouched in that case.
    pub fn remove_component(&mut self, id: &str) -> Result<ComponentInstance> {
        let index = self.position(id)?;
        Ok(self.structure.remove(index))
    }

    /// Moves component `id` to `new_index`, clamped to the last position.
    /// The relative order of every other component is unchanged.
    pub fn move_component(&mut self, id: &str, new_index: usize) -> Result<()> {
        let index = self.position(id)?;
        let component = self.structure.remove(index);
        let target = new_index.min(self.structure.len());
        self.structure.insert(target, component);
        Ok(())
    }

    /// Sets the raw HTML override. An empty string clears it.
    pub fn set_html_content(&mut self, html: impl Into<String>) {
        self.html_content = non_empty(html.into());
    }

    /// Sets the raw CSS override. An empty string clears it.
    pub fn set_css_content(&mut self, css: impl Into<String>) {
        self.css_content = non_empty(css.into());
    }

    /// Plain-text summary of the document, stored as a template's `content`.
    ///
    /// Headings and paragraphs contribute their text, buttons contribute
    /// `[BUTTON: label]`, everything else is left out.
    pub fn content_summary(&self) -> String {
        self.structure
            .iter()
            .filter_map(|component| {
                let text = component.props.get("text").and_then(Value::as_str);
                match component.component_type()? {
                    ComponentType::Heading | ComponentType::Text => text.map(str::to_string),
                    ComponentType::Button => text.map(|t| format!("[BUTTON: {}]", t)),
                    _ => None,
                }
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.structure
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TemplateError::ComponentNotFound(id.to_string()))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn kinds(doc: &TemplateDocument) -> Vec<&str> {
        doc.components().iter().map(|c| c.kind.as_str()).collect()
    }

    #[test]
    fn test_add_appends_with_defaults() {
        let mut doc = TemplateDocument::new();
        doc.add_component(ComponentType::Heading);
        doc.add_component(ComponentType::Button);

        assert_eq!(kinds(&doc), vec!["heading", "button"]);
        assert_eq!(doc.components()[0].props, defaults_for(ComponentType::Heading));
    }

    #[test]
    fn test_ids_are_unique_in_a_tight_loop() {
        let mut doc = TemplateDocument::new();
        for _ in 0..500 {
            doc.add_component(ComponentType::Spacer);
        }
        let mut ids: Vec<&str> = doc.components().iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_add_named_rejects_unknown_type() {
        let mut doc = TemplateDocument::new();
        let err = doc.add_component_named("video").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownComponentType(_)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_sequence() {
        let mut doc = TemplateDocument::new();
        doc.add_component(ComponentType::Heading);
        doc.add_component(ComponentType::Text);
        let before = doc.clone();

        let id = doc.add_component(ComponentType::Divider).id.clone();
        doc.remove_component(&id).unwrap();

        assert_eq!(doc, before);
    }

    #[test]
    fn test_successive_updates_merge() {
        let mut doc = TemplateDocument::new();
        let id = doc.add_component(ComponentType::Heading).id.clone();
        doc.update_component(&id, props(json!({ "text": "X", "color": "#000" })))
            .unwrap();

        doc.update_component(&id, props(json!({ "level": 2 }))).unwrap();
        doc.update_component(&id, props(json!({ "color": "#FF0000" })))
            .unwrap();

        assert_eq!(
            Value::Object(doc.get(&id).unwrap().props.clone()),
            json!({ "text": "X", "level": 2, "align": "left", "color": "#FF0000" })
        );
    }

    #[test]
    fn test_unknown_id_is_reported_and_document_unchanged() {
        let mut doc = TemplateDocument::new();
        doc.add_component(ComponentType::Text);
        let before = doc.clone();

        let update = doc.update_component("missing", props(json!({ "text": "y" })));
        assert!(matches!(update, Err(TemplateError::ComponentNotFound(ref id)) if id == "missing"));

        let remove = doc.remove_component("missing");
        assert!(matches!(remove, Err(TemplateError::ComponentNotFound(_))));

        assert!(doc.move_component("missing", 0).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_preserves_relative_order() {
        let mut doc = TemplateDocument::new();
        let a = doc.add_component(ComponentType::Heading).id.clone();
        doc.add_component(ComponentType::Text);
        doc.add_component(ComponentType::Image);
        doc.add_component(ComponentType::Button);

        doc.move_component(&a, 2).unwrap();
        assert_eq!(kinds(&doc), vec!["text", "image", "heading", "button"]);

        doc.move_component(&a, 99).unwrap();
        assert_eq!(kinds(&doc), vec!["text", "image", "button", "heading"]);

        doc.move_component(&a, 0).unwrap();
        assert_eq!(kinds(&doc), vec!["heading", "text", "image", "button"]);
    }

    #[test]
    fn test_content_summary() {
        let mut doc = TemplateDocument::new();
        let h = doc.add_component(ComponentType::Heading).id.clone();
        doc.add_component(ComponentType::Spacer);
        let b = doc.add_component(ComponentType::Button).id.clone();
        doc.update_component(&h, props(json!({ "text": "Action required" })))
            .unwrap();
        doc.update_component(&b, props(json!({ "text": "Verify" }))).unwrap();

        assert_eq!(doc.content_summary(), "Action required [BUTTON: Verify]");
    }

    #[test]
    fn test_normalize_fills_missing_defaults_only() {
        let mut doc = TemplateDocument::from_json(
            r#"{"structure":[
                {"id":"h","type":"heading","props":{"text":"x","color":null}},
                {"id":"u","type":"countdown","props":{"seconds":5}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            Value::Object(doc.get("h").unwrap().props.clone()),
            json!({ "text": "x", "level": 1, "align": "left", "color": null })
        );
        assert_eq!(
            Value::Object(doc.get("u").unwrap().props.clone()),
            json!({ "seconds": 5 })
        );

        let before = doc.clone();
        doc.normalize();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_persisted_shape() {
        let mut doc = TemplateDocument::new();
        doc.add_component(ComponentType::Spacer);
        doc.set_html_content("<p>hi</p>");
        doc.set_css_content("");

        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["structure"][0]["type"], "spacer");
        assert_eq!(value["htmlContent"], "<p>hi</p>");
        assert!(value.get("cssContent").is_none());

        let back = TemplateDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_unknown_types_survive_loading() {
        let doc = TemplateDocument::from_json(
            r#"{"structure":[{"id":"1","type":"carousel","props":{}}]}"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.components()[0].component_type().is_none());
    }
}
