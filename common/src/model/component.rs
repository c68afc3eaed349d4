//! # Component Library
//!
//! The fixed catalog of content blocks that can be placed on a template, and
//! the default property bag each block starts with.
//!
//! A component's props are a JSON object. Every instance created from the
//! library carries exactly the keys listed by [`defaults_for`] for its type;
//! later edits merge into that object (see `model::document`), so the keys
//! are never lost.

use crate::error::{Result, TemplateError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Property bag of a placed component.
pub type Props = Map<String, Value>;

/// The block types that can be placed on a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Heading,
    Text,
    Image,
    Button,
    Logo,
    Divider,
    Spacer,
    Signature,
}

impl ComponentType {
    /// Every component type, in palette order.
    pub const ALL: [ComponentType; 8] = [
        ComponentType::Heading,
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Button,
        ComponentType::Logo,
        ComponentType::Divider,
        ComponentType::Spacer,
        ComponentType::Signature,
    ];

    /// Wire name of the type, as stored in the `type` field of an instance.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Heading => "heading",
            ComponentType::Text => "text",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
            ComponentType::Logo => "logo",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::Signature => "signature",
        }
    }

    /// Parses a wire name. Anything outside the fixed enumeration is an
    /// `UnknownComponentType` error.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| TemplateError::UnknownComponentType(name.to_string()))
    }

    /// Props that hold user-visible text and go through variable substitution.
    pub fn text_fields(self) -> &'static [&'static str] {
        match self {
            ComponentType::Heading | ComponentType::Text | ComponentType::Button => &["text"],
            ComponentType::Signature => &["name", "title", "company", "email", "phone"],
            ComponentType::Image
            | ComponentType::Logo
            | ComponentType::Divider
            | ComponentType::Spacer => &[],
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the default property bag for `component_type`.
///
/// The returned keys are the complete schema of that type.
pub fn defaults_for(component_type: ComponentType) -> Props {
    let value = match component_type {
        ComponentType::Heading => json!({
            "text": "Your Heading Here",
            "level": 1,
            "align": "left",
            "color": "#000000"
        }),
        ComponentType::Text => json!({
            "text": "Your text content goes here. Click to edit.",
            "align": "left",
            "color": "#000000"
        }),
        ComponentType::Image => json!({
            "src": "https://via.placeholder.com/400x200",
            "alt": "Image description",
            "width": "100%",
            "align": "center"
        }),
        ComponentType::Button => json!({
            "text": "Click Here",
            "url": "#",
            "backgroundColor": "#1E40AF",
            "textColor": "#FFFFFF",
            "align": "center"
        }),
        ComponentType::Logo => json!({
            "src": "https://via.placeholder.com/200x80",
            "alt": "Company Logo",
            "width": "200px",
            "align": "left"
        }),
        ComponentType::Divider => json!({
            "color": "#E5E7EB",
            "thickness": 1,
            "margin": "20px 0"
        }),
        ComponentType::Spacer => json!({
            "height": "20px"
        }),
        ComponentType::Signature => json!({
            "name": "John Doe",
            "title": "Title",
            "company": "Company Name",
            "email": "email@company.com",
            "phone": "+1 (555) 123-4567"
        }),
    };

    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

/// Looks up the defaults for a type given by its wire name.
pub fn defaults_for_name(name: &str) -> Result<Props> {
    ComponentType::parse(name).map(defaults_for)
}

/// A palette entry: what the editing surface shows for each placeable block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub default_props: Props,
}

/// The full component palette, in display order.
pub fn catalog() -> Vec<CatalogEntry> {
    ComponentType::ALL
        .into_iter()
        .map(|component_type| {
            let (name, icon, description) = match component_type {
                ComponentType::Heading => ("Heading", "Heading", "Add a heading or title"),
                ComponentType::Text => ("Text Block", "Type", "Add a paragraph of text"),
                ComponentType::Image => ("Image", "Image", "Add an image"),
                ComponentType::Button => ("Button", "MousePointer", "Add a clickable button"),
                ComponentType::Logo => ("Logo", "Building", "Add company logo"),
                ComponentType::Divider => ("Divider", "Minus", "Add a horizontal line"),
                ComponentType::Spacer => ("Spacer", "Move", "Add vertical spacing"),
                ComponentType::Signature => ("Signature", "PenTool", "Add email signature"),
            };
            CatalogEntry {
                component_type,
                name,
                icon,
                description,
                default_props: defaults_for(component_type),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(props: &Props) -> Vec<&str> {
        let mut keys: Vec<&str> = props.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_defaults_are_non_empty_for_every_type() {
        for t in ComponentType::ALL {
            assert!(!defaults_for(t).is_empty(), "{t} has no defaults");
        }
    }

    #[test]
    fn test_default_schemas() {
        assert_eq!(
            keys(&defaults_for(ComponentType::Heading)),
            vec!["align", "color", "level", "text"]
        );
        assert_eq!(
            keys(&defaults_for(ComponentType::Text)),
            vec!["align", "color", "text"]
        );
        assert_eq!(
            keys(&defaults_for(ComponentType::Image)),
            vec!["align", "alt", "src", "width"]
        );
        assert_eq!(
            keys(&defaults_for(ComponentType::Logo)),
            vec!["align", "alt", "src", "width"]
        );
        assert_eq!(
            keys(&defaults_for(ComponentType::Button)),
            vec!["align", "backgroundColor", "text", "textColor", "url"]
        );
        assert_eq!(
            keys(&defaults_for(ComponentType::Divider)),
            vec!["color", "margin", "thickness"]
        );
        assert_eq!(keys(&defaults_for(ComponentType::Spacer)), vec!["height"]);
        assert_eq!(
            keys(&defaults_for(ComponentType::Signature)),
            vec!["company", "email", "name", "phone", "title"]
        );
    }

    #[test]
    fn test_text_fields_are_string_defaults() {
        for t in ComponentType::ALL {
            let defaults = defaults_for(t);
            for field in t.text_fields() {
                assert!(defaults[*field].is_string(), "{t}.{field}");
            }
        }
        assert!(ComponentType::Image.text_fields().is_empty());
    }

    #[test]
    fn test_parse_round_trips_wire_names() {
        for t in ComponentType::ALL {
            assert_eq!(ComponentType::parse(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = defaults_for_name("carousel").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownComponentType(ref name) if name == "carousel"));
        assert!(ComponentType::parse("Heading").is_err());
    }

    #[test]
    fn test_catalog_order_and_defaults() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog[0].component_type, ComponentType::Heading);
        assert_eq!(catalog[7].name, "Signature");
        assert_eq!(catalog[3].default_props["url"], "#");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ComponentType::Signature).unwrap();
        assert_eq!(json, "\"signature\"");
    }
}
