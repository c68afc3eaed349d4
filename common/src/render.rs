//! # HTML renderer
//!
//! Turns a [`TemplateDocument`] into a complete, self-contained HTML page for
//! the preview frame and for sending. The page is a fixed shell (head,
//! boilerplate styles, a centered `.email-container`) followed by one
//! fragment per component, in document order.
//!
//! ## Rules
//!
//! - Text props go through [`substitute`] and are then HTML-escaped. Every
//!   attribute value is escaped.
//! - A component whose `type` is not in the catalog is skipped; its siblings
//!   still render.
//! - A missing or non-scalar prop is replaced by the type's default value.
//! - Raw overrides: the CSS override is substituted and emitted as a second
//!   `<style>` block in `<head>`. The HTML override is substituted but not
//!   escaped. With no components it is the whole content of the container;
//!   otherwise it is appended after the components in its own
//!   `<div class="component">`.
//!
//! Rendering is a pure function of its inputs, so the same document, profile
//! and meta always give byte-identical output.

use crate::model::component::{defaults_for, ComponentType, Props};
use crate::model::document::{ComponentInstance, TemplateDocument};
use crate::model::variable::RecipientProfile;
use crate::substitution::{substitute, unresolved};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_TITLE: &str = "Email Template";

const BASE_STYLES: &str = "\
body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }
.email-container { max-width: 600px; margin: 0 auto; background-color: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.component { margin-bottom: 20px; }
.button { display: inline-block; padding: 12px 24px; text-decoration: none; border-radius: 6px; font-weight: 500; }
.divider { border: none; margin: 20px 0; }
.signature { border-left: 4px solid #1E40AF; padding-left: 16px; }
";

/// Page-level data that is not part of the document itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderMeta {
    /// Email subject, used as the page `<title>`.
    #[serde(default)]
    pub subject: Option<String>,
}

impl RenderMeta {
    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
        }
    }

    fn title(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }
}

/// Renders `document` for `profile` into a full HTML page.
pub fn render(document: &TemplateDocument, profile: &RecipientProfile, meta: &RenderMeta) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(meta.title())));
    html.push_str("<style>\n");
    html.push_str(BASE_STYLES);
    html.push_str("</style>\n");
    if let Some(css) = &document.css_content {
        html.push_str(&format!("<style>\n{}\n</style>\n", substitute(css, profile)));
    }
    html.push_str("</head>\n<body>\n<div class=\"email-container\">\n");

    let html_override = document.html_content.as_deref().filter(|s| !s.is_empty());
    if document.is_empty() {
        if let Some(raw) = html_override {
            html.push_str(&substitute(raw, profile));
            html.push('\n');
        }
    } else {
        for component in document.components() {
            if let Some(fragment) = render_component(component, profile) {
                html.push_str("<div class=\"component\">");
                html.push_str(&fragment);
                html.push_str("</div>\n");
            }
        }
        if let Some(raw) = html_override {
            html.push_str("<div class=\"component\">");
            html.push_str(&substitute(raw, profile));
            html.push_str("</div>\n");
        }
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Renders a single component fragment, or `None` when its type is unknown.
pub fn render_component(component: &ComponentInstance, profile: &RecipientProfile) -> Option<String> {
    let Some(component_type) = component.component_type() else {
        log::warn!(
            "skipping component {} with unknown type '{}'",
            component.id,
            component.kind
        );
        return None;
    };
    let props = PropReader::new(component, component_type, profile);

    let fragment = match component_type {
        ComponentType::Heading => {
            let level = props.level();
            format!(
                "<h{level} style=\"text-align: {}; color: {}; margin: 0;\">{}</h{level}>",
                props.attr("align"),
                props.attr("color"),
                props.text("text"),
            )
        }
        ComponentType::Text => format!(
            "<p style=\"text-align: {}; color: {}; line-height: 1.6; margin: 0;\">{}</p>",
            props.attr("align"),
            props.attr("color"),
            props.text("text"),
        ),
        ComponentType::Image => format!(
            "<div style=\"text-align: {};\"><img src=\"{}\" alt=\"{}\" style=\"width: {}; max-width: 100%; height: auto; border-radius: 4px;\"></div>",
            props.attr("align"),
            props.attr("src"),
            props.attr("alt"),
            props.attr("width"),
        ),
        ComponentType::Logo => format!(
            "<div style=\"text-align: {};\"><img src=\"{}\" alt=\"{}\" style=\"width: {}; height: auto;\"></div>",
            props.attr("align"),
            props.attr("src"),
            props.attr("alt"),
            props.attr("width"),
        ),
        ComponentType::Button => format!(
            "<div style=\"text-align: {};\"><a href=\"{}\" class=\"button\" style=\"background-color: {}; color: {};\">{}</a></div>",
            props.attr("align"),
            props.attr("url"),
            props.attr("backgroundColor"),
            props.attr("textColor"),
            props.text("text"),
        ),
        ComponentType::Divider => format!(
            "<hr class=\"divider\" style=\"border-top: {}px solid {}; margin: {};\">",
            props.attr("thickness"),
            props.attr("color"),
            props.attr("margin"),
        ),
        ComponentType::Spacer => format!("<div style=\"height: {};\"></div>", props.attr("height")),
        ComponentType::Signature => format!(
            "<div class=\"signature\">\
<p style=\"margin: 0; font-weight: 600; color: #1a1a1a;\">{}</p>\
<p style=\"margin: 4px 0; color: #666;\">{}</p>\
<p style=\"margin: 4px 0; color: #666;\">{}</p>\
<p style=\"margin: 4px 0; color: #1E40AF;\">{}</p>\
<p style=\"margin: 4px 0; color: #666;\">{}</p>\
</div>",
            props.text("name"),
            props.text("title"),
            props.text("company"),
            props.text("email"),
            props.text("phone"),
        ),
    };

    Some(fragment)
}

/// Reads props of one component, falling back to the type defaults.
struct PropReader<'a> {
    component: &'a ComponentInstance,
    component_type: ComponentType,
    defaults: Props,
    profile: &'a RecipientProfile,
}

impl<'a> PropReader<'a> {
    fn new(
        component: &'a ComponentInstance,
        component_type: ComponentType,
        profile: &'a RecipientProfile,
    ) -> Self {
        Self {
            component,
            component_type,
            defaults: defaults_for(component_type),
            profile,
        }
    }

    /// Raw scalar value of `key` as a string.
    fn value(&self, key: &str) -> String {
        if let Some(value) = self.component.props.get(key).and_then(scalar_to_string) {
            return value;
        }
        log::debug!(
            "component {} ({}) has no usable '{}', using default",
            self.component.id,
            self.component.kind,
            key
        );
        self.defaults
            .get(key)
            .and_then(scalar_to_string)
            .unwrap_or_default()
    }

    /// Escaped value for use inside an attribute.
    fn attr(&self, key: &str) -> String {
        escape_html(&self.value(key))
    }

    /// Escaped value for use as element text. Only the type's
    /// [`text_fields`](ComponentType::text_fields) are substituted.
    fn text(&self, key: &str) -> String {
        let value = self.value(key);
        if self.component_type.text_fields().contains(&key) {
            escape_html(&substitute(&value, self.profile))
        } else {
            escape_html(&value)
        }
    }

    /// Heading level, limited to 1..=3. Accepts integers, integral floats
    /// and numeric strings.
    fn level(&self) -> u8 {
        let level = match self.component.props.get("level") {
            Some(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match level {
            Some(level @ 1..=3) => level as u8,
            _ => 1,
        }
    }
}

/// Variables used by the document that `profile` cannot resolve, in order
/// of first use: text props of every known component, then the HTML and CSS
/// overrides.
pub fn unresolved_variables(document: &TemplateDocument, profile: &RecipientProfile) -> Vec<String> {
    let component_texts = document.components().iter().flat_map(|component| {
        let fields = component
            .component_type()
            .map(ComponentType::text_fields)
            .unwrap_or(&[]);
        fields
            .iter()
            .filter_map(move |field| component.props.get(*field).and_then(Value::as_str))
    });
    let overrides = [&document.html_content, &document.css_content]
        .into_iter()
        .filter_map(|s| s.as_deref());

    let mut names: Vec<String> = Vec::new();
    for text in component_texts.chain(overrides) {
        for name in unresolved(text, profile) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
