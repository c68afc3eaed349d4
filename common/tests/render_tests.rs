use common::model::component::ComponentType;
use common::model::document::{ComponentInstance, TemplateDocument};
use common::model::variable::RecipientProfile;
use common::render::{render, RenderMeta};
use serde_json::{json, Map};

fn body(html: &str) -> &str {
    let start = html.find("<div class=\"email-container\">").unwrap();
    let end = html.rfind("</body>").unwrap();
    &html[start..end]
}

#[test]
fn test_render_is_deterministic() {
    let mut doc = TemplateDocument::new();
    doc.add_component(ComponentType::Heading);
    doc.add_component(ComponentType::Signature);
    doc.set_html_content("<p>{{firstName}}</p>");
    let profile = RecipientProfile::sample();
    let meta = RenderMeta::with_subject("Urgent: verify your account");

    assert_eq!(render(&doc, &profile, &meta), render(&doc, &profile, &meta));
}

#[test]
fn test_fragments_follow_document_order() {
    let mut doc = TemplateDocument::new();
    doc.add_component(ComponentType::Heading);
    doc.add_component(ComponentType::Button);
    doc.add_component(ComponentType::Spacer);

    let html = render(&doc, &RecipientProfile::new(), &RenderMeta::default());
    let heading = html.find("<h1 ").unwrap();
    let button = html.find("class=\"button\"").unwrap();
    let spacer = html.find("<div style=\"height: 20px;\"></div>").unwrap();

    assert!(heading < button);
    assert!(button < spacer);
}

#[test]
fn test_unknown_type_is_skipped_and_siblings_render() {
    let mut doc = TemplateDocument::new();
    doc.add_component(ComponentType::Text);
    doc.structure.push(ComponentInstance {
        id: "legacy".to_string(),
        kind: "countdown".to_string(),
        props: Map::new(),
    });
    doc.add_component(ComponentType::Divider);

    let html = render(&doc, &RecipientProfile::new(), &RenderMeta::default());
    assert!(html.contains("Your text content goes here. Click to edit."));
    assert!(html.contains("<hr class=\"divider\""));
    assert!(!html.contains("countdown"));
    assert_eq!(html.matches("<div class=\"component\">").count(), 2);
}

#[test]
fn test_override_alone_is_the_whole_body() {
    let mut doc = TemplateDocument::new();
    doc.set_html_content("<p>Dear {{firstName}}, review the attached invoice.</p>");

    let html = render(&doc, &RecipientProfile::sample(), &RenderMeta::default());
    assert_eq!(
        body(&html),
        "<div class=\"email-container\">\n<p>Dear John, review the attached invoice.</p>\n</div>\n"
    );
}

#[test]
fn test_override_is_appended_after_components() {
    let mut doc = TemplateDocument::new();
    doc.add_component(ComponentType::Heading);
    doc.set_html_content("<p id=\"raw\">raw block</p>");

    let html = render(&doc, &RecipientProfile::new(), &RenderMeta::default());
    let heading = html.find("<h1 ").unwrap();
    let raw = html.find("<div class=\"component\"><p id=\"raw\">raw block</p></div>").unwrap();
    assert!(heading < raw);
}

#[test]
fn test_empty_document_renders_a_complete_shell() {
    let html = render(
        &TemplateDocument::new(),
        &RecipientProfile::new(),
        &RenderMeta::default(),
    );
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));
    assert!(!html.contains("class=\"component\""));
    assert!(!html.contains("<script"));
}

#[test]
fn test_unresolved_variables_stay_visible() {
    let mut doc = TemplateDocument::new();
    let id = doc.add_component(ComponentType::Text).id.clone();
    let mut partial = Map::new();
    partial.insert("text".into(), json!("Hi {{firstName}}, from {{company}}"));
    doc.update_component(&id, partial).unwrap();

    let profile: RecipientProfile = [("firstName", "Ana")].into_iter().collect();
    let html = render(&doc, &profile, &RenderMeta::default());
    assert!(html.contains("Hi Ana, from {{company}}"));
}

#[test]
fn test_stored_document_renders_with_recovered_props() {
    let doc = TemplateDocument::from_json(
        r##"{"structure":[
            {"id":"a","type":"image","props":{"src":"https://cdn.test/x.png"}},
            {"id":"b","type":"heading","props":{"text":"{{department}} update","level":"big"}}
        ]}"##,
    )
    .unwrap();

    let html = render(&doc, &RecipientProfile::sample(), &RenderMeta::default());
    assert!(html.contains("src=\"https://cdn.test/x.png\" alt=\"Image description\""));
    assert!(html.contains("<h1 style=\"text-align: left; color: #000000; margin: 0;\">Sales update</h1>"));
}
