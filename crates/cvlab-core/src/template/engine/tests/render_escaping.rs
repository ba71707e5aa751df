//! HTML escaping and backslash escape tests for template engine

use super::helpers::simple_context;
use super::*;
use serde_json::json;

fn canonical(template: &str, context: &Value) -> String {
    Engine::new().render_canonical(template, context).unwrap()
}

#[test]
fn test_output_is_html_escaped() {
    let context = json!({"bio": "<b>Tom & Jerry</b>"});
    assert_eq!(
        canonical("{{bio}}", &context),
        "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"
    );
}

#[test]
fn test_triple_stash_is_raw() {
    let context = json!({"bio": "<b>Tom & Jerry</b>"});
    assert_eq!(canonical("{{{bio}}}", &context), "<b>Tom & Jerry</b>");
    assert_eq!(canonical("{{{ bio }}}", &context), "<b>Tom & Jerry</b>");
}

#[test]
fn test_plain_helper_output_is_escaped() {
    let context = json!({"name": "<i>abc</i>"});
    assert_eq!(canonical("{{first name 3}}", &context), "&lt;i&gt;");
}

#[test]
fn test_safe_helper_output_is_not_escaped() {
    let context = json!({"text": "a\nb"});
    assert_eq!(canonical("{{nl2br text}}", &context), "a<br>b");
    assert_eq!(
        canonical("{{preserveWhitespace text}}", &context),
        "<span style=\"white-space: pre-wrap;\">a\nb</span>"
    );
}

#[test]
fn test_template_text_is_not_escaped() {
    let context = simple_context();
    assert_eq!(canonical("<p class=\"x\">{{title}}</p>", &context), "<p class=\"x\">My Title</p>");
}

#[test]
fn test_render_escape_sequences() {
    let context = simple_context();
    assert_eq!(canonical(r"Literal: \{{title}}", &context), "Literal: {{title}}");
    assert_eq!(canonical(r"Literal: \{{ title }}", &context), "Literal: {{ title }}");
}

#[test]
fn test_render_double_backslash_escape() {
    let context = simple_context();
    assert_eq!(canonical(r"Backslash: \\{{title}}", &context), r"Backslash: \My Title");
    assert_eq!(canonical(r"Both: \\\{{title}}", &context), r"Both: \{{title}}");
}

#[test]
fn test_escaped_section_is_literal() {
    let context = json!({"items": [1, 2]});
    assert_eq!(
        canonical(r"\{{#each items}}x", &context),
        "{{#each items}}x"
    );
}

#[test]
fn test_backslashes_without_tag_are_kept() {
    let context = simple_context();
    assert_eq!(canonical(r"C:\path\to {{title}}", &context), r"C:\path\to My Title");
}
