//! Helper invocation tests for template engine

use super::helpers::resume_context;
use super::*;
use crate::template::helpers::{Helper, HelperRegistry, HelperValue};
use serde_json::json;
use std::sync::Arc;

fn canonical(template: &str, context: &Value) -> String {
    Engine::new().render_canonical(template, context).unwrap()
}

#[test]
fn test_string_helpers() {
    let context = json!({"date": "2020-01-15", "name": "John Doe"});
    assert_eq!(canonical("{{first date 4}}", &context), "2020");
    assert_eq!(canonical("{{last date 2}}", &context), "15");
    assert_eq!(canonical("{{substr name 5}}", &context), "Doe");
    assert_eq!(canonical("{{substr name 0 4}}", &context), "John");
    assert_eq!(canonical("{{year date}}", &context), "2020");
}

#[test]
fn test_helper_with_missing_argument_is_empty() {
    let context = json!({});
    assert_eq!(canonical("[{{first nope 4}}]", &context), "[]");
    assert_eq!(canonical("[{{nl2br nope}}]", &context), "[]");
    assert_eq!(canonical("[{{year nope}}]", &context), "[]");
}

#[test]
fn test_percentage_helper() {
    let context = json!({"level": 3});
    assert_eq!(canonical("{{percentage level}}", &context), "60");
    assert_eq!(canonical("{{percentage level 4}}", &context), "75");
    assert_eq!(canonical("{{percentage 1 3}}", &context), "33.33333333333333");
}

#[test]
fn test_equal_helper_in_condition() {
    let context = resume_context();
    let template = "{{#each skills_data}}{{#if (equal level 'expert')}}*{{/if}}{{name}} {{/each}}";
    assert_eq!(canonical(template, &context), "*Rust SQL ");
}

#[test]
fn test_helpers_read_item_paths() {
    let context = resume_context();
    let template = "{{#each experience_data}}{{first this.start_date 4}}-{{year end_date}};{{/each}}";
    assert_eq!(canonical(template, &context), "2020-2022;2018-;");
}

#[test]
fn test_nested_helper_calls() {
    let context = json!({"date": "Since 1999-04"});
    assert_eq!(canonical("{{last (year date) 2}}", &context), "99");
}

#[test]
fn test_bare_helper_name_is_a_path() {
    let context = json!({"year": "2020"});
    assert_eq!(canonical("{{year}}", &context), "2020");
    assert_eq!(canonical("{{last year 2}}", &context), "20");
}

#[test]
fn test_injected_registry() {
    let mut registry = HelperRegistry::new();
    registry.register(
        "shout",
        Helper::new(1, 1, |args| {
            HelperValue::Plain(json!(crate::template::value::display(&args[0]).to_uppercase()))
        }),
    );
    let engine = Engine::with_registry(Arc::new(registry));
    assert_eq!(
        engine
            .render_canonical("{{shout name}}", &json!({"name": "ada"}))
            .unwrap(),
        "ADA"
    );
    assert!(engine
        .render_canonical("{{first name 1}}", &json!({"name": "ada"}))
        .is_err());
}

#[test]
fn test_default_engines_share_builtin_registry() {
    let a = Engine::new();
    let b = Engine::default();
    assert_eq!(a.registry().len(), b.registry().len());
    assert!(a.registry().contains("preserveWhitespace"));
}
