//! `#if` and `#each` section tests for template engine

use super::helpers::{resume_context, simple_context};
use super::*;
use serde_json::json;

fn canonical(template: &str, context: &Value) -> String {
    Engine::new().render_canonical(template, context).unwrap()
}

#[test]
fn test_if_truthy_and_falsy() {
    let context = simple_context();
    assert_eq!(canonical("{{#if title}}yes{{/if}}", &context), "yes");
    assert_eq!(canonical("{{#if empty}}yes{{/if}}", &context), "");
    assert_eq!(canonical("{{#if zero}}yes{{/if}}", &context), "");
    assert_eq!(canonical("{{#if missing}}yes{{/if}}", &context), "");
    assert_eq!(canonical("{{#if enabled}}yes{{/if}}", &context), "yes");
}

#[test]
fn test_if_on_arrays() {
    let context = resume_context();
    assert_eq!(canonical("{{#if skills_data}}yes{{/if}}", &context), "yes");
    assert_eq!(canonical("{{#if languages_data}}yes{{/if}}", &context), "");
}

#[test]
fn test_if_with_subexpression() {
    let context = resume_context();
    assert_eq!(
        canonical("{{#if (hasItems skills_data)}}skills{{/if}}", &context),
        "skills"
    );
    assert_eq!(
        canonical("{{#if (hasItems languages_data)}}langs{{/if}}", &context),
        ""
    );
}

#[test]
fn test_each_iterates_in_order() {
    let context = resume_context();
    assert_eq!(
        canonical("{{#each experience_data}}<li>{{this.company}}</li>{{/each}}", &context),
        "<li>Acme</li><li>Initech</li>"
    );
}

#[test]
fn test_each_bare_names_read_the_item() {
    let context = resume_context();
    assert_eq!(
        canonical("{{#each skills_data}}{{name}}={{level}} {{/each}}", &context),
        "Rust=expert SQL=advanced "
    );
}

#[test]
fn test_each_over_scalars_binds_this() {
    let context = json!({"tags": ["a", "b", "c"]});
    assert_eq!(canonical("{{#each tags}}[{{this}}]{{/each}}", &context), "[a][b][c]");
}

#[test]
fn test_each_empty_or_non_array_renders_nothing() {
    let context = json!({"list": [], "text": "abc", "obj": {"a": 1}});
    assert_eq!(canonical("{{#each list}}x{{/each}}", &context), "");
    assert_eq!(canonical("{{#each text}}x{{/each}}", &context), "");
    assert_eq!(canonical("{{#each obj}}x{{/each}}", &context), "");
    assert_eq!(canonical("{{#each missing}}x{{/each}}", &context), "");
}

#[test]
fn test_each_loop_metadata() {
    let context = json!({"items": ["a", "b", "c"]});
    let template = "{{#each items}}{{@index}}{{#if @first}}^{{/if}}{{this}}{{#if @last}}${{/if}} {{/each}}";
    assert_eq!(canonical(template, &context), "0^a 1b 2c$ ");
}

#[test]
fn test_bare_name_falls_back_to_outer_scope() {
    let context = resume_context();
    assert_eq!(
        canonical("{{#each skills_data}}{{full_name}}/{{name}};{{/each}}", &context),
        "Jean Dupont/Rust;Jean Dupont/SQL;"
    );
}

#[test]
fn test_root_and_parent_paths() {
    let context = json!({
        "owner": "root",
        "groups": [
            {"label": "G1", "members": [{"name": "m1"}, {"name": "m2"}]}
        ]
    });
    let template = "{{#each groups}}{{#each members}}{{../this.label}}:{{name}}:{{@root.owner}} {{/each}}{{/each}}";
    assert_eq!(canonical(template, &context), "G1:m1:root G1:m2:root ");
}

#[test]
fn test_parent_path_beyond_root_is_empty() {
    let context = json!({"a": "x"});
    assert_eq!(canonical("[{{../../a}}][{{../this}}]", &context), "[][]");
}

#[test]
fn test_nested_sections() {
    let context = resume_context();
    let template = "{{#each experience_data}}{{#if is_current}}now:{{company}}{{/if}}{{/each}}";
    assert_eq!(canonical(template, &context), "now:Initech");
}

#[test]
fn test_section_args_may_be_helper_results() {
    let context = json!({"rows": [[1, 2], [3]]});
    assert_eq!(
        canonical("{{#each rows}}{{#each this}}{{this}}{{/each}}|{{/each}}", &context),
        "12|3|"
    );
}
