//! End-to-end translation tests

use super::*;

#[test]
fn test_if_directive() {
    assert_eq!(
        translate("{% if name %}<p>{{name}}</p>{% endif %}"),
        "{{#if name}}<p>{{name}}</p>{{/if}}"
    );
}

#[test]
fn test_for_directive_with_slices() {
    let source = "{% for exp in experience_data %}<p>{{exp.start_date[:4]}} - {{exp.end_date[:4]}}</p>{% endfor %}";
    assert_eq!(
        translate(source),
        "{{#each experience_data}}<p>{{first this.start_date 4}} - {{first this.end_date 4}}</p>{{/each}}"
    );
}

#[test]
fn test_top_level_slices() {
    assert_eq!(translate("{{name[4:]}}"), "{{substr name 4}}");
    assert_eq!(translate("{{ year[-4:] }}"), "{{last year 4}}");
    assert_eq!(translate("{{exp.start_date[:4]}}"), "{{first exp.start_date 4}}");
}

#[test]
fn test_sibling_loops_reuse_item_name() {
    assert_eq!(
        translate("{% for x in a %}{{x}}{% endfor %}{% for x in b %}{{x.n}}{% endfor %}{{x}}"),
        "{{#each a}}{{this}}{{/each}}{{#each b}}{{this.n}}{{/each}}{{x}}"
    );
}

#[test]
fn test_item_name_outside_its_loop_is_not_rewritten() {
    assert_eq!(
        translate("{{skill.name}}{% for skill in skills %}{{skill.name}}{% endfor %}"),
        "{{skill.name}}{{#each skills}}{{this.name}}{{/each}}"
    );
}

#[test]
fn test_helper_arguments_are_rewritten() {
    assert_eq!(
        translate("{% for s in skills %}{{percentage s.level 10}}{% endfor %}"),
        "{{#each skills}}{{percentage this.level 10}}{{/each}}"
    );
    assert_eq!(
        translate("{% for s in skills %}{{#if (hasItems s.tags)}}x{{/if}}{% endfor %}"),
        "{{#each skills}}{{#if (hasItems this.tags)}}x{{/if}}{{/each}}"
    );
}

#[test]
fn test_loop_over_nested_list_of_outer_item() {
    assert_eq!(
        translate("{% for exp in jobs %}{% if exp.end %}{{exp.end}}{% endif %}{% endfor %}"),
        "{{#each jobs}}{{#if this.end}}{{this.end}}{{/if}}{{/each}}"
    );
}

#[test]
fn test_escaped_tags_pass_through() {
    assert_eq!(translate(r"\{{name}}"), r"\{{name}}");
    assert_eq!(translate(r"\{% if x %}"), "{% if x %}");
    assert_eq!(translate(r"\\{% if x %}y{% endif %}"), r"\\{{#if x}}y{{/if}}");
}

#[test]
fn test_unterminated_tags_are_text() {
    assert_eq!(translate("a {% if x"), "a {% if x");
    assert_eq!(translate("a {{ name"), "a {{ name");
}

#[test]
fn test_malformed_directives_pass_through_with_diagnostics() {
    let result = translate_with_diagnostics("{% if a %}x\n{% endfor %}{% endif %}{% cycle %}");
    assert_eq!(result.output, "{{#if a}}x\n{% endfor %}{{/if}}{% cycle %}");
    let kinds: Vec<_> = result.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::MismatchedCloser,
            DiagnosticKind::UnknownDirective
        ]
    );
    assert_eq!(result.diagnostics[0].line, 2);
    assert_eq!(result.diagnostics[0].snippet, "{% endfor %}");
}

#[test]
fn test_unclosed_loop_keeps_body_untranslated_scope() {
    let result = translate_with_diagnostics("{% for e in list %}{{e.a}}");
    assert_eq!(result.output, "{% for e in list %}{{e.a}}");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnclosedBlock);
}

#[test]
fn test_diagnostic_display() {
    let result = translate_with_diagnostics("{% endif %}");
    assert_eq!(
        result.diagnostics[0].to_string(),
        "line 1: closer without open block '{% endif %}'"
    );
}

#[test]
fn test_translation_is_deterministic() {
    let source = "{% for p in people %}{{p.name[:1]}}{{company}}{% endfor %}";
    assert_eq!(translate(source), translate(source));
}

#[test]
fn test_translation_serializes() {
    let json = serde_json::to_value(translate_with_diagnostics("{% foo %}")).unwrap();
    assert_eq!(json["output"], "{% foo %}");
    assert_eq!(json["diagnostics"][0]["kind"], "unknown_directive");
}
