use crate::validate::{EMPTY_DEFINITION, first_keyword, is_known_keyword};
use crate::*;

#[test]
fn empty_definition_is_the_only_hard_error() {
    let report = validate("", ValidateOptions::default());
    assert!(!report.is_valid);
    assert_eq!(report.errors, vec![EMPTY_DEFINITION.to_string()]);

    let report = validate("   \n\t\n", ValidateOptions::strict());
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn suppress_errors_keeps_findings_but_reports_valid() {
    let report = validate("", ValidateOptions::lenient());
    assert!(report.is_valid);
    assert_eq!(report.errors, vec![EMPTY_DEFINITION.to_string()]);
}

#[test]
fn unknown_keyword_is_only_a_warning() {
    let report = validate("notADiagram\n  A --> B\n", ValidateOptions::default());
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert_eq!(
        report.warnings,
        vec!["Unrecognized diagram type keyword: \"notADiagram\"".to_string()]
    );
}

#[test]
fn broken_syntax_after_a_known_keyword_passes() {
    let report = validate("flowchart TD\n  A[[[ --> \n", ValidateOptions::default());
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn frontmatter_directives_and_comments_are_skipped() {
    let text = "---\ntitle: Demo\n---\n%%{init: {\"theme\": \"dark\"}}%%\n%% a comment\nsequenceDiagram\n  A->>B: hi\n";
    let report = validate(text, ValidateOptions::default());
    assert!(report.is_valid);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert_eq!(first_keyword(text).as_deref(), Some("sequenceDiagram"));
}

#[test]
fn unclosed_frontmatter_warns() {
    let report = validate("---\ntitle: Demo\nflowchart TD\n", ValidateOptions::default());
    assert!(report.is_valid);
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.starts_with("Front-matter block is not closed"))
    );
}

#[test]
fn frontmatter_closed_at_end_of_input_is_not_reported() {
    for text in ["---\ntitle: Demo\n---", "---\ntitle: Demo\n---\n"] {
        let report = validate(text, ValidateOptions::default());
        assert!(report.is_valid);
        assert!(
            !report
                .warnings
                .iter()
                .any(|w| w.starts_with("Front-matter block is not closed")),
            "{text:?}: {:?}",
            report.warnings
        );
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.starts_with("No diagram keyword found"))
        );
    }
}

#[test]
fn code_fences_are_flagged() {
    let report = validate("```mermaid\nflowchart TD\n```\n", ValidateOptions::default());
    assert!(report.is_valid);
    assert!(report.warnings.iter().any(|w| w.contains("code fence")));
}

#[test]
fn only_comments_warns_about_missing_keyword() {
    let report = validate("%% nothing here\n", ValidateOptions::default());
    assert!(report.is_valid);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("No diagram keyword"));
}

#[test]
fn keyword_aliases_are_known() {
    for kw in ["graph", "stateDiagram", "classDiagram-v2", "C4Context", "zenuml"] {
        assert!(is_known_keyword(kw), "{kw}");
    }
    for kind in DiagramKind::ALL {
        assert!(is_known_keyword(kind.keyword()), "{kind}");
    }
    assert!(!is_known_keyword("Flowchart"));
}

#[test]
fn trailing_colon_is_not_part_of_the_keyword() {
    assert_eq!(first_keyword("gitGraph LR:\n  commit\n").as_deref(), Some("gitGraph"));
    assert_eq!(first_keyword("gitGraph:\n").as_deref(), Some("gitGraph"));
    assert_eq!(first_keyword(""), None);
}

#[test]
fn report_serializes_in_camel_case() {
    let report = validate("pie\n", ValidateOptions::default());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "isValid": true, "errors": [], "warnings": [] })
    );
}
