//! Permissive notation validator.
//!
//! The rendering engine is authoritative on grammar. This check only rejects empty input and
//! reports a couple of common mistakes as warnings; it never inspects indentation, brackets or
//! tokens past the family keyword.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const EMPTY_DEFINITION: &str = "Definition is empty";

/// Leading tokens accepted without a warning.
pub const KNOWN_KEYWORDS: &[&str] = &[
    "flowchart",
    "flowchart-elk",
    "graph",
    "sequenceDiagram",
    "classDiagram",
    "classDiagram-v2",
    "stateDiagram",
    "stateDiagram-v2",
    "erDiagram",
    "gitGraph",
    "pie",
    "timeline",
    "gantt",
    "kanban",
    "journey",
    "architecture",
    "architecture-beta",
    "block",
    "block-beta",
    "packet",
    "packet-beta",
    "mindmap",
    "quadrantChart",
    "treemap",
    "treemap-beta",
    "sankey",
    "sankey-beta",
    "xychart",
    "xychart-beta",
    "requirementDiagram",
    "requirement",
    "C4Context",
    "C4Container",
    "C4Component",
    "C4Dynamic",
    "C4Deployment",
    "info",
    "radar-beta",
    "zenuml",
];

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^-{3}\s*[\n\r](.*?)[\n\r]-{3}\s*(?:[\n\r]+|$)").expect("front-matter regex")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    pub suppress_errors: bool,
}

impl ValidateOptions {
    /// Findings that are errors make the report invalid.
    pub fn strict() -> Self {
        Self {
            suppress_errors: false,
        }
    }

    /// The report is always valid; errors and warnings are still collected.
    pub fn lenient() -> Self {
        Self {
            suppress_errors: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate(notation: &str, options: ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::default();

    if notation.trim().is_empty() {
        report.errors.push(EMPTY_DEFINITION.to_string());
    } else {
        let (body, frontmatter_ok) = strip_frontmatter(notation);
        if !frontmatter_ok {
            report
                .warnings
                .push("Front-matter block is not closed by an un-indented `---` line".to_string());
        }

        match first_statement(&remove_directives(&body)) {
            Some(line) => {
                let keyword = leading_keyword(line);
                if !is_known_keyword(keyword) {
                    report
                        .warnings
                        .push(format!("Unrecognized diagram type keyword: \"{keyword}\""));
                }
            }
            None => report.warnings.push(
                "No diagram keyword found after front-matter, directives and comments".to_string(),
            ),
        }

        if notation.contains("```") {
            report.warnings.push(
                "Definition contains markdown code fence markers (```); pass the raw notation instead"
                    .to_string(),
            );
        }
    }

    report.is_valid = options.suppress_errors || report.errors.is_empty();
    if !report.errors.is_empty() || !report.warnings.is_empty() {
        tracing::trace!(
            errors = ?report.errors,
            warnings = ?report.warnings,
            suppress_errors = options.suppress_errors,
            "notation validation findings"
        );
    }
    report
}

pub fn is_known_keyword(keyword: &str) -> bool {
    KNOWN_KEYWORDS.contains(&keyword)
}

/// The family keyword of `notation`, skipping front-matter, directives and comments.
pub fn first_keyword(notation: &str) -> Option<String> {
    let (body, _) = strip_frontmatter(notation);
    let cleaned = remove_directives(&body);
    first_statement(&cleaned).map(|line| leading_keyword(line).to_string())
}

fn leading_keyword(line: &str) -> &str {
    line.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches([':', ';'])
}

fn first_statement(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("%%"))
}

/// Returns the text without a leading front-matter block, and whether any block that was
/// opened was also closed.
fn strip_frontmatter(text: &str) -> (String, bool) {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("---") {
        return (text.to_string(), true);
    }
    if FRONTMATTER_RE.is_match(trimmed) {
        return (FRONTMATTER_RE.replace(trimmed, "").into_owned(), true);
    }
    (text.to_string(), false)
}

fn remove_directives(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(rel) = text[pos..].find("%%{") {
        let start = pos + rel;
        out.push_str(&text[pos..start]);
        let after_start = start + 3;
        if let Some(rel_end) = text[after_start..].find("}%%") {
            pos = after_start + rel_end + 3;
        } else {
            return out;
        }
    }
    out.push_str(&text[pos..]);
    out
}
