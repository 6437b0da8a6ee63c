use crate::model::Accessibility;
use ryu_js::Buffer;
use std::borrow::Cow;

/// Body indent of the block-indented families.
pub(crate) const BLOCK_INDENT: &str = "    ";
/// Per-depth indent of the recursive families (mind map, tree map, kanban).
pub(crate) const NESTED_INDENT: &str = "  ";

/// Builds notation text one line at a time.
///
/// The writer tracks a current depth; `line` writes at that depth while `column_zero` ignores it.
#[derive(Debug)]
pub(crate) struct NotationWriter {
    lines: Vec<String>,
    depth: usize,
    unit: &'static str,
}

impl NotationWriter {
    pub(crate) fn new(header: impl Into<String>) -> Self {
        Self::with_unit(header, BLOCK_INDENT)
    }

    pub(crate) fn with_unit(header: impl Into<String>, unit: &'static str) -> Self {
        Self {
            lines: vec![header.into()],
            depth: 0,
            unit,
        }
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        let mut out = String::with_capacity(self.unit.len() * self.depth + text.len());
        for _ in 0..self.depth {
            out.push_str(self.unit);
        }
        out.push_str(text);
        self.lines.push(out);
    }

    pub(crate) fn column_zero(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Writes `accTitle`/`accDescr` lines at the current depth.
    pub(crate) fn accessibility(&mut self, acc: Option<&Accessibility>) {
        let Some(acc) = acc else {
            return;
        };
        if let Some(title) = acc.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            self.line(format!("accTitle: {}", single_line(title)));
        }
        if let Some(descr) = acc
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            if descr.contains('\n') {
                self.line("accDescr {");
                self.indent();
                for part in descr.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    self.line(part.replace('}', ")"));
                }
                self.dedent();
                self.line("}");
            } else {
                self.line(format!("accDescr: {descr}"));
            }
        }
    }

    pub(crate) fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

fn needs_quotes(label: &str) -> bool {
    label.is_empty()
        || label.trim() != label
        || label.chars().any(|c| {
            matches!(
                c,
                '[' | ']' | '(' | ')' | '{' | '}' | '|' | '<' | '>' | '"' | '#' | ';' | ':' | '&'
                    | '@' | '`'
            )
        })
}

/// Escapes a label that sits inside a bracket pair or between pipes.
///
/// Plain labels are returned unchanged. Labels with notation-significant characters are wrapped
/// in double quotes with inner quotes written as `#quot;`; newlines become `<br/>`.
pub fn escape_label(label: &str) -> Cow<'_, str> {
    let label: Cow<'_, str> = if label.contains('\n') {
        Cow::Owned(label.lines().collect::<Vec<_>>().join("<br/>"))
    } else {
        Cow::Borrowed(label)
    };
    if !needs_quotes(&label) {
        return label;
    }
    Cow::Owned(format!("\"{}\"", label.replace('"', "#quot;")))
}

/// Wraps `text` in double quotes for grammars that take a plain quoted string (pie labels,
/// tree map names, packet fields). These grammars do not decode entity codes, so inner double
/// quotes are replaced by single quotes.
pub(crate) fn quoted(text: &str) -> String {
    format!("\"{}\"", single_line(text).replace('"', "'"))
}

/// Free text trailing a `:` (messages, transitions, relationship labels).
///
/// `;` would terminate the statement and is written as the `#59;` entity code.
pub(crate) fn free_text(text: &str) -> String {
    single_line(text).replace(';', "#59;")
}

pub(crate) fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains('\n') || text.contains('\r') {
        Cow::Owned(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Formats a number the way the rendering engine would print it (`45.0` → `45`).
pub(crate) fn number(v: f64) -> String {
    let mut b = Buffer::new();
    b.format(v).to_string()
}

pub(crate) fn number_list(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| number(*v)).collect();
    format!("[{}]", parts.join(", "))
}
