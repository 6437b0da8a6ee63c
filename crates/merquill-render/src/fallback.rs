use htmlize::escape_all_quotes;

pub const FALLBACK_CLASS: &str = "merquill-render-error";

/// Inert diagnostic block shown in place of a diagram that failed to render.
///
/// Both the error text and the notation are HTML-escaped, so the fragment can be embedded in
/// any document as-is.
pub fn fallback_markup(error: &str, notation: &str) -> String {
    format!(
        "<div class=\"{FALLBACK_CLASS}\" role=\"alert\">\n\
         <p><strong>Diagram could not be rendered:</strong> {}</p>\n\
         <details><summary>View definition</summary><pre><code>{}</code></pre></details>\n\
         </div>",
        escape_all_quotes(error),
        escape_all_quotes(notation)
    )
}
