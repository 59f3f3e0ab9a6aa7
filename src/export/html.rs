//! Markdown to HTML conversion for exported text notes.
//!
//! Preprocessing is plain text substitution ahead of the markdown parser,
//! so it also applies inside link destinations, autolinks and code spans.
//! A URL such as `https://host/~user/` followed by another tilde on the
//! same line gets its tilde doubled too.

use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, html};
use regex::{Captures, Regex};

/// Level that engine `h1` headings are rendered at, one below the `h4`
/// header of a leaf note.
const DEMOTED_H1: HeadingLevel = HeadingLevel::H5;

/// Double-tilde spans (left alone) or single-tilde spans (to be doubled).
static TILDE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~[^\n]*?~~|~[^~\n]+~").expect("valid tilde regex"));

/// Rewrites exporter-specific markdown before it reaches the engine.
///
/// - `\\(` and `\\)` math delimiters become `$`.
/// - `~text~` becomes `~~text~~` so the engine renders it as strikethrough
///   the way the exporting application displayed it. Any single-tilde
///   pair on a line counts, including one inside a link or code span.
///
/// ```
/// use folio::export::preprocess_markdown;
///
/// assert_eq!(preprocess_markdown(r"\\(x^2\\)"), "$x^2$");
/// assert_eq!(preprocess_markdown("a ~b~ c"), "a ~~b~~ c");
/// ```
pub fn preprocess_markdown(markdown: &str) -> String {
    let math = markdown.replace(r"\\(", "$").replace(r"\\)", "$");
    TILDE_SPAN
        .replace_all(&math, |caps: &Captures| {
            let span = &caps[0];
            if span.starts_with("~~") {
                span.to_string()
            } else {
                format!("~{}~", span)
            }
        })
        .into_owned()
}

/// Converts markdown text to HTML.
///
/// Enables common markdown extensions:
/// - Tables
/// - Footnotes
/// - Strikethrough
/// - Task lists
///
/// Top-level headings are demoted to `h5` so they sit below the note
/// headers of the composed document.
///
/// # Example
///
/// ```
/// use folio::export::markdown_to_html;
///
/// let html = markdown_to_html("# Hello\n\nWorld");
/// assert!(html.contains("<h5>Hello</h5>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Start(Tag::Heading(HeadingLevel::H1, id, classes)) => {
            Event::Start(Tag::Heading(DEMOTED_H1, id, classes))
        }
        Event::End(Tag::Heading(HeadingLevel::H1, id, classes)) => {
            Event::End(Tag::Heading(DEMOTED_H1, id, classes))
        }
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Runs the full text-note pipeline: preprocessing, conversion, wrapping.
pub fn render_markdown_note(markdown: &str) -> String {
    let body = markdown_to_html(&preprocess_markdown(markdown));
    format!("<div class=\"note-content\">{}</div>", body)
}

/// Escapes text for use in HTML element content or a double-quoted
/// attribute.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark::escape::escape_html(&mut escaped, text);
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilde_doubling_reaches_link_destinations() {
        assert_eq!(
            preprocess_markdown("[t](https://h/~u/p) and ~x~"),
            "[t](https://h/~~u/p) and ~~x~"
        );
        assert_eq!(preprocess_markdown("`a ~b~`"), "`a ~~b~~`");
        assert_eq!(preprocess_markdown("[t](https://h/~u/p)"), "[t](https://h/~u/p)");
    }

    #[test]
    fn test_markdown_to_html_basic() {
        let markdown = "# Heading\n\nParagraph text.";
        let html = markdown_to_html(markdown);

        assert!(html.contains("<h5>Heading</h5>"));
        assert!(html.contains("<p>Paragraph text.</p>"));
    }

    #[test]
    fn test_markdown_to_html_demotes_only_h1() {
        let markdown = "# H1\n## H2\n### H3";
        let html = markdown_to_html(markdown);

        assert!(html.contains("<h5>H1</h5>"));
        assert!(html.contains("<h2>H2</h2>"));
        assert!(html.contains("<h3>H3</h3>"));
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn test_heading_text_mentioning_h1_is_untouched() {
        let html = markdown_to_html("Use an h1 element.");
        assert!(html.contains("Use an h1 element."));
    }

    #[test]
    fn test_markdown_to_html_code_block() {
        let markdown = "```rust\nfn main() {}\n```";
        let html = markdown_to_html(markdown);

        assert!(html.contains("<pre>"));
        assert!(html.contains("<code"));
        assert!(html.contains("fn main()"));
    }

    #[test]
    fn test_markdown_to_html_links() {
        let markdown = "[link](https://example.com)";
        let html = markdown_to_html(markdown);

        assert!(html.contains(r#"<a href="https://example.com">link</a>"#));
    }

    #[test]
    fn test_markdown_to_html_relative_link() {
        let html = markdown_to_html("See [B](b.md)");
        assert!(html.contains(r#"<a href="b.md">B</a>"#));
    }

    #[test]
    fn test_markdown_to_html_tables() {
        let markdown = "| A | B |\n|---|---|\n| 1 | 2 |";
        let html = markdown_to_html(markdown);

        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_markdown_to_html_strikethrough() {
        let markdown = "This is ~~deleted~~ text.";
        let html = markdown_to_html(markdown);

        assert!(html.contains("<del>deleted</del>"));
    }

    #[test]
    fn test_markdown_to_html_task_list() {
        let markdown = "- [x] Done\n- [ ] Todo";
        let html = markdown_to_html(markdown);

        assert!(html.contains("checked"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_markdown_to_html_image() {
        let markdown = "![alt text](image.png)";
        let html = markdown_to_html(markdown);

        assert!(html.contains("<img"));
        assert!(html.contains(r#"src="image.png""#));
        assert!(html.contains(r#"alt="alt text""#));
    }

    #[test]
    fn test_markdown_to_html_empty() {
        let html = markdown_to_html("");
        assert!(html.is_empty());
    }

    #[test]
    fn test_preprocess_math_delimiters() {
        let markdown = r"Energy: \\(E = mc^2\\) holds.";
        assert_eq!(preprocess_markdown(markdown), "Energy: $E = mc^2$ holds.");
    }

    #[test]
    fn test_preprocess_single_backslash_untouched() {
        let markdown = r"Escaped \( paren";
        assert_eq!(preprocess_markdown(markdown), markdown);
    }

    #[test]
    fn test_preprocess_wraps_single_tilde_spans() {
        assert_eq!(preprocess_markdown("~a~ and ~b~"), "~~a~~ and ~~b~~");
    }

    #[test]
    fn test_preprocess_keeps_double_tilde_spans() {
        assert_eq!(preprocess_markdown("~~gone~~"), "~~gone~~");
    }

    #[test]
    fn test_preprocess_keeps_tilde_fences() {
        let markdown = "~~~\ncode\n~~~";
        assert_eq!(preprocess_markdown(markdown), markdown);
    }

    #[test]
    fn test_preprocess_tilde_spans_stay_on_one_line() {
        let markdown = "~start\nend~";
        assert_eq!(preprocess_markdown(markdown), markdown);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;'");
    }

    #[test]
    fn test_render_markdown_note_wraps_content() {
        let html = render_markdown_note("~x~");
        assert!(html.starts_with("<div class=\"note-content\">"));
        assert!(html.contains("<del>x</del>"));
    }
}
