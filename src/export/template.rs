//! HTML document assembly for composed exports.

use std::io;
use std::path::{Path, PathBuf};

use minijinja::{Environment, Value, context};
use thiserror::Error;

use crate::export::theme::get_theme_css;

/// Default HTML template for the exported document.
///
/// KaTeX renders `$...$` inline math client-side, matching the math
/// delimiters produced by markdown preprocessing.
pub const DEFAULT_DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.0/dist/katex.min.css" integrity="sha384-Xi8rHCmBmhbuyyhbI88391ZKP2dmfnOl4rT9ZfRI7mLTdk1wblIUnrIq35nqwEvC" crossorigin="anonymous">
    <script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.0/dist/katex.min.js" integrity="sha384-X/XCfMm41VSsqRNQgDerQczD69XqmjOOOwYQvr/uuC+j4OPoNhVgjdGFwhvN02Ja" crossorigin="anonymous"></script>
    <script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.0/dist/contrib/auto-render.min.js" integrity="sha384-+XBljXPPiv+OzfbB3cVmLHf4hdUFHlWNZN5spNQ7rmHTXpd7WvJum6fIACpNNfIR" crossorigin="anonymous" onload="renderMathInElement(document.body, {delimiters: [{left: '$', right: '$', display: false}]});"></script>
    <style>{{ theme_css }}</style>
</head>
<body>
{{ content }}
</body>
</html>"##;

const DOCUMENT_TEMPLATE_NAME: &str = "document.html";

/// Errors assembling the final document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unknown theme: '{0}'. Use 'default', 'dark', or a path to a CSS file.")]
    UnknownTheme(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Options for assembling the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Path to custom template file.
    pub template_path: Option<&'a Path>,
    /// Theme name or path to CSS file.
    pub theme: Option<&'a str>,
}

/// Wraps a composed body into a complete HTML document.
///
/// # Arguments
///
/// * `title` - Document title
/// * `body` - The composed note tree, already HTML
/// * `options` - Rendering options (template, theme)
///
/// # Returns
///
/// Complete HTML document as a string.
pub fn render_document(
    title: &str,
    body: &str,
    options: &RenderOptions,
) -> Result<String, DocumentError> {
    let theme_css = get_theme_css(options.theme)?;

    let template_str = match options.template_path {
        Some(p) => std::fs::read_to_string(p).map_err(|source| DocumentError::Io {
            path: p.into(),
            source,
        })?,
        None => DEFAULT_DOCUMENT_TEMPLATE.to_string(),
    };

    let mut env = Environment::new();
    env.add_template(DOCUMENT_TEMPLATE_NAME, &template_str)?;
    let tmpl = env.get_template(DOCUMENT_TEMPLATE_NAME)?;

    let html = tmpl.render(context! {
        title => title,
        theme_css => Value::from_safe_string(theme_css),
        content => Value::from_safe_string(body.to_string()),
    })?;

    Ok(html)
}
