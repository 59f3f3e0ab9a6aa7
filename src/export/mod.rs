//! Export functionality: turning a note tree into one rendered document.
//!
//! The pipeline walks the manifest tree, renders each note, composes the
//! nested document, and finally rewrites internal links against the path
//! index. Delivery to HTML files, PDF engines, or a browser lives in
//! [`deliver`].

pub mod compose;
pub mod content;
pub mod deliver;
mod html;
pub mod links;
pub mod path_index;
pub mod pipeline;
pub mod template;
mod theme;

pub use compose::{Composition, Compositor, DEFAULT_MESSAGE, RenderReport};
pub use content::{ContentError, DegradedNote, NodeRender, RenderedContent, render_content};
pub use deliver::{DeliveryError, PdfEngine, open_preview, render_pdf, write_html};
pub use html::{markdown_to_html, preprocess_markdown, render_markdown_note};
pub use links::{LinkResolution, LinkResolver, RefKind, Rewrite};
pub use path_index::{PathIndex, PathInsertion, Target, resolve};
pub use pipeline::{
    ExportError, ExportOptions, ExportOutput, LinkStats, default_title, export_archive,
    export_source, inspect_source, render_export,
};
pub use template::{DEFAULT_DOCUMENT_TEMPLATE, DocumentError, RenderOptions, render_document};
pub use theme::{THEME_DARK, THEME_DEFAULT, get_theme_css};
