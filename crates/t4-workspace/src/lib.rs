//! Host-side state for open templates.
//!
//! A [`Workspace`] owns the Salsa [`Database`], every open [`TextDocument`]
//! and, per document, a [`TemplateAnalyzer`] whose analysis is recomputed
//! after each edit and pushed to registered handlers.

mod analyzer;
pub mod db;
mod document;
mod walk;
mod workspace;

pub use analyzer::TemplateAnalyzer;
pub use db::Database;
pub use document::DocumentError;
pub use document::TextDocument;
pub use document::TextEdit;
pub use document::TrackingSpan;
pub use walk::is_template_file;
pub use walk::walk_template_files;
pub use walk::WalkOptions;
pub use walk::TEMPLATE_EXTENSIONS;
pub use workspace::Workspace;
pub use workspace::WorkspaceError;
