//! Workspace facade over open documents and their analyzers.
//!
//! [`Workspace`] owns the [`Database`] together with every open
//! [`TextDocument`]. Each document gets at most one [`TemplateAnalyzer`],
//! created on first request and dropped when the document closes.

use std::sync::Arc;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use rustc_hash::FxHashMap;
use t4_templates::TemplateAnalysis;

use crate::analyzer::TemplateAnalyzer;
use crate::db::Database;
use crate::document::DocumentError;
use crate::document::TextDocument;
use crate::document::TextEdit;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("document is not open: {0}")]
    DocumentNotOpen(Utf8PathBuf),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug)]
struct OpenDocument {
    document: TextDocument,
    analyzer: Option<TemplateAnalyzer>,
}

#[derive(Default)]
pub struct Workspace {
    db: Database,
    documents: FxHashMap<Utf8PathBuf, OpenDocument>,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A workspace over an existing database, e.g. one observing Salsa events.
    #[must_use]
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            documents: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Open a document, replacing any previous document at `path`.
    pub fn open(&mut self, path: impl Into<Utf8PathBuf>, document: TextDocument) {
        let path = path.into();
        tracing::debug!(%path, version = document.version(), "opened document");
        self.documents.insert(
            path,
            OpenDocument {
                document,
                analyzer: None,
            },
        );
    }

    #[must_use]
    pub fn document(&self, path: &Utf8Path) -> Option<&TextDocument> {
        self.documents.get(path).map(|open| &open.document)
    }

    #[must_use]
    pub fn is_open(&self, path: &Utf8Path) -> bool {
        self.documents.contains_key(path)
    }

    /// The analyzer of an open document, created on first request.
    ///
    /// Returns `None` when the document is not open.
    pub fn get_or_create(&mut self, path: &Utf8Path) -> Option<&mut TemplateAnalyzer> {
        let db = &self.db;
        let OpenDocument { document, analyzer } = self.documents.get_mut(path)?;
        Some(analyzer.get_or_insert_with(|| {
            tracing::trace!(%path, "created analyzer");
            TemplateAnalyzer::new(db, document.text())
        }))
    }

    /// The analysis of an open document's current text.
    pub fn current_analysis(&mut self, path: &Utf8Path) -> Option<Arc<TemplateAnalysis>> {
        self.get_or_create(path)?;
        let analyzer = self.documents.get(path)?.analyzer.as_ref()?;
        Some(analyzer.current_analysis(&self.db))
    }

    /// Apply `edits` to an open document.
    ///
    /// When the document has an analyzer, the text is reanalyzed and its
    /// handlers are notified before the new analysis is returned.
    pub fn edit(
        &mut self,
        path: &Utf8Path,
        edits: &[TextEdit],
        version: i32,
    ) -> Result<Option<Arc<TemplateAnalysis>>, WorkspaceError> {
        let OpenDocument { document, analyzer } = self
            .documents
            .get_mut(path)
            .ok_or_else(|| WorkspaceError::DocumentNotOpen(path.to_owned()))?;
        document.apply_edits(edits, version)?;

        Ok(analyzer
            .as_mut()
            .map(|analyzer| analyzer.buffer_changed(&mut self.db, document.text())))
    }

    /// Replace the whole text of an open document.
    pub fn replace_text(
        &mut self,
        path: &Utf8Path,
        text: String,
        version: i32,
    ) -> Result<Option<Arc<TemplateAnalysis>>, WorkspaceError> {
        let OpenDocument { document, analyzer } = self
            .documents
            .get_mut(path)
            .ok_or_else(|| WorkspaceError::DocumentNotOpen(path.to_owned()))?;
        document.set_text(text, version);

        Ok(analyzer
            .as_mut()
            .map(|analyzer| analyzer.buffer_changed(&mut self.db, document.text())))
    }

    /// Close a document, dropping its analyzer and handlers.
    pub fn close(&mut self, path: &Utf8Path) -> Option<TextDocument> {
        let open = self.documents.remove(path)?;
        tracing::debug!(%path, "closed document");
        Some(open.document)
    }
}
