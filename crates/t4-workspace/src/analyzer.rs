use std::fmt;
use std::sync::Arc;

use salsa::Setter;
use t4_source::SourceBuffer;
use t4_templates::analyze_template;
use t4_templates::TemplateAnalysis;

use crate::db::Database;

type TemplateChangedHandler = Box<dyn FnMut(&Arc<TemplateAnalysis>)>;

/// The analysis cache of one open template.
///
/// Holds the [`SourceBuffer`] input mirroring the document text. Reads go
/// through the memoized [`analyze_template`] query, so an analysis is computed
/// at most once per buffer revision and shared as the same `Arc` until the
/// next change.
pub struct TemplateAnalyzer {
    buffer: SourceBuffer,
    handlers: Vec<TemplateChangedHandler>,
}

impl TemplateAnalyzer {
    pub(crate) fn new(db: &Database, text: &str) -> Self {
        Self {
            buffer: SourceBuffer::new(db, text.to_string(), 0),
            handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> SourceBuffer {
        self.buffer
    }

    /// Revision of the buffer text the next analysis will be computed from.
    #[must_use]
    pub fn revision(&self, db: &Database) -> u64 {
        self.buffer.revision(db)
    }

    /// The analysis of the current text, computed on first request.
    #[must_use]
    pub fn current_analysis(&self, db: &Database) -> Arc<TemplateAnalysis> {
        analyze_template(db, self.buffer)
    }

    /// Register a handler called with the new analysis after every change.
    pub fn on_template_changed(&mut self, handler: impl FnMut(&Arc<TemplateAnalysis>) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Mirror new buffer text, reanalyze and notify handlers once.
    ///
    /// Text equal to the current buffer is not a change: the revision stays
    /// and handlers are not called.
    pub(crate) fn buffer_changed(
        &mut self,
        db: &mut Database,
        text: &str,
    ) -> Arc<TemplateAnalysis> {
        if self.buffer.text(db) == text {
            return self.current_analysis(db);
        }

        let revision = self.buffer.revision(db) + 1;
        self.buffer.set_text(db).to(text.to_string());
        self.buffer.set_revision(db).to(revision);

        tracing::debug!(revision, "template buffer changed");

        let analysis = self.current_analysis(db);
        for handler in &mut self.handlers {
            handler(&analysis);
        }
        analysis
    }
}

impl fmt::Debug for TemplateAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateAnalyzer")
            .field("buffer", &self.buffer)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_handlers_see_each_change_once() {
        let mut db = Database::new();
        let mut analyzer = TemplateAnalyzer::new(&db, "<#= 1 #>");
        let seen = Rc::new(RefCell::new(Vec::new()));

        analyzer.on_template_changed({
            let seen = seen.clone();
            move |analysis| seen.borrow_mut().push(analysis.revision())
        });

        analyzer.buffer_changed(&mut db, "<#= 2 #>");
        analyzer.buffer_changed(&mut db, "<#= 3");

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(analyzer.revision(&db), 2);
        assert!(analyzer.current_analysis(&db).has_errors());

        let debug = format!("{analyzer:?}");
        assert!(debug.contains("SourceBuffer"), "{debug}");
        assert!(debug.contains("handlers: 1"), "{debug}");
    }

    #[test]
    fn test_identical_text_is_not_a_change() {
        let mut db = Database::new();
        let mut analyzer = TemplateAnalyzer::new(&db, "<#= 1 #>");
        let calls = Rc::new(RefCell::new(0));

        analyzer.on_template_changed({
            let calls = calls.clone();
            move |_| *calls.borrow_mut() += 1
        });

        let before = analyzer.current_analysis(&db);
        let after = analyzer.buffer_changed(&mut db, "<#= 1 #>");

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(analyzer.revision(&db), 0);
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_initial_analysis_is_lazy_and_shared() {
        let db = Database::new();
        let analyzer = TemplateAnalyzer::new(&db, "<#@ import namespace=\"System\" #>");

        let first = analyzer.current_analysis(&db);
        let second = analyzer.current_analysis(&db);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.revision(), 0);
        assert_eq!(first.template().directives().count(), 1);
    }
}
