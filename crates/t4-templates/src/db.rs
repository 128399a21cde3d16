//! Template-specific database trait and queries.
//!
//! Analysis is a pair of Salsa tracked functions over a [`SourceBuffer`]:
//! [`parse_template`] scans and parses, [`analyze_template`] adds schema
//! validation. Both re-run in full whenever the buffer changes and are served
//! from the memo otherwise.

use std::sync::Arc;

use t4_source::SourceBuffer;

use crate::ParsedTemplate;
use crate::Parser;
use crate::Template;
use crate::TemplateError;

/// Template-specific database trait extending the source database
#[salsa::db]
pub trait Db: t4_source::Db {}

/// The result of one full analysis pass over a template.
///
/// A new analysis is produced for every buffer change and replaces the
/// previous one; analyses are never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateAnalysis {
    revision: u64,
    parsed: Arc<ParsedTemplate>,
    errors: Vec<TemplateError>,
}

impl TemplateAnalysis {
    /// Analyze `parsed`, appending schema violations to its syntax errors.
    #[must_use]
    pub fn new(revision: u64, parsed: Arc<ParsedTemplate>) -> Self {
        let mut errors = parsed.errors().to_vec();
        errors.extend(parsed.template().validate());
        Self {
            revision,
            parsed,
            errors,
        }
    }

    /// Revision of the buffer this analysis was computed from.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The syntax tree. A root exists even for empty or garbled input.
    #[must_use]
    pub fn template(&self) -> &Template {
        self.parsed.template()
    }

    /// Syntax errors followed by schema violations.
    #[must_use]
    pub fn errors(&self) -> &[TemplateError] {
        &self.errors
    }

    #[must_use]
    pub fn syntax_errors(&self) -> &[TemplateError] {
        self.parsed.errors()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse the buffer's current text.
#[salsa::tracked]
pub fn parse_template(db: &dyn Db, buffer: SourceBuffer) -> Arc<ParsedTemplate> {
    Arc::new(Parser::new(buffer.text(db)).parse())
}

/// Parse and validate the buffer's current text.
#[salsa::tracked]
pub fn analyze_template(db: &dyn Db, buffer: SourceBuffer) -> Arc<TemplateAnalysis> {
    let revision = buffer.revision(db);
    let analysis = TemplateAnalysis::new(revision, parse_template(db, buffer));

    tracing::debug!(
        revision,
        syntax_errors = analysis.syntax_errors().len(),
        errors = analysis.errors().len(),
        "analyzed template"
    );

    Arc::new(analysis)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use salsa::Setter;

    use super::*;

    #[salsa::db]
    #[derive(Clone)]
    struct TestDatabase {
        storage: salsa::Storage<Self>,
        executions: Arc<Mutex<Vec<String>>>,
    }

    impl TestDatabase {
        fn new() -> Self {
            let executions = Arc::new(Mutex::new(Vec::new()));
            Self {
                storage: salsa::Storage::new(Some(Box::new({
                    let executions = executions.clone();
                    move |event| {
                        if let salsa::EventKind::WillExecute { .. } = event.kind {
                            executions.lock().unwrap().push(format!("{event:?}"));
                        }
                    }
                }))),
                executions,
            }
        }

        fn take_executions(&self) -> Vec<String> {
            std::mem::take(&mut *self.executions.lock().unwrap())
        }
    }

    #[salsa::db]
    impl salsa::Database for TestDatabase {}

    #[salsa::db]
    impl t4_source::Db for TestDatabase {}

    #[salsa::db]
    impl Db for TestDatabase {}

    #[test]
    fn test_analysis_combines_syntax_and_schema_errors() {
        let db = TestDatabase::new();
        let buffer = SourceBuffer::new(&db, r#"<#@ template bad="puppy" #><# x"#.to_string(), 0);

        let analysis = analyze_template(&db, buffer);
        let messages: Vec<String> = analysis
            .errors()
            .iter()
            .map(TemplateError::message)
            .collect();
        assert_eq!(messages, vec!["#> expected", "Unexpected bad attribute"]);
        assert_eq!(analysis.syntax_errors().len(), 1);
        assert_eq!(analysis.template().children().len(), 2);
    }

    #[test]
    fn test_repeated_reads_are_memoized() {
        let db = TestDatabase::new();
        let buffer = SourceBuffer::new(&db, "<#= 1 #>".to_string(), 0);

        let first = analyze_template(&db, buffer);
        assert!(!db.take_executions().is_empty());

        let second = analyze_template(&db, buffer);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(db.take_executions().is_empty());
    }

    #[test]
    fn test_change_reanalyzes() {
        let mut db = TestDatabase::new();
        let buffer = SourceBuffer::new(&db, "<#= 1 #>".to_string(), 0);
        let first = analyze_template(&db, buffer);
        assert!(!first.has_errors());

        buffer.set_text(&mut db).to("<#= 1".to_string());
        buffer.set_revision(&mut db).to(1);

        let second = analyze_template(&db, buffer);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.revision(), 1);
        assert_eq!(second.errors().len(), 1);
        assert_eq!(second.errors()[0].message(), "#> expected");
    }
}
