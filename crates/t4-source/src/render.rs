use annotate_snippets::AnnotationKind;
use annotate_snippets::Level;
use annotate_snippets::Renderer;
use annotate_snippets::Snippet;

use crate::Span;

/// Label printed in front of a rendered diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// A template diagnostic ready for rendering against its source text.
#[derive(Debug)]
pub struct Diagnostic<'a> {
    pub source: &'a str,
    pub path: &'a str,
    pub code: &'a str,
    pub message: &'a str,
    pub severity: Severity,
    pub span: Span,
}

impl<'a> Diagnostic<'a> {
    #[must_use]
    pub fn new(
        source: &'a str,
        path: &'a str,
        code: &'a str,
        message: &'a str,
        severity: Severity,
        span: Span,
    ) -> Self {
        Self {
            source,
            path,
            code,
            message,
            severity,
            span,
        }
    }
}

/// Renders diagnostics as source snippets using `annotate-snippets`.
///
/// - **Plain**: no ANSI colors, for tests and piped output
/// - **Styled**: ANSI colors, for terminals
#[derive(Debug)]
pub struct DiagnosticRenderer {
    renderer: Renderer,
}

impl DiagnosticRenderer {
    #[must_use]
    pub fn plain() -> Self {
        Self {
            renderer: Renderer::plain(),
        }
    }

    #[must_use]
    pub fn styled() -> Self {
        Self {
            renderer: Renderer::styled(),
        }
    }

    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic<'_>) -> String {
        let level = match diagnostic.severity {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
            Severity::Info => Level::INFO,
            Severity::Hint => Level::HELP,
        };

        // Zero-length spans at the very end still need a column to point at.
        let start = diagnostic.span.start_usize().min(diagnostic.source.len());
        let end = diagnostic.span.end_usize().min(diagnostic.source.len());

        let snippet = Snippet::source(diagnostic.source)
            .path(diagnostic.path)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..end));

        let title = level
            .primary_title(diagnostic.message)
            .id(diagnostic.code)
            .element(snippet);

        let report = &[title];
        self.renderer.render(report)
    }
}
