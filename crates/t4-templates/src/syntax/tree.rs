use serde::Serialize;
use t4_source::Position;
use t4_source::Span;

use super::Directive;
use super::QuickInfo;
use super::SyntaxKind;
use super::SyntaxNode;
use crate::tokens::Token;
use crate::TemplateError;

/// A fixed-text delimiter: a block start, `#>`, `=`, `"` or end of file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    span: Span,
    position: Position,
}

impl SyntaxToken {
    pub(crate) fn from_token(token: Token<'_>) -> Self {
        Self {
            kind: token.kind().syntax_kind(),
            span: token.span(),
            position: token.position(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// A terminal whose text matters: a directive name, attribute name or
/// attribute value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaptureNode {
    kind: SyntaxKind,
    text: String,
    span: Span,
    position: Position,
}

impl CaptureNode {
    pub(crate) fn from_token(token: Token<'_>) -> Self {
        Self {
            kind: token.kind().syntax_kind(),
            text: token.text().to_string(),
            span: token.span(),
            position: token.position(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Raw host-language code inside a block. Only the span is kept; the code
/// itself is never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Code {
    span: Span,
    position: Position,
}

impl Code {
    pub(crate) fn from_token(token: Token<'_>) -> Self {
        Self {
            span: token.span(),
            position: token.position(),
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Slice the code out of the template text it was parsed from.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.span.start_usize()..self.span.end_usize())
            .unwrap_or_default()
    }
}

/// A statement (`<# #>`), expression (`<#= #>`) or class feature (`<#+ #>`)
/// block.
///
/// `end` is `None` when the block was not terminated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    start: SyntaxToken,
    code: Option<Code>,
    end: Option<SyntaxToken>,
    span: Span,
}

impl CodeBlock {
    pub(crate) fn new(start: SyntaxToken, code: Option<Code>, end: Option<SyntaxToken>) -> Self {
        let mut span = start.span();
        if let Some(code) = &code {
            span = span.cover(code.span());
        }
        if let Some(end) = &end {
            span = span.cover(end.span());
        }
        Self {
            start,
            code,
            end,
            span,
        }
    }

    #[must_use]
    pub fn start(&self) -> &SyntaxToken {
        &self.start
    }

    #[must_use]
    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    #[must_use]
    pub fn end(&self) -> Option<&SyntaxToken> {
        self.end.as_ref()
    }

    /// The kind of the opening delimiter.
    #[must_use]
    pub fn block_kind(&self) -> SyntaxKind {
        self.start.kind()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.start.position()
    }
}

/// `name="value"` inside a directive.
///
/// Only the name is guaranteed; the remaining parts are missing when the
/// attribute was truncated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attribute {
    name: CaptureNode,
    equals: Option<SyntaxToken>,
    open_quote: Option<SyntaxToken>,
    value: Option<CaptureNode>,
    close_quote: Option<SyntaxToken>,
    span: Span,
}

impl Attribute {
    pub(crate) fn new(
        name: CaptureNode,
        equals: Option<SyntaxToken>,
        open_quote: Option<SyntaxToken>,
        value: Option<CaptureNode>,
        close_quote: Option<SyntaxToken>,
    ) -> Self {
        let span = [
            equals.map(|token| token.span()),
            open_quote.map(|token| token.span()),
            value.as_ref().map(CaptureNode::span),
            close_quote.map(|token| token.span()),
        ]
        .into_iter()
        .flatten()
        .fold(name.span(), Span::cover);

        Self {
            name,
            equals,
            open_quote,
            value,
            close_quote,
            span,
        }
    }

    /// The attribute name as written in the source.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.text()
    }

    /// The attribute value, or an empty string when it is missing.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_ref().map_or("", CaptureNode::text)
    }

    #[must_use]
    pub fn name_node(&self) -> &CaptureNode {
        &self.name
    }

    #[must_use]
    pub fn equals(&self) -> Option<&SyntaxToken> {
        self.equals.as_ref()
    }

    #[must_use]
    pub fn open_quote(&self) -> Option<&SyntaxToken> {
        self.open_quote.as_ref()
    }

    #[must_use]
    pub fn value_node(&self) -> Option<&CaptureNode> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn close_quote(&self) -> Option<&SyntaxToken> {
        self.close_quote.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.close_quote.is_some()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.name.position()
    }
}

/// A top-level construct of a template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TemplateChild {
    Directive(Directive),
    CodeBlock(CodeBlock),
}

impl TemplateChild {
    #[must_use]
    pub fn as_node(&self) -> SyntaxNode<'_> {
        match self {
            TemplateChild::Directive(directive) => SyntaxNode::Directive(directive),
            TemplateChild::CodeBlock(block) => SyntaxNode::CodeBlock(block),
        }
    }

    #[must_use]
    pub fn as_directive(&self) -> Option<&Directive> {
        match self {
            TemplateChild::Directive(directive) => Some(directive),
            TemplateChild::CodeBlock(_) => None,
        }
    }

    #[must_use]
    pub fn as_code_block(&self) -> Option<&CodeBlock> {
        match self {
            TemplateChild::CodeBlock(block) => Some(block),
            TemplateChild::Directive(_) => None,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.as_node().span()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.as_node().position()
    }
}

/// Root of the syntax tree.
///
/// The root always exists, even for empty or garbled input. Its span runs from
/// the first child to the end of the text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Template {
    children: Vec<TemplateChild>,
    end_of_file: SyntaxToken,
    span: Span,
}

impl Template {
    pub(crate) fn new(children: Vec<TemplateChild>, end_of_file: SyntaxToken) -> Self {
        let span = children.first().map_or(end_of_file.span(), |first| {
            first.span().until(end_of_file.span())
        });
        Self {
            children,
            end_of_file,
            span,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[TemplateChild] {
        &self.children
    }

    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.children.iter().filter_map(TemplateChild::as_directive)
    }

    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.children.iter().filter_map(TemplateChild::as_code_block)
    }

    #[must_use]
    pub fn end_of_file(&self) -> &SyntaxToken {
        &self.end_of_file
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.children
            .first()
            .map_or(self.end_of_file.position(), TemplateChild::position)
    }

    #[must_use]
    pub fn as_node(&self) -> SyntaxNode<'_> {
        SyntaxNode::Template(self)
    }

    /// Schema violations of every complete directive, in source order.
    #[must_use]
    pub fn validate(&self) -> Vec<TemplateError> {
        crate::validation::validate_template(self)
    }

    /// Description of the directive under `offset`, if any.
    #[must_use]
    pub fn description_at(&self, offset: u32) -> Option<QuickInfo> {
        let info = self
            .directives()
            .find(|directive| directive.span().contains(offset))
            .and_then(|directive| directive.description_at(offset));
        tracing::trace!(offset, found = info.is_some(), "description lookup");
        info
    }
}
