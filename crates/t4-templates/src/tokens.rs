use serde::Serialize;
use t4_source::Position;
use t4_source::Span;

use crate::syntax::SyntaxKind;

pub(crate) const STATEMENT_BLOCK_START: &str = "<#";
pub(crate) const EXPRESSION_BLOCK_START: &str = "<#=";
pub(crate) const CLASS_BLOCK_START: &str = "<#+";
pub(crate) const DIRECTIVE_BLOCK_START: &str = "<#@";
pub(crate) const BLOCK_END: &str = "#>";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    StatementBlockStart,
    ExpressionBlockStart,
    ClassBlockStart,
    DirectiveBlockStart,
    BlockEnd,
    Equals,
    DoubleQuote,
    DirectiveName,
    AttributeName,
    AttributeValue,
    Code,
    EndOfFile,
}

impl TokenKind {
    #[must_use]
    pub fn is_block_start(self) -> bool {
        matches!(
            self,
            TokenKind::StatementBlockStart
                | TokenKind::ExpressionBlockStart
                | TokenKind::ClassBlockStart
                | TokenKind::DirectiveBlockStart
        )
    }

    /// The node kind a token of this kind becomes in the syntax tree.
    #[must_use]
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::StatementBlockStart => SyntaxKind::StatementBlockStart,
            TokenKind::ExpressionBlockStart => SyntaxKind::ExpressionBlockStart,
            TokenKind::ClassBlockStart => SyntaxKind::ClassBlockStart,
            TokenKind::DirectiveBlockStart => SyntaxKind::DirectiveBlockStart,
            TokenKind::BlockEnd => SyntaxKind::BlockEnd,
            TokenKind::Equals => SyntaxKind::Equals,
            TokenKind::DoubleQuote => SyntaxKind::DoubleQuote,
            TokenKind::DirectiveName => SyntaxKind::DirectiveName,
            TokenKind::AttributeName => SyntaxKind::AttributeName,
            TokenKind::AttributeValue => SyntaxKind::AttributeValue,
            TokenKind::Code => SyntaxKind::Code,
            TokenKind::EndOfFile => SyntaxKind::EndOfFile,
        }
    }
}

/// A scanned token borrowing its text from the template source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    kind: TokenKind,
    text: &'src str,
    span: Span,
    position: Position,
}

impl<'src> Token<'src> {
    #[must_use]
    pub fn new(kind: TokenKind, text: &'src str, span: Span, position: Position) -> Self {
        Self {
            kind,
            text,
            span,
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &'src str {
        self.text
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
