//! Immutable syntax tree produced by the [`Parser`](crate::Parser).
//!
//! Node payloads are plain structs owned by their parent. [`SyntaxNode`] is a
//! borrowed, copyable view over any of them and is what generic consumers
//! (the [`Visitor`](crate::Visitor), validation, hover lookups) work with.

mod directive;
mod node;
mod tree;

use serde::Serialize;

pub use directive::AssemblyDirective;
pub use directive::CustomDirective;
pub use directive::Directive;
pub use directive::DirectiveKind;
pub use directive::ImportDirective;
pub use directive::IncludeDirective;
pub use directive::OutputDirective;
pub use directive::ParameterDirective;
pub use directive::QuickInfo;
pub use directive::TemplateDirective;
pub use directive::TypedDirective;
pub use node::SyntaxNode;
pub use tree::Attribute;
pub use tree::CaptureNode;
pub use tree::Code;
pub use tree::CodeBlock;
pub use tree::SyntaxToken;
pub use tree::Template;
pub use tree::TemplateChild;

/// Discriminant of every concrete node in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Template,
    CodeBlock,
    Code,
    Attribute,
    AttributeName,
    AttributeValue,
    DirectiveName,
    AssemblyDirective,
    ImportDirective,
    IncludeDirective,
    OutputDirective,
    ParameterDirective,
    TemplateDirective,
    CustomDirective,
    StatementBlockStart,
    ExpressionBlockStart,
    ClassBlockStart,
    DirectiveBlockStart,
    BlockEnd,
    Equals,
    DoubleQuote,
    EndOfFile,
}

impl SyntaxKind {
    #[must_use]
    pub fn is_directive(self) -> bool {
        matches!(
            self,
            SyntaxKind::AssemblyDirective
                | SyntaxKind::ImportDirective
                | SyntaxKind::IncludeDirective
                | SyntaxKind::OutputDirective
                | SyntaxKind::ParameterDirective
                | SyntaxKind::TemplateDirective
                | SyntaxKind::CustomDirective
        )
    }

    #[must_use]
    pub fn is_block_start(self) -> bool {
        matches!(
            self,
            SyntaxKind::StatementBlockStart
                | SyntaxKind::ExpressionBlockStart
                | SyntaxKind::ClassBlockStart
                | SyntaxKind::DirectiveBlockStart
        )
    }

    /// Nodes that carry recognized source text.
    #[must_use]
    pub fn is_capture(self) -> bool {
        matches!(
            self,
            SyntaxKind::DirectiveName | SyntaxKind::AttributeName | SyntaxKind::AttributeValue
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            SyntaxKind::Template | SyntaxKind::CodeBlock | SyntaxKind::Attribute
        ) && !self.is_directive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(SyntaxKind::TemplateDirective.is_directive());
        assert!(!SyntaxKind::TemplateDirective.is_terminal());
        assert!(SyntaxKind::AttributeValue.is_capture());
        assert!(SyntaxKind::AttributeValue.is_terminal());
        assert!(SyntaxKind::Code.is_terminal());
        assert!(SyntaxKind::ClassBlockStart.is_block_start());
        assert!(!SyntaxKind::BlockEnd.is_block_start());
        assert!(!SyntaxKind::Attribute.is_terminal());
    }
}
