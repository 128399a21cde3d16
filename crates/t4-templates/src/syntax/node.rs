use t4_source::Position;
use t4_source::Span;

use super::Attribute;
use super::CaptureNode;
use super::Code;
use super::CodeBlock;
use super::Directive;
use super::SyntaxKind;
use super::SyntaxToken;
use super::Template;
use crate::validation::validate_directive;
use crate::TemplateError;
use crate::Visitor;

/// A borrowed view of any node in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxNode<'t> {
    Template(&'t Template),
    CodeBlock(&'t CodeBlock),
    Directive(&'t Directive),
    Attribute(&'t Attribute),
    Capture(&'t CaptureNode),
    Code(&'t Code),
    Token(&'t SyntaxToken),
}

impl<'t> SyntaxNode<'t> {
    #[must_use]
    pub fn kind(self) -> SyntaxKind {
        match self {
            SyntaxNode::Template(_) => SyntaxKind::Template,
            SyntaxNode::CodeBlock(_) => SyntaxKind::CodeBlock,
            SyntaxNode::Directive(directive) => directive.syntax_kind(),
            SyntaxNode::Attribute(_) => SyntaxKind::Attribute,
            SyntaxNode::Capture(capture) => capture.kind(),
            SyntaxNode::Code(_) => SyntaxKind::Code,
            SyntaxNode::Token(token) => token.kind(),
        }
    }

    #[must_use]
    pub fn span(self) -> Span {
        match self {
            SyntaxNode::Template(template) => template.span(),
            SyntaxNode::CodeBlock(block) => block.span(),
            SyntaxNode::Directive(directive) => directive.span(),
            SyntaxNode::Attribute(attribute) => attribute.span(),
            SyntaxNode::Capture(capture) => capture.span(),
            SyntaxNode::Code(code) => code.span(),
            SyntaxNode::Token(token) => token.span(),
        }
    }

    /// Position of the first token of this node.
    #[must_use]
    pub fn position(self) -> Position {
        match self {
            SyntaxNode::Template(template) => template.position(),
            SyntaxNode::CodeBlock(block) => block.position(),
            SyntaxNode::Directive(directive) => directive.position(),
            SyntaxNode::Attribute(attribute) => attribute.position(),
            SyntaxNode::Capture(capture) => capture.position(),
            SyntaxNode::Code(code) => code.position(),
            SyntaxNode::Token(token) => token.position(),
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SyntaxNode::Capture(_) | SyntaxNode::Code(_) | SyntaxNode::Token(_)
        )
    }

    /// Immediate children in source order. Terminal nodes have none.
    #[must_use]
    pub fn child_nodes(self) -> std::vec::IntoIter<SyntaxNode<'t>> {
        let children: Vec<SyntaxNode<'t>> = match self {
            SyntaxNode::Template(template) => template
                .children()
                .iter()
                .map(super::TemplateChild::as_node)
                .collect(),
            SyntaxNode::CodeBlock(block) => [
                Some(SyntaxNode::Token(block.start())),
                block.code().map(SyntaxNode::Code),
                block.end().map(SyntaxNode::Token),
            ]
            .into_iter()
            .flatten()
            .collect(),
            SyntaxNode::Directive(directive) => {
                let mut children = vec![
                    SyntaxNode::Token(directive.start()),
                    SyntaxNode::Capture(directive.name_node()),
                ];
                children.extend(directive.attributes().iter().map(SyntaxNode::Attribute));
                children.extend(directive.end().map(SyntaxNode::Token));
                children
            }
            SyntaxNode::Attribute(attribute) => [
                Some(SyntaxNode::Capture(attribute.name_node())),
                attribute.equals().map(SyntaxNode::Token),
                attribute.open_quote().map(SyntaxNode::Token),
                attribute.value_node().map(SyntaxNode::Capture),
                attribute.close_quote().map(SyntaxNode::Token),
            ]
            .into_iter()
            .flatten()
            .collect(),
            SyntaxNode::Capture(_) | SyntaxNode::Code(_) | SyntaxNode::Token(_) => Vec::new(),
        };
        children.into_iter()
    }

    /// Dispatch to the visitor method for this node's concrete kind.
    pub fn accept<V: Visitor<'t> + ?Sized>(self, visitor: &mut V) {
        match self {
            SyntaxNode::Template(template) => visitor.visit_template(template),
            SyntaxNode::CodeBlock(block) => visitor.visit_code_block(block),
            SyntaxNode::Attribute(attribute) => visitor.visit_attribute(attribute),
            SyntaxNode::Code(code) => visitor.visit_code(code),
            SyntaxNode::Directive(directive) => match directive.syntax_kind() {
                SyntaxKind::AssemblyDirective => visitor.visit_assembly_directive(directive),
                SyntaxKind::ImportDirective => visitor.visit_import_directive(directive),
                SyntaxKind::IncludeDirective => visitor.visit_include_directive(directive),
                SyntaxKind::OutputDirective => visitor.visit_output_directive(directive),
                SyntaxKind::ParameterDirective => visitor.visit_parameter_directive(directive),
                SyntaxKind::TemplateDirective => visitor.visit_template_directive(directive),
                _ => visitor.visit_custom_directive(directive),
            },
            SyntaxNode::Capture(capture) => match capture.kind() {
                SyntaxKind::DirectiveName => visitor.visit_directive_name(capture),
                SyntaxKind::AttributeName => visitor.visit_attribute_name(capture),
                _ => visitor.visit_attribute_value(capture),
            },
            SyntaxNode::Token(token) => match token.kind() {
                SyntaxKind::StatementBlockStart => visitor.visit_statement_block_start(token),
                SyntaxKind::ExpressionBlockStart => visitor.visit_expression_block_start(token),
                SyntaxKind::ClassBlockStart => visitor.visit_class_block_start(token),
                SyntaxKind::DirectiveBlockStart => visitor.visit_directive_block_start(token),
                SyntaxKind::BlockEnd => visitor.visit_block_end(token),
                SyntaxKind::Equals => visitor.visit_equals(token),
                SyntaxKind::DoubleQuote => visitor.visit_double_quote(token),
                _ => visitor.visit_end_of_file(token),
            },
        }
    }

    /// Schema violations of this node alone. Children are not visited.
    pub fn validate(self) -> impl Iterator<Item = TemplateError> + 't {
        let directive = match self {
            SyntaxNode::Directive(directive) => Some(directive),
            _ => None,
        };
        directive.into_iter().flat_map(validate_directive)
    }

    /// This node followed by all of its descendants, depth first.
    #[must_use]
    pub fn descendants(self) -> Vec<SyntaxNode<'t>> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.child_nodes().rev());
        }
        nodes
    }
}

impl<'t> From<&'t Template> for SyntaxNode<'t> {
    fn from(template: &'t Template) -> Self {
        SyntaxNode::Template(template)
    }
}

impl<'t> From<&'t Directive> for SyntaxNode<'t> {
    fn from(directive: &'t Directive) -> Self {
        SyntaxNode::Directive(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_child_nodes_in_source_order() {
        let parsed = parse(r#"<#@ template language="C#" #><#= x #>"#);
        let template = parsed.template();
        let kinds: Vec<SyntaxKind> = template
            .as_node()
            .child_nodes()
            .map(SyntaxNode::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::TemplateDirective, SyntaxKind::CodeBlock]
        );
    }

    #[test]
    fn test_directive_children() {
        let parsed = parse(r#"<#@ template language="C#" #>"#);
        let directive = parsed.template().directives().next().unwrap();
        let kinds: Vec<SyntaxKind> = SyntaxNode::Directive(directive)
            .child_nodes()
            .map(SyntaxNode::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::DirectiveBlockStart,
                SyntaxKind::DirectiveName,
                SyntaxKind::Attribute,
                SyntaxKind::BlockEnd,
            ]
        );
    }

    #[test]
    fn test_descendants_depth_first() {
        let parsed = parse(r#"<#@ import namespace="System" #>"#);
        let kinds: Vec<SyntaxKind> = parsed
            .template()
            .as_node()
            .descendants()
            .into_iter()
            .map(SyntaxNode::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Template,
                SyntaxKind::ImportDirective,
                SyntaxKind::DirectiveBlockStart,
                SyntaxKind::DirectiveName,
                SyntaxKind::Attribute,
                SyntaxKind::AttributeName,
                SyntaxKind::Equals,
                SyntaxKind::DoubleQuote,
                SyntaxKind::AttributeValue,
                SyntaxKind::DoubleQuote,
                SyntaxKind::BlockEnd,
            ]
        );
    }

    #[test]
    fn test_spans_contain_children() {
        let parsed = parse("<#@ output extension=\".txt\" #>\n<# for (;;) { #>\n<#+ int x; #>");
        for node in parsed.template().as_node().descendants() {
            for child in node.child_nodes() {
                assert!(
                    node.span().contains_span(child.span()),
                    "{:?} does not contain {:?}",
                    node.kind(),
                    child.kind()
                );
            }
        }
    }

    #[test]
    fn test_position_is_first_terminal() {
        let parsed = parse("text\n  <#= value #>");
        for node in parsed.template().as_node().descendants() {
            let first_terminal = node
                .descendants()
                .into_iter()
                .find(|descendant| descendant.is_terminal());
            if let Some(terminal) = first_terminal {
                assert_eq!(node.position(), terminal.position());
            }
        }
    }

    #[test]
    fn test_terminals_have_no_children_or_errors() {
        let parsed = parse(r#"<#@ template bad="puppy" #>"#);
        for node in parsed.template().as_node().descendants() {
            if node.is_terminal() {
                assert_eq!(node.child_nodes().len(), 0);
                assert_eq!(node.validate().count(), 0);
            }
        }
    }

    #[test]
    fn test_validate_is_not_recursive() {
        let parsed = parse(r#"<#@ template bad="puppy" #>"#);
        let template = parsed.template();
        assert_eq!(template.as_node().validate().count(), 0);

        let directive = template.directives().next().unwrap();
        assert_eq!(SyntaxNode::Directive(directive).validate().count(), 1);
    }
}
