use crate::syntax::Attribute;
use crate::syntax::CaptureNode;
use crate::syntax::Code;
use crate::syntax::CodeBlock;
use crate::syntax::Directive;
use crate::syntax::SyntaxNode;
use crate::syntax::SyntaxToken;
use crate::syntax::Template;

/// Walks a template syntax tree.
///
/// Every concrete node kind has its own method. By default each one forwards
/// to the method for its category, so an implementation can override only
/// what it cares about:
///
/// - concrete directives go to [`visit_directive`](Visitor::visit_directive)
/// - directive names, attribute names and values go to
///   [`visit_capture_node`](Visitor::visit_capture_node)
/// - the four block starts go to [`visit_block_start`](Visitor::visit_block_start),
///   and every fixed-text token then goes to
///   [`visit_syntax_token`](Visitor::visit_syntax_token)
/// - terminals end in [`visit_terminal_node`](Visitor::visit_terminal_node),
///   everything else in [`visit_nonterminal_node`](Visitor::visit_nonterminal_node)
///
/// Both end in [`visit_syntax_node`](Visitor::visit_syntax_node), which visits
/// children in source order, so the default implementation reaches every node.
pub trait Visitor<'t> {
    fn visit_template(&mut self, node: &'t Template) {
        self.visit_nonterminal_node(SyntaxNode::Template(node));
    }

    fn visit_code_block(&mut self, node: &'t CodeBlock) {
        self.visit_nonterminal_node(SyntaxNode::CodeBlock(node));
    }

    fn visit_attribute(&mut self, node: &'t Attribute) {
        self.visit_nonterminal_node(SyntaxNode::Attribute(node));
    }

    fn visit_assembly_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_import_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_include_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_output_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_parameter_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_template_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_custom_directive(&mut self, node: &'t Directive) {
        self.visit_directive(node);
    }

    fn visit_directive(&mut self, node: &'t Directive) {
        self.visit_nonterminal_node(SyntaxNode::Directive(node));
    }

    fn visit_directive_name(&mut self, node: &'t CaptureNode) {
        self.visit_capture_node(node);
    }

    fn visit_attribute_name(&mut self, node: &'t CaptureNode) {
        self.visit_capture_node(node);
    }

    fn visit_attribute_value(&mut self, node: &'t CaptureNode) {
        self.visit_capture_node(node);
    }

    fn visit_capture_node(&mut self, node: &'t CaptureNode) {
        self.visit_terminal_node(SyntaxNode::Capture(node));
    }

    fn visit_code(&mut self, node: &'t Code) {
        self.visit_terminal_node(SyntaxNode::Code(node));
    }

    fn visit_statement_block_start(&mut self, node: &'t SyntaxToken) {
        self.visit_block_start(node);
    }

    fn visit_expression_block_start(&mut self, node: &'t SyntaxToken) {
        self.visit_block_start(node);
    }

    fn visit_class_block_start(&mut self, node: &'t SyntaxToken) {
        self.visit_block_start(node);
    }

    fn visit_directive_block_start(&mut self, node: &'t SyntaxToken) {
        self.visit_block_start(node);
    }

    fn visit_block_start(&mut self, node: &'t SyntaxToken) {
        self.visit_syntax_token(node);
    }

    fn visit_block_end(&mut self, node: &'t SyntaxToken) {
        self.visit_syntax_token(node);
    }

    fn visit_equals(&mut self, node: &'t SyntaxToken) {
        self.visit_syntax_token(node);
    }

    fn visit_double_quote(&mut self, node: &'t SyntaxToken) {
        self.visit_syntax_token(node);
    }

    fn visit_end_of_file(&mut self, node: &'t SyntaxToken) {
        self.visit_syntax_token(node);
    }

    fn visit_syntax_token(&mut self, node: &'t SyntaxToken) {
        self.visit_terminal_node(SyntaxNode::Token(node));
    }

    fn visit_terminal_node(&mut self, node: SyntaxNode<'t>) {
        self.visit_syntax_node(node);
    }

    fn visit_nonterminal_node(&mut self, node: SyntaxNode<'t>) {
        self.visit_syntax_node(node);
    }

    fn visit_syntax_node(&mut self, node: SyntaxNode<'t>) {
        walk_children(self, node);
    }
}

/// Visit the children of `node` in source order.
pub fn walk_children<'t, V: Visitor<'t> + ?Sized>(visitor: &mut V, node: SyntaxNode<'t>) {
    for child in node.child_nodes() {
        child.accept(visitor);
    }
}
