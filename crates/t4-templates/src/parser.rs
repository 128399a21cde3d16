use std::iter::Peekable;

use serde::Serialize;

use crate::error::TemplateErrorKind;
use crate::scanner::Scanner;
use crate::syntax::Attribute;
use crate::syntax::CaptureNode;
use crate::syntax::Code;
use crate::syntax::CodeBlock;
use crate::syntax::Directive;
use crate::syntax::SyntaxToken;
use crate::syntax::Template;
use crate::syntax::TemplateChild;
use crate::tokens::Token;
use crate::tokens::TokenKind;
use crate::TemplateError;

/// Recursive-descent parser over the [`Scanner`] token stream.
///
/// ```text
/// Template  := (Directive | CodeBlock)* EOF
/// CodeBlock := (<# | <#= | <#+) Code? #>
/// Directive := <#@ DirectiveName Attribute* #>
/// Attribute := AttributeName = " AttributeValue "
/// ```
///
/// Parsing never fails. Each malformed construct is reported once, after
/// which the parser skips ahead to the next block start.
pub struct Parser<'src> {
    tokens: Peekable<Scanner<'src>>,
    end_of_file: Token<'src>,
    errors: Vec<TemplateError>,
}

impl<'src> Parser<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let scanner = Scanner::new(source);
        let end_of_file = scanner.end_of_file();
        Self {
            tokens: scanner.peekable(),
            end_of_file,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn parse(mut self) -> ParsedTemplate {
        let mut children = Vec::new();

        loop {
            let token = self.peek();
            match token.kind() {
                TokenKind::EndOfFile => break,
                TokenKind::DirectiveBlockStart => {
                    if let Some(directive) = self.parse_directive() {
                        children.push(TemplateChild::Directive(directive));
                    }
                }
                kind if kind.is_block_start() => {
                    children.push(TemplateChild::CodeBlock(self.parse_code_block()));
                }
                _ => self.skip_unexpected(),
            }
        }

        let end_of_file = SyntaxToken::from_token(self.advance());
        ParsedTemplate {
            template: Template::new(children, end_of_file),
            errors: self.errors,
        }
    }

    fn parse_code_block(&mut self) -> CodeBlock {
        let start = SyntaxToken::from_token(self.advance());

        let token = self.peek();
        match token.kind() {
            TokenKind::BlockEnd => {
                let end = SyntaxToken::from_token(self.advance());
                CodeBlock::new(start, None, Some(end))
            }
            TokenKind::Code => {
                let code = Code::from_token(self.advance());
                let end = self.expect(TokenKind::BlockEnd, TemplateErrorKind::BlockEndExpected);
                CodeBlock::new(start, Some(code), end.map(SyntaxToken::from_token))
            }
            _ => {
                self.error_at(token, TemplateErrorKind::CodeOrBlockEndExpected);
                self.recover();
                CodeBlock::new(start, None, None)
            }
        }
    }

    fn parse_directive(&mut self) -> Option<Directive> {
        let start = SyntaxToken::from_token(self.advance());
        let name = self.expect(
            TokenKind::DirectiveName,
            TemplateErrorKind::DirectiveNameExpected,
        )?;
        let name = CaptureNode::from_token(name);

        let mut attributes = Vec::new();
        let mut end = None;
        loop {
            let token = self.peek();
            match token.kind() {
                TokenKind::AttributeName => {
                    let (attribute, complete) = self.parse_attribute();
                    attributes.push(attribute);
                    if !complete {
                        break;
                    }
                }
                TokenKind::BlockEnd => {
                    end = Some(SyntaxToken::from_token(self.advance()));
                    break;
                }
                _ => {
                    self.error_at(token, TemplateErrorKind::BlockEndOrAttributeNameExpected);
                    self.recover();
                    break;
                }
            }
        }

        Some(Directive::new(start, name, attributes, end))
    }

    /// Parse one attribute, returning whether it was complete. A truncated
    /// attribute is returned with the parts that were present.
    fn parse_attribute(&mut self) -> (Attribute, bool) {
        let name = CaptureNode::from_token(self.advance());

        let Some(equals) = self.expect(TokenKind::Equals, TemplateErrorKind::EqualsExpected) else {
            return (Attribute::new(name, None, None, None, None), false);
        };
        let equals = Some(SyntaxToken::from_token(equals));

        let Some(open_quote) = self.expect(TokenKind::DoubleQuote, TemplateErrorKind::QuoteExpected)
        else {
            return (Attribute::new(name, equals, None, None, None), false);
        };
        let open_quote = Some(SyntaxToken::from_token(open_quote));

        let Some(value) = self.expect(
            TokenKind::AttributeValue,
            TemplateErrorKind::AttributeValueExpected,
        ) else {
            return (Attribute::new(name, equals, open_quote, None, None), false);
        };
        let value = Some(CaptureNode::from_token(value));

        let close_quote = self
            .expect(TokenKind::DoubleQuote, TemplateErrorKind::QuoteExpected)
            .map(SyntaxToken::from_token);
        let complete = close_quote.is_some();

        (
            Attribute::new(name, equals, open_quote, value, close_quote),
            complete,
        )
    }

    /// Consume tokens at template level that cannot start a block, reporting
    /// them as a single error.
    fn skip_unexpected(&mut self) {
        let first = self.advance();
        let mut span = first.span();
        while !self.at_recovery_point() {
            span = span.cover(self.advance().span());
        }
        self.errors.push(TemplateError::new(
            TemplateErrorKind::BlockStartExpected,
            span,
            first.position(),
        ));
    }

    /// Consume the next token if it has the expected kind. Otherwise report
    /// `error` at the unexpected token and skip to the next block start.
    fn expect(&mut self, kind: TokenKind, error: TemplateErrorKind) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is(kind) {
            return Some(self.advance());
        }
        self.error_at(token, error);
        self.recover();
        None
    }

    fn error_at(&mut self, token: Token<'src>, kind: TemplateErrorKind) {
        self.errors
            .push(TemplateError::new(kind, token.span(), token.position()));
    }

    /// Skip to the next block start or the end of the file without consuming
    /// it.
    fn recover(&mut self) {
        while !self.at_recovery_point() {
            self.advance();
        }
    }

    fn at_recovery_point(&mut self) -> bool {
        let kind = self.peek().kind();
        kind.is_block_start() || kind == TokenKind::EndOfFile
    }

    fn peek(&mut self) -> Token<'src> {
        self.tokens.peek().copied().unwrap_or(self.end_of_file)
    }

    fn advance(&mut self) -> Token<'src> {
        self.tokens.next().unwrap_or(self.end_of_file)
    }
}

/// The tree and syntax errors of one parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedTemplate {
    template: Template,
    errors: Vec<TemplateError>,
}

impl ParsedTemplate {
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Syntax errors in source order.
    #[must_use]
    pub fn errors(&self) -> &[TemplateError] {
        &self.errors
    }

    /// Whether the template was syntactically well formed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Template, Vec<TemplateError>) {
        (self.template, self.errors)
    }
}
