use t4_source::LineIndex;
use t4_source::Span;

use crate::tokens::Token;
use crate::tokens::TokenKind;
use crate::tokens::BLOCK_END;
use crate::tokens::CLASS_BLOCK_START;
use crate::tokens::DIRECTIVE_BLOCK_START;
use crate::tokens::EXPRESSION_BLOCK_START;
use crate::tokens::STATEMENT_BLOCK_START;

const ESCAPED_QUOTE: &str = "\\\"";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Template output text between blocks; skipped.
    Text,
    /// Inside a statement, expression or class block.
    Code,
    /// Inside a directive block, between names and delimiters.
    Directive { seen_name: bool },
    /// After the opening quote of an attribute value.
    AttributeValue { value_emitted: bool },
}

/// Converts template text into a forward-only stream of [`Token`]s.
///
/// The stream always ends with exactly one [`TokenKind::EndOfFile`] token. The
/// scanner performs no interpretation beyond recognizing delimiters and never
/// fails: anything outside a block is output text and produces no tokens.
pub struct Scanner<'src> {
    source: &'src str,
    line_index: LineIndex,
    start: usize,
    current: usize,
    mode: Mode,
    finished: bool,
}

impl<'src> Scanner<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            line_index: LineIndex::from_text(source),
            start: 0,
            current: 0,
            mode: Mode::Text,
            finished: false,
        }
    }

    /// Scan the whole source eagerly.
    #[must_use]
    pub fn tokenize(self) -> Vec<Token<'src>> {
        self.collect()
    }

    fn next_token(&mut self) -> Option<Token<'src>> {
        match self.mode {
            Mode::Text => self.scan_text(),
            Mode::Code => self.scan_code(),
            Mode::Directive { seen_name } => self.scan_directive(seen_name),
            Mode::AttributeValue { value_emitted } => self.scan_attribute_value(value_emitted),
        }
    }

    fn scan_text(&mut self) -> Option<Token<'src>> {
        while !self.is_at_end() {
            if self.peek() == '\\' {
                self.skip_backslashes();
                continue;
            }
            if self.at(STATEMENT_BLOCK_START) {
                return Some(self.scan_block_start());
            }
            if self.at(BLOCK_END) {
                return Some(self.scan_block_end());
            }
            self.consume();
        }
        None
    }

    /// Skip a run of backslashes in text. An odd-length run escapes a
    /// following `<#` or `#>`; an even-length run leaves it as a delimiter.
    fn skip_backslashes(&mut self) {
        let run = self.source[self.current..]
            .bytes()
            .take_while(|&byte| byte == b'\\')
            .count();
        self.current += run;
        if run % 2 == 1 && (self.at(STATEMENT_BLOCK_START) || self.at(BLOCK_END)) {
            self.current += BLOCK_END.len();
        }
    }

    fn scan_block_start(&mut self) -> Token<'src> {
        self.start = self.current;

        let (kind, delimiter, mode) = if self.at(DIRECTIVE_BLOCK_START) {
            (
                TokenKind::DirectiveBlockStart,
                DIRECTIVE_BLOCK_START,
                Mode::Directive { seen_name: false },
            )
        } else if self.at(EXPRESSION_BLOCK_START) {
            (TokenKind::ExpressionBlockStart, EXPRESSION_BLOCK_START, Mode::Code)
        } else if self.at(CLASS_BLOCK_START) {
            (TokenKind::ClassBlockStart, CLASS_BLOCK_START, Mode::Code)
        } else {
            (TokenKind::StatementBlockStart, STATEMENT_BLOCK_START, Mode::Code)
        };

        self.current += delimiter.len();
        self.mode = mode;
        self.make_token(kind)
    }

    fn scan_block_end(&mut self) -> Token<'src> {
        self.start = self.current;
        self.current += BLOCK_END.len();
        self.mode = Mode::Text;
        self.make_token(TokenKind::BlockEnd)
    }

    fn scan_code(&mut self) -> Option<Token<'src>> {
        self.start = self.current;
        while !self.is_at_end() && !self.at(BLOCK_END) && !self.at(STATEMENT_BLOCK_START) {
            self.consume();
        }

        if self.current > self.start {
            return Some(self.make_token(TokenKind::Code));
        }
        if self.at(BLOCK_END) {
            return Some(self.scan_block_end());
        }
        if self.at(STATEMENT_BLOCK_START) {
            return Some(self.scan_block_start());
        }
        None
    }

    fn scan_directive(&mut self, seen_name: bool) -> Option<Token<'src>> {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.consume();
        }
        if self.is_at_end() {
            return None;
        }
        if self.at(BLOCK_END) {
            return Some(self.scan_block_end());
        }
        if self.at(STATEMENT_BLOCK_START) {
            return Some(self.scan_block_start());
        }

        self.start = self.current;
        match self.peek() {
            '=' => {
                self.consume();
                Some(self.make_token(TokenKind::Equals))
            }
            '"' => {
                self.consume();
                self.mode = Mode::AttributeValue {
                    value_emitted: false,
                };
                Some(self.make_token(TokenKind::DoubleQuote))
            }
            _ => {
                while !self.is_at_end() && !self.at_name_boundary() {
                    self.consume();
                }
                self.mode = Mode::Directive { seen_name: true };
                let kind = if seen_name {
                    TokenKind::AttributeName
                } else {
                    TokenKind::DirectiveName
                };
                Some(self.make_token(kind))
            }
        }
    }

    fn scan_attribute_value(&mut self, value_emitted: bool) -> Option<Token<'src>> {
        self.start = self.current;

        if value_emitted {
            self.mode = Mode::Directive { seen_name: true };
            if self.peek() == '"' {
                self.consume();
                return Some(self.make_token(TokenKind::DoubleQuote));
            }
            return None;
        }

        while !self.is_at_end() {
            if self.at(ESCAPED_QUOTE) {
                self.current += ESCAPED_QUOTE.len();
                continue;
            }
            if self.peek() == '"' || self.at(BLOCK_END) || self.at(STATEMENT_BLOCK_START) {
                break;
            }
            self.consume();
        }

        // An immediately closed `""` is an empty value, not a missing one.
        if self.current > self.start || self.peek() == '"' {
            self.mode = Mode::AttributeValue {
                value_emitted: true,
            };
            return Some(self.make_token(TokenKind::AttributeValue));
        }

        self.mode = Mode::Directive { seen_name: true };
        None
    }

    fn at_name_boundary(&self) -> bool {
        let c = self.peek();
        c.is_whitespace()
            || c == '='
            || c == '"'
            || self.at(BLOCK_END)
            || self.at(STATEMENT_BLOCK_START)
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        let span = Span::from_bounds(self.start, self.current);
        let position = self.line_index.position(span.start());
        Token::new(kind, &self.source[self.start..self.current], span, position)
    }

    pub(crate) fn end_of_file(&self) -> Token<'src> {
        let span = Span::from_parts(self.source.len(), 0);
        let position = self.line_index.position(span.start());
        Token::new(TokenKind::EndOfFile, "", span, position)
    }

    #[inline]
    fn at(&self, delimiter: &str) -> bool {
        self.source[self.current..].starts_with(delimiter)
    }

    #[inline]
    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    #[inline]
    fn consume(&mut self) {
        if let Some(ch) = self.source[self.current..].chars().next() {
            self.current += ch.len_utf8();
        }
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(token) = self.next_token() {
                return Some(token);
            }
            if self.is_at_end() {
                self.finished = true;
                return Some(self.end_of_file());
            }
        }
    }
}
