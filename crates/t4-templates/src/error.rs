use serde::Serialize;
use t4_source::Position;
use t4_source::Span;
use thiserror::Error;

/// A diagnostic produced while analyzing a template.
///
/// Errors are always returned as values; malformed template content never
/// makes the parser or validator fail.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[error("{kind}")]
pub struct TemplateError {
    kind: TemplateErrorKind,
    span: Span,
    position: Position,
}

impl TemplateError {
    #[must_use]
    pub fn new(kind: TemplateErrorKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &TemplateErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
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
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum TemplateErrorKind {
    /// Tokens outside of any block that cannot start one, such as a stray `#>`.
    #[error("<#, <#=, <#+ or <#@ expected")]
    BlockStartExpected,

    /// A code block opened and immediately truncated.
    #[error("code or #> expected")]
    CodeOrBlockEndExpected,

    /// A code block whose code is not followed by `#>`.
    #[error("#> expected")]
    BlockEndExpected,

    #[error("directive name expected")]
    DirectiveNameExpected,

    #[error("#> or attribute name expected")]
    BlockEndOrAttributeNameExpected,

    #[error("= expected")]
    EqualsExpected,

    #[error("\" expected")]
    QuoteExpected,

    #[error("attribute value expected")]
    AttributeValueExpected,

    /// A required attribute is absent or empty.
    #[error("The {attribute} attribute is required")]
    MissingAttribute { attribute: String },

    /// An attribute the directive does not define.
    #[error("Unexpected {attribute} attribute")]
    UnexpectedAttribute { attribute: String },

    /// A value outside the attribute's well-known value set.
    #[error("'{value}' is not a valid value for the {attribute} attribute")]
    InvalidAttributeValue { attribute: String, value: String },

    /// A later occurrence of an attribute already present on the directive.
    #[error("Duplicate {attribute} attribute")]
    DuplicateAttribute { attribute: String },
}

impl TemplateErrorKind {
    /// Stable diagnostic code: `T1xx` for syntax errors, `S1xx` for schema
    /// violations.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TemplateErrorKind::BlockStartExpected => "T100",
            TemplateErrorKind::CodeOrBlockEndExpected => "T101",
            TemplateErrorKind::BlockEndExpected => "T102",
            TemplateErrorKind::DirectiveNameExpected => "T103",
            TemplateErrorKind::BlockEndOrAttributeNameExpected => "T104",
            TemplateErrorKind::EqualsExpected => "T105",
            TemplateErrorKind::QuoteExpected => "T106",
            TemplateErrorKind::AttributeValueExpected => "T107",
            TemplateErrorKind::MissingAttribute { .. } => "S100",
            TemplateErrorKind::UnexpectedAttribute { .. } => "S101",
            TemplateErrorKind::InvalidAttributeValue { .. } => "S102",
            TemplateErrorKind::DuplicateAttribute { .. } => "S103",
        }
    }

    #[must_use]
    pub fn is_syntax_error(&self) -> bool {
        self.code().starts_with('T')
    }
}
