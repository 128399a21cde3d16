//! Text template parsing, validation, and descriptions.
//!
//! Templates mix output text with blocks: statement (`<# #>`), expression
//! (`<#= #>`) and class feature (`<#+ #>`) code blocks, and `<#@ #>`
//! directives. This crate turns template text into a syntax tree plus an
//! ordered list of diagnostics without ever failing on malformed input.
//!
//! ## Architecture
//!
//! 1. **Scanning**: [`Scanner`] turns text into block delimiters, directive
//!    names, attributes and raw code runs. Output text produces no tokens.
//! 2. **Parsing**: [`Parser`] builds a [`Template`] and collects syntax
//!    errors, recovering at the next block start.
//! 3. **Validation**: directives are checked against the schema in
//!    [`directives`] (required attributes, known values, unknown and
//!    duplicate attributes).
//! 4. **Caching**: [`analyze_template`] runs all of the above as a Salsa
//!    tracked function over a [`t4_source::SourceBuffer`].
//!
//! ## Example
//!
//! ```
//! let parsed = t4_templates::parse(r#"<#@ template language="C#" #>"#);
//! assert!(parsed.succeeded());
//!
//! let directive = parsed.template().directives().next().unwrap();
//! assert_eq!(directive.attribute_value("Language"), Some("C#"));
//! ```

pub mod db;
pub mod directives;
mod error;
mod parser;
mod scanner;
pub mod syntax;
mod tokens;
pub mod validation;
mod visitor;

pub use db::analyze_template;
pub use db::parse_template;
pub use db::Db;
pub use db::TemplateAnalysis;
pub use directives::builtin_directives;
pub use directives::AttributeDescriptor;
pub use directives::DirectiveDescriptor;
pub use directives::ValueDescriptor;
pub use error::TemplateError;
pub use error::TemplateErrorKind;
pub use parser::ParsedTemplate;
pub use parser::Parser;
pub use scanner::Scanner;
pub use syntax::Directive;
pub use syntax::DirectiveKind;
pub use syntax::QuickInfo;
pub use syntax::SyntaxKind;
pub use syntax::SyntaxNode;
pub use syntax::Template;
pub use tokens::Token;
pub use tokens::TokenKind;
pub use visitor::walk_children;
pub use visitor::Visitor;

/// Parse template text outside of any database.
#[must_use]
pub fn parse(source: &str) -> ParsedTemplate {
    Parser::new(source).parse()
}
