//! Schema validation of directives.
//!
//! Only directives closed with `#>` are checked; anything else already has a
//! syntax error and its attributes may be incomplete.

use t4_source::Span;

use crate::error::TemplateErrorKind;
use crate::syntax::Attribute;
use crate::syntax::Directive;
use crate::syntax::SyntaxNode;
use crate::syntax::Template;
use crate::TemplateError;
use crate::Visitor;

/// Schema violations of a single directive, in this order: missing required
/// attributes, then per attribute in source order duplicates, unknown names and
/// unknown values.
pub fn validate_directive(directive: &Directive) -> impl Iterator<Item = TemplateError> + '_ {
    let active = directive.is_complete();
    let descriptor = directive.descriptor();

    let missing = descriptor
        .required_attributes()
        .filter(move |_| active)
        .filter(move |required| {
            directive
                .attribute_value(required.name())
                .is_none_or(str::is_empty)
        })
        .map(move |required| {
            TemplateError::new(
                TemplateErrorKind::MissingAttribute {
                    attribute: required.display_name().to_string(),
                },
                directive.span(),
                directive.position(),
            )
        });

    let attributes = directive
        .attributes()
        .iter()
        .enumerate()
        .filter(move |_| active)
        .filter_map(move |(i, attribute)| validate_attribute(directive, i, attribute));

    missing.chain(attributes)
}

fn validate_attribute(
    directive: &Directive,
    index: usize,
    attribute: &Attribute,
) -> Option<TemplateError> {
    if directive.attribute_index(attribute.name()) != Some(index) {
        return Some(TemplateError::new(
            TemplateErrorKind::DuplicateAttribute {
                attribute: attribute.name().to_string(),
            },
            attribute.span(),
            attribute.position(),
        ));
    }

    let descriptor = directive.descriptor();
    let Some(attribute_descriptor) = descriptor.attribute(attribute.name()) else {
        if descriptor.accepts_unknown_attributes() {
            return None;
        }
        return Some(TemplateError::new(
            TemplateErrorKind::UnexpectedAttribute {
                attribute: attribute.name().to_string(),
            },
            attribute.span(),
            attribute.position(),
        ));
    };

    if attribute_descriptor.accepts(attribute.value()) {
        return None;
    }

    let (span, position) = attribute.value_node().map_or_else(
        || (Span::empty(attribute.span().end()), attribute.position()),
        |value| (value.span(), value.position()),
    );
    Some(TemplateError::new(
        TemplateErrorKind::InvalidAttributeValue {
            attribute: attribute_descriptor.display_name().to_string(),
            value: attribute.value().to_string(),
        },
        span,
        position,
    ))
}

/// Schema violations of every directive in the template, in source order.
#[must_use]
pub fn validate_template(template: &Template) -> Vec<TemplateError> {
    let mut validator = DirectiveValidator::default();
    validator.visit_template(template);
    validator.errors
}

#[derive(Default)]
struct DirectiveValidator {
    errors: Vec<TemplateError>,
}

impl<'t> Visitor<'t> for DirectiveValidator {
    fn visit_directive(&mut self, node: &'t Directive) {
        self.errors.extend(SyntaxNode::Directive(node).validate());
    }
}
