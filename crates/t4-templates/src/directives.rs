//! Schema of the built-in directives.
//!
//! Descriptors drive both validation and editor features such as directive,
//! attribute and value completion and hover text. They are built once per
//! process and handed out as `&'static` references.

mod builtins;

use serde::Serialize;

use crate::syntax::DirectiveKind;

/// One well-known value of an attribute, such as `"C#"` or `"true"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValueDescriptor {
    display_name: &'static str,
    description: &'static str,
}

impl ValueDescriptor {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    required: bool,
    values: Vec<ValueDescriptor>,
}

impl AttributeDescriptor {
    /// Spelling used in templates and offered for completion.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name used in diagnostics, such as `Processor` or `HostSpecific`.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Well-known values, empty when the attribute accepts free text.
    #[must_use]
    pub fn values(&self) -> &[ValueDescriptor] {
        &self.values
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&ValueDescriptor> {
        self.values
            .iter()
            .find(|value| value.display_name.eq_ignore_ascii_case(name))
    }

    /// Whether `value` is acceptable. Attributes without well-known values
    /// accept anything.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.values.is_empty() || self.value(value).is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectiveDescriptor {
    kind: DirectiveKind,
    display_name: Option<&'static str>,
    description: &'static str,
    attributes: Vec<AttributeDescriptor>,
    accepts_unknown_attributes: bool,
}

impl DirectiveDescriptor {
    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    /// Name offered for completion. `None` for custom directives.
    #[must_use]
    pub fn display_name(&self) -> Option<&'static str> {
        self.display_name
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case(name))
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter().filter(|attribute| attribute.required)
    }

    /// Whether attributes missing from [`attributes`](Self::attributes) are
    /// allowed.
    #[must_use]
    pub fn accepts_unknown_attributes(&self) -> bool {
        self.accepts_unknown_attributes
    }
}

pub(crate) fn descriptor(kind: DirectiveKind) -> &'static DirectiveDescriptor {
    &builtins::BUILTIN_DIRECTIVES[kind as usize]
}

/// Descriptors offered for directive name completion, in declaration order.
/// The custom directive is not included.
pub fn builtin_directives() -> impl Iterator<Item = &'static DirectiveDescriptor> {
    builtins::BUILTIN_DIRECTIVES
        .iter()
        .filter(|descriptor| descriptor.display_name.is_some())
}
