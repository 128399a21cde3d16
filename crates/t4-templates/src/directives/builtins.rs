//! Built-in directive schemas.
//!
//! The table is indexed by [`DirectiveKind`] discriminant, so entries must be
//! built in [`DirectiveKind::ALL`] order.

use std::sync::LazyLock;

use super::AttributeDescriptor;
use super::DirectiveDescriptor;
use super::ValueDescriptor;
use crate::syntax::DirectiveKind;

type ValueEntry = (&'static str, &'static str);

const BOOLEAN: &[ValueEntry] = &[
    ("true", "Enables the option."),
    ("false", "Disables the option."),
];

/// Builder for creating directive descriptors with a fluent API
struct DirectiveBuilder {
    kind: DirectiveKind,
    display_name: Option<&'static str>,
    description: &'static str,
    attributes: Vec<AttributeDescriptor>,
    accepts_unknown_attributes: bool,
}

impl DirectiveBuilder {
    fn new(kind: DirectiveKind, description: &'static str) -> Self {
        DirectiveBuilder {
            kind,
            display_name: Some(kind.name()),
            description,
            attributes: Vec::new(),
            accepts_unknown_attributes: false,
        }
    }

    fn custom(description: &'static str) -> Self {
        DirectiveBuilder {
            display_name: None,
            accepts_unknown_attributes: true,
            ..DirectiveBuilder::new(DirectiveKind::Custom, description)
        }
    }

    fn attribute(self, name: &'static str, description: &'static str) -> Self {
        self.push(name, description, false, &[])
    }

    fn required(self, name: &'static str, description: &'static str) -> Self {
        self.push(name, description, true, &[])
    }

    fn with_values(
        self,
        name: &'static str,
        description: &'static str,
        values: &[ValueEntry],
    ) -> Self {
        self.push(name, description, false, values)
    }

    fn push(
        mut self,
        name: &'static str,
        description: &'static str,
        required: bool,
        values: &[ValueEntry],
    ) -> Self {
        self.attributes.push(AttributeDescriptor {
            name,
            display_name: accessor_name(name),
            description,
            required,
            values: values
                .iter()
                .map(|&(display_name, description)| ValueDescriptor {
                    display_name,
                    description,
                })
                .collect(),
        });
        self
    }

    fn build(self) -> DirectiveDescriptor {
        DirectiveDescriptor {
            kind: self.kind,
            display_name: self.display_name,
            description: self.description,
            attributes: self.attributes,
            accepts_unknown_attributes: self.accepts_unknown_attributes,
        }
    }
}

/// Diagnostic name of an attribute, spelled like a property accessor.
fn accessor_name(name: &'static str) -> &'static str {
    match name {
        "name" => "Name",
        "namespace" => "Namespace",
        "file" => "File",
        "once" => "Once",
        "extension" => "Extension",
        "encoding" => "Encoding",
        "type" => "Type",
        "language" => "Language",
        "debug" => "Debug",
        "hostspecific" => "HostSpecific",
        "inherits" => "Inherits",
        "culture" => "Culture",
        "compilerOptions" => "CompilerOptions",
        "linePragmas" => "LinePragmas",
        "visibility" => "Visibility",
        "processor" => "Processor",
        _ => name,
    }
}

pub(super) static BUILTIN_DIRECTIVES: LazyLock<[DirectiveDescriptor; 7]> =
    LazyLock::new(|| DirectiveKind::ALL.map(|kind| builder(kind).build()));

fn builder(kind: DirectiveKind) -> DirectiveBuilder {
    match kind {
        DirectiveKind::Assembly => DirectiveBuilder::new(
            kind,
            "Loads an assembly so that template code can use its types.",
        )
        .required(
            "name",
            "Name of an assembly in the global assembly cache, or the absolute path to an assembly file.",
        ),

        DirectiveKind::Import => DirectiveBuilder::new(
            kind,
            "Allows template code to refer to types in a namespace without fully qualified names.",
        )
        .required("namespace", "Fully qualified name of the namespace to import."),

        DirectiveKind::Include => DirectiveBuilder::new(
            kind,
            "Includes text from another file at the position of the directive.",
        )
        .required(
            "file",
            "Absolute or relative path of the file to include. Relative paths are resolved against the including template.",
        )
        .with_values(
            "once",
            "Whether the file is included only once, even if several templates include it.",
            BOOLEAN,
        ),

        DirectiveKind::Output => DirectiveBuilder::new(
            kind,
            "Defines the file name extension and encoding of the generated output.",
        )
        .attribute(
            "extension",
            "File name extension of the generated output file, such as \".cs\".",
        )
        .with_values(
            "encoding",
            "Encoding used to write the generated output file.",
            &[
                ("Default", "The default encoding of the operating system."),
                ("ASCII", "7-bit ASCII."),
                ("BigEndianUnicode", "UTF-16 with big-endian byte order."),
                ("Unicode", "UTF-16 with little-endian byte order."),
                ("UTF32", "UTF-32 with little-endian byte order."),
                ("UTF7", "UTF-7."),
                ("UTF8", "UTF-8."),
            ],
        ),

        DirectiveKind::Parameter => DirectiveBuilder::new(
            kind,
            "Declares a property initialized from a value passed in by the host.",
        )
        .required("name", "Name of the generated property.")
        .required(
            "type",
            "Fully qualified name of the property type, such as \"System.String\".",
        ),

        DirectiveKind::Template => DirectiveBuilder::new(
            kind,
            "Specifies how the template is transformed into generated code.",
        )
        .with_values(
            "language",
            "Language of the code in statement, expression and class feature blocks.",
            &[("C#", "Visual C#."), ("VB", "Visual Basic.")],
        )
        .with_values(
            "debug",
            "Whether the generated transformation code is kept for debugging.",
            BOOLEAN,
        )
        .with_values(
            "hostspecific",
            "Whether template code can access the templating host through the Host property.",
            &[
                ("true", "Adds a Host property to the generated class."),
                ("false", "The Host property is not available."),
                (
                    "trueFromBase",
                    "The Host property is inherited from the base class.",
                ),
            ],
        )
        .attribute(
            "inherits",
            "Base class of the generated transformation class.",
        )
        .attribute(
            "culture",
            "Culture used to convert expression block values to text, such as \"en-US\".",
        )
        .attribute(
            "compilerOptions",
            "Options passed to the compiler of the generated transformation code.",
        )
        .with_values(
            "linePragmas",
            "Whether line pragmas pointing back into the template are generated.",
            BOOLEAN,
        )
        .with_values(
            "visibility",
            "Visibility of the generated transformation class.",
            &[
                ("public", "The class is visible outside its assembly."),
                ("internal", "The class is visible only inside its assembly."),
            ],
        ),

        DirectiveKind::Custom => DirectiveBuilder::custom(
            "A custom directive handled by a directive processor registered with the templating host.",
        )
        .required(
            "processor",
            "Name of the directive processor that handles this directive.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_kind() {
        for (i, kind) in DirectiveKind::ALL.into_iter().enumerate() {
            assert_eq!(BUILTIN_DIRECTIVES[i].kind(), kind);
            assert_eq!(kind as usize, i);
        }
    }

    #[test]
    fn test_every_attribute_is_described() {
        for descriptor in BUILTIN_DIRECTIVES.iter() {
            for attribute in descriptor.attributes() {
                assert!(!attribute.description().is_empty());
                for value in attribute.values() {
                    assert!(!value.description().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_every_attribute_has_an_accessor_name() {
        for descriptor in BUILTIN_DIRECTIVES.iter() {
            for attribute in descriptor.attributes() {
                let display = attribute.display_name();
                assert!(display.starts_with(char::is_uppercase), "{display}");
                assert!(display.eq_ignore_ascii_case(attribute.name()));
            }
        }
    }

    #[test]
    fn test_output_encodings() {
        let output = &BUILTIN_DIRECTIVES[DirectiveKind::Output as usize];
        let encoding = output.attribute("encoding").unwrap();
        assert_eq!(encoding.values().len(), 7);
        assert!(encoding.accepts("utf8"));
    }
}
