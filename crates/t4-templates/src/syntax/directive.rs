use rustc_hash::FxHashMap;
use serde::Serialize;
use t4_source::Position;
use t4_source::Span;

use super::Attribute;
use super::CaptureNode;
use super::SyntaxKind;
use super::SyntaxToken;
use crate::directives::DirectiveDescriptor;

/// The directive variants a `<#@ name ... #>` block can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DirectiveKind {
    Assembly,
    Import,
    Include,
    Output,
    Parameter,
    Template,
    Custom,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 7] = [
        DirectiveKind::Assembly,
        DirectiveKind::Import,
        DirectiveKind::Include,
        DirectiveKind::Output,
        DirectiveKind::Parameter,
        DirectiveKind::Template,
        DirectiveKind::Custom,
    ];

    /// Resolve a directive name, ignoring case. Unknown names are custom
    /// directives.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        DirectiveKind::ALL
            .into_iter()
            .filter(|kind| *kind != DirectiveKind::Custom)
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .unwrap_or(DirectiveKind::Custom)
    }

    /// The canonical directive name. Custom directives have no fixed name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Assembly => "assembly",
            DirectiveKind::Import => "import",
            DirectiveKind::Include => "include",
            DirectiveKind::Output => "output",
            DirectiveKind::Parameter => "parameter",
            DirectiveKind::Template => "template",
            DirectiveKind::Custom => "",
        }
    }

    #[must_use]
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            DirectiveKind::Assembly => SyntaxKind::AssemblyDirective,
            DirectiveKind::Import => SyntaxKind::ImportDirective,
            DirectiveKind::Include => SyntaxKind::IncludeDirective,
            DirectiveKind::Output => SyntaxKind::OutputDirective,
            DirectiveKind::Parameter => SyntaxKind::ParameterDirective,
            DirectiveKind::Template => SyntaxKind::TemplateDirective,
            DirectiveKind::Custom => SyntaxKind::CustomDirective,
        }
    }

    /// The cached schema of this directive kind. Repeated calls return the
    /// same reference.
    #[must_use]
    pub fn descriptor(self) -> &'static DirectiveDescriptor {
        crate::directives::descriptor(self)
    }
}

/// A `<#@ name attribute="value" ... #>` block.
///
/// Attributes keep their source order. Lookup by name ignores case and, when
/// a name is repeated, resolves to its first occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Directive {
    kind: DirectiveKind,
    start: SyntaxToken,
    name: CaptureNode,
    attributes: Vec<Attribute>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
    end: Option<SyntaxToken>,
    span: Span,
}

impl Directive {
    pub(crate) fn new(
        start: SyntaxToken,
        name: CaptureNode,
        attributes: Vec<Attribute>,
        end: Option<SyntaxToken>,
    ) -> Self {
        let kind = DirectiveKind::from_name(name.text());

        let mut index = FxHashMap::default();
        for (i, attribute) in attributes.iter().enumerate() {
            index
                .entry(attribute.name().to_ascii_lowercase())
                .or_insert(i);
        }

        let mut span = start.span().cover(name.span());
        if let Some(last) = attributes.last() {
            span = span.cover(last.span());
        }
        if let Some(end) = &end {
            span = span.cover(end.span());
        }

        Self {
            kind,
            start,
            name,
            attributes,
            index,
            end,
            span,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    #[must_use]
    pub fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }

    /// The directive name as written in the source.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.text()
    }

    #[must_use]
    pub fn start(&self) -> &SyntaxToken {
        &self.start
    }

    #[must_use]
    pub fn name_node(&self) -> &CaptureNode {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attribute_index(name).map(|i| &self.attributes[i])
    }

    /// Position of the attribute `name` resolves to within [`attributes`](Self::attributes).
    #[must_use]
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.index.get(&name.to_ascii_lowercase()).copied()
    }

    #[must_use]
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(Attribute::value)
    }

    #[must_use]
    pub fn end(&self) -> Option<&SyntaxToken> {
        self.end.as_ref()
    }

    /// Whether the directive was closed with `#>`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.start.position()
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static DirectiveDescriptor {
        self.kind.descriptor()
    }

    /// View this directive through the accessors of its kind.
    #[must_use]
    pub fn typed(&self) -> TypedDirective<'_> {
        match self.kind {
            DirectiveKind::Assembly => TypedDirective::Assembly(AssemblyDirective(self)),
            DirectiveKind::Import => TypedDirective::Import(ImportDirective(self)),
            DirectiveKind::Include => TypedDirective::Include(IncludeDirective(self)),
            DirectiveKind::Output => TypedDirective::Output(OutputDirective(self)),
            DirectiveKind::Parameter => TypedDirective::Parameter(ParameterDirective(self)),
            DirectiveKind::Template => TypedDirective::Template(TemplateDirective(self)),
            DirectiveKind::Custom => TypedDirective::Custom(CustomDirective(self)),
        }
    }

    /// Hover text for `offset`.
    ///
    /// Returns `None` when the offset is outside this directive. Whitespace
    /// between tokens yields an empty [`QuickInfo`] so callers stop looking
    /// elsewhere.
    #[must_use]
    pub fn description_at(&self, offset: u32) -> Option<QuickInfo> {
        if !self.span.contains(offset) {
            return None;
        }

        let descriptor = self.descriptor();

        if self.start.span().contains(offset) || self.name.span().contains(offset) {
            return Some(QuickInfo::new(descriptor.description(), self.name.span()));
        }

        if let Some(end) = &self.end {
            if end.span().contains(offset) {
                return Some(QuickInfo::new(descriptor.description(), end.span()));
            }
        }

        for attribute in &self.attributes {
            if !attribute.span().contains(offset) {
                continue;
            }

            let Some(attribute_descriptor) = descriptor.attribute(attribute.name()) else {
                return Some(QuickInfo::empty(attribute.span()));
            };

            if let Some(value) = attribute.value_node() {
                if value.span().contains(offset) {
                    return Some(match attribute_descriptor.value(value.text()) {
                        Some(known) => QuickInfo::new(known.description(), value.span()),
                        None => QuickInfo::empty(value.span()),
                    });
                }
            }

            return Some(QuickInfo::new(
                attribute_descriptor.description(),
                attribute.span(),
            ));
        }

        Some(QuickInfo::empty(Span::empty(offset)))
    }
}

/// Hover text and the span it applies to.
///
/// An empty description claims the position without showing anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuickInfo {
    description: Option<&'static str>,
    span: Span,
}

impl QuickInfo {
    #[must_use]
    pub fn new(description: &'static str, span: Span) -> Self {
        Self {
            description: Some(description),
            span,
        }
    }

    #[must_use]
    pub fn empty(span: Span) -> Self {
        Self {
            description: None,
            span,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
    }
}

macro_rules! directive_view {
    (
        $(#[$meta:meta])*
        $view:ident, $kind:ident {
            $( $accessor:ident => $attribute:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $view<'t>(&'t Directive);

        impl<'t> $view<'t> {
            #[must_use]
            pub fn cast(directive: &'t Directive) -> Option<Self> {
                (directive.kind() == DirectiveKind::$kind).then_some(Self(directive))
            }

            #[must_use]
            pub fn directive(&self) -> &'t Directive {
                self.0
            }

            $(
                #[must_use]
                pub fn $accessor(&self) -> Option<&'t str> {
                    self.0.attribute_value($attribute)
                }
            )*
        }
    };
}

directive_view! {
    /// `<#@ assembly name="..." #>`
    AssemblyDirective, Assembly {
        name => "name",
    }
}

directive_view! {
    /// `<#@ import namespace="..." #>`
    ImportDirective, Import {
        namespace => "namespace",
    }
}

directive_view! {
    /// `<#@ include file="..." once="..." #>`
    IncludeDirective, Include {
        file => "file",
        once => "once",
    }
}

directive_view! {
    /// `<#@ output extension="..." encoding="..." #>`
    OutputDirective, Output {
        extension => "extension",
        encoding => "encoding",
    }
}

directive_view! {
    /// `<#@ parameter name="..." type="..." #>`
    ParameterDirective, Parameter {
        name => "name",
        parameter_type => "type",
    }
}

directive_view! {
    TemplateDirective, Template {
        language => "language",
        debug => "debug",
        hostspecific => "hostspecific",
        inherits => "inherits",
        culture => "culture",
        compiler_options => "compilerOptions",
        line_pragmas => "linePragmas",
        visibility => "visibility",
    }
}

directive_view! {
    /// Any directive with an unrecognized name. Only `processor` is known.
    CustomDirective, Custom {
        processor => "processor",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypedDirective<'t> {
    Assembly(AssemblyDirective<'t>),
    Import(ImportDirective<'t>),
    Include(IncludeDirective<'t>),
    Output(OutputDirective<'t>),
    Parameter(ParameterDirective<'t>),
    Template(TemplateDirective<'t>),
    Custom(CustomDirective<'t>),
}
