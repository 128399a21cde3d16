use t4_source::Position;
use t4_source::Span;
use t4_templates::builtin_directives;
use t4_templates::parse;
use t4_templates::syntax::TemplateDirective;
use t4_templates::DirectiveKind;
use t4_templates::ParsedTemplate;
use t4_templates::SyntaxKind;
use t4_templates::SyntaxNode;
use t4_templates::TemplateError;

fn all_errors(source: &str) -> Vec<TemplateError> {
    let parsed = parse(source);
    let mut errors = parsed.errors().to_vec();
    errors.extend(parsed.template().validate());
    errors
}

fn messages(source: &str) -> Vec<String> {
    all_errors(source)
        .iter()
        .map(TemplateError::message)
        .collect()
}

#[test]
fn well_formed_templates_have_no_errors() {
    let sources = [
        "",
        "plain text",
        "<# #>",
        "<#= DateTime.Now #>",
        "<#+ int Count; #>",
        "<#@ template language=\"VB\" debug=\"false\" #>",
        "<#@ output extension=\".g.cs\" encoding=\"UTF8\" #>\nHello <#= name #>!\n",
        "<#@ parameter name=\"Name\" type=\"System.String\" #><# if (true) { #>x<# } #>",
    ];
    for source in sources {
        let parsed = parse(source);
        assert!(parsed.succeeded(), "{source:?}: {:?}", parsed.errors());
        assert!(all_errors(source).is_empty(), "{source:?}");
    }
}

#[test]
fn empty_template_has_no_children() {
    let parsed = parse("");
    assert!(parsed.succeeded());
    assert!(parsed.errors().is_empty());
    assert_eq!(parsed.template().children().len(), 0);
    assert_eq!(parsed.template().as_node().child_nodes().count(), 0);
}

#[test]
fn lone_block_end() {
    let errors = all_errors("#>");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "<#, <#=, <#+ or <#@ expected");
    assert_eq!(errors[0].span(), Span::new(0, 2));
    assert_eq!(errors[0].position(), Position::new(0, 0));
}

#[test]
fn unterminated_statement_block() {
    let errors = all_errors("<#");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "code or #> expected");
    assert_eq!(errors[0].span(), Span::new(2, 0));
    assert_eq!(errors[0].position(), Position::new(0, 2));
}

#[test]
fn template_directive_language() {
    let parsed = parse("<#@ template language=\"C#\" #>");
    assert!(parsed.succeeded());

    let children = parsed.template().children();
    assert_eq!(children.len(), 1);
    let directive = children[0].as_directive().unwrap();
    assert_eq!(directive.kind(), DirectiveKind::Template);
    assert_eq!(
        TemplateDirective::cast(directive).unwrap().language(),
        Some("C#")
    );
    assert!(parsed.template().validate().is_empty());
}

#[test]
fn unknown_attribute_is_reported() {
    insta::assert_debug_snapshot!(messages("<#@ template bad=\"puppy\" #>"), @r#"
    [
        "Unexpected bad attribute",
    ]
    "#);
}

#[test]
fn escaped_backslash_keeps_following_block() {
    let parsed = parse(r"a\\<#= x #>");
    assert!(parsed.succeeded(), "{:?}", parsed.errors());
    let children: Vec<SyntaxNode> = parsed.template().as_node().child_nodes().collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].span(), Span::new(3, 8));

    let start = children[0].child_nodes().next().unwrap();
    assert_eq!(start.kind(), SyntaxKind::ExpressionBlockStart);

    assert!(parse(r"\\\<# text").succeeded());
}

#[test]
fn custom_directive_requires_processor() {
    insta::assert_debug_snapshot!(messages("<#@ custom #>"), @r#"
    [
        "The Processor attribute is required",
    ]
    "#);
}

#[test]
fn attribute_lookup_is_case_insensitive() {
    let parsed = parse("<#@ template Language=\"VB\" #>");
    let directive = parsed.template().directives().next().unwrap();
    assert_eq!(directive.attribute_value("language"), Some("VB"));
    assert_eq!(directive.attribute("language").unwrap().name(), "Language");
}

#[test]
fn builtin_directives_are_the_six_named_kinds() {
    let kinds: Vec<DirectiveKind> = builtin_directives().map(|d| d.kind()).collect();
    assert_eq!(kinds.len(), 6);
    assert!(!kinds.contains(&DirectiveKind::Custom));
    for descriptor in builtin_directives() {
        assert!(descriptor.display_name().is_some());
        assert!(!descriptor.description().is_empty());
    }
}

#[test]
fn parsing_is_idempotent() {
    let source = "<#@ template language=\"C#\" #>\n<#@ import namespace=\"System\" #>\n<# var x = 1; #>\n<#= x";
    let first = parse(source);
    let second = parse(source);
    assert_eq!(first, second);

    let kinds = |parsed: &ParsedTemplate| -> Vec<(SyntaxKind, Span, Position)> {
        parsed
            .template()
            .as_node()
            .descendants()
            .into_iter()
            .map(|node: SyntaxNode<'_>| (node.kind(), node.span(), node.position()))
            .collect()
    };
    assert_eq!(kinds(&first), kinds(&second));
}

#[test]
fn malformed_input_degrades_to_partial_structure() {
    let source = "<#@ template language=\"C#\" #>\n#> stray\n<#@ include file=\"x.tt\" once=\"sometimes\" #>\n<#= unterminated";
    insta::assert_debug_snapshot!(messages(source), @r##"
    [
        "<#, <#=, <#+ or <#@ expected",
        "#> expected",
        "'sometimes' is not a valid value for the Once attribute",
    ]
    "##);

    let parsed = parse(source);
    assert_eq!(parsed.template().directives().count(), 2);
    assert_eq!(parsed.template().code_blocks().count(), 1);
}

#[test]
fn description_lookup_through_template() {
    let source = "text <#@ import namespace=\"System\" #>";
    let parsed = parse(source);
    let template = parsed.template();

    assert_eq!(template.description_at(1), None);

    let info = template.description_at(10).unwrap();
    assert_eq!(
        info.description(),
        Some(DirectiveKind::Import.descriptor().description())
    );
    assert_eq!(info.span(), Span::new(9, 6));
}
