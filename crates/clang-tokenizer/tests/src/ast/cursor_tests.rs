use super::*;

const MAIN: &str = "/tmp/clang-tokenizer-fixtures/main.cpp";

fn load(
    json: &str,
    source: &str,
    macros: Option<&MacroTable>,
) -> TranslationUnit {
    TranslationUnit::from_ast_json(MAIN, json, source, macros).expect("fixture decodes")
}

fn namespace_class() -> TranslationUnit {
    load(include_str!("../../fixtures/namespace_class.json"), "", None)
}

fn unresolved_overload() -> TranslationUnit {
    load(include_str!("../../fixtures/unresolved_overload.json"), "", None)
}

fn header_reference() -> TranslationUnit {
    load(include_str!("../../fixtures/header_reference.json"), "", None)
}

fn find_cursor<'tu>(
    tu: &'tu TranslationUnit,
    mut pred: impl FnMut(&Cursor<'tu>) -> bool,
) -> Cursor<'tu> {
    let mut found = None;
    tu.cursor().visit_children(|child, _| {
        if pred(&child) {
            found = Some(child);
            ChildVisit::Break
        } else {
            ChildVisit::Recurse
        }
    });
    found.expect("cursor not found")
}

fn kinds(cursor: Cursor<'_>) -> Vec<(CursorKind, String)> {
    cursor.children().map(|c| (c.kind(), c.spelling().to_owned())).collect()
}

#[test]
fn implicit_declarations_are_hidden() {
    let tu = namespace_class();
    assert_eq!(kinds(tu.cursor()), vec![(CursorKind::Namespace, "foo".to_owned())]);

    let class = find_cursor(&tu, |c| c.kind() == CursorKind::ClassDecl);
    assert_eq!(
        kinds(class),
        vec![(CursorKind::FieldDecl, "x".to_owned()), (CursorKind::CxxMethod, "method".to_owned())]
    );
}

#[test]
fn visit_children_reports_break() {
    let tu = namespace_class();
    let mut visited = 0;
    let stopped = tu.cursor().visit_children(|_, _| {
        visited += 1;
        ChildVisit::Break
    });
    assert!(stopped);
    assert_eq!(visited, 1);

    let finished = tu.cursor().visit_children(|_, _| ChildVisit::Recurse);
    assert!(!finished);
}

#[test]
fn visit_children_passes_parent() {
    let tu = namespace_class();
    let mut pairs = Vec::new();
    tu.cursor().visit_children(|child, parent| {
        pairs.push((parent.spelling().to_owned(), child.spelling().to_owned()));
        ChildVisit::Recurse
    });
    assert_eq!(
        pairs,
        vec![
            (MAIN.to_owned(), "foo".to_owned()),
            ("foo".to_owned(), "Bar".to_owned()),
            ("Bar".to_owned(), "x".to_owned()),
            ("Bar".to_owned(), "method".to_owned()),
        ]
    );
}

#[test]
fn record_kinds_follow_the_tag() {
    let json = r#"{
        "id": "0x1", "kind": "TranslationUnitDecl", "loc": {}, "range": {"begin": {}, "end": {}},
        "inner": [
            {"id": "0x2", "kind": "CXXRecordDecl", "name": "S", "tagUsed": "struct",
             "loc": {"offset": 7, "file": "/tmp/clang-tokenizer-fixtures/main.cpp", "line": 1, "col": 8, "tokLen": 1},
             "range": {"begin": {"offset": 0, "line": 1, "col": 1, "tokLen": 6}, "end": {"offset": 11, "line": 1, "col": 12, "tokLen": 1}}},
            {"id": "0x3", "kind": "CXXRecordDecl", "name": "U", "tagUsed": "union",
             "loc": {"offset": 20, "line": 2, "col": 7, "tokLen": 1},
             "range": {"begin": {"offset": 14, "line": 2, "col": 1, "tokLen": 5}, "end": {"offset": 24, "line": 2, "col": 11, "tokLen": 1}}}
        ]
    }"#;
    let tu = load(json, "", None);
    let children: Vec<_> = tu.cursor().children().map(|c| c.kind()).collect();
    assert_eq!(children, vec![CursorKind::StructDecl, CursorKind::UnionDecl]);

    // The second record omits `file`; it inherits the main file.
    let union = tu.cursor().children().nth(1).unwrap();
    assert_eq!(union.location().unwrap().file, MAIN);
}

#[test]
fn template_exposes_parameters_then_templated_members() {
    let tu = unresolved_overload();
    let template = find_cursor(&tu, |c| c.kind() == CursorKind::FunctionTemplate);
    assert_eq!(template.spelling(), "g");
    assert_eq!(
        template.children().map(|c| c.kind()).collect::<Vec<_>>(),
        vec![CursorKind::TemplateTypeParameter, CursorKind::ParmDecl, CursorKind::Unexposed]
    );
}

#[test]
fn unresolved_lookup_exposes_overload_set() {
    let tu = unresolved_overload();
    let lookup = find_cursor(&tu, |c| c.kind() == CursorKind::DeclRefExpr && c.spelling() == "f");

    let first_child = lookup.children().next().expect("overload set child");
    assert_eq!(first_child.kind(), CursorKind::OverloadedDeclRef);
    assert_eq!(first_child.num_overloaded_decls(), 2);

    let candidate = first_child.overloaded_decl(0).unwrap();
    assert_eq!(candidate.kind(), CursorKind::FunctionDecl);
    assert_eq!(candidate.spelling(), "f");
    assert!(first_child.overloaded_decl(2).is_none());

    let referenced = lookup.referenced().unwrap();
    assert_eq!(referenced.kind(), CursorKind::OverloadedDeclRef);
    assert_eq!(lookup.num_overloaded_decls(), 0);
}

#[test]
fn declarations_reference_themselves() {
    let tu = namespace_class();
    let field = find_cursor(&tu, |c| c.kind() == CursorKind::FieldDecl);
    let referenced = field.referenced().unwrap();
    assert_eq!(referenced.kind(), CursorKind::FieldDecl);
    assert_eq!(referenced.spelling(), "x");
    assert!(tu.cursor().referenced().is_none());
}

#[test]
fn references_resolve_through_the_declaration_index() {
    let tu = header_reference();

    let member = find_cursor(&tu, |c| c.kind() == CursorKind::MemberRefExpr);
    let field = member.referenced().unwrap();
    assert_eq!(field.kind(), CursorKind::FieldDecl);
    assert_eq!(field.spelling(), "size");

    let param_ref = find_cursor(&tu, |c| c.kind() == CursorKind::DeclRefExpr);
    let param = param_ref.referenced().unwrap();
    assert_eq!(param.kind(), CursorKind::ParmDecl);
    assert_eq!(param.spelling(), "w");
}

#[test]
fn unknown_reference_falls_back_to_inline_summary() {
    let json = r#"{
        "id": "0x1", "kind": "TranslationUnitDecl", "loc": {}, "range": {"begin": {}, "end": {}},
        "inner": [
            {"id": "0x2", "kind": "DeclRefExpr",
             "range": {"begin": {"offset": 0, "file": "/tmp/clang-tokenizer-fixtures/main.cpp", "line": 1, "col": 1, "tokLen": 4},
                       "end": {"offset": 0, "line": 1, "col": 1, "tokLen": 4}},
             "referencedDecl": {"id": "0x99", "kind": "EnumConstantDecl", "name": "Blue"}}
        ]
    }"#;
    let tu = load(json, "", None);
    let reference = tu.cursor().children().next().unwrap();
    let referenced = reference.referenced().unwrap();
    assert_eq!(referenced.kind(), CursorKind::EnumConstantDecl);
    assert_eq!(referenced.spelling(), "Blue");
    assert!(referenced.location().is_none());
}

#[test]
fn member_reference_is_located_at_member_name() {
    let tu = header_reference();
    let member = find_cursor(&tu, |c| c.kind() == CursorKind::MemberRefExpr);
    let position = member.location().unwrap();
    assert_eq!((position.line, position.column, position.length), (2, 31, 4));
    assert_eq!(position.file, MAIN);

    let record = tu.cursor().children().next().unwrap();
    assert_eq!(record.kind(), CursorKind::ClassDecl);
    assert_eq!(record.location().unwrap().file, "/tmp/clang-tokenizer-fixtures/widget.h");
}

#[test]
fn macro_expanded_nodes_report_expansion_site() {
    let tu = load(include_str!("../../fixtures/macro_expansion.json"), "", None);
    let expr = find_cursor(&tu, |c| c.kind() == CursorKind::Unexposed);
    assert_eq!(expr.kind_name(), "BinaryOperator");
    let position = expr.location().unwrap();
    assert_eq!((position.line, position.column), (2, 12));
}

#[test]
fn preprocessing_entities_interleave_with_top_level_declarations() {
    let mut table = MacroTable::default();
    table.insert("SQUARE", true);
    table.insert("LIMIT", false);
    let source = "#define SQUARE(x) ((x) * (x))\nint nine = SQUARE(3) + LIMIT;\n";
    let tu = load(include_str!("../../fixtures/macro_expansion.json"), source, Some(&table));

    let top: Vec<_> = tu.cursor().children().map(|c| (c.kind(), c.spelling().to_owned())).collect();
    assert_eq!(
        top,
        vec![
            (CursorKind::MacroDefinition, "SQUARE".to_owned()),
            (CursorKind::VarDecl, "nine".to_owned()),
            (CursorKind::MacroExpansion, "SQUARE".to_owned()),
            (CursorKind::MacroExpansion, "LIMIT".to_owned()),
        ]
    );

    let square = tu.cursor().children().nth(2).unwrap();
    let definition = square.referenced().unwrap();
    assert_eq!(definition.kind(), CursorKind::MacroDefinition);
    assert_eq!(definition.location().unwrap().line, 1);

    let limit = tu.cursor().children().nth(3).unwrap();
    assert!(limit.referenced().is_none());
}

#[test]
fn invalid_json_is_a_decode_error() {
    let err = TranslationUnit::from_ast_json(MAIN, "{\"id\": 3", "", None).err().unwrap();
    assert!(matches!(err, TokenizeError::AstDecode(_)));
}

#[test]
fn translation_unit_spelling_is_main_file() {
    let tu = namespace_class();
    assert_eq!(tu.cursor().spelling(), MAIN);
    assert_eq!(tu.cursor().kind(), CursorKind::TranslationUnit);
    assert!(tu.cursor().location().is_none());
}

fn nested_parens(depth: usize) -> String {
    let range = r#""range": {"begin": {"offset": 8, "line": 1, "col": 9, "tokLen": 1}, "end": {"offset": 8, "line": 1, "col": 9, "tokLen": 1}}"#;
    let mut json = String::from(
        r#"{"id": "0x1", "kind": "TranslationUnitDecl", "loc": {}, "range": {"begin": {}, "end": {}}, "inner": [
            {"id": "0x2", "kind": "VarDecl", "name": "deep",
             "loc": {"offset": 4, "file": "/tmp/clang-tokenizer-fixtures/main.cpp", "line": 1, "col": 5, "tokLen": 4},
             "range": {"begin": {"offset": 0, "line": 1, "col": 1, "tokLen": 3}, "end": {"offset": 8, "line": 1, "col": 9, "tokLen": 1}},
             "inner": ["#,
    );
    for level in 0..depth {
        json.push_str(&format!(r#"{{"id": "0x{:x}", "kind": "ParenExpr", {range}, "inner": ["#, 0x1000 + level));
    }
    json.push_str(&format!(r#"{{"id": "0x9", "kind": "IntegerLiteral", {range}}}"#));
    for _ in 0..depth {
        json.push_str("]}");
    }
    json.push_str("]}]}");
    json
}

#[test]
fn deeply_nested_expressions_decode() {
    let tu = load(&nested_parens(300), "", None);
    let tokens = tu.tokens();
    assert_eq!(tokens.len(), 302);
    assert_eq!(tokens[0].cursor().kind(), CursorKind::VarDecl);
    assert_eq!(tokens[301].cursor().kind_name(), "IntegerLiteral");
}

#[test]
fn header_macro_expansion_references_header_definition() {
    let mut table = MacroTable::default();
    table.define(ExternalMacro {
        name: "LIMIT".to_owned(),
        function_like: false,
        origin: MacroOrigin::Header {
            file: "/tmp/clang-tokenizer-fixtures/widget.h".to_owned(),
            line: 4,
            column: 9,
        },
        active_after: 0,
        undefined_after: None,
    });
    let source = "#define SQUARE(x) ((x) * (x))\nint nine = SQUARE(3) + LIMIT;\n";
    let tu = load(include_str!("../../fixtures/macro_expansion.json"), source, Some(&table));

    let limit = tu.cursor().children().find(|c| c.spelling() == "LIMIT").unwrap();
    assert_eq!(limit.kind(), CursorKind::MacroExpansion);

    let definition = limit.referenced().unwrap();
    assert_eq!(definition.kind(), CursorKind::MacroDefinition);
    assert_eq!(definition.spelling(), "LIMIT");
    let position = definition.location().unwrap();
    assert_eq!(
        (position.file, position.line, position.column),
        ("/tmp/clang-tokenizer-fixtures/widget.h", 4, 9)
    );
    assert_eq!(definition.referenced().map(|c| c.kind()), Some(CursorKind::MacroDefinition));
    assert!(definition.children().next().is_none());
}

const USING_SHADOW: &str = r#"{
    "id": "0x1", "kind": "TranslationUnitDecl", "loc": {}, "range": {"begin": {}, "end": {}},
    "inner": [
        {"id": "0x10", "kind": "FunctionDecl", "name": "swap",
         "loc": {"offset": 5, "file": "/tmp/clang-tokenizer-fixtures/widget.h", "line": 1, "col": 6, "tokLen": 4},
         "range": {"begin": {"offset": 0, "line": 1, "col": 1, "tokLen": 4}, "end": {"offset": 20, "line": 1, "col": 21, "tokLen": 1}}},
        {"id": "0x11", "kind": "UsingDecl", "name": "lib::swap",
         "loc": {"offset": 11, "file": "/tmp/clang-tokenizer-fixtures/main.cpp", "line": 1, "col": 12, "tokLen": 4},
         "range": {"begin": {"offset": 0, "line": 1, "col": 1, "tokLen": 5}, "end": {"offset": 11, "line": 1, "col": 12, "tokLen": 4}}},
        {"id": "0x12", "kind": "UsingShadowDecl", "name": "swap", "isImplicit": true,
         "loc": {"offset": 11, "line": 1, "col": 12, "tokLen": 4},
         "range": {"begin": {"offset": 11, "line": 1, "col": 12, "tokLen": 4}, "end": {"offset": 11, "line": 1, "col": 12, "tokLen": 4}},
         "target": {"id": "0x10", "kind": "FunctionDecl", "name": "swap"}},
        {"id": "0x20", "kind": "UnresolvedLookupExpr", "name": "swap",
         "range": {"begin": {"offset": 20, "line": 2, "col": 3, "tokLen": 4}, "end": {"offset": 20, "line": 2, "col": 3, "tokLen": 4}},
         "lookups": [{"id": "0x12", "kind": "UsingShadowDecl", "name": "swap"}]},
        {"id": "0x21", "kind": "UnresolvedLookupExpr", "name": "swap",
         "range": {"begin": {"offset": 40, "line": 3, "col": 3, "tokLen": 4}, "end": {"offset": 40, "line": 3, "col": 3, "tokLen": 4}},
         "lookups": [{"id": "0x99", "kind": "UsingShadowDecl", "name": "swap"}]}
    ]
}"#;

#[test]
fn overload_candidates_resolve_through_using_shadows() {
    let tu = load(USING_SHADOW, "", None);

    let top: Vec<_> = tu.cursor().children().map(|c| c.kind()).collect();
    assert_eq!(
        top,
        vec![CursorKind::FunctionDecl, CursorKind::UsingDeclaration, CursorKind::DeclRefExpr, CursorKind::DeclRefExpr]
    );

    for lookup in tu.cursor().children().filter(|c| c.kind() == CursorKind::DeclRefExpr) {
        let candidate = lookup.referenced().and_then(|set| set.overloaded_decl(0)).unwrap();
        assert_eq!(candidate.kind(), CursorKind::FunctionDecl);
        assert_eq!(candidate.spelling(), "swap");
    }
}
