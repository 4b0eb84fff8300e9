use super::*;

#[test]
fn parses_clang_stderr() {
    let stderr = concat!(
        "In file included from /src/main.cpp:1:\n",
        "/src/widget.h:3:10: warning: unused variable 'x' [-Wunused-variable]\n",
        "    int x;\n",
        "        ^\n",
        "/src/main.cpp:7:5: error: use of undeclared identifier 'frob'\n",
        "/src/main.cpp:9:1: fatal error: 'missing.h' file not found\n",
        "3 errors generated.\n",
    );

    let diagnostics = parse_diagnostics(stderr);
    assert_eq!(diagnostics.len(), 3);

    assert_eq!(diagnostics[0].file.as_deref(), Some("/src/widget.h"));
    assert_eq!((diagnostics[0].line, diagnostics[0].column), (3, 10));
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].message, "unused variable 'x' [-Wunused-variable]");

    assert_eq!(diagnostics[1].severity, Severity::Error);
    assert_eq!(diagnostics[2].severity, Severity::Fatal);
}

#[test]
fn display_matches_compiler_format() {
    let diagnostic = Diagnostic {
        file: Some("/src/main.cpp".to_owned()),
        line: 7,
        column: 5,
        severity: Severity::Error,
        message: "expected ';' after expression".to_owned(),
    };
    assert_eq!(diagnostic.to_string(), "/src/main.cpp:7:5: error: expected ';' after expression");
}

#[test]
fn ignores_non_diagnostic_lines() {
    assert!(parse_diagnostics("clang version 17.0.6\nTarget: x86_64-pc-linux-gnu\n").is_empty());
}
