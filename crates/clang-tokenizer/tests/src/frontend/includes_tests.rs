use super::*;

fn existing_dir() -> PathBuf {
    std::env::temp_dir().canonicalize().unwrap()
}

#[test]
fn reads_paths_between_markers() {
    let dir = existing_dir();
    let output = format!(
        "ignoring nonexistent directory \"/nope\"\n\
         #include \"...\" search starts here:\n\
         #include <...> search starts here:\n \
         {dir}\n \
         /definitely/not/a/real/include/dir\n\
         End of search list.\n \
         /after/the/end\n",
        dir = dir.display()
    );

    assert_eq!(parse_include_search_paths(&output), vec![dir]);
}

#[test]
fn strips_framework_annotation_and_dedupes() {
    let dir = existing_dir();
    let output = format!(
        "#include <...> search starts here:\n {d} (framework directory)\n {d}\nEnd of search list.\n",
        d = dir.display()
    );

    assert_eq!(parse_include_search_paths(&output), vec![dir]);
}

#[test]
fn missing_markers_yield_no_paths() {
    assert!(parse_include_search_paths("gcc version 13.2.0\n").is_empty());
}

#[test]
fn baseline_args_prefix_language_and_standard() {
    let args = baseline_args("c++14", &[PathBuf::from("/usr/include/c++/13"), PathBuf::from("/usr/include")]);
    assert_eq!(args, vec!["-x", "c++", "-std=c++14", "-I/usr/include/c++/13", "-I/usr/include"]);
}

#[test]
fn unknown_compiler_fails_discovery() {
    let err = discover_system_includes("clang-tokenizer-no-such-compiler").unwrap_err();
    assert!(matches!(err, TokenizeError::IncludeDiscovery { .. }));
}
