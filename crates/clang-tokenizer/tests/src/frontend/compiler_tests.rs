use std::path::PathBuf;

use super::*;

#[test]
fn settings_select_program_and_preprocessing_record() {
    let settings = CompilerSettings {
        frontend: "clang++-17".to_owned(),
        detailed_preprocessing_record: false,
        ..CompilerSettings::default()
    };
    let frontend = ClangFrontend::from_settings(&settings);
    assert_eq!(frontend.program(), "clang++-17");
    assert!(!frontend.detailed_preprocessing_record);
}

#[test]
fn command_passes_working_directory() {
    let dir = std::env::temp_dir();
    let frontend = ClangFrontend::new("clang++", true);
    let command = frontend.command(&["-std=c++14".to_owned()], &dir);

    let args: Vec<String> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(args, vec!["-std=c++14".to_owned(), format!("-working-directory={}", dir.display())]);
    assert_eq!(command.get_current_dir(), Some(dir.as_path()));
}

#[test]
fn missing_frontend_is_a_spawn_error() {
    let frontend = ClangFrontend::new("clang-tokenizer-no-such-frontend", false);
    let err = frontend.parse(&PathBuf::from("/tmp/none.cpp"), &[], &std::env::temp_dir()).err().unwrap();
    assert!(matches!(err, TokenizeError::FrontendSpawn { .. }));
}
