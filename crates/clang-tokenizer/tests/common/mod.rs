#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use clang_tokenizer::{Tokenizer, TokenizerSettings};

fn runs(program: &str) -> bool {
    std::process::Command::new(program).arg("--version").output().is_ok_and(|output| output.status.success())
}

/// Both the AST front-end and the include-discovery compiler are needed.
pub fn has_toolchain() -> bool {
    let settings = TokenizerSettings::default();
    runs(&settings.compiler.frontend) && runs(&settings.compiler.system_compiler)
}

pub fn tokenizer() -> Tokenizer {
    Tokenizer::new(&TokenizerSettings::default().compiler).expect("system compiler runs")
}

/// A fresh directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("clang_tokenizer_it_{}_{id}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir.canonicalize().unwrap()
}

pub fn write_file(
    dir: &PathBuf,
    name: &str,
    contents: &str,
) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
