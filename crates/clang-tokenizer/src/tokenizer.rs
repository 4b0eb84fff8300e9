use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    ast::TranslationUnit,
    config::CompilerSettings,
    error::TokenizeError,
    frontend::{ClangFrontend, baseline_args, discover_system_includes},
};

/// Parses C++ files into translation units ready to be tokenized.
///
/// Construction queries the system compiler for its include paths once;
/// every later parse reuses the resulting baseline arguments.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    frontend: ClangFrontend,
    default_args: Vec<String>,
}

impl Tokenizer {
    pub fn new(settings: &CompilerSettings) -> Result<Self, TokenizeError> {
        let system_includes = discover_system_includes(&settings.system_compiler)?;
        let mut default_args = baseline_args(&settings.standard, &system_includes);
        default_args.extend(settings.extra_args.iter().cloned());
        Ok(Self::with_default_args(ClangFrontend::from_settings(settings), default_args))
    }

    /// A tokenizer with a fixed baseline, skipping include discovery.
    pub fn with_default_args(
        frontend: ClangFrontend,
        default_args: Vec<String>,
    ) -> Self {
        Self {
            frontend,
            default_args,
        }
    }

    pub fn default_args(&self) -> &[String] {
        &self.default_args
    }

    pub fn frontend(&self) -> &ClangFrontend {
        &self.frontend
    }

    /// Parse `filename` with the baseline arguments followed by
    /// `compiler_args`. Relative paths in the arguments resolve against
    /// `project_root`.
    ///
    /// Parse diagnostics are logged and kept on the translation unit; they
    /// never fail the call.
    pub fn parse(
        &self,
        filename: &Path,
        compiler_args: &[String],
        project_root: &Path,
    ) -> Result<TranslationUnit, TokenizeError> {
        info!("Filename = {}", filename.display());
        info!("Default args = {:?}", self.default_args);
        info!("User-provided compiler args = {:?}", compiler_args);
        info!("Compiler working-directory = {}", project_root.display());

        let filename = resolve_filename(filename, project_root);
        let source = read_source(&filename)?;

        let mut args = self.default_args.clone();
        args.extend(compiler_args.iter().cloned());
        let parsed = self.frontend.parse(&filename, &args, project_root)?;

        for diagnostic in &parsed.diagnostics {
            info!("Parsing error: {diagnostic}");
        }

        let tu = TranslationUnit::from_ast_json(
            filename.display().to_string(),
            &parsed.ast_json,
            &source,
            parsed.macro_table.as_ref(),
        )?
        .with_diagnostics(parsed.diagnostics);

        info!("Translation unit: {}", tu.spelling());
        Ok(tu)
    }
}

/// Relative file names are taken relative to the project root, like every
/// other path handed to the front-end.
fn resolve_filename(
    filename: &Path,
    project_root: &Path,
) -> PathBuf {
    if filename.is_relative() && !project_root.as_os_str().is_empty() {
        project_root.join(filename)
    } else {
        filename.to_path_buf()
    }
}

fn read_source(filename: &Path) -> Result<String, TokenizeError> {
    if !filename.exists() {
        return Err(TokenizeError::SourceNotFound(PathBuf::from(filename)));
    }
    let bytes = std::fs::read(filename).map_err(|source| TokenizeError::SourceUnreadable {
        path: filename.to_path_buf(),
        source,
    })?;
    Ok(decode_source(&bytes))
}

/// Decode `bytes` keeping every byte offset intact: each byte of an invalid
/// sequence becomes one `?`, so columns computed on the text stay the byte
/// columns the front-end reports.
fn decode_source(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        text.extend(std::iter::repeat_n('?', chunk.invalid().len()));
    }
    text
}

#[cfg(test)]
#[path = "../tests/src/tokenizer_tests.rs"]
mod tests;
