use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use super::diagnostics::{Diagnostic, parse_diagnostics};
use crate::{ast::MacroTable, config::CompilerSettings, error::TokenizeError};

/// Output of one front-end run over a file.
pub struct ParsedUnit {
    /// The JSON AST dump.
    pub ast_json: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Macros defined outside the file, when the preprocessing record was
    /// requested.
    pub macro_table: Option<MacroTable>,
}

/// Drives the Clang compiler driver as the parsing front-end.
#[derive(Debug, Clone)]
pub struct ClangFrontend {
    program: String,
    detailed_preprocessing_record: bool,
}

impl ClangFrontend {
    pub fn new(
        program: impl Into<String>,
        detailed_preprocessing_record: bool,
    ) -> Self {
        Self {
            program: program.into(),
            detailed_preprocessing_record,
        }
    }

    pub fn from_settings(settings: &CompilerSettings) -> Self {
        Self::new(settings.frontend.clone(), settings.detailed_preprocessing_record)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Parse `path` with `args`, resolving relative paths against
    /// `working_directory`.
    ///
    /// A non-zero exit status is not a failure as long as an AST came out:
    /// Clang still dumps whatever it managed to build after syntax errors.
    pub fn parse(
        &self,
        path: &Path,
        args: &[String],
        working_directory: &Path,
    ) -> Result<ParsedUnit, TokenizeError> {
        let mut command = self.command(args, working_directory);
        command.args(["-Xclang", "-ast-dump=json", "-fsyntax-only", "-fno-color-diagnostics"]).arg(path);

        debug!("AST dump: {command:?}");

        let output = command.output().map_err(|source| TokenizeError::FrontendSpawn {
            program: self.program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = parse_diagnostics(&stderr);
        if !output.status.success() {
            debug!("[ast-dump] exited with {} (partial AST may still be usable)", output.status);
        }

        let ast_json = String::from_utf8_lossy(&output.stdout).into_owned();
        if !ast_json.trim_start().starts_with('{') {
            for line in stderr.lines().filter(|line| line.contains("error:")) {
                warn!("[ast-dump] {line}");
            }
            return Err(TokenizeError::NoAst {
                path: path.to_path_buf(),
            });
        }

        debug!("[ast-dump] produced {} bytes of JSON for {}", ast_json.len(), path.display());

        let macro_table = if self.detailed_preprocessing_record {
            Some(self.query_macro_table(path, args, working_directory).unwrap_or_default())
        } else {
            None
        };

        Ok(ParsedUnit {
            ast_json,
            diagnostics,
            macro_table,
        })
    }

    /// Preprocess `path` with `-E -dD` and collect the macros defined by
    /// the compiler, the command line and included files.
    fn query_macro_table(
        &self,
        path: &Path,
        args: &[String],
        working_directory: &Path,
    ) -> Option<MacroTable> {
        let mut command = self.command(args, working_directory);
        command.args(["-E", "-dD"]).arg(path);

        debug!("Macro table: {command:?}");

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to query macro table: {e}");
                return None;
            },
        };
        if !output.status.success() {
            warn!("Macro table query for {} exited with {}", path.display(), output.status);
        }

        let table = MacroTable::parse(&String::from_utf8_lossy(&output.stdout));
        debug!("[macro-table] {} external macros for {}", table.len(), path.display());
        Some(table)
    }

    fn command(
        &self,
        args: &[String],
        working_directory: &Path,
    ) -> Command {
        let mut command = Command::new(&self.program);
        command.args(args).arg(format!("-working-directory={}", working_directory.display())).stdin(Stdio::null());
        if working_directory.is_dir() {
            command.current_dir(working_directory);
        }
        command
    }
}

#[cfg(test)]
#[path = "../../tests/src/frontend/compiler_tests.rs"]
mod tests;
