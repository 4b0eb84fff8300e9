//! Tokenizer configuration.
//!
//! Settings are split into one file per category. [`TokenizerSettings`]
//! aggregates them and applies the patch read from a `clang-tokenizer.toml`
//! file. Keys are kebab-case.

pub(crate) mod compiler;
pub(crate) mod logging;

use std::path::{Path, PathBuf};

use compiler::CompilerSettingsPatch;
pub use compiler::{CompilerSettings, DEFAULT_FRONTEND, DEFAULT_STANDARD, DEFAULT_SYSTEM_COMPILER};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use serde::Deserialize;

use crate::error::TokenizeError;

pub const CONFIG_FILENAME: &str = "clang-tokenizer.toml";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenizerSettings {
    pub compiler: CompilerSettings,
    pub logging: LoggingSettings,
}

impl TokenizerSettings {
    /// Parse the contents of a `clang-tokenizer.toml` file on top of the
    /// defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let patch: TokenizerSettingsPatch = toml::from_str(content)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, TokenizeError> {
        let content = std::fs::read_to_string(path).map_err(|e| TokenizeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| TokenizeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Settings for a run rooted at `start`: the explicit file if given,
    /// else the nearest `clang-tokenizer.toml` above `start`, else defaults.
    pub fn load(
        explicit: Option<&Path>,
        start: &Path,
    ) -> Result<Self, TokenizeError> {
        match explicit.map(Path::to_path_buf).or_else(|| find_config_file(start)) {
            Some(path) => Self::from_toml_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn apply_patch(
        &mut self,
        patch: TokenizerSettingsPatch,
    ) {
        if let Some(p) = patch.compiler {
            self.compiler.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.compiler.normalize();
    }
}

/// Walks parent directories from `start` looking for `clang-tokenizer.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct TokenizerSettingsPatch {
    compiler: Option<CompilerSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
}

#[cfg(test)]
#[path = "../../tests/src/config/config_tests.rs"]
mod tests;
