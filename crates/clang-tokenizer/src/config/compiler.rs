use serde::Deserialize;

pub const DEFAULT_FRONTEND: &str = "clang++";
pub const DEFAULT_SYSTEM_COMPILER: &str = "g++";
pub const DEFAULT_STANDARD: &str = "c++14";

#[derive(Debug, Clone, PartialEq)]
pub struct CompilerSettings {
    /// Compiler driver that dumps the AST.
    pub frontend: String,
    /// Compiler queried once for its default include search paths.
    pub system_compiler: String,
    /// Value of `-std=`.
    pub standard: String,
    /// Arguments appended after the baseline on every parse.
    pub extra_args: Vec<String>,
    /// Record macro definitions and expansions of the main file.
    pub detailed_preprocessing_record: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            frontend: DEFAULT_FRONTEND.to_string(),
            system_compiler: DEFAULT_SYSTEM_COMPILER.to_string(),
            standard: DEFAULT_STANDARD.to_string(),
            extra_args: Vec::new(),
            detailed_preprocessing_record: true,
        }
    }
}

impl CompilerSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: CompilerSettingsPatch,
    ) {
        if let Some(v) = patch.frontend {
            self.frontend = v;
        }
        if let Some(v) = patch.system_compiler {
            self.system_compiler = v;
        }
        if let Some(v) = patch.standard {
            self.standard = v;
        }
        if let Some(v) = patch.extra_args {
            self.extra_args = v;
        }
        if let Some(v) = patch.detailed_preprocessing_record {
            self.detailed_preprocessing_record = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        normalize_program(&mut self.frontend, DEFAULT_FRONTEND);
        normalize_program(&mut self.system_compiler, DEFAULT_SYSTEM_COMPILER);
        normalize_program(&mut self.standard, DEFAULT_STANDARD);
        if let Some(stripped) = self.standard.strip_prefix("-std=") {
            self.standard = stripped.to_string();
        }
        self.extra_args = self.extra_args.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect();
    }
}

fn normalize_program(
    value: &mut String,
    default: &str,
) {
    let trimmed = value.trim();
    *value = if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    };
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct CompilerSettingsPatch {
    pub(crate) frontend: Option<String>,
    pub(crate) system_compiler: Option<String>,
    pub(crate) standard: Option<String>,
    pub(crate) extra_args: Option<Vec<String>>,
    pub(crate) detailed_preprocessing_record: Option<bool>,
}
