use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a tokenization run.
///
/// Parse diagnostics are not errors: they are logged and the walk proceeds
/// over whatever AST the front-end produced. Unknown node kinds are not
/// errors either; they classify as [`TokenCategory::Unsupported`].
///
/// [`TokenCategory::Unsupported`]: crate::tokens::TokenCategory::Unsupported
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("failed to query default include paths from `{compiler}`: {source}")]
    IncludeDiscovery {
        compiler: String,
        #[source]
        source: std::io::Error,
    },

    #[error("source file {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to read source file {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run compiler front-end `{program}`: {source}")]
    FrontendSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler front-end produced no AST for {}", path.display())]
    NoAst { path: PathBuf },

    #[error("failed to decode AST JSON: {0}")]
    AstDecode(#[from] serde_json::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to load configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}
