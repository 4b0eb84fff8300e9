//! The external compiler front-end: Clang's JSON AST dump, its diagnostics,
//! and the system compiler's default include paths.

mod compiler;
mod diagnostics;
mod includes;

pub use compiler::{ClangFrontend, ParsedUnit};
pub use diagnostics::{Diagnostic, Severity};
pub use includes::{baseline_args, discover_system_includes};
