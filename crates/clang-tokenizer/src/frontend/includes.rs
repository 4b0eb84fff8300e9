use std::{
    collections::HashSet,
    path::PathBuf,
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use crate::error::TokenizeError;

const SEARCH_LIST_START: &str = "#include <...> search starts here:";
const SEARCH_LIST_END: &str = "End of search list.";

/// Ask the system compiler for its default `#include <...>` search paths.
///
/// Runs `<compiler> -v -E -x c++ -` on empty input and reads the search list
/// it prints. Failing to run the compiler at all is fatal; a run that
/// reports no paths only logs a warning.
pub fn discover_system_includes(compiler: &str) -> Result<Vec<PathBuf>, TokenizeError> {
    let output = Command::new(compiler)
        .args(["-v", "-E", "-x", "c++", "-"])
        .stdin(Stdio::null())
        .output()
        .map_err(|source| TokenizeError::IncludeDiscovery {
            compiler: compiler.to_owned(),
            source,
        })?;

    // Toolchains differ in which stream carries the search list, so parse
    // both.
    let discovery_output =
        format!("{}\n{}", String::from_utf8_lossy(&output.stderr), String::from_utf8_lossy(&output.stdout));
    let paths = parse_include_search_paths(&discovery_output);

    if paths.is_empty() {
        warn!("No system include paths found in `{compiler} -v` output");
    } else {
        debug!("Discovered system include paths: {:?}", paths);
    }

    Ok(paths)
}

/// Arguments every parse starts with: the language, the dialect and one
/// `-I` per system include path.
pub fn baseline_args(
    standard: &str,
    system_include_paths: &[PathBuf],
) -> Vec<String> {
    let mut args = vec!["-x".to_string(), "c++".to_string(), format!("-std={standard}")];
    args.extend(system_include_paths.iter().map(|path| format!("-I{}", path.display())));
    args
}

pub(crate) fn parse_include_search_paths(raw_output: &str) -> Vec<PathBuf> {
    let mut parsing_includes = false;
    let mut discovered_paths = Vec::new();

    for line in raw_output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(SEARCH_LIST_START) {
            parsing_includes = true;
            continue;
        }
        if !parsing_includes {
            continue;
        }
        if trimmed.starts_with(SEARCH_LIST_END) {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        // Clang may annotate framework roots as " (framework directory)".
        let path_text = trimmed.trim_end_matches(" (framework directory)").trim_matches('"');
        if let Some(path) = normalize_existing_path(PathBuf::from(path_text)) {
            discovered_paths.push(path);
        }
    }

    dedupe_paths(discovered_paths)
}

fn normalize_existing_path(path: PathBuf) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }
    Some(path.canonicalize().unwrap_or(path))
}

fn dedupe_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for path in paths {
        if seen.insert(path.clone()) {
            deduped.push(path);
        }
    }
    deduped
}

#[cfg(test)]
#[path = "../../tests/src/frontend/includes_tests.rs"]
mod tests;
