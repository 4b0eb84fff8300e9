use once_cell::sync::Lazy;
use regex::Regex;

static DIAGNOSTIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?):(\d+):(\d+):\s*(fatal error|error|warning|note|remark):\s*(.*)$").expect("valid diagnostic regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Note,
    Remark,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal error",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Remark => "remark",
        }
    }
}

/// A diagnostic reported by the compiler front-end while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file.as_deref().unwrap_or("<unknown>"),
            self.line,
            self.column,
            self.severity.as_str(),
            self.message
        )
    }
}

/// Parse the front-end's stderr into diagnostics. Lines that are not
/// `file:line:column: severity: message` (source excerpts, carets,
/// include stacks) are ignored.
pub(crate) fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    output.lines().filter_map(parse_diagnostic_line).collect()
}

fn parse_diagnostic_line(line: &str) -> Option<Diagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line)?;

    let file = caps.get(1).map(|m| m.as_str().to_owned()).filter(|f| !f.is_empty());
    let line_num: u32 = caps.get(2)?.as_str().parse().ok()?;
    let column: u32 = caps.get(3)?.as_str().parse().ok()?;
    let severity = match caps.get(4)?.as_str() {
        "fatal error" => Severity::Fatal,
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        "note" => Severity::Note,
        _ => Severity::Remark,
    };
    let message = caps.get(5)?.as_str().to_string();

    Some(Diagnostic {
        file,
        line: line_num,
        column,
        severity,
        message,
    })
}

#[cfg(test)]
#[path = "../../tests/src/frontend/diagnostics_tests.rs"]
mod tests;
