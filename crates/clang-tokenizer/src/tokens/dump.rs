use std::fmt::Write;

use tracing::debug;

use super::Token;
use crate::ast::CursorKind;

/// One line of the token dump: `[line, col]`, the cursor's spelling and
/// kind, the first overload candidate (for overload sets) and the
/// referenced declaration, in fixed-width columns.
pub fn dump_line(token: &Token<'_>) -> String {
    let cursor = token.cursor();
    let mut line = format!("{:<12}", format!("[{}, {}]", token.line(), token.column()));
    push_column(&mut line, cursor.spelling());
    push_column(&mut line, &cursor.kind_name());

    if cursor.kind() == CursorKind::OverloadedDeclRef
        && let Some(candidate) = cursor.overloaded_decl(0)
    {
        push_column(&mut line, candidate.spelling());
        push_column(&mut line, &candidate.kind_name());
    }
    if let Some(referenced) = cursor.referenced() {
        push_column(&mut line, referenced.spelling());
        push_column(&mut line, &referenced.kind_name());
    }

    line
}

/// Log the dump of every token at debug level.
pub fn dump_tokens(tokens: &[Token<'_>]) {
    for token in tokens {
        debug!("{}", dump_line(token));
    }
}

fn push_column(
    line: &mut String,
    text: &str,
) {
    let _ = write!(line, "{text:<40} ");
}
