use super::TokenCategory;
use crate::ast::{Cursor, CursorKind};

/// Classify a cursor into exactly one category.
///
/// A cursor that references a declaration takes the category of that
/// declaration. An unresolved overload set (whether referenced or the cursor
/// itself) takes the category of its first candidate; candidates are never
/// ranked against the call's argument types.
pub fn classify(cursor: &Cursor<'_>) -> TokenCategory {
    let kind = match cursor.referenced() {
        Some(referenced) => first_overload_kind(&referenced).unwrap_or(referenced.kind()),
        None => first_overload_kind(cursor).unwrap_or(cursor.kind()),
    };
    TokenCategory::from_cursor_kind(kind)
}

fn first_overload_kind(cursor: &Cursor<'_>) -> Option<CursorKind> {
    if cursor.kind() != CursorKind::OverloadedDeclRef || cursor.num_overloaded_decls() == 0 {
        return None;
    }
    cursor.overloaded_decl(0).map(|candidate| candidate.kind())
}
