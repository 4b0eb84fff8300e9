use super::Token;
use crate::ast::{ChildVisit, FileFilter, TranslationUnit};

/// Collect every cursor physically located in the translation unit's main
/// file, in document order.
///
/// A cursor located elsewhere (an included header, a builtin) is skipped
/// together with its whole subtree. The translation-unit cursor itself is
/// never a token.
pub fn collect_tokens(tu: &TranslationUnit) -> Vec<Token<'_>> {
    let mut filter = FileFilter::new(tu.spelling());
    let mut tokens = Vec::new();

    tu.cursor().visit_children(|child, _parent| match child.location() {
        Some(position) if filter.matches(position.file) => {
            tokens.push(Token::new(child, position));
            ChildVisit::Recurse
        },
        _ => ChildVisit::Continue,
    });

    tokens
}
