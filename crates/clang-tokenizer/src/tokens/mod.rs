//! Highlighting tokens: the cursors of a translation unit that lie in its
//! main file, each classified into a [`TokenCategory`].

mod category;
mod classify;
mod dump;
mod walker;

use serde::Serialize;

pub use self::{
    category::TokenCategory,
    classify::classify,
    dump::{dump_line, dump_tokens},
    walker::collect_tokens,
};
use crate::ast::{Cursor, SourcePosition};

/// An accepted cursor. Borrows the translation unit it came from.
#[derive(Debug, Clone, Copy)]
pub struct Token<'tu> {
    cursor: Cursor<'tu>,
    position: SourcePosition<'tu>,
}

impl<'tu> Token<'tu> {
    pub(crate) fn new(
        cursor: Cursor<'tu>,
        position: SourcePosition<'tu>,
    ) -> Self {
        Self {
            cursor,
            position,
        }
    }

    pub fn cursor(&self) -> Cursor<'tu> {
        self.cursor
    }

    pub fn category(&self) -> TokenCategory {
        classify(&self.cursor)
    }

    pub fn category_id(&self) -> u32 {
        self.category().id()
    }

    /// The referenced declaration's spelling, else the cursor's own.
    pub fn name(&self) -> &'tu str {
        match self.cursor.referenced() {
            Some(referenced) => referenced.spelling(),
            None => self.cursor.spelling(),
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn length(&self) -> u32 {
        self.position.length
    }

    pub fn to_record(&self) -> TokenRecord {
        let category = self.category();
        TokenRecord {
            line: self.line(),
            column: self.column(),
            length: self.length(),
            name: self.name().to_owned(),
            category,
            category_id: category.id(),
        }
    }
}

/// Owned snapshot of a [`Token`], usable after the translation unit is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub name: String,
    pub category: TokenCategory,
    pub category_id: u32,
}

#[cfg(test)]
#[path = "../../tests/src/tokens/tokens_tests.rs"]
mod tests;
