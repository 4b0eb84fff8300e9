//! Translation unit and cursor facade over Clang's JSON AST.

mod clang_nodes;
mod cursor;
mod file_filter;
mod kind;
mod preprocessor;

use std::collections::HashMap;

use clang_ast::Id;
use serde::Deserialize;
use tracing::debug;

pub use clang_nodes::{BareDecl, Clang, Node};
pub use cursor::{ChildVisit, Cursor, SourcePosition};
pub(crate) use file_filter::FileFilter;
pub use kind::CursorKind;
pub use preprocessor::{
    ExternalMacro, MacroEntity, MacroEntityKind, MacroOrigin, MacroRef, MacroTable, PreprocessingRecord,
};

use crate::{
    error::TokenizeError,
    frontend::Diagnostic,
    tokens::{Token, collect_tokens},
};

/// A declaration reachable by node id, recorded from anywhere in the AST
/// (main file, headers and template instantiations alike).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclEntry {
    pub kind: CursorKind,
    pub name: String,
}

/// The parsed representation of one source file plus everything it
/// includes.
///
/// Cursors and tokens borrow the translation unit, so none of them can
/// outlive it.
pub struct TranslationUnit {
    main_file: String,
    root: Node,
    decls: HashMap<Id, DeclEntry>,
    preprocessing: PreprocessingRecord,
    diagnostics: Vec<Diagnostic>,
}

impl TranslationUnit {
    /// Decode a JSON AST dump.
    ///
    /// `source` is the text of `main_file`; it is scanned for macro
    /// definitions and expansions when `macro_table` is given.
    ///
    /// Nesting depth is unbounded: long expression chains nest one level per
    /// operator, so decoding grows its stack on the heap as needed.
    pub fn from_ast_json(
        main_file: impl Into<String>,
        ast_json: &str,
        source: &str,
        macro_table: Option<&MacroTable>,
    ) -> Result<Self, TokenizeError> {
        let mut deserializer = serde_json::Deserializer::from_str(ast_json);
        deserializer.disable_recursion_limit();
        let root = Node::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(Self::from_node(main_file, root, source, macro_table))
    }

    pub fn from_node(
        main_file: impl Into<String>,
        root: Node,
        source: &str,
        macro_table: Option<&MacroTable>,
    ) -> Self {
        let decls = index_decls(&root);
        let preprocessing = macro_table.map(|table| preprocessor::scan_macros(source, table)).unwrap_or_default();
        let main_file = main_file.into();

        debug!(
            "[tu] {main_file}: {} indexed declarations, {} preprocessing entities",
            decls.len(),
            preprocessing.entities.len()
        );

        Self {
            main_file,
            root,
            decls,
            preprocessing,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(
        mut self,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Path of the file this unit was parsed from.
    pub fn spelling(&self) -> &str {
        &self.main_file
    }

    /// The translation-unit cursor: the root of every traversal.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::translation_unit(self)
    }

    /// Every cursor located in the main file, in document order.
    pub fn tokens(&self) -> Vec<Token<'_>> {
        collect_tokens(self)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Macro definitions and expansions in the main file, in order.
    pub fn macros(&self) -> &[MacroEntity] {
        &self.preprocessing.entities
    }

    /// Header definitions that expansions in the main file resolve to.
    pub fn external_macros(&self) -> &[ExternalMacro] {
        &self.preprocessing.external
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn decl(
        &self,
        id: Id,
    ) -> Option<&DeclEntry> {
        self.decls.get(&id)
    }
}

fn index_decls(root: &Node) -> HashMap<Id, DeclEntry> {
    let mut decls = HashMap::new();
    let mut shadows = Vec::new();
    let mut overload_sets = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match &node.kind {
            Clang::UsingShadowDecl(data) => shadows.push((node, data.target.as_ref())),
            Clang::UnresolvedLookupExpr(data) | Clang::UnresolvedMemberExpr(data) => {
                overload_sets.push(&data.lookups);
            },
            _ => {},
        }
        let kind = CursorKind::of_node(&node.kind);
        if kind.is_declaration() {
            decls.insert(
                node.id,
                DeclEntry {
                    kind,
                    name: cursor::decl_spelling(&node.kind).to_owned(),
                },
            );
        }
        stack.extend(node.inner.iter().rev());
    }

    // A shadow stands for the declaration it brings into scope.
    for (shadow, target) in shadows {
        let Some(target) = target else {
            continue;
        };
        let kind = decls
            .get(&target.id)
            .map(|entry| entry.kind)
            .unwrap_or_else(|| CursorKind::from_clang_kind(target.kind.as_deref().unwrap_or_default()));
        decls.insert(
            shadow.id,
            DeclEntry {
                kind,
                name: cursor::decl_spelling(&shadow.kind).to_owned(),
            },
        );
    }

    // Block-scope using-declarations never dump their shadows. Overload sets
    // only ever name functions, so such a candidate is one.
    for candidate in overload_sets.into_iter().flatten() {
        if candidate.kind.as_deref() == Some("UsingShadowDecl") && !decls.contains_key(&candidate.id) {
            decls.insert(
                candidate.id,
                DeclEntry {
                    kind: CursorKind::FunctionDecl,
                    name: candidate.name.clone().unwrap_or_default(),
                },
            );
        }
    }

    decls
}

#[cfg(test)]
#[path = "../../tests/src/ast/cursor_tests.rs"]
mod tests;
