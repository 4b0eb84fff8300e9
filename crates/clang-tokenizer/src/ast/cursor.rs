use std::borrow::Cow;

use super::{
    BareDecl, Clang, CursorKind, DeclEntry, ExternalMacro, FileFilter, MacroEntity, MacroEntityKind, MacroOrigin,
    MacroRef, Node, TranslationUnit, clang_nodes::resolve_loc,
};

/// What a child visitor wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisit {
    /// Stop the whole traversal.
    Break,
    /// Move on to the next sibling without visiting this cursor's children.
    Continue,
    /// Visit this cursor's children (depth-first) before its next sibling.
    Recurse,
}

/// A concrete position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition<'tu> {
    pub file: &'tu str,
    /// 1-based line.
    pub line: u32,
    /// 1-based byte column.
    pub column: u32,
    /// Length of the token at this position, in bytes.
    pub length: u32,
}

/// A handle to one element of a [`TranslationUnit`]: a declaration, a
/// reference, a preprocessing entity or any other syntactic construct.
#[derive(Clone, Copy)]
pub struct Cursor<'tu> {
    tu: &'tu TranslationUnit,
    target: Target<'tu>,
}

#[derive(Clone, Copy)]
enum Target<'tu> {
    TranslationUnit,
    Node(&'tu Node),
    /// The set of candidates behind an unresolved lookup.
    OverloadSet(&'tu Node),
    /// A declaration known only through the declaration index.
    Decl(&'tu DeclEntry),
    /// A declaration known only through an inline summary.
    Bare(&'tu BareDecl),
    Macro(&'tu MacroEntity),
    /// A macro definition made in an included file.
    ExternalMacro(&'tu ExternalMacro),
}

impl<'tu> Cursor<'tu> {
    pub(crate) fn translation_unit(tu: &'tu TranslationUnit) -> Self {
        Self {
            tu,
            target: Target::TranslationUnit,
        }
    }

    fn with(
        &self,
        target: Target<'tu>,
    ) -> Self {
        Self {
            tu: self.tu,
            target,
        }
    }

    pub fn kind(&self) -> CursorKind {
        match self.target {
            Target::TranslationUnit => CursorKind::TranslationUnit,
            Target::Node(node) => CursorKind::of_node(&node.kind),
            Target::OverloadSet(_) => CursorKind::OverloadedDeclRef,
            Target::Decl(decl) => decl.kind,
            Target::Bare(bare) => CursorKind::from_clang_kind(bare.kind.as_deref().unwrap_or_default()),
            Target::Macro(entity) => match entity.kind {
                MacroEntityKind::Definition => CursorKind::MacroDefinition,
                MacroEntityKind::Expansion => CursorKind::MacroExpansion,
            },
            Target::ExternalMacro(_) => CursorKind::MacroDefinition,
        }
    }

    /// Human-readable kind. Unexposed nodes report the front-end's own node
    /// kind (e.g. `ImplicitCastExpr`).
    pub fn kind_name(&self) -> Cow<'static, str> {
        if let Target::Node(node) = self.target
            && let Clang::Other {
                kind,
                ..
            } = &node.kind
        {
            return Cow::Owned(format!("{kind:?}"));
        }
        Cow::Borrowed(self.kind().as_str())
    }

    pub fn spelling(&self) -> &'tu str {
        match self.target {
            Target::TranslationUnit => self.tu.spelling(),
            Target::Node(node) | Target::OverloadSet(node) => decl_spelling(&node.kind),
            Target::Decl(decl) => &decl.name,
            Target::Bare(bare) => bare.name.as_deref().unwrap_or_default(),
            Target::Macro(entity) => &entity.name,
            Target::ExternalMacro(definition) => &definition.name,
        }
    }

    /// Where this cursor sits in the source, if anywhere.
    ///
    /// Declarations report their name location, member references the
    /// member name (the end of their range), other expressions the start of
    /// their range. Macro-expanded nodes report the expansion site.
    pub fn location(&self) -> Option<SourcePosition<'tu>> {
        match self.target {
            Target::Node(node) | Target::OverloadSet(node) => node_location(node),
            Target::Macro(entity) => Some(SourcePosition {
                file: self.tu.spelling(),
                line: entity.line,
                column: entity.column,
                length: entity.name.len() as u32,
            }),
            Target::ExternalMacro(definition) => match &definition.origin {
                MacroOrigin::Header {
                    file,
                    line,
                    column,
                } => Some(SourcePosition {
                    file: file.as_str(),
                    line: *line,
                    column: *column,
                    length: definition.name.len() as u32,
                }),
                MacroOrigin::Builtin => None,
            },
            Target::TranslationUnit | Target::Decl(_) | Target::Bare(_) => None,
        }
    }

    /// The declaration this cursor resolves to.
    ///
    /// Declarations resolve to themselves, references to the declaration
    /// they name, an unresolved lookup to its overload set and a macro
    /// expansion to the definition in effect, in the file or in a header.
    /// Builtin macros have no definition.
    pub fn referenced(&self) -> Option<Cursor<'tu>> {
        match self.target {
            Target::TranslationUnit => None,
            Target::Node(node) => match &node.kind {
                Clang::DeclRefExpr(data) => data.referenced_decl.as_ref().map(|bare| self.resolve_bare(bare)),
                Clang::MemberExpr(data) => data
                    .referenced_member_decl
                    .and_then(|id| self.tu.decl(id))
                    .map(|decl| self.with(Target::Decl(decl))),
                Clang::UnresolvedLookupExpr(_) | Clang::UnresolvedMemberExpr(_) => {
                    Some(self.with(Target::OverloadSet(node)))
                },
                kind if CursorKind::of_node(kind).is_declaration() => Some(*self),
                _ => None,
            },
            Target::OverloadSet(_) | Target::Decl(_) | Target::Bare(_) | Target::ExternalMacro(_) => Some(*self),
            Target::Macro(entity) => match entity.kind {
                MacroEntityKind::Definition => Some(*self),
                MacroEntityKind::Expansion => match entity.definition? {
                    MacroRef::InFile(idx) => self.tu.macros().get(idx).map(|d| self.with(Target::Macro(d))),
                    MacroRef::External(idx) => {
                        self.tu.external_macros().get(idx).map(|d| self.with(Target::ExternalMacro(d)))
                    },
                },
            },
        }
    }

    /// Number of candidates behind an overloaded declaration reference; zero
    /// for every other cursor.
    pub fn num_overloaded_decls(&self) -> usize {
        match self.target {
            Target::OverloadSet(node) => overload_candidates(node).len(),
            _ => 0,
        }
    }

    pub fn overloaded_decl(
        &self,
        index: usize,
    ) -> Option<Cursor<'tu>> {
        match self.target {
            Target::OverloadSet(node) => overload_candidates(node).get(index).map(|bare| self.resolve_bare(bare)),
            _ => None,
        }
    }

    /// Visit the children of this cursor.
    ///
    /// `visitor` receives each child with its parent and decides whether to
    /// stop, skip the child's subtree, or descend into it. Descending is
    /// depth-first and uses an explicit stack, so arbitrarily deep trees are
    /// fine. Returns `true` if the visitor stopped the traversal.
    pub fn visit_children<F>(
        &self,
        mut visitor: F,
    ) -> bool
    where
        F: FnMut(Cursor<'tu>, Cursor<'tu>) -> ChildVisit,
    {
        let mut stack = vec![(*self, self.child_list().into_iter())];
        loop {
            let Some((parent, children)) = stack.last_mut() else {
                return false;
            };
            let parent = *parent;
            let Some(child) = children.next() else {
                stack.pop();
                continue;
            };
            match visitor(child, parent) {
                ChildVisit::Break => return true,
                ChildVisit::Continue => {},
                ChildVisit::Recurse => stack.push((child, child.child_list().into_iter())),
            }
        }
    }

    /// Direct children of this cursor, in source order.
    pub fn children(&self) -> std::vec::IntoIter<Cursor<'tu>> {
        let mut children = Vec::new();
        self.visit_children(|child, _| {
            children.push(child);
            ChildVisit::Continue
        });
        children.into_iter()
    }

    fn resolve_bare(
        &self,
        bare: &'tu BareDecl,
    ) -> Self {
        match self.tu.decl(bare.id) {
            Some(decl) => self.with(Target::Decl(decl)),
            None => self.with(Target::Bare(bare)),
        }
    }

    fn child_list(&self) -> Vec<Cursor<'tu>> {
        let mut out = Vec::new();
        match self.target {
            Target::TranslationUnit => self.push_top_level(&mut out),
            Target::Node(node) => match &node.kind {
                Clang::ClassTemplateDecl(_) | Clang::FunctionTemplateDecl(_) | Clang::TypeAliasTemplateDecl(_) => {
                    self.push_template_children(node, &mut out);
                },
                Clang::UnresolvedLookupExpr(_) | Clang::UnresolvedMemberExpr(_) => {
                    out.push(self.with(Target::OverloadSet(node)));
                    self.push_visible(node, &mut out);
                },
                _ => self.push_visible(node, &mut out),
            },
            Target::OverloadSet(_)
            | Target::Decl(_)
            | Target::Bare(_)
            | Target::Macro(_)
            | Target::ExternalMacro(_) => {},
        }
        out
    }

    fn push_visible(
        &self,
        node: &'tu Node,
        out: &mut Vec<Cursor<'tu>>,
    ) {
        out.extend(node.inner.iter().filter(|child| !child.kind.is_implicit()).map(|child| self.with(Target::Node(child))));
    }

    /// Template parameters, then the members of the templated declaration.
    /// Instantiations dumped alongside the pattern are not children.
    fn push_template_children(
        &self,
        node: &'tu Node,
        out: &mut Vec<Cursor<'tu>>,
    ) {
        let mut templated = None;
        for child in node.inner.iter().filter(|child| !child.kind.is_implicit()) {
            let kind = CursorKind::of_node(&child.kind);
            if kind.is_template_parameter() {
                out.push(self.with(Target::Node(child)));
            } else if templated.is_none() && kind.is_declaration() {
                templated = Some(child);
            }
        }
        if let Some(templated) = templated {
            self.push_visible(templated, out);
        }
    }

    /// Top-level declarations interleaved with the main file's preprocessing
    /// entities, by position.
    fn push_top_level(
        &self,
        out: &mut Vec<Cursor<'tu>>,
    ) {
        let macros = self.tu.macros();
        let mut main_file = FileFilter::new(self.tu.spelling());
        let mut pending = macros.iter().peekable();

        for child in self.tu.root().inner.iter().filter(|child| !child.kind.is_implicit()) {
            if let Some(pos) = node_location(child)
                && main_file.matches(pos.file)
            {
                while let Some(entity) = pending.next_if(|m| (m.line, m.column) < (pos.line, pos.column)) {
                    out.push(self.with(Target::Macro(entity)));
                }
            }
            out.push(self.with(Target::Node(child)));
        }
        out.extend(pending.map(|entity| self.with(Target::Macro(entity))));
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("kind", &self.kind_name())
            .field("spelling", &self.spelling())
            .field("location", &self.location())
            .finish()
    }
}

/// Spelling of a node as a user would write it: declarations by their
/// unqualified name, references by the name they use.
pub(super) fn decl_spelling(kind: &Clang) -> &str {
    let name = kind.name().unwrap_or_default();
    match kind {
        Clang::UsingDecl(_) => name.rsplit("::").next().unwrap_or(name),
        _ => name,
    }
}

fn node_location(node: &Node) -> Option<SourcePosition<'_>> {
    let kind = &node.kind;
    let loc = match kind {
        Clang::MemberExpr(_) | Clang::UnresolvedMemberExpr(_) => kind.range().map(|r| &r.end).or(kind.loc()),
        _ => kind.loc().or(kind.range().map(|r| &r.begin)),
    }?;
    let bare = resolve_loc(loc)?;
    if bare.line == 0 || bare.file.is_empty() {
        return None;
    }
    Some(SourcePosition {
        file: &bare.file,
        line: bare.line as u32,
        column: bare.col as u32,
        length: bare.tok_len as u32,
    })
}

fn overload_candidates(node: &Node) -> &[BareDecl] {
    match &node.kind {
        Clang::UnresolvedLookupExpr(data) | Clang::UnresolvedMemberExpr(data) => &data.lookups,
        _ => &[],
    }
}
