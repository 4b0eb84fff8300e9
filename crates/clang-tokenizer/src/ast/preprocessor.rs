//! Preprocessing record for the main file.
//!
//! Clang's JSON AST carries no macro information, so definitions and
//! expansions are recovered by lexing the main file against the macro
//! definitions reported by the front-end (`-E -dD`). Line markers in that
//! output tell builtins from header macros and say at which main-file line a
//! header's definitions come into effect.

use std::{collections::HashMap, ops::Range};

use logos::{Lexer, Logos};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_pos::LineIndex;

static DEFINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#\s*define\s+([A-Za-z_][A-Za-z0-9_]*)(\()?").expect("valid macro regex"));

static UNDEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#\s*undef\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid undef regex"));

static LINE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#\s*(\d+)\s+"((?:[^"\\]|\\.)*)""#).expect("valid line marker regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroEntityKind {
    Definition,
    Expansion,
}

/// The definition an expansion resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroRef {
    /// Index into the main file's entities.
    InFile(usize),
    /// Index into the header definitions of the record.
    External(usize),
}

/// A macro definition or expansion physically located in the main file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroEntity {
    pub kind: MacroEntityKind,
    pub name: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based byte column.
    pub column: u32,
    /// For expansions: the definition in effect, unless the macro is a
    /// builtin.
    pub definition: Option<MacroRef>,
}

/// Where a macro defined outside the main file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroOrigin {
    /// Predefined by the compiler or on the command line.
    Builtin,
    /// Defined in an included file, at the position the preprocessor printed.
    Header { file: String, line: u32, column: u32 },
}

/// One definition of a macro made outside the main file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalMacro {
    pub name: String,
    pub function_like: bool,
    pub origin: MacroOrigin,
    /// Last main-file line before the definition took effect (0 for
    /// builtins and forced includes).
    pub active_after: u32,
    /// Last main-file line on which the definition was still in effect.
    pub undefined_after: Option<u32>,
}

impl ExternalMacro {
    pub fn builtin(
        name: impl Into<String>,
        function_like: bool,
    ) -> Self {
        Self {
            name: name.into(),
            function_like,
            origin: MacroOrigin::Builtin,
            active_after: 0,
            undefined_after: None,
        }
    }

    fn is_active_on(
        &self,
        line: u32,
    ) -> bool {
        self.active_after < line && self.undefined_after.is_none_or(|last| line <= last)
    }
}

/// Macro definitions made outside the main file, keyed by name.
///
/// Definitions inside the main file are never part of the table; the
/// scanner sees them in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    macros: HashMap<String, Vec<ExternalMacro>>,
}

impl MacroTable {
    /// Parse preprocessor output carrying `#define`/`#undef` lines.
    ///
    /// With line markers (`-E -dD`), the first marked file is the main file
    /// and its own directives are skipped. Without them (`-E -dM`), every
    /// definition counts as a builtin.
    pub fn parse(output: &str) -> Self {
        let mut table = Self::default();
        let mut main_file: Option<String> = None;
        let mut current: Option<String> = None;
        let mut next_line = 1u32;
        let mut main_next_line = 1u32;

        for text in output.lines() {
            if let Some(caps) = LINE_MARKER_RE.captures(text) {
                let number = caps[1].parse().unwrap_or(1);
                let file = unescape_marker_file(&caps[2]);
                if main_file.is_none() {
                    main_file = Some(file.clone());
                }
                if main_file.as_ref() == Some(&file) {
                    main_next_line = number;
                }
                next_line = number;
                current = Some(file);
                continue;
            }

            let line = next_line;
            next_line += 1;
            if current.is_some() && current == main_file {
                main_next_line += 1;
                continue;
            }

            let active_after = main_next_line.saturating_sub(1);
            if let Some(caps) = DEFINE_RE.captures(text)
                && let Some(name) = caps.get(1)
            {
                let origin = match current.as_deref() {
                    Some(file) if !file.starts_with('<') => MacroOrigin::Header {
                        file: file.to_owned(),
                        line,
                        column: name.start() as u32 + 1,
                    },
                    _ => MacroOrigin::Builtin,
                };
                table.define(ExternalMacro {
                    name: name.as_str().to_owned(),
                    function_like: caps.get(2).is_some(),
                    active_after: match origin {
                        MacroOrigin::Builtin => 0,
                        MacroOrigin::Header {
                            ..
                        } => active_after,
                    },
                    origin,
                    undefined_after: None,
                });
            } else if let Some(caps) = UNDEF_RE.captures(text) {
                table.undefine(&caps[1], active_after);
            }
        }
        table
    }

    /// Record a builtin macro.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        function_like: bool,
    ) {
        self.define(ExternalMacro::builtin(name, function_like));
    }

    pub fn define(
        &mut self,
        definition: ExternalMacro,
    ) {
        self.macros.entry(definition.name.clone()).or_default().push(definition);
    }

    /// End the latest definition of `name` after main-file line `last_line`.
    pub fn undefine(
        &mut self,
        name: &str,
        last_line: u32,
    ) {
        if let Some(definition) =
            self.macros.get_mut(name).and_then(|defs| defs.iter_mut().rev().find(|d| d.undefined_after.is_none()))
        {
            definition.undefined_after = Some(last_line);
        }
    }

    /// The definition of `name` in effect on main-file `line`.
    pub fn lookup(
        &self,
        name: &str,
        line: u32,
    ) -> Option<&ExternalMacro> {
        self.lookup_indexed(name, line).map(|(_, definition)| definition)
    }

    fn lookup_indexed(
        &self,
        name: &str,
        line: u32,
    ) -> Option<(usize, &ExternalMacro)> {
        self.macros.get(name)?.iter().enumerate().rev().find(|(_, d)| d.is_active_on(line))
    }

    /// `Some(true)` for a function-like macro, `Some(false)` for an
    /// object-like one, `None` if `name` was never defined outside the main
    /// file. Reports the latest definition.
    pub fn is_function_like(
        &self,
        name: &str,
    ) -> Option<bool> {
        self.macros.get(name)?.last().map(|d| d.function_like)
    }

    /// Number of distinct macro names.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

fn unescape_marker_file(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(escaped) = chars.next()
        {
            out.push(escaped);
        } else {
            out.push(c);
        }
    }
    out
}

/// Macro entities of the main file plus the header definitions its
/// expansions resolve to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessingRecord {
    pub entities: Vec<MacroEntity>,
    pub external: Vec<ExternalMacro>,
}

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = ())]
enum PpToken {
    #[regex(r"[ \t\f\r]+")]
    Whitespace,

    #[regex(r"\\\r?\n")]
    LineContinuation,

    #[token("\n")]
    Newline,

    #[regex(r"//.*", allow_greedy = true)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r#"(u8|u|U|L)?R""#, raw_string)]
    RawString,

    #[regex(r#""([^"\\\n]|\\[\s\S])*""#)]
    String,

    #[regex(r#"'([^'\\\n]|\\[\s\S])*'"#)]
    Char,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]([0-9A-Za-z_.]|'[0-9A-Za-z_])*")]
    Number,

    #[token("#")]
    Hash,

    #[token("(")]
    LParen,
}

/// Consume the rest of `R"delim( ... )delim"`. An unterminated literal runs
/// to the end of the file.
fn raw_string(lex: &mut Lexer<PpToken>) -> bool {
    let rest = lex.remainder();
    let Some(open) = rest.find('(') else {
        return false;
    };
    let delimiter = &rest[..open];
    if delimiter.len() > 16 || delimiter.contains(|c: char| c.is_whitespace() || matches!(c, ')' | '\\' | '"')) {
        return false;
    }
    let closing = format!("){delimiter}\"");
    let body = open + 1;
    let consumed = rest[body..].find(&closing).map_or(rest.len(), |end| body + end + closing.len());
    lex.bump(consumed);
    true
}

type Lexed = (Result<PpToken, ()>, Range<usize>);

fn is_trivia(token: &Result<PpToken, ()>) -> bool {
    matches!(token, Ok(PpToken::Whitespace | PpToken::LineContinuation | PpToken::Comment))
}

/// Scan `source` for macro definitions and expansions.
///
/// Identifiers inside directives, comments and literals are never
/// expansions. A function-like macro only expands when its name is followed
/// by `(`. A name counts as a macro from its in-file `#define` on, or while a
/// definition from `table` is in effect and no in-file `#undef` hides it.
pub(crate) fn scan_macros(
    source: &str,
    table: &MacroTable,
) -> PreprocessingRecord {
    let tokens: Vec<Lexed> = PpToken::lexer(source).spanned().collect();
    let mut scanner = Scanner {
        source,
        table,
        line_index: LineIndex::new(source),
        tokens: &tokens,
        record: PreprocessingRecord::default(),
        defined: HashMap::new(),
        undefined: HashMap::new(),
        interned: HashMap::new(),
    };
    scanner.run();
    scanner.record
}

struct Scanner<'s> {
    source: &'s str,
    table: &'s MacroTable,
    line_index: LineIndex,
    tokens: &'s [Lexed],
    record: PreprocessingRecord,
    /// In-file definitions in effect: name -> (entity index, function-like).
    defined: HashMap<&'s str, (usize, bool)>,
    /// Names hidden by an in-file `#undef`, with the line of the directive.
    undefined: HashMap<&'s str, u32>,
    /// Table definitions already copied into the record.
    interned: HashMap<(&'s str, usize), usize>,
}

impl<'s> Scanner<'s> {
    fn run(&mut self) {
        let mut at_line_start = true;
        let mut i = 0usize;

        while i < self.tokens.len() {
            let (token, span) = &self.tokens[i];
            match token {
                Ok(PpToken::Newline) => {
                    at_line_start = true;
                    i += 1;
                    continue;
                },
                t if is_trivia(t) => {
                    i += 1;
                    continue;
                },
                Ok(PpToken::Hash) if at_line_start => {
                    i = self.directive(i + 1);
                    continue;
                },
                Ok(PpToken::Ident) => self.identifier(i, span.clone()),
                _ => {},
            }
            at_line_start = false;
            i += 1;
        }
    }

    fn identifier(
        &mut self,
        index: usize,
        span: Range<usize>,
    ) {
        let source = self.source;
        let name = &source[span.clone()];
        let (line, column) = self.line_index.line_col(span.start);
        let resolved = match self.defined.get(name) {
            Some(&(idx, function_like)) => Some((function_like, Some(MacroRef::InFile(idx)))),
            None => self.external(name, line),
        };
        if let Some((function_like, definition)) = resolved
            && (!function_like || next_significant_is_lparen(self.tokens, index + 1))
        {
            self.record.entities.push(MacroEntity {
                kind: MacroEntityKind::Expansion,
                name: name.to_owned(),
                line,
                column,
                definition,
            });
        }
    }

    fn external(
        &mut self,
        name: &'s str,
        line: u32,
    ) -> Option<(bool, Option<MacroRef>)> {
        let table = self.table;
        let (slot, definition) = table.lookup_indexed(name, line)?;
        if self.undefined.get(name).is_some_and(|&undef_line| definition.active_after < undef_line) {
            return None;
        }
        let reference = match definition.origin {
            MacroOrigin::Builtin => None,
            MacroOrigin::Header {
                ..
            } => {
                let external = &mut self.record.external;
                let idx = *self.interned.entry((name, slot)).or_insert_with(|| {
                    external.push(definition.clone());
                    external.len() - 1
                });
                Some(MacroRef::External(idx))
            },
        };
        Some((definition.function_like, reference))
    }

    /// Handle one directive starting right after its `#`. Returns the index
    /// of the newline that ends it (or the end of the token stream).
    fn directive(
        &mut self,
        start: usize,
    ) -> usize {
        let tokens = self.tokens;
        let source = self.source;
        let end = tokens[start..]
            .iter()
            .position(|(t, _)| matches!(t, Ok(PpToken::Newline)))
            .map_or(tokens.len(), |offset| start + offset);

        let mut idents = tokens[start..end].iter().enumerate().filter(|(_, (t, _))| !is_trivia(t));
        let Some((_, (Ok(PpToken::Ident), directive_span))) = idents.next() else {
            return end;
        };
        let directive = &source[directive_span.clone()];
        let Some((name_offset, (Ok(PpToken::Ident), name_span))) = idents.next() else {
            return end;
        };
        let name = &source[name_span.clone()];
        let (line, column) = self.line_index.line_col(name_span.start);

        match directive {
            "define" => {
                let name_idx = start + name_offset;
                let function_like = tokens
                    .get(name_idx + 1)
                    .is_some_and(|(t, span)| matches!(t, Ok(PpToken::LParen)) && span.start == name_span.end);
                self.record.entities.push(MacroEntity {
                    kind: MacroEntityKind::Definition,
                    name: name.to_owned(),
                    line,
                    column,
                    definition: None,
                });
                self.defined.insert(name, (self.record.entities.len() - 1, function_like));
                self.undefined.remove(name);
            },
            "undef" => {
                self.defined.remove(name);
                self.undefined.insert(name, line);
            },
            _ => {},
        }

        end
    }
}

fn next_significant_is_lparen(
    tokens: &[Lexed],
    from: usize,
) -> bool {
    tokens[from..]
        .iter()
        .find(|(t, _)| !is_trivia(t) && !matches!(t, Ok(PpToken::Newline)))
        .is_some_and(|(t, _)| matches!(t, Ok(PpToken::LParen)))
}

#[cfg(test)]
#[path = "../../tests/src/ast/preprocessor_tests.rs"]
mod tests;
