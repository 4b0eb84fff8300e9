//! Export of highlighting tokens as LSP semantic tokens.

pub(crate) mod mapping;

use lsp_types::{SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokensLegend};

use crate::tokens::Token;

pub const LEGEND_TYPES: &[SemanticTokenType] = &[
    SemanticTokenType::NAMESPACE,
    SemanticTokenType::TYPE,
    SemanticTokenType::CLASS,
    SemanticTokenType::ENUM,
    SemanticTokenType::STRUCT,
    SemanticTokenType::TYPE_PARAMETER,
    SemanticTokenType::PARAMETER,
    SemanticTokenType::VARIABLE,
    SemanticTokenType::PROPERTY,
    SemanticTokenType::ENUM_MEMBER,
    SemanticTokenType::FUNCTION,
    SemanticTokenType::METHOD,
    SemanticTokenType::MACRO,
];

pub const LEGEND_MODIFIERS: &[SemanticTokenModifier] = &[SemanticTokenModifier::DECLARATION];

const DECLARATION_BIT: u32 = 1;

pub fn get_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: LEGEND_TYPES.into(),
        token_modifiers: LEGEND_MODIFIERS.into(),
    }
}

/// A raw token before delta encoding. Line and column are 0-based.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RawToken {
    pub(crate) line: u32,
    pub(crate) col: u32,
    pub(crate) length: u32,
    pub(crate) token_type: SemanticTokenType,
    pub(crate) modifiers: u32,
}

impl RawToken {
    fn from_token(token: &Token<'_>) -> Option<Self> {
        let token_type = mapping::map_category_to_token_type(token.category())?;
        let modifiers = if token.cursor().kind().is_declaration() {
            DECLARATION_BIT
        } else {
            0
        };
        Some(Self {
            line: token.line().saturating_sub(1),
            col: token.column().saturating_sub(1),
            length: token.length(),
            token_type,
            modifiers,
        })
    }
}

/// Encode tokens against [`get_legend`]. Unsupported tokens are left out.
pub fn semantic_tokens(tokens: &[Token<'_>]) -> Vec<SemanticToken> {
    encode_delta(tokens.iter().filter_map(RawToken::from_token).collect())
}

/// Sort tokens and encode as LSP delta format.
pub(crate) fn encode_delta(mut tokens: Vec<RawToken>) -> Vec<SemanticToken> {
    tokens.sort_by(|a, b| a.line.cmp(&b.line).then(a.col.cmp(&b.col)));

    // One token per position: the first one, i.e. the outermost cursor.
    tokens.dedup_by(|a, b| a.line == b.line && a.col == b.col);

    let mut result = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_col = 0u32;

    for tok in tokens {
        let delta_line = tok.line - prev_line;
        let delta_col = if delta_line == 0 {
            tok.col - prev_col
        } else {
            tok.col
        };

        result.push(SemanticToken {
            delta_line,
            delta_start: delta_col,
            length: tok.length,
            token_type: mapping::get_token_type_index(&tok.token_type),
            token_modifiers_bitset: tok.modifiers,
        });

        prev_line = tok.line;
        prev_col = tok.col;
    }

    result
}

#[cfg(test)]
#[path = "../../tests/src/semantic_tokens/semantic_tokens_tests.rs"]
mod tests;
