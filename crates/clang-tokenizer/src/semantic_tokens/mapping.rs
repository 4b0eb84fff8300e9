use lsp_types::SemanticTokenType;

use crate::{semantic_tokens::LEGEND_TYPES, tokens::TokenCategory};

pub(crate) fn map_category_to_token_type(category: TokenCategory) -> Option<SemanticTokenType> {
    match category {
        TokenCategory::Namespace | TokenCategory::NamespaceAlias | TokenCategory::UsingDirective => {
            Some(SemanticTokenType::NAMESPACE)
        },
        TokenCategory::Class => Some(SemanticTokenType::CLASS),
        TokenCategory::Struct | TokenCategory::Union => Some(SemanticTokenType::STRUCT),
        TokenCategory::Enum => Some(SemanticTokenType::ENUM),
        TokenCategory::EnumValue => Some(SemanticTokenType::ENUM_MEMBER),
        TokenCategory::Field => Some(SemanticTokenType::PROPERTY),
        TokenCategory::LocalVariable | TokenCategory::TemplateNonTypeParameter => Some(SemanticTokenType::VARIABLE),
        TokenCategory::Function => Some(SemanticTokenType::FUNCTION),
        TokenCategory::Method => Some(SemanticTokenType::METHOD),
        TokenCategory::Parameter => Some(SemanticTokenType::PARAMETER),
        TokenCategory::TemplateTypeParameter | TokenCategory::TemplateTemplateParameter => {
            Some(SemanticTokenType::TYPE_PARAMETER)
        },
        TokenCategory::MacroDefinition | TokenCategory::MacroInstantiation => Some(SemanticTokenType::MACRO),
        TokenCategory::Typedef | TokenCategory::UsingDeclaration => Some(SemanticTokenType::TYPE),
        TokenCategory::Unsupported => None,
    }
}

pub(crate) fn get_token_type_index(token_type: &SemanticTokenType) -> u32 {
    LEGEND_TYPES.iter().position(|t| t == token_type).unwrap_or(0) as u32
}
