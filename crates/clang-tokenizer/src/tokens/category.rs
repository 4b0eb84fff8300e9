use serde::Serialize;

use crate::ast::CursorKind;

/// Highlighting category of a token.
///
/// The discriminants are stable ids consumed by editors; never reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum TokenCategory {
    Namespace = 0,
    Class = 1,
    Struct = 2,
    Enum = 3,
    EnumValue = 4,
    Union = 5,
    Field = 6,
    LocalVariable = 7,
    Function = 8,
    Method = 9,
    Parameter = 10,
    TemplateTypeParameter = 11,
    TemplateNonTypeParameter = 12,
    TemplateTemplateParameter = 13,
    MacroDefinition = 14,
    MacroInstantiation = 15,
    Typedef = 16,
    NamespaceAlias = 17,
    UsingDirective = 18,
    UsingDeclaration = 19,
    Unsupported = 20,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 21] = [
        Self::Namespace,
        Self::Class,
        Self::Struct,
        Self::Enum,
        Self::EnumValue,
        Self::Union,
        Self::Field,
        Self::LocalVariable,
        Self::Function,
        Self::Method,
        Self::Parameter,
        Self::TemplateTypeParameter,
        Self::TemplateNonTypeParameter,
        Self::TemplateTemplateParameter,
        Self::MacroDefinition,
        Self::MacroInstantiation,
        Self::Typedef,
        Self::NamespaceAlias,
        Self::UsingDirective,
        Self::UsingDeclaration,
        Self::Unsupported,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::EnumValue => "enum-value",
            Self::Union => "union",
            Self::Field => "field",
            Self::LocalVariable => "local-variable",
            Self::Function => "function",
            Self::Method => "method",
            Self::Parameter => "parameter",
            Self::TemplateTypeParameter => "template-type-parameter",
            Self::TemplateNonTypeParameter => "template-non-type-parameter",
            Self::TemplateTemplateParameter => "template-template-parameter",
            Self::MacroDefinition => "macro-definition",
            Self::MacroInstantiation => "macro-instantiation",
            Self::Typedef => "typedef",
            Self::NamespaceAlias => "namespace-alias",
            Self::UsingDirective => "using-directive",
            Self::UsingDeclaration => "using-declaration",
            Self::Unsupported => "unsupported",
        }
    }

    /// Category for a cursor kind. Kinds without a category of their own
    /// (references, expressions, the translation unit) are `Unsupported`.
    pub fn from_cursor_kind(kind: CursorKind) -> Self {
        match kind {
            CursorKind::Namespace => Self::Namespace,
            CursorKind::ClassDecl | CursorKind::ClassTemplate | CursorKind::ClassTemplatePartialSpecialization => {
                Self::Class
            },
            CursorKind::StructDecl => Self::Struct,
            CursorKind::EnumDecl => Self::Enum,
            CursorKind::EnumConstantDecl => Self::EnumValue,
            CursorKind::UnionDecl => Self::Union,
            CursorKind::FieldDecl => Self::Field,
            CursorKind::VarDecl => Self::LocalVariable,
            CursorKind::FunctionDecl | CursorKind::FunctionTemplate => Self::Function,
            CursorKind::CxxMethod | CursorKind::Constructor | CursorKind::Destructor => Self::Method,
            CursorKind::ParmDecl => Self::Parameter,
            CursorKind::TemplateTypeParameter => Self::TemplateTypeParameter,
            CursorKind::TemplateNonTypeParameter => Self::TemplateNonTypeParameter,
            CursorKind::TemplateTemplateParameter => Self::TemplateTemplateParameter,
            CursorKind::MacroDefinition => Self::MacroDefinition,
            CursorKind::MacroExpansion => Self::MacroInstantiation,
            CursorKind::TypedefDecl | CursorKind::TypeAliasDecl => Self::Typedef,
            CursorKind::NamespaceAlias => Self::NamespaceAlias,
            CursorKind::UsingDirective => Self::UsingDirective,
            CursorKind::UsingDeclaration => Self::UsingDeclaration,
            CursorKind::TranslationUnit
            | CursorKind::ConversionFunction
            | CursorKind::TypeAliasTemplateDecl
            | CursorKind::DeclRefExpr
            | CursorKind::MemberRefExpr
            | CursorKind::OverloadedDeclRef
            | CursorKind::Unexposed => Self::Unsupported,
        }
    }
}

impl std::fmt::Display for TokenCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
