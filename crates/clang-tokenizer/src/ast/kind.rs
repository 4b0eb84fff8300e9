use super::clang_nodes::Clang;

/// Kind of a cursor, in the vocabulary of Clang's cursor interface.
///
/// Record declarations are split by the tag the user wrote, so `class`,
/// `struct` and `union` declarations are distinct kinds. Node kinds the
/// tokenizer does not care about collapse into [`CursorKind::Unexposed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    TranslationUnit,

    Namespace,
    NamespaceAlias,
    UsingDirective,
    UsingDeclaration,

    ClassDecl,
    StructDecl,
    UnionDecl,
    ClassTemplate,
    ClassTemplatePartialSpecialization,
    EnumDecl,
    EnumConstantDecl,
    FieldDecl,
    VarDecl,
    ParmDecl,

    FunctionDecl,
    FunctionTemplate,
    CxxMethod,
    Constructor,
    Destructor,
    ConversionFunction,

    TemplateTypeParameter,
    TemplateNonTypeParameter,
    TemplateTemplateParameter,

    TypedefDecl,
    TypeAliasDecl,
    TypeAliasTemplateDecl,

    DeclRefExpr,
    MemberRefExpr,
    OverloadedDeclRef,

    MacroDefinition,
    MacroExpansion,

    Unexposed,
}

impl CursorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TranslationUnit => "TranslationUnit",
            Self::Namespace => "Namespace",
            Self::NamespaceAlias => "NamespaceAlias",
            Self::UsingDirective => "UsingDirective",
            Self::UsingDeclaration => "UsingDeclaration",
            Self::ClassDecl => "ClassDecl",
            Self::StructDecl => "StructDecl",
            Self::UnionDecl => "UnionDecl",
            Self::ClassTemplate => "ClassTemplate",
            Self::ClassTemplatePartialSpecialization => "ClassTemplatePartialSpecialization",
            Self::EnumDecl => "EnumDecl",
            Self::EnumConstantDecl => "EnumConstantDecl",
            Self::FieldDecl => "FieldDecl",
            Self::VarDecl => "VarDecl",
            Self::ParmDecl => "ParmDecl",
            Self::FunctionDecl => "FunctionDecl",
            Self::FunctionTemplate => "FunctionTemplate",
            Self::CxxMethod => "CXXMethod",
            Self::Constructor => "Constructor",
            Self::Destructor => "Destructor",
            Self::ConversionFunction => "ConversionFunction",
            Self::TemplateTypeParameter => "TemplateTypeParameter",
            Self::TemplateNonTypeParameter => "NonTypeTemplateParameter",
            Self::TemplateTemplateParameter => "TemplateTemplateParameter",
            Self::TypedefDecl => "TypedefDecl",
            Self::TypeAliasDecl => "TypeAliasDecl",
            Self::TypeAliasTemplateDecl => "TypeAliasTemplateDecl",
            Self::DeclRefExpr => "DeclRefExpr",
            Self::MemberRefExpr => "MemberRefExpr",
            Self::OverloadedDeclRef => "OverloadedDeclRef",
            Self::MacroDefinition => "MacroDefinition",
            Self::MacroExpansion => "MacroExpansion",
            Self::Unexposed => "Unexposed",
        }
    }

    /// Whether a cursor of this kind is itself a declaration (and therefore
    /// resolves to itself).
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            Self::Namespace
                | Self::NamespaceAlias
                | Self::UsingDirective
                | Self::UsingDeclaration
                | Self::ClassDecl
                | Self::StructDecl
                | Self::UnionDecl
                | Self::ClassTemplate
                | Self::ClassTemplatePartialSpecialization
                | Self::EnumDecl
                | Self::EnumConstantDecl
                | Self::FieldDecl
                | Self::VarDecl
                | Self::ParmDecl
                | Self::FunctionDecl
                | Self::FunctionTemplate
                | Self::CxxMethod
                | Self::Constructor
                | Self::Destructor
                | Self::ConversionFunction
                | Self::TemplateTypeParameter
                | Self::TemplateNonTypeParameter
                | Self::TemplateTemplateParameter
                | Self::TypedefDecl
                | Self::TypeAliasDecl
                | Self::TypeAliasTemplateDecl
        )
    }

    pub fn is_template_parameter(self) -> bool {
        matches!(
            self,
            Self::TemplateTypeParameter | Self::TemplateNonTypeParameter | Self::TemplateTemplateParameter
        )
    }

    /// Map a Clang AST `"kind"` string (as found in inline declaration
    /// summaries) to a cursor kind.
    ///
    /// Inline summaries carry no tag, so records default to `ClassDecl`.
    pub fn from_clang_kind(kind: &str) -> Self {
        match kind {
            "NamespaceDecl" => Self::Namespace,
            "NamespaceAliasDecl" => Self::NamespaceAlias,
            "UsingDirectiveDecl" => Self::UsingDirective,
            "UsingDecl" => Self::UsingDeclaration,
            "CXXRecordDecl" | "RecordDecl" | "ClassTemplateSpecializationDecl" => Self::ClassDecl,
            "ClassTemplateDecl" => Self::ClassTemplate,
            "ClassTemplatePartialSpecializationDecl" => Self::ClassTemplatePartialSpecialization,
            "EnumDecl" => Self::EnumDecl,
            "EnumConstantDecl" => Self::EnumConstantDecl,
            "FieldDecl" => Self::FieldDecl,
            "VarDecl" => Self::VarDecl,
            "ParmVarDecl" => Self::ParmDecl,
            "FunctionDecl" => Self::FunctionDecl,
            "FunctionTemplateDecl" => Self::FunctionTemplate,
            "CXXMethodDecl" => Self::CxxMethod,
            "CXXConstructorDecl" => Self::Constructor,
            "CXXDestructorDecl" => Self::Destructor,
            "CXXConversionDecl" => Self::ConversionFunction,
            "TemplateTypeParmDecl" => Self::TemplateTypeParameter,
            "NonTypeTemplateParmDecl" => Self::TemplateNonTypeParameter,
            "TemplateTemplateParmDecl" => Self::TemplateTemplateParameter,
            "TypedefDecl" => Self::TypedefDecl,
            "TypeAliasDecl" => Self::TypeAliasDecl,
            "TypeAliasTemplateDecl" => Self::TypeAliasTemplateDecl,
            _ => Self::Unexposed,
        }
    }

    pub(crate) fn of_node(kind: &Clang) -> Self {
        match kind {
            Clang::NamespaceDecl(_) => Self::Namespace,
            Clang::NamespaceAliasDecl(_) => Self::NamespaceAlias,
            Clang::UsingDirectiveDecl(_) => Self::UsingDirective,
            Clang::UsingDecl(_) => Self::UsingDeclaration,
            Clang::UsingShadowDecl(d) => {
                Self::from_clang_kind(d.target.as_ref().and_then(|t| t.kind.as_deref()).unwrap_or_default())
            },
            Clang::CXXRecordDecl(d) | Clang::RecordDecl(d) | Clang::ClassTemplateSpecializationDecl(d) => {
                Self::from_record_tag(d.tag_used.as_deref())
            },
            Clang::ClassTemplateDecl(_) => Self::ClassTemplate,
            Clang::ClassTemplatePartialSpecializationDecl(_) => Self::ClassTemplatePartialSpecialization,
            Clang::EnumDecl(_) => Self::EnumDecl,
            Clang::EnumConstantDecl(_) => Self::EnumConstantDecl,
            Clang::FieldDecl(_) => Self::FieldDecl,
            Clang::VarDecl(_) => Self::VarDecl,
            Clang::ParmVarDecl(_) => Self::ParmDecl,
            Clang::FunctionDecl(_) => Self::FunctionDecl,
            Clang::FunctionTemplateDecl(_) => Self::FunctionTemplate,
            Clang::CXXMethodDecl(_) => Self::CxxMethod,
            Clang::CXXConstructorDecl(_) => Self::Constructor,
            Clang::CXXDestructorDecl(_) => Self::Destructor,
            Clang::CXXConversionDecl(_) => Self::ConversionFunction,
            Clang::TemplateTypeParmDecl(_) => Self::TemplateTypeParameter,
            Clang::NonTypeTemplateParmDecl(_) => Self::TemplateNonTypeParameter,
            Clang::TemplateTemplateParmDecl(_) => Self::TemplateTemplateParameter,
            Clang::TypedefDecl(_) => Self::TypedefDecl,
            Clang::TypeAliasDecl(_) => Self::TypeAliasDecl,
            Clang::TypeAliasTemplateDecl(_) => Self::TypeAliasTemplateDecl,
            Clang::DeclRefExpr(_) | Clang::UnresolvedLookupExpr(_) => Self::DeclRefExpr,
            Clang::MemberExpr(_) | Clang::UnresolvedMemberExpr(_) => Self::MemberRefExpr,
            Clang::Other {
                ..
            } => Self::Unexposed,
        }
    }

    fn from_record_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("struct") => Self::StructDecl,
            Some("union") => Self::UnionDecl,
            _ => Self::ClassDecl,
        }
    }
}

impl std::fmt::Display for CursorKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
