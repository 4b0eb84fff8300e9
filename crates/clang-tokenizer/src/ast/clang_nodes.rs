use clang_ast::{BareSourceLocation, Id, SourceLocation, SourceRange};
use serde::Deserialize;

pub type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the tokenizer classifies.
///
/// Each variant corresponds to a Clang AST node `"kind"` value.
/// Everything else lands in `Other`.
#[derive(Deserialize)]
pub enum Clang {
    // --- Declarations ---
    NamespaceDecl(DeclData),
    NamespaceAliasDecl(DeclData),
    UsingDirectiveDecl(UsingDirectiveData),
    UsingDecl(DeclData),
    UsingShadowDecl(UsingShadowData),
    CXXRecordDecl(RecordData),
    RecordDecl(RecordData),
    ClassTemplateDecl(DeclData),
    ClassTemplateSpecializationDecl(RecordData),
    ClassTemplatePartialSpecializationDecl(RecordData),
    EnumDecl(DeclData),
    EnumConstantDecl(DeclData),
    FieldDecl(DeclData),
    VarDecl(DeclData),
    ParmVarDecl(DeclData),
    FunctionDecl(DeclData),
    FunctionTemplateDecl(DeclData),
    CXXMethodDecl(DeclData),
    CXXConstructorDecl(DeclData),
    CXXDestructorDecl(DeclData),
    CXXConversionDecl(DeclData),
    TemplateTypeParmDecl(DeclData),
    NonTypeTemplateParmDecl(DeclData),
    TemplateTemplateParmDecl(DeclData),
    TypedefDecl(DeclData),
    TypeAliasDecl(DeclData),
    TypeAliasTemplateDecl(DeclData),

    // --- References ---
    DeclRefExpr(DeclRefData),
    MemberExpr(MemberRefData),
    UnresolvedLookupExpr(OverloadData),
    UnresolvedMemberExpr(OverloadData),

    // --- Catch-all ---
    // `loc` and `range` must be deserialized even here: `clang-ast` tracks
    // the "current file" across the stream through every `SourceLocation`,
    // so skipping one makes later nodes inherit the wrong file.
    Other {
        kind: clang_ast::Kind,
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

#[derive(Deserialize, Debug)]
pub struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
}

/// Class, struct and union declarations (plus template specializations).
#[derive(Deserialize, Debug)]
pub struct RecordData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    /// `"class"`, `"struct"`, `"union"` or `"__interface"`.
    #[serde(rename = "tagUsed")]
    pub tag_used: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UsingDirectiveData {
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "nominatedNamespace")]
    pub nominated_namespace: Option<BareDecl>,
}

/// The declaration a using-declaration brings into scope.
#[derive(Deserialize, Debug)]
pub struct UsingShadowData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    pub target: Option<BareDecl>,
}

#[derive(Deserialize, Debug)]
pub struct DeclRefData {
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "referencedDecl")]
    pub referenced_decl: Option<BareDecl>,
}

#[derive(Deserialize, Debug)]
pub struct MemberRefData {
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    pub name: Option<String>,
    #[serde(rename = "referencedMemberDecl")]
    pub referenced_member_decl: Option<Id>,
}

/// A use naming a set of overloaded declarations that Clang left unresolved.
#[derive(Deserialize, Debug)]
pub struct OverloadData {
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    pub name: Option<String>,
    #[serde(default)]
    pub lookups: Vec<BareDecl>,
}

/// Inline summary of a declaration, as Clang prints it inside references.
#[derive(Deserialize, Debug)]
pub struct BareDecl {
    pub id: Id,
    pub kind: Option<String>,
    pub name: Option<String>,
}

impl Clang {
    pub fn name(&self) -> Option<&str> {
        match self {
            Clang::NamespaceDecl(d)
            | Clang::NamespaceAliasDecl(d)
            | Clang::UsingDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::EnumDecl(d)
            | Clang::EnumConstantDecl(d)
            | Clang::FieldDecl(d)
            | Clang::VarDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FunctionDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::TemplateTypeParmDecl(d)
            | Clang::NonTypeTemplateParmDecl(d)
            | Clang::TemplateTemplateParmDecl(d)
            | Clang::TypedefDecl(d)
            | Clang::TypeAliasDecl(d)
            | Clang::TypeAliasTemplateDecl(d) => d.name.as_deref(),
            Clang::CXXRecordDecl(d)
            | Clang::RecordDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::ClassTemplatePartialSpecializationDecl(d) => d.name.as_deref(),
            Clang::UsingShadowDecl(d) => d.name.as_deref(),
            Clang::UsingDirectiveDecl(d) => d.nominated_namespace.as_ref().and_then(|ns| ns.name.as_deref()),
            Clang::DeclRefExpr(d) => d.referenced_decl.as_ref().and_then(|r| r.name.as_deref()),
            Clang::MemberExpr(d) => d.name.as_deref(),
            Clang::UnresolvedLookupExpr(d) | Clang::UnresolvedMemberExpr(d) => d.name.as_deref(),
            Clang::Other {
                ..
            } => None,
        }
    }

    pub fn is_implicit(&self) -> bool {
        let flag = match self {
            Clang::NamespaceDecl(d)
            | Clang::NamespaceAliasDecl(d)
            | Clang::UsingDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::EnumDecl(d)
            | Clang::EnumConstantDecl(d)
            | Clang::FieldDecl(d)
            | Clang::VarDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FunctionDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::TemplateTypeParmDecl(d)
            | Clang::NonTypeTemplateParmDecl(d)
            | Clang::TemplateTemplateParmDecl(d)
            | Clang::TypedefDecl(d)
            | Clang::TypeAliasDecl(d)
            | Clang::TypeAliasTemplateDecl(d) => d.is_implicit,
            Clang::CXXRecordDecl(d)
            | Clang::RecordDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::ClassTemplatePartialSpecializationDecl(d) => d.is_implicit,
            Clang::UsingDirectiveDecl(d) => d.is_implicit,
            Clang::UsingShadowDecl(d) => d.is_implicit,
            _ => None,
        };
        flag.unwrap_or(false)
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Clang::NamespaceDecl(d)
            | Clang::NamespaceAliasDecl(d)
            | Clang::UsingDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::EnumDecl(d)
            | Clang::EnumConstantDecl(d)
            | Clang::FieldDecl(d)
            | Clang::VarDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FunctionDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::TemplateTypeParmDecl(d)
            | Clang::NonTypeTemplateParmDecl(d)
            | Clang::TemplateTemplateParmDecl(d)
            | Clang::TypedefDecl(d)
            | Clang::TypeAliasDecl(d)
            | Clang::TypeAliasTemplateDecl(d) => d.loc.as_ref(),
            Clang::CXXRecordDecl(d)
            | Clang::RecordDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::ClassTemplatePartialSpecializationDecl(d) => d.loc.as_ref(),
            Clang::UsingDirectiveDecl(d) => d.loc.as_ref(),
            Clang::UsingShadowDecl(d) => d.loc.as_ref(),
            Clang::DeclRefExpr(d) => d.loc.as_ref(),
            Clang::MemberExpr(d) => d.loc.as_ref(),
            Clang::UnresolvedLookupExpr(d) | Clang::UnresolvedMemberExpr(d) => d.loc.as_ref(),
            Clang::Other {
                loc,
                ..
            } => loc.as_ref(),
        }
    }

    pub fn range(&self) -> Option<&SourceRange> {
        match self {
            Clang::NamespaceDecl(d)
            | Clang::NamespaceAliasDecl(d)
            | Clang::UsingDecl(d)
            | Clang::ClassTemplateDecl(d)
            | Clang::EnumDecl(d)
            | Clang::EnumConstantDecl(d)
            | Clang::FieldDecl(d)
            | Clang::VarDecl(d)
            | Clang::ParmVarDecl(d)
            | Clang::FunctionDecl(d)
            | Clang::FunctionTemplateDecl(d)
            | Clang::CXXMethodDecl(d)
            | Clang::CXXConstructorDecl(d)
            | Clang::CXXDestructorDecl(d)
            | Clang::CXXConversionDecl(d)
            | Clang::TemplateTypeParmDecl(d)
            | Clang::NonTypeTemplateParmDecl(d)
            | Clang::TemplateTemplateParmDecl(d)
            | Clang::TypedefDecl(d)
            | Clang::TypeAliasDecl(d)
            | Clang::TypeAliasTemplateDecl(d) => d.range.as_ref(),
            Clang::CXXRecordDecl(d)
            | Clang::RecordDecl(d)
            | Clang::ClassTemplateSpecializationDecl(d)
            | Clang::ClassTemplatePartialSpecializationDecl(d) => d.range.as_ref(),
            Clang::UsingDirectiveDecl(d) => d.range.as_ref(),
            Clang::UsingShadowDecl(d) => d.range.as_ref(),
            Clang::DeclRefExpr(d) => d.range.as_ref(),
            Clang::MemberExpr(d) => d.range.as_ref(),
            Clang::UnresolvedLookupExpr(d) | Clang::UnresolvedMemberExpr(d) => d.range.as_ref(),
            Clang::Other {
                range,
                ..
            } => range.as_ref(),
        }
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location (where a macro was invoked, the position
/// the user sees in their source file) over the spelling location (inside the
/// macro definition).
pub fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
