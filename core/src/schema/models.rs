//! # Schema Models
//!
//! Line-preserving representation of a Prisma schema: blocks owning their
//! field declarations, plus the raw lines for byte-identical rendering.

use serde::{Deserialize, Serialize};

/// A field declaration parsed from a single line inside a model-like block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name (e.g. `createdAt`).
    pub name: String,
    /// Raw type token including modifiers (e.g. `String?`, `Post[]`).
    pub ty: String,
    /// Everything after the type: attributes and trailing comments.
    pub attributes: String,
    /// Leading whitespace of the line.
    pub indent: String,
    /// Width of the name column (name plus the padding after it).
    pub name_width: usize,
    /// Width of the type column (type plus the padding after it).
    pub type_width: usize,
    /// 0-based index into `SchemaDocument::lines`.
    pub line: usize,
}

/// Kind of a top-level schema block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// `model Name { ... }`
    Model,
    /// `enum Name { ... }`
    Enum,
    /// `type Name { ... }` (composite types)
    Type,
    /// `view Name { ... }`
    View,
    /// `datasource`, `generator` and anything else.
    Other(String),
}

impl BlockKind {
    pub(crate) fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "model" => BlockKind::Model,
            "enum" => BlockKind::Enum,
            "type" => BlockKind::Type,
            "view" => BlockKind::View,
            other => BlockKind::Other(other.to_string()),
        }
    }

    /// Whether the block body consists of field declarations.
    pub fn has_fields(&self) -> bool {
        matches!(self, BlockKind::Model | BlockKind::Type | BlockKind::View)
    }
}

/// A top-level `keyword Name { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block kind.
    pub kind: BlockKind,
    /// Block name.
    pub name: String,
    /// Field declarations in source order.
    pub fields: Vec<FieldDecl>,
    /// Line index of the opening `{`.
    pub open_line: usize,
    /// Line index of the closing `}`.
    pub close_line: usize,
}

impl Block {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if a field with that name is declared.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// A field to be inserted into a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewField {
    /// Field name.
    pub name: String,
    /// Type token, including `?` / `[]` modifiers.
    #[serde(rename = "type")]
    pub ty: String,
    /// Attribute text such as `@default(false) @unique`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
}

impl NewField {
    /// Convenience constructor.
    pub fn new(name: &str, ty: &str, attributes: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
            attributes: attributes.map(str::to_string),
        }
    }

    /// Renders the declaration aligned to the columns of `layout`.
    pub fn render(&self, layout: &FieldDecl) -> String {
        let name_w = layout.name_width.max(self.name.len() + 1);
        match self.attributes.as_deref().map(str::trim) {
            Some(attrs) if !attrs.is_empty() => {
                let ty_w = layout.type_width.max(self.ty.len() + 1);
                format!(
                    "{}{:<name_w$}{:<ty_w$}{}",
                    layout.indent, self.name, self.ty, attrs
                )
            }
            _ => format!("{}{:<name_w$}{}", layout.indent, self.name, self.ty),
        }
    }
}

/// The email-verification fields the tool was written to add.
pub fn email_verification_fields() -> Vec<NewField> {
    vec![
        NewField::new("emailVerified", "Boolean", Some("@default(false)")),
        NewField::new("verificationToken", "String?", Some("@unique")),
        NewField::new("verificationTokenExpiry", "DateTime?", None),
    ]
}
