use std::fmt;

use serde::{Deserialize, Serialize};

/// A named type declaration visible to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDecl {
    Header { fields: Vec<FieldDecl> },
    Struct { fields: Vec<FieldDecl> },
    HeaderUnion { fields: Vec<FieldDecl> },
    Extern,
}

impl TypeDecl {
    pub fn fields(&self) -> &[FieldDecl] {
        match self {
            TypeDecl::Header { fields }
            | TypeDecl::Struct { fields }
            | TypeDecl::HeaderUnion { fields } => fields,
            TypeDecl::Extern => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn bits(name: impl Into<String>, width: u32) -> Self {
        Self::new(name, TypeRef::Bits { width })
    }
}

/// A use-site type reference, resolved against the unit's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    Bits { width: u32 },
    Bool,
    Named { name: String },
    Stack { element: Box<TypeRef>, size: u32 },
}

impl TypeRef {
    pub fn bits(width: u32) -> Self {
        TypeRef::Bits { width }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named { name: name.into() }
    }

    pub fn stack(element: TypeRef, size: u32) -> Self {
        TypeRef::Stack {
            element: Box::new(element),
            size,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Bits { width } => write!(f, "bit<{width}>"),
            TypeRef::Bool => f.write_str("bool"),
            TypeRef::Named { name } => f.write_str(name),
            TypeRef::Stack { element, size } => write!(f, "{element}[{size}]"),
        }
    }
}
