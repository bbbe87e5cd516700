use std::fmt;

/// A type as classified by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// The extern that supplies packet bytes (`packet_in`).
    PacketSource,
    Extern(String),
    Struct(StructType),
    Header(StructType),
    HeaderUnion(StructType),
    Stack {
        element: Box<ResolvedType>,
        size: u32,
    },
    Bits(u32),
    Bool,
    /// Anything the resolver could not classify.
    Unknown(String),
}

impl ResolvedType {
    /// Struct, header or header union.
    pub fn as_struct_like(&self) -> Option<&StructType> {
        match self {
            ResolvedType::Struct(s) | ResolvedType::Header(s) | ResolvedType::HeaderUnion(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, ResolvedType::Header(_))
    }

    /// Stacks and unions need per-element or per-variant indexing.
    pub fn is_unflattenable(&self) -> bool {
        matches!(self, ResolvedType::Stack { .. } | ResolvedType::HeaderUnion(_))
    }

    /// Total fixed bit width; `None` for externs, stacks, unions and unknowns,
    /// and for aggregates whose total does not fit in a `u32`.
    pub fn width_bits(&self) -> Option<u32> {
        match self {
            ResolvedType::Bits(w) => Some(*w),
            ResolvedType::Bool => Some(1),
            ResolvedType::Struct(s) | ResolvedType::Header(s) => s
                .fields
                .iter()
                .try_fold(0u32, |acc, f| acc.checked_add(f.ty.width_bits()?)),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::PacketSource => f.write_str(psdn_core::PACKET_SOURCE_EXTERN),
            ResolvedType::Extern(name) => write!(f, "extern {name}"),
            ResolvedType::Struct(s) => write!(f, "struct {}", s.name),
            ResolvedType::Header(s) => write!(f, "header {}", s.name),
            ResolvedType::HeaderUnion(s) => write!(f, "header_union {}", s.name),
            ResolvedType::Stack { element, size } => write!(f, "{element}[{size}]"),
            ResolvedType::Bits(w) => write!(f, "bit<{w}>"),
            ResolvedType::Bool => f.write_str("bool"),
            ResolvedType::Unknown(what) => write!(f, "unknown `{what}`"),
        }
    }
}

/// Field layout of a struct-like aggregate, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl StructType {
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: ResolvedType,
}
