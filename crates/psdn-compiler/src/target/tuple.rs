use std::fmt;

/// A tuple class definition: `class <name>::Tuple(<direction>) { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleDef {
    pub name: String,
    /// `in`, `out`, `inout`, or empty for directionless tuples.
    pub direction: String,
    pub body: TupleBody,
}

impl TupleDef {
    pub fn new(name: impl Into<String>, direction: impl Into<String>, body: TupleBody) -> Self {
        Self {
            name: name.into(),
            direction: direction.into(),
            body,
        }
    }

    pub fn fields(
        name: impl Into<String>,
        direction: impl Into<String>,
        fields: Vec<TupleField>,
    ) -> Self {
        Self::new(name, direction, TupleBody::Fields(fields))
    }

    pub fn rendered(
        name: impl Into<String>,
        direction: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::new(name, direction, TupleBody::Rendered(body.into()))
    }
}

/// Body of a tuple definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleBody {
    /// Explicit field list built by the pass.
    Fields(Vec<TupleField>),
    /// Text produced by a layout renderer, used verbatim.
    Rendered(String),
}

impl TupleBody {
    pub fn render(&self) -> String {
        match self {
            TupleBody::Fields(fields) => render_fields(fields),
            TupleBody::Rendered(text) => text.clone(),
        }
    }

    /// Total width when the field list is known.
    pub fn width_bits(&self) -> Option<u32> {
        match self {
            TupleBody::Fields(fields) => fields
                .iter()
                .try_fold(0u32, |acc, f| acc.checked_add(f.bits)),
            TupleBody::Rendered(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleField {
    pub name: String,
    pub bits: u32,
}

impl TupleField {
    pub fn new(name: impl Into<String>, bits: u32) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }
}

impl fmt::Display for TupleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.bits)
    }
}

/// Render a flat `struct { ... }` block, one tab-indented field per line.
///
/// Every field but the last is comma-terminated.
pub fn render_fields(fields: &[TupleField]) -> String {
    let mut out = String::from("struct {\n");
    for (i, field) in fields.iter().enumerate() {
        out.push('\t');
        out.push_str(&field.to_string());
        if i + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// A tuple instance declaration: `<type_name> <name>;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleInst {
    pub type_name: String,
    pub name: String,
}

impl TupleInst {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TupleInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.type_name, self.name)
    }
}
