use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Expr, Span, TypeDecl, TypeRef};

/// One parser definition: the unit of work for the lowering pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserUnit {
    pub name: String,
    /// Type declarations referenced by parameters, locals and expressions, by name.
    #[serde(default)]
    pub types: IndexMap<String, TypeDecl>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub locals: Vec<LocalDecl>,
    pub states: Vec<ParserState>,
}

impl ParserUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: IndexMap::new(),
            params: Vec::new(),
            locals: Vec::new(),
            states: Vec::new(),
        }
    }

    pub fn with_type(mut self, name: impl Into<String>, decl: TypeDecl) -> Self {
        self.types.insert(name.into(), decl);
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_local(mut self, local: LocalDecl) -> Self {
        self.locals.push(local);
        self
    }

    pub fn with_state(mut self, state: ParserState) -> Self {
        self.states.push(state);
        self
    }
}

/// Parameter direction as written in the parser's apply signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    In,
    Out,
    Inout,
}

impl Direction {
    /// Source spelling; directionless parameters print as the empty string.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::None => "",
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Inout => "inout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Param {
    pub fn new(name: impl Into<String>, direction: Direction, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            direction,
            ty,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Parser-local declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocalDecl {
    /// A set of match values installed by the control plane.
    ValueSet {
        name: String,
        element_type: TypeRef,
        #[serde(default)]
        size: u32,
        /// Name exposed to the control plane (`@name` annotation), if overridden.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        control_plane_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
    Variable {
        name: String,
        #[serde(rename = "type")]
        ty: TypeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initializer: Option<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
    Instance {
        name: String,
        #[serde(rename = "type")]
        ty: TypeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
}

impl LocalDecl {
    pub fn value_set(name: impl Into<String>, element_type: TypeRef, size: u32) -> Self {
        LocalDecl::ValueSet {
            name: name.into(),
            element_type,
            size,
            control_plane_name: None,
            span: None,
        }
    }

    pub fn variable(name: impl Into<String>, ty: TypeRef) -> Self {
        LocalDecl::Variable {
            name: name.into(),
            ty,
            initializer: None,
            span: None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LocalDecl::ValueSet { name, .. }
            | LocalDecl::Variable { name, .. }
            | LocalDecl::Instance { name, .. } => name,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            LocalDecl::ValueSet { span, .. }
            | LocalDecl::Variable { span, .. }
            | LocalDecl::Instance { span, .. } => *span,
        }
    }

    /// Control-plane name of a value set: the explicit override, else the declared name.
    pub fn control_plane_name(&self) -> Option<&str> {
        match self {
            LocalDecl::ValueSet {
                name,
                control_plane_name,
                ..
            } => Some(control_plane_name.as_deref().unwrap_or(name)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserState {
    pub name: String,
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl ParserState {
    pub const ACCEPT: &'static str = "accept";
    pub const REJECT: &'static str = "reject";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: Vec::new(),
            transition: None,
            span: None,
        }
    }

    pub fn accept() -> Self {
        Self::new(Self::ACCEPT)
    }

    pub fn reject() -> Self {
        Self::new(Self::REJECT)
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn is_accept(&self) -> bool {
        self.name == Self::ACCEPT
    }

    pub fn is_reject(&self) -> bool {
        self.name == Self::REJECT
    }

    pub fn is_terminal(&self) -> bool {
        self.is_accept() || self.is_reject()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Assign {
        left: Expr,
        right: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
    /// Method call statement; `method` is the callee, e.g. `packet.extract`.
    Call {
        method: Expr,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
    Empty,
    /// Any statement kind the frontend passes through untyped.
    Other {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
}

impl Statement {
    pub fn assign(left: Expr, right: Expr) -> Self {
        Statement::Assign {
            left,
            right,
            span: None,
        }
    }

    pub fn call(method: Expr, args: Vec<Expr>) -> Self {
        Statement::Call {
            method,
            args,
            span: None,
        }
    }

    /// `<packet>.extract(<target>)`
    pub fn extract(packet: &str, target: Expr) -> Self {
        Self::call(Expr::path(packet).member(crate::EXTRACT_METHOD), vec![target])
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Statement::Assign { span, .. }
            | Statement::Call { span, .. }
            | Statement::Other { span, .. } => *span,
            Statement::Empty => None,
        }
    }
}

/// How a state selects its successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Direct {
        target: String,
    },
    Select {
        keys: Vec<Expr>,
        cases: Vec<SelectCase>,
    },
}

impl Transition {
    pub fn direct(target: impl Into<String>) -> Self {
        Transition::Direct {
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectCase {
    /// One element per select key.
    pub keyset: Vec<Keyset>,
    pub target: String,
}

impl SelectCase {
    pub fn new(keyset: Vec<Keyset>, target: impl Into<String>) -> Self {
        Self {
            keyset,
            target: target.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.keyset.iter().all(|k| matches!(k, Keyset::Default))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Keyset {
    Value { value: Expr },
    Mask { value: Expr, mask: Expr },
    Default,
}
