use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Span;

/// A value expression as elaborated by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKind {
    Path {
        name: String,
    },
    Member {
        base: Box<Expr>,
        member: String,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        base: Box<Expr>,
        hi: u32,
        lo: u32,
    },
    Constant {
        value: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
    },
    Bool {
        value: bool,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    Complement,
    #[serde(rename = "-")]
    Neg,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Complement => "~",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, span: None }
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Path { name: name.into() })
    }

    pub fn constant(value: u64) -> Self {
        Self::new(ExprKind::Constant { value, width: None })
    }

    pub fn sized(value: u64, width: u32) -> Self {
        Self::new(ExprKind::Constant {
            value,
            width: Some(width),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Bool { value })
    }

    /// `self.member`
    pub fn member(self, member: impl Into<String>) -> Self {
        Self::new(ExprKind::Member {
            base: Box::new(self),
            member: member.into(),
        })
    }

    /// `self[index]`
    pub fn index(self, index: Expr) -> Self {
        Self::new(ExprKind::Index {
            base: Box::new(self),
            index: Box::new(index),
        })
    }

    pub fn slice(self, hi: u32, lo: u32) -> Self {
        Self::new(ExprKind::Slice {
            base: Box::new(self),
            hi,
            lo,
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::new(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Split a member access into `(base, member)`.
    pub fn as_member(&self) -> Option<(&Expr, &str)> {
        match &self.kind {
            ExprKind::Member { base, member } => Some((base, member)),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Path { name } => Some(name),
            _ => None,
        }
    }

    /// Name at the root of a path/member/index chain.
    pub fn root_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Path { name } => Some(name),
            ExprKind::Member { base, .. }
            | ExprKind::Index { base, .. }
            | ExprKind::Slice { base, .. } => base.root_name(),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Path { name } => f.write_str(name),
            ExprKind::Member { base, member } => write!(f, "{base}.{member}"),
            ExprKind::Index { base, index } => write!(f, "{base}[{index}]"),
            ExprKind::Slice { base, hi, lo } => write!(f, "{base}[{hi}:{lo}]"),
            ExprKind::Constant { value, width: None } => write!(f, "{value}"),
            ExprKind::Constant {
                value,
                width: Some(w),
            } => write!(f, "{w}w{value}"),
            ExprKind::Bool { value } => write!(f, "{value}"),
            ExprKind::Unary { op, operand } => {
                f.write_str(op.as_str())?;
                write_operand(f, operand)
            }
            ExprKind::Binary { op, lhs, rhs } => {
                write_operand(f, lhs)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, rhs)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if matches!(expr.kind, ExprKind::Binary { .. }) {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}
