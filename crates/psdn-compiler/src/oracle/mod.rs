//! Collaborator interfaces consumed by the lowering pass.
//!
//! The pass never reaches into a host framework: type resolution, expression
//! lowering, layout rendering and call resolution are passed in explicitly.
//! [`UnitOracle`] is a reference implementation of all four over the type
//! declarations carried by a [`psdn_core::ParserUnit`].

mod render;
mod types;
mod unit;


use psdn_core::{Expr, TypeRef};

pub use render::{FlatLayout, TargetExprPrinter, VALIDITY_FIELD};
pub use types::{ResolvedType, StructField, StructType};
pub use unit::UnitOracle;

pub trait TypeResolver {
    /// Resolve a declared type (parameter, local, field).
    fn resolve_type(&self, ty: &TypeRef) -> ResolvedType;

    /// Resolve the type of an expression in the parser's scope.
    fn expr_type(&self, expr: &Expr) -> ResolvedType;
}

pub trait ExprLowering {
    /// Convert a well-typed expression into target expression syntax.
    fn convert_expr(&self, expr: &Expr) -> String;
}

pub trait LayoutRenderer {
    /// Render a struct-like type as a flat tuple body.
    ///
    /// With `strip_validity`, a header's own `isValid` bit is left out.
    fn render_layout(&self, ty: &ResolvedType, strip_validity: bool) -> String;
}

pub trait CallResolver {
    fn resolve_call<'a>(&self, method: &Expr, args: &'a [Expr]) -> ResolvedCall<'a>;
}

/// Outcome of resolving a method-call statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCall<'a> {
    ExternMethod {
        extern_name: String,
        method: String,
        args: &'a [Expr],
    },
    /// Actions, functions, or anything that is not an extern method.
    Other,
}

/// Everything the lowering pass consumes, in one bound.
pub trait Oracle: TypeResolver + ExprLowering + LayoutRenderer + CallResolver {}

impl<T> Oracle for T where T: TypeResolver + ExprLowering + LayoutRenderer + CallResolver {}
