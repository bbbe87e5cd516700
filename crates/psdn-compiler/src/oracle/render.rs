use psdn_core::{Expr, ExprKind};

use super::{ExprLowering, LayoutRenderer, ResolvedType};
use crate::target::{TupleField, render_fields};

/// Field name of a header's validity bit in flat layouts.
pub const VALIDITY_FIELD: &str = "isValid";

/// Prints expressions in PX syntax: paths verbatim, binaries fully
/// parenthesized, booleans as `1`/`0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetExprPrinter;

impl ExprLowering for TargetExprPrinter {
    fn convert_expr(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Path { name } => name.clone(),
            ExprKind::Member { base, member } => format!("{}.{member}", self.convert_expr(base)),
            ExprKind::Index { base, index } => {
                format!("{}[{}]", self.convert_expr(base), self.convert_expr(index))
            }
            ExprKind::Slice { base, hi, lo } => format!("{}[{hi}:{lo}]", self.convert_expr(base)),
            ExprKind::Constant { value, .. } => value.to_string(),
            ExprKind::Bool { value } => u8::from(*value).to_string(),
            ExprKind::Unary { op, operand } => {
                format!("{}{}", op.as_str(), self.convert_expr(operand))
            }
            ExprKind::Binary { op, lhs, rhs } => format!(
                "({} {} {})",
                self.convert_expr(lhs),
                op.as_str(),
                self.convert_expr(rhs)
            ),
        }
    }
}

/// Flattens nested aggregates into one `struct { ... }` block.
///
/// Nested names are joined with `_`; stack elements use their index as a
/// path segment. Headers carry a leading `isValid : 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLayout;

impl FlatLayout {
    pub fn flatten(&self, ty: &ResolvedType, strip_validity: bool) -> Vec<TupleField> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        flatten_into(ty, &mut path, strip_validity, &mut out);
        out
    }
}

impl LayoutRenderer for FlatLayout {
    fn render_layout(&self, ty: &ResolvedType, strip_validity: bool) -> String {
        render_fields(&self.flatten(ty, strip_validity))
    }
}

fn flatten_into(
    ty: &ResolvedType,
    path: &mut Vec<String>,
    strip_validity: bool,
    out: &mut Vec<TupleField>,
) {
    match ty {
        ResolvedType::Bits(w) => out.push(TupleField::new(path.join("_"), *w)),
        ResolvedType::Bool => out.push(TupleField::new(path.join("_"), 1)),
        ResolvedType::Header(s) => {
            if !strip_validity {
                path.push(VALIDITY_FIELD.to_string());
                out.push(TupleField::new(path.join("_"), 1));
                path.pop();
            }
            for field in &s.fields {
                path.push(field.name.clone());
                flatten_into(&field.ty, path, false, out);
                path.pop();
            }
        }
        ResolvedType::Struct(s) | ResolvedType::HeaderUnion(s) => {
            for field in &s.fields {
                path.push(field.name.clone());
                flatten_into(&field.ty, path, false, out);
                path.pop();
            }
        }
        ResolvedType::Stack { element, size } => {
            for i in 0..*size {
                path.push(i.to_string());
                flatten_into(element, path, false, out);
                path.pop();
            }
        }
        ResolvedType::PacketSource | ResolvedType::Extern(_) | ResolvedType::Unknown(_) => {
            log::trace!("layout: no storage for `{}` ({ty})", path.join("_"));
        }
    }
}
