use indexmap::IndexMap;
use psdn_core::{
    BinaryOp, Expr, ExprKind, FieldDecl, LocalDecl, PACKET_SOURCE_EXTERN, ParserUnit, TypeDecl,
    TypeRef,
};

use super::{
    CallResolver, ExprLowering, FlatLayout, LayoutRenderer, ResolvedCall, ResolvedType,
    StructField, StructType, TargetExprPrinter, TypeResolver,
};

/// Nesting limit when expanding named types; guards self-referential declarations.
const MAX_TYPE_DEPTH: usize = 32;

/// Reference collaborator built from a unit's own type declarations.
///
/// Names in scope are the apply-parameters followed by the parser locals.
pub struct UnitOracle<'u> {
    types: &'u IndexMap<String, TypeDecl>,
    scope: IndexMap<&'u str, &'u TypeRef>,
    printer: TargetExprPrinter,
    layout: FlatLayout,
}

impl<'u> UnitOracle<'u> {
    pub fn new(unit: &'u ParserUnit) -> Self {
        let mut scope = IndexMap::new();
        for param in &unit.params {
            scope.insert(param.name.as_str(), &param.ty);
        }
        for local in &unit.locals {
            let ty = match local {
                LocalDecl::ValueSet { element_type, .. } => element_type,
                LocalDecl::Variable { ty, .. } | LocalDecl::Instance { ty, .. } => ty,
            };
            scope.insert(local.name(), ty);
        }

        Self {
            types: &unit.types,
            scope,
            printer: TargetExprPrinter,
            layout: FlatLayout,
        }
    }

    fn resolve_at(&self, ty: &TypeRef, depth: usize) -> ResolvedType {
        if depth > MAX_TYPE_DEPTH {
            return ResolvedType::Unknown(ty.to_string());
        }

        match ty {
            TypeRef::Bits { width } => ResolvedType::Bits(*width),
            TypeRef::Bool => ResolvedType::Bool,
            TypeRef::Stack { element, size } => ResolvedType::Stack {
                element: Box::new(self.resolve_at(element, depth + 1)),
                size: *size,
            },
            TypeRef::Named { name } => self.resolve_named(name, depth),
        }
    }

    fn resolve_named(&self, name: &str, depth: usize) -> ResolvedType {
        let Some(decl) = self.types.get(name) else {
            return ResolvedType::Unknown(name.to_string());
        };

        let build = |fields: &[FieldDecl]| StructType {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|f| StructField {
                    name: f.name.clone(),
                    ty: self.resolve_at(&f.ty, depth + 1),
                })
                .collect(),
        };

        match decl {
            TypeDecl::Extern if name == PACKET_SOURCE_EXTERN => ResolvedType::PacketSource,
            TypeDecl::Extern => ResolvedType::Extern(name.to_string()),
            TypeDecl::Header { fields } => ResolvedType::Header(build(fields)),
            TypeDecl::Struct { fields } => ResolvedType::Struct(build(fields)),
            TypeDecl::HeaderUnion { fields } => ResolvedType::HeaderUnion(build(fields)),
        }
    }

    fn member_type(base: ResolvedType, member: &str) -> ResolvedType {
        match base {
            ResolvedType::Struct(s) | ResolvedType::Header(s) | ResolvedType::HeaderUnion(s) => {
                match s.fields.into_iter().find(|f| f.name == member) {
                    Some(field) => field.ty,
                    None => ResolvedType::Unknown(format!("{}.{member}", s.name)),
                }
            }
            ResolvedType::Stack { element, .. } => match member {
                "next" | "last" => *element,
                "lastIndex" | "size" | "nextIndex" => ResolvedType::Bits(32),
                _ => ResolvedType::Unknown(member.to_string()),
            },
            other => ResolvedType::Unknown(format!("{other}.{member}")),
        }
    }
}

impl TypeResolver for UnitOracle<'_> {
    fn resolve_type(&self, ty: &TypeRef) -> ResolvedType {
        self.resolve_at(ty, 0)
    }

    fn expr_type(&self, expr: &Expr) -> ResolvedType {
        match &expr.kind {
            ExprKind::Path { name } => match self.scope.get(name.as_str()) {
                Some(ty) => self.resolve_type(ty),
                None => ResolvedType::Unknown(name.clone()),
            },
            ExprKind::Member { base, member } => Self::member_type(self.expr_type(base), member),
            ExprKind::Index { base, .. } => match self.expr_type(base) {
                ResolvedType::Stack { element, .. } => *element,
                ResolvedType::Bits(_) => ResolvedType::Bits(1),
                other => ResolvedType::Unknown(format!("{other}[]")),
            },
            ExprKind::Slice { hi, lo, .. } => {
                match hi.checked_sub(*lo).and_then(|d| d.checked_add(1)) {
                    Some(width) => ResolvedType::Bits(width),
                    None => ResolvedType::Unknown(format!("[{hi}:{lo}]")),
                }
            }
            ExprKind::Constant { width: Some(w), .. } => ResolvedType::Bits(*w),
            ExprKind::Constant { width: None, .. } => ResolvedType::Unknown("int".to_string()),
            ExprKind::Bool { .. } => ResolvedType::Bool,
            ExprKind::Unary { operand, .. } => self.expr_type(operand),
            ExprKind::Binary { op, lhs, .. } => match op {
                BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or => ResolvedType::Bool,
                _ => self.expr_type(lhs),
            },
        }
    }
}

impl ExprLowering for UnitOracle<'_> {
    fn convert_expr(&self, expr: &Expr) -> String {
        self.printer.convert_expr(expr)
    }
}

impl LayoutRenderer for UnitOracle<'_> {
    fn render_layout(&self, ty: &ResolvedType, strip_validity: bool) -> String {
        self.layout.render_layout(ty, strip_validity)
    }
}

impl CallResolver for UnitOracle<'_> {
    fn resolve_call<'a>(&self, method: &Expr, args: &'a [Expr]) -> ResolvedCall<'a> {
        let Some((base, name)) = method.as_member() else {
            return ResolvedCall::Other;
        };

        let extern_name = match self.expr_type(base) {
            ResolvedType::PacketSource => PACKET_SOURCE_EXTERN.to_string(),
            ResolvedType::Extern(name) => name,
            _ => return ResolvedCall::Other,
        };

        ResolvedCall::ExternMethod {
            extern_name,
            method: name.to_string(),
            args,
        }
    }
}
