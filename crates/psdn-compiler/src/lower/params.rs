//! Parameter and locals lowering.

use indexmap::IndexMap;
use psdn_core::{LocalDecl, ParserUnit};

use super::{LocalMap, LowerCtx, LowerError};
use crate::diagnostics::Diagnostics;
use crate::oracle::ResolvedType;
use crate::target::{
    EXTRACTS_TUPLE, EXTRACTS_TUPLE_TYPE, LOCAL_TUPLE, LOCAL_TUPLE_TYPE, TupleDef, TupleField,
    TupleInst,
};

/// Tuples and the local map produced from a unit's declarations.
#[derive(Debug, Default)]
pub(super) struct LoweredTuples {
    pub defs: Vec<TupleDef>,
    pub insts: Vec<TupleInst>,
    pub locals: LocalMap,
}

impl LoweredTuples {
    fn push(&mut self, def: TupleDef, instance: &str) {
        self.insts.push(TupleInst::new(def.name.clone(), instance));
        self.defs.push(def);
    }
}

pub(super) fn lower_params(
    unit: &ParserUnit,
    ctx: &LowerCtx<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<LoweredTuples, LowerError> {
    let mut out = LoweredTuples::default();

    for param in &unit.params {
        let ty = ctx.types.resolve_type(&param.ty);
        match &ty {
            ResolvedType::PacketSource => {
                log::trace!("param `{}`: packet source, skipped", param.name);
                continue;
            }
            ResolvedType::Extern(name) => {
                let err = LowerError::InvalidParameterKind(format!(
                    "`{}` has extern type `{name}`, only `{}` is accepted",
                    param.name,
                    psdn_core::PACKET_SOURCE_EXTERN
                ));
                return Err(err.report(diagnostics, param.span));
            }
            _ => {}
        }

        if ty.as_struct_like().is_none() {
            let err =
                LowerError::InvalidParameterKind(format!("`{}` has type `{ty}`", param.name));
            return Err(err.report(diagnostics, param.span));
        }

        let body = ctx.layouts.render_layout(&ty, false);
        let def = TupleDef::rendered(format!("{}_t", param.name), param.direction.as_str(), body);
        log::trace!("param `{}`: tuple `{}`", param.name, def.name);
        out.push(def, &param.name);
    }

    out.push(
        TupleDef::fields(EXTRACTS_TUPLE_TYPE, "out", vec![TupleField::new("size", 32)]),
        EXTRACTS_TUPLE,
    );

    lower_locals(unit, ctx, diagnostics, &mut out)?;
    Ok(out)
}

/// Value-set locals share one `local_t` tuple; other locals need no storage.
fn lower_locals(
    unit: &ParserUnit,
    ctx: &LowerCtx<'_>,
    diagnostics: &mut Diagnostics,
    out: &mut LoweredTuples,
) -> Result<(), LowerError> {
    let mut fields = Vec::new();
    let mut owners: IndexMap<&str, &str> = IndexMap::new();

    for local in &unit.locals {
        let LocalDecl::ValueSet { element_type, .. } = local else {
            log::trace!("local `{}`: no storage", local.name());
            continue;
        };
        let storage = local.control_plane_name().unwrap_or(local.name());
        if let Some(first) = owners.insert(storage, local.name()) {
            let err = LowerError::DuplicateLocalStorage(format!(
                "`{first}` and `{}` both store into `{LOCAL_TUPLE}.{storage}`",
                local.name()
            ));
            let hint = format!("give `{}` a different `@name`", local.name());
            return Err(err.report_with_hint(diagnostics, local.span(), hint));
        }

        let element = ctx.types.resolve_type(element_type);
        let Some(width) = element.width_bits() else {
            let err = LowerError::UnsupportedAggregateKind(format!(
                "value set `{}` has element type `{element}` without a fixed 32-bit width",
                local.name()
            ));
            return Err(err.report(diagnostics, local.span()));
        };

        log::trace!("local `{}`: `{storage} : {width}`", local.name());
        fields.push(TupleField::new(storage, width));
        out.locals.insert(local.name(), format!("{LOCAL_TUPLE}.{storage}"));
    }

    if !fields.is_empty() {
        out.push(TupleDef::fields(LOCAL_TUPLE_TYPE, "", fields), LOCAL_TUPLE);
    }

    Ok(())
}
