//! Lowering of a parser unit into tuples and sections.
//!
//! Two phases, run once per unit:
//! - `params`: apply-parameters and value-set locals become tuples, and the
//!   value-set storage paths are recorded in a [`LocalMap`]
//! - `states`: each state becomes a section, in declaration order, reading
//!   the local map
//!
//! The pass is a pure function of the unit and its collaborators. The first
//! error aborts the unit: it is reported into [`Diagnostics`] and returned,
//! and no partial output escapes.

mod error;
mod params;
mod states;

#[cfg(test)]
mod states_tests;

use indexmap::IndexMap;
use psdn_core::ParserUnit;

use crate::diagnostics::Diagnostics;
use crate::oracle::{CallResolver, ExprLowering, LayoutRenderer, Oracle, TypeResolver};
use crate::target::{Section, TupleDef, TupleInst};

pub use error::LowerError;

/// Collaborators consulted by the pass.
#[derive(Clone, Copy)]
pub struct LowerCtx<'a> {
    pub types: &'a dyn TypeResolver,
    pub exprs: &'a dyn ExprLowering,
    pub layouts: &'a dyn LayoutRenderer,
    pub calls: &'a dyn CallResolver,
}

impl<'a> LowerCtx<'a> {
    pub fn new(
        types: &'a dyn TypeResolver,
        exprs: &'a dyn ExprLowering,
        layouts: &'a dyn LayoutRenderer,
        calls: &'a dyn CallResolver,
    ) -> Self {
        Self {
            types,
            exprs,
            layouts,
            calls,
        }
    }

    /// Use one value for every collaborator role.
    pub fn from_oracle<O: Oracle + 'a>(oracle: &'a O) -> Self {
        Self::new(oracle, oracle, oracle, oracle)
    }
}

/// Value-set local name → storage path (`local.<control-plane name>`).
///
/// Filled once while lowering locals; read-only during state lowering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalMap {
    paths: IndexMap<String, String>,
}

impl LocalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path. The first entry for a name wins.
    pub(crate) fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.paths.entry(name.into()).or_insert_with(|| path.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything produced for one parser unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoweredOutput {
    pub sections: Vec<Section>,
    pub tuple_defs: Vec<TupleDef>,
    pub tuple_insts: Vec<TupleInst>,
    pub locals: LocalMap,
}

impl LoweredOutput {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn tuple_def(&self, name: &str) -> Option<&TupleDef> {
        self.tuple_defs.iter().find(|t| t.name == name)
    }
}

/// Lower one parser unit.
pub fn lower(
    unit: &ParserUnit,
    ctx: &LowerCtx<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<LoweredOutput, LowerError> {
    log::debug!(
        "lowering parser `{}`: {} params, {} locals, {} states",
        unit.name,
        unit.params.len(),
        unit.locals.len(),
        unit.states.len()
    );

    let tuples = params::lower_params(unit, ctx, diagnostics)?;
    let sections = states::lower_states(unit, ctx, &tuples.locals, diagnostics)?;

    log::debug!(
        "lowered parser `{}`: {} sections, {} tuples",
        unit.name,
        sections.len(),
        tuples.defs.len()
    );

    Ok(LoweredOutput {
        sections,
        tuple_defs: tuples.defs,
        tuple_insts: tuples.insts,
        locals: tuples.locals,
    })
}
