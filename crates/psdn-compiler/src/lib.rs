//! psdn compiler: lowering of protocol parsers into SDNet PX sections and tuples.
//!
//! This crate provides the lowering pipeline for parser units:
//! - `oracle` - collaborator traits and a reference implementation
//! - `lower` - parameter, locals and state-machine lowering
//! - `target` - tuple and section model
//! - `emit` - PX text emission
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod emit;
pub mod lower;
pub mod oracle;
pub mod target;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod lib_tests;

use psdn_core::ParserUnit;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use emit::EmitConfig;
pub use lower::{LocalMap, LowerCtx, LowerError, LoweredOutput, lower};
pub use oracle::UnitOracle;

/// Result type for passes that produce both output and diagnostics.
///
/// Warnings collected on success travel alongside the output.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that can occur while lowering a parser unit.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("lowering parser `{unit}` failed: {source}")]
    LowerFailed {
        unit: String,
        source: LowerError,
        diagnostics: Diagnostics,
    },
}

impl Error {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Error::LowerFailed { diagnostics, .. } => diagnostics,
        }
    }
}

/// Result type for lowering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Lower `unit` against its own type declarations.
pub fn lower_unit(unit: &ParserUnit) -> PassResult<LoweredOutput> {
    let oracle = UnitOracle::new(unit);
    lower_unit_with(unit, &LowerCtx::from_oracle(&oracle))
}

/// Lower `unit` with explicit collaborators.
pub fn lower_unit_with(unit: &ParserUnit, ctx: &LowerCtx<'_>) -> PassResult<LoweredOutput> {
    let mut diagnostics = Diagnostics::new();
    match lower(unit, ctx, &mut diagnostics) {
        Ok(output) => Ok((output, diagnostics)),
        Err(source) => Err(Error::LowerFailed {
            unit: unit.name.clone(),
            source,
            diagnostics,
        }),
    }
}
