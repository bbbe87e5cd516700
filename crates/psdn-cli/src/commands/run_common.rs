//! Shared lowering loop for `lower` and `check`.

use std::path::Path;

use psdn_compiler::{Diagnostics, LoweredOutput, lower_unit};
use psdn_core::ParserUnit;

use super::error::CliError;
use super::unit_loader::{SourceText, load_source, load_units};

/// Units plus the optional parser source their spans point into.
pub struct LoadedInput {
    pub units: Vec<ParserUnit>,
    pub source: Option<SourceText>,
}

impl LoadedInput {
    pub fn load(unit_path: &Path, source_path: Option<&Path>) -> Result<Self, CliError> {
        Ok(Self {
            units: load_units(unit_path)?,
            source: load_source(source_path)?,
        })
    }

    pub fn render(&self, diagnostics: &Diagnostics, color: bool) -> String {
        let mut printer = diagnostics.printer().colored(color);
        if let Some(source) = &self.source {
            printer = printer.source(&source.text).path(&source.path);
        }
        printer.render()
    }
}

/// Outcome of lowering every unit of an input.
pub struct LoweringRun {
    /// Successfully lowered units, in input order.
    pub outputs: Vec<(String, LoweredOutput)>,
    /// Rendered diagnostics, one entry per unit that reported any.
    pub reports: Vec<String>,
    pub failed: bool,
}

/// Lower each unit independently; a failing unit does not stop the others.
pub fn lower_all(input: &LoadedInput, strict: bool, color: bool) -> LoweringRun {
    let mut run = LoweringRun {
        outputs: Vec::new(),
        reports: Vec::new(),
        failed: false,
    };

    for unit in &input.units {
        match lower_unit(unit) {
            Ok((output, diagnostics)) => {
                if !diagnostics.is_empty() {
                    run.reports.push(input.render(&diagnostics, color));
                }
                if strict && diagnostics.has_warnings() {
                    log::debug!("unit `{}` has warnings, failing in strict mode", unit.name);
                    run.failed = true;
                    continue;
                }
                log::info!(
                    "unit `{}`: {} sections, {} tuples",
                    unit.name,
                    output.sections.len(),
                    output.tuple_defs.len()
                );
                run.outputs.push((unit.name.clone(), output));
            }
            Err(err) => {
                log::debug!("{err}");
                run.reports.push(input.render(err.diagnostics(), color));
                run.failed = true;
            }
        }
    }

    run
}
