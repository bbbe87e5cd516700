//! Serialization of lowered output into PX text.
//!
//! Sections come first, then tuple definitions, then tuple instances, each
//! in the order the pass produced them.

mod config;
mod emitter;


pub use config::EmitConfig;
pub use emitter::Emitter;

use crate::lower::LoweredOutput;

impl LoweredOutput {
    /// Render all sections, tuple definitions and instances as PX text.
    pub fn emit(&self, config: &EmitConfig) -> String {
        Emitter::new(self, config.clone()).emit()
    }
}
