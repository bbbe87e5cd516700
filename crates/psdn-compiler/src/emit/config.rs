//! Configuration for PX emission.

use psdn_core::Colors;

/// Configuration for PX emission.
#[derive(Clone, Debug)]
pub struct EmitConfig {
    /// Indent levels applied to every top-level item
    pub(crate) indent: usize,
    /// String used for one indent level
    pub(crate) indent_unit: &'static str,
    /// Color configuration for output
    pub(crate) colors: Colors,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: 1,
            indent_unit: "\t",
            colors: Colors::OFF,
        }
    }
}

impl EmitConfig {
    /// Create a new EmitConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of indent levels for top-level items.
    pub fn indent(mut self, levels: usize) -> Self {
        self.indent = levels;
        self
    }

    /// Indent with `width` spaces per level instead of tabs.
    ///
    /// Layout bodies from the renderer keep their own tabs.
    pub fn spaces(mut self, width: usize) -> Self {
        const SPACES: &str = "        ";
        self.indent_unit = &SPACES[..width.min(SPACES.len())];
        self
    }

    /// Set whether to use colored output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }
}
