//! Terminal highlighting for emitted PX text.

/// What a highlighted span of PX output is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Section, tuple and instance names, and section targets.
    Name,
    /// Section indices and bit offsets.
    Number,
    /// `class`, `method` and class-kind punctuation.
    Keyword,
}

impl Role {
    fn code(self) -> &'static str {
        match self {
            Role::Name => "\x1b[34m",
            Role::Number => "\x1b[32m",
            Role::Keyword => "\x1b[2m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Highlighting switch carried by emit configuration. Disabled output is plain text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    pub const OFF: Self = Self { enabled: false };

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, role: Role, text: impl std::fmt::Display) -> String {
        if self.enabled {
            format!("{}{text}{RESET}", role.code())
        } else {
            text.to_string()
        }
    }
}
