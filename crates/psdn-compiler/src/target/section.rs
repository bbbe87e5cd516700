use std::fmt;

use indexmap::IndexMap;

/// One parser section: `class <name>::Section(<index>) { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub index: usize,
    /// Flat layouts of the headers extracted in this section, in extract order.
    pub struct_decls: Vec<String>,
    pub updates: Vec<Update>,
    pub next: NextSection,
    /// Bit widths consumed by each extract, in extract order.
    pub increments: Vec<u32>,
}

/// Method slots of a section body, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionMethod {
    Update,
    MoveToSection,
    IncrementOffset,
}

impl SectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionMethod::Update => "update",
            SectionMethod::MoveToSection => "move_to_section",
            SectionMethod::IncrementOffset => "increment_offset",
        }
    }
}

impl Section {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            struct_decls: Vec::new(),
            updates: Vec::new(),
            next: NextSection::Done(0),
            increments: Vec::new(),
        }
    }

    /// A section that ends parsing: `done(0)`, no offset advance.
    pub fn terminal(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, index)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.next, NextSection::Done(_))
    }

    /// Sum expression for `increment_offset`; `0` when nothing was extracted.
    ///
    /// Per-extract widths are joined with ` + ` into one expression, so the
    /// method carries a single terminating `;` rather than one per extract.
    pub fn increment_offset(&self) -> String {
        if self.increments.is_empty() {
            return "0".to_string();
        }
        self.increments
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Method bodies keyed by method; `update` is present only when non-empty.
    pub fn method_table(&self) -> IndexMap<SectionMethod, String> {
        let mut methods = IndexMap::new();
        if !self.updates.is_empty() {
            let body = self
                .updates
                .iter()
                .map(|u| format!("{u},"))
                .collect::<Vec<_>>()
                .join("\n");
            methods.insert(SectionMethod::Update, body);
        }
        methods.insert(SectionMethod::MoveToSection, self.next.to_string());
        methods.insert(SectionMethod::IncrementOffset, self.increment_offset());
        methods
    }
}

/// A single `target = value` entry of the `update` method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub target: String,
    pub value: String,
}

impl Update {
    pub fn new(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// Value of `move_to_section`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextSection {
    /// Stop parsing with the given code.
    Done(u32),
    Section(String),
    /// First matching arm wins; `default` otherwise.
    Select {
        arms: Vec<SelectArm>,
        default: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectArm {
    pub condition: String,
    pub target: String,
}

impl SelectArm {
    pub fn new(condition: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for NextSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextSection::Done(code) => write!(f, "done({code})"),
            NextSection::Section(name) => f.write_str(name),
            NextSection::Select { arms, default } => {
                for arm in arms {
                    write!(f, "if ({}) {} else ", arm.condition, arm.target)?;
                }
                f.write_str(default)
            }
        }
    }
}
