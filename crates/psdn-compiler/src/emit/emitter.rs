//! Core emitter struct and main emit logic.

use psdn_core::{Colors, Role};

use super::EmitConfig;
use crate::lower::LoweredOutput;
use crate::target::{Section, SectionMethod, TupleDef, TupleInst};

/// PX emitter for one lowered parser unit.
pub struct Emitter<'a> {
    lowered: &'a LoweredOutput,
    config: EmitConfig,
    output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(lowered: &'a LoweredOutput, config: EmitConfig) -> Self {
        Self {
            lowered,
            config,
            output: String::new(),
        }
    }

    fn c(&self) -> Colors {
        self.config.colors
    }

    /// Emit all items in section, definition, instance order.
    pub fn emit(mut self) -> String {
        let lowered = self.lowered;
        for section in &lowered.sections {
            self.emit_section(section);
        }
        for def in &lowered.tuple_defs {
            self.emit_tuple_def(def);
        }
        for inst in &lowered.tuple_insts {
            self.emit_tuple_inst(inst);
        }
        self.output
    }

    fn pad(&self, level: usize) -> String {
        self.config.indent_unit.repeat(self.config.indent + level)
    }

    /// Push a multi-line block, each non-empty line prefixed at `level`.
    fn push_block(&mut self, text: &str, level: usize) {
        let pad = self.pad(level);
        for line in text.lines() {
            if !line.is_empty() {
                self.output.push_str(&pad);
                self.output.push_str(line);
            }
            self.output.push('\n');
        }
    }

    fn emit_section(&mut self, section: &Section) {
        let c = self.c();
        let pad = self.pad(0);
        self.output.push_str(&format!(
            "{pad}{} {}{}{}{}\n",
            c.paint(Role::Keyword, "class"),
            c.paint(Role::Name, &section.name),
            c.paint(Role::Keyword, "::Section("),
            c.paint(Role::Number, section.index),
            c.paint(Role::Keyword, ") {"),
        ));

        for decl in &section.struct_decls {
            self.push_block(decl, 1);
        }

        let inner = self.pad(1);
        for (method, body) in section.method_table() {
            let head = format!("{inner}{} {}", c.paint(Role::Keyword, "method"), method.as_str());
            match method {
                SectionMethod::Update => {
                    self.output.push_str(&format!("{head} = {{\n"));
                    self.push_block(&body, 2);
                    self.output.push_str(&format!("{inner}}}\n"));
                }
                SectionMethod::MoveToSection => {
                    self.output
                        .push_str(&format!("{head} = {};\n", c.paint(Role::Name, &body)));
                }
                SectionMethod::IncrementOffset => {
                    self.output
                        .push_str(&format!("{head} = {};\n", c.paint(Role::Number, &body)));
                }
            }
        }

        self.output.push_str(&format!("{pad}}}\n"));
    }

    fn emit_tuple_def(&mut self, def: &TupleDef) {
        let c = self.c();
        let pad = self.pad(0);
        let direction = if def.direction.is_empty() {
            String::new()
        } else {
            format!("({})", def.direction)
        };
        self.output.push_str(&format!(
            "{pad}{} {}{}\n",
            c.paint(Role::Keyword, "class"),
            c.paint(Role::Name, &def.name),
            c.paint(Role::Keyword, format!("::Tuple{direction} {{")),
        ));
        self.push_block(&def.body.render(), 1);
        self.output.push_str(&format!("{pad}}}\n"));
    }

    fn emit_tuple_inst(&mut self, inst: &TupleInst) {
        let c = self.c();
        let pad = self.pad(0);
        self.output.push_str(&format!(
            "{pad}{} {};\n",
            inst.type_name,
            c.paint(Role::Name, &inst.name)
        ));
    }
}
