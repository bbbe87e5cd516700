//! State-machine lowering: one section per parser state.

use psdn_core::{
    EXTRACT_METHOD, Expr, Keyset, PACKET_SOURCE_EXTERN, ParserState, ParserUnit, Span, Statement,
    Transition,
};

use super::{LocalMap, LowerCtx, LowerError};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::oracle::{ResolvedCall, ResolvedType, VALIDITY_FIELD};
use crate::target::{EXTRACTS_TUPLE, NextSection, Section, SelectArm, Update};

pub(super) fn lower_states(
    unit: &ParserUnit,
    ctx: &LowerCtx<'_>,
    locals: &LocalMap,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Section>, LowerError> {
    let num_states = unit.states.len();
    let mut sections = Vec::with_capacity(num_states);
    let mut ordinal = 0;

    for state in &unit.states {
        let section = if state.is_reject() {
            Section::terminal(ParserState::REJECT, num_states)
        } else if state.is_accept() {
            Section::terminal(ParserState::ACCEPT, num_states + 1)
        } else {
            ordinal += 1;
            StateLowering::new(ctx, locals, diagnostics).lower(state, ordinal)?
        };

        log::debug!("state `{}` -> section {}", state.name, section.index);
        sections.push(section);
    }

    Ok(sections)
}

/// Builds the section for a single non-terminal state.
struct StateLowering<'a, 'd> {
    ctx: &'a LowerCtx<'a>,
    locals: &'a LocalMap,
    diagnostics: &'d mut Diagnostics,
}

impl<'a, 'd> StateLowering<'a, 'd> {
    fn new(ctx: &'a LowerCtx<'a>, locals: &'a LocalMap, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            ctx,
            locals,
            diagnostics,
        }
    }

    fn lower(mut self, state: &ParserState, index: usize) -> Result<Section, LowerError> {
        let mut section = Section::new(&state.name, index);

        for statement in &state.statements {
            self.lower_statement(statement, &mut section)?;
        }
        section.next = self.lower_transition(state.transition.as_ref());

        Ok(section)
    }

    fn lower_statement(
        &mut self,
        statement: &Statement,
        section: &mut Section,
    ) -> Result<(), LowerError> {
        match statement {
            Statement::Assign { left, right, .. } => {
                section
                    .updates
                    .push(Update::new(self.convert(left), self.convert(right)));
                Ok(())
            }
            Statement::Call { method, args, span } => {
                match self.ctx.calls.resolve_call(method, args) {
                    ResolvedCall::ExternMethod {
                        extern_name,
                        method: name,
                        args,
                    } if extern_name == PACKET_SOURCE_EXTERN && name == EXTRACT_METHOD => {
                        self.lower_extract(args, *span, section)
                    }
                    _ => {
                        log::trace!("passing over call `{method}`");
                        Ok(())
                    }
                }
            }
            Statement::Empty => Ok(()),
            Statement::Other { text, .. } => {
                log::trace!("passing over statement `{text}`");
                Ok(())
            }
        }
    }

    /// `packet.extract(<base>.<member>)`: declare the header layout, mark it
    /// valid, copy its fields, and advance the offset by its width.
    fn lower_extract(
        &mut self,
        args: &[Expr],
        span: Option<Span>,
        section: &mut Section,
    ) -> Result<(), LowerError> {
        let [arg] = args else {
            let err = LowerError::UnsupportedExtractArity(args.len());
            return Err(err.report(self.diagnostics, span));
        };
        let span = arg.span.or(span);

        let arg_ty = self.ctx.types.expr_type(arg);
        if !arg_ty.is_header() {
            let err = LowerError::InvalidExtractArgument(format!(
                "`{arg}` has type `{arg_ty}`, only headers can be extracted"
            ));
            return Err(err.report(self.diagnostics, span));
        }

        let Some((base, member)) = arg.as_member() else {
            log::warn!("extract target `{arg}` is not a member access, ignoring");
            self.diagnostics
                .report(DiagnosticKind::ExtractTargetIgnored, span)
                .message(format!("`{arg}`"))
                .emit();
            return Ok(());
        };

        let base_ty = self.ctx.types.expr_type(base);
        if base_ty.is_unflattenable() {
            let err = LowerError::UnsupportedAggregateKind(format!("`{base}` has type `{base_ty}`"));
            return Err(err.report(self.diagnostics, span));
        }
        let Some(base_struct) = base_ty.as_struct_like() else {
            let err = LowerError::InvalidExtractArgument(format!(
                "`{base}` has type `{base_ty}`, expected a struct"
            ));
            return Err(err.report(self.diagnostics, span));
        };
        let Some(field) = base_struct.field(member) else {
            let err = LowerError::InvalidExtractArgument(format!(
                "`{}` has no field `{member}`",
                base_struct.name
            ));
            return Err(err.report(self.diagnostics, span));
        };

        let field_ty = &field.ty;
        if field_ty.is_unflattenable() {
            let err =
                LowerError::UnsupportedAggregateKind(format!("`{arg}` has type `{field_ty}`"));
            return Err(err.report(self.diagnostics, span));
        }
        let Some(header) = field_ty.as_struct_like() else {
            let err = LowerError::InvalidExtractArgument(format!(
                "`{arg}` has type `{field_ty}`, expected a header"
            ));
            return Err(err.report(self.diagnostics, span));
        };

        let mut width: u32 = 0;
        for f in &header.fields {
            let ResolvedType::Bits(w) = f.ty else {
                let err = LowerError::UnsupportedAggregateKind(format!(
                    "field `{arg}.{}` has type `{}`, expected a fixed-width bit type",
                    f.name, f.ty
                ));
                return Err(err.report(self.diagnostics, span));
            };
            let Some(total) = width.checked_add(w) else {
                let err = LowerError::UnsupportedAggregateKind(format!(
                    "`{arg}` has type `{field_ty}`, wider than {} bits",
                    u32::MAX
                ));
                return Err(err.report(self.diagnostics, span));
            };
            width = total;
        }

        log::trace!("extract `{arg}`: {width} bits");
        section
            .struct_decls
            .push(self.ctx.layouts.render_layout(field_ty, true));

        section
            .updates
            .push(Update::new(format!("{arg}.{VALIDITY_FIELD}"), "1"));
        for f in &header.fields {
            section
                .updates
                .push(Update::new(format!("{arg}.{}", f.name), &f.name));
        }

        let size = format!("{EXTRACTS_TUPLE}.size");
        section
            .updates
            .push(Update::new(&size, format!("{size} + {width}")));
        section.increments.push(width);

        Ok(())
    }

    fn lower_transition(&self, transition: Option<&Transition>) -> NextSection {
        match transition {
            None => NextSection::Section(ParserState::REJECT.to_string()),
            Some(Transition::Direct { target }) => NextSection::Section(target.clone()),
            Some(Transition::Select { keys, cases }) => {
                let keys: Vec<String> = keys.iter().map(|k| self.convert(k)).collect();
                let mut arms = Vec::new();
                let mut default = None;

                for case in cases {
                    if case.is_default() {
                        default = Some(case.target.clone());
                        break;
                    }
                    let condition = self.keyset_condition(&keys, &case.keyset);
                    arms.push(SelectArm::new(condition, &case.target));
                }

                NextSection::Select {
                    arms,
                    default: default.unwrap_or_else(|| ParserState::REJECT.to_string()),
                }
            }
        }
    }

    /// Conjunction of per-key matches; `default` elements match anything.
    fn keyset_condition(&self, keys: &[String], keyset: &[Keyset]) -> String {
        let terms: Vec<String> = keys
            .iter()
            .zip(keyset)
            .filter_map(|(key, element)| match element {
                Keyset::Value { value } => Some(format!("{key} == {}", self.convert(value))),
                Keyset::Mask { value, mask } => Some(format!(
                    "({key} & {}) == {}",
                    self.convert(mask),
                    self.convert(value)
                )),
                Keyset::Default => None,
            })
            .collect();

        match terms.as_slice() {
            [single] => single.clone(),
            _ => terms
                .iter()
                .map(|t| format!("({t})"))
                .collect::<Vec<_>>()
                .join(" && "),
        }
    }

    /// Value-set names resolve to their storage path; everything else goes
    /// through the expression converter.
    fn convert(&self, expr: &Expr) -> String {
        if let Some(path) = expr.as_path().and_then(|name| self.locals.get(name)) {
            return path.to_string();
        }
        self.ctx.exprs.convert_expr(expr)
    }
}
