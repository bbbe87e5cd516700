//! Shared fixtures for lowering tests.

use psdn_core::{
    Direction, Expr, FieldDecl, Keyset, LocalDecl, Param, ParserState, ParserUnit, SelectCase,
    Statement, Transition, TypeDecl, TypeRef,
};

use crate::diagnostics::Diagnostics;
use crate::lower::{LowerCtx, LowerError, LoweredOutput, lower};
use crate::oracle::UnitOracle;

/// Lower `unit` against its own declarations.
pub fn lower_with_oracle(unit: &ParserUnit) -> (Result<LoweredOutput, LowerError>, Diagnostics) {
    let oracle = UnitOracle::new(unit);
    let mut diagnostics = Diagnostics::new();
    let result = lower(unit, &LowerCtx::from_oracle(&oracle), &mut diagnostics);
    (result, diagnostics)
}

/// Lower `unit`, panicking on error.
pub fn lower_ok(unit: &ParserUnit) -> LoweredOutput {
    let (result, diagnostics) = lower_with_oracle(unit);
    match result {
        Ok(output) => output,
        Err(err) => panic!("lowering failed: {err}\n{}", diagnostics.render()),
    }
}

/// Lower `unit`, expecting an error.
pub fn lower_err(unit: &ParserUnit) -> (LowerError, Diagnostics) {
    let (result, diagnostics) = lower_with_oracle(unit);
    match result {
        Ok(_) => panic!("expected lowering to fail"),
        Err(err) => (err, diagnostics),
    }
}

/// `start` runs `statements` then accepts; plus the two terminal states.
pub fn with_start(unit: ParserUnit, statements: Vec<Statement>) -> ParserUnit {
    let mut start =
        ParserState::new("start").with_transition(Transition::direct(ParserState::ACCEPT));
    start.statements = statements;
    unit.with_state(start)
        .with_state(ParserState::accept())
        .with_state(ParserState::reject())
}

/// Ethernet + IPv4 types, with `packet`, `hdr` (out) and `meta` (inout) parameters.
///
/// No locals and no states; tests add what they need.
pub fn base_unit() -> ParserUnit {
    ParserUnit::new("TopParser")
        .with_type("packet_in", TypeDecl::Extern)
        .with_type(
            "ethernet_t",
            TypeDecl::Header {
                fields: vec![
                    FieldDecl::bits("dst", 48),
                    FieldDecl::bits("src", 48),
                    FieldDecl::bits("etherType", 16),
                ],
            },
        )
        .with_type(
            "ipv4_t",
            TypeDecl::Header {
                fields: vec![
                    FieldDecl::bits("version", 4),
                    FieldDecl::bits("ihl", 4),
                    FieldDecl::bits("tos", 8),
                    FieldDecl::bits("len", 16),
                    FieldDecl::bits("ttl", 8),
                    FieldDecl::bits("protocol", 8),
                    FieldDecl::bits("src", 32),
                    FieldDecl::bits("dst", 32),
                ],
            },
        )
        .with_type(
            "headers_t",
            TypeDecl::Struct {
                fields: vec![
                    FieldDecl::new("ethernet", TypeRef::named("ethernet_t")),
                    FieldDecl::new("ipv4", TypeRef::named("ipv4_t")),
                ],
            },
        )
        .with_type(
            "metadata_t",
            TypeDecl::Struct {
                fields: vec![FieldDecl::bits("flag", 1)],
            },
        )
        .with_param(Param::new(
            "packet",
            Direction::None,
            TypeRef::named("packet_in"),
        ))
        .with_param(Param::new("hdr", Direction::Out, TypeRef::named("headers_t")))
        .with_param(Param::new(
            "meta",
            Direction::Inout,
            TypeRef::named("metadata_t"),
        ))
}

/// `hdr.<member>`
pub fn hdr(member: &str) -> Expr {
    Expr::path("hdr").member(member)
}

/// Classic Ethernet/IPv4 parser with a value set matched in `start`.
pub fn sample_unit() -> ParserUnit {
    base_unit()
        .with_local(LocalDecl::value_set("pvs", TypeRef::bits(16), 4))
        .with_state(
            ParserState::new("start")
                .with_statement(Statement::extract("packet", hdr("ethernet")))
                .with_transition(Transition::Select {
                    keys: vec![hdr("ethernet").member("etherType")],
                    cases: vec![
                        SelectCase::new(
                            vec![Keyset::Value {
                                value: Expr::sized(0x0800, 16),
                            }],
                            "parse_ipv4",
                        ),
                        SelectCase::new(
                            vec![Keyset::Value {
                                value: Expr::path("pvs"),
                            }],
                            "parse_ipv4",
                        ),
                        SelectCase::new(vec![Keyset::Default], ParserState::ACCEPT),
                    ],
                }),
        )
        .with_state(
            ParserState::new("parse_ipv4")
                .with_statement(Statement::extract("packet", hdr("ipv4")))
                .with_transition(Transition::direct(ParserState::ACCEPT)),
        )
        .with_state(ParserState::accept())
        .with_state(ParserState::reject())
}
