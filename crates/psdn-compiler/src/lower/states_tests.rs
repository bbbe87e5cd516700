use psdn_core::{
    BinaryOp, Direction, Expr, FieldDecl, Keyset, Param, ParserState, SelectCase, Span, Statement,
    Transition, TypeDecl, TypeRef,
};

use super::LowerError;
use crate::diagnostics::DiagnosticKind;
use crate::target::{NextSection, SectionMethod};
use crate::test_utils::{base_unit, hdr, lower_err, lower_ok, sample_unit, with_start};

fn updates(output: &super::LoweredOutput, section: &str) -> Vec<String> {
    output
        .section(section)
        .unwrap()
        .updates
        .iter()
        .map(|u| u.to_string())
        .collect()
}

/// `p` is a struct holding `h : h_t { a : 8, b : 24 }`.
fn small_header_unit() -> psdn_core::ParserUnit {
    base_unit()
        .with_type(
            "h_t",
            TypeDecl::Header {
                fields: vec![FieldDecl::bits("a", 8), FieldDecl::bits("b", 24)],
            },
        )
        .with_type(
            "p_t",
            TypeDecl::Struct {
                fields: vec![FieldDecl::new("h", TypeRef::named("h_t"))],
            },
        )
        .with_param(Param::new("p", Direction::Out, TypeRef::named("p_t")))
}

#[test]
fn section_indices() {
    let output = lower_ok(&sample_unit());

    let indices: Vec<_> = output
        .sections
        .iter()
        .map(|s| (s.name.as_str(), s.index))
        .collect();
    assert_eq!(
        indices,
        [("start", 1), ("parse_ipv4", 2), ("accept", 5), ("reject", 4)]
    );
}

#[test]
fn terminal_sections_are_done() {
    let output = lower_ok(&sample_unit());

    for name in [ParserState::ACCEPT, ParserState::REJECT] {
        let section = output.section(name).unwrap();
        let methods = section.method_table();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[&SectionMethod::MoveToSection], "done(0)");
        assert_eq!(methods[&SectionMethod::IncrementOffset], "0");
        assert!(section.struct_decls.is_empty());
    }
}

#[test]
fn ordinary_index_skips_terminals() {
    let unit = base_unit()
        .with_state(ParserState::reject())
        .with_state(ParserState::new("first").with_transition(Transition::direct("second")))
        .with_state(ParserState::accept())
        .with_state(ParserState::new("second").with_transition(Transition::direct("accept")));
    let output = lower_ok(&unit);

    assert_eq!(output.section("first").unwrap().index, 1);
    assert_eq!(output.section("second").unwrap().index, 2);
    assert_eq!(output.section("reject").unwrap().index, 4);
    assert_eq!(output.section("accept").unwrap().index, 5);
}

#[test]
fn extract_small_header() {
    let unit = with_start(
        small_header_unit(),
        vec![Statement::extract("packet", Expr::path("p").member("h"))],
    );
    let output = lower_ok(&unit);

    assert_eq!(
        updates(&output, "start"),
        [
            "p.h.isValid = 1",
            "p.h.a = a",
            "p.h.b = b",
            "TopParser_extracts.size = TopParser_extracts.size + 32",
        ]
    );
    let start = output.section("start").unwrap();
    assert_eq!(start.struct_decls, ["struct {\n\ta : 8,\n\tb : 24\n}"]);
    assert_eq!(start.increments, [32]);
    assert_eq!(
        start.method_table()[&SectionMethod::Update],
        "p.h.isValid = 1,\np.h.a = a,\np.h.b = b,\nTopParser_extracts.size = TopParser_extracts.size + 32,"
    );
}

#[test]
fn extracts_accumulate_in_order() {
    let unit = with_start(
        base_unit(),
        vec![
            Statement::extract("packet", hdr("ethernet")),
            Statement::assign(
                Expr::path("meta").member("flag"),
                Expr::sized(1, 1),
            ),
            Statement::extract("packet", hdr("ipv4")),
        ],
    );
    let output = lower_ok(&unit);
    let start = output.section("start").unwrap();

    assert_eq!(start.struct_decls.len(), 2);
    assert_eq!(start.increment_offset(), "112 + 112");
    let updates = updates(&output, "start");
    assert_eq!(updates[4], "TopParser_extracts.size = TopParser_extracts.size + 112");
    assert_eq!(updates[5], "meta.flag = 1");
    assert_eq!(updates[6], "hdr.ipv4.isValid = 1");
}

#[test]
fn assignments_keep_order_and_duplicates() {
    let unit = with_start(
        base_unit(),
        vec![
            Statement::assign(Expr::path("meta").member("flag"), Expr::boolean(true)),
            Statement::assign(
                hdr("ethernet").member("etherType"),
                Expr::binary(
                    BinaryOp::Add,
                    hdr("ethernet").member("etherType"),
                    Expr::constant(1),
                ),
            ),
            Statement::assign(Expr::path("meta").member("flag"), Expr::boolean(true)),
        ],
    );
    let output = lower_ok(&unit);

    assert_eq!(
        updates(&output, "start"),
        [
            "meta.flag = 1",
            "hdr.ethernet.etherType = (hdr.ethernet.etherType + 1)",
            "meta.flag = 1",
        ]
    );
    assert_eq!(output.section("start").unwrap().increment_offset(), "0");
}

#[test]
fn other_calls_and_statements_pass_over() {
    let unit = with_start(
        base_unit(),
        vec![
            Statement::call(hdr("ethernet").member("setValid"), vec![]),
            Statement::call(Expr::path("count_packet"), vec![Expr::constant(1)]),
            Statement::Empty,
            Statement::Other {
                text: "verify(true, error.NoMatch);".into(),
                span: None,
            },
        ],
    );
    let (result, diagnostics) = crate::test_utils::lower_with_oracle(&unit);
    let output = result.unwrap();

    assert!(output.section("start").unwrap().method_table().get(&SectionMethod::Update).is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn extract_arity() {
    let unit = with_start(
        base_unit(),
        vec![Statement::Call {
            method: Expr::path("packet").member("extract"),
            args: vec![hdr("ethernet"), Expr::constant(32)],
            span: Some(Span::new(10, 45)),
        }],
    );
    let (err, diagnostics) = lower_err(&unit);

    assert_eq!(err, LowerError::UnsupportedExtractArity(2));
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "`extract` takes 1 argument, found 2");
    assert_eq!(u32::from(diag.range().unwrap().start()), 10);
}

#[test]
fn extract_non_header() {
    let unit = with_start(
        base_unit(),
        vec![Statement::extract("packet", Expr::path("meta"))],
    );
    let (err, diagnostics) = lower_err(&unit);

    assert_eq!(
        err,
        LowerError::InvalidExtractArgument(
            "`meta` has type `struct metadata_t`, only headers can be extracted".into()
        )
    );
    assert_eq!(
        diagnostics.iter().next().unwrap().kind(),
        DiagnosticKind::InvalidExtractArgument
    );
}

#[test]
fn extract_bare_header_is_ignored() {
    let unit = with_start(
        base_unit().with_param(Param::new(
            "eth",
            Direction::Out,
            TypeRef::named("ethernet_t"),
        )),
        vec![Statement::extract("packet", Expr::path("eth"))],
    );
    let (result, diagnostics) = crate::test_utils::lower_with_oracle(&unit);
    let output = result.unwrap();

    let start = output.section("start").unwrap();
    assert!(start.updates.is_empty());
    assert!(start.increments.is_empty());
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "`extract` target is not a member access: `eth`"
    );
}

fn vlan_unit() -> psdn_core::ParserUnit {
    base_unit()
        .with_type(
            "vlan_t",
            TypeDecl::Header {
                fields: vec![FieldDecl::bits("vid", 12), FieldDecl::bits("tpid", 4)],
            },
        )
        .with_type(
            "tags_t",
            TypeDecl::Struct {
                fields: vec![FieldDecl::new(
                    "vlan",
                    TypeRef::stack(TypeRef::named("vlan_t"), 2),
                )],
            },
        )
        .with_param(Param::new("tags", Direction::Out, TypeRef::named("tags_t")))
}

#[test]
fn extract_stack_next_rejected() {
    let unit = with_start(
        vlan_unit(),
        vec![Statement::extract(
            "packet",
            Expr::path("tags").member("vlan").member("next"),
        )],
    );
    let (err, diagnostics) = lower_err(&unit);

    assert!(matches!(err, LowerError::UnsupportedAggregateKind(_)));
    assert_eq!(
        diagnostics.iter().next().unwrap().kind(),
        DiagnosticKind::UnsupportedAggregateKind
    );
}

#[test]
fn extract_stack_index_is_ignored() {
    let unit = with_start(
        vlan_unit(),
        vec![Statement::extract(
            "packet",
            Expr::path("tags").member("vlan").index(Expr::constant(0)),
        )],
    );
    let (result, diagnostics) = crate::test_utils::lower_with_oracle(&unit);

    assert!(result.is_ok());
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn extract_union_member_rejected() {
    let unit = with_start(
        base_unit()
            .with_type(
                "l3_t",
                TypeDecl::HeaderUnion {
                    fields: vec![FieldDecl::new("ipv4", TypeRef::named("ipv4_t"))],
                },
            )
            .with_type(
                "u_t",
                TypeDecl::Struct {
                    fields: vec![FieldDecl::new("l3", TypeRef::named("l3_t"))],
                },
            )
            .with_param(Param::new("u", Direction::Out, TypeRef::named("u_t"))),
        vec![Statement::extract(
            "packet",
            Expr::path("u").member("l3").member("ipv4"),
        )],
    );
    let (err, _) = lower_err(&unit);

    assert_eq!(
        err,
        LowerError::UnsupportedAggregateKind("`u.l3` has type `header_union l3_t`".into())
    );
}

#[test]
fn extract_header_with_bool_field_rejected() {
    let unit = with_start(
        base_unit()
            .with_type(
                "flags_t",
                TypeDecl::Header {
                    fields: vec![
                        FieldDecl::bits("kind", 7),
                        FieldDecl::new("urgent", TypeRef::Bool),
                    ],
                },
            )
            .with_type(
                "f_t",
                TypeDecl::Struct {
                    fields: vec![FieldDecl::new("flags", TypeRef::named("flags_t"))],
                },
            )
            .with_param(Param::new("f", Direction::Out, TypeRef::named("f_t"))),
        vec![Statement::extract("packet", Expr::path("f").member("flags"))],
    );
    let (err, diagnostics) = lower_err(&unit);

    assert_eq!(
        err,
        LowerError::UnsupportedAggregateKind(
            "field `f.flags.urgent` has type `bool`, expected a fixed-width bit type".into()
        )
    );
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn extract_header_wider_than_u32_rejected() {
    let unit = with_start(
        base_unit()
            .with_type(
                "big_t",
                TypeDecl::Header {
                    fields: vec![FieldDecl::bits("a", u32::MAX), FieldDecl::bits("b", 8)],
                },
            )
            .with_type(
                "p_t",
                TypeDecl::Struct {
                    fields: vec![FieldDecl::new("h", TypeRef::named("big_t"))],
                },
            )
            .with_param(Param::new("p", Direction::Out, TypeRef::named("p_t"))),
        vec![Statement::extract("packet", Expr::path("p").member("h"))],
    );
    let (err, diagnostics) = lower_err(&unit);

    assert_eq!(
        err,
        LowerError::UnsupportedAggregateKind(
            "`p.h` has type `header big_t`, wider than 4294967295 bits".into()
        )
    );
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn select_resolves_value_sets() {
    let output = lower_ok(&sample_unit());

    let start = output.section("start").unwrap();
    assert_eq!(
        start.next.to_string(),
        "if (hdr.ethernet.etherType == 2048) parse_ipv4 else if (hdr.ethernet.etherType == local.pvs) parse_ipv4 else accept"
    );
    assert_eq!(
        output.section("parse_ipv4").unwrap().next,
        NextSection::Section("accept".into())
    );
}

#[test]
fn select_without_default_rejects() {
    let unit = base_unit()
        .with_state(ParserState::new("start").with_transition(Transition::Select {
            keys: vec![hdr("ethernet").member("etherType"), hdr("ipv4").member("protocol")],
            cases: vec![
                SelectCase::new(
                    vec![
                        Keyset::Mask {
                            value: Expr::constant(0x0800),
                            mask: Expr::constant(0xff00),
                        },
                        Keyset::Value {
                            value: Expr::constant(6),
                        },
                    ],
                    "accept",
                ),
                SelectCase::new(
                    vec![
                        Keyset::Default,
                        Keyset::Value {
                            value: Expr::constant(17),
                        },
                    ],
                    "accept",
                ),
            ],
        }))
        .with_state(ParserState::accept())
        .with_state(ParserState::reject());
    let output = lower_ok(&unit);

    insta::assert_snapshot!(
        output.section("start").unwrap().next.to_string(),
        @"if (((hdr.ethernet.etherType & 65280) == 2048) && (hdr.ipv4.protocol == 6)) accept else if (hdr.ipv4.protocol == 17) accept else reject"
    );
}

#[test]
fn cases_after_default_are_unreachable() {
    let unit = base_unit()
        .with_state(ParserState::new("start").with_transition(Transition::Select {
            keys: vec![hdr("ethernet").member("etherType")],
            cases: vec![
                SelectCase::new(vec![Keyset::Default], "accept"),
                SelectCase::new(
                    vec![Keyset::Value {
                        value: Expr::constant(1),
                    }],
                    "reject",
                ),
            ],
        }))
        .with_state(ParserState::accept())
        .with_state(ParserState::reject());
    let output = lower_ok(&unit);

    assert_eq!(output.section("start").unwrap().next.to_string(), "accept");
}

#[test]
fn missing_transition_rejects() {
    let unit = base_unit()
        .with_state(ParserState::new("start"))
        .with_state(ParserState::accept())
        .with_state(ParserState::reject());
    let output = lower_ok(&unit);

    assert_eq!(
        output.section("start").unwrap().next,
        NextSection::Section("reject".into())
    );
}
