use psdn_core::{Direction, Param, TypeRef};

use super::*;
use crate::test_utils::{base_unit, sample_unit};

#[test]
fn lower_unit_returns_output_and_warnings() {
    let (output, diagnostics) = lower_unit(&sample_unit()).unwrap();

    assert_eq!(output.sections.len(), 4);
    assert!(diagnostics.is_empty());
}

#[test]
fn lower_unit_error_carries_unit_and_diagnostics() {
    let unit = base_unit().with_param(Param::new("n", Direction::In, TypeRef::bits(8)));
    let err = lower_unit(&unit).unwrap_err();

    insta::assert_snapshot!(
        err.to_string(),
        @"lowering parser `TopParser` failed: invalid parser parameter: `n` has type `bit<8>`"
    );
    assert_eq!(err.diagnostics().error_count(), 1);
}

#[test]
fn lower_unit_from_json() {
    let json = indoc::indoc! {r#"
        {
            "name": "TopParser",
            "types": {
                "packet_in": {"kind": "extern"},
                "h_t": {
                    "kind": "header",
                    "fields": [
                        {"name": "a", "type": {"kind": "bits", "width": 8}},
                        {"name": "b", "type": {"kind": "bits", "width": 24}}
                    ]
                },
                "p_t": {
                    "kind": "struct",
                    "fields": [{"name": "h", "type": {"kind": "named", "name": "h_t"}}]
                }
            },
            "params": [
                {"name": "packet", "type": {"kind": "named", "name": "packet_in"}},
                {"name": "p", "direction": "out", "type": {"kind": "named", "name": "p_t"}}
            ],
            "states": [
                {
                    "name": "start",
                    "statements": [{
                        "kind": "call",
                        "method": {
                            "kind": "member",
                            "base": {"kind": "path", "name": "packet"},
                            "member": "extract"
                        },
                        "args": [{
                            "kind": "member",
                            "base": {"kind": "path", "name": "p"},
                            "member": "h"
                        }]
                    }],
                    "transition": {"kind": "direct", "target": "accept"}
                },
                {"name": "accept"},
                {"name": "reject"}
            ]
        }
    "#};
    let unit = psdn_core::parse_unit(json).unwrap();
    let (output, _) = lower_unit(&unit).unwrap();
    let text = output.emit(&EmitConfig::new().indent(0));

    let expected = concat!(
        "class start::Section(1) {\n",
        "\tstruct {\n",
        "\t\ta : 8,\n",
        "\t\tb : 24\n",
        "\t}\n",
        "\tmethod update = {\n",
        "\t\tp.h.isValid = 1,\n",
        "\t\tp.h.a = a,\n",
        "\t\tp.h.b = b,\n",
        "\t\tTopParser_extracts.size = TopParser_extracts.size + 32,\n",
        "\t}\n",
        "\tmethod move_to_section = accept;\n",
        "\tmethod increment_offset = 32;\n",
        "}\n",
        "class accept::Section(4) {\n",
        "\tmethod move_to_section = done(0);\n",
        "\tmethod increment_offset = 0;\n",
        "}\n",
        "class reject::Section(3) {\n",
        "\tmethod move_to_section = done(0);\n",
        "\tmethod increment_offset = 0;\n",
        "}\n",
        "class p_t::Tuple(out) {\n",
        "\tstruct {\n",
        "\t\th_isValid : 1,\n",
        "\t\th_a : 8,\n",
        "\t\th_b : 24\n",
        "\t}\n",
        "}\n",
        "class TopParser_extracts_t::Tuple(out) {\n",
        "\tstruct {\n",
        "\t\tsize : 32\n",
        "\t}\n",
        "}\n",
        "p_t p;\n",
        "TopParser_extracts_t TopParser_extracts;\n",
    );
    assert_eq!(text, expected);
}
