//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, lower_command};
use crate::commands::lower::LowerArgs;

#[test]
fn lower_defaults() {
    let m = lower_command()
        .try_get_matches_from(["lower", "parser.json"])
        .unwrap();
    let params = LowerParams::from_matches(&m);

    assert_eq!(params.unit_path, PathBuf::from("parser.json"));
    assert_eq!(params.indent, 1);
    assert_eq!(params.color, ColorChoice::Auto);
    assert_eq!(params.verbose, 0);
    assert!(!params.strict);
    assert!(params.output.is_none());
    assert!(params.source_path.is_none());
}

#[test]
fn lower_all_flags() {
    let m = lower_command()
        .try_get_matches_from([
            "lower",
            "parser.json",
            "-s",
            "parser.p4",
            "-o",
            "out.px",
            "--indent",
            "0",
            "--strict",
            "--color",
            "never",
            "-vv",
        ])
        .unwrap();
    let params = LowerParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("parser.p4")));
    assert_eq!(params.output, Some(PathBuf::from("out.px")));
    assert_eq!(params.indent, 0);
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Never);
    assert_eq!(params.verbose, 2);
}

#[test]
fn lower_to_file_is_never_colored() {
    let m = lower_command()
        .try_get_matches_from(["lower", "parser.json", "-o", "out.px", "--color", "always"])
        .unwrap();
    let args: LowerArgs = LowerParams::from_matches(&m).into();

    assert!(!args.color);
}

#[test]
fn lower_requires_unit() {
    let result = lower_command().try_get_matches_from(["lower"]);
    assert!(result.is_err());
}

#[test]
fn lower_rejects_bad_indent() {
    let result = lower_command().try_get_matches_from(["lower", "p.json", "--indent", "two"]);
    assert!(result.is_err());
}

#[test]
fn check_extracts_params() {
    let m = check_command()
        .try_get_matches_from(["check", "-", "--strict", "--color", "always", "-v"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.unit_path, PathBuf::from("-"));
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Always);
    assert_eq!(params.verbose, 1);
}

#[test]
fn check_rejects_output_flag() {
    let result = check_command().try_get_matches_from(["check", "p.json", "-o", "x"]);
    assert!(result.is_err());
}

#[test]
fn cli_has_both_subcommands() {
    let cli = build_cli();
    let names: Vec<_> = cli.get_subcommands().map(|c| c.get_name()).collect();
    assert_eq!(names, ["lower", "check"]);
}
