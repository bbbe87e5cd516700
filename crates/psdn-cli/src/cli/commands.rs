//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("psdn")
        .about("Lower protocol parsers into SDNet PX sections and tuples")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(lower_command())
        .subcommand(check_command())
}

/// Lower parser units and print PX text.
pub fn lower_command() -> Command {
    Command::new("lower")
        .about("Lower parser units into PX sections and tuples")
        .override_usage(
            "\
  psdn lower <UNIT>
  psdn lower <UNIT> -o <FILE>
  psdn lower - < unit.json",
        )
        .after_help(
            r#"EXAMPLES:
  psdn lower parser.json                  # print to stdout
  psdn lower parser.json -o parser.px     # write to file
  psdn lower parser.json -s parser.p4     # diagnostics with source snippets
  psdn lower parser.json --indent 0       # no enclosing engine indent"#,
        )
        .arg(unit_path_arg())
        .arg(source_file_arg())
        .arg(output_file_arg())
        .arg(indent_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Validate that parser units lower cleanly.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check that parser units lower without errors")
        .override_usage(
            "\
  psdn check <UNIT>
  psdn check <UNIT> --strict",
        )
        .after_help(
            r#"EXAMPLES:
  psdn check parser.json                  # errors only
  psdn check parser.json --strict         # warnings fail too
  psdn check parser.json -s parser.p4     # diagnostics with source snippets"#,
        )
        .arg(unit_path_arg())
        .arg(source_file_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
