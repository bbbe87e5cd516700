//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::lower::LowerArgs;

pub struct LowerParams {
    pub unit_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: usize,
    pub strict: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl LowerParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            unit_path: parse_unit_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            indent: m.get_one::<usize>("indent").copied().unwrap_or(1),
            strict: m.get_flag("strict"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<LowerParams> for LowerArgs {
    fn from(p: LowerParams) -> Self {
        // Files never get escape codes.
        let color = p.output.is_none() && p.color.should_colorize();
        Self {
            unit_path: p.unit_path,
            source_path: p.source_path,
            output: p.output,
            indent: p.indent,
            strict: p.strict,
            color,
        }
    }
}

pub struct CheckParams {
    pub unit_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            unit_path: parse_unit_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            unit_path: p.unit_path,
            source_path: p.source_path,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_unit_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("unit_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
