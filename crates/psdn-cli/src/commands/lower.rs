use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use psdn_compiler::EmitConfig;

use super::error::CliError;
use super::run_common::{LoadedInput, lower_all};

pub struct LowerArgs {
    pub unit_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: usize,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: LowerArgs) {
    let input = match LoadedInput::load(&args.unit_path, args.source_path.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let run = lower_all(&input, args.strict, args.color);
    for report in &run.reports {
        eprint!("{}", report);
    }

    let config = EmitConfig::new().indent(args.indent).colored(args.color);
    let text: String = run
        .outputs
        .iter()
        .map(|(_, output)| output.emit(&config))
        .collect();

    if let Err(e) = write_output(args.output.as_deref(), &text) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    if run.failed {
        std::process::exit(1);
    }
}

fn write_output(path: Option<&std::path::Path>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, text).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|source| CliError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    }
}
