use std::path::PathBuf;

use super::run_common::{LoadedInput, lower_all};

pub struct CheckArgs {
    pub unit_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
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

    if run.failed {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
