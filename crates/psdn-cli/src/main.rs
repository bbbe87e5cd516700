mod cli;
mod commands;

use cli::{CheckParams, LowerParams, build_cli};
use log::LevelFilter;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("lower", m)) => {
            let params = LowerParams::from_matches(m);
            init_logging(params.verbose);
            commands::lower::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            init_logging(params.verbose);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `-v` enables debug, `-vv` trace; `RUST_LOG` takes precedence when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
