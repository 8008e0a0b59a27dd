use config::{Config, USAGE};
use data::Error;
use env_logger::Env;
use log::{error, info};
use read::DirStore;
use std::process::ExitCode;

mod compute;
mod config;
mod data;
mod pipeline;
mod read;
mod select;
mod write;

/// Logger settings read from `env`. Nothing is logged unless asked for, so a
/// failed run prints its one message and nothing else.
fn log_builder(env: Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("off"))
}

fn main() -> ExitCode {
    log_builder(Env::default()).init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}; {USAGE}");
            let e = Error::Unknown(e.to_string());
            println!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };
    info!("tallying {} ({:?})", config.dir.display(), config.mode);

    let mut store = DirStore::new(&config.dir);
    match pipeline::run(&mut store, config.mode) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                Error::Unknown(detail) => error!("{detail}"),
                Error::AmountNotNumeric(file) => error!("{file}: amount is not a number"),
                Error::NonSequentialRecordFiles { previous, next } => {
                    error!("{next} does not follow {previous}")
                }
                _ => {}
            }
            println!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
