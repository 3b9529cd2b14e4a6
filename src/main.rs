//! msh - launcher entry point
//!
//! Starts the embedded runtime, publishes the command line and calls the
//! script-level `__main__`. No flags are parsed here.

use std::process::ExitCode;

use msh::bootstrap::{self, Outcome};
use msh::embedded::KotoRuntime;
use msh::util::{config, logger};

fn main() -> ExitCode {
    logger::init_from_env();

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", msh::NAME, e);
            return Outcome::StartupFailed.into();
        }
    };

    let mut stderr = std::io::stderr();
    bootstrap::run(KotoRuntime::open, std::env::args_os(), &config, &mut stderr).into()
}
