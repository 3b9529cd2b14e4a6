//! Launch sequence
//!
//! ```text
//! argv ──convert──> ArgVector
//!                      │
//!   open runtime ──────┤ (failure: report, exit 1)
//!                      v
//!   publish ARGV, MSH_VERSION, PROGRAM_NAME
//!                      │
//!   funcall __main__(ARGV)
//!                      │
//!   Err? print diagnostic
//!                      │
//!   close runtime ──> Outcome
//! ```
//!
//! Single pass, no retries. Once the runtime is open it is closed on every
//! path before [`run`] returns.

pub mod argv;
pub use argv::{ArgError, ArgVector};

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use tracing::{debug, warn};

use crate::embedded::{RuntimeResult, ScriptRuntime};
use crate::util::config::LaunchConfig;
use crate::{NAME, VERSION};

/// Global holding argv[0] when it is skipped from the argument list
pub const PROGRAM_NAME_GLOBAL: &str = "PROGRAM_NAME";

/// How a launch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The entry function returned normally
    Success,
    /// Nothing was run: config, arguments or runtime construction failed
    StartupFailed,
    /// The entry function left an error behind
    Raised,
}

impl Outcome {
    /// Process exit status (`EXIT_SUCCESS` / `EXIT_FAILURE`)
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::StartupFailed | Outcome::Raised => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Run the launch sequence
///
/// `open` constructs the runtime; `raw_args` is the platform argument
/// vector, argv[0] included. Startup errors are written to `stderr` as
/// `msh: <error>`, script errors go through the runtime's own printer.
pub fn run<R, F, I>(
    open: F,
    raw_args: I,
    config: &LaunchConfig,
    stderr: &mut dyn Write,
) -> Outcome
where
    R: ScriptRuntime,
    F: FnOnce(&LaunchConfig) -> RuntimeResult<R>,
    I: IntoIterator<Item = OsString>,
{
    let argv =
        match ArgVector::from_os_args(raw_args, config.skip_program_name, config.arg_encoding) {
            Ok(argv) => argv,
            Err(e) => {
                report(stderr, &e);
                return Outcome::StartupFailed;
            }
        };
    debug!("converted {} argument(s)", argv.len());

    let mut runtime = match open(config) {
        Ok(runtime) => runtime,
        Err(e) => {
            report(stderr, &e);
            return Outcome::StartupFailed;
        }
    };

    let outcome = invoke(&mut runtime, &argv, config, stderr);

    runtime.close();
    debug!("launch finished: {:?}", outcome);
    outcome
}

/// Publish the globals and call the entry function
fn invoke<R: ScriptRuntime>(
    runtime: &mut R,
    argv: &ArgVector,
    config: &LaunchConfig,
    stderr: &mut dyn Write,
) -> Outcome {
    let list = runtime.string_array(&argv.args);

    if let Err(e) = publish(runtime, list.clone(), argv, config) {
        report(stderr, &e);
        return Outcome::StartupFailed;
    }

    let call_args = if config.pass_argv {
        vec![list]
    } else {
        Vec::new()
    };

    debug!("calling {} with {} argument(s)", config.entry, call_args.len());
    match runtime.funcall(&config.entry, &call_args) {
        Ok(_) => Outcome::Success,
        Err(e) => {
            warn!("{} raised: {}", config.entry, e);
            if let Err(io) = runtime.print_error(&e, stderr) {
                debug!("cannot print diagnostic: {}", io);
            }
            Outcome::Raised
        }
    }
}

fn publish<R: ScriptRuntime>(
    runtime: &mut R,
    list: R::Value,
    argv: &ArgVector,
    config: &LaunchConfig,
) -> RuntimeResult<()> {
    runtime.define_global_const(&config.argv_global, list)?;

    if !config.version_global.is_empty() {
        let version = runtime.string(VERSION);
        runtime.define_global_const(&config.version_global, version)?;
    }

    if config.skip_program_name {
        if let Some(program) = &argv.program {
            let program = runtime.string(program);
            runtime.define_global_const(PROGRAM_NAME_GLOBAL, program)?;
        }
    }

    debug!("published {} = {} item(s)", config.argv_global, argv.len());
    Ok(())
}

fn report(
    stderr: &mut dyn Write,
    error: &dyn fmt::Display,
) {
    let _ = writeln!(stderr, "{}: {}", NAME, error);
}
