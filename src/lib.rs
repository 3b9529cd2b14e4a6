//! msh launcher
//!
//! Boots an embedded script runtime, publishes the command line to it as
//! `ARGV` and hands control to the script-level `__main__` entry.
//!
//! # Example
//!
//! ```no_run
//! use msh::bootstrap;
//! use msh::embedded::KotoRuntime;
//! use msh::util::config::LaunchConfig;
//!
//! let config = LaunchConfig::default();
//! let outcome = bootstrap::run(
//!     KotoRuntime::open,
//!     std::env::args_os(),
//!     &config,
//!     &mut std::io::stderr(),
//! );
//! std::process::exit(outcome.exit_code().into());
//! ```

#![doc(html_root_url = "https://docs.rs/msh")]
#![warn(rust_2018_idioms)]

pub mod bootstrap;
pub mod embedded;
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use bootstrap::Outcome;

/// Launcher version, published to scripts as `MSH_VERSION`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Launcher name
pub const NAME: &str = "msh";
