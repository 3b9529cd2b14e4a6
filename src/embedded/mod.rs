//! Embedded script runtime for msh
//!
//! The launcher only needs a handful of operations from the interpreter it
//! hosts:
//! - build string and string-array values
//! - bind a value to a global constant
//! - call a named top-level function
//! - print the diagnostic for a failed call
//! - shut the instance down
//!
//! [`ScriptRuntime`] captures exactly that surface. [`KotoRuntime`] is the
//! production implementation on top of the `koto` crate.

pub mod executor;
pub use executor::{KotoRuntime, BUNDLED_SCRIPT};

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

/// Runtime construction and definition failures
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The entry script could not be read
    #[error("cannot read script {}: {source}", .path.display())]
    ScriptRead {
        path: PathBuf,
        source: io::Error,
    },
    /// The entry script failed to compile or to run its top level
    #[error("failed to load script {name}: {message}")]
    ScriptLoad { name: String, message: String },
    /// A global constant name the runtime cannot bind
    #[error("invalid global name `{0}`")]
    InvalidGlobalName(String),
}

/// Failure of a script-level call
///
/// Stands in for the interpreter's pending-exception state: a call either
/// returns a value or one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// No function of that name is defined at the top level
    #[error("undefined entry function `{0}`")]
    UndefinedEntry(String),
    /// The function raised; carries the runtime's rendering of the error
    #[error("{0}")]
    Raised(String),
}

/// Result type for runtime construction
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// The interpreter surface the bootstrap sequence drives
///
/// An instance is created by a constructor closure, owned by the caller for
/// its whole life and released with [`ScriptRuntime::close`].
pub trait ScriptRuntime {
    /// Native value type of the runtime
    type Value: Clone;

    /// Create a string value
    fn string(
        &mut self,
        s: &str,
    ) -> Self::Value;

    /// Create an array value holding `items` in order
    fn string_array(
        &mut self,
        items: &[String],
    ) -> Self::Value;

    /// Bind `value` to the global constant `name`
    fn define_global_const(
        &mut self,
        name: &str,
        value: Self::Value,
    ) -> RuntimeResult<()>;

    /// Call the top-level function `name` with positional `args`
    fn funcall(
        &mut self,
        name: &str,
        args: &[Self::Value],
    ) -> Result<Self::Value, ScriptError>;

    /// Write the diagnostic for `error` the way the runtime reports errors
    fn print_error(
        &self,
        error: &ScriptError,
        out: &mut dyn Write,
    ) -> io::Result<()>;

    /// Tear the runtime down
    fn close(self)
    where
        Self: Sized;
}

/// Check that `name` can be bound as a global constant
pub fn validate_global_name(name: &str) -> RuntimeResult<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(RuntimeError::InvalidGlobalName(name.to_string()));
    }
    Ok(())
}
