//! Koto-backed script runtime
//!
//! One `Koto` instance per process run. Globals go into the instance's
//! prelude, the entry function is looked up among the script's exports.

use std::fs;
use std::io::{self, Write};

use koto::prelude::*;
use tracing::debug;

use crate::embedded::{
    validate_global_name, RuntimeError, RuntimeResult, ScriptError, ScriptRuntime,
};
use crate::util::config::LaunchConfig;

/// Entry script compiled into the binary
pub const BUNDLED_SCRIPT: &str = include_str!("../../scripts/main.koto");

/// Name used for the bundled script in diagnostics
const BUNDLED_NAME: &str = "main.koto";

/// Koto interpreter instance with its entry script loaded
pub struct KotoRuntime {
    koto: Koto,
    /// Script name for diagnostics
    script_name: String,
}

impl KotoRuntime {
    /// Create a runtime and load the configured entry script
    ///
    /// Falls back to [`BUNDLED_SCRIPT`] when no script is configured.
    pub fn open(config: &LaunchConfig) -> RuntimeResult<Self> {
        match &config.script {
            Some(path) => {
                let source =
                    fs::read_to_string(path).map_err(|source| RuntimeError::ScriptRead {
                        path: path.clone(),
                        source,
                    })?;
                Self::with_source(&path.display().to_string(), &source)
            }
            None => Self::with_source(BUNDLED_NAME, BUNDLED_SCRIPT),
        }
    }

    /// Create a runtime and run `source` at top level
    pub fn with_source(
        name: &str,
        source: &str,
    ) -> RuntimeResult<Self> {
        let mut koto = Koto::default();
        koto.compile_and_run(source)
            .map_err(|e| RuntimeError::ScriptLoad {
                name: name.to_string(),
                message: e.to_string().trim_end().to_string(),
            })?;

        debug!("runtime opened with script {}", name);
        Ok(Self {
            koto,
            script_name: name.to_string(),
        })
    }

    /// Read back a global constant
    pub fn global(
        &self,
        name: &str,
    ) -> Option<KValue> {
        self.koto.prelude().get(name)
    }

    /// Name of the loaded script
    pub fn script_name(&self) -> &str {
        &self.script_name
    }
}

impl ScriptRuntime for KotoRuntime {
    type Value = KValue;

    fn string(
        &mut self,
        s: &str,
    ) -> KValue {
        KValue::Str(s.into())
    }

    fn string_array(
        &mut self,
        items: &[String],
    ) -> KValue {
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(KValue::Str(item.as_str().into()));
        }
        KValue::List(KList::from_slice(&values))
    }

    fn define_global_const(
        &mut self,
        name: &str,
        value: KValue,
    ) -> RuntimeResult<()> {
        validate_global_name(name)?;
        self.koto.prelude().insert(name, value);
        Ok(())
    }

    fn funcall(
        &mut self,
        name: &str,
        args: &[KValue],
    ) -> Result<KValue, ScriptError> {
        let function = self
            .koto
            .exports()
            .get(name)
            .ok_or_else(|| ScriptError::UndefinedEntry(name.to_string()))?;

        self.koto
            .call_function(function, args)
            .map_err(|e| ScriptError::Raised(e.to_string().trim_end().to_string()))
    }

    fn print_error(
        &self,
        error: &ScriptError,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "{}: {}", self.script_name, error)?;
        out.flush()
    }

    fn close(self) {
        debug!("runtime for {} closed", self.script_name);
        drop(self.koto);
    }
}
