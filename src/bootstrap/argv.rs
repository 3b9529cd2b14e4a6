//! Argument vector marshaling
//!
//! Turns the platform argument vector into the ordered list of UTF-8
//! strings that gets published to the script layer.

use std::ffi::OsString;

use thiserror::Error;

use crate::util::config::ArgEncoding;

/// Argument conversion failure (strict encoding only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("argument {index} is not valid UTF-8: {lossy}")]
    NotUnicode { index: usize, lossy: String },
}

/// Converted command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgVector {
    /// argv[0], when the platform supplied one
    pub program: Option<String>,
    /// Arguments handed to the script, in input order
    pub args: Vec<String>,
}

impl ArgVector {
    /// Convert `raw` under the given encoding
    ///
    /// With `skip_program_name`, argv[0] goes to `program` and is left out of
    /// `args`; otherwise it stays first in `args` and `program` is also set.
    pub fn from_os_args<I>(
        raw: I,
        skip_program_name: bool,
        encoding: ArgEncoding,
    ) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut out = ArgVector::default();

        for (index, arg) in raw.into_iter().enumerate() {
            let arg = convert(index, arg, encoding)?;
            if index == 0 {
                out.program = Some(arg.clone());
                if skip_program_name {
                    continue;
                }
            }
            out.args.push(arg);
        }

        Ok(out)
    }

    /// Number of arguments handed to the script
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True when the script receives no arguments
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

fn convert(
    index: usize,
    arg: OsString,
    encoding: ArgEncoding,
) -> Result<String, ArgError> {
    match encoding {
        ArgEncoding::Lossy => Ok(arg
            .into_string()
            .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())),
        ArgEncoding::Strict => arg.into_string().map_err(|raw| ArgError::NotUnicode {
            index,
            lossy: raw.to_string_lossy().into_owned(),
        }),
    }
}
