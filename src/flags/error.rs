//! Flag parsing errors

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlagError {
    /// `-h` or `--help` was given
    #[error("help requested")]
    Help,

    #[error("{0}")]
    Parse(String),
}

impl FlagError {
    /// Extracts a one-line message from a clap error.
    ///
    /// clap renders its own usage and tips after the first line; the flag
    /// set prints its own usage, so only the headline is kept.
    pub(crate) fn from_clap(err: &clap::Error) -> Self {
        use clap::error::{ContextKind, ContextValue, ErrorKind};

        if err.kind() == ErrorKind::DisplayHelp {
            return FlagError::Help;
        }

        let rendered = err.to_string();
        let headline = rendered.lines().next().unwrap_or_default();
        let mut message = headline
            .strip_prefix("error: ")
            .unwrap_or(headline)
            .trim_end_matches(':')
            .to_string();

        if err.kind() == ErrorKind::MissingRequiredArgument {
            if let Some(ContextValue::Strings(missing)) = err.get(ContextKind::InvalidArg) {
                message = format!("{}: {}", message, missing.join(", "));
            }
        }

        FlagError::Parse(message)
    }

    pub fn is_help(&self) -> bool {
        matches!(self, FlagError::Help)
    }
}
