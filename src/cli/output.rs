//! Output formatting for the demo commands

use std::any::Any;
use std::io::{self, Write};

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting.
///
/// `run` passes one to every command as the first extra argument. Write
/// failures (a closed pipe, usually) are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    format: OutputFormat,
    verbose: bool,
}

fn emit(mut out: impl Write, line: &str) {
    let _ = writeln!(out, "{}", line);
}

impl Printer {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// The printer forwarded by the dispatcher, or a quiet text printer
    pub fn from_args(args: &[&dyn Any]) -> Self {
        args.iter()
            .find_map(|arg| arg.downcast_ref::<Printer>())
            .copied()
            .unwrap_or_default()
    }

    fn success_line(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => message.to_string(),
            OutputFormat::Json => serde_json::json!({
                "success": true,
                "message": message
            })
            .to_string(),
        }
    }

    fn error_line(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => format!("Error: {}", message),
            OutputFormat::Json => serde_json::json!({
                "success": false,
                "error": message
            })
            .to_string(),
        }
    }

    fn verbose_line(&self, message: &str) -> Option<String> {
        self.verbose.then(|| format!("[verbose] {}", message))
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        emit(io::stdout().lock(), &self.success_line(message));
    }

    /// Prints an error message
    pub fn error(&self, message: &str) {
        emit(io::stderr().lock(), &self.error_line(message));
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = rendered {
            emit(io::stdout().lock(), &json);
        }
    }

    /// Prints a debug message to stderr (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if let Some(line) = self.verbose_line(message) {
            emit(io::stderr().lock(), &line);
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
