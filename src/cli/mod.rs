//! # Demo Program
//!
//! `subcmd`, a small program built on the process-wide default commander.
//!
//! ## Command Groups
//!
//! | Group | Commands |
//! |-------|----------|
//! | text | `greet`, `echo` |
//! | math | `sum` |
//! | timing | `countdown` |
//! | (ungrouped) | `help` |
//!
//! ## Global Flags
//!
//! - `--format text|json` (or `SUBCMD_FORMAT`) - output format
//! - `--timeout <MS>` - cancel the running subcommand's context
//! - `--verbose` (or `-v`) - debug logging and `[verbose]` notes on stderr
//!
//! ```bash
//! subcmd --format json greet --name ada
//! subcmd help countdown
//! ```

mod app;
mod countdown;
mod echo;
mod greet;
mod output;
mod sum;

pub use app::run;
pub use output::{OutputFormat, Printer};
