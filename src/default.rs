//! Process-wide default commander
//!
//! Programs with a single command table can skip constructing a
//! [`Commander`] and use these free functions instead. The default commander
//! is created on first use, named after the running executable, and writes
//! usage to standard output.
//!
//! ```no_run
//! use subcommander::{Context, ExitStatus};
//!
//! subcommander::register_help_command("");
//! let status: ExitStatus = subcommander::execute(&Context::background(), &[]);
//! std::process::exit(status.code());
//! ```

use std::any::Any;
use std::path::Path;
use std::sync::{Arc, LazyLock, MutexGuard};

use crate::command::{Command, ExitStatus};
use crate::commander::Commander;
use crate::context::Context;
use crate::flags::FlagSet;

static DEFAULT: LazyLock<Commander> = LazyLock::new(|| Commander::new(program_name()));

fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "command".to_string())
}

/// The process-wide commander
pub fn default_commander() -> &'static Commander {
    &*DEFAULT
}

/// Top-level flag set of the default commander
pub fn flag_set() -> MutexGuard<'static, FlagSet> {
    DEFAULT.flag_set()
}

/// Registers `command` under `group` on the default commander
pub fn register(group: &str, command: impl Command + 'static) {
    DEFAULT.register(group, command);
}

/// Registers several commands under `group` on the default commander
pub fn register_all<I>(group: &str, commands: I)
where
    I: IntoIterator<Item = Arc<dyn Command>>,
{
    DEFAULT.register_all(group, commands);
}

/// Registers the built-in `help` command on the default commander
pub fn register_help_command(group: &str) {
    DEFAULT.register_help_command(group);
}

/// Runs the default commander against the process arguments
pub fn execute(ctx: &Context, args: &[&dyn Any]) -> ExitStatus {
    DEFAULT.execute(ctx, args)
}

/// Runs the default commander against `argv` (without the program name)
pub fn execute_args<I, T>(ctx: &Context, argv: I, args: &[&dyn Any]) -> ExitStatus
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    DEFAULT.execute_args(ctx, argv, args)
}
