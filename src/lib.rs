//! Subcommander - two-level subcommand dispatch with Posix-style flags
//!
//! A program registers [`Command`]s into named groups on a [`Commander`],
//! then calls [`Commander::execute`]. The commander parses its own top-level
//! flags, picks the subcommand named by the first positional argument, parses
//! the rest of the command line against flags that subcommand declares, and
//! returns the subcommand's [`ExitStatus`].
//!
//! Programs that need only one command table can use the process-wide
//! default through the free functions [`register`], [`execute`], and
//! friends.

pub mod cli;
mod command;
mod commander;
mod context;
mod default;
pub mod flags;
mod help;
mod output;

pub use command::{Command, CommandGroup, ExitStatus};
pub use commander::{Commander, CommanderConfig};
pub use context::Context;
pub use default::{
    default_commander, execute, execute_args, flag_set, register, register_all,
    register_help_command,
};
pub use flags::{ErrorHandling, FlagError, FlagSet};
pub use help::HelpCommand;
pub use output::{Capture, Output};
