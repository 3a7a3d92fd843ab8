//! The built-in `help` subcommand

use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::sync::Weak;

use tracing::error;

use crate::command::{Command, ExitStatus};
use crate::commander::Shared;
use crate::context::Context;
use crate::flags::FlagSet;

/// Describes the commands of the [`Commander`](crate::Commander) it was
/// created from.
///
/// `help` prints every group and command; `help <name>` prints the usage,
/// synopsis, and flags of one command.
#[derive(Clone)]
pub struct HelpCommand {
    commander: Weak<Shared>,
}

impl HelpCommand {
    pub(crate) fn new(commander: Weak<Shared>) -> Self {
        Self { commander }
    }
}

impl fmt::Debug for HelpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpCommand")
            .field("attached", &(self.commander.strong_count() > 0))
            .finish()
    }
}

fn finished(result: io::Result<()>) -> ExitStatus {
    match result {
        Ok(()) => ExitStatus::Success,
        Err(err) => {
            error!(error = %err, "failed to write help");
            ExitStatus::Failure
        }
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn synopsis(&self) -> &str {
        "describe subcommands and their syntax"
    }

    fn set_flags(&self, flags: &mut FlagSet) {
        let commander = self.commander.clone();
        flags.set_usage(move |_| {
            if let Some(shared) = commander.upgrade() {
                shared.explain();
            }
        });
    }

    fn execute(&self, _ctx: &Context, flags: &FlagSet, _args: &[&dyn Any]) -> ExitStatus {
        let Some(shared) = self.commander.upgrade() else {
            error!("help command used after its commander was dropped");
            return ExitStatus::Failure;
        };
        let mut out = shared.output();

        match flags.args() {
            [] => return finished(shared.explain_to(&mut out)),
            [name] => match shared.find(name) {
                Some(command) => {
                    return finished(shared.write_command_explanation(command.as_ref(), &mut out))
                }
                None => {
                    if let Err(err) = writeln!(out, "Subcommand {} not understood", name) {
                        return finished(Err(err));
                    }
                }
            },
            _ => {}
        }

        flags.usage();
        ExitStatus::UsageError
    }
}
