//! The subcommand contract and its exit status

use std::any::Any;
use std::fmt;
use std::process::ExitCode;
use std::sync::Arc;

use crate::context::Context;
use crate::flags::FlagSet;

/// Posix exit status a subcommand hands back to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Failure = 1,
    /// Something was wrong with the command line
    UsageError = 2,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Success => write!(f, "success"),
            ExitStatus::Failure => write!(f, "failure"),
            ExitStatus::UsageError => write!(f, "usage error"),
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

/// A single subcommand.
///
/// Implementations should be cheap to hold; the dispatcher keeps them in an
/// [`Arc`] for the life of the [`Commander`](crate::Commander).
pub trait Command: Send + Sync {
    /// Name used to select the command; the first registered match wins
    fn name(&self) -> &str;

    /// Short description, less than one line
    fn synopsis(&self) -> &str;

    /// Declares this command's flags on a freshly created set
    fn set_flags(&self, _flags: &mut FlagSet) {}

    /// Runs the command.
    ///
    /// `flags` holds the parsed flags and the positional arguments that
    /// followed the command name; `args` are the extra values the caller
    /// passed to [`Commander::execute`](crate::Commander::execute).
    fn execute(&self, ctx: &Context, flags: &FlagSet, args: &[&dyn Any]) -> ExitStatus;
}

/// Commands shown together under one heading in help output
#[derive(Clone)]
pub struct CommandGroup {
    name: String,
    commands: Vec<Arc<dyn Command>>,
}

impl CommandGroup {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// Group label; empty for ungrouped commands
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn extend(&mut self, commands: impl IntoIterator<Item = Arc<dyn Command>>) {
        self.commands.extend(commands);
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.iter().find(|cmd| cmd.name() == name)
    }
}

impl fmt::Debug for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandGroup")
            .field("name", &self.name)
            .field(
                "commands",
                &self.commands.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn synopsis(&self) -> &str {
            "test command"
        }

        fn execute(&self, _: &Context, _: &FlagSet, _: &[&dyn Any]) -> ExitStatus {
            ExitStatus::Success
        }
    }

    #[test]
    fn exit_codes_match_posix_values() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
        assert_eq!(ExitStatus::UsageError.code(), 2);
    }

    #[test]
    fn only_success_is_success() {
        assert!(ExitStatus::Success.is_success());
        assert!(!ExitStatus::Failure.is_success());
        assert!(!ExitStatus::UsageError.is_success());
    }

    #[test]
    fn group_find_returns_first_match() {
        let first: Arc<dyn Command> = Arc::new(Named("dup"));
        let second: Arc<dyn Command> = Arc::new(Named("dup"));
        let mut group = CommandGroup::new("g");
        group.extend([first.clone(), second]);

        let found = group.find("dup").unwrap();

        assert!(Arc::ptr_eq(found, &first));
        assert!(group.find("other").is_none());
    }

    #[test]
    fn group_debug_lists_command_names() {
        let mut group = CommandGroup::new("tools");
        group.extend([Arc::new(Named("a")) as Arc<dyn Command>, Arc::new(Named("b"))]);

        assert_eq!(
            format!("{:?}", group),
            r#"CommandGroup { name: "tools", commands: ["a", "b"] }"#
        );
    }
}
