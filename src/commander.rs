//! Registration, dispatch, and usage rendering
//!
//! A [`Commander`] parses arguments in two phases. The top-level flag set
//! consumes flags up to the first positional argument, which names the
//! subcommand. The subcommand then gets a fresh [`FlagSet`], declares its own
//! flags on it, and the remaining arguments are parsed against that set.
//! Top-level and subcommand flags may therefore share names.
//!
//! ```
//! use std::any::Any;
//! use subcommander::{Capture, Command, Commander, CommanderConfig, Context, ExitStatus, FlagSet, Output};
//!
//! struct Greet;
//!
//! impl Command for Greet {
//!     fn name(&self) -> &str { "greet" }
//!     fn synopsis(&self) -> &str { "say hi" }
//!     fn execute(&self, _: &Context, _: &FlagSet, _: &[&dyn Any]) -> ExitStatus {
//!         ExitStatus::Success
//!     }
//! }
//!
//! let capture = Capture::new();
//! let app = Commander::with_config("app", CommanderConfig::new().output(Output::capture(&capture)));
//! app.register("", Greet);
//!
//! assert_eq!(app.execute_args(&Context::background(), ["greet"], &[]), ExitStatus::Success);
//! ```

use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tracing::{debug, warn};

use crate::command::{Command, CommandGroup, ExitStatus};
use crate::context::Context;
use crate::flags::{ErrorHandling, FlagSet};
use crate::help::HelpCommand;
use crate::output::Output;

/// Width of the name column in the subcommand listing
const NAME_COLUMN: usize = 15;

/// Construction-time options for a [`Commander`]
#[derive(Default)]
pub struct CommanderConfig {
    groups: Vec<(String, Vec<Arc<dyn Command>>)>,
    flag_set: Option<FlagSet>,
    output: Option<Output>,
}

impl CommanderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `commands` under `group`, in the order given
    pub fn group<I>(mut self, group: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Command>>,
    {
        self.groups
            .push((group.into(), commands.into_iter().collect()));
        self
    }

    /// Registers a single command under `group`
    pub fn command(self, group: impl Into<String>, command: impl Command + 'static) -> Self {
        self.group(group, [Arc::new(command) as Arc<dyn Command>])
    }

    /// Uses `flags` as the top-level flag set instead of a fresh
    /// exit-on-error set named after the program
    pub fn flag_set(mut self, flags: FlagSet) -> Self {
        self.flag_set = Some(flags);
        self
    }

    /// Writes usage and subcommand diagnostics to `output` instead of stdout
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }
}

/// State shared between a [`Commander`] and the help commands bound to it
pub(crate) struct Shared {
    name: String,
    groups: RwLock<Vec<CommandGroup>>,
    top_flags: Mutex<FlagSet>,
    output: RwLock<Output>,
}

impl Shared {
    fn groups(&self) -> RwLockReadGuard<'_, Vec<CommandGroup>> {
        self.groups.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn groups_mut(&self) -> RwLockWriteGuard<'_, Vec<CommandGroup>> {
        self.groups.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn top_flags(&self) -> MutexGuard<'_, FlagSet> {
        self.top_flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn output(&self) -> Output {
        self.output
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// First command named `name`, scanning groups then commands in
    /// registration order
    pub(crate) fn find(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.groups()
            .iter()
            .find_map(|group| group.find(name))
            .cloned()
    }

    /// Full program usage, rendered against an already locked top-level set
    fn write_explanation(&self, top_flags: &FlagSet, out: &mut dyn Write) -> io::Result<()> {
        let mut text = format!(
            "Usage: {} <flags> <subcommand> <subcommand args>\n\n",
            self.name
        );

        let flags = top_flags.flag_usages();
        if !flags.is_empty() {
            text.push_str(&format!("Arguments:\n{}\n", flags));
        }

        for group in self.groups().iter().filter(|g| !g.is_empty()) {
            if group.name().is_empty() {
                text.push_str("Subcommands:\n");
            } else {
                text.push_str(&format!("{}:\n", group.name()));
            }

            for command in group.commands() {
                text.push_str(&format!(
                    "\t{:<width$}    {}\n",
                    command.name(),
                    command.synopsis(),
                    width = NAME_COLUMN
                ));
            }
            text.push('\n');
        }

        out.write_all(text.as_bytes())
    }

    pub(crate) fn explain_to(&self, out: &mut dyn Write) -> io::Result<()> {
        let top_flags = self.top_flags();
        self.write_explanation(&top_flags, out)
    }

    /// Writes full usage to the output sink; used as the top-level usage hook
    fn explain_with(&self, top_flags: &FlagSet) {
        if let Err(err) = self.write_explanation(top_flags, &mut self.output()) {
            warn!(commander = %self.name, error = %err, "failed to write usage");
        }
    }

    pub(crate) fn explain(&self) {
        if let Err(err) = self.explain_to(&mut self.output()) {
            warn!(commander = %self.name, error = %err, "failed to write usage");
        }
    }

    pub(crate) fn write_command_explanation(
        &self,
        command: &dyn Command,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let mut text = format!(
            "Usage: {} <flags> {} <subcommand flags>\n\n{}\n\n",
            self.name,
            command.name(),
            command.synopsis()
        );

        let mut flags = FlagSet::new(command.name(), ErrorHandling::ContinueOnError);
        command.set_flags(&mut flags);
        let usages = flags.flag_usages();
        if !usages.is_empty() {
            text.push_str(&format!("Arguments:\n{}", usages));
        }

        out.write_all(text.as_bytes())
    }
}

/// A set of grouped subcommands plus the top-level flags of a program
#[derive(Clone)]
pub struct Commander {
    shared: Arc<Shared>,
}

impl Commander {
    /// Creates a commander with an exit-on-error top-level flag set that
    /// writes usage to standard output
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CommanderConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: CommanderConfig) -> Self {
        let name = name.into();
        let output = config.output.unwrap_or_default();
        let mut top_flags = config
            .flag_set
            .unwrap_or_else(|| FlagSet::new(name.clone(), ErrorHandling::ExitOnError));
        top_flags.set_interspersed(false);

        let shared = Arc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            top_flags.set_usage(move |flags| {
                if let Some(shared) = weak.upgrade() {
                    shared.explain_with(flags);
                }
            });

            Shared {
                name,
                groups: RwLock::new(Vec::new()),
                top_flags: Mutex::new(top_flags),
                output: RwLock::new(output),
            }
        });

        let commander = Self { shared };
        for (group, commands) in config.groups {
            commander.register_all(&group, commands);
        }
        commander
    }

    /// Program name shown in usage text
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// The top-level flag set.
    ///
    /// Declare program-wide flags here, or parse it yourself before calling
    /// [`execute`](Self::execute) to override the process arguments. The
    /// guard must be dropped before executing.
    pub fn flag_set(&self) -> MutexGuard<'_, FlagSet> {
        self.shared.top_flags()
    }

    pub fn output(&self) -> Output {
        self.shared.output()
    }

    /// Redirects usage text and subcommand parse diagnostics
    pub fn set_output(&self, output: Output) {
        *self
            .shared
            .output
            .write()
            .unwrap_or_else(PoisonError::into_inner) = output;
    }

    /// Adds `command` to `group`, creating the group if needed
    pub fn register(&self, group: &str, command: impl Command + 'static) {
        self.register_all(group, [Arc::new(command) as Arc<dyn Command>]);
    }

    /// Adds `commands` to `group` in order, creating the group at the end of
    /// the group list if needed. Duplicate names are accepted; lookups return
    /// the first one registered.
    pub fn register_all<I>(&self, group: &str, commands: I)
    where
        I: IntoIterator<Item = Arc<dyn Command>>,
    {
        let mut groups = self.shared.groups_mut();
        match groups.iter_mut().find(|g| g.name() == group) {
            Some(existing) => existing.extend(commands),
            None => {
                let mut created = CommandGroup::new(group);
                created.extend(commands);
                groups.push(created);
            }
        }
    }

    /// A `help` command bound to this commander
    pub fn help_command(&self) -> HelpCommand {
        HelpCommand::new(Arc::downgrade(&self.shared))
    }

    /// Registers the built-in `help` command under `group`
    pub fn register_help_command(&self, group: &str) {
        self.register(group, self.help_command());
    }

    /// Snapshot of the registered groups, in registration order
    pub fn groups(&self) -> Vec<CommandGroup> {
        self.shared.groups().clone()
    }

    /// The command `execute` would run for `name`
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.shared.find(name)
    }

    /// Runs the subcommand named by the process arguments.
    ///
    /// Parses the top-level flags from the process arguments unless they
    /// were already parsed. Returns [`ExitStatus::UsageError`] when the
    /// subcommand is missing, unknown, or given malformed flags.
    pub fn execute(&self, ctx: &Context, args: &[&dyn Any]) -> ExitStatus {
        let argv = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned());
        self.execute_args(ctx, argv, args)
    }

    /// Like [`execute`](Self::execute), with `argv` (without the program
    /// name) standing in for the process arguments.
    ///
    /// `argv` is ignored when the top-level flags were already parsed.
    pub fn execute_args<I, T>(&self, ctx: &Context, argv: I, args: &[&dyn Any]) -> ExitStatus
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let (name, rest) = {
            let mut top_flags = self.shared.top_flags();
            if !top_flags.parsed() && top_flags.parse(argv).is_err() {
                return ExitStatus::UsageError;
            }

            match top_flags.args().split_first() {
                Some((name, rest)) => (name.clone(), rest.to_vec()),
                None => {
                    debug!(commander = %self.name(), "no subcommand given");
                    self.shared.explain_with(&top_flags);
                    return ExitStatus::UsageError;
                }
            }
        };

        let Some(command) = self.shared.find(&name) else {
            debug!(commander = %self.name(), subcommand = %name, "unknown subcommand");
            self.shared.explain();
            return ExitStatus::UsageError;
        };

        let mut flags = FlagSet::new(name.clone(), ErrorHandling::ContinueOnError);
        flags.set_output(self.output());
        command.set_flags(&mut flags);
        if flags.parse(rest).is_err() {
            return ExitStatus::UsageError;
        }

        debug!(subcommand = %name, positional = flags.narg(), "dispatching");
        let status = command.execute(ctx, &flags, args);
        debug!(subcommand = %name, %status, "subcommand finished");
        status
    }

    /// Writes the full usage text to the output sink
    pub fn explain(&self) {
        self.shared.explain();
    }

    /// Writes one command's usage, synopsis, and flags to the output sink
    pub fn explain_command(&self, command: &dyn Command) {
        if let Err(err) = self
            .shared
            .write_command_explanation(command, &mut self.output())
        {
            warn!(commander = %self.name(), error = %err, "failed to write usage");
        }
    }
}

impl fmt::Debug for Commander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commander")
            .field("name", &self.shared.name)
            .field("groups", &*self.shared.groups())
            .finish_non_exhaustive()
    }
}
