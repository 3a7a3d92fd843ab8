//! Declared flags, their parsed values, and the leftover positionals

use std::any::Any;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use tracing::{debug, warn};

use super::error::FlagError;
use super::usage;
use crate::output::Output;

const LEFTOVERS_ID: &str = "__subcommander_args";
const HELP_ID: &str = "__subcommander_help";

/// What [`FlagSet::parse`] does when the arguments are malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Report the problem and return an error
    #[default]
    ContinueOnError,

    /// Report the problem and terminate the process
    ExitOnError,
}

/// Replacement for the default usage text, called with the flag set that
/// needs explaining
pub type UsageFn = Arc<dyn Fn(&FlagSet) + Send + Sync>;

/// A named set of flags plus the result of parsing them
pub struct FlagSet {
    name: String,
    command: Command,
    error_handling: ErrorHandling,
    interspersed: bool,
    parsed: bool,
    matches: Option<ArgMatches>,
    args: Vec<String>,
    output: Output,
    usage: Option<UsageFn>,
}

impl FlagSet {
    /// Creates an empty flag set. Diagnostics go to standard error until
    /// [`set_output`](Self::set_output) is called.
    pub fn new(name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        let name = name.into();
        Self {
            command: Command::new(name.clone()),
            name,
            error_handling,
            interspersed: true,
            parsed: false,
            matches: None,
            args: Vec::new(),
            output: Output::stderr(),
            usage: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    /// Declares a flag. The argument must be an option (it needs a long or
    /// short name); positional arguments are collected automatically.
    pub fn add(&mut self, arg: Arg) -> &mut Self {
        let command = std::mem::replace(&mut self.command, Command::new(""));
        self.command = command.arg(arg);
        self
    }

    /// Declares a boolean switch, false unless given
    pub fn bool_flag(&mut self, long: &str, short: Option<char>, help: &str) -> &mut Self {
        let mut arg = Arg::new(long.to_string())
            .long(long.to_string())
            .action(ArgAction::SetTrue)
            .help(help.to_string());
        if let Some(short) = short {
            arg = arg.short(short);
        }
        self.add(arg)
    }

    /// Declares a flag taking one string value
    pub fn string_flag(
        &mut self,
        long: &str,
        short: Option<char>,
        default: Option<&str>,
        help: &str,
    ) -> &mut Self {
        let mut arg = Arg::new(long.to_string())
            .long(long.to_string())
            .action(ArgAction::Set)
            .value_name(long.to_uppercase())
            .value_parser(value_parser!(String))
            .help(help.to_string());
        if let Some(short) = short {
            arg = arg.short(short);
        }
        if let Some(default) = default {
            arg = arg.default_value(default.to_string());
        }
        self.add(arg)
    }

    /// Whether flags may follow positional arguments.
    ///
    /// When false, parsing stops at the first positional argument and
    /// everything after it is left untouched in [`args`](Self::args).
    pub fn set_interspersed(&mut self, interspersed: bool) {
        self.interspersed = interspersed;
    }

    pub fn set_output(&mut self, output: Output) {
        self.output = output;
    }

    pub fn output(&self) -> Output {
        self.output.clone()
    }

    /// Replaces the default usage text
    pub fn set_usage(&mut self, usage: impl Fn(&FlagSet) + Send + Sync + 'static) {
        self.usage = Some(Arc::new(usage));
    }

    /// Writes usage text, either through the hook installed with
    /// [`set_usage`](Self::set_usage) or as `Usage of <name>:` followed by
    /// the flag listing.
    pub fn usage(&self) {
        match &self.usage {
            Some(hook) => hook(self),
            None => {
                let mut out = self.output();
                if let Err(err) = write!(out, "Usage of {}:\n{}", self.name, self.flag_usages()) {
                    warn!(flag_set = %self.name, error = %err, "failed to write usage");
                }
            }
        }
    }

    /// One line per declared flag, empty when nothing is declared
    pub fn flag_usages(&self) -> String {
        usage::render(&self.command)
    }

    /// Parses `arguments` (without the program name).
    ///
    /// Parsing an already parsed set replaces the previous result.
    pub fn parse<I, T>(&mut self, arguments: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let arguments: Vec<String> = arguments.into_iter().map(Into::into).collect();
        self.parsed = true;

        match self.parser().try_get_matches_from(&arguments) {
            Ok(mut matches) => {
                self.args = matches
                    .try_remove_many::<String>(LEFTOVERS_ID)
                    .ok()
                    .flatten()
                    .map(Iterator::collect)
                    .unwrap_or_default();
                self.matches = Some(matches);
                debug!(flag_set = %self.name, positional = self.args.len(), "parsed flags");
                Ok(())
            }
            Err(err) => {
                self.matches = None;
                self.args.clear();
                self.fail(FlagError::from_clap(&err))
            }
        }
    }

    fn fail(&self, error: FlagError) -> Result<(), FlagError> {
        debug!(flag_set = %self.name, %error, "flag parsing failed");

        if let FlagError::Parse(message) = &error {
            let mut out = self.output();
            if let Err(err) = writeln!(out, "error: {}", message) {
                warn!(flag_set = %self.name, error = %err, "failed to write diagnostic");
            }
        }
        self.usage();

        match self.error_handling {
            ErrorHandling::ContinueOnError => Err(error),
            ErrorHandling::ExitOnError => {
                let _ = self.output().flush();
                std::process::exit(if error.is_help() { 0 } else { 2 })
            }
        }
    }

    /// The declared flags plus the hidden leftovers and help arguments
    fn parser(&self) -> Command {
        let mut leftovers = Arg::new(LEFTOVERS_ID)
            .action(ArgAction::Append)
            .num_args(1..)
            .value_parser(value_parser!(String))
            .allow_negative_numbers(true)
            .hide(true);
        if !self.interspersed {
            leftovers = leftovers.trailing_var_arg(true);
        }

        let mut command = self
            .command
            .clone()
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .color(ColorChoice::Never)
            .arg(leftovers);

        if let Some(help) = self.help_arg() {
            command = command.arg(help);
        }
        command
    }

    /// `-h/--help`, minus whichever names the declared flags already use
    fn help_arg(&self) -> Option<Arg> {
        let long_taken = self
            .command
            .get_arguments()
            .any(|arg| arg.get_long() == Some("help"));
        let short_taken = self
            .command
            .get_arguments()
            .any(|arg| arg.get_short() == Some('h'));

        if long_taken && short_taken {
            return None;
        }

        let mut help = Arg::new(HELP_ID).action(ArgAction::Help).hide(true);
        if !long_taken {
            help = help.long("help");
        }
        if !short_taken {
            help = help.short('h');
        }
        Some(help)
    }

    /// Whether [`parse`](Self::parse) has been called
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Number of positional arguments left after parsing
    pub fn narg(&self) -> usize {
        self.args.len()
    }

    /// The `i`th positional argument
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value of a boolean switch; false when undeclared or unparsed
    pub fn get_flag(&self, id: &str) -> bool {
        self.get_one::<bool>(id).copied().unwrap_or(false)
    }

    /// Parsed (or default) value of a flag.
    ///
    /// Returns `None` when the flag was not declared, has no value, or was
    /// declared with a different value type.
    pub fn get_one<T>(&self, id: &str) -> Option<&T>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.matches.as_ref()?.try_get_one::<T>(id).ok().flatten()
    }

    /// All values of a flag that may be given more than once
    pub fn get_many<T>(&self, id: &str) -> Vec<&T>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.matches
            .as_ref()
            .and_then(|m| m.try_get_many::<T>(id).ok().flatten())
            .map(Iterator::collect)
            .unwrap_or_default()
    }

    /// Whether a flag has a value, from the command line, the environment,
    /// or its default
    pub fn contains(&self, id: &str) -> bool {
        self.matches
            .as_ref()
            .is_some_and(|m| m.try_contains_id(id).unwrap_or(false))
    }

    /// Whether a flag was set explicitly on the command line
    pub fn changed(&self, id: &str) -> bool {
        self.matches.as_ref().is_some_and(|m| {
            m.try_contains_id(id).unwrap_or(false)
                && m.value_source(id) == Some(ValueSource::CommandLine)
        })
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("error_handling", &self.error_handling)
            .field("interspersed", &self.interspersed)
            .field("parsed", &self.parsed)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
