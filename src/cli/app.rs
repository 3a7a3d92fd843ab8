//! Entry point of the `subcmd` demo program

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{value_parser, Arg};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::countdown::Countdown;
use super::echo::Echo;
use super::greet::Greet;
use super::output::{OutputFormat, Printer};
use super::sum::Sum;
use crate::{Command, Context, ExitStatus};

/// Declares the program-wide flags on the default commander
fn declare_global_flags() {
    let mut flags = crate::flag_set();
    flags
        .add(
            Arg::new("format")
                .long("format")
                .short('f')
                .env("SUBCMD_FORMAT")
                .value_parser(value_parser!(OutputFormat))
                .default_value("text")
                .help("Output format (text, json)"),
        )
        .add(
            Arg::new("timeout")
                .long("timeout")
                .value_name("MS")
                .value_parser(value_parser!(u64))
                .help("Cancel the subcommand after this many milliseconds"),
        )
        .bool_flag("verbose", Some('v'), "Enable verbose output for debugging");
}

fn register_commands() {
    crate::register_all(
        "text",
        [Arc::new(Greet) as Arc<dyn Command>, Arc::new(Echo)],
    );
    crate::register("math", Sum);
    crate::register("timing", Countdown);
    crate::register_help_command("");
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> ExitStatus {
    declare_global_flags();
    register_commands();

    // Parsed here rather than inside execute so the format and logging are
    // settled before any subcommand runs.
    let (format, verbose, timeout) = {
        let mut flags = crate::flag_set();
        let argv = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned());
        if flags.parse(argv).is_err() {
            return ExitStatus::UsageError;
        }
        (
            flags.get_one::<OutputFormat>("format").copied().unwrap_or_default(),
            flags.get_flag("verbose"),
            flags.get_one::<u64>("timeout").copied(),
        )
    };

    init_tracing(verbose);
    debug!(?format, ?timeout, "subcmd starting");

    let mut ctx = Context::background();
    if let Some(ms) = timeout {
        ctx = ctx.with_deadline(Instant::now() + Duration::from_millis(ms));
    }

    let printer = Printer::new(format, verbose);
    let status = crate::execute(&ctx, &[&printer]);

    if status.is_success() {
        debug!("subcmd finished");
    } else {
        debug!(%status, "subcmd failed");
    }
    status
}
