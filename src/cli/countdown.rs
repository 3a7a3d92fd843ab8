//! `countdown` - counts down, giving up when the context expires

use std::any::Any;
use std::thread;
use std::time::Duration;

use clap::{value_parser, Arg};
use tracing::debug;

use super::output::Printer;
use crate::{Command, Context, ExitStatus, FlagSet};

pub struct Countdown;

impl Command for Countdown {
    fn name(&self) -> &str {
        "countdown"
    }

    fn synopsis(&self) -> &str {
        "count down to zero, one step per interval"
    }

    fn set_flags(&self, flags: &mut FlagSet) {
        flags
            .add(
                Arg::new("from")
                    .long("from")
                    .value_parser(value_parser!(u32))
                    .default_value("3")
                    .help("number to start from"),
            )
            .add(
                Arg::new("interval")
                    .long("interval")
                    .value_name("MS")
                    .value_parser(value_parser!(u64))
                    .default_value("0")
                    .help("milliseconds between steps"),
            );
    }

    fn execute(&self, ctx: &Context, flags: &FlagSet, args: &[&dyn Any]) -> ExitStatus {
        let printer = Printer::from_args(args);
        let from = flags.get_one::<u32>("from").copied().unwrap_or(3);
        let interval = Duration::from_millis(flags.get_one::<u64>("interval").copied().unwrap_or(0));
        printer.verbose(&format!("counting down from {} every {:?}", from, interval));

        for n in (0..=from).rev() {
            if ctx.is_cancelled() {
                debug!(remaining = n, "countdown cancelled");
                printer.error(&format!("cancelled with {} left", n));
                return ExitStatus::Failure;
            }
            printer.success(&n.to_string());
            if n > 0 && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        ExitStatus::Success
    }
}
