//! `echo` - prints its arguments

use std::any::Any;

use super::output::Printer;
use crate::{Command, Context, ExitStatus, FlagSet};

pub struct Echo;

impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn synopsis(&self) -> &str {
        "print arguments"
    }

    fn set_flags(&self, flags: &mut FlagSet) {
        flags.string_flag("separator", Some('s'), Some(" "), "text placed between arguments");
    }

    fn execute(&self, _ctx: &Context, flags: &FlagSet, args: &[&dyn Any]) -> ExitStatus {
        let printer = Printer::from_args(args);

        if printer.is_json() {
            printer.data(&serde_json::json!({ "args": flags.args() }));
        } else {
            let separator = flags
                .get_one::<String>("separator")
                .map(String::as_str)
                .unwrap_or(" ");
            printer.success(&flags.args().join(separator));
        }
        ExitStatus::Success
    }
}
