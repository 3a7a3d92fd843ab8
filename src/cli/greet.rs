//! `greet` - says hello

use std::any::Any;

use serde::Serialize;

use super::output::Printer;
use crate::{Command, Context, ExitStatus, FlagSet};

#[derive(Debug, Serialize)]
struct Greeting<'a> {
    name: &'a str,
    greeting: String,
}

pub struct Greet;

impl Command for Greet {
    fn name(&self) -> &str {
        "greet"
    }

    fn synopsis(&self) -> &str {
        "say hello to someone"
    }

    fn set_flags(&self, flags: &mut FlagSet) {
        flags
            .string_flag("name", Some('n'), Some("world"), "who to greet")
            .bool_flag("loud", None, "shout the greeting");
    }

    fn execute(&self, _ctx: &Context, flags: &FlagSet, args: &[&dyn Any]) -> ExitStatus {
        let printer = Printer::from_args(args);
        let name = flags
            .get_one::<String>("name")
            .map(String::as_str)
            .unwrap_or("world");

        let mut greeting = format!("Hello, {}!", name);
        if flags.get_flag("loud") {
            greeting = greeting.to_uppercase();
        }

        if printer.is_json() {
            printer.data(&Greeting { name, greeting });
        } else {
            printer.success(&greeting);
        }
        ExitStatus::Success
    }
}
