//! Smallest program built on the default commander: no pre-parsing, the
//! top-level flags are read from the process arguments by `execute`.

use std::any::Any;
use std::process::ExitCode;

use subcommander::{Command, Context, ExitStatus, FlagSet};

struct Greet;

impl Command for Greet {
    fn name(&self) -> &str {
        "greet"
    }

    fn synopsis(&self) -> &str {
        "say hi"
    }

    fn set_flags(&self, flags: &mut FlagSet) {
        flags.string_flag("name", Some('n'), Some("world"), "who to greet");
    }

    fn execute(&self, _: &Context, flags: &FlagSet, _: &[&dyn Any]) -> ExitStatus {
        let shout = subcommander::flag_set().get_flag("shout");
        let name = flags
            .get_one::<String>("name")
            .map(String::as_str)
            .unwrap_or("world");

        let mut greeting = format!("Hello, {}!", name);
        if shout {
            greeting = greeting.to_uppercase();
        }
        println!("{}", greeting);
        ExitStatus::Success
    }
}

fn main() -> ExitCode {
    subcommander::flag_set().bool_flag("shout", None, "upper-case every greeting");
    subcommander::register("", Greet);
    subcommander::register_help_command("");
    subcommander::execute(&Context::background(), &[]).into()
}
