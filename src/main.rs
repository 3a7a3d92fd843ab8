//! subcmd - demo program for the subcommander dispatcher

use std::process::ExitCode;

fn main() -> ExitCode {
    subcommander::cli::run().into()
}
