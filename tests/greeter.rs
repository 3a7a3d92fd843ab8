//! Integration tests for the greeter program
//!
//! greeter hands the process arguments straight to the default commander,
//! so these cover top-level parsing from argv and the program name.

use predicates::prelude::*;

fn greeter() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("greeter"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_subcommand_runs_with_its_flags() {
    greeter()
        .args(["greet", "-n", "ada"])
        .assert()
        .success()
        .stdout("Hello, ada!\n");
}

#[test]
fn test_top_level_flag_is_read_from_argv() {
    greeter()
        .args(["--shout", "greet"])
        .assert()
        .success()
        .stdout("HELLO, WORLD!\n");
}

#[test]
fn test_top_level_flag_after_subcommand_belongs_to_subcommand() {
    greeter()
        .args(["greet", "--shout"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("--shout"));
}

#[test]
fn test_no_arguments_shows_usage_named_after_program() {
    greeter()
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with(
            "Usage: greeter <flags> <subcommand> <subcommand args>\n",
        ))
        .stdout(predicate::str::contains("--shout"))
        .stdout(predicate::str::contains("\tgreet              say hi"));
}

#[test]
fn test_unknown_top_level_flag_exits_with_usage_error() {
    greeter()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error: "))
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_help_lists_commands() {
    greeter()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("\thelp               describe subcommands and their syntax"));
}
