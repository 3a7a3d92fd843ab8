//! CLI integration tests for the subcmd demo program
//!
//! These drive the real binary, so they cover the process-wide default
//! commander, process exit codes, and where each kind of text is written.

use predicates::prelude::*;

/// Get a command instance for the subcmd binary
fn subcmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("subcmd"));
    cmd.env_remove("RUST_LOG").env_remove("SUBCMD_FORMAT");
    cmd
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_greet_uses_default_name() {
    subcmd()
        .arg("greet")
        .assert()
        .success()
        .stdout("Hello, world!\n");
}

#[test]
fn test_greet_reads_its_own_flags() {
    subcmd()
        .args(["greet", "--name", "ada", "--loud"])
        .assert()
        .success()
        .stdout("HELLO, ADA!\n");
}

#[test]
fn test_echo_joins_positionals() {
    subcmd()
        .args(["echo", "-s", ",", "a", "b", "c"])
        .assert()
        .success()
        .stdout("a,b,c\n");
}

#[test]
fn test_double_dash_passes_flags_through() {
    subcmd()
        .args(["echo", "--", "--literal"])
        .assert()
        .success()
        .stdout("--literal\n");
}

#[test]
fn test_sum_adds_numbers() {
    subcmd()
        .args(["sum", "1", "2", "-4"])
        .assert()
        .success()
        .stdout("-1\n");
}

#[test]
fn test_subcommand_failure_is_exit_code_one() {
    subcmd()
        .args(["sum", "1", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'x' is not an integer"));
}

// =============================================================================
// Usage Errors
// =============================================================================

#[test]
fn test_no_subcommand_prints_usage() {
    subcmd()
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with(
            "Usage: subcmd <flags> <subcommand> <subcommand args>\n\n",
        ))
        .stdout(predicate::str::contains("text:\n\tgreet "));
}

#[test]
fn test_unknown_subcommand_prints_usage() {
    subcmd()
        .arg("bogus")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage: subcmd"))
        .stdout(predicate::str::contains("\tcountdown "));
}

#[test]
fn test_bad_subcommand_flag_is_usage_error() {
    subcmd()
        .args(["greet", "--bogus"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("error: "))
        .stdout(predicate::str::contains("Usage of greet:"))
        .stdout(predicate::str::contains("Hello").not());
}

#[test]
fn test_global_flag_after_subcommand_is_rejected() {
    subcmd().args(["greet", "--verbose"]).assert().code(2);
}

#[test]
fn test_bad_top_level_flag_exits_with_usage() {
    subcmd()
        .args(["--bogus", "greet"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error: "))
        .stdout(predicate::str::contains("Usage: subcmd"));
}

#[test]
fn test_top_level_help_flag_exits_cleanly() {
    subcmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: subcmd"))
        .stdout(predicate::str::contains("--format <FORMAT>"));
}

// =============================================================================
// Help Command
// =============================================================================

#[test]
fn test_help_lists_groups_in_registration_order() {
    let assert = subcmd().arg("help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    let positions: Vec<usize> = ["text:", "math:", "timing:", "Subcommands:"]
        .iter()
        .map(|header| stdout.find(header).unwrap_or_else(|| panic!("missing {}", header)))
        .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", stdout);
    assert!(stdout.contains("\tgreet              say hello to someone\n"));
    assert!(stdout.contains("\techo               print arguments\n"));
    assert!(stdout.contains("\thelp               describe subcommands and their syntax\n"));
}

#[test]
fn test_help_for_one_command_shows_flags() {
    subcmd()
        .args(["help", "countdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Usage: subcmd <flags> countdown <subcommand flags>\n\ncount down to zero, one step per interval\n\n",
        ))
        .stdout(predicate::str::contains("--interval <MS>"));
}

#[test]
fn test_help_for_unknown_command_fails() {
    subcmd()
        .args(["help", "bogus"])
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Subcommand bogus not understood\n"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn test_json_format_is_forwarded_to_commands() {
    let assert = subcmd()
        .args(["--format", "json", "greet", "-n", "ada"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["name"], "ada");
    assert_eq!(json["greeting"], "Hello, ada!");
}

#[test]
fn test_format_from_environment() {
    let assert = subcmd()
        .env("SUBCMD_FORMAT", "json")
        .args(["sum", "2", "3"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total"], 5);
}

#[test]
fn test_countdown_runs_to_zero() {
    subcmd()
        .args(["countdown", "--from", "2"])
        .assert()
        .success()
        .stdout("2\n1\n0\n");
}

#[test]
fn test_expired_timeout_cancels_command() {
    subcmd()
        .args(["--timeout", "0", "countdown", "--from", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cancelled with 5 left"));
}

#[test]
fn test_verbose_logs_dispatch() {
    subcmd()
        .args(["-v", "greet"])
        .assert()
        .success()
        .stdout("Hello, world!\n")
        .stderr(predicate::str::contains("dispatching"));
}

#[test]
fn test_verbose_notes_go_to_stderr() {
    subcmd()
        .args(["--verbose", "sum", "1", "2"])
        .assert()
        .success()
        .stdout("3\n")
        .stderr(predicate::str::contains("[verbose] adding 2 values"));
}

#[test]
fn test_quiet_run_has_no_verbose_notes() {
    subcmd()
        .args(["sum", "1", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose]").not());
}

#[test]
fn test_json_countdown_reports_success_lines() {
    let assert = subcmd()
        .args(["--format", "json", "countdown", "--from", "0"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "0");
}
