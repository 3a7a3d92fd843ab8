//! Human-readable flag listings

use std::fmt::Write;

use clap::{Arg, ArgAction, Command};

/// Renders one aligned line per visible option declared on `command`.
///
/// ```text
///   -n, --name <NAME>   who to greet (default "world")
///       --loud          shout the greeting
/// ```
pub(crate) fn render(command: &Command) -> String {
    let rows: Vec<(String, String)> = command
        .get_arguments()
        .filter(|arg| !arg.is_positional() && !arg.is_hide_set())
        .map(|arg| (synopsis(arg), description(arg)))
        .collect();

    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (left, right) in rows {
        if right.is_empty() {
            let _ = writeln!(out, "{}", left);
        } else {
            let _ = writeln!(out, "{:<width$}   {}", left, right, width = width);
        }
    }
    out
}

fn synopsis(arg: &Arg) -> String {
    let mut left = match (arg.get_short(), arg.get_long()) {
        (Some(short), Some(long)) => format!("  -{}, --{}", short, long),
        (Some(short), None) => format!("  -{}", short),
        (None, Some(long)) => format!("      --{}", long),
        (None, None) => format!("      {}", arg.get_id()),
    };

    if arg.get_action().takes_values() {
        left.push(' ');
        left.push_str(&value_name(arg));
    }
    left
}

fn value_name(arg: &Arg) -> String {
    match arg.get_value_names() {
        Some(names) if !names.is_empty() => names
            .iter()
            .map(|name| format!("<{}>", name))
            .collect::<Vec<_>>()
            .join(" "),
        _ => format!("<{}>", arg.get_id().as_str().to_uppercase()),
    }
}

fn description(arg: &Arg) -> String {
    let mut right = arg.get_help().map(|h| h.to_string()).unwrap_or_default();

    let boolean = matches!(
        arg.get_action(),
        ArgAction::SetTrue | ArgAction::SetFalse | ArgAction::Count
    );
    let defaults = arg.get_default_values();
    if !boolean && !defaults.is_empty() {
        let joined = defaults
            .iter()
            .map(|d| d.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(",");
        push_note(&mut right, &format!("(default \"{}\")", joined));
    }

    if arg.is_required_set() {
        push_note(&mut right, "(required)");
    }
    right
}

fn push_note(text: &mut String, note: &str) {
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(note);
}
