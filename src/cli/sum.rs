//! `sum` - adds integers

use std::any::Any;

use anyhow::{bail, Context as _, Result};

use super::output::Printer;
use crate::{Command, Context, ExitStatus, FlagSet};

pub struct Sum;

/// Adds every argument, failing on the first one that is not an integer
fn total(values: &[String]) -> Result<i64> {
    let mut total: i64 = 0;
    for value in values {
        let n: i64 = value
            .parse()
            .with_context(|| format!("'{}' is not an integer", value))?;
        total = match total.checked_add(n) {
            Some(t) => t,
            None => bail!("sum overflows a 64-bit integer"),
        };
    }
    Ok(total)
}

impl Command for Sum {
    fn name(&self) -> &str {
        "sum"
    }

    fn synopsis(&self) -> &str {
        "add integers"
    }

    fn execute(&self, _ctx: &Context, flags: &FlagSet, args: &[&dyn Any]) -> ExitStatus {
        let printer = Printer::from_args(args);
        printer.verbose(&format!("adding {} values", flags.narg()));

        match total(flags.args()) {
            Ok(total) if printer.is_json() => {
                printer.data(&serde_json::json!({ "total": total }));
                ExitStatus::Success
            }
            Ok(total) => {
                printer.success(&total.to_string());
                ExitStatus::Success
            }
            Err(e) => {
                printer.error(&format!("{:#}", e));
                ExitStatus::Failure
            }
        }
    }
}
