//! # Flag Sets
//!
//! Posix-style flag parsing for the top level of a program and for every
//! subcommand, built on `clap`'s builder API.
//!
//! A [`FlagSet`] is declared first (options only, added with
//! [`FlagSet::add`] or the typed helpers) and parsed once against a list of
//! argument strings. Everything that is not a flag ends up in the positional
//! list available through [`FlagSet::args`].
//!
//! ## Failure Policy
//!
//! | Policy | On malformed input |
//! |--------|--------------------|
//! | [`ErrorHandling::ContinueOnError`] | writes a diagnostic and usage, returns [`FlagError`] |
//! | [`ErrorHandling::ExitOnError`] | writes a diagnostic and usage, exits the process (2, or 0 for `--help`) |

mod error;
mod flag_set;
mod usage;

pub use error::FlagError;
pub use flag_set::{ErrorHandling, FlagSet, UsageFn};
