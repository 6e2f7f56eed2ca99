//! CLI parse and settings tests.

use super::{normalize_args, Cli, CliCommand};
use clap::Parser;
use std::ffi::OsString;

pub(super) fn parse(args: &[&str]) -> Cli {
    let args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(normalize_args(args)).unwrap()
}

mod flags;
