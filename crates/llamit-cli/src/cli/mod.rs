//! CLI for llamit: read a git diff on stdin, print a commit message on stdout.

mod args;
mod commands;
mod git;

pub use args::GenerateArgs;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;

use commands::{run_config_path, run_formats, run_generate};

/// Top-level CLI. Without a subcommand it generates a commit message.
#[derive(Debug, Parser)]
#[command(name = "llamit")]
#[command(about = "Generate commit messages from a git diff with a local Ollama model", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the config file path, creating a default config if missing.
    ConfigPath,

    /// List the available commit message formats.
    Formats,
}

/// Flags that older callers pass with a single dash (`-model llama3`).
const SINGLE_DASH_FLAGS: [&str; 4] = ["-ollama-url", "-model", "-format", "-custom-template"];

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value` for the
/// known long flags. Everything else passes through untouched.
pub(crate) fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let legacy = arg.to_str().map_or(false, |s| {
                SINGLE_DASH_FLAGS.iter().any(|flag| {
                    s.strip_prefix(flag)
                        .map_or(false, |rest| rest.is_empty() || rest.starts_with('='))
                })
            });
            if legacy {
                let mut long = OsString::from("-");
                long.push(&arg);
                long
            } else {
                arg
            }
        })
        .collect()
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse_from(normalize_args(std::env::args_os()));

        match cli.command {
            Some(CliCommand::ConfigPath) => run_config_path()?,
            Some(CliCommand::Formats) => run_formats(),
            None => run_generate(cli.generate).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
