//! Tests for flag parsing, single-dash compatibility and subcommands.

use super::*;

#[test]
fn cli_parse_no_flags() {
    let cli = parse(&["llamit"]);
    assert!(cli.command.is_none());
    assert!(cli.generate.ollama_url.is_none());
    assert!(cli.generate.model.is_none());
    assert!(cli.generate.format.is_none());
    assert!(cli.generate.max_retries.is_none());
    assert!(!cli.generate.from_git);
}

#[test]
fn cli_parse_from_git() {
    let cli = parse(&["llamit", "--from-git", "-model", "llama3"]);
    assert!(cli.generate.from_git);
    assert_eq!(cli.generate.model.as_deref(), Some("llama3"));
}

#[test]
fn cli_parse_long_flags() {
    let cli = parse(&[
        "llamit",
        "--ollama-url",
        "http://gpu:11434/api/generate",
        "--model",
        "llama3",
        "--format",
        "gitmoji",
        "--max-retries",
        "5",
    ]);
    let g = cli.generate;
    assert_eq!(g.ollama_url.as_deref(), Some("http://gpu:11434/api/generate"));
    assert_eq!(g.model.as_deref(), Some("llama3"));
    assert_eq!(g.format.as_deref(), Some("gitmoji"));
    assert_eq!(g.max_retries, Some(5));
}

#[test]
fn cli_parse_single_dash_flags() {
    let cli = parse(&[
        "llamit",
        "-ollama-url",
        "http://localhost:11434/api/generate",
        "-model",
        "qwen3-coder:30b",
        "-format",
        "custom",
        "-custom-template=Describe the change in one line.",
    ]);
    let g = cli.generate;
    assert_eq!(g.ollama_url.as_deref(), Some("http://localhost:11434/api/generate"));
    assert_eq!(g.model.as_deref(), Some("qwen3-coder:30b"));
    assert_eq!(g.format.as_deref(), Some("custom"));
    assert_eq!(
        g.custom_template.as_deref(),
        Some("Describe the change in one line.")
    );
}

#[test]
fn normalize_leaves_other_args_alone() {
    let args: Vec<OsString> = ["llamit", "-modelx", "--model", "m", "-h", "formats"]
        .iter()
        .map(OsString::from)
        .collect();
    assert_eq!(normalize_args(args.clone()), args);
}

#[test]
fn cli_parse_config_flag() {
    let cli = parse(&["llamit", "--config", "/tmp/llamit.toml"]);
    assert_eq!(
        cli.generate.config.as_deref(),
        Some(std::path::Path::new("/tmp/llamit.toml"))
    );
}

#[test]
fn cli_parse_formats() {
    match parse(&["llamit", "formats"]).command {
        Some(CliCommand::Formats) => {}
        other => panic!("expected Formats, got {:?}", other),
    }
}

#[test]
fn cli_parse_config_path() {
    match parse(&["llamit", "config-path"]).command {
        Some(CliCommand::ConfigPath) => {}
        other => panic!("expected ConfigPath, got {:?}", other),
    }
}

#[test]
fn cli_rejects_flags_with_subcommand() {
    assert!(Cli::try_parse_from(["llamit", "--model", "m", "formats"]).is_err());
}

#[test]
fn cli_rejects_bad_retry_count() {
    assert!(Cli::try_parse_from(["llamit", "--max-retries", "-1"]).is_err());
}
