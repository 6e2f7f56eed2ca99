//! Diff input when nothing is piped in: staged changes first, then the working tree.

use anyhow::{Context, Result};
use std::fmt;
use std::process::{Command, Stdio};

const STAGED: [&str; 2] = ["diff", "--cached"];
const WORKING_TREE: [&str; 1] = ["diff"];

/// Which `git diff` produced the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSource {
    Staged,
    WorkingTree,
}

impl fmt::Display for DiffSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffSource::Staged => f.write_str("staged changes"),
            DiffSource::WorkingTree => f.write_str("working tree changes"),
        }
    }
}

/// Run `git diff --cached`, then `git diff`, in the current directory.
pub fn git_diff_cascade() -> Result<(Vec<u8>, DiffSource)> {
    diff_cascade(run_git)
}

/// First non-blank diff from `run`. Errors when both diffs are blank.
pub(crate) fn diff_cascade<F>(mut run: F) -> Result<(Vec<u8>, DiffSource)>
where
    F: FnMut(&[&str]) -> Result<Vec<u8>>,
{
    let staged = run(&STAGED[..])?;
    if !is_blank(&staged) {
        return Ok((staged, DiffSource::Staged));
    }
    tracing::debug!("no staged changes, falling back to working tree diff");
    let working = run(&WORKING_TREE[..])?;
    if !is_blank(&working) {
        return Ok((working, DiffSource::WorkingTree));
    }
    anyhow::bail!("no changes to commit: staged and working tree diffs are both empty")
}

fn is_blank(diff: &[u8]) -> bool {
    diff.iter().all(u8::is_ascii_whitespace)
}

/// Run git and return stdout. A failing git that still printed a diff counts as success.
fn run_git(args: &[&str]) -> Result<Vec<u8>> {
    let output = Command::new("git")
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    if !output.status.success() && output.stdout.is_empty() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(output.stdout)
}
