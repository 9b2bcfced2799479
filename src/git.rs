use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::PathBuf;
use std::process::Command as GitCommand;

/// Run a git command and capture stdout as String.
pub fn git_output(args: &[&str]) -> Result<String> {
    let output = GitCommand::new("git")
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {:?}", args))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "git {:?} exited with status {:?}: {}",
            args,
            output.status.code(),
            stderr.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Get the path to the Git directory (e.g. .git)
pub fn git_dir() -> Result<PathBuf> {
    let dir = git_output(&["rev-parse", "--git-dir"])?;
    Ok(PathBuf::from(dir.trim()))
}

/// Write the commit message into .git/COMMIT_EDITMSG so the next `git commit`
/// will use it as the default message in the editor.
pub fn write_commit_editmsg(message: &str) -> Result<PathBuf> {
    let path = git_dir()?.join("COMMIT_EDITMSG");
    fs::write(&path, with_trailing_newline(message))
        .with_context(|| format!("failed to write commit message to {:?}", path))?;
    Ok(path)
}

/// Get the current branch name, or the short commit hash on a detached HEAD.
pub fn current_branch() -> Result<String> {
    let name = git_output(&["rev-parse", "--abbrev-ref", "HEAD"])?
        .trim()
        .to_string();

    if name != "HEAD" {
        return Ok(name);
    }

    let short = git_output(&["rev-parse", "--short", "HEAD"])?;
    Ok(format!("detached at {}", short.trim()))
}

/// Arguments for the staged diff. Colors, external drivers and custom path
/// prefixes (`diff.noprefix`, `diff.mnemonicPrefix`) are overridden so the
/// headers always read `a/<path> b/<path>`.
const STAGED_DIFF_ARGS: &[&str] = &[
    "diff",
    "--cached",
    "--no-color",
    "--no-ext-diff",
    "--src-prefix=a/",
    "--dst-prefix=b/",
];

/// Get the full staged diff in plain unified format.
pub fn staged_diff() -> Result<String> {
    git_output(STAGED_DIFF_ARGS)
}

/// Stage all new, modified, and deleted files
pub fn stage_all() -> Result<()> {
    log::warn!("Staging all changes");
    git_output(&["add", "-A"])?;
    Ok(())
}

fn with_trailing_newline(message: &str) -> String {
    let trimmed = message.trim_end();
    format!("{trimmed}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_message_ends_with_exactly_one_newline() {
        assert_eq!(with_trailing_newline("Fix parser"), "Fix parser\n");
        assert_eq!(with_trailing_newline("Fix parser\n\n\n"), "Fix parser\n");
        assert_eq!(with_trailing_newline("Title\n\n- body\n"), "Title\n\n- body\n");
    }

    #[test]
    fn staged_diff_pins_the_path_prefixes() {
        assert!(STAGED_DIFF_ARGS.contains(&"--src-prefix=a/"));
        assert!(STAGED_DIFF_ARGS.contains(&"--dst-prefix=b/"));
        assert!(STAGED_DIFF_ARGS.contains(&"--no-ext-diff"));
    }
}
