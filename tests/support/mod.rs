use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const EXPECTED_README: &str = "\
# Reference

## Configuration

| Option | Type | Description |
| --- | --- | --- |
| `api_base` | str |  |
| `model` | str | Model identifier. |
| `timeout` | int | Seconds to wait for a response. |

## Commands

- `:Ask` Ask a question about the buffer.
- `:Translate` Translate the selection.
";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Scratch directory laid out like a project: `_build/doc.json` and
/// `README.jinja.md` copied from the fixtures.
pub fn fixture_workspace() -> Result<TempDir> {
    let dir = TempDir::new().context("failed to allocate workspace")?;
    fs::create_dir_all(dir.path().join("_build"))?;
    fs::copy(fixture_path("doc.json"), dir.path().join("_build/doc.json"))
        .context("copying catalogue fixture")?;
    fs::copy(
        fixture_path("README.jinja.md"),
        dir.path().join("README.jinja.md"),
    )
    .context("copying template fixture")?;
    Ok(dir)
}

/// The binary run from `cwd` with no ambient config or log settings.
pub fn symdoc(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_symdoc"));
    cmd.current_dir(cwd)
        .env_remove("SYMDOC_CONFIG")
        .env_remove("SYMDOC_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run a command that must fail; returns its stderr.
pub fn run_expecting_failure(mut cmd: Command) -> Result<String> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        bail!(
            "command {:?} unexpectedly succeeded\nstdout: {}",
            cmd,
            String::from_utf8_lossy(&output.stdout)
        );
    }
    assert_eq!(output.status.code(), Some(1), "failures exit with status 1");
    Ok(String::from_utf8_lossy(&output.stderr).into_owned())
}
