use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// A failed invocation of the symbol-dump tool.
///
/// A tool that could not be started surfaces as [`Launch`](Self::Launch); a
/// tool that ran but reported failure surfaces as [`Exit`](Self::Exit) with
/// its captured stderr. Neither becomes an empty result.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The tool could not be started at all.
    #[error("failed to launch symbol-dump tool {tool:?}")]
    Launch {
        /// The command that failed to start.
        tool: String,
        /// The underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// The tool ran and reported failure.
    #[error("symbol-dump tool exited with {status}{}", fmt_stderr(.stderr))]
    Exit {
        /// The tool's exit status.
        status: ExitStatus,
        /// The tool's captured stderr, trimmed.
        stderr: String,
    },

    /// The tool emitted output that is not valid UTF-8.
    #[error("symbol-dump tool emitted non-UTF-8 output")]
    Output(#[from] std::string::FromUtf8Error),
}

fn fmt_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Runs `<tool> dump --modules <path>` and captures its standard output.
///
/// Blocks until the tool exits; there is no timeout, so a hung tool hangs
/// this process with it. The exit status is checked before any output is
/// handed back, and the tool's stderr is carried into the error.
pub fn dump_modules(tool: &Path, path: &Path) -> Result<String, DumpError> {
    let output = Command::new(tool)
        .arg("dump")
        .arg("--modules")
        .arg(path)
        .output()
        .map_err(|source| DumpError::Launch {
            tool: tool.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(DumpError::Exit {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8(output.stdout)?)
}
