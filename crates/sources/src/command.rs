//! Bounded external tool invocation
//!
//! Every CLI-based strategy goes through [`run_bounded`]: the child gets a
//! hard deadline, stdin/stderr are detached, and any failure collapses into
//! `None` so the caller can move on to its next strategy.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Why an external tool produced no usable output
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("`{program}` exited with {status}")]
    Exit { program: String, status: ExitStatus },
    #[error("`{program}` wrote non UTF-8 output")]
    Encoding { program: String },
}

/// Run `program` with `args`, returning its stdout
///
/// The child is killed if it outlives `timeout`.
pub async fn try_run_bounded(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<String, CommandError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Ok(result) => result.map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?,
        Err(_) => {
            return Err(CommandError::Timeout {
                program: program.to_string(),
                timeout,
            })
        }
    };

    if !output.status.success() {
        return Err(CommandError::Exit {
            program: program.to_string(),
            status: output.status,
        });
    }

    String::from_utf8(output.stdout).map_err(|_| CommandError::Encoding {
        program: program.to_string(),
    })
}

/// [`try_run_bounded`] with every error class swallowed
pub async fn run_bounded(program: &str, args: &[String], timeout: Duration) -> Option<String> {
    match try_run_bounded(program, args, timeout).await {
        Ok(stdout) => Some(stdout),
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let out = try_run_bounded("echo", &args(&["71.0"]), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.trim(), "71.0");
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let err = try_run_bounded("cyber-monitor-no-such-tool", &[], Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let err = try_run_bounded("sh", &args(&["-c", "echo 42; exit 3"]), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Exit { .. }));
    }

    #[tokio::test]
    async fn test_hung_tool_times_out() {
        let started = std::time::Instant::now();
        let err = try_run_bounded("sleep", &args(&["5"]), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_run_bounded_swallows_errors() {
        assert!(run_bounded("cyber-monitor-no-such-tool", &[], Duration::from_secs(1))
            .await
            .is_none());
        assert!(run_bounded("false", &[], Duration::from_secs(5)).await.is_none());
    }
}
