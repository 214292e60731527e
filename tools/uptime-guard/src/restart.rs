//! Restart command execution

use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::config::CommandLine;

/// Cap on how much command output is kept for logs and errors
const MAX_OUTPUT_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum RestartError {
    #[error("failed to start restart command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("restart command `{command}` failed ({status}), output: {output}")]
    Failed {
        command: String,
        status: String,
        output: String,
    },
}

/// Runs the reboot command
#[async_trait]
pub trait RestartInvoker: Send + Sync {
    /// Run `command` to completion and return its combined output
    async fn execute(&self, command: &CommandLine) -> Result<String, RestartError>;
}

/// Spawns the configured command as a child process
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRestarter;

#[async_trait]
impl RestartInvoker for CommandRestarter {
    async fn execute(&self, command: &CommandLine) -> Result<String, RestartError> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RestartError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let mut combined = truncate_output(&output.stdout, MAX_OUTPUT_BYTES);
        combined.push_str(&truncate_output(&output.stderr, MAX_OUTPUT_BYTES));

        if !output.status.success() {
            return Err(RestartError::Failed {
                command: command.to_string(),
                status: output.status.to_string(),
                output: combined,
            });
        }
        Ok(combined)
    }
}

/// Truncate output to max bytes, decoding lossily
fn truncate_output(output: &[u8], max_bytes: usize) -> String {
    let end = output.len().min(max_bytes);
    String::from_utf8_lossy(&output[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(program: &str, args: &[&str]) -> CommandLine {
        CommandLine {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_truncate_output() {
        assert_eq!(truncate_output(b"hello", 10), "hello");
        assert_eq!(truncate_output(b"hello", 2), "he");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let result = CommandRestarter
            .execute(&command("definitely-not-a-real-restart-binary", &[]))
            .await;
        assert!(matches!(result, Err(RestartError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_command_returns_output() {
        let output = CommandRestarter
            .execute(&command("sh", &["-c", "echo restarting; echo warn >&2"]))
            .await
            .unwrap();
        assert!(output.contains("restarting"));
        assert!(output.contains("warn"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let err = CommandRestarter
            .execute(&command("sh", &["-c", "echo denied; exit 3"]))
            .await
            .unwrap_err();
        match err {
            RestartError::Failed { output, .. } => assert!(output.contains("denied")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
