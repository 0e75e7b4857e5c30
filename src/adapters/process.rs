use crate::core::{CommandOutput, CommandRunner};
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs programs with `tokio::process`, capturing both output streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&str>,
    ) -> Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| UploadError::CommandSpawnError {
            program: program.to_string(),
            source,
        })?;

        // stdin is fed while stdout and stderr are being drained
        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(mut pipe), Some(input)) = (pipe, stdin) {
                pipe.write_all(input.as_bytes()).await?;
                pipe.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        match fed {
            Ok(()) => {}
            // the child exited without reading all of its input
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!("{} closed stdin early", program);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!("{} exited with status {:?}", program, output.status.code());
        Ok(CommandOutput::from(output))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_stdin_is_delivered() {
        let runner = TokioCommandRunner::new();
        let output = runner
            .run("cat", &[], Some(r#"(blob "\de\ad")"#))
            .await
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, r#"(blob "\de\ad")"#);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let runner = TokioCommandRunner::new();
        let output = runner
            .run("sh", &args(&["-c", "echo boom >&2; exit 3"]), None)
            .await
            .unwrap();

        assert_eq!(output.status, Some(3));
        assert!(!output.success());
        assert_eq!(output.stderr.trim(), "boom");
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_spawn() {
        let runner = TokioCommandRunner::new();
        let err = runner
            .run("wasm-upload-no-such-binary", &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::CommandSpawnError { .. }));
    }
}
