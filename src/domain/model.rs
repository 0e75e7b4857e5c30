use std::path::PathBuf;

/// Bytes of a compiled module, read once from disk.
#[derive(Debug, Clone)]
pub struct Payload {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Payload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Captured result of one external invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub payload_size: usize,
    pub uploaded: bool,
    pub verified: bool,
    /// `None` when verification was skipped or the query could not be started.
    pub verify_stdout: Option<String>,
}

impl UploadReport {
    pub fn is_success(&self) -> bool {
        self.uploaded && self.verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let ok = CommandOutput {
            status: Some(0),
            ..Default::default()
        };
        let failed = CommandOutput {
            status: Some(1),
            ..Default::default()
        };
        let killed = CommandOutput::default();

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[test]
    fn test_report_requires_upload_and_verification() {
        let mut report = UploadReport {
            payload_size: 4,
            uploaded: false,
            verified: true,
            verify_stdout: Some("(true)".to_string()),
        };
        assert!(!report.is_success());

        report.uploaded = true;
        assert!(report.is_success());
    }
}
