use crate::core::encoder::encode_blob_argument;
use crate::core::{CommandRunner, ConfigProvider, PayloadSource, UploadReport};
use crate::utils::error::Result;
use std::io::Write;

/// Literal the verification query prints when the module is installed.
pub const VERIFY_SUCCESS_MARKER: &str = "(true)";

pub struct Uploader<S: PayloadSource, R: CommandRunner, C: ConfigProvider> {
    source: S,
    runner: R,
    config: C,
}

impl<S: PayloadSource, R: CommandRunner, C: ConfigProvider> Uploader<S, R, C> {
    pub fn new(source: S, runner: R, config: C) -> Self {
        Self {
            source,
            runner,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Reads, encodes and uploads the payload, then runs the verification
    /// query. A failed upload or verification is reported through the
    /// returned [`UploadReport`]; `Err` is reserved for failures that stop the
    /// run outright (missing file, unreadable file, dfx not runnable).
    pub async fn run(&self) -> Result<UploadReport> {
        let wasm_path = self.config.wasm_path();
        println!("📦 Reading WASM file: {}", wasm_path.display());

        let payload = self.source.read_payload(wasm_path).await?;
        println!("📏 WASM size: {} bytes", format_thousands(payload.len()));

        let mut report = UploadReport {
            payload_size: payload.len(),
            ..Default::default()
        };

        print!("⬆️  Uploading WASM... ");
        let _ = std::io::stdout().flush();

        let argument = encode_blob_argument(&payload.bytes);
        tracing::debug!(
            "Encoded {} bytes into a {} byte argument",
            payload.len(),
            argument.len()
        );

        let upload_args = upload_args(&self.config);
        tracing::debug!("Running {} {}", self.config.dfx(), upload_args.join(" "));
        let upload = self
            .runner
            .run(self.config.dfx(), &upload_args, Some(&argument))
            .await?;

        if upload.success() {
            println!("✅");
            report.uploaded = true;
        } else {
            println!("❌ Failed!");
            eprintln!("{}", upload.stderr);
            tracing::warn!("Upload call exited with status {:?}", upload.status);

            if !self.config.always_verify() {
                return Ok(report);
            }
            tracing::info!("Verifying anyway (always_verify is set)");
        }

        println!("\n🔍 Verifying upload...");
        let verify_args = verify_args(&self.config);
        tracing::debug!("Running {} {}", self.config.dfx(), verify_args.join(" "));

        let verify = match self.runner.run(self.config.dfx(), &verify_args, None).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Verification query could not be run: {}", e);
                println!("❌ Verification failed!");
                return Ok(report);
            }
        };
        println!("{}", verify.stdout);

        if !verify.success() {
            tracing::warn!("Verification call exited with status {:?}", verify.status);
            if !verify.stderr.is_empty() {
                eprintln!("{}", verify.stderr);
            }
        }

        report.verified = verify.success() && verify.stdout.contains(VERIFY_SUCCESS_MARKER);
        report.verify_stdout = Some(verify.stdout);

        if report.is_success() {
            println!("✅ WASM successfully uploaded and verified!");
        } else {
            println!("❌ Verification failed!");
        }

        Ok(report)
    }
}

fn canister_call_args<C: ConfigProvider>(config: &C, method: &str) -> Vec<String> {
    let mut args = vec!["canister".to_string(), "call".to_string()];
    if let Some(network) = config.network() {
        args.push("--network".to_string());
        args.push(network.to_string());
    }
    args.push(config.canister().to_string());
    args.push(method.to_string());
    args
}

pub fn upload_args<C: ConfigProvider>(config: &C) -> Vec<String> {
    let mut args = canister_call_args(config, config.upload_method());
    args.push("--argument-file".to_string());
    args.push("-".to_string());
    args
}

pub fn verify_args<C: ConfigProvider>(config: &C) -> Vec<String> {
    canister_call_args(config, config.verify_method())
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
