use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use wasm_upload::utils::{logger, validation::Validate};
use wasm_upload::{upload_wasm, CliConfig, UploadError, UploadReport};

const RULE_WIDTH: usize = 60;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    println!("{}", "=".repeat(RULE_WIDTH));
    println!("ICRC-151 WASM Upload");
    println!("{}", "=".repeat(RULE_WIDTH));

    let success = match run(&cli).await {
        Ok(report) => {
            tracing::info!(
                "Run finished: uploaded={}, verified={}, {} bytes",
                report.uploaded,
                report.verified,
                report.payload_size
            );
            report.is_success()
        }
        Err(e) => {
            report_error(&e);
            false
        }
    };

    println!("{}", "=".repeat(RULE_WIDTH));
    if success {
        println!("✅ SUCCESS: WASM uploaded successfully!");
    } else {
        println!("❌ FAILED: WASM upload failed!");
    }
    println!("{}", "=".repeat(RULE_WIDTH));

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(cli: &CliConfig) -> anyhow::Result<UploadReport> {
    let config = cli.resolve().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    tracing::debug!("Resolved config: {:?}", config);

    let report = upload_wasm(config).await.context("upload aborted")?;
    Ok(report)
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<UploadError>() {
        Some(upload_error) => {
            tracing::error!(
                "❌ {:#} (Category: {:?}, Severity: {:?})",
                e,
                upload_error.category(),
                upload_error.severity()
            );
            eprintln!("❌ {}", upload_error.user_friendly_message());
            eprintln!("💡 {}", upload_error.recovery_suggestion());
        }
        None => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ Error: {}", e);
        }
    }

    // cause chain, plus a backtrace when RUST_BACKTRACE is set
    eprintln!("{:?}", e);
}
