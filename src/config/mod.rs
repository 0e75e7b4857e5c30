pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_identifier, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_WASM_PATH: &str = "wasm/icrc151.wasm";
pub const DEFAULT_CANISTER: &str = "marketfactory";
pub const DEFAULT_DFX: &str = "dfx";
pub const DEFAULT_UPLOAD_METHOD: &str = "uploadIcrc151Wasm";
pub const DEFAULT_VERIFY_METHOD: &str = "hasIcrc151Wasm";

/// Fully resolved settings for one upload run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub wasm_path: PathBuf,
    pub canister: String,
    pub dfx: String,
    pub upload_method: String,
    pub verify_method: String,
    pub network: Option<String>,
    pub always_verify: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            wasm_path: PathBuf::from(DEFAULT_WASM_PATH),
            canister: DEFAULT_CANISTER.to_string(),
            dfx: DEFAULT_DFX.to_string(),
            upload_method: DEFAULT_UPLOAD_METHOD.to_string(),
            verify_method: DEFAULT_VERIFY_METHOD.to_string(),
            network: None,
            always_verify: false,
        }
    }
}

impl UploadConfig {
    /// Applies the `[upload]` table of a config file over the defaults.
    pub fn from_toml(file: &TomlConfig) -> Self {
        let section = &file.upload;
        let defaults = Self::default();

        Self {
            wasm_path: section
                .wasm_path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or(defaults.wasm_path),
            canister: section.canister.clone().unwrap_or(defaults.canister),
            dfx: section.dfx.clone().unwrap_or(defaults.dfx),
            upload_method: section
                .upload_method
                .clone()
                .unwrap_or(defaults.upload_method),
            verify_method: section
                .verify_method
                .clone()
                .unwrap_or(defaults.verify_method),
            network: section.network.clone(),
            always_verify: section.always_verify.unwrap_or(defaults.always_verify),
        }
    }
}

impl Validate for UploadConfig {
    fn validate(&self) -> Result<()> {
        validate_path("wasm_path", &self.wasm_path.to_string_lossy())?;
        validate_identifier("canister", &self.canister)?;
        validate_path("dfx", &self.dfx)?;
        validate_identifier("upload_method", &self.upload_method)?;
        validate_identifier("verify_method", &self.verify_method)?;
        if let Some(network) = &self.network {
            validate_identifier("network", network)?;
        }
        Ok(())
    }
}

impl ConfigProvider for UploadConfig {
    fn wasm_path(&self) -> &Path {
        &self.wasm_path
    }

    fn canister(&self) -> &str {
        &self.canister
    }

    fn dfx(&self) -> &str {
        &self.dfx
    }

    fn upload_method(&self) -> &str {
        &self.upload_method
    }

    fn verify_method(&self) -> &str {
        &self.verify_method
    }

    fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    fn always_verify(&self) -> bool {
        self.always_verify
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "wasm-upload")]
#[command(about = "Upload the ICRC-151 WASM module to a canister with dfx and verify it")]
pub struct CliConfig {
    /// Path to the WASM module [default: wasm/icrc151.wasm]
    pub wasm_path: Option<PathBuf>,

    /// Target canister name [default: marketfactory]
    pub canister: Option<String>,

    /// dfx binary to invoke [default: dfx]
    #[arg(long)]
    pub dfx: Option<String>,

    /// Canister method receiving the blob [default: uploadIcrc151Wasm]
    #[arg(long)]
    pub upload_method: Option<String>,

    /// Query method returning (true) once the module is stored [default: hasIcrc151Wasm]
    #[arg(long)]
    pub verify_method: Option<String>,

    /// dfx network to target (passed as --network)
    #[arg(long)]
    pub network: Option<String>,

    /// Run the verification query even when the upload call fails
    #[arg(long)]
    pub always_verify: bool,

    /// Path to a TOML configuration file with an [upload] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges command line > config file > defaults.
    pub fn resolve(&self) -> Result<UploadConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                UploadConfig::from_toml(&TomlConfig::from_file(path)?)
            }
            None => UploadConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, base: UploadConfig) -> UploadConfig {
        UploadConfig {
            wasm_path: self.wasm_path.clone().unwrap_or(base.wasm_path),
            canister: self.canister.clone().unwrap_or(base.canister),
            dfx: self.dfx.clone().unwrap_or(base.dfx),
            upload_method: self.upload_method.clone().unwrap_or(base.upload_method),
            verify_method: self.verify_method.clone().unwrap_or(base.verify_method),
            network: self.network.clone().or(base.network),
            always_verify: self.always_verify || base.always_verify,
        }
    }
}
