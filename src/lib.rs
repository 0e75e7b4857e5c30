pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalPayloadSource, TokioCommandRunner};
pub use config::UploadConfig;
pub use crate::core::{encoder::encode_blob_argument, uploader::Uploader};
pub use domain::model::UploadReport;
pub use utils::error::{Result, UploadError};

/// Uploads and verifies the module described by `config` using the local
/// filesystem and the real `dfx` binary.
pub async fn upload_wasm(config: UploadConfig) -> Result<UploadReport> {
    let uploader = Uploader::new(LocalPayloadSource::new(), TokioCommandRunner::new(), config);
    uploader.run().await
}
