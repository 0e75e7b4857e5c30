use crate::domain::model::{CommandOutput, Payload};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait PayloadSource: Send + Sync {
    fn read_payload(&self, path: &Path) -> impl std::future::Future<Output = Result<Payload>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn wasm_path(&self) -> &Path;
    fn canister(&self) -> &str;
    fn dfx(&self) -> &str;
    fn upload_method(&self) -> &str;
    fn verify_method(&self) -> &str;
    fn network(&self) -> Option<&str>;
    fn always_verify(&self) -> bool;
}

/// Runs an external program to completion.
///
/// A non-zero exit status is reported through [`CommandOutput`], not as an
/// error; `Err` means the program could not be run at all.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String], stdin: Option<&str>)
        -> Result<CommandOutput>;
}
