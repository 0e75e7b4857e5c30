pub mod encoder;
pub mod uploader;

pub use crate::domain::model::{CommandOutput, Payload, UploadReport};
pub use crate::domain::ports::{CommandRunner, ConfigProvider, PayloadSource};
pub use crate::utils::error::Result;
