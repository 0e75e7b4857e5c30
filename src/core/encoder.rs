//! Candid `blob` literal encoding for the upload argument.

use crate::utils::error::{Result, UploadError};

const BLOB_PREFIX: &str = "(blob \"";
const BLOB_SUFFIX: &str = "\")";

/// Renders `bytes` as `(blob "\XX\XX...")` with lowercase hex escapes.
pub fn encode_blob_argument(bytes: &[u8]) -> String {
    let hex_data = hex::encode(bytes);
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    out.push_str(BLOB_PREFIX);
    for pair in hex_data.as_bytes().chunks(2) {
        out.push('\\');
        // hex::encode only emits ASCII
        out.push(pair[0] as char);
        out.push(pair[1] as char);
    }
    out.push_str(BLOB_SUFFIX);
    out
}

/// Length of the literal produced for a payload of `payload_len` bytes.
pub fn encoded_len(payload_len: usize) -> usize {
    BLOB_PREFIX.len() + 3 * payload_len + BLOB_SUFFIX.len()
}

/// Inverse of [`encode_blob_argument`]. Accepts upper or lowercase hex.
pub fn decode_blob_argument(argument: &str) -> Result<Vec<u8>> {
    let body = argument
        .strip_prefix(BLOB_PREFIX)
        .and_then(|rest| rest.strip_suffix(BLOB_SUFFIX))
        .ok_or_else(|| UploadError::ValidationError {
            message: "argument is not wrapped in (blob \"...\")".to_string(),
        })?;

    if body.len() % 3 != 0 {
        return Err(UploadError::ValidationError {
            message: format!("blob body length {} is not a multiple of 3", body.len()),
        });
    }

    body.as_bytes()
        .chunks(3)
        .enumerate()
        .map(|(index, escape)| {
            if escape[0] != b'\\' {
                return Err(UploadError::ValidationError {
                    message: format!("missing escape character at byte {}", index),
                });
            }
            let mut byte = [0u8; 1];
            hex::decode_to_slice(&escape[1..], &mut byte).map_err(|e| {
                UploadError::ValidationError {
                    message: format!("invalid hex escape at byte {}: {}", index, e),
                }
            })?;
            Ok(byte[0])
        })
        .collect()
}
