//! Upload boundary: file-type filter and decode.

use std::path::Path;

use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage};

/// File extensions the uploader accepts, lowercase.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum UploadError {
    /// The file name does not end in an accepted extension.
    #[error("Unsupported file type: {0:?} (expected jpg, jpeg or png)")]
    UnsupportedExtension(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Whether `file_name` carries an accepted extension (case-insensitive).
pub fn is_accepted_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Check the file name, then decode the bytes to an RGB image.
///
/// # Errors
///
/// Returns `UploadError::UnsupportedExtension` without touching the bytes
/// when the name is rejected, or `UploadError::Decode` when decoding fails.
pub fn accept_upload(file_name: &str, bytes: &[u8]) -> Result<DecodedImage, UploadError> {
    if !is_accepted_file(file_name) {
        return Err(UploadError::UnsupportedExtension(file_name.to_string()));
    }

    let image = decode_image(bytes)?;
    log::info!(
        "accepted upload {file_name}: {}x{} ({} bytes)",
        image.width,
        image.height,
        bytes.len()
    );
    Ok(image)
}
