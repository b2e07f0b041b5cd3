use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// Mime type assumed when the data URI header omits one.
pub const DEFAULT_MIME: &str = "image/png";
/// File name used when the phone sends none (stock extension default).
pub const DEFAULT_FILE_NAME: &str = "upload.png";

/// An image payload decoded out of its data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("payload is not a data uri")]
    NotADataUri,
    #[error("data uri is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(String),
}

/// Decode a `data:<mime>;base64,<payload>` URI into raw image bytes.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, UploadError> {
    let rest = uri.strip_prefix("data:").ok_or(UploadError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(UploadError::NotADataUri)?;

    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or("");
    if !parts.any(|part| part.eq_ignore_ascii_case("base64")) {
        return Err(UploadError::NotBase64);
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|err| UploadError::Base64(err.to_string()))?;

    let mime = if mime.is_empty() {
        DEFAULT_MIME.to_string()
    } else {
        mime.to_string()
    };
    Ok(DecodedImage { bytes, mime })
}

/// File name actually used for storage when the phone's suggestion is
/// empty or whitespace.
pub fn effective_file_name(file_name: &str) -> String {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
