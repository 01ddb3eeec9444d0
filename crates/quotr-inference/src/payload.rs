//! Image payloads carried as data URLs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{InferenceError, Result};

/// A decoded document image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(InferenceError::MissingImage);
        }

        let rest = url.strip_prefix("data:").ok_or(InferenceError::InvalidDataUrl)?;
        let (header, data) = rest.split_once(',').ok_or(InferenceError::InvalidDataUrl)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(InferenceError::InvalidDataUrl)?;

        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| InferenceError::InvalidBase64(e.to_string()))?;

        let mime_type = if mime_type.is_empty() {
            "application/octet-stream"
        } else {
            mime_type
        };

        Ok(Self::new(mime_type, bytes))
    }

    /// Build a payload from a file name and its contents.
    pub fn from_file_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self> {
        let mime_type = mime_for_extension(file_name)
            .ok_or_else(|| InferenceError::UnsupportedImageType(file_name.to_string()))?;
        Ok(Self::new(mime_type, bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Re-encode as a data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

fn mime_for_extension(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_data_url() {
        let payload = ImagePayload::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(payload.mime_type(), "image/png");
        assert_eq!(payload.bytes(), b"hello");
        assert_eq!(payload.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_rejects_missing_and_non_data_urls() {
        assert!(matches!(
            ImagePayload::from_data_url("  "),
            Err(InferenceError::MissingImage)
        ));
        assert!(matches!(
            ImagePayload::from_data_url("https://example.com/a.png"),
            Err(InferenceError::InvalidDataUrl)
        ));
        assert!(matches!(
            ImagePayload::from_data_url("data:image/png,plain"),
            Err(InferenceError::InvalidDataUrl)
        ));
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = ImagePayload::from_data_url("data:image/jpeg;base64,@@@").unwrap_err();
        assert!(matches!(err, InferenceError::InvalidBase64(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_from_file_bytes() {
        let payload = ImagePayload::from_file_bytes("scan.JPG", vec![1, 2, 3]).unwrap();
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert_eq!(payload.len(), 3);
        assert!(ImagePayload::from_file_bytes("notes.txt", vec![]).is_err());
    }
}
