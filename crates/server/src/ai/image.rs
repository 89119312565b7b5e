use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::ServiceError;

/// Снимок 3D-модели, декодированный из data URI
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// Декодировать `data:image/png;base64,<payload>`.
    ///
    /// Берётся часть после первой запятой; формат определяется по сигнатуре
    /// байтов, а не по заявленному в префиксе типу.
    pub fn from_data_uri(uri: &str) -> Result<Self, ServiceError> {
        let encoded = uri.split(',').nth(1).ok_or_else(|| {
            ServiceError::InvalidImage(
                "expected a data URI with a comma-separated base64 payload".to_string(),
            )
        })?;

        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| ServiceError::InvalidImage(format!("base64 decode failed: {}", e)))?;

        let mime_type = sniff_mime_type(&bytes).ok_or_else(|| {
            ServiceError::InvalidImage(
                "unsupported image format (expected PNG, JPEG, GIF or WebP)".to_string(),
            )
        })?;

        Ok(Self { mime_type, bytes })
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG: &[u8] = b"\xff\xd8\xff";

    if bytes.starts_with(PNG) {
        Some("image/png")
    } else if bytes.starts_with(JPEG) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
