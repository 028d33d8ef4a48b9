//! Generated dish photographs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ChefClientError, Result};

/// MIME type assumed when the provider does not name one
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Binary image returned by the image model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Decode the provider's base64 payload.
    pub fn from_base64(mime_type: Option<&str>, data: &str) -> Result<Self> {
        let mime_type = mime_type
            .filter(|m| m.starts_with("image/"))
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes: STANDARD.decode(data.trim())?,
        })
    }

    /// Inline reference usable anywhere an image URL is: `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// Parse a URI produced by `to_data_uri`.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let (header, data) = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or(ChefClientError::NoImage)?;
        let mime_type = header.strip_suffix(";base64").ok_or(ChefClientError::NoImage)?;
        Self::from_base64(Some(mime_type), data)
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let image = GeneratedImage::from_base64(Some("image/jpeg"), "aGVsbG8=").unwrap();
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(image.extension(), "jpg");
    }

    #[test]
    fn test_missing_or_bogus_mime_defaults_to_png() {
        let image = GeneratedImage::from_base64(None, "aGVsbG8=").unwrap();
        assert_eq!(image.mime_type, "image/png");

        let image = GeneratedImage::from_base64(Some("text/plain"), "aGVsbG8=").unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_from_data_uri() {
        let image = GeneratedImage::from_data_uri("data:image/webp;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.bytes, b"hello");

        assert!(GeneratedImage::from_data_uri("https://picsum.photos/seed/x/800/600").is_err());
        assert!(GeneratedImage::from_data_uri("data:image/png,plain").is_err());
    }

    #[test]
    fn test_invalid_base64() {
        assert!(GeneratedImage::from_base64(None, "not base64!!").is_err());
    }
}
