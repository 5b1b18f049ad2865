//! Inline image references (`data:<mime>;base64,<payload>`).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::StudioError;

/// A parsed base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    /// Base64 payload, still encoded.
    pub data: String,
}

impl DataUri {
    /// Parse a `data:` URI carrying a base64 payload.
    pub fn parse(uri: &str) -> Result<Self, StudioError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::InvalidInput("image is not a data URI".to_string()))?;

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| StudioError::InvalidInput("data URI has no payload".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| StudioError::InvalidInput("data URI is not base64".to_string()))?;

        if mime_type.is_empty() {
            return Err(StudioError::InvalidInput(
                "data URI has no MIME type".to_string(),
            ));
        }

        if data.is_empty() {
            return Err(StudioError::InvalidInput("data URI payload is empty".to_string()));
        }

        STANDARD
            .decode(data)
            .map_err(|e| StudioError::InvalidInput(format!("invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Build a data URI from a MIME type and an already-encoded payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Render back to `data:<mime>;base64,<payload>`.
    pub fn to_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Where an image reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Inline bytes produced by the model or uploaded by the user.
    Inline(DataUri),
    /// An `http` or `https` URL.
    Remote(String),
    /// Anything else, typically a bundled asset path.
    Local(String),
}

impl ImageSource {
    /// Classify an image reference.
    ///
    /// Strings that look like data URIs but fail to parse are treated as local.
    pub fn classify(image: &str) -> Self {
        if image.starts_with("http") {
            return ImageSource::Remote(image.to_string());
        }

        match DataUri::parse(image) {
            Ok(uri) => ImageSource::Inline(uri),
            Err(_) => ImageSource::Local(image.to_string()),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageSource::Inline(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png() {
        let uri = DataUri::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(uri.mime_type, "image/png");
        assert_eq!(uri.data, "iVBORw0KGgo=");
        assert_eq!(uri.to_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_parse_rejects_non_data() {
        assert!(DataUri::parse("/images/mock/glass-blown.png").is_err());
        assert!(DataUri::parse("data:image/png,plain").is_err());
        assert!(DataUri::parse("data:;base64,AAAA").is_err());
        assert!(DataUri::parse("data:image/png;base64,").is_err());
        assert!(DataUri::parse("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_classify() {
        assert!(matches!(
            ImageSource::classify("https://images.example.com/vase.jpg"),
            ImageSource::Remote(_)
        ));
        assert!(matches!(
            ImageSource::classify("http://localhost/vase.jpg"),
            ImageSource::Remote(_)
        ));
        assert!(ImageSource::classify("data:image/jpeg;base64,/9j/4AAQ").is_inline());
        assert!(matches!(
            ImageSource::classify("/images/mock/glass-fused.png"),
            ImageSource::Local(_)
        ));
    }
}
