use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::CompressorError;

/// Output formats the engine boundary accepts as a `fileType` target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    AVIF,
}

impl ImageFormat {
    /// Get the canonical MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
            Self::AVIF => "image/avif",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = CompressorError;

    fn from_str(mime: &str) -> Result<Self, Self::Err> {
        let mime = mime.to_lowercase();
        match mime.as_str() {
            "image/jpeg" | "image/jpg" => Ok(Self::JPEG),
            "image/png" => Ok(Self::PNG),
            "image/webp" => Ok(Self::WebP),
            "image/avif" => Ok(Self::AVIF),
            _ => Err(CompressorError::format(format!(
                "Unsupported image MIME type: {}", mime
            ))),
        }
    }
}

/// Get format from a MIME type string
pub fn format_from_mime(mime: &str) -> Result<ImageFormat, CompressorError> {
    ImageFormat::from_str(mime)
}
