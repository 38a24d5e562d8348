//! Image description from magic bytes
//!
//! Attached screenshots are never sent to a vision model. The describer
//! decodes the payload, checks its size and names the format, producing one
//! line of extra context for the prompt.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use std::fmt;

/// Largest accepted decoded image (10MB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub const IMAGE_UNPROCESSABLE: &str = "Image provided but could not be processed.";
pub const IMAGE_TOO_LARGE: &str = "Image too large (max 10MB).";

/// Image format recognised from leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Unknown,
}

impl ImageFormat {
    /// Sniff the format from magic bytes
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            Self::Png
        } else if data.starts_with(b"RIFF")
            && data[..data.len().min(12)].windows(4).any(|w| w == b"WEBP")
        {
            Self::Webp
        } else {
            Self::Unknown
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Webp => "WEBP",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Describe a base64 image payload in one line. Never fails.
pub fn describe(payload: &str) -> String {
    if payload.is_empty() {
        return String::new();
    }

    let data = match BASE64_STANDARD.decode(payload.trim()) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Image processing error: {}", e);
            return IMAGE_UNPROCESSABLE.to_string();
        }
    };

    describe_bytes(&data)
}

/// Describe already-decoded image bytes
pub fn describe_bytes(data: &[u8]) -> String {
    if data.len() > MAX_IMAGE_BYTES {
        tracing::warn!("Rejected image of {} bytes", data.len());
        return IMAGE_TOO_LARGE.to_string();
    }

    let format = ImageFormat::sniff(data);
    tracing::debug!("Image attached: {} ({} bytes)", format, data.len());

    format!(
        "Image provided ({}, {} bytes). Screenshot or diagram related to TDS question.",
        format,
        data.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &[u8]) -> String {
        BASE64_STANDARD.encode(data)
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(describe(""), "");
    }

    #[test]
    fn test_invalid_base64() {
        assert_eq!(describe("not base64 at all!!"), IMAGE_UNPROCESSABLE);
    }

    #[test]
    fn test_jpeg_magic() {
        let description = describe(&encode(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(description.contains("JPEG"));
        assert!(description.contains("4 bytes"));
    }

    #[test]
    fn test_png_and_webp_magic() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(describe(&encode(&png)).contains("(PNG, 8 bytes)"));

        let webp = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
        assert_eq!(ImageFormat::sniff(webp), ImageFormat::Webp);

        let wav = b"RIFF\x24\x00\x00\x00WAVEfmt ";
        assert_eq!(ImageFormat::sniff(wav), ImageFormat::Unknown);
    }

    #[test]
    fn test_unknown_format() {
        assert!(describe(&encode(b"GIF89a")).contains("Unknown"));
    }

    #[test]
    fn test_too_large() {
        let data = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert_eq!(describe(&encode(&data)), IMAGE_TOO_LARGE);
    }

    #[test]
    fn test_exactly_max_size_accepted() {
        let data = vec![0xFFu8; MAX_IMAGE_BYTES];
        assert!(describe_bytes(&data).starts_with("Image provided (Unknown"));
    }
}
