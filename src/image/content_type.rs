//! Content-type policy for conversion inputs.

use crate::{Error, Result};

/// MIME types accepted as conversion input.
pub const SUPPORTED_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Content type reported when sniffing finds no known signature.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Exact match against [`SUPPORTED_CONTENT_TYPES`], ignoring case, surrounding
/// whitespace and `;` parameters.
pub fn is_supported(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    SUPPORTED_CONTENT_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(essence))
}

pub fn ensure_supported(content_type: &str) -> Result<()> {
    if is_supported(content_type) {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat)
    }
}

/// Identify an image MIME type from its leading bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => {
            tracing::warn!(
                "Unrecognized image signature (first 4 bytes: {:02X?})",
                &bytes[..bytes.len().min(4)]
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_types() {
        assert!(is_supported("image/png"));
        assert!(is_supported("image/jpeg"));
        assert!(is_supported("image/webp"));
    }

    #[test]
    fn test_case_whitespace_and_parameters_ignored() {
        assert!(is_supported("IMAGE/PNG"));
        assert!(is_supported("  Image/Jpeg "));
        assert!(is_supported("image/webp; charset=binary"));
    }

    #[test]
    fn test_unsupported_types() {
        for content_type in [
            "",
            "image/",
            "image/gif",
            "image/jpg",
            "image/svg+xml",
            "application/pdf",
            ".png",
            ".jpeg",
            "image/pngx",
        ] {
            assert!(!is_supported(content_type), "{content_type} accepted");
        }
    }

    #[test]
    fn test_ensure_supported_message() {
        let err = ensure_supported("application/pdf").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat));
        assert_eq!(err.to_string(), "File format is not supported.");
        assert!(ensure_supported("image/png").is_ok());
    }

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some("image/png")
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some("image/webp")
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_image_mime(&[0x00, 0x01, 0x02, 0x03]), None);
        assert_eq!(detect_image_mime(&[]), None);
    }
}
