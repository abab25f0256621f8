//! Image format conversion
//!
//! Validates uploaded image files and re-encodes them as lossy WebP into an
//! in-memory buffer ready to be streamed back to a client.

pub mod content_type;
pub mod form_file;
pub mod mock;
pub mod processor;
pub mod quality;

pub use content_type::{detect_image_mime, SUPPORTED_CONTENT_TYPES};
pub use form_file::{FormFile, InputFile};
pub use mock::MockImageConverter;
pub use processor::WebpConverter;
pub use quality::Quality;

use crate::Result;
use async_trait::async_trait;
use std::io::Cursor;

#[async_trait]
pub trait ImageService: Send + Sync {
    /// Convert `input` to WebP. The returned buffer is positioned at 0.
    async fn convert_to_webp(
        &self,
        input: Option<&dyn InputFile>,
        quality: i32,
    ) -> Result<Cursor<Vec<u8>>>;
}
