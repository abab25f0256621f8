use super::content_type::ensure_supported;
use super::{ImageService, InputFile, Quality};
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageReader};
use std::io::{Cursor, Read, Write};
use std::time::Duration;
use tracing::debug;

/// Converts PNG, JPEG and WebP uploads to lossy WebP.
#[derive(Debug, Clone, Default)]
pub struct WebpConverter {
    timeout: Option<Duration>,
}

impl WebpConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.timeout,
        }
    }

    /// Bound the async path. Has no effect on [`WebpConverter::convert`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check a request in order: presence, content type, quality.
    pub fn validate(
        input: Option<&dyn InputFile>,
        quality: i32,
    ) -> Result<(&dyn InputFile, Quality)> {
        let file = input.ok_or(Error::NullInput { param: "input" })?;
        ensure_supported(file.content_type())?;
        let quality = Quality::new(quality)?;
        Ok((file, quality))
    }

    /// Convert on the calling thread.
    pub fn convert(&self, input: Option<&dyn InputFile>, quality: i32) -> Result<Cursor<Vec<u8>>> {
        let (file, quality) = Self::validate(input, quality)?;
        debug!(
            "Converting {} ({}, {} bytes) at quality {}",
            file.file_name(),
            file.content_type(),
            file.length(),
            quality
        );
        let stream = file.open_read_stream()?;
        Self::transcode(stream, quality)
    }

    fn transcode(mut stream: Box<dyn Read + Send>, quality: Quality) -> Result<Cursor<Vec<u8>>> {
        let mut data = Vec::new();
        stream.read_to_end(&mut data)?;

        let image = decode(&data)?;
        let encoded = encode_webp(&image, quality)?;
        debug!(
            "Encoded {}x{} image: {} -> {} bytes",
            image.width(),
            image.height(),
            data.len(),
            encoded.len()
        );

        let mut buffer = Cursor::new(Vec::with_capacity(encoded.len()));
        buffer.write_all(&encoded)?;
        buffer.set_position(0);
        Ok(buffer)
    }
}

fn decode(data: &[u8]) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()
        .map_err(Error::Decode)
}

fn encode_webp(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>> {
    let (width, height) = (image.width(), image.height());
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        encoder.encode_simple(false, quality.as_f32())
    } else {
        let rgb = image.to_rgb8();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
        encoder.encode_simple(false, quality.as_f32())
    }
    .map_err(|e| Error::Encode(format!("{:?}", e)))?;
    Ok(encoded.to_vec())
}

#[async_trait]
impl ImageService for WebpConverter {
    async fn convert_to_webp(
        &self,
        input: Option<&dyn InputFile>,
        quality: i32,
    ) -> Result<Cursor<Vec<u8>>> {
        let (file, quality) = Self::validate(input, quality)?;
        debug!(
            "Converting {} ({}, {} bytes) at quality {} on blocking pool",
            file.file_name(),
            file.content_type(),
            file.length(),
            quality
        );
        let stream = file.open_read_stream()?;
        let task = tokio::task::spawn_blocking(move || Self::transcode(stream, quality));

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => task.await,
        };
        joined.map_err(|e| Error::Invariant(format!("Image conversion task join error: {}", e)))?
    }
}
