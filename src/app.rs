//! Application orchestration for converting a single file from disk.

use crate::image::content_type::FALLBACK_CONTENT_TYPE;
use crate::image::{detect_image_mime, FormFile, ImageService, InputFile, WebpConverter};
use crate::models::{Config, ConversionSummary};
use crate::{Error, Result};
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use tracing::{info, warn};

/// Loads an image from disk and runs it through an [`ImageService`].
pub struct App {
    image: Box<dyn ImageService>,
    config: Config,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub image: Box<dyn ImageService>,
}

impl App {
    pub fn with_services(services: AppServices, config: Config) -> Self {
        Self {
            image: services.image,
            config,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        info!("Default quality: {}", config.quality);
        if let Some(timeout) = config.timeout {
            info!("Conversion timeout: {:?}", timeout);
        }

        let image = Box::new(WebpConverter::from_config(&config));
        Ok(Self::with_services(AppServices { image }, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert the file at `path`.
    ///
    /// Without an explicit `content_type` the type is sniffed from the file's
    /// leading bytes; without an explicit `quality` the configured default is
    /// used. The returned buffer is positioned at 0.
    pub async fn convert_path(
        &self,
        path: &Path,
        content_type: Option<String>,
        quality: Option<i32>,
    ) -> Result<(Cursor<Vec<u8>>, ConversionSummary)> {
        let file = FormFile::from_path(path, FALLBACK_CONTENT_TYPE).await?;
        let content_type = content_type.unwrap_or_else(|| {
            detect_image_mime(file.bytes())
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string()
        });
        let file = file.with_content_type(content_type);
        let quality = quality.unwrap_or_else(|| self.config.quality.into());

        info!(
            "Converting {} ({}, {} bytes) at quality {}",
            path.display(),
            file.content_type(),
            file.length(),
            quality
        );

        let buffer = self.image.convert_to_webp(Some(&file), quality).await?;

        let (width, height) = match webp_dimensions(buffer.get_ref()) {
            Ok((width, height)) => (Some(width), Some(height)),
            Err(e) => {
                warn!("Could not read dimensions of converted image: {}", e);
                (None, None)
            }
        };

        let summary = ConversionSummary {
            file_name: file.file_name().to_string(),
            content_type: file.content_type().to_string(),
            quality: u8::try_from(quality).map_err(|_| Error::InvalidQuality(quality))?,
            input_bytes: file.length(),
            output_bytes: buffer.get_ref().len() as u64,
            width,
            height,
        };
        info!(
            "Converted {}: {} -> {} bytes",
            summary.file_name, summary.input_bytes, summary.output_bytes
        );

        Ok((buffer, summary))
    }
}

fn webp_dimensions(bytes: &[u8]) -> image::ImageResult<(u32, u32)> {
    ImageReader::with_format(Cursor::new(bytes), ImageFormat::WebP).into_dimensions()
}
