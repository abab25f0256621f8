use super::{ImageService, InputFile, WebpConverter};
use crate::Result;
use async_trait::async_trait;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// Stand-in for [`WebpConverter`] that applies the same request validation
/// but returns canned bytes instead of encoding.
#[derive(Clone)]
pub struct MockImageConverter {
    convert_count: Arc<Mutex<usize>>,
    last_quality: Arc<Mutex<Option<u8>>>,
    output: Vec<u8>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageConverter {
    pub fn new() -> Self {
        Self {
            convert_count: Arc::new(Mutex::new(0)),
            last_quality: Arc::new(Mutex::new(None)),
            output: b"RIFF\0\0\0\0WEBP".to_vec(),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_output(mut self, output: Vec<u8>) -> Self {
        self.output = output;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_convert_count(&self) -> usize {
        *self.convert_count.lock().unwrap()
    }

    pub fn get_last_quality(&self) -> Option<u8> {
        *self.last_quality.lock().unwrap()
    }
}

impl Default for MockImageConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageConverter {
    async fn convert_to_webp(
        &self,
        input: Option<&dyn InputFile>,
        quality: i32,
    ) -> Result<Cursor<Vec<u8>>> {
        let (_file, quality) = WebpConverter::validate(input, quality)?;

        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Encode("Mock failure".to_string()));
        }

        *self.convert_count.lock().unwrap() += 1;
        *self.last_quality.lock().unwrap() = Some(quality.get());

        Ok(Cursor::new(self.output.clone()))
    }
}
