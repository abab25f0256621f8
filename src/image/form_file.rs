use crate::Result;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

/// An uploaded file as handed over by a web layer: a byte stream plus the
/// metadata declared by the client.
pub trait InputFile: Send + Sync {
    fn content_type(&self) -> &str;
    fn file_name(&self) -> &str;
    fn length(&self) -> u64;
    /// Every call returns a fresh reader positioned at the start of the file.
    fn open_read_stream(&self) -> std::io::Result<Box<dyn Read + Send>>;
}

/// In-memory [`InputFile`].
#[derive(Debug, Clone)]
pub struct FormFile {
    data: Arc<[u8]>,
    file_name: String,
    content_type: String,
}

impl FormFile {
    pub fn new(
        data: impl Into<Arc<[u8]>>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    /// Read `path` into memory. The file name is taken from the path; the
    /// content type is whatever the caller declares.
    pub async fn from_path(path: &Path, content_type: impl Into<String>) -> Result<Self> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(data, file_name, content_type))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl InputFile for FormFile {
    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn length(&self) -> u64 {
        self.data.len() as u64
    }

    fn open_read_stream(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }
}
