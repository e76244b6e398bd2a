//! Byte sources: where a complete input image comes from.
//!
//! A source hands the decoder one complete in-memory buffer. Local files are
//! provided here; remote fetching lives with the transport in the binary so
//! that this crate stays free of network code.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BmpError;

/// Something that can produce the full bytes of an input image.
pub trait ByteSource {
    /// Read the complete input. Blocks until all bytes are available.
    fn read_bytes(&self) -> Result<Vec<u8>, BmpError>;

    /// Human-readable name of the source, for logs and messages.
    fn describe(&self) -> String;
}

/// A bitmap on local storage.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read_bytes(&self) -> Result<Vec<u8>, BmpError> {
        Ok(fs::read(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A buffer already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl ByteSource for MemorySource {
    fn read_bytes(&self) -> Result<Vec<u8>, BmpError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}
