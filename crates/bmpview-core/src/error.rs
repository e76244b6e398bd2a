//! Error types shared by every stage of the pipeline.
//!
//! Every failure is terminal: nothing in this crate retries or recovers, it
//! only reports which kind of failure happened so the caller can decide how
//! to present it.

use std::io;

use thiserror::Error;

/// Top-level error for decoding, transforming and encoding a bitmap.
#[derive(Debug, Error)]
pub enum BmpError {
    /// The source ended before the headers or pixel rows were complete.
    #[error("Truncated input: unexpected end of data while reading {0}")]
    TruncatedInput(&'static str),

    /// A header field violates one of the supported-format constraints.
    #[error("Invalid BMP: {0}")]
    Format(#[from] FormatError),

    /// A crop or rotation left the view outside the decoded pixel grid.
    #[error(
        "The requested area is not a subimage \
         (left={left}, right={right}, top={top}, bottom={bottom})"
    )]
    InvalidRegion {
        left: i64,
        right: i64,
        top: i64,
        bottom: i64,
    },

    /// A file could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// A remote fetch failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The pixel buffer could not be allocated.
    #[error("Insufficient memory")]
    OutOfMemory,
}

impl BmpError {
    /// Lift a reader error, reporting a short read as truncation.
    pub(crate) fn from_read(err: io::Error, section: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            BmpError::TruncatedInput(section)
        } else {
            BmpError::Io(err)
        }
    }
}

impl From<io::Error> for BmpError {
    fn from(err: io::Error) -> Self {
        BmpError::Io(err)
    }
}

/// Header validation failures, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected 'BM' signature, got {0:#06x}")]
    BadMagic(u16),

    #[error("expected version 3 and header size 40, but header size is {0}")]
    HeaderSize(u32),

    #[error("expected positive biHeight, got {0}")]
    NonPositiveHeight(i32),

    #[error("expected 24 bits per pixel, got {0}")]
    BitsPerPixel(u16),

    #[error("compression is unsupported (biCompression = {0})")]
    Compression(u32),

    #[error("color palette is unsupported (biClrUsed = {0})")]
    Palette(u32),

    #[error("expected positive biWidth, got {0}")]
    NonPositiveWidth(i32),
}

/// Failures reported by a remote byte source.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Server responded 404: page not found ({url})")]
    NotFound { url: String },

    #[error("Server responded {status} ({url})")]
    Status { url: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),
}
