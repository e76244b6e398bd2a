//! The image entity: decoded headers, the pixel grid and the view over it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::decode::{
    decoded_dimensions, parse_headers, resync_geometry, FileHeader, InfoHeader, Pixel,
    PixelBuffer, PIXEL_DATA_START,
};
use crate::error::BmpError;
use crate::source::ByteSource;
use crate::transform::{Borders, Rotation, ViewState};

/// A decoded 24-bit bitmap with a lazily transformed view.
///
/// The pixel grid is decoded once and owned exclusively; crops and rotations
/// only change the view state, and the geometry fields of both headers are
/// kept in step with the view after every change.
#[derive(Debug, Clone)]
pub struct BmpImage {
    file_header: FileHeader,
    info_header: InfoHeader,
    pixels: PixelBuffer,
    view: ViewState,
}

impl BmpImage {
    /// Decode a complete bitmap held in memory.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The whole file: both headers followed by the pixel rows
    ///
    /// # Returns
    ///
    /// An image whose view covers the entire decoded grid, unrotated.
    ///
    /// # Behavior
    ///
    /// - Headers are validated before any pixel is read
    /// - Pixel rows are read from byte 54 onwards, whatever the pixel data
    ///   offset field says
    /// - The row count comes from the declared pixel-array size, not from
    ///   the height field
    /// - Input shorter than the rows it declares is
    ///   [`BmpError::TruncatedInput`]; bytes past the last row are ignored
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BmpError> {
        let (file_header, info_header) = parse_headers(bytes)?;
        let (width, height) = decoded_dimensions(&info_header);
        let pixels = PixelBuffer::from_bytes(&bytes[PIXEL_DATA_START..], width, height)?;
        Ok(Self::assemble(file_header, info_header, pixels))
    }

    /// Decode a bitmap from a stream, one row at a time.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, BmpError> {
        let mut header = [0u8; PIXEL_DATA_START];
        reader
            .read_exact(&mut header)
            .map_err(|e| BmpError::from_read(e, "bitmap headers"))?;
        let (file_header, info_header) = parse_headers(&header)?;
        let (width, height) = decoded_dimensions(&info_header);
        let pixels = PixelBuffer::from_reader(&mut reader, width, height)?;
        Ok(Self::assemble(file_header, info_header, pixels))
    }

    /// Decode a bitmap file from local storage.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Decode whatever a byte source yields.
    pub fn from_source<S: ByteSource + ?Sized>(source: &S) -> Result<Self, BmpError> {
        let bytes = source.read_bytes()?;
        tracing::debug!(source = %source.describe(), len = bytes.len(), "source read");
        Self::from_bytes(&bytes)
    }

    fn assemble(file_header: FileHeader, info_header: InfoHeader, pixels: PixelBuffer) -> Self {
        let (width, height) = (pixels.width(), pixels.height());
        if i64::from(height) != i64::from(info_header.height) {
            tracing::warn!(
                declared = info_header.height,
                derived = height,
                "biHeight disagrees with biSizeImage; using the height implied by biSizeImage"
            );
        }
        tracing::debug!(width, height, "decoded pixel grid");

        Self {
            file_header,
            info_header,
            view: ViewState::new(width, height),
            pixels,
        }
    }

    #[inline]
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    #[inline]
    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Width of the decoded grid, fixed for the image's lifetime.
    #[inline]
    pub fn buffer_width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height of the decoded grid, fixed for the image's lifetime.
    #[inline]
    pub fn buffer_height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn effective_width(&self) -> u32 {
        self.view.effective_width()
    }

    #[inline]
    pub fn effective_height(&self) -> u32 {
        self.view.effective_height()
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.view.rotation()
    }

    #[inline]
    pub fn borders(&self) -> Borders {
        self.view.borders()
    }

    /// Crop the current view to `(x, y, w, h)`, origin at its top-left.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Top-left corner of the rectangle in the current view
    /// * `w`, `h` - Size of the rectangle in view pixels
    ///
    /// # Behavior
    ///
    /// - Delegates the geometry to [`ViewState::crop`]
    /// - On success the width, height and size fields of both headers are
    ///   rewritten for the new view; every other field is kept as decoded
    /// - On error neither the view nor the headers change
    pub fn crop(&mut self, x: u32, y: u32, w: u32, h: u32) -> Result<(), BmpError> {
        self.view.crop(x, y, w, h)?;
        self.resync();
        Ok(())
    }

    /// Rotate the current view a quarter turn clockwise.
    pub fn rotate_clockwise(&mut self) -> Result<(), BmpError> {
        self.view.rotate_clockwise()?;
        self.resync();
        Ok(())
    }

    fn resync(&mut self) {
        let (width, height) = (self.effective_width(), self.effective_height());
        resync_geometry(&mut self.file_header, &mut self.info_header, width, height);
        tracing::debug!(
            width,
            height,
            file_size = self.file_header.file_size,
            image_size = self.info_header.image_size_bytes,
            "headers resynced"
        );
    }

    /// Headers describing the current view, recomputed on every call.
    pub fn output_headers(&self) -> (FileHeader, InfoHeader) {
        let (mut file, mut info) = (self.file_header, self.info_header);
        resync_geometry(&mut file, &mut info, self.effective_width(), self.effective_height());
        (file, info)
    }

    /// Pixel `(x, y)` of the current view, or `None` outside it.
    ///
    /// `y = 0` is the first row written on output, the bottom scanline.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.view.index(x, y).and_then(|idx| self.pixels.get(idx))
    }

    /// Pixels of output row `y`, left to right. `y` must be in range.
    pub(crate) fn row(&self, y: u32) -> impl Iterator<Item = Pixel> + '_ {
        (0..self.effective_width()).map(move |x| self.pixels.at(self.view.index_unchecked(x, y)))
    }
}
