//! Command implementations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bmpview_core::{decode, encode_bmp, BmpError, BmpImage, FileHeader, InfoHeader};
use serde::Serialize;

use crate::cli::{Command, Region};
use crate::fetch::HttpSource;

/// Run one parsed command to completion.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::CropRotate {
            input,
            output,
            region,
        } => {
            tracing::info!(input = %input.display(), "reading bitmap");
            let image = BmpImage::open(&input)
                .with_context(|| format!("failed to read \"{}\"", input.display()))?;
            crop_rotate_and_save(image, region, &output)
        }
        Command::DownloadCropRotate {
            url,
            output,
            region,
            http,
        } => {
            tracing::info!(%url, "downloading bitmap");
            let source = HttpSource::new(url.as_str(), http.timeout(), &http.user_agent)?;
            let image = BmpImage::from_source(&source)
                .with_context(|| format!("failed to load \"{}\"", url))?;
            crop_rotate_and_save(image, region, &output)
        }
        Command::Info { input, json } => {
            let image = BmpImage::open(&input)
                .with_context(|| format!("failed to read \"{}\"", input.display()))?;
            let report = InfoReport::new(&image);
            let mut stdout = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &report)?;
                writeln!(stdout)?;
            } else {
                report.write_text(&mut stdout)?;
            }
            Ok(())
        }
    }
}

/// Apply one crop and one clockwise rotation, then write the result.
fn crop_rotate_and_save(mut image: BmpImage, region: Region, output: &Path) -> Result<()> {
    image.crop(region.x, region.y, region.width, region.height)?;
    image.rotate_clockwise()?;
    tracing::info!(
        width = image.effective_width(),
        height = image.effective_height(),
        output = %output.display(),
        "writing bitmap"
    );
    save(&image, output)
}

fn save(image: &BmpImage, output: &Path) -> Result<()> {
    let file = File::create(output)
        .map_err(BmpError::from)
        .with_context(|| format!("Unable to open file \"{}\"", output.display()))?;
    let mut writer = BufWriter::new(file);
    encode_bmp(image, &mut writer)
        .and_then(|()| writer.flush().map_err(BmpError::from))
        .with_context(|| format!("failed to write \"{}\"", output.display()))?;
    Ok(())
}

/// What `info` prints.
#[derive(Debug, Serialize)]
struct InfoReport {
    file_header: FileHeader,
    info_header: InfoHeader,
    decoded_width: u32,
    decoded_height: u32,
    row_stride: u64,
}

impl InfoReport {
    fn new(image: &BmpImage) -> Self {
        Self {
            file_header: *image.file_header(),
            info_header: *image.info_header(),
            decoded_width: image.buffer_width(),
            decoded_height: image.buffer_height(),
            row_stride: decode::row_stride(image.buffer_width()),
        }
    }

    fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        let file = &self.file_header;
        let info = &self.info_header;
        writeln!(out, "file size:        {}", file.file_size)?;
        writeln!(out, "pixel offset:     {}", file.pixel_data_offset)?;
        writeln!(out, "header size:      {}", info.header_size)?;
        writeln!(out, "declared size:    {}x{}", info.width, info.height)?;
        writeln!(out, "decoded size:     {}x{}", self.decoded_width, self.decoded_height)?;
        writeln!(out, "bits per pixel:   {}", info.bits_per_pixel)?;
        writeln!(out, "image size:       {}", info.image_size_bytes)?;
        writeln!(out, "row stride:       {}", self.row_stride)?;
        writeln!(
            out,
            "resolution:       {}x{} px/m",
            info.x_pixels_per_meter, info.y_pixels_per_meter
        )?;
        Ok(())
    }
}
