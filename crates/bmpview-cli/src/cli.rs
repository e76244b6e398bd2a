//! Command-line surface.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bmpview",
    version,
    about = "Crop and rotate uncompressed 24-bit BMP images."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crop a local bitmap, rotate the result 90° clockwise and save it
    CropRotate {
        /// Input bitmap
        input: PathBuf,

        /// Where to write the result
        output: PathBuf,

        #[command(flatten)]
        region: Region,
    },

    /// Download a bitmap, crop it, rotate the result 90° clockwise and save it
    DownloadCropRotate {
        /// URL of the input bitmap
        url: String,

        /// Where to write the result
        output: PathBuf,

        #[command(flatten)]
        region: Region,

        #[command(flatten)]
        http: HttpOptions,
    },

    /// Print the headers and decoded dimensions of a local bitmap
    Info {
        /// Input bitmap
        input: PathBuf,

        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Crop rectangle, origin at the top-left corner of the picture.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge of the crop rectangle
    pub x: u32,

    /// Top edge of the crop rectangle
    pub y: u32,

    /// Width of the crop rectangle
    #[arg(value_name = "W")]
    pub width: u32,

    /// Height of the crop rectangle
    #[arg(value_name = "H")]
    pub height: u32,
}

#[derive(Args, Debug, Clone)]
pub struct HttpOptions {
    /// Request timeout in seconds
    #[arg(long, env = "BMPVIEW_HTTP_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// User-Agent header sent with the request
    #[arg(long, env = "BMPVIEW_USER_AGENT", default_value = concat!("bmpview/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}

impl HttpOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_crop_rotate() {
        let cli = Cli::try_parse_from([
            "bmpview", "crop-rotate", "in.bmp", "out.bmp", "2", "1", "4", "2",
        ])
        .unwrap();
        match cli.command {
            Command::CropRotate {
                input,
                output,
                region,
            } => {
                assert_eq!(input, PathBuf::from("in.bmp"));
                assert_eq!(output, PathBuf::from("out.bmp"));
                assert_eq!(
                    region,
                    Region {
                        x: 2,
                        y: 1,
                        width: 4,
                        height: 2
                    }
                );
            }
            other => panic!("Expected CropRotate, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_download_with_timeout() {
        let cli = Cli::try_parse_from([
            "bmpview",
            "download-crop-rotate",
            "http://example.com/a.bmp",
            "out.bmp",
            "0",
            "0",
            "1",
            "1",
            "--timeout",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::DownloadCropRotate { url, http, .. } => {
                assert_eq!(url, "http://example.com/a.bmp");
                assert_eq!(http.timeout(), Duration::from_secs(5));
                assert!(http.user_agent.starts_with("bmpview/"));
            }
            other => panic!("Expected DownloadCropRotate, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_arguments_rejected() {
        let result = Cli::try_parse_from(["bmpview", "crop-rotate", "in.bmp", "out.bmp", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_coordinates_rejected() {
        let result = Cli::try_parse_from([
            "bmpview", "crop-rotate", "in.bmp", "out.bmp", "-1", "0", "1", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["bmpview", "info", "in.bmp", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Info { json: true, .. }));
    }
}
