use std::str::FromStr;

use clap::ValueEnum;
use derive_more::Display;
use snafu::Snafu;

/// Output formats the converter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
pub enum ImageFormat {
    #[default]
    #[display("png")]
    Png,
    #[display("jpg")]
    #[value(alias = "jpeg")]
    Jpg,
    #[display("bmp")]
    Bmp,
    #[display("gif")]
    Gif,
    #[display("webp")]
    Webp,
    #[display("ico")]
    Ico,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Ico => "ico",
        }
    }

    pub fn to_image_format(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::Ico => image::ImageFormat::Ico,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = UnknownFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            "webp" => Ok(ImageFormat::Webp),
            "ico" => Ok(ImageFormat::Ico),
            _ => Err(UnknownFormatError {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Unknown image format '{}'", value))]
pub struct UnknownFormatError {
    value: String,
}

/// Pixel dimensions, written `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{width}x{height}")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Icon sizes offered when nothing else is configured.
pub const DEFAULT_SIZES: [Size; 5] = [
    Size::square(256),
    Size::square(128),
    Size::square(64),
    Size::square(32),
    Size::square(16),
];

impl FromStr for Size {
    type Err = InvalidSizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSizeError {
            value: value.to_string(),
        };

        let (width, height) = value
            .trim()
            .split_once(['x', 'X', '×'])
            .ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Size { width, height })
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Invalid size '{}', expected WIDTHxHEIGHT", value))]
pub struct InvalidSizeError {
    value: String,
}
