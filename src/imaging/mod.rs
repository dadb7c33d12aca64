mod converter;
mod format;

pub use converter::{ConversionError, ConversionRequest, convert};
pub use format::{DEFAULT_SIZES, ImageFormat, InvalidSizeError, Size, UnknownFormatError};
