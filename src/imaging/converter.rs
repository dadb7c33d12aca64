use std::path::{Component, Path, PathBuf};

use image::{DynamicImage, ImageReader, imageops::FilterType};
use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, info};

use crate::ext::BestEffortPathExt;

use super::{ImageFormat, Size};

/// Largest side an ICO entry can have.
const ICO_MAX_SIZE: Size = Size::square(256);

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub format: ImageFormat,
    /// Output file name; derived from the source when absent.
    pub name: Option<String>,
    /// Bounding box the image is scaled to fit, keeping its aspect ratio.
    pub size: Option<Size>,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            format: ImageFormat::default(),
            name: None,
            size: None,
        }
    }

    /// A user-supplied name must be a single plain file name, so the output
    /// stays inside `output_dir`.
    fn validate_name(&self) -> Result<(), ConversionError> {
        let Some(name) = self.name.as_deref().map(str::trim) else {
            return Ok(());
        };
        if name.is_empty() {
            return Ok(());
        }

        let mut components = Path::new(name).components();
        ensure!(
            matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            ),
            InvalidNameSnafu { name }
        );
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }

    fn output_file_name(&self) -> String {
        let extension = self.format.extension();
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let stem = self
                    .source
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| "image".to_string());
                match self.size {
                    Some(size) => format!("{stem}_{size}"),
                    None => stem,
                }
            }
        };

        if name
            .to_ascii_lowercase()
            .ends_with(&format!(".{extension}"))
        {
            name
        } else {
            format!("{name}.{extension}")
        }
    }

    fn target_size(&self) -> Option<Size> {
        match (self.size, self.format) {
            (Some(size), _) => Some(size),
            (None, ImageFormat::Ico) => Some(ICO_MAX_SIZE),
            (None, _) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub path: PathBuf,
    pub size: Size,
}

/// Decodes the source image, scales it if requested and writes it in the
/// requested format. An existing output file is replaced.
pub fn convert(request: &ConversionRequest) -> Result<ConversionOutcome, ConversionError> {
    ensure!(
        request.output_dir.is_dir(),
        OutputDirectorySnafu {
            path: &request.output_dir
        }
    );
    request.validate_name()?;

    let image = decode(&request.source)?;
    debug!(
        "Decoded {} ({}x{})",
        request.source.display(),
        image.width(),
        image.height()
    );

    // Explicit sizes always apply; the implicit icon bound only shrinks.
    let image = match request.target_size() {
        Some(size) if request.size.is_some() || exceeds(&image, size) => {
            debug!("Resizing to fit {size}");
            image.resize(size.width, size.height, FilterType::Lanczos3)
        }
        _ => image,
    };

    let image = match request.format {
        // JPEG carries no alpha channel.
        ImageFormat::Jpg => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Webp | ImageFormat::Gif | ImageFormat::Ico => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        ImageFormat::Png | ImageFormat::Bmp => image,
    };

    let output_path = request.output_path();
    image
        .save_with_format(&output_path, request.format.to_image_format())
        .context(EncodeSnafu {
            path: &output_path,
        })?;

    let size = Size {
        width: image.width(),
        height: image.height(),
    };
    info!("Wrote {} ({size})", output_path.display());
    Ok(ConversionOutcome {
        path: output_path,
        size,
    })
}

fn exceeds(image: &DynamicImage, size: Size) -> bool {
    image.width() > size.width || image.height() > size.height
}

fn decode(source: &Path) -> Result<DynamicImage, ConversionError> {
    let reader = ImageReader::open(source)
        .context(SourceReadSnafu { path: source })?
        .with_guessed_format()
        .context(SourceReadSnafu { path: source })?;

    reader.decode().context(DecodeSnafu { path: source })
}

#[derive(Debug, Snafu)]
pub enum ConversionError {
    #[snafu(display("Output folder {} is not an existing directory", path.best_effort_path_display()))]
    OutputDirectory { path: PathBuf },
    #[snafu(display("Output name '{}' must be a plain file name", name))]
    InvalidName { name: String },
    #[snafu(display("Failed to read image {}", path.best_effort_path_display()))]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to decode image {}", path.best_effort_path_display()))]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[snafu(display("Failed to write image {}", path.best_effort_path_display()))]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}
