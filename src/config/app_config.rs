use std::{
    borrow::Cow,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::{
    ext::BestEffortPathExt,
    imaging::{DEFAULT_SIZES, ImageFormat, InvalidSizeError, Size, UnknownFormatError},
};

const CONFIG_FILE_NAME: &str = "madumlab.yaml";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub image: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub format: ImageFormat,
    pub sizes: Vec<Size>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            sizes: DEFAULT_SIZES.to_vec(),
        }
    }
}

impl AppConfig {
    /// Reads `madumlab.yaml` from `root`, falling back to the defaults when
    /// the file does not exist.
    pub fn read(root: &Path) -> Result<Self, ConfigError> {
        let path = get_config_file_path(root);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(
                    "Read config file {}: {} bytes",
                    path.best_effort_path_display(),
                    contents.len()
                );
                contents.as_str().try_into()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "No config file at {}, using defaults",
                    path.best_effort_path_display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e).context(ReadSnafu {
                file_path: path.best_effort_path_display(),
            }),
        }
    }

    fn parse_image_section(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<ImageConfig, ConfigError> {
        let mut image_config = ImageConfig::default();

        let Some(section) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("image")))) else {
            return Ok(image_config);
        };
        if matches!(section, Yaml::Value(Scalar::Null)) {
            return Ok(image_config);
        }
        let section = section.as_mapping().ok_or(ConfigError::ImageNotMap)?;

        if let Some(format) = section.get(&Yaml::Value(Scalar::String(Cow::Borrowed("format")))) {
            let format = format.as_str().ok_or(ConfigError::FormatNotString)?;
            image_config.format = format.parse().context(FormatSnafu)?;
        }

        if let Some(sizes) = section.get(&Yaml::Value(Scalar::String(Cow::Borrowed("sizes")))) {
            image_config.sizes = sizes
                .as_sequence()
                .ok_or(ConfigError::SizesNotSequence)?
                .iter()
                .map(|size| {
                    let size = size.as_str().ok_or(ConfigError::SizeNotString)?;
                    size.parse::<Size>().context(SizeSnafu)
                })
                .collect::<Result<Vec<_>, _>>()?;
        }

        Ok(image_config)
    }
}

impl TryFrom<&str> for AppConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            // An empty file configures nothing.
            return Ok(Self::default());
        };

        let top_level = document.as_mapping().ok_or(ConfigError::TopLevelNotMap)?;
        let image = Self::parse_image_section(top_level)?;

        Ok(AppConfig { image })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Image section should be a map"))]
    ImageNotMap,
    #[snafu(display("Image format should be a string"))]
    FormatNotString,
    #[snafu(display("Invalid image format in config"))]
    FormatError { source: UnknownFormatError },
    #[snafu(display("Image sizes should be a list"))]
    SizesNotSequence,
    #[snafu(display("Image sizes should be strings like 64x64"))]
    SizeNotString,
    #[snafu(display("Invalid image size in config"))]
    SizeError { source: InvalidSizeError },
}
