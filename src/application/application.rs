use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::cli::{Command, ImageCommand, TreeCommand, TreeInput};
use crate::config::{AppConfig, ConfigError};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{EXAMPLE_TREE, FilesystemNode, MaterializeError, materialize, parse_tree};
use crate::imaging::{ConversionError, ConversionRequest, convert};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let stdout = io::stdout();
        Self::execute(&app_config, &mut stdout.lock())
    }

    /// Runs one command, writing its user-facing output to `out`.
    pub fn execute(app_config: &RuntimeConfig, out: &mut impl Write) -> Result<(), ApplicationError> {
        match &app_config.command {
            Command::Tree(TreeCommand::Example) => {
                write!(out, "{EXAMPLE_TREE}").context(OutputSnafu)?;
            }
            Command::Tree(TreeCommand::Preview(input)) => {
                let items = parse_tree(&read_tree_input(input)?);
                let tree = FilesystemNode::from_items(&items);
                let rendered = if app_config.color {
                    tree.render_colored()
                } else {
                    tree.render()
                };
                write!(out, "{rendered}").context(OutputSnafu)?;
                writeln!(out, "{} item(s)", tree.entry_count()).context(OutputSnafu)?;
            }
            Command::Tree(TreeCommand::Generate { input, dest }) => {
                let items = parse_tree(&read_tree_input(input)?);
                debug!("Parsed {} items", items.len());
                let report = materialize(&items, dest).context(TreeSnafu)?;
                writeln!(
                    out,
                    "{} item(s) created in {}",
                    report.total(),
                    dest.best_effort_path_display()
                )
                .context(OutputSnafu)?;
            }
            Command::Image(ImageCommand::Convert {
                source,
                out: output_dir,
                format,
                name,
                size,
            }) => {
                let format = match format {
                    Some(format) => *format,
                    None => Self::read_config(&app_config.root)?.image.format,
                };
                let request = ConversionRequest {
                    format,
                    name: name.clone(),
                    size: *size,
                    ..ConversionRequest::new(source, output_dir)
                };
                let outcome = convert(&request).context(ImageSnafu)?;
                writeln!(
                    out,
                    "Wrote {} ({})",
                    outcome.path.best_effort_path_display(),
                    outcome.size
                )
                .context(OutputSnafu)?;
            }
            Command::Image(ImageCommand::Sizes) => {
                let config = Self::read_config(&app_config.root)?;
                for size in &config.image.sizes {
                    writeln!(out, "{size}").context(OutputSnafu)?;
                }
            }
        }

        Ok(())
    }

    fn read_config(root: &Path) -> Result<AppConfig, ApplicationError> {
        let config = AppConfig::read(root).context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

fn read_tree_input(input: &TreeInput) -> Result<String, ApplicationError> {
    match input.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            debug!("Reading tree from {}", path.display());
            fs::read_to_string(path).context(InputSnafu {
                path: path.to_path_buf(),
            })
        }
        _ => {
            debug!("Reading tree from stdin");
            io::read_to_string(io::stdin()).context(InputSnafu {
                path: PathBuf::from("<stdin>"),
            })
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigError },
    #[snafu(display("Failed to read the tree from {}", path.display()))]
    InputError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to generate the tree"))]
    TreeError { source: MaterializeError },
    #[snafu(display("Failed to convert the image"))]
    ImageError { source: ConversionError },
    #[snafu(display("Failed to write output"))]
    OutputError { source: io::Error },
}
