use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    application::data::LogLevel,
    imaging::{ImageFormat, Size},
};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Scaffold folder trees from ASCII art and convert images")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// Directory holding the optional madumlab.yaml
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Work with indented ASCII trees
    #[command(subcommand)]
    Tree(TreeCommand),
    /// Convert images between formats
    #[command(subcommand)]
    Image(ImageCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum TreeCommand {
    /// Print a sample tree
    Example,
    /// Show how a tree will be laid out
    Preview(TreeInput),
    /// Create the tree's folders and empty files
    Generate {
        #[command(flatten)]
        input: TreeInput,
        /// Existing folder the tree is created in
        #[clap(long, short)]
        dest: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TreeInput {
    /// File holding the tree, `-` or nothing for stdin
    #[clap(long, short)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ImageCommand {
    /// Re-encode an image into the output folder
    Convert {
        source: PathBuf,
        /// Existing folder the image is written to
        #[clap(long, short)]
        out: PathBuf,
        /// Output format, defaults to the configured one
        #[clap(long, short, value_enum)]
        format: Option<ImageFormat>,
        /// Output file name; the format extension is added when missing
        #[clap(long, short)]
        name: Option<String>,
        /// Scale to fit WIDTHxHEIGHT, keeping the aspect ratio
        #[clap(long, short)]
        size: Option<Size>,
    },
    /// List the configured resize presets
    Sizes,
}
