mod cli;

pub use cli::{Cli, Command, ImageCommand, TreeCommand, TreeInput};
