use std::path::PathBuf;

use derive_more::Display;

/// One entry of a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{}{}", path.display(), if *is_dir { "/" } else { "" })]
pub struct Item {
    /// Path relative to the destination root.
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Item {
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_directories_with_trailing_slash() {
        assert_eq!(Item::dir("src").to_string(), "src/");
        assert_eq!(Item::file("main.rs").to_string(), "main.rs");
    }
}
