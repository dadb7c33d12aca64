use std::path::{Component, Path, PathBuf};

use colored::Colorize;
use hashlink::LinkedHashMap;
use snafu::{Snafu, ensure};
use tracing::warn;

use super::Item;

/// In-memory view of a parsed tree, used for previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesystemNode {
    File,
    Directory {
        children: LinkedHashMap<String, FilesystemNode>,
    },
}

impl FilesystemNode {
    pub fn root() -> Self {
        FilesystemNode::Directory {
            children: LinkedHashMap::new(),
        }
    }

    /// Folds items into a tree. Items that would have to go through a file,
    /// or that leave the tree root, are skipped with a warning.
    pub fn from_items(items: &[Item]) -> Self {
        items.iter().fold(Self::root(), |mut root, item| {
            if let Err(e) = root.try_insert(&item.path, item.is_dir) {
                warn!("Skipping {}: {e}", e.path().display());
            }
            root
        })
    }

    pub fn try_insert(&mut self, path: &Path, is_dir: bool) -> Result<(), TreeInsertError> {
        ensure!(
            path.components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir)),
            UnsafePathSnafu { path }
        );

        let mut components = path
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .peekable();
        let mut current = self;

        while let Some(component) = components.next() {
            let name = component.as_os_str().to_string_lossy().to_string();

            match { current } {
                FilesystemNode::Directory { children } => {
                    if components.peek().is_none() {
                        // An existing entry of the same name wins.
                        children.entry(name).or_insert_with(|| {
                            if is_dir {
                                FilesystemNode::root()
                            } else {
                                FilesystemNode::File
                            }
                        });
                        return Ok(());
                    }
                    current = children.entry(name).or_insert_with(FilesystemNode::root);
                }
                FilesystemNode::File => {
                    return BelowFileSnafu { path }.fail();
                }
            }
        }

        Ok(())
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FilesystemNode::Directory { .. })
    }

    /// Number of entries below this node.
    pub fn entry_count(&self) -> usize {
        match self {
            FilesystemNode::File => 0,
            FilesystemNode::Directory { children } => children
                .values()
                .map(|child| 1 + child.entry_count())
                .sum(),
        }
    }

    /// Renders the entries below this node with box-drawing connectors.
    /// Top-level entries are written bare, directories end with `/`.
    pub fn render(&self) -> String {
        self.render_with(false)
    }

    /// Like [`render`](Self::render), with directory names highlighted.
    pub fn render_colored(&self) -> String {
        self.render_with(true)
    }

    fn render_with(&self, colored: bool) -> String {
        let mut lines = Vec::new();
        if let FilesystemNode::Directory { children } = self {
            for (name, child) in children {
                lines.push(label(name, child, colored));
                child.render_children("", colored, &mut lines);
            }
        }
        lines.iter().map(|line| format!("{line}\n")).collect()
    }

    fn render_children(&self, prefix: &str, colored: bool, lines: &mut Vec<String>) {
        let FilesystemNode::Directory { children } = self else {
            return;
        };

        let count = children.len();
        for (index, (name, child)) in children.iter().enumerate() {
            let last = index + 1 == count;
            let connector = if last { "└── " } else { "├── " };
            lines.push(format!("{prefix}{connector}{}", label(name, child, colored)));

            let continuation = if last { "    " } else { "│   " };
            child.render_children(&format!("{prefix}{continuation}"), colored, lines);
        }
    }
}

fn label(name: &str, node: &FilesystemNode, colored: bool) -> String {
    match (node.is_dir(), colored) {
        (true, true) => format!("{}", format!("{name}/").blue().bold()),
        (true, false) => format!("{name}/"),
        (false, _) => name.to_string(),
    }
}

#[derive(Debug, Snafu)]
pub enum TreeInsertError {
    #[snafu(display("Cannot insert an entry below a file"))]
    BelowFile { path: PathBuf },
    #[snafu(display("Entry would leave the tree root"))]
    UnsafePath { path: PathBuf },
}

impl TreeInsertError {
    pub fn path(&self) -> &Path {
        match self {
            TreeInsertError::BelowFile { path } | TreeInsertError::UnsafePath { path } => path,
        }
    }
}
