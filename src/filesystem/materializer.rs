use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, info};

use crate::ext::BestEffortPathExt;

use super::Item;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories: usize,
    pub files: usize,
}

impl MaterializeReport {
    pub fn total(&self) -> usize {
        self.directories + self.files
    }
}

/// Creates every item under `root`, in order.
///
/// Directories that already exist are left alone and files are truncated to
/// zero length, so running this twice yields the same layout. The first
/// failure stops the run; entries created before it stay on disk.
pub fn materialize(items: &[Item], root: &Path) -> Result<MaterializeReport, MaterializeError> {
    ensure!(
        root.is_dir(),
        InvalidDestinationSnafu {
            path: root.to_path_buf()
        }
    );

    let mut report = MaterializeReport::default();
    for item in items {
        ensure!(
            is_contained(&item.path),
            UnsafePathSnafu {
                path: item.path.clone()
            }
        );

        let full_path = root.join(&item.path);
        if item.is_dir {
            debug!("Creating directory {}", full_path.display());
            fs::create_dir_all(&full_path).context(CreateDirectorySnafu { path: &full_path })?;
            report.directories += 1;
        } else {
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).context(CreateDirectorySnafu { path: parent })?;
            }
            debug!("Creating file {}", full_path.display());
            File::create(&full_path).context(CreateFileSnafu { path: &full_path })?;
            report.files += 1;
        }
    }

    info!(
        "Materialized {} directories and {} files under {}",
        report.directories,
        report.files,
        root.display()
    );
    Ok(report)
}

/// Only plain relative segments keep a path inside the destination root.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[derive(Debug, Snafu)]
pub enum MaterializeError {
    #[snafu(display("Destination {} is not an existing directory", path.best_effort_path_display()))]
    InvalidDestination { path: PathBuf },
    #[snafu(display("Refusing to create {} outside of the destination", path.display()))]
    UnsafePath { path: PathBuf },
    #[snafu(display("Failed to create directory {}", path.best_effort_path_display()))]
    CreateDirectory {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Failed to create file {}", path.best_effort_path_display()))]
    CreateFile {
        source: std::io::Error,
        path: PathBuf,
    },
}
