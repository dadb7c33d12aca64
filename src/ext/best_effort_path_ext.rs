use std::path::{Component, Path, PathBuf};

/// Absolute, normalized form of `path` for user-facing messages.
///
/// Canonicalization needs the path to exist, which is often exactly what an
/// error is about, so missing paths are resolved lexically against the
/// current directory instead.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical) = path.canonicalize() {
        return canonical.display().to_string();
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|current_dir| current_dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize_path(&absolute).display().to_string()
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_paths_are_canonicalized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        let display = nested.join("..").join("nested").best_effort_path_display();

        assert_eq!(display, nested.canonicalize().unwrap().display().to_string());
    }

    #[test]
    fn missing_paths_are_normalized_lexically() {
        let display = Path::new("/does/not/../exist/./here").best_effort_path_display();
        assert_eq!(display, Path::new("/does/exist/here").display().to_string());
    }

    #[test]
    fn relative_missing_paths_become_absolute() {
        let display = Path::new("missing-dir-for-display-test/file").best_effort_path_display();
        assert!(Path::new(&display).is_absolute());
        assert!(display.ends_with("file"));
    }
}
