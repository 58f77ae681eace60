//! Photo storage: uploaded images are copied into the photo directory under
//! a second-resolution timestamp name and removed with their record.

use crate::domain;
use crate::store::PersistenceError;
use std::path::{Path, PathBuf};

/// Copies a source image into the photo directory and returns the stored
/// relative path. The directory is created on first use.
pub fn store_photo(photos_dir: &Path, source: &Path) -> Result<String, PersistenceError> {
    if !photos_dir.exists() {
        std::fs::create_dir_all(photos_dir)?;
    }

    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let file_name = format!("{}{extension}", domain::photo_stamp_now());
    let target = photos_dir.join(file_name);
    std::fs::copy(source, &target)?;

    Ok(path_string(&target))
}

/// Removes a record's photo file if it still exists. Missing files are
/// skipped without error.
pub fn remove_photo(image_path: &str) {
    if image_path.is_empty() {
        return;
    }

    let path = Path::new(image_path);
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("failed to remove photo {image_path}: {e}");
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spectrum-logger-photos-{}-{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn stored_photo_keeps_the_source_extension() {
        let dir = temp_dir("ext");
        let source = dir.join("source.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();

        let stored = store_photo(&dir, &source).unwrap();
        assert!(stored.ends_with(".jpg"));
        assert!(Path::new(&stored).exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn remove_photo_ignores_missing_files() {
        remove_photo("");
        remove_photo("photos/never-existed.png");
    }

    #[test]
    fn remove_photo_deletes_existing_files() {
        let dir = temp_dir("rm");
        let target = dir.join("victim.png");
        std::fs::write(&target, b"png").unwrap();

        remove_photo(&target.to_string_lossy());
        assert!(!target.exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
