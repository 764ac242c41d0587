//! Directory scanning that produces a catalog of known files.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{LocalizeError, LocalizeResult};
use crate::models::KnownFile;

/// Walk `root` and describe every regular file below it.
///
/// Entries starting with `.` are skipped, directories included. Absolute paths are built
/// by joining `root` as given, so callers should pass the same form of root they derive
/// document directories from. The result is sorted by relative path.
pub fn scan_known_files(root: &Path) -> LocalizeResult<Vec<KnownFile>> {
    let mut files = Vec::new();
    collect_files_recursively(root, root, &mut files)?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

fn collect_files_recursively(root: &Path, dir: &Path, files: &mut Vec<KnownFile>) -> LocalizeResult<()> {
    let entries = fs::read_dir(dir).map_err(|source| LocalizeError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        if file_name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            collect_files_recursively(root, &path, files)?;
        } else if file_type.is_file() {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            let hash = content_digest(&path)?;
            let absolute = path.to_string_lossy().replace('\\', "/");
            files.push(KnownFile::from_relative(absolute, &relative, hash));
        }
    }

    Ok(())
}

/// Hex-encoded SHA-256 of a file's contents.
fn content_digest(path: &Path) -> LocalizeResult<String> {
    let bytes = fs::read(path).map_err(|source| LocalizeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn collects_nested_files_and_skips_dotfiles() -> LocalizeResult<()> {
        let temp = tempdir().expect("failed to create temp dir");
        let root = temp.path();
        fs::create_dir_all(root.join("blog/images")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("blog/index.md"), "# Post").unwrap();
        fs::write(root.join("blog/images/cover.png"), b"png").unwrap();
        fs::write(root.join(".cache/stale.bin"), b"stale").unwrap();
        fs::write(root.join(".env"), b"secret").unwrap();

        let files = scan_known_files(root)?;
        let relatives: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(relatives, vec!["blog/images/cover.png", "blog/index.md"]);

        let cover = &files[0];
        assert_eq!(cover.relative_directory, "blog/images");
        assert_eq!(cover.name, "cover");
        assert_eq!(cover.extension, "png");
        assert!(cover.absolute_path.ends_with("blog/images/cover.png"));
        Ok(())
    }

    #[test]
    fn identical_content_shares_a_digest() -> LocalizeResult<()> {
        let temp = tempdir().expect("failed to create temp dir");
        fs::write(temp.path().join("a.txt"), "same").unwrap();
        fs::write(temp.path().join("b.txt"), "same").unwrap();
        fs::write(temp.path().join("c.txt"), "different").unwrap();

        let files = scan_known_files(temp.path())?;
        assert_eq!(files[0].hash, files[1].hash);
        assert_ne!(files[0].hash, files[2].hash);
        assert_eq!(files[0].hash.len(), 64);
        Ok(())
    }

    #[test]
    fn missing_root_reports_io_error() {
        let temp = tempdir().expect("failed to create temp dir");
        let err = scan_known_files(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, LocalizeError::Io { .. }));
    }
}
