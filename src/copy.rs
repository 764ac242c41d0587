//! Best-effort copying of resolved assets into the output tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::asset_paths::join_segments;

/// Link prefix used when the caller supplies none.
pub const DEFAULT_LINK_PREFIX: &str = "/";

/// Seam between the localizer and the filesystem side effect of copying.
pub trait AssetCopier {
    /// Returns `true` when `destination` is already present and the copy can be skipped.
    fn destination_exists(&self, destination: &Path) -> bool {
        destination.exists()
    }

    /// Start copying `source` to `destination`.
    ///
    /// Implementations report failures through logging only. Whether the copy has landed
    /// when this returns is up to the implementation.
    fn copy(&self, source: &Path, destination: &Path);
}

/// Copies files synchronously on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCopier;

impl AssetCopier for FsCopier {
    fn copy(&self, source: &Path, destination: &Path) {
        if let Err(err) = copy_file(source, destination) {
            log_copy_failure(source, destination, &err);
        }
    }
}

/// Copies each file on its own detached thread.
///
/// A localize pass returns as soon as all copies are started. Hosts that need the files on
/// disk call [`DetachedCopier::wait`] once every document has been processed.
#[derive(Debug, Default)]
pub struct DetachedCopier {
    pending: Mutex<Vec<JoinHandle<bool>>>,
}

impl DetachedCopier {
    /// Create a copier with no outstanding copies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of copies started and not yet waited for.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Block until every started copy has finished and return how many failed.
    pub fn wait(&self) -> usize {
        let handles = std::mem::take(&mut *self.pending.lock());
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(false))
            .filter(|succeeded| !succeeded)
            .count()
    }
}

impl AssetCopier for DetachedCopier {
    fn copy(&self, source: &Path, destination: &Path) {
        let source = source.to_path_buf();
        let destination = destination.to_path_buf();
        let handle = thread::spawn(move || match copy_file(&source, &destination) {
            Ok(_) => true,
            Err(err) => {
                log_copy_failure(&source, &destination, &err);
                false
            }
        });
        self.pending.lock().push(handle);
    }
}

/// Whether [`ensure_copied`] asked the copier to do any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination was missing and a copy was started.
    Started,
    /// The destination already existed; nothing was copied.
    AlreadyPresent,
}

/// Result of placing one asset in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedAsset {
    /// Link written back into the document.
    pub public_url: String,
    /// Absolute destination on disk.
    pub destination: PathBuf,
    /// What the copier was asked to do.
    pub outcome: CopyOutcome,
}

/// Copy `source` to `output_root/destination_relative` unless the destination exists.
///
/// An existing destination is accepted as-is without comparing contents. The public URL
/// is computed regardless of whether the copy eventually succeeds.
pub fn ensure_copied<C: AssetCopier + ?Sized>(
    copier: &C,
    source: &Path,
    destination_relative: &str,
    output_root: &Path,
    link_prefix: Option<&str>,
) -> PlacedAsset {
    let destination = output_root.join(destination_relative);

    let outcome = if copier.destination_exists(&destination) {
        tracing::debug!(destination = %destination.display(), "asset already present");
        CopyOutcome::AlreadyPresent
    } else {
        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            "copying asset"
        );
        copier.copy(source, &destination);
        CopyOutcome::Started
    };

    PlacedAsset {
        public_url: public_url(link_prefix, destination_relative),
        destination,
        outcome,
    }
}

/// Join the link prefix (default `/`) with an output-relative path.
pub fn public_url(link_prefix: Option<&str>, destination_relative: &str) -> String {
    let prefix = link_prefix
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(DEFAULT_LINK_PREFIX);
    join_segments(&[prefix, destination_relative])
}

fn copy_file(source: &Path, destination: &Path) -> io::Result<u64> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)
}

fn log_copy_failure(source: &Path, destination: &Path, err: &io::Error) {
    tracing::error!(
        source = %source.display(),
        destination = %destination.display(),
        error = %err,
        "error copying file"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn public_url_defaults_to_root_prefix() {
        assert_eq!(public_url(None, "sample.zip"), "/sample.zip");
        assert_eq!(public_url(Some(""), "sample.zip"), "/sample.zip");
        assert_eq!(
            public_url(Some("page/blog/2019/04/10/"), "sample.zip"),
            "page/blog/2019/04/10/sample.zip"
        );
    }

    #[test]
    fn copies_into_nested_directories() -> io::Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source.txt");
        fs::write(&source, b"content")?;
        let output = temp.path().join("public");

        let placed = ensure_copied(&FsCopier, &source, "blog/2024/source.txt", &output, None);

        assert_eq!(placed.outcome, CopyOutcome::Started);
        assert_eq!(placed.public_url, "/blog/2024/source.txt");
        assert_eq!(fs::read(output.join("blog/2024/source.txt"))?, b"content");
        Ok(())
    }

    #[test]
    fn skips_existing_destination_without_comparing_content() -> io::Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("source.txt");
        fs::write(&source, b"new")?;
        let output = temp.path().join("public");
        fs::create_dir_all(&output)?;
        fs::write(output.join("source.txt"), b"old")?;

        let placed = ensure_copied(&FsCopier, &source, "source.txt", &output, None);

        assert_eq!(placed.outcome, CopyOutcome::AlreadyPresent);
        assert_eq!(fs::read(output.join("source.txt"))?, b"old");
        Ok(())
    }

    #[test]
    fn failed_copy_still_yields_public_url() -> io::Result<()> {
        let temp = tempdir()?;
        let output = temp.path().join("public");

        let missing = temp.path().join("missing.bin");
        let placed = ensure_copied(&FsCopier, &missing, "missing.bin", &output, None);

        assert_eq!(placed.outcome, CopyOutcome::Started);
        assert_eq!(placed.public_url, "/missing.bin");
        assert!(!output.join("missing.bin").exists());
        Ok(())
    }

    #[test]
    fn detached_copies_land_after_wait() -> io::Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("clip.mp4");
        fs::write(&source, b"video")?;
        let output = temp.path().join("public");
        let copier = DetachedCopier::new();

        ensure_copied(&copier, &source, "media/clip.mp4", &output, None);
        ensure_copied(&copier, &temp.path().join("nope.mp4"), "media/nope.mp4", &output, None);
        assert_eq!(copier.pending(), 2);

        assert_eq!(copier.wait(), 1);
        assert_eq!(copier.pending(), 0);
        assert_eq!(fs::read(output.join("media/clip.mp4"))?, b"video");
        Ok(())
    }
}
