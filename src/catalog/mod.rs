//! Resolution of document references against the catalog of known files.

mod scanning;

use std::collections::HashMap;

use crate::asset_paths::join_segments;
use crate::models::KnownFile;

pub use scanning::scan_known_files;

/// Find the catalog entry a reference points at.
///
/// The reference is joined onto `source_dir` and compared byte for byte with each entry's
/// absolute path. The first match in catalog order wins. `None` means the reference is
/// left untouched by callers.
pub fn resolve<'a>(reference: &str, source_dir: &str, catalog: &'a [KnownFile]) -> Option<&'a KnownFile> {
    let candidate = join_segments(&[source_dir, reference]);
    catalog.iter().find(|entry| entry.absolute_path == candidate)
}

/// Keyed lookup over a catalog that keeps [`resolve`]'s first-match semantics.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    by_path: HashMap<&'a str, &'a KnownFile>,
}

impl<'a> CatalogIndex<'a> {
    /// Index a catalog. Later duplicates of an absolute path are shadowed by the first.
    pub fn new(catalog: &'a [KnownFile]) -> Self {
        let mut by_path = HashMap::with_capacity(catalog.len());
        for entry in catalog {
            by_path.entry(entry.absolute_path.as_str()).or_insert(entry);
        }
        Self { by_path }
    }

    /// Keyed equivalent of [`resolve`].
    pub fn resolve(&self, reference: &str, source_dir: &str) -> Option<&'a KnownFile> {
        let candidate = join_segments(&[source_dir, reference]);
        self.by_path.get(candidate.as_str()).copied()
    }

    /// Number of distinct absolute paths indexed.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Returns `true` when the catalog was empty.
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<KnownFile> {
        vec![
            KnownFile::from_relative("/site/content/blog/cover.png", "blog/cover.png", "first"),
            KnownFile::from_relative("/site/content/shared/a.zip", "shared/a.zip", "zip"),
            KnownFile::from_relative("/site/content/blog/cover.png", "blog/cover.png", "second"),
        ]
    }

    #[test]
    fn resolves_relative_to_source_directory() {
        let catalog = catalog();
        let entry = resolve("cover.png", "/site/content/blog", &catalog).unwrap();
        assert_eq!(entry.relative_path, "blog/cover.png");
    }

    #[test]
    fn normalises_parent_segments_before_lookup() {
        let catalog = catalog();
        let entry = resolve("../shared/a.zip", "/site/content/blog", &catalog).unwrap();
        assert_eq!(entry.hash, "zip");
    }

    #[test]
    fn returns_none_for_unknown_paths() {
        let catalog = catalog();
        assert!(resolve("missing.png", "/site/content/blog", &catalog).is_none());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let catalog = catalog();
        assert!(resolve("Cover.png", "/site/content/blog", &catalog).is_none());
    }

    #[test]
    fn first_entry_wins_for_duplicate_paths() {
        let catalog = catalog();
        assert_eq!(resolve("cover.png", "/site/content/blog", &catalog).unwrap().hash, "first");

        let index = CatalogIndex::new(&catalog);
        assert_eq!(index.len(), 2);
        assert_eq!(index.resolve("cover.png", "/site/content/blog").unwrap().hash, "first");
    }
}
