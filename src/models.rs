//! Data structures shared between the catalog, the localizer and its hosts.

use serde::{Deserialize, Serialize};

/// One file already discovered on disk by the host's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownFile {
    /// Absolute source path, compared verbatim against joined references.
    pub absolute_path: String,
    /// Path relative to the catalog root, using forward slashes.
    pub relative_path: String,
    /// Directory portion of `relative_path` (`.` for files at the root).
    pub relative_directory: String,
    /// File name without its extension.
    pub name: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Content digest used for hashed output names.
    #[serde(alias = "contentDigest")]
    pub hash: String,
}

impl KnownFile {
    /// Build an entry from a catalog-relative path, deriving the name parts from it.
    pub fn from_relative(
        absolute_path: impl Into<String>,
        relative_path: &str,
        hash: impl Into<String>,
    ) -> Self {
        let relative_path = relative_path.replace('\\', "/");
        let (relative_directory, file_name) = match relative_path.rsplit_once('/') {
            Some((dir, file)) => (dir.to_string(), file.to_string()),
            None => (".".to_string(), relative_path.clone()),
        };
        let (name, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
            _ => (file_name.clone(), String::new()),
        };

        Self {
            absolute_path: absolute_path.into(),
            relative_path,
            relative_directory,
            name,
            extension,
            hash: hash.into(),
        }
    }

    /// Borrow the fields handed to a naming function.
    pub fn filename_params(&self) -> FilenameParams<'_> {
        FilenameParams {
            name: &self.name,
            hash: &self.hash,
            extension: &self.extension,
        }
    }
}

/// Parameters passed to a caller-supplied naming function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilenameParams<'a> {
    /// File name without extension.
    pub name: &'a str,
    /// Content digest of the source file.
    pub hash: &'a str,
    /// Extension without the leading dot.
    pub extension: &'a str,
}

/// Counters describing what a single localize run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizeSummary {
    /// References whose value changed in the tree.
    pub references_rewritten: usize,
    /// References that matched a catalog entry.
    pub references_resolved: usize,
    /// Copies handed to the copier because the destination was missing.
    pub copies_started: usize,
    /// Copies skipped because the destination already existed.
    pub copies_skipped: usize,
    /// Non-empty lines read from the manifest block.
    pub manifest_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_name_parts_from_nested_path() {
        let entry = KnownFile::from_relative("/content/blog/cover.png", "blog/cover.png", "ff00");
        assert_eq!(entry.relative_directory, "blog");
        assert_eq!(entry.name, "cover");
        assert_eq!(entry.extension, "png");
    }

    #[test]
    fn root_files_use_current_directory() {
        let entry = KnownFile::from_relative("sample.tar.gz", "sample.tar.gz", "");
        assert_eq!(entry.relative_directory, ".");
        assert_eq!(entry.name, "sample.tar");
        assert_eq!(entry.extension, "gz");
    }

    #[test]
    fn dotfiles_have_no_extension() {
        let entry = KnownFile::from_relative("/c/.env", ".env", "");
        assert_eq!(entry.name, ".env");
        assert_eq!(entry.extension, "");
    }

    #[test]
    fn deserializes_content_digest_alias() {
        let entry: KnownFile = serde_json::from_str(
            r#"{
                "absolutePath": "/c/a.jpg",
                "relativePath": "a.jpg",
                "relativeDirectory": ".",
                "name": "a",
                "extension": "jpg",
                "contentDigest": "a1b2c3"
            }"#,
        )
        .unwrap();
        assert_eq!(entry.hash, "a1b2c3");
    }
}
