use crate::asset_paths::join_segments;
use crate::models::{FilenameParams, KnownFile};

/// Caller-supplied naming override producing a file name for a resolved entry.
pub type FilenameFn = Box<dyn Fn(&FilenameParams<'_>) -> String + Send + Sync>;

/// Compute the output-relative path a resolved entry is copied to.
///
/// Without a naming function the catalog-relative path is used verbatim. With one, the
/// entry keeps its relative directory and takes the returned file name, which lets hosts
/// emit content-hashed names without flattening the directory layout.
pub fn compute_destination(entry: &KnownFile, naming: Option<&FilenameFn>) -> String {
    match naming {
        None => entry.relative_path.clone(),
        Some(naming) => {
            let file_name = naming(&entry.filename_params());
            join_segments(&[&entry.relative_directory, &file_name])
        }
    }
}
