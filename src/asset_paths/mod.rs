//! Helpers for classifying references and computing asset output paths.
//!
//! The URL classifier, the path joiner, and the destination namer live in separate
//! submodules so each can be tested without a document tree or a filesystem.

mod destination;
mod filters;
mod join;

pub use destination::{FilenameFn, compute_destination};
pub use filters::{
    DEFAULT_IGNORED_EXTENSIONS, effective_ignore_extensions, is_absolute_url, is_ignored,
};
pub use join::join_segments;
