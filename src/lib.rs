#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod catalog;
pub mod config;
pub mod copy;
pub mod error;
pub mod localizer;
pub mod mdast;
pub mod models;

pub use config::{FilenameTemplate, LocalizeConfig, LocalizeOptions};
pub use copy::{AssetCopier, CopyOutcome, DetachedCopier, FsCopier};
pub use error::{LocalizeError, LocalizeResult};
pub use localizer::{AssetLocalizer, LocalizeContext, localize_assets};
pub use mdast::Node;
pub use models::{FilenameParams, KnownFile, LocalizeSummary};
