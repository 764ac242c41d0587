//! Localizer options and the JSON configuration file that produces them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::asset_paths::{FilenameFn, effective_ignore_extensions};
use crate::error::{LocalizeError, LocalizeResult};
use crate::models::FilenameParams;

const DEFAULT_CONFIG_FILE: &str = "localize.config.json";

/// Language tag marking the code block that lists extra files to copy.
pub const DEFAULT_MANIFEST_LANG: &str = "copyfiles";

/// Options recognised by the localizer.
pub struct LocalizeOptions {
    /// Reference suffixes that are never copied. Empty means `[".md"]`.
    pub ignore_file_extensions: Vec<String>,
    /// Optional naming override for copied files.
    pub filename: Option<FilenameFn>,
    /// Language tag of the manifest code block.
    pub manifest_lang: String,
}

impl Default for LocalizeOptions {
    fn default() -> Self {
        Self {
            ignore_file_extensions: Vec::new(),
            filename: None,
            manifest_lang: DEFAULT_MANIFEST_LANG.into(),
        }
    }
}

impl std::fmt::Debug for LocalizeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizeOptions")
            .field("ignore_file_extensions", &self.ignore_file_extensions)
            .field("filename", &self.filename.as_ref().map(|_| "<fn>"))
            .field("manifest_lang", &self.manifest_lang)
            .finish()
    }
}

impl LocalizeOptions {
    /// Ignore list with the `.md` default applied.
    pub fn ignored_extensions(&self) -> Vec<String> {
        effective_ignore_extensions(&self.ignore_file_extensions)
    }

    /// Replace the naming override with a closure.
    pub fn with_filename<F>(mut self, naming: F) -> Self
    where
        F: Fn(&FilenameParams<'_>) -> String + Send + Sync + 'static,
    {
        self.filename = Some(Box::new(naming));
        self
    }
}

/// On-disk configuration, usually `localize.config.json` next to the content root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalizeConfig {
    /// Reference suffixes to skip.
    pub ignore_file_extensions: Vec<String>,
    /// Filename template such as `{name}-{hash:8}.{extension}`.
    pub filename: Option<String>,
    /// Manifest block language tag.
    pub manifest_language: Option<String>,
    /// Prefix for rewritten links.
    pub link_prefix: Option<String>,
    /// Output directory, relative to the content root.
    pub output_dir: Option<PathBuf>,
}

impl LocalizeConfig {
    /// Load `localize.config.json` from `dir`, falling back to defaults.
    ///
    /// A missing file is silent. A file that cannot be parsed is logged and ignored.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.exists() {
            return Self::default();
        }
        match Self::from_path(&candidate) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable configuration");
                Self::default()
            }
        }
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> LocalizeResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| LocalizeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LocalizeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Convert into localizer options, compiling the filename template.
    pub fn into_options(self) -> LocalizeResult<LocalizeOptions> {
        let filename = match self.filename {
            Some(template) => Some(FilenameTemplate::parse(&template)?.into_fn()),
            None => None,
        };

        Ok(LocalizeOptions {
            ignore_file_extensions: self.ignore_file_extensions,
            filename,
            manifest_lang: self
                .manifest_language
                .unwrap_or_else(|| DEFAULT_MANIFEST_LANG.into()),
        })
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([a-z]+)(?::([0-9]+))?\}").expect("invalid placeholder regex")
    })
}

/// File name template with `{name}`, `{hash}` and `{extension}` placeholders.
///
/// `{hash:N}` keeps the first `N` characters of the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    template: String,
}

impl FilenameTemplate {
    /// Validate a template string.
    pub fn parse(template: &str) -> LocalizeResult<Self> {
        if template.trim().is_empty() {
            return Err(LocalizeError::InvalidTemplate {
                template: template.into(),
                reason: "template is empty".into(),
            });
        }

        for caps in placeholder_pattern().captures_iter(template) {
            let field = &caps[1];
            if !matches!(field, "name" | "hash" | "extension") {
                return Err(LocalizeError::InvalidTemplate {
                    template: template.into(),
                    reason: format!("unknown placeholder `{field}`"),
                });
            }
            if caps.get(2).is_some() && field != "hash" {
                return Err(LocalizeError::InvalidTemplate {
                    template: template.into(),
                    reason: format!("only `hash` accepts a length, found `{field}`"),
                });
            }
        }

        Ok(Self {
            template: template.into(),
        })
    }

    /// Render the template for one file.
    pub fn render(&self, params: &FilenameParams<'_>) -> String {
        placeholder_pattern()
            .replace_all(&self.template, |caps: &Captures<'_>| match &caps[1] {
                "name" => params.name.to_string(),
                "extension" => params.extension.to_string(),
                _ => {
                    let limit = caps
                        .get(2)
                        .and_then(|len| len.as_str().parse::<usize>().ok())
                        .unwrap_or(usize::MAX);
                    params.hash.chars().take(limit).collect()
                }
            })
            .into_owned()
    }

    /// Box the template as a naming function.
    pub fn into_fn(self) -> FilenameFn {
        Box::new(move |params| self.render(params))
    }
}
