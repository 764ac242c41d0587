//! Rewrites asset references in a document tree and copies the referenced files.

mod embedded;
mod manifest;

use std::path::Path;

use crate::asset_paths::{compute_destination, is_absolute_url, is_ignored};
use crate::catalog::CatalogIndex;
use crate::config::LocalizeOptions;
use crate::copy::{AssetCopier, CopyOutcome, ensure_copied};
use crate::mdast::{Node, kind, visit_types_mut};
use crate::models::{KnownFile, LocalizeSummary};

/// Per-document inputs supplied by the host.
#[derive(Debug, Clone, Copy)]
pub struct LocalizeContext<'a> {
    /// Catalog of files known to the host.
    pub files: &'a [KnownFile],
    /// Directory containing the source document.
    pub source_dir: &'a str,
    /// Prefix for rewritten links; `None` or empty means `/`.
    pub link_prefix: Option<&'a str>,
    /// Root directory copies are written under.
    pub output_root: &'a Path,
}

/// Applies the localize passes to document trees.
pub struct AssetLocalizer<'a, C: AssetCopier + ?Sized> {
    context: LocalizeContext<'a>,
    options: &'a LocalizeOptions,
    copier: &'a C,
    catalog: CatalogIndex<'a>,
    ignored: Vec<String>,
}

impl<'a, C: AssetCopier + ?Sized> AssetLocalizer<'a, C> {
    /// Create a localizer for one document.
    pub fn new(context: LocalizeContext<'a>, options: &'a LocalizeOptions, copier: &'a C) -> Self {
        Self {
            context,
            options,
            copier,
            catalog: CatalogIndex::new(context.files),
            ignored: options.ignored_extensions(),
        }
    }

    /// Run every pass over `tree`, mutating it in place.
    ///
    /// Links and images are rewritten first, then raw markup, and finally the manifest
    /// block is consumed and removed. Copies started by the copier may still be in flight
    /// when this returns.
    pub fn localize(&self, tree: &mut Node) -> LocalizeSummary {
        let mut summary = LocalizeSummary::default();
        self.rewrite_links_and_images(tree, &mut summary);
        self.rewrite_embedded_markup(tree, &mut summary);
        self.extract_manifest(tree, &mut summary);
        summary
    }

    /// Rewrite a single reference.
    ///
    /// `None` means the reference is absolute or ignored and must not be touched.
    /// References with no catalog entry come back unchanged. Resolved references are
    /// copied and replaced with their public URL.
    pub fn rewrite_if_eligible(&self, raw: &str) -> Option<String> {
        self.rewrite(raw, &mut LocalizeSummary::default())
    }

    fn rewrite(&self, raw: &str, summary: &mut LocalizeSummary) -> Option<String> {
        if is_absolute_url(raw) || is_ignored(raw, self.ignored.as_slice()) {
            return None;
        }

        let Some(entry) = self.catalog.resolve(raw, self.context.source_dir) else {
            tracing::debug!(reference = raw, "no catalog entry for reference");
            return Some(raw.to_string());
        };
        summary.references_resolved += 1;

        let destination = compute_destination(entry, self.options.filename.as_ref());
        let placed = ensure_copied(
            self.copier,
            Path::new(&entry.absolute_path),
            &destination,
            self.context.output_root,
            self.context.link_prefix,
        );
        match placed.outcome {
            CopyOutcome::Started => summary.copies_started += 1,
            CopyOutcome::AlreadyPresent => summary.copies_skipped += 1,
        }

        tracing::debug!(reference = raw, url = %placed.public_url, "rewrote reference");
        Some(placed.public_url)
    }

    fn rewrite_links_and_images(&self, tree: &mut Node, summary: &mut LocalizeSummary) {
        visit_types_mut(tree, &[kind::IMAGE, kind::LINK], &mut |node| {
            let Some(url) = node.url.as_deref() else {
                return;
            };
            if let Some(rewritten) = self.rewrite(url, summary) {
                if rewritten != url {
                    summary.references_rewritten += 1;
                }
                node.url = Some(rewritten);
            }
        });
    }

    fn rewrite_embedded_markup(&self, tree: &mut Node, summary: &mut LocalizeSummary) {
        visit_types_mut(tree, &[kind::HTML, kind::JSX], &mut |node| {
            let Some(markup) = node.value.clone() else {
                return;
            };

            for tag in embedded::open_tags(&markup) {
                let Some(reference) = tag.asset_reference() else {
                    continue;
                };
                let Some(rewritten) = self.rewrite(reference, summary) else {
                    continue;
                };
                if rewritten == reference {
                    continue;
                }

                // Every literal occurrence is replaced, not only this attribute.
                if let Some(value) = node.value.as_mut() {
                    *value = value.replace(reference, &rewritten);
                    summary.references_rewritten += 1;
                }
            }
        });
    }

    fn extract_manifest(&self, tree: &mut Node, summary: &mut LocalizeSummary) {
        let Some(index) = manifest::find_manifest(&tree.children, &self.options.manifest_lang) else {
            return;
        };

        let body = tree.children[index].value.clone().unwrap_or_default();
        for entry in manifest::manifest_entries(&body) {
            summary.manifest_entries += 1;
            self.rewrite(entry, summary);
        }

        manifest::remove_child(&mut tree.children, index);
    }
}

/// Localize `tree` in one call.
pub fn localize_assets<C: AssetCopier + ?Sized>(
    tree: &mut Node,
    context: LocalizeContext<'_>,
    options: &LocalizeOptions,
    copier: &C,
) -> LocalizeSummary {
    AssetLocalizer::new(context, options, copier).localize(tree)
}
