//! Command-line host: scan a content root, localize one document, emit its tree.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use asset_localizer::catalog::scan_known_files;
use asset_localizer::mdast::parse_markdown;
use asset_localizer::{
    DetachedCopier, FilenameTemplate, FsCopier, LocalizeConfig, LocalizeContext, Node,
    localize_assets,
};

/// Copy assets referenced by a markdown document and rewrite their links.
#[derive(Debug, Parser)]
#[command(name = "asset-localizer", version)]
struct Cli {
    /// Markdown (`.md`) or mdast JSON (`.json`) document to localize.
    document: PathBuf,
    /// Content root scanned for known files.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Output directory copies are written under.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Configuration file; defaults to `localize.config.json` in the content root.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Prefix for rewritten links.
    #[arg(long)]
    link_prefix: Option<String>,
    /// Reference suffix to leave untouched (repeatable).
    #[arg(long = "ignore-ext", value_name = "SUFFIX")]
    ignore_extensions: Vec<String>,
    /// Filename template such as `{name}-{hash:8}.{extension}`.
    #[arg(long)]
    filename: Option<String>,
    /// Copy on background threads and wait for them before exiting.
    #[arg(long)]
    detached: bool,
    /// Where to write the rewritten tree as JSON; `-` for stdout.
    #[arg(long, default_value = "-")]
    emit: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let root = fs::canonicalize(&cli.root)
        .with_context(|| format!("failed to resolve content root {}", cli.root.display()))?;
    let document = fs::canonicalize(&cli.document)
        .with_context(|| format!("failed to resolve document {}", cli.document.display()))?;

    let config = match &cli.config {
        Some(path) => LocalizeConfig::from_path(path)?,
        None => LocalizeConfig::discover(&root),
    };
    let output_root = cli
        .output
        .clone()
        .or_else(|| config.output_dir.as_ref().map(|dir| root.join(dir)))
        .unwrap_or_else(|| PathBuf::from("public"));
    let link_prefix = cli.link_prefix.clone().or_else(|| config.link_prefix.clone());

    let mut options = config.into_options()?;
    if !cli.ignore_extensions.is_empty() {
        options.ignore_file_extensions = cli.ignore_extensions.clone();
    }
    if let Some(template) = &cli.filename {
        options.filename = Some(FilenameTemplate::parse(template)?.into_fn());
    }

    let files = scan_known_files(&root)?;
    tracing::info!(root = %root.display(), files = files.len(), "scanned content root");

    let mut tree = read_document(&document)?;
    let source_dir = document
        .parent()
        .ok_or_else(|| anyhow!("document {} has no parent directory", document.display()))?
        .to_string_lossy()
        .replace('\\', "/");

    let context = LocalizeContext {
        files: &files,
        source_dir: &source_dir,
        link_prefix: link_prefix.as_deref(),
        output_root: &output_root,
    };

    let summary = if cli.detached {
        let copier = DetachedCopier::new();
        let summary = localize_assets(&mut tree, context, &options, &copier);
        let failures = copier.wait();
        if failures > 0 {
            tracing::warn!(failures, "some copies did not complete");
        }
        summary
    } else {
        localize_assets(&mut tree, context, &options, &FsCopier)
    };
    tracing::info!(
        rewritten = summary.references_rewritten,
        copied = summary.copies_started,
        skipped = summary.copies_skipped,
        manifest = summary.manifest_entries,
        "localized document"
    );

    write_tree(&tree, &cli.emit)
}

fn read_document(path: &Path) -> Result<Node> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    if path.extension().is_some_and(|ext| ext == "json") {
        Node::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
    } else {
        Ok(parse_markdown(&text))
    }
}

fn write_tree(tree: &Node, emit: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(tree)?;
    if emit == "-" {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}")?;
        return Ok(());
    }
    fs::write(emit, json).with_context(|| format!("failed to write {emit}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
