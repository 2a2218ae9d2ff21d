//! Template discovery and source loading.
//!
//! Walks the configured directory tree, maps on-disk files to root-relative
//! template names, and loads sources with the configured transformations
//! (delimiter translation, on-load minification) applied.

use std::fs;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::error::{Result, TemplateError};
use crate::minify;

/// Root-relative names of every renderable template under the main directory.
///
/// Files under the context directory are excluded even when the context
/// directory nests inside the main directory. Results are sorted so startup
/// order is deterministic.
pub(crate) fn discover_main_templates(config: &TemplateConfig) -> Result<Vec<String>> {
    let main_path = config.main_path();
    if !main_path.is_dir() {
        warn!(dir = %main_path.display(), "main template directory does not exist");
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for rel in files_with_extension(&config.root_dir, &main_path, &config.extension) {
        if Path::new(&rel).starts_with(&config.context_dir) {
            continue;
        }
        names.push(rel);
    }
    names.sort();
    Ok(names)
}

/// `(name, source)` pairs for every context template, the layout guaranteed
/// to be among them.
pub(crate) fn context_sources(config: &TemplateConfig) -> Result<Vec<(String, String)>> {
    let context_path = config.context_path();
    let mut names = if context_path.is_dir() {
        files_with_extension(&config.root_dir, &context_path, &config.extension)
    } else {
        Vec::new()
    };
    names.sort();

    if !names.iter().any(|n| n == &config.layout_file) {
        names.push(config.layout_file.clone());
    }

    names
        .into_iter()
        .map(|rel| {
            let source = load_source(config, &rel)?;
            Ok((rel, source))
        })
        .collect()
}

/// Load one template source by its root-relative name.
///
/// Applies delimiter translation when the configured pair differs from the
/// engine's, and on-load minification when enabled.
pub(crate) fn load_source(config: &TemplateConfig, rel: &str) -> Result<String> {
    let path = config.root_dir.join(rel);
    let mut source = fs::read_to_string(&path).map_err(|source| TemplateError::Io {
        path: path.clone(),
        source,
    })?;

    if !config.delims.is_default() {
        source = source
            .replace(&config.delims.open, "{{")
            .replace(&config.delims.close, "}}");
    }

    if config.minify_on_load {
        source = String::from_utf8_lossy(&minify::minify_fragment(source.as_bytes())).into_owned();
    }

    Ok(source)
}

/// Walk `dir` and collect root-relative names of files carrying `extension`.
///
/// Unreadable entries are skipped; a template tree with a permission hole
/// still serves the rest.
fn files_with_extension(root: &Path, dir: &Path, extension: &str) -> Vec<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| relative_name(root, entry.path()))
        .filter(|rel| rel.ends_with(extension))
        .collect()
}

/// Root-relative template name for an on-disk path, `/`-separated.
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
