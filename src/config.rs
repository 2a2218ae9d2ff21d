//! Manager configuration.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tera::Function;

/// Delimiter pair wrapping template expressions in source files.
///
/// Tera's own syntax is fixed to `{{`/`}}`. A non-default pair is honored by
/// rewriting loaded sources to the canonical pair before they reach the engine,
/// so templates written with, say, `[[`/`]]` keep working unchanged on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delims {
    pub open: String,
    pub close: String,
}

impl Delims {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// True for the engine's canonical `{{`/`}}` pair.
    pub fn is_default(&self) -> bool {
        self.open == "{{" && self.close == "}}"
    }
}

impl Default for Delims {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// Template manager configuration. Read-only once the manager is constructed.
pub struct TemplateConfig {
    /// Template root directory.
    pub root_dir: PathBuf,

    /// Renderable-template subdirectory, relative to the root.
    pub main_dir: String,

    /// Shared/inherited-fragment subdirectory, relative to the root. May nest
    /// inside the main directory; its files are never addressable on their own.
    pub context_dir: String,

    /// Layout file path, relative to the root. Context-mode execution enters
    /// here; the layout pulls the page in with `{% include "content<ext>" %}`.
    pub layout_file: String,

    /// Template file extension, including the leading dot.
    pub extension: String,

    /// Custom Tera functions registered on every built engine.
    pub functions: HashMap<String, Arc<dyn Function>>,

    /// Delimiter pair used by template sources on disk.
    pub delims: Delims,

    /// When true, every render re-parses the backing files instead of using the
    /// cache. Intended for development.
    pub debug: bool,

    /// 0 = silent, 1 = lifecycle logs, 2 = per-parse detail.
    pub verbosity: u8,

    /// Minify template sources as they are loaded.
    pub minify_on_load: bool,

    /// Minify rendered HTML on the web adapter path.
    pub minify_on_output: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("templates"),
            main_dir: "main".to_owned(),
            context_dir: "context".to_owned(),
            layout_file: "context/layout/layout.html".to_owned(),
            extension: ".html".to_owned(),
            functions: HashMap::new(),
            delims: Delims::default(),
            debug: false,
            verbosity: 1,
            minify_on_load: false,
            minify_on_output: false,
        }
    }
}

impl TemplateConfig {
    /// The default directory convention with the given debug flag.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    /// Register a custom Tera function, builder-style.
    pub fn with_function(
        mut self,
        name: impl Into<String>,
        function: impl Function + 'static,
    ) -> Self {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    /// Logical name the layout uses to include the page body, e.g. `content.html`.
    pub fn content_name(&self) -> String {
        format!("content{}", self.extension)
    }

    pub(crate) fn main_path(&self) -> PathBuf {
        self.root_dir.join(&self.main_dir)
    }

    pub(crate) fn context_path(&self) -> PathBuf {
        self.root_dir.join(&self.context_dir)
    }
}

impl fmt::Debug for TemplateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&String> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("TemplateConfig")
            .field("root_dir", &self.root_dir)
            .field("main_dir", &self.main_dir)
            .field("context_dir", &self.context_dir)
            .field("layout_file", &self.layout_file)
            .field("extension", &self.extension)
            .field("functions", &functions)
            .field("delims", &self.delims)
            .field("debug", &self.debug)
            .field("verbosity", &self.verbosity)
            .field("minify_on_load", &self.minify_on_load)
            .field("minify_on_output", &self.minify_on_output)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory_convention() {
        let config = TemplateConfig::default();
        assert_eq!(config.root_dir, PathBuf::from("templates"));
        assert_eq!(config.main_path(), PathBuf::from("templates/main"));
        assert_eq!(config.context_path(), PathBuf::from("templates/context"));
        assert_eq!(config.layout_file, "context/layout/layout.html");
        assert_eq!(config.content_name(), "content.html");
        assert!(!config.debug);
    }

    #[test]
    fn test_new_sets_debug() {
        assert!(TemplateConfig::new(true).debug);
        assert!(!TemplateConfig::new(false).debug);
    }

    #[test]
    fn test_custom_extension_changes_content_name() {
        let config = TemplateConfig {
            extension: ".tpl.html".to_owned(),
            ..TemplateConfig::default()
        };
        assert_eq!(config.content_name(), "content.tpl.html");
    }

    #[test]
    fn test_delims_default_detection() {
        assert!(Delims::default().is_default());
        assert!(!Delims::new("[[", "]]").is_default());
    }

    #[test]
    fn test_debug_output_lists_function_names_only() {
        let config = TemplateConfig::default().with_function(
            "noop",
            |_args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
                Ok(tera::Value::Null)
            },
        );
        let rendered = format!("{config:?}");
        assert!(rendered.contains("noop"));
    }
}
