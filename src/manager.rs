//! The template manager: cached, dual-mode template assembly and execution.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::sync::{Arc, PoisonError, RwLock};

use tera::{Context, Tera, Value};
use tracing::{debug, error, info};

use crate::config::TemplateConfig;
use crate::error::{Result, TemplateError};
use crate::filters;
use crate::loader;
use crate::minify;
use crate::name::{TemplateMode, TemplateName};

/// A parsed, ready-to-execute template set.
#[derive(Debug)]
struct CachedTemplate {
    tera: Tera,
    /// Registered template name executed when this entry renders.
    entry: String,
}

/// Facade over Tera: name parsing, dual-mode assembly, and a shared cache.
///
/// One manager is shared (behind an [`Arc`]) by every request handler. The
/// cache maps standardized template names to parsed engines; lookups take the
/// shared lock, replacements take the exclusive lock. Reload I/O happens
/// outside the lock.
#[derive(Debug)]
pub struct TemplateManager {
    config: TemplateConfig,
    cache: RwLock<HashMap<String, CachedTemplate>>,
}

impl TemplateManager {
    pub fn new(config: TemplateConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Manager with the default directory convention.
    pub fn with_defaults(debug: bool) -> Self {
        Self::new(TemplateConfig::new(debug))
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Walk the main template directory and pre-populate the cache for both
    /// addressing modes of every discovered file.
    ///
    /// A missing or unparsable backing file fails the whole call; the caller
    /// decides whether that aborts startup.
    pub fn init(&self) -> Result<()> {
        let mains = loader::discover_main_templates(&self.config)?;
        if self.config.verbosity >= 1 {
            info!(
                count = mains.len(),
                root = %self.config.root_dir.display(),
                "loading main templates"
            );
        }
        for rel in mains {
            let mut name = TemplateName::context(rel);
            self.rebuild(&name)?;
            name.to_files_mode();
            self.rebuild(&name)?;
        }
        Ok(())
    }

    /// Standardized names of every cached entry, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = cache.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether a template name currently has a cached entry.
    pub fn contains(&self, name: &str) -> bool {
        let Ok(parsed) = name.parse::<TemplateName>() else {
            return false;
        };
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.contains_key(&parsed.to_string())
    }

    /// Render a template to a string.
    ///
    /// A cache hit renders under the shared lock. A miss (or any render in
    /// `debug` mode) reloads the backing files, replaces the cache entry
    /// wholesale, and then renders.
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        let parsed: TemplateName = name.parse()?;
        let key = parsed.to_string();

        if self.config.debug {
            if self.config.verbosity >= 2 {
                debug!(template = %key, "debug mode, re-parsing before render");
            }
        } else if let Some(result) = self.render_cached(&key, context) {
            return result;
        }

        self.rebuild(&parsed)?;
        match self.render_cached(&key, context) {
            Some(result) => result,
            None => Err(TemplateError::NotFound { name: key }),
        }
    }

    /// Render with a JSON object as the data model.
    pub fn render_value(&self, name: &str, data: serde_json::Value) -> Result<String> {
        let context = Context::from_value(data).map_err(|source| TemplateError::Render {
            name: name.to_owned(),
            source,
        })?;
        self.render(name, &context)
    }

    /// Render into an [`io::Write`] sink.
    pub fn render_to(&self, name: &str, context: &Context, mut out: impl io::Write) -> Result<()> {
        let html = self.render(name, context)?;
        out.write_all(html.as_bytes())
            .map_err(|source| TemplateError::Output { source })
    }

    /// Render and apply the minify-on-output flag. The web adapter entry point.
    pub fn render_bytes(&self, name: &str, context: &Context) -> Result<Vec<u8>> {
        let html = self.render(name, context)?;
        if self.config.minify_on_output {
            Ok(minify::minify_fragment(html.as_bytes()))
        } else {
            Ok(html.into_bytes())
        }
    }

    /// Human-readable summary of the configuration and cached entries.
    pub fn report(&self) -> String {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<&String> = cache.keys().collect();
        keys.sort();

        let mut out = String::new();
        let _ = writeln!(out, "template manager report");
        let _ = writeln!(out, "config: {:#?}", self.config);
        let _ = writeln!(out, "cached templates ({}):", keys.len());
        for key in keys {
            if let Some(cached) = cache.get(key) {
                let mut registered: Vec<&str> = cached.tera.get_template_names().collect();
                registered.sort_unstable();
                let _ = writeln!(out, "  {key} -> [{}]", registered.join(", "));
            }
        }
        out
    }

    fn render_cached(&self, key: &str, context: &Context) -> Option<Result<String>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(key).map(|cached| {
            cached.tera.render(&cached.entry, context).map_err(|source| {
                error!(template = %key, error = %source, "template execution failed");
                TemplateError::Render {
                    name: key.to_owned(),
                    source,
                }
            })
        })
    }

    /// Reload the backing files for `name` and replace its cache entry.
    fn rebuild(&self, name: &TemplateName) -> Result<()> {
        if self.config.verbosity >= 2 {
            debug!(template = %name, files = ?name.files(), "parsing template set");
        }
        let cached = match name.mode() {
            TemplateMode::Context => self.build_context(name)?,
            TemplateMode::Files => self.build_files(name)?,
        };
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(name.to_string(), cached);
        Ok(())
    }

    /// Context mode: every context-dir template, the layout, and the named
    /// files. The first named file is additionally registered under the logical
    /// `content<extension>` name the layout includes.
    fn build_context(&self, name: &TemplateName) -> Result<CachedTemplate> {
        let mut sources = loader::context_sources(&self.config)?;
        for (i, rel) in name.files().iter().enumerate() {
            let source = loader::load_source(&self.config, rel)?;
            if i == 0 {
                sources.push((self.config.content_name(), source.clone()));
            }
            sources.push((rel.clone(), source));
        }
        let tera = self.build_engine(&sources, name)?;
        Ok(CachedTemplate {
            tera,
            entry: self.config.layout_file.clone(),
        })
    }

    /// Files mode: exactly the named files, the first one being the entry point.
    fn build_files(&self, name: &TemplateName) -> Result<CachedTemplate> {
        let mut sources = Vec::with_capacity(name.files().len());
        for rel in name.files() {
            sources.push((rel.clone(), loader::load_source(&self.config, rel)?));
        }
        let tera = self.build_engine(&sources, name)?;
        Ok(CachedTemplate {
            tera,
            entry: name.entry().to_owned(),
        })
    }

    fn build_engine(&self, sources: &[(String, String)], name: &TemplateName) -> Result<Tera> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources.iter().map(|(n, s)| (n.as_str(), s.as_str())))
            .map_err(|source| TemplateError::Parse {
                name: name.to_string(),
                source,
            })?;
        filters::register(&mut tera);
        for (fname, function) in &self.config.functions {
            let function = Arc::clone(function);
            tera.register_function(fname, move |args: &HashMap<String, Value>| {
                function.call(args)
            });
        }
        Ok(tera)
    }
}
