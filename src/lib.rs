//! Directory-based HTML template manager for web applications.
//!
//! Loads template files from a directory tree, assembles them into two
//! addressing modes, caches the parsed engines, and executes them on demand.
//! Parsing, escaping, inheritance, and execution are delegated to
//! [Tera](https://crates.io/crates/tera); response plumbing goes through
//! [axum](https://crates.io/crates/axum).
//!
//! # Directory convention
//!
//! ```text
//! templates/
//!   main/                     renderable pages, any nesting depth
//!   context/                  shared fragments, loaded for every context-mode render
//!     layout/layout.html      the layout; pulls the page in as "content.html"
//! ```
//!
//! # Template names
//!
//! A name is an optional mode prefix followed by one or more root-relative
//! file paths separated by `;`:
//!
//! - `main/demo/index.html` or `C->main/demo/index.html` — **context mode**:
//!   the page renders nested inside the layout, with every context template
//!   available for `{% include %}`. Unprefixed names are context mode.
//! - `F->main/demo/index.html` — **files mode**: the named files form the
//!   whole template set and the first one is executed.
//! - `F->main/a.html;main/b.html` — files mode with helpers; `main/a.html`
//!   is the entry point and may include `main/b.html` by name.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use template_manager::TemplateManager;
//! use tera::Context;
//!
//! # fn main() -> template_manager::Result<()> {
//! let manager = Arc::new(TemplateManager::with_defaults(false));
//! manager.init()?;
//!
//! let mut context = Context::new();
//! context.insert("name", "World");
//! let page = manager.render("main/demo/index.html", &context)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] — manager configuration (directories, extension, flags)
//! - [`error`] — the [`TemplateError`] taxonomy
//! - [`manager`] — the cache facade: [`TemplateManager`]
//! - [`name`] — template-name parsing and canonicalization
//! - [`stats`] — render throughput measurement
//! - [`web`] — axum render adapter

pub mod config;
pub mod error;
mod filters;
mod loader;
pub mod manager;
mod minify;
pub mod name;
pub mod stats;
pub mod web;

pub use config::{Delims, TemplateConfig};
pub use error::{Result, TemplateError};
pub use manager::TemplateManager;
pub use name::{TemplateMode, TemplateName};
pub use stats::ThroughputStat;
pub use web::HtmlTemplate;
