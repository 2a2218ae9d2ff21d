//! Template name environment: an addressing mode plus an ordered file list.
//!
//! A template name selects one of two addressing modes:
//!
//! - **Context mode** (`C->` prefix, or no prefix at all): the named file is
//!   rendered nested inside the configured layout, with every context template
//!   available for inclusion, in the Django/Jinja layout-inheritance style.
//! - **Files mode** (`F->` prefix): the named files are assembled on their own
//!   and the first one is the execution entry point.
//!
//! The standardized string form is `<prefix><file1>[;<file2>...]`, and parsing a
//! standardized form yields the same value back (round-trip idempotence).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::TemplateError;

/// Prefix selecting context (layout-nesting) mode.
pub const CONTEXT_PREFIX: &str = "C->";
/// Prefix selecting files mode.
pub const FILES_PREFIX: &str = "F->";
/// Separator between file names in files mode.
pub const FILES_SEPARATOR: &str = ";";

/// Addressing mode of a template name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateMode {
    /// Layout-nesting mode: the page renders inside the configured layout.
    Context,
    /// Flat mode: the listed files form the whole template set.
    Files,
}

impl TemplateMode {
    /// The standardized name prefix for this mode.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Context => CONTEXT_PREFIX,
            Self::Files => FILES_PREFIX,
        }
    }
}

/// A parsed template name: mode plus root-relative file names.
///
/// The file list is never empty. Context mode uses the first entry as the page
/// nested into the layout; files mode executes the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName {
    mode: TemplateMode,
    files: Vec<String>,
}

impl TemplateName {
    /// Context-mode name for a single file.
    pub fn context(file: impl Into<String>) -> Self {
        Self {
            mode: TemplateMode::Context,
            files: vec![file.into()],
        }
    }

    /// Files-mode name. Rejects an empty list, since there would be nothing to
    /// execute.
    pub fn from_files<I, S>(files: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files: Vec<String> = files.into_iter().map(Into::into).collect();
        if files.is_empty() {
            return Err(TemplateError::InvalidName {
                name: String::new(),
                reason: "empty file list".to_owned(),
            });
        }
        Ok(Self {
            mode: TemplateMode::Files,
            files,
        })
    }

    pub fn mode(&self) -> TemplateMode {
        self.mode
    }

    /// Root-relative file names, in execution order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The file executed (or nested into the layout) when this name renders.
    pub fn entry(&self) -> &str {
        &self.files[0]
    }

    /// Switch to context mode. Only meaningful before the name is first resolved.
    pub fn to_context_mode(&mut self) -> &mut Self {
        self.mode = TemplateMode::Context;
        self
    }

    /// Switch to files mode. Only meaningful before the name is first resolved.
    pub fn to_files_mode(&mut self) -> &mut Self {
        self.mode = TemplateMode::Files;
        self
    }

    /// Resolve every file entry against the template root directory.
    pub fn file_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|f| root.join(f)).collect()
    }
}

impl fmt::Display for TemplateName {
    /// The standardized name: mode prefix plus `;`-joined file list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mode.prefix(), self.files.join(FILES_SEPARATOR))
    }
}

impl FromStr for TemplateName {
    type Err = TemplateError;

    /// Parses a template name string.
    ///
    /// The input is trimmed before the mode prefixes are matched; a name with no
    /// recognized prefix is a context-mode name (this default is part of the
    /// contract, not a silent fallback). Blank entries around the `;` separator
    /// are dropped, and an input whose file list ends up empty is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (mode, rest) = if let Some(rest) = trimmed.strip_prefix(CONTEXT_PREFIX) {
            (TemplateMode::Context, rest)
        } else if let Some(rest) = trimmed.strip_prefix(FILES_PREFIX) {
            (TemplateMode::Files, rest)
        } else {
            (TemplateMode::Context, trimmed)
        };

        let files: Vec<String> = rest
            .split(FILES_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect();

        if files.is_empty() {
            return Err(TemplateError::InvalidName {
                name: s.to_owned(),
                reason: "no file names after the mode prefix".to_owned(),
            });
        }

        Ok(Self { mode, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unprefixed_defaults_to_context() {
        let name: TemplateName = "main/demo/index.html".parse().unwrap();
        assert_eq!(name.mode(), TemplateMode::Context);
        assert_eq!(name.files(), ["main/demo/index.html"]);
        assert_eq!(name.to_string(), "C->main/demo/index.html");
    }

    #[test]
    fn test_parse_context_prefix() {
        let name: TemplateName = "C->main/demo/index.html".parse().unwrap();
        assert_eq!(name.mode(), TemplateMode::Context);
        assert_eq!(name.files(), ["main/demo/index.html"]);
    }

    #[test]
    fn test_parse_files_prefix_multiple() {
        let name: TemplateName = "F->main/a.html; main/b.html ;main/c.html"
            .parse()
            .unwrap();
        assert_eq!(name.mode(), TemplateMode::Files);
        assert_eq!(name.files(), ["main/a.html", "main/b.html", "main/c.html"]);
        assert_eq!(name.entry(), "main/a.html");
        assert_eq!(name.to_string(), "F->main/a.html;main/b.html;main/c.html");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace_before_prefix_match() {
        let name: TemplateName = "  F-> main/a.html  ".parse().unwrap();
        assert_eq!(name.mode(), TemplateMode::Files);
        assert_eq!(name.files(), ["main/a.html"]);
    }

    #[test]
    fn test_parse_drops_blank_entries() {
        let name: TemplateName = "F->main/a.html;;main/b.html;".parse().unwrap();
        assert_eq!(name.files(), ["main/a.html", "main/b.html"]);
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!("".parse::<TemplateName>().is_err());
        assert!("   ".parse::<TemplateName>().is_err());
        assert!("C->".parse::<TemplateName>().is_err());
        assert!("F-> ; ;".parse::<TemplateName>().is_err());
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        for input in [
            "main/demo/index.html",
            "C-> main/demo/index.html",
            "F->main/a.html; main/b.html",
            "  F->x.html  ",
        ] {
            let once: TemplateName = input.parse().unwrap();
            let twice: TemplateName = once.to_string().parse().unwrap();
            assert_eq!(once, twice, "round trip changed {input:?}");
        }
    }

    #[test]
    fn test_mode_toggles() {
        let mut name = TemplateName::context("main/a.html");
        name.to_files_mode();
        assert_eq!(name.to_string(), "F->main/a.html");
        name.to_context_mode();
        assert_eq!(name.to_string(), "C->main/a.html");
    }

    #[test]
    fn test_from_files_rejects_empty() {
        assert!(TemplateName::from_files(Vec::<String>::new()).is_err());
        let name = TemplateName::from_files(["main/a.html"]).unwrap();
        assert_eq!(name.mode(), TemplateMode::Files);
    }

    #[test]
    fn test_file_paths_join_root() {
        let name: TemplateName = "F->main/a.html;main/b.html".parse().unwrap();
        let paths = name.file_paths(Path::new("templates"));
        assert_eq!(
            paths,
            [
                PathBuf::from("templates/main/a.html"),
                PathBuf::from("templates/main/b.html")
            ]
        );
    }
}
