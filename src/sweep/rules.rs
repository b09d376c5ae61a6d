use std::fmt;

use super::resolve::collapse_inner_recursion;
use crate::error::{Result, SweepError};

/// A named group of patterns in the [`RuleTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Directories whose contents are removed but which themselves survive
    CleanInside,
    /// Directories removed entirely
    Purge,
    /// Individual files removed
    FilePatterns,
    /// Extra directories purged only in deep mode
    DeepDirs,
    /// Extra files removed only in deep mode
    DeepFiles,
}

impl Category {
    /// The name used in log output
    pub fn name(self) -> &'static str {
        match self {
            Category::CleanInside => "clean-inside",
            Category::Purge => "purge",
            Category::FilePatterns => "file-patterns",
            Category::DeepDirs => "deep-clean dirs",
            Category::DeepFiles => "deep-clean files",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative cleanup rules, grouped by what happens to a match.
///
/// Patterns may overlap between categories; the engine checks existence at
/// dispatch time, so a path already removed by an earlier category is simply
/// skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    purge: Vec<String>,
    clean_inside: Vec<String>,
    file_patterns: Vec<String>,
    deep_dirs: Vec<String>,
    deep_files: Vec<String>,
}

impl RuleTable {
    /// Creates a new builder for a custom [`RuleTable`] with every category
    /// empty
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// Patterns for directories to delete entirely
    pub fn purge(&self) -> &[String] {
        &self.purge
    }

    /// Patterns for directories to empty but keep
    pub fn clean_inside(&self) -> &[String] {
        &self.clean_inside
    }

    /// Patterns for individual files to delete
    pub fn file_patterns(&self) -> &[String] {
        &self.file_patterns
    }

    /// Deep-mode directory patterns
    pub fn deep_dirs(&self) -> &[String] {
        &self.deep_dirs
    }

    /// Deep-mode file patterns
    pub fn deep_files(&self) -> &[String] {
        &self.deep_files
    }

    /// Patterns for a single category
    pub fn patterns(&self, category: Category) -> &[String] {
        match category {
            Category::CleanInside => self.clean_inside(),
            Category::Purge => self.purge(),
            Category::FilePatterns => self.file_patterns(),
            Category::DeepDirs => self.deep_dirs(),
            Category::DeepFiles => self.deep_files(),
        }
    }
}

impl Default for RuleTable {
    /// The built-in rules: Python bytecode caches, packaging output, macOS
    /// metadata, a shared staging area, and (in deep mode) notebook
    /// checkpoints, logs and local service data.
    fn default() -> Self {
        fn owned(patterns: &[&str]) -> Vec<String> {
            patterns.iter().map(|p| p.to_string()).collect()
        }

        Self {
            purge: owned(&["**/__pycache__", ".pytest_cache", "build", "dist", ".eggs"]),
            clean_inside: owned(&["/tmp/staging/*"]),
            file_patterns: owned(&["**/*.pyc", "**/*.pyo", "**/.DS_Store"]),
            deep_dirs: owned(&["**/.ipynb_checkpoints"]),
            deep_files: owned(&["**/*.log", "./data/postgres/*", "./data/redis/*"]),
        }
    }
}

/// Builder for [`RuleTable`]
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    purge: Vec<String>,
    clean_inside: Vec<String>,
    file_patterns: Vec<String>,
    deep_dirs: Vec<String>,
    deep_files: Vec<String>,
}

impl RuleTableBuilder {
    /// Add a directory pattern to purge
    pub fn purge(mut self, pattern: impl Into<String>) -> Self {
        self.purge.push(pattern.into());
        self
    }

    /// Add a directory pattern whose contents are cleaned
    pub fn clean_inside(mut self, pattern: impl Into<String>) -> Self {
        self.clean_inside.push(pattern.into());
        self
    }

    /// Add a file pattern to remove
    pub fn file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_patterns.push(pattern.into());
        self
    }

    /// Add a directory pattern purged only in deep mode
    pub fn deep_dir(mut self, pattern: impl Into<String>) -> Self {
        self.deep_dirs.push(pattern.into());
        self
    }

    /// Add a file pattern removed only in deep mode
    pub fn deep_file(mut self, pattern: impl Into<String>) -> Self {
        self.deep_files.push(pattern.into());
        self
    }

    /// Build the [`RuleTable`], rejecting patterns the glob parser cannot
    /// compile.
    ///
    /// Validation happens on the raw pattern; `~` and `$VAR` references are
    /// plain characters to the parser and are expanded later, at resolution
    /// time. A `**` inside a component (`build**`) is accepted and matches
    /// like `*`.
    pub fn build(self) -> Result<RuleTable> {
        let table = RuleTable {
            purge: self.purge,
            clean_inside: self.clean_inside,
            file_patterns: self.file_patterns,
            deep_dirs: self.deep_dirs,
            deep_files: self.deep_files,
        };

        for category in [
            Category::CleanInside,
            Category::Purge,
            Category::FilePatterns,
            Category::DeepDirs,
            Category::DeepFiles,
        ] {
            for pattern in table.patterns(category) {
                if pattern.trim().is_empty() {
                    return Err(SweepError::ConfigError(format!(
                        "empty pattern in the {category} category"
                    )));
                }
                glob::Pattern::new(&collapse_inner_recursion(pattern)).map_err(|source| {
                    SweepError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
            }
        }

        Ok(table)
    }
}
