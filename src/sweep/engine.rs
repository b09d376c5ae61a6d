use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::actions;
use super::report::{Action, ActionOutcome, OutcomeStatus, SweepReport, SweepStats};
use super::resolve::resolve_patterns;
use super::rules::{Category, RuleTable};
use crate::error::{Result, SweepError};
use crate::logging::Logger;

/// The cleanup engine.
///
/// A `Sweeper` owns its rule table, execution mode and report. Statistics
/// accumulate across calls to [`clean`](Sweeper::clean) for the lifetime of
/// the instance.
#[derive(Debug)]
pub struct Sweeper {
    /// Rules to apply
    rules: RuleTable,
    /// Directory relative patterns are anchored at
    root: PathBuf,
    /// Report-only mode
    dry_run: bool,
    log: Logger,
    report: SweepReport,
}

impl Sweeper {
    /// Creates a new builder for [`Sweeper`]
    pub fn builder() -> SweeperBuilder {
        SweeperBuilder::default()
    }

    /// Get the rule table
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Get the root directory for relative patterns
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if dry run mode is enabled
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Current counters
    pub fn stats(&self) -> SweepStats {
        self.report.stats()
    }

    /// Counters and outcomes recorded so far
    pub fn report(&self) -> &SweepReport {
        &self.report
    }

    /// Consume the engine, keeping its report
    pub fn into_report(self) -> SweepReport {
        self.report
    }

    /// Main entry point: apply every category in order and print the
    /// summary.
    ///
    /// 1. `clean-inside`: empty each existing directory; report the rest as
    ///    not found
    /// 2. `purge`: remove each existing directory; skip the rest silently
    /// 3. `file-patterns`: remove each existing file
    /// 4. with `deep`: purge deep-clean directories, then remove deep-clean
    ///    files
    ///
    /// Each category is resolved just before it runs, so it sees what the
    /// previous ones left behind. Per-path failures are logged and recorded
    /// in the report; they never stop the run.
    pub fn clean(&mut self, deep: bool) -> &SweepReport {
        for dir in self.resolve(Category::CleanInside) {
            if dir.is_dir() {
                self.clean_directory_contents(&dir);
            } else {
                self.log
                    .info(format!("Directory not found: {} (skipping)", dir.display()));
                self.report.record(ActionOutcome::new(
                    Action::CleanContents,
                    dir,
                    OutcomeStatus::NotFound,
                ));
            }
        }

        self.purge_matches(Category::Purge);
        self.remove_matches(Category::FilePatterns);

        if deep {
            self.purge_matches(Category::DeepDirs);
            self.remove_matches(Category::DeepFiles);
        }

        self.log.info(self.report.stats().summary());

        &self.report
    }

    /// Resolve the patterns of one category against this engine's root
    pub fn resolve_category(&self, category: Category) -> Result<BTreeSet<PathBuf>> {
        resolve_patterns(self.rules.patterns(category), &self.root)
    }

    /// Remove a directory and everything beneath it
    pub fn purge_directory(&mut self, dir: &Path) {
        actions::purge_directory(dir, self.dry_run, &self.log, &mut self.report);
    }

    /// Remove a single file
    pub fn remove_file(&mut self, file: &Path) {
        actions::remove_file(file, self.dry_run, &self.log, &mut self.report);
    }

    /// Remove everything inside a directory, keeping the directory
    pub fn clean_directory_contents(&mut self, dir: &Path) {
        actions::clean_directory_contents(dir, self.dry_run, &self.log, &mut self.report);
    }

    fn purge_matches(&mut self, category: Category) {
        for dir in self.resolve(category) {
            if dir.is_dir() {
                self.purge_directory(&dir);
            }
        }
    }

    fn remove_matches(&mut self, category: Category) {
        for file in self.resolve(category) {
            if file.is_file() {
                self.remove_file(&file);
            }
        }
    }

    /// Resolve a category, turning an unusable pattern into a recorded
    /// failure and an empty match set.
    fn resolve(&mut self, category: Category) -> BTreeSet<PathBuf> {
        match self.resolve_category(category) {
            Ok(paths) => {
                self.log.verbose(
                    1,
                    format!("Resolved {} path(s) for {category}", paths.len()),
                );
                for path in &paths {
                    self.log.verbose(2, format!("  {}", path.display()));
                }
                paths
            }
            Err(err) => {
                let pattern = match &err {
                    SweepError::InvalidPattern { pattern, .. } => pattern.clone(),
                    other => other.to_string(),
                };
                self.log
                    .error(format!("Error resolving {category} patterns: {err}"));
                self.report.record(ActionOutcome::new(
                    category_action(category),
                    pattern,
                    OutcomeStatus::Failed(err),
                ));
                BTreeSet::new()
            }
        }
    }
}

fn category_action(category: Category) -> Action {
    match category {
        Category::CleanInside => Action::CleanContents,
        Category::Purge | Category::DeepDirs => Action::Purge,
        Category::FilePatterns | Category::DeepFiles => Action::RemoveFile,
    }
}

/// Builder for [`Sweeper`]
#[derive(Debug, Default)]
pub struct SweeperBuilder {
    rules: Option<RuleTable>,
    root: Option<PathBuf>,
    dry_run: bool,
    verbose: u8,
    quiet: bool,
}

impl SweeperBuilder {
    /// Set the rule table (defaults to [`RuleTable::default`])
    pub fn rules(mut self, rules: RuleTable) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the directory relative patterns are anchored at (defaults to the
    /// current directory)
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Enable dry run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Set the verbosity level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the [`Sweeper`].
    ///
    /// The root is canonicalized so resolved paths never contain symlinked
    /// parents; it must exist and be a directory.
    pub fn build(self) -> Result<Sweeper> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().map_err(|source| SweepError::IoError {
                path: PathBuf::from("."),
                source,
            })?,
        };

        let root = root.canonicalize().map_err(|source| SweepError::IoError {
            path: root.clone(),
            source,
        })?;

        if !root.is_dir() {
            return Err(SweepError::ConfigError(format!(
                "root '{}' is not a directory",
                root.display()
            )));
        }

        Ok(Sweeper {
            rules: self.rules.unwrap_or_default(),
            root,
            dry_run: self.dry_run,
            log: Logger::new(self.verbose, self.quiet),
            report: SweepReport::default(),
        })
    }
}
