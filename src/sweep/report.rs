use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SweepError;

/// Running counters for one [`Sweeper`](super::Sweeper).
///
/// Counters only ever grow; a fresh engine starts a fresh set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Directories removed, by purging or while cleaning contents
    pub dirs_removed: usize,
    /// Files removed, directly or while cleaning contents
    pub files_removed: usize,
    /// Entries removed from directories that were themselves kept
    pub contents_cleaned: usize,
}

impl SweepStats {
    /// The summary block printed at the end of a run
    pub fn summary(&self) -> String {
        format!(
            "\nCleanup Summary:\n• Directories removed: {}\n• Files removed: {}\n• Directories \
             cleaned: {}",
            self.dirs_removed, self.files_removed, self.contents_cleaned
        )
    }
}

/// What the engine did, or tried to do, with a path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Remove a directory tree
    Purge,
    /// Remove every entry inside a directory, keeping the directory
    CleanContents,
    /// Remove a single file
    RemoveFile,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Purge => f.write_str("purge"),
            Action::CleanContents => f.write_str("clean contents"),
            Action::RemoveFile => f.write_str("remove file"),
        }
    }
}

/// How an action ended
#[derive(Debug)]
pub enum OutcomeStatus {
    /// The filesystem was changed; `entries` is how many entries went away
    /// (1 for purges and file removals)
    Removed { entries: usize },
    /// Dry run: the action was reported and counted but not performed
    WouldRemove { entries: usize },
    /// The matched directory did not exist when its turn came
    NotFound,
    /// The action failed; nothing after the failing step was attempted
    Failed(SweepError),
}

/// The typed result of one action on one path
#[derive(Debug)]
pub struct ActionOutcome {
    action: Action,
    path: PathBuf,
    status: OutcomeStatus,
}

impl ActionOutcome {
    pub(crate) fn new(action: Action, path: impl Into<PathBuf>, status: OutcomeStatus) -> Self {
        Self {
            action,
            path: path.into(),
            status,
        }
    }

    /// The action attempted
    pub fn action(&self) -> Action {
        self.action
    }

    /// The path the action was dispatched for
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the action ended
    pub fn status(&self) -> &OutcomeStatus {
        &self.status
    }

    /// Whether the action failed
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Statistics plus every outcome recorded by an engine
#[derive(Debug, Default)]
pub struct SweepReport {
    stats: SweepStats,
    outcomes: Vec<ActionOutcome>,
}

impl SweepReport {
    /// Current counters
    pub fn stats(&self) -> SweepStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut SweepStats {
        &mut self.stats
    }

    /// Every outcome, in the order the actions ran
    pub fn outcomes(&self) -> &[ActionOutcome] {
        &self.outcomes
    }

    /// Outcomes that ended in failure
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    /// Whether every recorded action succeeded (or was skipped)
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    pub(crate) fn record(&mut self, outcome: ActionOutcome) {
        self.outcomes.push(outcome);
    }
}
