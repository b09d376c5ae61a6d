use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::report::{Action, ActionOutcome, OutcomeStatus, SweepReport};
use crate::error::SweepError;
use crate::logging::Logger;

/// Remove a directory tree.
///
/// The caller guarantees `dir` existed and was a directory when it was
/// checked; if it vanished since, that counts as removed.
pub(crate) fn purge_directory(dir: &Path, dry_run: bool, log: &Logger, report: &mut SweepReport) {
    log.info(format!(
        "{} directory: {}",
        if dry_run { "Would remove" } else { "Removing" },
        dir.display()
    ));

    if dry_run {
        report.stats_mut().dirs_removed += 1;
        report.record(ActionOutcome::new(
            Action::Purge,
            dir,
            OutcomeStatus::WouldRemove { entries: 1 },
        ));
        return;
    }

    match missing_ok(fs::remove_dir_all(dir)) {
        Ok(()) => {
            report.stats_mut().dirs_removed += 1;
            report.record(ActionOutcome::new(
                Action::Purge,
                dir,
                OutcomeStatus::Removed { entries: 1 },
            ));
        }
        Err(source) => {
            log.error(format!("Error removing {}: {source}", dir.display()));
            report.record(failed(Action::Purge, dir, dir, source));
        }
    }
}

/// Remove a single file.
///
/// The caller guarantees `file` existed and was a file when it was checked.
pub(crate) fn remove_file(file: &Path, dry_run: bool, log: &Logger, report: &mut SweepReport) {
    log.info(format!(
        "{} file: {}",
        if dry_run { "Would remove" } else { "Removing" },
        file.display()
    ));

    if dry_run {
        report.stats_mut().files_removed += 1;
        report.record(ActionOutcome::new(
            Action::RemoveFile,
            file,
            OutcomeStatus::WouldRemove { entries: 1 },
        ));
        return;
    }

    match missing_ok(fs::remove_file(file)) {
        Ok(()) => {
            report.stats_mut().files_removed += 1;
            report.record(ActionOutcome::new(
                Action::RemoveFile,
                file,
                OutcomeStatus::Removed { entries: 1 },
            ));
        }
        Err(source) => {
            log.error(format!("Error removing {}: {source}", file.display()));
            report.record(failed(Action::RemoveFile, file, file, source));
        }
    }
}

/// Remove every entry inside `dir` while keeping `dir` itself.
///
/// An empty directory is left alone without logging or counting. The first
/// failure stops work on this directory; counters for entries already
/// removed are kept, but `contents_cleaned` is only credited on success.
pub(crate) fn clean_directory_contents(
    dir: &Path,
    dry_run: bool,
    log: &Logger,
    report: &mut SweepReport,
) {
    clean_directory_contents_with(dir, dry_run, log, report, remove_child);
}

/// [`clean_directory_contents`] with the per-child removal step supplied
/// by the caller. Children are visited in file name order.
pub(crate) fn clean_directory_contents_with<F>(
    dir: &Path,
    dry_run: bool,
    log: &Logger,
    report: &mut SweepReport,
    mut remove: F,
) where
    F: FnMut(&Path, bool) -> io::Result<()>,
{
    let entries = match list_children(dir) {
        Ok(entries) => entries,
        Err(err) => {
            let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            let source = io::Error::from(err);
            log.error(format!("Error cleaning {}: {source}", dir.display()));
            report.record(failed(Action::CleanContents, dir, path, source));
            return;
        }
    };

    if entries.is_empty() {
        return;
    }

    log.info(format!(
        "{} contents of: {}",
        if dry_run { "Would clean" } else { "Cleaning" },
        dir.display()
    ));

    let count = entries.len();
    if dry_run {
        report.stats_mut().contents_cleaned += count;
        report.record(ActionOutcome::new(
            Action::CleanContents,
            dir,
            OutcomeStatus::WouldRemove { entries: count },
        ));
        return;
    }

    for child in &entries {
        if let Err(source) = missing_ok(remove(&child.path, child.is_dir)) {
            log.error(format!("Error cleaning {}: {source}", dir.display()));
            report.record(failed(Action::CleanContents, dir, &child.path, source));
            return;
        }

        let stats = report.stats_mut();
        if child.is_dir {
            stats.dirs_removed += 1;
        } else {
            stats.files_removed += 1;
        }
    }

    report.stats_mut().contents_cleaned += count;
    report.record(ActionOutcome::new(
        Action::CleanContents,
        dir,
        OutcomeStatus::Removed { entries: count },
    ));
}

struct Child {
    path: PathBuf,
    /// Real directories only; symlinks are removed as links
    is_dir: bool,
}

fn remove_child(path: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn list_children(dir: &Path) -> std::result::Result<Vec<Child>, walkdir::Error> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map(|entry| Child {
                is_dir: entry.file_type().is_dir(),
                path: entry.into_path(),
            })
        })
        .collect()
}

/// Treat a path that is already gone as successfully removed
fn missing_ok(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn failed(
    action: Action,
    target: &Path,
    offending: impl Into<PathBuf>,
    source: io::Error,
) -> ActionOutcome {
    ActionOutcome::new(
        action,
        target,
        OutcomeStatus::Failed(SweepError::IoError {
            path: offending.into(),
            source,
        }),
    )
}
