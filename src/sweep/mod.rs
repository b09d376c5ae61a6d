//! Rule-driven cleanup of caches and build leftovers.
//!
//! This module resolves a [`RuleTable`] of glob patterns into concrete
//! filesystem actions and applies them:
//! - `clean-inside`: empty matched directories but keep them
//! - `purge`: delete matched directories entirely
//! - `file-patterns`: delete matched files
//! - `deep-clean`: extra directory and file patterns, applied on request
//!
//! # Features
//!
//! - Home (`~`) and environment variable (`$VAR`, `${VAR}`) expansion
//! - Recursive `**` matching for relative patterns
//! - Dry-run mode that reports and counts without touching the filesystem
//! - Per-path failures recorded as typed outcomes instead of aborting
//!
//! # Example
//!
//! ```no_run
//! use cache_sweep::sweep::{RuleTable, Sweeper};
//!
//! let rules = RuleTable::builder()
//!     .purge("**/__pycache__")
//!     .file_pattern("**/*.pyc")
//!     .build()?;
//!
//! let mut sweeper = Sweeper::builder()
//!     .root(".")
//!     .rules(rules)
//!     .dry_run(true)
//!     .build()?;
//!
//! let report = sweeper.clean(false);
//! println!("Would remove {} directories", report.stats().dirs_removed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod actions;
mod engine;
mod report;
mod resolve;
pub mod rules;

pub use engine::{Sweeper, SweeperBuilder};
pub use report::{Action, ActionOutcome, OutcomeStatus, SweepReport, SweepStats};
pub use resolve::{expand_pattern, resolve_patterns};
pub use rules::{Category, RuleTable, RuleTableBuilder};
