//! # cache-sweep
//!
//! A small developer tool that cleans a workspace of caches and build
//! leftovers according to a declarative table of glob rules.
//!
//! ## Overview
//!
//! Rules come in four categories:
//!
//! - **purge**: directories deleted entirely (`**/__pycache__`, `build`, ...)
//! - **clean-inside**: directories emptied but kept (`/tmp/staging/*`)
//! - **file-patterns**: individual files deleted (`**/*.pyc`, ...)
//! - **deep-clean**: extra directories and files handled only with `--deep`
//!
//! Patterns may use `~`, `$VAR`/`${VAR}`, and glob wildcards including a
//! recursive `**`. Every action can be simulated with a dry run, and every
//! per-path failure is recorded instead of stopping the run.
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Runs a sweep from parsed CLI options
//! - [`error`]: Error types and handling with thiserror + miette
//! - [`sweep`]: Rule table, pattern resolution, actions and the engine
//!
//! ## Library Usage
//!
//! ```no_run
//! use cache_sweep::cli::Cli;
//! use cache_sweep::commands;
//!
//! let cli = Cli::builder().root(".").dry_run(true).build();
//! let report = commands::execute(&cli)?;
//! println!("{} files would be removed", report.stats().files_removed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI

pub mod cli;
pub mod commands;
pub mod error;
pub mod sweep;

mod logging;
