//! Implementation of the cache-sweep command.
//!
//! The main entry point is the [`execute`] function, which builds a
//! [`Sweeper`] from the parsed CLI options, runs it, and prints the
//! completion banner.
//!
//! # Example
//!
//! ```no_run
//! use cache_sweep::cli::Cli;
//! use cache_sweep::commands;
//!
//! let cli = Cli::parse_args();
//! if let Err(e) = commands::execute(&cli) {
//!     eprintln!("Error: {e:?}");
//! }
//! ```

use std::path::Path;

use crate::cli::{Cli, normalize_path};
use crate::error::Result;
use crate::logging::Logger;
use crate::sweep::{OutcomeStatus, RuleTable, SweepReport, Sweeper};


const BANNER_WIDTH: usize = 50;

/// Execute the sweep described by the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<SweepReport> {
    execute_with_dir(cli, None)
}

/// Execute the sweep with an explicit working directory.
///
/// A relative `--root` is taken relative to `working_dir` and normalized
/// lexically, so `a/../b` works even when `a` does not exist. Without
/// `--root` the working directory itself is the root.
pub fn execute_with_dir(cli: &Cli, working_dir: Option<&Path>) -> Result<SweepReport> {
    execute_with_rules(cli, working_dir, RuleTable::default())
}

/// Execute the sweep with an explicit working directory and rule table.
pub fn execute_with_rules(
    cli: &Cli,
    working_dir: Option<&Path>,
    rules: RuleTable,
) -> Result<SweepReport> {
    let quiet = cli.global_opts().quiet();
    let verbose = if quiet {
        0
    } else {
        cli.global_opts().verbose()
    };

    let root = match (working_dir, cli.global_opts().root()) {
        (Some(dir), Some(root)) => normalize_path(dir.join(root)),
        (Some(dir), None) => dir.to_path_buf(),
        (None, _) => cli.global_opts().get_root(),
    };

    let log = Logger::new(verbose, quiet);
    log.verbose(
        1,
        format!(
            "Sweeping {}{}",
            root.display(),
            if cli.dry_run() { " (dry run)" } else { "" }
        ),
    );

    let mut sweeper = Sweeper::builder()
        .root(root)
        .rules(rules)
        .dry_run(cli.dry_run())
        .verbose(verbose)
        .quiet(quiet)
        .build()?;

    sweeper.clean(cli.deep());

    for outcome in sweeper.report().failures() {
        if let OutcomeStatus::Failed(err) = outcome.status() {
            let path = err.path().unwrap_or(outcome.path());
            log.verbose(
                1,
                format!("Failed to {} {}: {err}", outcome.action(), path.display()),
            );
        }
    }

    log.info(completion_banner());

    Ok(sweeper.into_report())
}

/// The closing banner printed after the summary
pub fn completion_banner() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "\n{rule}\n{:^width$}\n{rule}",
        "CLEANUP COMPLETED",
        width = BANNER_WIDTH
    )
}
