//! # cache-sweep CLI
//!
//! Cleans a workspace of caches and build leftovers: Python bytecode caches,
//! packaging output, editor and OS litter, and on request logs and local
//! service data.
//!
//! ## Usage
//!
//! ```bash
//! # See what would be removed
//! cache-sweep --dry-run
//!
//! # Remove it
//! cache-sweep
//!
//! # Also remove logs, notebook checkpoints and data/postgres, data/redis
//! cache-sweep --deep
//! ```
//!
//! ## Environment Variables
//!
//! - `CACHE_SWEEP_ROOT`: Directory relative patterns are matched under
//! - `CACHE_SWEEP_DRY_RUN`: Simulate without removing anything
//! - `CACHE_SWEEP_DEEP`: Include the deep-clean rules
//! - `CACHE_SWEEP_VERBOSE`: Enable verbose output
//! - `CACHE_SWEEP_QUIET`: Silence all output except errors

use std::io::IsTerminal;

use cache_sweep::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    // Plain output for CI logs and pipes
    let interactive = std::io::stderr().is_terminal();
    miette::set_hook(Box::new(move |_| {
        let (theme, context_lines) = if interactive {
            (miette::GraphicalTheme::unicode_nocolor(), 3)
        } else {
            (miette::GraphicalTheme::none(), 0)
        };
        Box::new(
            miette::GraphicalReportHandler::new()
                .with_theme(theme)
                .with_context_lines(context_lines),
        )
    }))?;

    let cli = Cli::parse_args();

    // Per-path failures are already reported; only startup errors end up here
    cache_sweep::commands::execute(&cli)?;

    Ok(())
}
