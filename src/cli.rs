//! Command-line interface definitions for cache-sweep.
//!
//! This module defines the CLI structure using clap. The main entry point is
//! the [`Cli`] struct. Every flag can also be set through a `CACHE_SWEEP_*`
//! environment variable.
//!
//! # Example
//!
//! ```no_run
//! use cache_sweep::cli::Cli;
//!
//! let cli = Cli::parse_args();
//!
//! if cli.dry_run() {
//!     println!("Simulating cleanup in {}", cli.global_opts().get_root().display());
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

/// Main command-line interface for cache-sweep.
#[derive(Debug, Parser)]
#[command(
    name = "cache-sweep",
    bin_name = "cache-sweep",
    author,
    version,
    about = "Clean workspace caches and build leftovers",
    long_about = "Clean workspace caches and build leftovers.\n\nDirectories matching the purge \
                  rules are deleted, directories matching the clean-inside rules are emptied, \
                  and files matching the file rules are deleted. Use --dry-run to see what \
                  would happen first."
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    /// Show what would be removed without removing anything
    #[arg(long, env = "CACHE_SWEEP_DRY_RUN")]
    dry_run: bool,

    /// Also remove logs, notebook checkpoints and local service data
    #[arg(long, env = "CACHE_SWEEP_DEEP")]
    deep: bool,
}

/// Options that control where cache-sweep looks and how much it says.
#[derive(Debug, Parser)]
pub struct GlobalOpts {
    /// Directory that relative patterns are matched under (defaults to the
    /// current directory)
    #[arg(long, env = "CACHE_SWEEP_ROOT")]
    root: Option<PathBuf>,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "CACHE_SWEEP_VERBOSE")]
    verbose: u8,

    /// Silence everything except errors
    #[arg(short, long, conflicts_with = "verbose", env = "CACHE_SWEEP_QUIET")]
    quiet: bool,
}

impl GlobalOpts {
    /// Create a new builder for constructing `GlobalOpts` programmatically.
    pub fn builder() -> GlobalOptsBuilder {
        GlobalOptsBuilder::default()
    }

    /// Get the absolute root directory (the current directory when none was
    /// given)
    pub fn get_root(&self) -> PathBuf {
        normalize_path(self.root().unwrap_or_else(|| Path::new(".")))
    }

    /// Get the root option as given
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Builder for constructing `GlobalOpts` programmatically.
#[derive(Default)]
pub struct GlobalOptsBuilder {
    root: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
}

impl GlobalOptsBuilder {
    /// Set the root directory.
    pub fn root(mut self, root: Option<impl Into<PathBuf>>) -> Self {
        self.root = root.map(|r| r.into());
        self
    }

    /// Set the verbosity level (0 = normal, 1+ = verbose).
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the `GlobalOpts` instance with the configured values.
    pub fn build(self) -> GlobalOpts {
        GlobalOpts {
            root: self.root,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

impl Cli {
    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Check if dry run mode is enabled
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Check if the deep-clean rules should run
    pub fn deep(&self) -> bool {
        self.deep
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    root: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
    dry_run: bool,
    deep: bool,
}

impl CliBuilder {
    /// Set the root directory
    pub fn root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root = Some(dir.into());
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Enable dry run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enable the deep-clean rules
    pub fn deep(mut self, enabled: bool) -> Self {
        self.deep = enabled;
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Cli {
        Cli {
            global_opts: GlobalOpts::builder()
                .root(self.root)
                .verbose(self.verbose)
                .quiet(self.quiet)
                .build(),
            dry_run: self.dry_run,
            deep: self.deep,
        }
    }
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// This function:
/// - Converts relative paths to absolute using the current directory
/// - Removes `.` and `..` components where possible
/// - Does NOT resolve symlinks (preserves user intent)
/// - Does NOT require the path to exist
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        use std::path::Component;
        match component {
            Component::ParentDir => {
                // Step back over a normal component; never above the root
                match components.last() {
                    Some(Component::Normal(_)) => {
                        components.pop();
                    }
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => components.push(component),
                }
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    components.into_iter().collect()
}
