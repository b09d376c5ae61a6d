//! Pattern resolution: home and environment expansion followed by globbing.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use glob::MatchOptions;
use regex::{Captures, Regex};

use crate::error::{Result, SweepError};

/// Hidden entries are filtered after matching by [`is_visible_match`].
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Resolve `patterns` into a deduplicated set of absolute paths, expanding
/// `~` and environment variables from the current process.
///
/// Relative patterns are anchored at `root`. Patterns without matches
/// contribute nothing; an empty result is not an error.
pub fn resolve_patterns<S: AsRef<str>>(patterns: &[S], root: &Path) -> Result<BTreeSet<PathBuf>> {
    let home = home::home_dir();
    resolve_patterns_with(patterns, root, |pattern| {
        expand_pattern(pattern, home.as_deref(), |name| std::env::var(name).ok())
    })
}

/// Same as [`resolve_patterns`] with a caller-supplied expansion step.
pub(crate) fn resolve_patterns_with<S, F>(
    patterns: &[S],
    root: &Path,
    expand: F,
) -> Result<BTreeSet<PathBuf>>
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let mut resolved = BTreeSet::new();

    for pattern in patterns {
        let expanded = collapse_inner_recursion(&expand(pattern.as_ref()));
        let glob_pattern = to_glob_pattern(&expanded, root);

        let paths = glob::glob_with(&glob_pattern, MATCH_OPTIONS).map_err(|source| {
            SweepError::InvalidPattern {
                pattern: expanded.clone(),
                source,
            }
        })?;

        let dotted = dotted_components(&expanded);
        let base = (!Path::new(&expanded).is_absolute()).then_some(root);

        // Unreadable directories are skipped rather than reported
        resolved.extend(
            paths
                .filter_map(|entry| entry.ok())
                .filter(|path| is_visible_match(path, base, &dotted))
                .map(resolve_path),
        );
    }

    Ok(resolved)
}

/// Turn an expanded pattern into the string handed to the glob walker.
///
/// Absolute patterns with a wildcard are matched one level at a time, so
/// `**` degrades to `*`. Everything else is matched recursively, with
/// relative patterns rooted at `root`.
fn to_glob_pattern(expanded: &str, root: &Path) -> String {
    if Path::new(expanded).is_absolute() {
        if expanded.contains('*') {
            let mut single_level = expanded.to_string();
            while single_level.contains("**") {
                single_level = single_level.replace("**", "*");
            }
            return single_level;
        }
        return expanded.to_string();
    }

    let mut relative = expanded;
    while let Some(rest) = relative.strip_prefix("./") {
        relative = rest;
    }

    let root = glob::Pattern::escape(&root.to_string_lossy());
    let root = root.trim_end_matches('/');
    format!("{root}/{relative}")
}

/// Rewrite `**` that shares a component with other text (`build**`) as a
/// plain `*`. Only a `**` standing alone is recursive.
pub(crate) fn collapse_inner_recursion(pattern: &str) -> String {
    if !pattern.contains("**") {
        return pattern.to_string();
    }

    pattern
        .split('/')
        .map(|component| {
            if component == "**" {
                return component.to_string();
            }
            let mut collapsed = component.to_string();
            while collapsed.contains("**") {
                collapsed = collapsed.replace("**", "*");
            }
            collapsed
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Components of `pattern` that name hidden entries, compiled for matching
fn dotted_components(pattern: &str) -> Vec<glob::Pattern> {
    pattern
        .split('/')
        .filter(|component| component.starts_with('.') && *component != "." && *component != "..")
        .filter_map(|component| glob::Pattern::new(component).ok())
        .collect()
}

/// Wildcards never match a hidden entry: every component of `path` that
/// starts with `.` must be matched by a pattern component that also starts
/// with `.`. Components of `base` (the root for relative patterns) are not
/// checked.
fn is_visible_match(path: &Path, base: Option<&Path>, dotted: &[glob::Pattern]) -> bool {
    let checked = base
        .and_then(|base| path.strip_prefix(base).ok())
        .unwrap_or(path);

    checked.components().all(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            !name.starts_with('.')
                || dotted
                    .iter()
                    .any(|pattern| pattern.matches_with(&name, MATCH_OPTIONS))
        }
        _ => true,
    })
}

/// Make a match absolute and free of symlinks in its parent directories.
///
/// The final component is kept as matched, so a symlink that matches a rule
/// is acted on as the link itself and never through its target.
fn resolve_path(path: PathBuf) -> PathBuf {
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|dir| dir.join(name)),
        _ => path.canonicalize().ok(),
    };
    resolved.unwrap_or(path)
}

/// Expand environment variables, then a leading `~`, in `pattern`.
///
/// `$NAME` and `${NAME}` are replaced with the value returned by `lookup`;
/// unknown variables are left untouched. `~` and `~/...` are replaced with
/// `home` when it is known. `~user` forms are left untouched.
pub fn expand_pattern<F>(pattern: &str, home: Option<&Path>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let with_vars = expand_vars(pattern, lookup);
    expand_home(&with_vars, home)
}

fn expand_vars<F>(pattern: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !pattern.contains('$') {
        return pattern.to_string();
    }

    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    let re = VAR_RE.get_or_init(|| {
        Regex::new(r"\$([A-Za-z0-9_]+|\{[^}]*\})").expect("environment variable regex should compile")
    });

    re.replace_all(pattern, |caps: &Captures<'_>| {
        let name = caps[1].trim_start_matches('{').trim_end_matches('}');
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

fn expand_home(pattern: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return pattern.to_string();
    };

    if pattern == "~" {
        return home.to_string_lossy().into_owned();
    }

    match pattern.strip_prefix("~/") {
        Some(rest) => home.join(rest).to_string_lossy().into_owned(),
        None => pattern.to_string(),
    }
}
