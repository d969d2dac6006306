//! Repository scanning: file-tree listings and README discovery.
//!
//! A scan walks the tree depth-first, applies the static exclusion rules
//! from [`crate::exclude`], honors a root-level `.gitignore` via the
//! `ignore` crate's matcher, and yields a sorted, newline-joined listing of
//! relative paths with directories suffixed by `/`. The listing is
//! deterministic for a fixed filesystem snapshot: sorting never depends on
//! readdir order.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::Gitignore;
use thiserror::Error;

use crate::exclude;

/// Errors that can occur while scanning a repository.
///
/// Only root resolution is fatal. Entries that fail to read mid-traversal
/// (permission denied, broken symlinks) are skipped silently; partial
/// visibility is preferred over aborting the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot resolve scan root {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scan a repository root and return its file-tree listing.
///
/// The listing contains one relative path per line, `/`-separated on every
/// platform, sorted in byte order. Directories carry a trailing `/`.
///
/// # Errors
///
/// Returns [`ScanError::Root`] when the root cannot be canonicalized.
pub fn scan(root: &Path) -> Result<String, ScanError> {
    let abs_root = root.canonicalize().map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    // A missing or malformed .gitignore degrades to "match nothing": the
    // matcher is built from whatever lines parsed and the error is dropped.
    let (gitignore, _err) = Gitignore::new(abs_root.join(".gitignore"));

    let mut paths = Vec::new();
    collect(&abs_root, "", &gitignore, &mut paths);
    paths.sort();

    Ok(paths.join("\n"))
}

/// Recursively record surviving entries under `dir`.
///
/// `prefix` is the `/`-joined relative path of `dir` ("" for the root).
/// Exclusion rules and gitignore are both consulted; an entry is recorded
/// only if it survives both. Excluded or ignored directories are pruned,
/// never descended into.
fn collect(dir: &Path, prefix: &str, gitignore: &Gitignore, out: &mut Vec<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        let rel = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        };

        if file_type.is_dir() {
            if exclude::should_skip_dir(name) {
                continue;
            }
            if gitignore.matched(&rel, true).is_ignore() {
                continue;
            }
            out.push(format!("{rel}/"));
            collect(&entry.path(), &rel, gitignore, out);
        } else {
            if exclude::should_skip_file(name) {
                continue;
            }
            if gitignore.matched(&rel, false).is_ignore() {
                continue;
            }
            out.push(rel);
        }
    }
}

/// README candidates, probed in order.
const README_CANDIDATES: &[&str] = &[
    "README.md",
    "README.MD",
    "readme.md",
    "README",
    "README.txt",
    "README.rst",
    "Readme.md",
];

/// Return the content of the first readable README candidate in `root`.
///
/// Content is decoded lossily, so a README with stray non-UTF-8 bytes is
/// still found. Absence is a normal outcome, not an error.
pub fn find_readme(root: &Path) -> Option<String> {
    README_CANDIDATES
        .iter()
        .find_map(|name| fs::read(root.join(name)).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
