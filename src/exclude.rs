//! Static exclusion rules applied during repository scans.
//!
//! These tables decide which filesystem entries never appear in a scan,
//! regardless of gitignore content: dependency trees, build output, VCS
//! metadata, binary assets, and lockfiles carry no architectural signal.

use std::path::Path;

/// Directory names whose entire subtree is pruned from the scan.
const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    ".env",
    "env",
    ".tox",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    "dist",
    "build",
    ".next",
    ".nuxt",
    ".output",
    ".cache",
    ".tmp",
    ".temp",
    "coverage",
    ".nyc_output",
    ".parcel-cache",
    ".turbo",
    ".vercel",
    ".netlify",
    "target",
    ".gradle",
    ".idea",
    ".vscode",
    ".vs",
    ".DS_Store",
    "Thumbs.db",
    ".svn",
    ".hg",
];

/// Exact file names omitted from the scan.
const EXCLUDED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "Pipfile.lock",
    "composer.lock",
    "Gemfile.lock",
    "Cargo.lock",
    "go.sum",
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    ".prettierrc",
    ".eslintrc",
    ".eslintignore",
    "tsconfig.tsbuildinfo",
];

/// File extensions (without the dot) omitted from the scan.
const EXCLUDED_EXTENSIONS: &[&str] = &[
    "pyc", "pyo", "so", "dll", "dylib", "class", "jar", "war", "ear", "o", "a",
    "lib", "exe", "bin", "jpg", "jpeg", "png", "gif", "bmp", "ico", "svg",
    "webp", "mp3", "mp4", "wav", "avi", "mov", "webm", "flv", "woff", "woff2",
    "ttf", "eot", "otf", "pdf", "zip", "tar", "gz", "rar", "7z", "lock", "map",
];

/// Minified-asset suffixes not expressible as a plain extension.
const MINIFIED_SUFFIXES: &[&str] = &[".min.js", ".min.css"];

/// Whether a directory with this name should be pruned entirely.
///
/// Matching is case-sensitive against the final path segment.
pub fn should_skip_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Whether a file with this name should be omitted from the scan.
///
/// Rules are checked in order: exact file name, extension, minified suffix.
pub fn should_skip_file(name: &str) -> bool {
    if EXCLUDED_FILES.contains(&name) {
        return true;
    }

    if let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) {
        if EXCLUDED_EXTENSIONS.contains(&ext) {
            return true;
        }
    }

    MINIFIED_SUFFIXES.iter().any(|s| name.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_dir_names() {
        assert!(should_skip_dir("node_modules"));
        assert!(should_skip_dir(".git"));
        assert!(should_skip_dir("target"));
        assert!(!should_skip_dir("src"));
        assert!(!should_skip_dir("internal"));
    }

    #[test]
    fn test_skip_dir_is_case_sensitive() {
        assert!(!should_skip_dir("NODE_MODULES"));
        assert!(!should_skip_dir("Target"));
    }

    #[test]
    fn test_skip_file_by_name() {
        assert!(should_skip_file("yarn.lock"));
        assert!(should_skip_file("package-lock.json"));
        assert!(should_skip_file(".gitignore"));
        assert!(!should_skip_file("package.json"));
    }

    #[test]
    fn test_skip_file_by_extension() {
        assert!(should_skip_file("logo.png"));
        assert!(should_skip_file("lib.so"));
        assert!(should_skip_file("bundle.js.map"));
        assert!(!should_skip_file("main.rs"));
        assert!(!should_skip_file("index.js"));
    }

    #[test]
    fn test_skip_minified_assets() {
        // .js alone is not excluded, but the minified suffix is
        assert!(should_skip_file("app.min.js"));
        assert!(should_skip_file("styles.min.css"));
        assert!(!should_skip_file("app.js"));
        assert!(!should_skip_file("styles.css"));
    }

    #[test]
    fn test_file_without_extension() {
        assert!(!should_skip_file("Makefile"));
        assert!(!should_skip_file("Dockerfile"));
    }
}
