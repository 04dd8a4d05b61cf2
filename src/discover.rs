//! Swift source discovery.
//!
//! Walks an analysis root, keeps `.swift` files, and skips the directory
//! noise every Swift checkout drags along (build products, dependency
//! checkouts, hidden directories). User excludes match against paths
//! relative to the root.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;
use walkdir::WalkDir;

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &[
    ".build",
    "DerivedData",
    "Pods",
    "Carthage",
    "node_modules",
    "vendor",
];

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("failed to walk {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] globset::Error),
}

/// Compile user exclude patterns into one matcher.
pub fn build_excludes(patterns: &[String]) -> Result<GlobSet, DiscoverError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Collect the Swift files under `root`, sorted by path.
///
/// A root that is itself a file is returned as-is, so `swiftmap analyze
/// Sources/Main.swift` works without special-casing at the call site.
pub fn collect_swift_files(root: &Path, excludes: &GlobSet) -> Result<Vec<PathBuf>, DiscoverError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() && (name.starts_with('.') || SKIP_DIRS.contains(&&*name)) {
                return false;
            }
            true
        })
    {
        let entry = entry.map_err(|e| DiscoverError::Walk {
            root: root.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "swift" {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if excludes.is_match(rel) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
