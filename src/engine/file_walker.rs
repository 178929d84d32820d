#![forbid(unsafe_code)]

//! Go source discovery with gitignore support
//!
//! Files are recognized as Go using the ignore crate's ripgrep type
//! definitions. Exclude globs are matched against paths relative to the walk
//! root, so `vendor/**` means the same thing wherever the tool is run from.

use crate::error::LoadError;
use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use ignore::types::{Types, TypesBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const GO_TYPE: &str = "go";

/// Matches Go source files by name
#[derive(Debug, Clone)]
pub struct GoFileMatcher {
    types: Types,
}

impl GoFileMatcher {
    pub fn new() -> Result<Self, LoadError> {
        let mut builder = TypesBuilder::new();
        builder.add_defaults();
        builder.select(GO_TYPE);
        let types = builder.build().map_err(LoadError::Walk)?;
        Ok(Self { types })
    }

    pub fn is_go(&self, path: &Path) -> bool {
        self.types.matched(path, false).is_whitelist()
    }
}

/// Iterator source over the Go files below one root
pub struct FileWalker {
    root: PathBuf,
    walker: ignore::Walk,
    exclude_set: GlobSet,
    matcher: GoFileMatcher,
}

impl FileWalker {
    /// Creates a walker over `root`
    ///
    /// `.git` directories are always excluded in addition to `exclude`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidGlob` if an exclude pattern does not compile.
    pub fn new(root: &Path, exclude: &[GlobPattern]) -> Result<Self, LoadError> {
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .build();

        let mut patterns = Vec::from(exclude);
        patterns.push(GlobPattern::new("**/.git/**"));

        Ok(Self {
            root: root.to_path_buf(),
            walker,
            exclude_set: build_globset(&patterns)?,
            matcher: GoFileMatcher::new()?,
        })
    }

    /// Walks the tree, yielding every Go file that is not excluded
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, LoadError>> {
        let root = self.root;
        let exclude_set = self.exclude_set;
        let matcher = self.matcher;

        self.walker.filter_map(move |result| match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return None;
                }
                let path = entry.path();
                let relative = path.strip_prefix(&root).unwrap_or(path);
                if exclude_set.is_match(relative) || exclude_set.is_match(path) {
                    debug!("Excluded {}", path.display());
                    return None;
                }
                if !matcher.is_go(path) {
                    return None;
                }
                Some(Ok(path.to_path_buf()))
            }
            Err(e) => Some(Err(LoadError::Walk(e))),
        })
    }
}

/// Collects the Go files named by `paths`, sorted and deduplicated
///
/// Directories are walked; files are taken as given if they are Go files.
///
/// # Errors
///
/// A path that does not exist is reported as `LoadError::Read`.
pub fn collect_go_files(paths: &[PathBuf], exclude: &[GlobPattern]) -> Result<Vec<PathBuf>, LoadError> {
    let matcher = GoFileMatcher::new()?;
    let mut files = BTreeSet::new();

    for path in paths {
        if path.is_dir() {
            for file in FileWalker::new(path, exclude)?.walk() {
                files.insert(file?);
            }
        } else if path.is_file() {
            if matcher.is_go(path) {
                files.insert(path.clone());
            }
        } else {
            return Err(LoadError::Read {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
    }

    debug!("Discovered {} Go file(s)", files.len());
    Ok(files.into_iter().collect())
}

fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, LoadError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern.as_str()).map_err(|source| LoadError::InvalidGlob {
            pattern: pattern.as_str().to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| LoadError::InvalidGlob {
        pattern: "<globset>".to_string(),
        source,
    })
}
