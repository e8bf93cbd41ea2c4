//! Verbatim file copy from the source tree to the output tree.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::DirSettings;

/// Errors while applying a passthrough-copy rule.
#[derive(Debug, Error)]
pub enum PassthroughError {
    #[error("passthrough source not found: {path}")]
    NotFound { path: PathBuf },

    #[error("passthrough source is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("directory walk failed: {source}")]
    Walk {
        #[source]
        source: walkdir::Error,
    },
}

/// A rule copying every file under `source` byte-for-byte into the output
/// tree, preserving relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughCopy {
    source: PathBuf,
}

impl PassthroughCopy {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The source subdirectory, relative to the project root.
    pub fn source(&self) -> &PathBuf {
        &self.source
    }

    /// Copies the rule's files under `project_root` into the output tree.
    ///
    /// The source path is taken relative to the project root; the input-dir
    /// prefix is stripped so `src/assets` lands at `_site/assets`. Returns
    /// the number of files copied.
    pub fn apply(&self, project_root: &Path, dirs: &DirSettings) -> Result<usize, PassthroughError> {
        let source_root = project_root.join(&self.source);
        if !source_root.exists() {
            return Err(PassthroughError::NotFound { path: source_root });
        }
        if !source_root.is_dir() {
            return Err(PassthroughError::NotADirectory { path: source_root });
        }

        let rel = self
            .source
            .strip_prefix(&dirs.input)
            .unwrap_or(self.source.as_path());
        let dest_root = project_root.join(&dirs.output).join(rel);

        let mut copied = 0;
        for entry in WalkDir::new(&source_root) {
            let entry = entry.map_err(|e| PassthroughError::Walk { source: e })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel_path = entry.path().strip_prefix(&source_root).unwrap();
            let dest = dest_root.join(rel_path);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PassthroughError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            std::fs::copy(entry.path(), &dest).map_err(|e| PassthroughError::Io {
                path: dest.clone(),
                source: e,
            })?;
            copied += 1;
        }

        Ok(copied)
    }
}
