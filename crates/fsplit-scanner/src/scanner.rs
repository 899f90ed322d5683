use fsplit_core::{FsplitError, SOURCE_EXTENSION};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// A source file and its contents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
}

/// Lists the Go source files directly inside a package directory.
pub struct Scanner<'a> {
    dir: &'a Path,
}

impl<'a> Scanner<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    /// Read every `.go` file in the directory, sorted by path.
    ///
    /// Subdirectories belong to other packages and are not visited. Ignore
    /// files are not consulted: every source of the package is part of it.
    pub fn scan(&self) -> Result<Vec<SourceFile>, FsplitError> {
        if !self.dir.is_dir() {
            return Err(FsplitError::read(self.dir, "not a directory"));
        }

        let walker = WalkBuilder::new(self.dir)
            .standard_filters(false)
            .max_depth(Some(1))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| FsplitError::read(self.dir, e))?;

            // The root itself
            if entry.depth() == 0 {
                continue;
            }

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }

            let source = fs::read_to_string(path).map_err(|e| FsplitError::read(path, e))?;
            files.push(SourceFile {
                path: path.to_path_buf(),
                source,
            });
        }

        // Sort by path for deterministic output
        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(dir = %self.dir.display(), files = files.len(), "scanned package");
        Ok(files)
    }
}
