//! Go source loading and import pruning on tree-sitter.
//!
//! The loader turns every file of a package directory into a
//! [`SourceUnit`]: top-level declarations with byte spans, comment groups,
//! and doc comment attachment. The [`Formatter`] seam is what the splitter
//! runs every output through before it is written.

mod imports;
mod parse;

pub use imports::ImportPruner;
pub use parse::parse_source;

use fsplit_core::{FsplitError, Package, SourceUnit};
use fsplit_scanner::Scanner;
use std::collections::BTreeMap;
use std::path::Path;

/// Normalizes Go source before it is written.
pub trait Formatter {
    /// Return `source` with unused imports removed, or an error if it is not
    /// valid Go. `path` names the file the result is destined for.
    fn format(&self, path: &Path, source: &str) -> Result<String, FsplitError>;
}

/// Create the default formatter (in-process import pruning).
pub fn default_formatter() -> ImportPruner {
    ImportPruner::default()
}

/// Parse every Go file in `dir`, grouped by declared package.
///
/// Any syntax error aborts the whole load.
pub fn load_package_dir(dir: &Path) -> Result<Vec<Package>, FsplitError> {
    let files = Scanner::new(dir).scan()?;

    let mut packages: BTreeMap<String, Vec<SourceUnit>> = BTreeMap::new();
    for file in files {
        let unit = parse_source(&file.path, file.source)?;
        packages.entry(unit.package.clone()).or_default().push(unit);
    }

    Ok(packages
        .into_iter()
        .map(|(name, units)| Package { name, units })
        .collect())
}
