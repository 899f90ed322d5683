//! Splits every function and method of a Go package into its own file.
//!
//! A run has two passes over the package directory. The first loads the
//! package, extracts each function of every eligible file together with the
//! file's header and imports, and writes one `<stem>.<recv|_>.<name>.fsplit.go`
//! file per function. The second loads the directory again and rewrites each
//! eligible original without its functions.
//!
//! Besides the test-package, generated-code and single-function rules,
//! files named `*_test.go` are never split, whatever package they declare.
//! The Go toolchain only runs tests declared in such files.
//!
//! Nothing is staged or rolled back: an interrupted or failed run can leave
//! functions present in both an original and its generated file. Running
//! fsplit again over the same directory converges, since generated files hold
//! a single function and are never split further.

pub mod eligibility;
pub mod extract;
pub mod materialize;
pub mod naming;
pub mod rewrite;

pub use eligibility::{exclusion, is_eligible};
pub use extract::{Extractor, extract};
pub use materialize::materialize;
pub use naming::output_name;
pub use rewrite::{rewrite, strip_functions};

use fsplit_core::{FsplitError, SkippedFile, SplitReport};
use fsplit_treesit::{Formatter, default_formatter, load_package_dir};
use std::path::Path;

/// Runs both passes over one package directory.
pub struct Splitter<'a> {
    dir: &'a Path,
    formatter: Box<dyn Formatter + 'a>,
}

impl<'a> Splitter<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self {
            dir,
            formatter: Box::new(default_formatter()),
        }
    }

    /// Replace the formatter every output goes through.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'a) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Split the package. Concurrent runs on the same directory are unsafe.
    pub fn run(&self) -> Result<SplitReport, FsplitError> {
        let mut report = SplitReport::new(self.dir);

        let extracted = {
            let packages = load_package_dir(self.dir)?;
            let mut extractor = Extractor::new();
            let mut extracted = Vec::new();
            for unit in packages.iter().flat_map(|p| &p.units) {
                if let Some(reason) = exclusion(unit) {
                    tracing::debug!(path = %unit.path.display(), %reason, "skipping file");
                    report.skipped.push(SkippedFile {
                        path: unit.path.clone(),
                        reason,
                    });
                    continue;
                }
                extracted.extend(extractor.extract(unit));
            }
            extracted
        };
        report.generated = materialize(&extracted, self.formatter.as_ref())?;

        // Second, independent parse; also sees the files just written.
        let packages = load_package_dir(self.dir)?;
        let mut first_error = None;
        for unit in packages.iter().flat_map(|p| &p.units) {
            if !is_eligible(unit) {
                continue;
            }
            match rewrite(unit, self.formatter.as_ref()) {
                Ok(()) => {
                    tracing::info!(path = %unit.path.display(), "rewrote original");
                    report.rewritten.push(unit.path.clone());
                }
                Err(err) => {
                    tracing::warn!(path = %unit.path.display(), error = %err, "rewrite failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }
}

/// Split the package in `dir` with the default formatter.
pub fn split_package(dir: &Path) -> Result<SplitReport, FsplitError> {
    Splitter::new(dir).run()
}
