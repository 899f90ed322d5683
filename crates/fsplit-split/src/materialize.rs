use fsplit_core::{ExtractedFunction, FsplitError};
use fsplit_treesit::Formatter;
use std::fs;
use std::path::PathBuf;

/// Write one file per extracted function, overwriting existing files.
///
/// Stops at the first failure; files already written stay on disk.
pub fn materialize(
    funcs: &[ExtractedFunction],
    formatter: &dyn Formatter,
) -> Result<Vec<PathBuf>, FsplitError> {
    let mut written = Vec::with_capacity(funcs.len());
    for func in funcs {
        let path = &func.file_name;
        let formatted = formatter
            .format(path, &func.compose())
            .map_err(|e| FsplitError::write(path, format!("preparing output: {e}")))?;
        fs::write(path, formatted).map_err(|e| FsplitError::write(path, e))?;

        tracing::info!(path = %path.display(), "wrote function file");
        written.push(path.clone());
    }
    Ok(written)
}
