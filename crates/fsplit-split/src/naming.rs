use fsplit_core::{SOURCE_EXTENSION, SPLIT_MARKER};
use std::path::{Path, PathBuf};

/// Receiver segment used for plain functions.
pub const NO_RECEIVER: &str = "_";

/// Path of the single-function file for `func_name` declared in `original`.
///
/// The name is `<stem>.<receiver|_>.<func_name>.fsplit.go`, next to the
/// original. When `original` is itself fsplit output, its stem is recovered
/// first so repeated runs never stack markers.
pub fn output_name(original: &Path, receiver: Option<&str>, func_name: &str) -> PathBuf {
    let file_name = original
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(SOURCE_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(file_name);
    let stem = original_stem(stem);
    let receiver = receiver.filter(|r| !r.is_empty()).unwrap_or(NO_RECEIVER);

    original.with_file_name(format!(
        "{stem}.{receiver}.{func_name}.{SPLIT_MARKER}.{SOURCE_EXTENSION}"
    ))
}

/// `a._.Foo.fsplit` -> `a`; any other stem is returned unchanged.
fn original_stem(stem: &str) -> &str {
    let Some(rest) = stem
        .strip_suffix(SPLIT_MARKER)
        .and_then(|s| s.strip_suffix('.'))
    else {
        return stem;
    };

    let mut segments = rest.rsplitn(3, '.');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_func), Some(_receiver), Some(original)) if !original.is_empty() => original,
        _ => stem,
    }
}
