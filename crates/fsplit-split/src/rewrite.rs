use fsplit_core::{Declaration, FsplitError, SourceUnit, Span, edit};
use fsplit_treesit::Formatter;
use std::fs;

/// Source of `unit` without its function declarations.
///
/// A comment goes with the functions when it is owned (doc comment or
/// inside the body) by a removed declaration and by no surviving one.
/// Comments owned by nothing stay where they are.
pub fn strip_functions(unit: &SourceUnit) -> String {
    let (removed, kept): (Vec<&Declaration>, Vec<&Declaration>) =
        unit.decls.iter().partition(|decl| decl.is_func());

    let mut spans: Vec<Span> = removed.iter().map(|decl| decl.span).collect();
    for (idx, comment) in unit.comments.iter().enumerate() {
        let owned_by_removed = removed.iter().any(|d| d.owns_comment(idx, comment));
        let owned_by_kept = kept.iter().any(|d| d.owns_comment(idx, comment));
        if owned_by_removed && !owned_by_kept {
            spans.push(comment.span);
        }
    }

    edit::finish(&edit::remove_spans(&unit.source, &spans))
}

/// Overwrite the original file with its function declarations removed.
pub fn rewrite(unit: &SourceUnit, formatter: &dyn Formatter) -> Result<(), FsplitError> {
    let stripped = strip_functions(unit);
    let formatted = formatter
        .format(&unit.path, &stripped)
        .map_err(|e| FsplitError::write(&unit.path, format!("preparing output: {e}")))?;
    fs::write(&unit.path, formatted).map_err(|e| FsplitError::write(&unit.path, e))
}
