//! fsplit core domain types, errors, and source editing.

pub mod edit;
mod error;
mod types;

pub use error::{ErrorKind, FsplitError};
pub use types::{
    CommentGroup, DeclKind, Declaration, Exclusion, ExtractedFunction, FuncDecl, Package,
    SkippedFile, SourceUnit, Span, SplitReport,
};

/// Extension of the source files fsplit operates on.
pub const SOURCE_EXTENSION: &str = "go";

/// Literal that marks a file as fsplit output.
pub const SPLIT_MARKER: &str = "fsplit";
