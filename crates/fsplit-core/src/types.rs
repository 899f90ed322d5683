use std::fmt;
use std::path::{Path, PathBuf};

/// Half-open byte range `[start, end)` into a file's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `offset` lies strictly between `start` and `end`.
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }
}

/// A maximal run of adjacent comments with no blank line or token between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub span: Span,
    pub text: String,
}

/// Name and receiver of a function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Underlying receiver type name; `None` for plain functions.
    pub receiver: Option<String>,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// Package initializers may be declared several times in one file.
    pub fn is_init(&self) -> bool {
        self.receiver.is_none() && self.name == "init"
    }
}

/// Kind of a top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Func(FuncDecl),
    Other,
}

/// A top-level construct of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Span of the declaration itself, excluding its doc comment.
    pub span: Span,
    /// Index into [`SourceUnit::comments`] of the declaration's doc comment.
    pub doc: Option<usize>,
}

impl Declaration {
    pub fn as_func(&self) -> Option<&FuncDecl> {
        match &self.kind {
            DeclKind::Func(func) => Some(func),
            DeclKind::Import | DeclKind::Other => None,
        }
    }

    pub fn is_func(&self) -> bool {
        matches!(self.kind, DeclKind::Func(_))
    }

    pub fn is_import(&self) -> bool {
        matches!(self.kind, DeclKind::Import)
    }

    /// Span covering the doc comment (if any) and the declaration.
    pub fn full_span(&self, comments: &[CommentGroup]) -> Span {
        match self.doc.and_then(|idx| comments.get(idx)) {
            Some(doc) => Span::new(doc.span.start, self.span.end),
            None => self.span,
        }
    }

    /// A comment belongs to a declaration if it is the doc comment or starts
    /// strictly inside the declaration.
    pub fn owns_comment(&self, index: usize, comment: &CommentGroup) -> bool {
        self.doc == Some(index) || self.span.strictly_contains(comment.span.start)
    }
}

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub package: String,
    pub source: String,
    pub decls: Vec<Declaration>,
    pub comments: Vec<CommentGroup>,
}

impl SourceUnit {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn text(&self, span: Span) -> &str {
        &self.source[span.start..span.end]
    }

    pub fn funcs(&self) -> impl Iterator<Item = (&Declaration, &FuncDecl)> {
        self.decls
            .iter()
            .filter_map(|decl| decl.as_func().map(|func| (decl, func)))
    }

    pub fn func_count(&self) -> usize {
        self.funcs().count()
    }
}

/// Source files that declare the same package, in path order.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub units: Vec<SourceUnit>,
}

/// A function ready to be written to its own file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFunction {
    pub file_name: PathBuf,
    /// Everything before the first declaration: file comments and package clause.
    pub header: String,
    /// All import declarations of the source file, each followed by a newline.
    pub imports: String,
    /// The declaration text including its doc comment.
    pub func: String,
}

impl ExtractedFunction {
    /// Unformatted content of the single-function file.
    pub fn compose(&self) -> String {
        let mut out = String::with_capacity(
            self.header.len() + self.imports.len() + self.func.len() + 2,
        );
        out.push_str(&self.header);
        out.push_str(&self.imports);
        if !self.imports.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.func);
        out.push('\n');
        out
    }
}

/// Why a file did not take part in splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    TestPackage,
    TestFile,
    Generated,
    TooFewFunctions(usize),
}

impl Exclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestPackage => "test-package",
            Self::TestFile => "test-file",
            Self::Generated => "generated",
            Self::TooFewFunctions(_) => "too-few-functions",
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFunctions(n) => write!(f, "{} ({n})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// A file left untouched and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: Exclusion,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub package_dir: PathBuf,
    pub generated: Vec<PathBuf>,
    pub rewritten: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

impl SplitReport {
    pub fn new(package_dir: &Path) -> Self {
        Self {
            package_dir: package_dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn is_noop(&self) -> bool {
        self.generated.is_empty() && self.rewritten.is_empty()
    }
}
