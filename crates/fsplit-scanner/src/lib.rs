//! Source file discovery for a single package directory.

mod scanner;

pub use scanner::{Scanner, SourceFile};

#[cfg(test)]
mod tests {
    use super::*;
    use fsplit_core::ErrorKind;
    use std::fs;
    use std::path::Path;

    fn create_test_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("b.go"), "package p\n").unwrap();
        fs::write(root.join("a.go"), "package p\n\nfunc A() {}\n").unwrap();
        fs::write(root.join("a_test.go"), "package p_test\n").unwrap();

        // Not Go sources
        fs::write(root.join("README.md"), "# Test").unwrap();
        fs::write(root.join("go.mod"), "module example.com/p\n").unwrap();

        // Sub-packages are separate packages
        fs::create_dir_all(root.join("internal")).unwrap();
        fs::write(root.join("internal/c.go"), "package internal\n").unwrap();

        // Ignore files must not hide sources
        fs::write(root.join(".gitignore"), "b.go\n").unwrap();

        dir
    }

    fn names(files: &[SourceFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn scanner_finds_go_files_sorted() {
        let dir = create_test_dir();
        let files = Scanner::new(dir.path()).scan().unwrap();
        assert_eq!(names(&files), ["a.go", "a_test.go", "b.go"]);
    }

    #[test]
    fn scanner_is_not_recursive() {
        let dir = create_test_dir();
        let files = Scanner::new(dir.path()).scan().unwrap();
        assert!(!files.iter().any(|f| f.path.ends_with("internal/c.go")));
    }

    #[test]
    fn scanner_reads_contents() {
        let dir = create_test_dir();
        let files = Scanner::new(dir.path()).scan().unwrap();
        let a = files.iter().find(|f| f.path.ends_with("a.go")).unwrap();
        assert_eq!(a.source, "package p\n\nfunc A() {}\n");
        assert_eq!(a.path, dir.path().join("a.go"));
    }

    #[test]
    fn scanner_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let files = Scanner::new(dir.path()).scan().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn scanner_skips_directories_named_like_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("weird.go")).unwrap();
        let files = Scanner::new(dir.path()).scan().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn scanner_nonexistent_path() {
        let path = Path::new("/nonexistent/path/that/does/not/exist");
        let err = Scanner::new(path).scan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert_eq!(err.path(), path);
    }

    #[test]
    fn scanner_rejects_non_utf8_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.go"), [0xff, 0xfe, 0x00]).unwrap();
        let err = Scanner::new(dir.path()).scan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(err.path().ends_with("bad.go"));
    }
}
