use fsplit_core::{Exclusion, SourceUnit};

/// Package-name suffix of external test packages.
pub const TEST_PACKAGE_SUFFIX: &str = "_test";

/// File-name suffix the Go toolchain reserves for test files. Such files are
/// excluded even when they declare the package under test.
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// Marker of generated code, searched in every comment.
pub const GENERATED_MARKER: &str = "Code generated";

/// Why `unit` must be left untouched, or `None` if it takes part in splitting.
///
/// Both passes call this on independently parsed units, so it must depend on
/// nothing but the unit itself.
pub fn exclusion(unit: &SourceUnit) -> Option<Exclusion> {
    if unit.package.ends_with(TEST_PACKAGE_SUFFIX) {
        return Some(Exclusion::TestPackage);
    }
    if unit.file_name().ends_with(TEST_FILE_SUFFIX) {
        return Some(Exclusion::TestFile);
    }
    if unit
        .comments
        .iter()
        .any(|c| c.text.contains(GENERATED_MARKER))
    {
        return Some(Exclusion::Generated);
    }

    // zero or one function: nothing to split
    let funcs = unit.func_count();
    if funcs <= 1 {
        return Some(Exclusion::TooFewFunctions(funcs));
    }
    None
}

pub fn is_eligible(unit: &SourceUnit) -> bool {
    exclusion(unit).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsplit_treesit::parse_source;
    use std::path::Path;

    fn unit(name: &str, source: &str) -> SourceUnit {
        parse_source(Path::new(name), source.to_string()).unwrap()
    }

    #[test]
    fn two_functions_are_eligible() {
        let u = unit("a.go", "package p\n\nfunc A() {}\n\nfunc B() {}\n");
        assert_eq!(exclusion(&u), None);
        assert!(is_eligible(&u));
    }

    #[test]
    fn methods_count_as_functions() {
        let u = unit(
            "a.go",
            "package p\n\ntype T int\n\nfunc (T) A() {}\n\nfunc (t *T) B() {}\n",
        );
        assert!(is_eligible(&u));
    }

    #[test]
    fn excludes_external_test_package() {
        let u = unit("x.go", "package p_test\n\nfunc A() {}\n\nfunc B() {}\n");
        assert_eq!(exclusion(&u), Some(Exclusion::TestPackage));
    }

    #[test]
    fn excludes_internal_test_file() {
        let u = unit("a_test.go", "package p\n\nfunc TestA() {}\n\nfunc TestB() {}\n");
        assert_eq!(exclusion(&u), Some(Exclusion::TestFile));
    }

    #[test]
    fn excludes_generated_file() {
        let u = unit(
            "a.go",
            "// Code generated by stringer; DO NOT EDIT.\n\npackage p\n\nfunc A() {}\n\nfunc B() {}\n",
        );
        assert_eq!(exclusion(&u), Some(Exclusion::Generated));
    }

    #[test]
    fn generated_marker_anywhere_in_comments() {
        let u = unit(
            "a.go",
            "package p\n\nfunc A() {\n\t/* Code generated below */\n}\n\nfunc B() {}\n",
        );
        assert_eq!(exclusion(&u), Some(Exclusion::Generated));
    }

    #[test]
    fn excludes_single_function() {
        let u = unit("a.go", "package p\n\ntype T int\n\nfunc A() {}\n");
        assert_eq!(exclusion(&u), Some(Exclusion::TooFewFunctions(1)));
    }

    #[test]
    fn excludes_no_function() {
        let u = unit("a.go", "package p\n\nvar x = 1\n");
        assert_eq!(exclusion(&u), Some(Exclusion::TooFewFunctions(0)));
    }

    #[test]
    fn package_named_test_alone_is_not_a_test_package() {
        let u = unit("a.go", "package test\n\nfunc A() {}\n\nfunc B() {}\n");
        assert!(is_eligible(&u));
    }
}
