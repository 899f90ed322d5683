use crate::naming::output_name;
use fsplit_core::{ExtractedFunction, FuncDecl, SourceUnit};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Extracts functions from the files of one run.
///
/// Output names are unique across every file passed to the same extractor.
/// An original and an earlier split of it share a stem, so numbered names
/// (`init-001`, ...) continue from whatever the run already issued.
#[derive(Debug, Default)]
pub struct Extractor {
    counters: HashMap<(Option<String>, String), usize>,
    issued: HashSet<PathBuf>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`ExtractedFunction`] per function or method of `unit`, in source order.
    pub fn extract(&mut self, unit: &SourceUnit) -> Vec<ExtractedFunction> {
        let header = header_text(unit);
        let imports = import_text(unit);

        let mut extracted = Vec::new();
        for (decl, func) in unit.funcs() {
            let file_name = self.file_name(unit, func);
            extracted.push(ExtractedFunction {
                file_name,
                header: header.clone(),
                imports: imports.clone(),
                func: unit.text(decl.full_span(&unit.comments)).to_string(),
            });
        }
        extracted
    }

    fn file_name(&mut self, unit: &SourceUnit, func: &FuncDecl) -> PathBuf {
        let receiver = func.receiver.as_deref();
        if !is_repeatable(func) {
            let path = output_name(&unit.path, receiver, &func.name);
            if !self.issued.insert(path.clone()) {
                tracing::warn!(path = %path.display(), "function file named twice in one run");
            }
            return path;
        }

        let count = self
            .counters
            .entry((func.receiver.clone(), func.name.clone()))
            .or_default();
        loop {
            *count += 1;
            let name = format!("{}-{:03}", func.name, *count);
            let path = output_name(&unit.path, receiver, &name);
            if self.issued.insert(path.clone()) {
                return path;
            }
        }
    }
}

/// Extract `unit` on its own.
pub fn extract(unit: &SourceUnit) -> Vec<ExtractedFunction> {
    Extractor::new().extract(unit)
}

/// Names Go lets a file declare more than once.
fn is_repeatable(func: &FuncDecl) -> bool {
    func.is_init() || func.name == "_"
}

/// File comments and package clause: everything before the first
/// declaration and its doc comment.
fn header_text(unit: &SourceUnit) -> String {
    let end = unit
        .decls
        .first()
        .map_or(unit.source.len(), |decl| decl.full_span(&unit.comments).start);
    unit.source[..end].to_string()
}

/// Import declarations with their doc comments, which carry cgo preambles.
fn import_text(unit: &SourceUnit) -> String {
    unit.decls
        .iter()
        .filter(|decl| decl.is_import())
        .map(|decl| format!("{}\n", unit.text(decl.full_span(&unit.comments))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsplit_treesit::parse_source;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    fn unit(source: &str) -> SourceUnit {
        parse_source(Path::new("pkg/a.go"), source.to_string()).unwrap()
    }

    fn file_names(extracted: &[ExtractedFunction]) -> Vec<String> {
        extracted
            .iter()
            .map(|e| e.file_name.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    const SHAPES: &str = "// Copyright 2024 The Shapes Authors.\n\n// Package shapes models plane figures.\npackage shapes\n\nimport \"fmt\"\n\nimport (\n\t\"math\"\n)\n\n// Circle is round.\ntype Circle struct{ R float64 }\n\n// Area of the circle.\nfunc (c *Circle) Area() float64 {\n\t// pi r squared\n\treturn math.Pi * c.R * c.R\n}\n\nfunc (c Circle) String() string { return fmt.Sprint(c.R) }\n\nfunc New(r float64) *Circle { return &Circle{R: r} }\n";

    #[test]
    fn one_record_per_function_in_order() {
        let extracted = extract(&unit(SHAPES));
        assert_eq!(
            file_names(&extracted),
            [
                "a.Circle.Area.fsplit.go",
                "a.Circle.String.fsplit.go",
                "a._.New.fsplit.go",
            ]
        );
        assert_eq!(extracted[0].file_name, PathBuf::from("pkg/a.Circle.Area.fsplit.go"));
    }

    #[test]
    fn header_is_prefix_before_first_declaration() {
        let extracted = extract(&unit(SHAPES));
        assert_eq!(
            extracted[0].header,
            "// Copyright 2024 The Shapes Authors.\n\n// Package shapes models plane figures.\npackage shapes\n\n"
        );
    }

    #[test]
    fn imports_are_concatenated() {
        let extracted = extract(&unit(SHAPES));
        assert_eq!(
            extracted[0].imports,
            "import \"fmt\"\nimport (\n\t\"math\"\n)\n"
        );
        assert!(extracted.iter().all(|e| e.imports == extracted[0].imports));
    }

    #[test]
    fn function_text_includes_doc_and_body_comments() {
        let extracted = extract(&unit(SHAPES));
        assert_eq!(
            extracted[0].func,
            "// Area of the circle.\nfunc (c *Circle) Area() float64 {\n\t// pi r squared\n\treturn math.Pi * c.R * c.R\n}"
        );
        assert_eq!(
            extracted[2].func,
            "func New(r float64) *Circle { return &Circle{R: r} }"
        );
    }

    #[test]
    fn header_excludes_doc_of_leading_function() {
        let extracted = extract(&unit(
            "package p\n\n// A first.\nfunc A() {}\n\nfunc B() {}\n",
        ));
        assert_eq!(extracted[0].header, "package p\n\n");
        assert_eq!(extracted[0].func, "// A first.\nfunc A() {}");
        assert_eq!(extracted[0].imports, "");
    }

    #[test]
    fn init_functions_are_numbered() {
        let extracted = extract(&unit(
            "package p\n\nfunc init() {}\n\nfunc Run() {}\n\nfunc init() {}\n\nfunc init() {}\n",
        ));
        assert_eq!(
            file_names(&extracted),
            [
                "a._.init-001.fsplit.go",
                "a._.Run.fsplit.go",
                "a._.init-002.fsplit.go",
                "a._.init-003.fsplit.go",
            ]
        );
    }

    #[test]
    fn method_named_init_is_not_renumbered() {
        let extracted = extract(&unit(
            "package p\n\ntype T int\n\nfunc (T) init() {}\n\nfunc init() {}\n",
        ));
        assert_eq!(
            file_names(&extracted),
            ["a.T.init.fsplit.go", "a._.init-001.fsplit.go"]
        );
    }

    #[test]
    fn blank_functions_are_numbered() {
        let extracted = extract(&unit("package p\n\nfunc _() {}\n\nfunc _() {}\n"));
        assert_eq!(
            file_names(&extracted),
            ["a._._-001.fsplit.go", "a._._-002.fsplit.go"]
        );
    }

    #[test]
    fn numbering_continues_across_files_sharing_a_stem() {
        let inits = "package p\n\nfunc init() {}\n\nfunc init() {}\n";
        let resplit =
            parse_source(Path::new("pkg/a._.init-001.fsplit.go"), inits.to_string()).unwrap();

        let mut extractor = Extractor::new();
        let first = extractor.extract(&resplit);
        let second = extractor.extract(&unit(inits));
        assert_eq!(
            file_names(&first),
            ["a._.init-001.fsplit.go", "a._.init-002.fsplit.go"]
        );
        assert_eq!(
            file_names(&second),
            ["a._.init-003.fsplit.go", "a._.init-004.fsplit.go"]
        );
    }

    #[test]
    fn separate_extractors_number_independently() {
        let inits = unit("package p\n\nfunc init() {}\n\nfunc init() {}\n");
        assert_eq!(file_names(&extract(&inits)), file_names(&extract(&inits)));
    }

    #[test]
    fn cgo_preamble_stays_with_its_import() {
        let extracted = extract(&unit(
            "package p\n\n// #include <stdio.h>\nimport \"C\"\n\nfunc A() { C.puts(nil) }\n\nfunc B() {}\n",
        ));
        assert_eq!(extracted[0].header, "package p\n\n");
        assert_eq!(extracted[0].imports, "// #include <stdio.h>\nimport \"C\"\n");
    }

    #[test]
    fn pointer_and_value_receivers_share_segment() {
        let extracted = extract(&unit(SHAPES));
        assert!(file_names(&extracted)[0].starts_with("a.Circle."));
        assert!(file_names(&extracted)[1].starts_with("a.Circle."));
    }
}
