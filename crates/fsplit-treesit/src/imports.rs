use crate::Formatter;
use crate::parse::{parse_tree, text};
use fsplit_core::{FsplitError, Span, edit};
use fsplit_scanner::Scanner;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Removes imports whose package is never referenced.
///
/// An import is referenced when its alias, or the package name assumed from
/// its path, qualifies a selector (`pkg.Func`) or a type (`pkg.Type`) outside
/// the import declarations. Blank and dot imports, and cgo's `"C"`, are
/// always kept. Import declarations left empty are removed entirely.
///
/// A package may declare a name other than its last path element. When a
/// file uses a qualifier that is not declared in the file, not declared at
/// package level in the file's directory, and not claimed by any import,
/// every unaliased import is kept, since any of them may provide it.
/// Package-level names are read once per directory and cached.
#[derive(Debug, Default)]
pub struct ImportPruner {
    package_names: RefCell<HashMap<PathBuf, HashSet<String>>>,
}

impl Formatter for ImportPruner {
    fn format(&self, path: &Path, source: &str) -> Result<String, FsplitError> {
        let tree = parse_tree(path, source)?;
        let root = tree.root_node();

        let mut names = Names::default();
        collect_names(root, source, &mut names);

        let mut cursor = root.walk();
        let decls: Vec<(Node, Vec<Node>)> = root
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "import_declaration")
            .map(|decl| (decl, import_specs(decl)))
            .collect();

        let claimed: HashSet<&str> = decls
            .iter()
            .flat_map(|(_, specs)| specs)
            .filter_map(|spec| import_name(*spec, source))
            .collect();
        let unresolved = self.has_unresolved(path, &names, &claimed);

        let mut removals = Vec::new();
        for (decl, specs) in &decls {
            let unused: Vec<Span> = specs
                .iter()
                .filter(|spec| !is_referenced(**spec, source, &names.qualifiers, unresolved))
                .map(|spec| Span::new(spec.start_byte(), spec.end_byte()))
                .collect();

            if unused.is_empty() {
                continue;
            }
            if unused.len() == specs.len() {
                removals.push(Span::new(decl.start_byte(), decl.end_byte()));
            } else {
                removals.extend(unused);
            }
        }

        if !removals.is_empty() {
            tracing::debug!(path = %path.display(), removed = removals.len(), "pruned imports");
        }
        Ok(edit::finish(&edit::remove_spans(source, &removals)))
    }
}

impl ImportPruner {
    /// True if some qualifier of the file resolves to nothing known.
    fn has_unresolved<'s>(
        &self,
        path: &Path,
        names: &Names<'s>,
        claimed: &HashSet<&'s str>,
    ) -> bool {
        let mut open = names
            .qualifiers
            .iter()
            .filter(|q| !names.bare.contains(*q) && !claimed.contains(*q))
            .peekable();
        if open.peek().is_none() {
            return false;
        }

        let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        let mut cache = self.package_names.borrow_mut();
        let declared = cache.entry(dir).or_insert_with_key(|dir| package_level_names(dir));
        let unresolved: Vec<&str> = open.filter(|q| !declared.contains(**q)).copied().collect();
        if unresolved.is_empty() {
            return false;
        }
        tracing::debug!(path = %path.display(), ?unresolved, "keeping unaliased imports");
        true
    }
}

/// Identifiers a file uses as package qualifiers, and those it uses bare.
/// A bare use means the name is declared somewhere other than an import.
#[derive(Default)]
struct Names<'s> {
    qualifiers: HashSet<&'s str>,
    bare: HashSet<&'s str>,
}

fn collect_names<'s>(node: Node, source: &'s str, names: &mut Names<'s>) {
    match node.kind() {
        "import_declaration" => return,
        "identifier" | "type_identifier" => {
            names.bare.insert(text(node, source));
            return;
        }
        "selector_expression" => {
            let operand = node
                .child_by_field_name("operand")
                .filter(|operand| operand.kind() == "identifier");
            if let Some(operand) = operand {
                names.qualifiers.insert(text(operand, source));
                return;
            }
        }
        "qualified_type" => {
            if let Some(package) = node.child_by_field_name("package") {
                names.qualifiers.insert(text(package, source));
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_names(child, source, names);
    }
}

/// Names declared at the top level of the Go files in `dir`. Files that do
/// not read or parse contribute nothing.
fn package_level_names(dir: &Path) -> HashSet<String> {
    let mut declared = HashSet::new();
    let files = match Scanner::new(dir).scan() {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!(error = %err, "no package-level names");
            return declared;
        }
    };
    for file in files {
        let Ok(tree) = parse_tree(&file.path, &file.source) else {
            continue;
        };
        let root = tree.root_node();
        let mut cursor = root.walk();
        for decl in root.named_children(&mut cursor) {
            declared_names(decl, &file.source, &mut declared);
        }
    }
    declared
}

fn declared_names(node: Node, source: &str, out: &mut HashSet<String>) {
    match node.kind() {
        "function_declaration" | "var_spec" | "const_spec" | "type_spec" | "type_alias" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                out.insert(text(name, source).to_string());
            }
        }
        "var_declaration" | "const_declaration" | "type_declaration" | "var_spec_list" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                declared_names(child, source, out);
            }
        }
        _ => {}
    }
}

fn import_specs(decl: Node) -> Vec<Node> {
    let mut specs = Vec::new();
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => specs.push(child),
            "import_spec_list" => {
                let mut inner = child.walk();
                specs.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| n.kind() == "import_spec"),
                );
            }
            _ => {}
        }
    }
    specs
}

fn import_path<'s>(spec: Node, source: &'s str) -> Option<&'s str> {
    spec.child_by_field_name("path")
        .map(|path| text(path, source).trim_matches(|c| c == '"' || c == '`'))
}

/// The name an import binds in the file, if any.
fn import_name<'s>(spec: Node, source: &'s str) -> Option<&'s str> {
    match spec.child_by_field_name("name") {
        Some(name) if name.kind() == "package_identifier" => Some(text(name, source)),
        Some(_) => None,
        None => import_path(spec, source).map(assumed_name),
    }
}

fn is_referenced(spec: Node, source: &str, used: &HashSet<&str>, unresolved: bool) -> bool {
    if let Some(name) = spec.child_by_field_name("name") {
        return match name.kind() {
            "blank_identifier" | "dot" => true,
            _ => used.contains(text(name, source)),
        };
    }

    let Some(import_path) = import_path(spec, source) else {
        return true;
    };
    import_path == "C" || used.contains(assumed_name(import_path)) || unresolved
}

/// Package name assumed from an import path when no alias is given:
/// the last element, skipping a `vN` major-version element, without a
/// `go-` prefix, cut at the first character that cannot appear in an
/// identifier.
pub(crate) fn assumed_name(import_path: &str) -> &str {
    let mut elements = import_path.rsplit('/');
    let mut base = elements.next().unwrap_or(import_path);
    if is_major_version(base) {
        if let Some(parent) = elements.next() {
            base = parent;
        }
    }
    let base = base.strip_prefix("go-").unwrap_or(base);
    let end = base
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(base.len());
    &base[..end]
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
