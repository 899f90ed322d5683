use fsplit_core::{CommentGroup, DeclKind, Declaration, FsplitError, FuncDecl, SourceUnit, Span};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

const TOP_LEVEL_KINDS: &[&str] = &[
    "comment",
    "package_clause",
    "import_declaration",
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

/// Parse Go source, failing on anything the Go compiler would reject at the
/// syntax level that tree-sitter tolerates.
pub(crate) fn parse_tree(path: &Path, source: &str) -> Result<Tree, FsplitError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| FsplitError::parse(path, 1, 1, format!("loading Go grammar: {e}")))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| FsplitError::parse(path, 1, 1, "parser produced no tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        let node = first_error(root).unwrap_or(root);
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            format!("syntax error near `{}`", snippet(node, source))
        };
        return Err(error_at(path, node, message));
    }

    check_top_level(path, root)?;
    Ok(tree)
}

/// Top level holds only declarations, after the package clause.
fn check_top_level(path: &Path, root: Node) -> Result<(), FsplitError> {
    let mut cursor = root.walk();
    let mut seen_package = false;
    for node in root.named_children(&mut cursor) {
        if !TOP_LEVEL_KINDS.contains(&node.kind()) {
            return Err(error_at(
                path,
                node,
                format!("expected declaration, found {}", node.kind()),
            ));
        }
        match node.kind() {
            "comment" => {}
            "package_clause" => seen_package = true,
            _ if !seen_package => {
                return Err(error_at(path, node, "expected 'package' clause"));
            }
            _ => {}
        }
    }
    if !seen_package {
        return Err(FsplitError::parse(path, 1, 1, "expected 'package' clause"));
    }
    Ok(())
}

/// Parse one file into a [`SourceUnit`].
pub fn parse_source(path: &Path, source: String) -> Result<SourceUnit, FsplitError> {
    let tree = parse_tree(path, &source)?;
    let root = tree.root_node();
    let comments = comment_groups(root, &source);

    let mut package = String::new();
    let mut decls = Vec::new();
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        let kind = match node.kind() {
            "comment" => continue,
            "package_clause" => {
                package = package_name(node, &source);
                continue;
            }
            "import_declaration" => DeclKind::Import,
            "function_declaration" | "method_declaration" => DeclKind::Func(func_decl(node, &source)),
            _ => DeclKind::Other,
        };
        let span = Span::new(node.start_byte(), node.end_byte());
        decls.push(Declaration {
            kind,
            span,
            doc: doc_comment(&source, &comments, span.start),
        });
    }

    Ok(SourceUnit {
        path: path.to_path_buf(),
        package,
        source,
        decls,
        comments,
    })
}

pub(crate) fn text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

fn error_at(path: &Path, node: Node, message: impl Into<String>) -> FsplitError {
    let pos = node.start_position();
    FsplitError::parse(path, pos.row + 1, pos.column + 1, message)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn snippet(node: Node, source: &str) -> String {
    let line = text(node, source).lines().next().unwrap_or_default();
    line.chars().take(24).collect()
}

fn package_name(node: Node, source: &str) -> String {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| c.kind() == "package_identifier")
        .map(|c| text(c, source).to_string())
        .unwrap_or_default()
}

fn func_decl(node: Node, source: &str) -> FuncDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source).to_string())
        .unwrap_or_default();
    let receiver = if node.kind() == "method_declaration" {
        receiver_type(node, source)
    } else {
        None
    };
    FuncDecl { name, receiver }
}

/// `T`, `*T`, `T[K]` and `*T[K]` receivers all resolve to `T`.
fn receiver_type(node: Node, source: &str) -> Option<String> {
    let params = node.child_by_field_name("receiver")?;
    let mut cursor = params.walk();
    let param = params
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;
    base_type_name(param.child_by_field_name("type")?, source)
}

fn base_type_name(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(text(node, source).to_string()),
        "pointer_type" | "parenthesized_type" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|c| c.kind() != "comment")?;
            base_type_name(inner, source)
        }
        "generic_type" => base_type_name(node.child_by_field_name("type")?, source),
        _ => None,
    }
}

fn collect_comments<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if node.kind() == "comment" {
        out.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_comments(child, out);
    }
}

/// True if only whitespace precedes `offset` on its line.
fn starts_line(source: &str, offset: usize) -> bool {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..offset].trim().is_empty()
}

/// Group comments the way Go does: a comment trailing code on its line only
/// joins comments on that same line; any other comment joins the following
/// comment when no blank line separates them.
fn comment_groups(root: Node, source: &str) -> Vec<CommentGroup> {
    let mut nodes = Vec::new();
    collect_comments(root, &mut nodes);

    let mut groups: Vec<CommentGroup> = Vec::new();
    let mut trailing = false;
    for node in nodes {
        let span = Span::new(node.start_byte(), node.end_byte());
        if let Some(last) = groups.last_mut() {
            let gap = &source[last.span.end..span.start];
            let newlines = gap.matches('\n').count();
            let joins = gap.trim().is_empty() && (newlines == 0 || (newlines == 1 && !trailing));
            if joins {
                last.span.end = span.end;
                last.text = source[last.span.start..span.end].to_string();
                continue;
            }
        }
        trailing = !starts_line(source, span.start);
        groups.push(CommentGroup {
            span,
            text: source[span.start..span.end].to_string(),
        });
    }
    groups
}

/// The doc comment of a declaration starting at `decl_start`: the closest
/// preceding group that starts its own line and ends on the line right
/// before the declaration.
fn doc_comment(source: &str, comments: &[CommentGroup], decl_start: usize) -> Option<usize> {
    let idx = comments.partition_point(|c| c.span.end <= decl_start);
    let candidate = idx.checked_sub(1)?;
    let group = &comments[candidate];
    let gap = &source[group.span.end..decl_start];
    if gap.trim().is_empty() && gap.matches('\n').count() == 1 && starts_line(source, group.span.start)
    {
        Some(candidate)
    } else {
        None
    }
}
