//! Python parser using Tree-sitter.

use role_review_core::{AstNode, NodeKind, ParseError, SourceParser};
use tree_sitter::{Language, Node, Parser, Point};

/// Parses Python source and lowers it into [`AstNode`]s.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new Python parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    fn start_line(node: &Node<'_>) -> usize {
        node.start_position().row + 1
    }

    /// Line of the last token that is not a comment. Trailing comments sit
    /// inside a `block` but do not extend the statement that owns it.
    fn end_line(node: &Node<'_>) -> usize {
        Self::last_token_end(node).row + 1
    }

    fn last_token_end(node: &Node<'_>) -> Point {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        children
            .iter()
            .rev()
            .find(|c| c.kind() != "comment" && c.end_byte() > c.start_byte())
            .map_or_else(|| node.end_position(), Self::last_token_end)
    }

    /// First Python 2 `print`/`exec` statement. tree-sitter accepts both
    /// without an error node, but they are not valid Python 3.
    fn first_legacy_statement_line(node: &Node<'_>) -> Option<usize> {
        if matches!(node.kind(), "print_statement" | "exec_statement") {
            return Some(Self::start_line(node));
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        children.iter().find_map(Self::first_legacy_statement_line)
    }

    /// First line containing an ERROR or MISSING node.
    fn first_error_line(node: &Node<'_>) -> Option<usize> {
        if node.is_error() || node.is_missing() {
            return Some(Self::start_line(node));
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(line) = Self::first_error_line(&child) {
                return Some(line);
            }
        }
        Some(Self::start_line(node))
    }

    fn lower_children(node: &Node<'_>, src: &[u8]) -> Vec<AstNode> {
        let mut children = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            children.extend(Self::lower(&child, src));
        }
        children
    }

    /// Lowers one concrete node. `block` is spliced into its parent, and
    /// nodes without anything interesting below them are dropped.
    fn lower(node: &Node<'_>, src: &[u8]) -> Vec<AstNode> {
        match node.kind() {
            "comment" => Vec::new(),
            "block" => Self::lower_children(node, src),
            "function_definition" => vec![Self::lower_function(node, src, Vec::new())],
            "class_definition" => vec![Self::lower_class(node, src, Vec::new())],
            "decorated_definition" => vec![Self::lower_decorated(node, src)],
            "call" => vec![Self::lower_call(node, src)],
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                vec![Self::leaf(NodeKind::ImportStmt, node)]
            }
            "except_clause" | "except_group_clause" => {
                let kind = NodeKind::ExceptHandler {
                    has_type: Self::handler_has_type(node),
                };
                vec![Self::leaf(kind, node).with_children(Self::lower_children(node, src))]
            }
            "assert_statement" => vec![Self::leaf(NodeKind::AssertStmt, node)
                .with_children(Self::lower_children(node, src))],
            _ => {
                let children = Self::lower_children(node, src);
                if children.is_empty() {
                    Vec::new()
                } else {
                    vec![Self::leaf(NodeKind::Other, node).with_children(children)]
                }
            }
        }
    }

    fn leaf(kind: NodeKind, node: &Node<'_>) -> AstNode {
        AstNode::new(kind, Self::start_line(node)).with_end(Self::end_line(node))
    }

    fn lower_function(node: &Node<'_>, src: &[u8], decorators: Vec<AstNode>) -> AstNode {
        let is_async = node.child(0).is_some_and(|c| c.kind() == "async");
        let arg_count = node
            .child_by_field_name("parameters")
            .map_or(0, |p| Self::positional_arg_count(&p));
        let has_return_annotation = node.child_by_field_name("return_type").is_some();

        let mut children = decorators;
        children.extend(Self::lower_children(node, src));

        let mut lowered = Self::leaf(
            NodeKind::FunctionDef {
                is_async,
                arg_count,
                has_return_annotation,
            },
            node,
        )
        .with_children(children);
        if let Some(name) = node.child_by_field_name("name") {
            lowered = lowered.with_name(Self::text(&name, src));
        }
        lowered
    }

    fn lower_class(node: &Node<'_>, src: &[u8], decorators: Vec<AstNode>) -> AstNode {
        let mut children = decorators;
        children.extend(Self::lower_children(node, src));

        let mut lowered = Self::leaf(NodeKind::ClassDef, node).with_children(children);
        if let Some(name) = node.child_by_field_name("name") {
            lowered = lowered.with_name(Self::text(&name, src));
        }
        lowered
    }

    fn lower_decorated(node: &Node<'_>, src: &[u8]) -> AstNode {
        let mut decorators = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "decorator" {
                decorators.extend(Self::lower(&child, src));
            }
        }

        match node.child_by_field_name("definition") {
            Some(def) if def.kind() == "function_definition" => {
                Self::lower_function(&def, src, decorators)
            }
            Some(def) if def.kind() == "class_definition" => {
                Self::lower_class(&def, src, decorators)
            }
            _ => Self::leaf(NodeKind::Other, node).with_children(Self::lower_children(node, src)),
        }
    }

    fn lower_call(node: &Node<'_>, src: &[u8]) -> AstNode {
        let callee_name = node
            .child_by_field_name("function")
            .filter(|f| f.kind() == "identifier")
            .map(|f| Self::text(&f, src).to_owned());

        Self::leaf(NodeKind::CallExpr { callee_name }, node)
            .with_children(Self::lower_children(node, src))
    }

    /// A handler names a type when anything besides its body follows `except`.
    fn handler_has_type(node: &Node<'_>) -> bool {
        let mut cursor = node.walk();
        let has_type = node
            .named_children(&mut cursor)
            .any(|c| !matches!(c.kind(), "block" | "comment"));
        has_type
    }

    /// Counts plain positional parameters: those after `/` and before any
    /// `*`, `*args` or `**kwargs`.
    fn positional_arg_count(params: &Node<'_>) -> usize {
        let mut count = 0;
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "positional_separator" => count = 0,
                "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
                "typed_parameter" if Self::is_splat_parameter(&param) => break,
                "identifier"
                | "typed_parameter"
                | "default_parameter"
                | "typed_default_parameter"
                | "tuple_pattern" => count += 1,
                _ => {}
            }
        }
        count
    }

    fn is_splat_parameter(param: &Node<'_>) -> bool {
        param.named_child(0).is_some_and(|c| {
            matches!(c.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PythonParser {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn parse(&self, source: &str) -> Result<AstNode, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Parser(e.to_string()))?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or_else(|| ParseError::Parser("tree-sitter returned no tree".to_string()))?;
        let root = tree.root_node();

        if let Some(line) =
            Self::first_error_line(&root).or_else(|| Self::first_legacy_statement_line(&root))
        {
            tracing::debug!("Syntax error at line {line}");
            return Err(ParseError::Syntax { line });
        }

        Ok(AstNode::module(Self::lower_children(&root, src)))
    }
}
