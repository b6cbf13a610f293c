//! Language-agnostic syntax model consumed by role checkers.
//!
//! A [`SourceParser`](crate::SourceParser) lowers its concrete tree into
//! [`AstNode`]s. Only the categories some checker cares about get their own
//! [`NodeKind`]; everything else is [`NodeKind::Other`] and exists only so
//! that traversal reaches nested nodes.

/// Syntactic category of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Function or coroutine-function definition.
    FunctionDef {
        /// `async def`.
        is_async: bool,
        /// Number of plain positional parameters.
        arg_count: usize,
        /// Whether a return type is declared.
        has_return_annotation: bool,
    },
    /// Class/type definition.
    ClassDef,
    /// Call expression.
    CallExpr {
        /// Callee when the call target is a bare identifier.
        callee_name: Option<String>,
    },
    /// Import statement of any form.
    ImportStmt,
    /// Exception handler clause.
    ExceptHandler {
        /// Whether the handler names an exception type.
        has_type: bool,
    },
    /// Assertion statement.
    AssertStmt,
    /// Any other node.
    Other,
}

impl NodeKind {
    /// Short label for logging and debugging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FunctionDef { .. } => "function",
            Self::ClassDef => "class",
            Self::CallExpr { .. } => "call",
            Self::ImportStmt => "import",
            Self::ExceptHandler { .. } => "except",
            Self::AssertStmt => "assert",
            Self::Other => "other",
        }
    }
}

/// A node of the parsed syntax tree.
///
/// Nodes own their children exclusively and are not mutated once the parser
/// has built them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    /// Syntactic category.
    pub kind: NodeKind,
    /// First line (1-indexed).
    pub start_line: usize,
    /// Last line (1-indexed), when the parser reports it.
    pub end_line: Option<usize>,
    /// Declared name for functions and classes.
    pub name: Option<String>,
    /// Child nodes in source order.
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Creates a childless node.
    #[must_use]
    pub fn new(kind: NodeKind, start_line: usize) -> Self {
        Self {
            kind,
            start_line,
            end_line: None,
            name: None,
            children: Vec::new(),
        }
    }

    /// Creates the root node of a file.
    #[must_use]
    pub fn module(children: Vec<AstNode>) -> Self {
        Self::new(NodeKind::Other, 1).with_children(children)
    }

    /// Creates a function definition spanning `start_line..=end_line`.
    #[must_use]
    pub fn function(name: &str, start_line: usize, end_line: usize, arg_count: usize) -> Self {
        Self::new(
            NodeKind::FunctionDef {
                is_async: false,
                arg_count,
                has_return_annotation: true,
            },
            start_line,
        )
        .with_end(end_line)
        .with_name(name)
    }

    /// Creates a class definition.
    #[must_use]
    pub fn class(name: &str, start_line: usize, end_line: usize, body: Vec<AstNode>) -> Self {
        Self::new(NodeKind::ClassDef, start_line)
            .with_end(end_line)
            .with_name(name)
            .with_children(body)
    }

    /// Creates a call to a bare identifier.
    #[must_use]
    pub fn call(callee: &str, line: usize) -> Self {
        Self::new(
            NodeKind::CallExpr {
                callee_name: Some(callee.to_string()),
            },
            line,
        )
    }

    /// Sets the end line.
    #[must_use]
    pub fn with_end(mut self, end_line: usize) -> Self {
        self.end_line = Some(end_line);
        self
    }

    /// Sets the declared name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    /// Returns true for function and coroutine-function definitions.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self.kind, NodeKind::FunctionDef { .. })
    }

    /// Line span `end - start + 1`, or 0 when the end line is unknown.
    #[must_use]
    pub fn line_span(&self) -> usize {
        self.end_line
            .map_or(0, |end| (end + 1).saturating_sub(self.start_line))
    }

    /// Name, or an empty string for anonymous nodes.
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Depth-first pre-order traversal of this node and all descendants.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`AstNode::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
