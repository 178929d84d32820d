#![forbid(unsafe_code)]

//! Parsed Go source files
//!
//! A [`SourceFile`] bundles the text of one Go file with its tree-sitter
//! syntax tree and the comments found in it. Detectors only traverse and
//! inspect it; they never ask for type information.

use crate::error::LoadError;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

thread_local! {
    /// One Go parser per thread, created on first use
    static GO_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// A comment with its 1-indexed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub line: u32,
    pub column: u32,
    /// Raw comment text including the `//` or `/* */` markers
    pub text: String,
}

/// A Go source file with its syntax tree and comments
pub struct SourceFile {
    path: PathBuf,
    source: String,
    tree: Tree,
    comments: Vec<Comment>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .field("comments", &self.comments.len())
            .finish()
    }
}

impl SourceFile {
    /// Parse Go source text
    ///
    /// tree-sitter is error tolerant, so syntactically broken input still
    /// produces a tree (with ERROR nodes). Only a parser that cannot be set up
    /// or that gives up entirely is reported as an error.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Syntax` if the Go grammar cannot be loaded or the
    /// parser returns no tree.
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self, LoadError> {
        let path = path.into();
        let source = source.into();

        let tree = with_go_parser(|parser| {
            parser
                .parse(&source, None)
                .ok_or_else(|| "parser returned no syntax tree".to_string())
        })
        .map_err(|message| LoadError::Syntax {
            path: path.clone(),
            message,
        })?;

        let comments = collect_comments(tree.root_node(), source.as_bytes());

        Ok(SourceFile {
            path,
            source,
            tree,
            comments,
        })
    }

    /// Read and parse a Go file from disk
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Read` if the file cannot be read, or
    /// `LoadError::Syntax` if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Comments in source order
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Text of a node, or the empty string if it is not valid UTF-8
    pub fn text<'a>(&'a self, node: &Node<'_>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }
}

/// Run `f` with this thread's cached Go parser
fn with_go_parser<T>(f: impl FnOnce(&mut Parser) -> Result<T, String>) -> Result<T, String> {
    GO_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let parser = match &mut *slot {
            Some(parser) => parser,
            empty => empty.insert(go_parser()?),
        };
        let result = f(parser);
        // A parser that gave up may hold partial state
        if result.is_err() {
            parser.reset();
        }
        result
    })
}

/// Create a parser configured for Go
fn go_parser() -> Result<Parser, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::language())
        .map_err(|e| format!("failed to load Go grammar: {}", e))?;
    Ok(parser)
}

/// 1-indexed line of a node's start
pub fn line_of(node: &Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// Gather every `comment` node in preorder
fn collect_comments(root: Node<'_>, source: &[u8]) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            let position = node.start_position();
            comments.push(Comment {
                line: position.row as u32 + 1,
                column: position.column as u32 + 1,
                text: node.utf8_text(source).unwrap_or_default().to_string(),
            });
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return comments;
            }
        }
    }
}
