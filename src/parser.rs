//! Swift source parsing via tree-sitter.
//!
//! Parsing is the only fallible stage of the pipeline: everything downstream
//! of a [`ParsedSource`] degrades instead of erroring.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Language, Node, Parser as TsParser, Tree};

/// Errors produced while turning a path or buffer into a syntax tree.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("swift grammar rejected by linked tree-sitter: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("no syntax tree produced for {name}")]
    NoTree { name: String },
}

/// One parsed Swift file: its display name, raw bytes, and syntax tree.
///
/// The tree borrows nothing; nodes resolve their text against `source` on
/// demand via [`ParsedSource::node_text`].
#[derive(Debug)]
pub struct ParsedSource {
    /// Display name, typically the path relative to the analyzed root.
    pub name: String,
    /// Raw file contents the tree was parsed from.
    pub source: Vec<u8>,
    /// The tree-sitter parse tree.
    pub tree: Tree,
}

impl ParsedSource {
    /// Root node of the tree. Its range spans the entire source, trailing
    /// whitespace included.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text of a node, or `""` when the range is not valid UTF-8.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// True when tree-sitter inserted error-recovery nodes while parsing.
    /// Such trees are still walkable and still get analyzed.
    pub fn has_parse_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Parser front-end for Swift files.
///
/// Holds only the grammar; a `tree_sitter::Parser` is built per call because
/// parser instances are not `Sync` and callers parse from rayon workers.
pub struct SwiftParser {
    language: Language,
}

impl SwiftParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_swift::LANGUAGE.into(),
        }
    }

    /// Parse an in-memory buffer under the given display name.
    pub fn parse_source(
        &self,
        name: impl Into<String>,
        source: Vec<u8>,
    ) -> Result<ParsedSource, ParseError> {
        let name = name.into();
        let mut parser = TsParser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| ParseError::NoTree { name: name.clone() })?;

        Ok(ParsedSource { name, source, tree })
    }

    /// Read and parse a file, recording `name` as its display name.
    pub fn parse_file(&self, path: &Path, name: &str) -> Result<ParsedSource, ParseError> {
        let source = fs::read(path).map_err(|e| ParseError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_source(name, source)
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}
