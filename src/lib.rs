//! Swiftmap - Swift source metrics and class dependency analyzer.
//!
//! Swiftmap parses Swift files with tree-sitter and reports, per file, how
//! many structs, classes, and enums they declare, how long each function
//! body is, and which types each class references through its stored
//! properties. The per-class references flatten into a directed dependency
//! graph suitable for visualization and architecture review.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter front-end producing `ParsedSource` values
//! - `analysis`: the per-file core (tree walk, then pure aggregation)
//! - `discover`: source file collection with skip rules and excludes
//! - `report`: project document assembly and output formatting
//! - `cli`: the analyze/dump commands
//!
//! Files are analyzed independently, so the CLI runs one pipeline per file
//! across rayon workers and merges the results afterwards.

pub mod analysis;
pub mod cli;
pub mod discover;
pub mod parser;
pub mod report;

pub use analysis::{
    analyze, survey, ClassDependencyStats, ClassMemberTable, DeclarationCounts, DependencyLink,
    FileStats, FileTally, FunctionRecord, MemberBinding, TypeDependency,
};
pub use parser::{ParseError, ParsedSource, SwiftParser};
pub use report::ProjectStats;
