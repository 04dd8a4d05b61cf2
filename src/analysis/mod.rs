//! Per-file analysis core.
//!
//! A parsed file flows through two stages:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ ParsedSource │────▶│ visitor      │────▶│ FileTally    │
//! └──────────────┘     │ (tree walk)  │     │ (raw counts) │
//!                      └──────────────┘     └──────┬───────┘
//!                                                  │
//!                                                  ▼
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │ stats        │────▶│ FileStats    │
//!                      │ (aggregate)  │     │ (serialized) │
//!                      └──────────────┘     └──────────────┘
//! ```
//!
//! The walk degrades on anything irregular and the aggregation is pure, so
//! neither stage can fail; parsing is the last fallible step. Files are
//! independent of each other, which is what lets the CLI fan them out
//! across rayon workers without coordination.

mod stats;
mod visitor;

pub use stats::{
    derive_histogram, derive_links, file_stats, ClassDependencyStats, DependencyHistogram,
    DependencyLink, FileStats, TypeDependency,
};
pub use visitor::{
    survey, ClassMemberTable, DeclarationCounts, FileTally, FunctionRecord, MemberBinding,
};

use crate::parser::ParsedSource;

/// Run the full per-file pipeline: survey the tree, then aggregate the
/// tally into the output record under the file's display name.
pub fn analyze(parsed: &ParsedSource) -> FileStats {
    let tally = survey(parsed);
    file_stats(&parsed.name, &tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SwiftParser;

    #[test]
    fn test_analyze_carries_display_name_through() {
        let parser = SwiftParser::new();
        let parsed = parser
            .parse_source("Sources/App/Model.swift", b"struct S {}\n".to_vec())
            .unwrap();

        let stats = analyze(&parsed);
        assert_eq!(stats.name, "Sources/App/Model.swift");
        assert_eq!(stats.struct_count, 1);
    }

    #[test]
    fn test_analyze_links_classes_to_member_types() {
        let source = r#"
class A {
    var x: Int
    var y: Int
    var z: String
}

class B {
    var a: A
}
"#;
        let parser = SwiftParser::new();
        let parsed = parser
            .parse_source("Demo.swift", source.as_bytes().to_vec())
            .unwrap();

        let stats = analyze(&parsed);
        assert_eq!(stats.class_count, 2);
        assert_eq!(stats.dependency_links.len(), 3);
        assert!(stats
            .dependency_links
            .iter()
            .any(|l| l.source == "B" && l.target == "A" && l.count == 1));
    }
}
