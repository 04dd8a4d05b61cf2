//! Integration tests for the per-file analysis pipeline.
//!
//! These tests drive parse-then-analyze end to end on in-memory sources
//! and pin down the exact output records, including link multiplicities
//! and degradation behavior on irregular input.

use swiftmap::{analyze, DependencyLink, SwiftParser, TypeDependency};

fn analyze_source(name: &str, source: &str) -> swiftmap::FileStats {
    let parser = SwiftParser::new();
    let parsed = parser
        .parse_source(name, source.as_bytes().to_vec())
        .expect("source should parse");
    analyze(&parsed)
}

// =============================================================================
// Reference Scenario
// =============================================================================

#[test]
fn test_reference_scenario_counts_and_links() {
    let source = r#"struct S {}

class A {
    var x: Int
    var y: Int
    var z: String
}

class B {
    var a: A
}

func f() {
    print("one")
    print("two")
}
"#;

    let stats = analyze_source("Demo.swift", source);

    assert_eq!(stats.struct_count, 1);
    assert_eq!(stats.class_count, 2);
    assert_eq!(stats.enum_count, 0);

    assert_eq!(stats.function_records.len(), 1);
    assert_eq!(stats.function_records[0].name, "f");
    assert_eq!(stats.function_records[0].body_line_count, 2);

    assert_eq!(stats.class_dependency_stats.len(), 2);
    assert_eq!(stats.class_dependency_stats[0].class_name, "A");
    assert_eq!(
        stats.class_dependency_stats[0].dependencies,
        vec![
            TypeDependency {
                type_name: "Int".to_string(),
                count: 2,
            },
            TypeDependency {
                type_name: "String".to_string(),
                count: 1,
            },
        ]
    );
    assert_eq!(stats.class_dependency_stats[1].class_name, "B");
    assert_eq!(
        stats.class_dependency_stats[1].dependencies,
        vec![TypeDependency {
            type_name: "A".to_string(),
            count: 1,
        }]
    );

    assert_eq!(
        stats.dependency_links,
        vec![
            DependencyLink {
                source: "A".to_string(),
                target: "Int".to_string(),
                count: 2,
            },
            DependencyLink {
                source: "A".to_string(),
                target: "String".to_string(),
                count: 1,
            },
            DependencyLink {
                source: "B".to_string(),
                target: "A".to_string(),
                count: 1,
            },
        ]
    );
}

#[test]
fn test_counts_reconcile_with_links() {
    let source = r#"struct S {}

class A {
    var x: Int
    var y: Int
    var z: String
}

class B {
    var a: A
}
"#;
    let stats = analyze_source("Demo.swift", source);

    // Every histogram cell surfaces as exactly one link with the same count.
    let total_from_links: usize = stats.dependency_links.iter().map(|l| l.count).sum();
    let total_from_stats: usize = stats
        .class_dependency_stats
        .iter()
        .flat_map(|c| c.dependencies.iter())
        .map(|d| d.count)
        .sum();
    assert_eq!(total_from_links, 4);
    assert_eq!(total_from_links, total_from_stats);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_self_reference_produces_self_loop() {
    let source = r#"class N {
    var next: N
}
"#;
    let stats = analyze_source("List.swift", source);

    assert_eq!(
        stats.dependency_links,
        vec![DependencyLink {
            source: "N".to_string(),
            target: "N".to_string(),
            count: 1,
        }]
    );
}

#[test]
fn test_zero_member_class_still_has_entry() {
    let source = r#"class Marker {}
"#;
    let stats = analyze_source("Marker.swift", source);

    assert_eq!(stats.class_count, 1);
    assert_eq!(stats.class_dependency_stats.len(), 1);
    assert_eq!(stats.class_dependency_stats[0].class_name, "Marker");
    assert!(stats.class_dependency_stats[0].dependencies.is_empty());
    assert!(stats.dependency_links.is_empty());
}

#[test]
fn test_empty_source_yields_empty_record() {
    let stats = analyze_source("Empty.swift", "");

    assert_eq!(stats.struct_count, 0);
    assert_eq!(stats.class_count, 0);
    assert_eq!(stats.enum_count, 0);
    assert!(stats.function_records.is_empty());
    assert!(stats.class_dependency_stats.is_empty());
    assert!(stats.dependency_links.is_empty());
    // An empty rendering still counts as one line fragment.
    assert_eq!(stats.file_line_count, 1);
}

#[test]
fn test_malformed_source_degrades_without_panicking() {
    let source = r#"class Partial {
    var ok: Int
    func lost( {
}
"#;
    let parser = SwiftParser::new();
    let parsed = parser
        .parse_source("Mangled.swift", source.as_bytes().to_vec())
        .expect("malformed source still produces a tree");

    assert!(parsed.has_parse_errors());

    let stats = analyze(&parsed);
    assert_eq!(stats.name, "Mangled.swift");
    assert_eq!(stats.file_line_count, 5);
}

#[test]
fn test_file_line_count_matches_rendered_text() {
    let stats = analyze_source("Lines.swift", "struct S {}\nstruct T {}\n");
    assert_eq!(stats.file_line_count, 3);
    assert_eq!(stats.struct_count, 2);
}

#[test]
fn test_nested_declarations_all_counted() {
    let source = r#"struct Outer {
    class Mid {
        enum Deep {
            case a
        }
    }
}

func wrapper() {
    struct Local {
    }
}
"#;
    let stats = analyze_source("Nested.swift", source);

    assert_eq!(stats.struct_count, 2);
    assert_eq!(stats.class_count, 1);
    assert_eq!(stats.enum_count, 1);
    assert_eq!(stats.function_records.len(), 1);
}
