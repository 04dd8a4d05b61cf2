//! Pure aggregation of a survey tally into the per-file stats record.
//!
//! Nothing in this module can fail: the tally is already degraded data, and
//! aggregation is a total function over it. The same tally always produces
//! the same record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::visitor::{ClassMemberTable, FileTally, FunctionRecord};

/// Per-class occurrence counts of declared member types, in class source
/// order. The inner map iterates type names lexicographically, which fixes
/// the output order everywhere downstream.
pub type DependencyHistogram = Vec<(String, BTreeMap<String, usize>)>;

/// One counted type reference inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDependency {
    pub type_name: String,
    pub count: usize,
}

/// A class and every type it references through its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDependencyStats {
    pub class_name: String,
    pub dependencies: Vec<TypeDependency>,
}

/// One directed edge of the dependency graph: `source` references `target`
/// `count` times. Self loops are legitimate edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyLink {
    pub source: String,
    pub target: String,
    pub count: usize,
}

/// The complete per-file output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub name: String,
    pub file_line_count: usize,
    pub struct_count: usize,
    pub class_count: usize,
    pub enum_count: usize,
    pub function_records: Vec<FunctionRecord>,
    pub class_dependency_stats: Vec<ClassDependencyStats>,
    pub dependency_links: Vec<DependencyLink>,
}

/// Count declared types per class, flattening every statement group of
/// every class. Both levels flatten: a multi-binding statement contributes
/// each of its bindings, not one entry for the group.
pub fn derive_histogram(table: &ClassMemberTable) -> DependencyHistogram {
    table
        .classes()
        .map(|(name, groups)| {
            let mut counts = BTreeMap::new();
            for binding in groups.iter().flatten() {
                *counts.entry(binding.declared_type.clone()).or_insert(0) += 1;
            }
            (name.to_string(), counts)
        })
        .collect()
}

/// One link per histogram cell with a nonzero count.
pub fn derive_links(histogram: &DependencyHistogram) -> Vec<DependencyLink> {
    let mut links = Vec::new();
    for (source, counts) in histogram {
        for (target, &count) in counts {
            if count > 0 {
                links.push(DependencyLink {
                    source: source.clone(),
                    target: target.clone(),
                    count,
                });
            }
        }
    }
    links
}

/// Assemble the final record for one file. Every class in the member table
/// gets a `class_dependency_stats` entry, including classes whose members
/// were all dropped or absent.
pub fn file_stats(name: &str, tally: &FileTally) -> FileStats {
    let histogram = derive_histogram(&tally.members);
    let dependency_links = derive_links(&histogram);

    let class_dependency_stats = histogram
        .into_iter()
        .map(|(class_name, counts)| ClassDependencyStats {
            class_name,
            dependencies: counts
                .into_iter()
                .map(|(type_name, count)| TypeDependency { type_name, count })
                .collect(),
        })
        .collect();

    FileStats {
        name: name.to_string(),
        file_line_count: tally.line_count,
        struct_count: tally.counts.structs,
        class_count: tally.counts.classes,
        enum_count: tally.counts.enums,
        function_records: tally.functions.clone(),
        class_dependency_stats,
        dependency_links,
    }
}
