//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the stats document for downstream tooling (visualization,
//!   architecture review)

use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::FileStats;

/// The project-level stats document: every analyzed file's record, sorted
/// by display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStats {
    pub files: Vec<FileStats>,
}

impl ProjectStats {
    /// Build the document from per-file results in any order.
    pub fn new(mut files: Vec<FileStats>) -> Self {
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Self { files }
    }
}

/// Render the stats document as pretty-printed JSON.
pub fn render_json(project: &ProjectStats) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

/// Write the stats document to a file.
pub fn save_json(path: &Path, project: &ProjectStats) -> anyhow::Result<()> {
    let mut json = render_json(project)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    lines: usize,
    structs: usize,
    classes: usize,
    enums: usize,
    functions: usize,
    links: usize,
}

fn totals(project: &ProjectStats) -> Totals {
    project.files.iter().fold(Totals::default(), |mut acc, f| {
        acc.lines += f.file_line_count;
        acc.structs += f.struct_count;
        acc.classes += f.class_count;
        acc.enums += f.enum_count;
        acc.functions += f.function_records.len();
        acc.links += f.dependency_links.len();
        acc
    })
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(root: &str, project: &ProjectStats, skipped: usize) {
    // Header
    println!();
    print!("  ");
    print!("{}", "swiftmap".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", root);
    print!("  {}", "Files: ".dimmed());
    if skipped > 0 {
        println!(
            "{} {}",
            project.files.len(),
            format!("({} skipped)", skipped).dimmed()
        );
    } else {
        println!("{}", project.files.len());
    }
    println!();

    for stats in &project.files {
        write_file_block(stats);
    }

    write_totals(project);
    println!();
}

fn write_file_block(stats: &FileStats) {
    println!("  {}", stats.name.blue());
    println!(
        "      {} lines   {} structs   {} classes   {} enums   {} functions",
        stats.file_line_count,
        stats.struct_count,
        stats.class_count,
        stats.enum_count,
        stats.function_records.len()
    );

    for link in &stats.dependency_links {
        println!(
            "      {}",
            format!("{} -> {} ({})", link.source, link.target, link.count).dimmed()
        );
    }
    println!();
}

fn write_totals(project: &ProjectStats) {
    let t = totals(project);

    println!("  {}", "Totals:".bold());
    println!("    {:<12} {:>6}", "lines", t.lines);
    println!("    {:<12} {:>6}", "structs", t.structs);
    println!("    {:<12} {:>6}", "classes", t.classes);
    println!("    {:<12} {:>6}", "enums", t.enums);
    println!("    {:<12} {:>6}", "functions", t.functions);
    println!("    {:<12} {:>6}", "links", t.links);
}
