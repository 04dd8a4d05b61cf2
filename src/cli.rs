//! Command-line interface for swiftmap.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tree_sitter::Node;

use crate::analysis::{self, FileStats};
use crate::discover;
use crate::parser::{ParseError, ParsedSource, SwiftParser};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Swift source metrics and class dependency analyzer.
///
/// Swiftmap walks a Swift source tree, counts declarations, measures
/// function bodies, and derives a class-to-class dependency graph from
/// stored property types. Results come out as a colored terminal report
/// or a JSON stats document for downstream tooling.
#[derive(Parser)]
#[command(name = "swiftmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a Swift source tree and report structure metrics
    #[command(visible_alias = "stats")]
    Analyze(AnalyzeArgs),
    /// Parse one Swift file and print its syntax tree
    Dump(DumpArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Write the JSON stats document to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Glob patterns (relative to PATH) to exclude
    #[arg(short = 'x', long = "exclude")]
    pub excludes: Vec<String>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the dump command.
#[derive(Parser)]
pub struct DumpArgs {
    /// Swift file to parse
    pub file: PathBuf,
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let excludes = match discover::build_excludes(&args.excludes) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = discover::collect_swift_files(&abs_path, &excludes)?;
    if files.is_empty() {
        eprintln!("Warning: no Swift files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let (project, skipped) = analyze_files(&files, &abs_path, args.no_progress);

    // Output results
    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => println!("{}", report::render_json(&project)?),
        _ => report::write_pretty(&path_str, &project, skipped),
    }

    if let Some(output) = &args.output {
        report::save_json(output, &project)?;
        if args.format != "json" {
            println!("  Stats written to {}", output.display());
            println!();
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Analyze files in parallel, then report warnings sequentially so stderr
/// stays readable. Returns the sorted project document and how many files
/// were skipped.
fn analyze_files(files: &[PathBuf], base: &Path, no_progress: bool) -> (report::ProjectStats, usize) {
    let parser = SwiftParser::new();
    let progress = make_progress(files.len(), no_progress);

    let results: Vec<(String, Result<(FileStats, bool), ParseError>)> = files
        .par_iter()
        .map(|path| {
            let name = display_name(path, base);
            let outcome = parser
                .parse_file(path, &name)
                .map(|parsed| (analysis::analyze(&parsed), parsed.has_parse_errors()));
            progress.inc(1);
            (name, outcome)
        })
        .collect();
    progress.finish_and_clear();

    let mut stats = Vec::new();
    let mut skipped = 0;
    for (name, outcome) in results {
        match outcome {
            Ok((file_stats, had_errors)) => {
                if had_errors {
                    eprintln!(
                        "Warning: {} contains syntax errors, counts may be partial",
                        name
                    );
                }
                stats.push(file_stats);
            }
            Err(e) => {
                skipped += 1;
                eprintln!("Warning: failed to analyze {}: {}", name, e);
            }
        }
    }

    (report::ProjectStats::new(stats), skipped)
}

fn make_progress(total: usize, no_progress: bool) -> ProgressBar {
    if no_progress {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.set_message("analyzing");
    bar
}

fn display_name(path: &Path, base: &Path) -> String {
    // Single file scan: the base is the file itself.
    if path == base {
        return path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
    }

    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Run the dump command.
pub fn run_dump(args: &DumpArgs) -> anyhow::Result<i32> {
    let abs_path = match args.file.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.file, e);
            return Ok(EXIT_ERROR);
        }
    };

    let name = display_name(&abs_path, &abs_path);
    let parser = SwiftParser::new();
    let parsed = parser.parse_file(&abs_path, &name)?;

    if parsed.has_parse_errors() {
        eprintln!("Warning: {} contains syntax errors", name);
    }

    let mut rendered = String::new();
    write_tree(parsed.root(), None, &parsed, 0, &mut rendered);
    print!("{}", rendered);

    Ok(EXIT_SUCCESS)
}

/// Render one node per line, indented by depth, with grammar field names
/// and leaf text where it adds information.
fn write_tree(
    node: Node,
    field: Option<&str>,
    parsed: &ParsedSource,
    depth: usize,
    out: &mut String,
) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    match field {
        Some(f) => out.push_str(&format!("{}: {}", f, node.kind())),
        None => out.push_str(node.kind()),
    }
    if node.child_count() == 0 {
        let text = parsed.node_text(node);
        if text != node.kind() {
            out.push_str(&format!(" {:?}", text));
        }
    }
    out.push('\n');

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            write_tree(cursor.node(), cursor.field_name(), parsed, depth + 1, out);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_base_relative() {
        let base = Path::new("/project");
        let path = Path::new("/project/Sources/App/Model.swift");
        assert_eq!(display_name(path, base), "Sources/App/Model.swift");
    }

    #[test]
    fn test_display_name_for_single_file_scan() {
        let path = Path::new("/project/Sources/Main.swift");
        assert_eq!(display_name(path, path), "Main.swift");
    }

    #[test]
    fn test_display_name_outside_base_stays_absolute() {
        let base = Path::new("/project");
        let path = Path::new("/elsewhere/Main.swift");
        assert_eq!(display_name(path, base), "/elsewhere/Main.swift");
    }

    #[test]
    fn test_tree_rendering_shows_declarations() {
        let parser = SwiftParser::new();
        let parsed = parser
            .parse_source("Test.swift", b"class Point { var x: Int }\n".to_vec())
            .unwrap();

        let mut out = String::new();
        write_tree(parsed.root(), None, &parsed, 0, &mut out);

        assert!(out.contains("class_declaration"));
        assert!(out.contains("property_declaration"));
        assert!(out.contains("\"Point\""));
    }
}
