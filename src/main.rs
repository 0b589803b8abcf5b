//! diskstat - disk usage statistics for a directory subtree.
//!
//! Usage:
//!   dstat [PATH]               Scan and print the usage report
//!   dstat scan [PATH]          Scan with sort/depth/progress flags
//!   dstat extensions [PATH]    Usage-by-extension report
//!   dstat export [PATH]        Export scan results to JSON
//!   dstat --help               Show help

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};

use diskstat_analyze::{ExtensionReport, SortDirection, SortKey, sorted_children};
use diskstat_core::{FailureKind, format_size};
use diskstat_scan::{ScanEngine, ScanOptions, ScanProgress, ScanResult, UsageNode};

#[derive(Parser)]
#[command(
    name = "diskstat",
    version,
    about = "Disk usage statistics for a directory subtree",
    long_about = "diskstat walks a directory once and reports aggregate sizes, \
                  per-node percentages and byte totals per file extension, \
                  surviving permission denials and vanished entries without \
                  aborting the scan."
)]
struct Cli {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory and print the usage report
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum depth to display
        #[arg(short, long, default_value = "3")]
        depth: u32,

        /// Show all levels (no depth limit on display)
        #[arg(short, long)]
        all: bool,

        /// Number of entries to show per directory
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,

        /// Sort key for children
        #[arg(short, long, default_value = "size")]
        sort: SortField,

        /// Sort direction
        #[arg(short, long, default_value = "desc")]
        order: Order,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Fold extension keys to lowercase
        #[arg(long)]
        fold_case: bool,

        /// Emit progress on stderr at this interval (e.g. "500ms", "2s")
        #[arg(short, long)]
        progress: Option<String>,

        /// Cancel the scan after this long, keeping the partial result
        #[arg(long)]
        timeout: Option<String>,
    },

    /// Usage-by-extension report
    Extensions {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export scan results to JSON
    Export {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SortField {
    #[default]
    Size,
    Name,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Size => SortKey::Size,
            SortField::Name => SortKey::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Order {
    #[default]
    Desc,
    Asc,
}

impl From<Order> for SortDirection {
    fn from(order: Order) -> Self {
        match order {
            Order::Desc => SortDirection::Descending,
            Order::Asc => SortDirection::Ascending,
        }
    }
}

/// How the tree view is rendered.
struct TreeDisplay {
    max_depth: u32,
    top_n: usize,
    key: SortKey,
    direction: SortDirection,
}

impl Default for TreeDisplay {
    fn default() -> Self {
        Self {
            max_depth: 3,
            top_n: 10,
            key: SortKey::Size,
            direction: SortDirection::Descending,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Scan {
            path,
            depth,
            all,
            top,
            sort,
            order,
            follow_symlinks,
            fold_case,
            progress,
            timeout,
        }) => {
            let display = TreeDisplay {
                max_depth: if all { u32::MAX } else { depth },
                top_n: top,
                key: sort.into(),
                direction: order.into(),
            };
            let progress = progress.as_deref().map(parse_duration).transpose()?;
            let timeout = timeout.as_deref().map(parse_duration).transpose()?;
            run_scan(&path, display, follow_symlinks, fold_case, progress, timeout)?;
        }
        Some(Command::Extensions { path, top, format }) => {
            run_extensions(&path, top, format)?;
        }
        Some(Command::Export { path, output }) => {
            run_export(&path, output)?;
        }
        None => {
            run_scan(&cli.path, TreeDisplay::default(), false, false, None, None)?;
        }
    }

    Ok(())
}

/// Scan and print the full report: summary, tree view, extension usage and
/// error summary.
fn run_scan(
    path: &Path,
    display: TreeDisplay,
    follow_symlinks: bool,
    fold_case: bool,
    progress: Option<Duration>,
    timeout: Option<Duration>,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    eprintln!("Scanning {}...", path.display());
    let result = execute_scan(&path, follow_symlinks, fold_case, progress, timeout)?;

    println!();
    println!("{}", "─".repeat(60));
    println!(" {} - {}", path.display(), format_size(result.total_size()));
    println!(
        " {} files, {} directories, {} symlinks",
        result.stats.files, result.stats.dirs, result.stats.symlinks
    );
    println!(" Scanned in {:.2}s", result.scan_duration.as_secs_f64());
    println!("{}", "─".repeat(60));
    println!();

    println!("Disk Usage Tree View:");
    print_node(&result.root, 0, &display, result.total_size());

    println!();
    println!("File Extension Usage:");
    let report = ExtensionReport::new(&result.extensions, result.total_size());
    if report.is_empty() {
        println!("  (no files measured)");
    }
    for row in report.top_n(display.top_n.max(10)) {
        println!(
            "  {:<18} {:>12} ({:.2}%)",
            row.label(),
            format_size(row.size),
            report.share(row)
        );
    }

    print_error_summary(&result);

    Ok(())
}

/// Print the extension report alone.
fn run_extensions(path: &Path, top: usize, format: OutputFormat) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    eprintln!("Scanning {}...", path.display());
    let result = execute_scan(&path, false, false, None, None)?;
    let report = ExtensionReport::new(&result.extensions, result.total_size());

    match format {
        OutputFormat::Text => {
            println!();
            println!("File Extension Usage (sorted by usage):");
            for row in report.top_n(top) {
                println!(
                    "  {:<18} {:>12} ({:.2}%)",
                    row.label(),
                    format_size(row.size),
                    report.share(row)
                );
            }
            if report.len() > top {
                println!("  ... and {} more", report.len() - top);
            }
            print_error_summary(&result);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Export a full scan result to JSON.
fn run_export(path: &Path, output: Option<PathBuf>) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    eprintln!("Scanning {}...", path.display());
    let result = execute_scan(&path, false, false, None, None)?;

    let json = serde_json::to_string_pretty(&result)?;
    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Run the engine, wiring up the optional progress spinner and the optional
/// deadline that cancels the scan from a timer thread.
fn execute_scan(
    path: &Path,
    follow_symlinks: bool,
    fold_case: bool,
    progress: Option<Duration>,
    timeout: Option<Duration>,
) -> Result<ScanResult> {
    let options = ScanOptions::builder()
        .root(path)
        .follow_symlinks(follow_symlinks)
        .case_insensitive_extensions(fold_case)
        .progress_interval(progress.unwrap_or(Duration::ZERO))
        .build()
        .map_err(|e| eyre!("invalid scan options: {e}"))?;

    let engine = ScanEngine::new();

    if let Some(timeout) = timeout {
        let token = engine.cancellation_token();
        std::thread::spawn(move || {
            std::thread::sleep(timeout);
            token.cancel();
        });
    }

    if !options.progress_enabled() {
        return Ok(engine.scan(&options)?);
    }

    let mut rx = engine.subscribe();
    let done = Arc::new(AtomicBool::new(false));
    let painter = std::thread::spawn({
        let done = Arc::clone(&done);
        move || {
            let frames = ['|', '/', '-', '\\'];
            let mut frame = 0;
            let mut latest: Option<ScanProgress> = None;
            while !done.load(Ordering::Relaxed) {
                while let Ok(progress) = rx.try_recv() {
                    latest = Some(progress);
                }
                if let Some(ref progress) = latest {
                    eprint!(
                        "\r{} Analyzing... {} entries, {} ({}s elapsed)",
                        frames[frame % frames.len()],
                        progress.entries_processed,
                        format_size(progress.bytes_scanned),
                        progress.elapsed.as_secs()
                    );
                    frame += 1;
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            eprint!("\r{:70}\r", "");
        }
    });

    let result = engine.scan(&options);
    done.store(true, Ordering::Relaxed);
    let _ = painter.join();
    Ok(result?)
}

/// Print a node and its children, sorted fresh at every level.
fn print_node(node: &UsageNode, depth: u32, display: &TreeDisplay, total: u64) {
    let indent = "  ".repeat(depth as usize);
    let marker = if node.is_dir() { "/" } else { "" };

    println!(
        "{}{}{} - {} ({:.2}%)",
        indent,
        node.name,
        marker,
        format_size(node.size),
        node.percentage(total)
    );

    if node.is_dir() && depth < display.max_depth {
        let view = sorted_children(node, display.key, display.direction);
        let shown = view.len().min(display.top_n);

        for child in &view[..shown] {
            print_node(child, depth + 1, display, total);
        }

        if view.len() > shown {
            println!("{}  ... and {} more", indent, view.len() - shown);
        }
    }
}

/// Surface recorded failures, grouped by kind the way the report reads best.
fn print_error_summary(result: &ScanResult) {
    if !result.has_errors() {
        return;
    }

    println!();
    println!("⚠ {} issue(s) encountered during scan:", result.errors.len());

    for (kind, heading) in [
        (FailureKind::NotFound, "Missing entries:"),
        (FailureKind::PermissionDenied, "Restricted access:"),
        (FailureKind::Other, "Other errors:"),
    ] {
        let matching: Vec<_> = result.errors.iter().filter(|r| r.kind == kind).collect();
        if matching.is_empty() {
            continue;
        }
        println!("  {heading}");
        for record in matching {
            println!("    {} ({})", record.path.display(), record.message);
        }
    }

    if result.was_cancelled() {
        println!("  Scan was cancelled; totals cover entries processed before cancellation.");
    }
}

/// Parse a duration string (e.g. "500ms", "2s", "1m"); bare numbers are
/// seconds.
fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();

    if let Some(num) = s.strip_suffix("ms") {
        let millis: u64 = num.parse()?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(num) = s.strip_suffix('s') {
        let secs: f64 = num.parse()?;
        return Ok(Duration::from_secs_f64(secs));
    }
    if let Some(num) = s.strip_suffix('m') {
        let minutes: f64 = num.parse()?;
        return Ok(Duration::from_secs_f64(minutes * 60.0));
    }

    let secs: f64 = s.parse()?;
    Ok(Duration::from_secs_f64(secs))
}
