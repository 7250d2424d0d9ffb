//! Output formatting for comparison results.
//!
//! File differences are rendered as context diffs: a two-line header, then
//! one block per group of nearby changes, each showing the old and the new
//! side with up to `context_lines` unchanged lines around the changes.
//! Directory events become one-line notices.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::output::format_range;
//!
//! assert_eq!(format_range(0, 3), "1,3");
//! assert_eq!(format_range(4, 5), "5");
//! assert_eq!(format_range(4, 4), "4");
//! ```

use crate::diff::{Comparison, DiffEvent, DiffStats, FileDiff};
use crate::edit::{EditKind, EditOp};
use crate::error::OutputError;
use chrono::{DateTime, Local};
use colored::*;
use serde::Serialize;
use std::mem;
use std::path::Path;
use std::time::SystemTime;

/// Default number of unchanged lines shown around a change.
pub const DEFAULT_CONTEXT: usize = 3;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f %z";

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with a summary line
    Terminal,
    /// JSON report of all events
    Json,
    /// Plain context diff, no colors (suitable for piping)
    Plain,
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Unchanged lines shown around each change
    pub context_lines: usize,
    /// Only report which files differ
    pub brief: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT,
            brief: false,
        }
    }
}

/// What a rendered line is, so the terminal format can color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// `***`/`---` file header
    Header,
    /// `***************` between groups
    Separator,
    /// `*** 1,3 ****` and `--- 1,3 ----`
    Range,
    Context,
    Deleted,
    Inserted,
    Changed,
    /// Directory-level messages and brief mode reports
    Notice,
}

/// Formats a comparison according to the specified format and options.
///
/// Plain output is empty when nothing differs.
pub fn format_comparison(
    comparison: &Comparison,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_terminal(comparison, options)),
        OutputFormat::Json => format_json(comparison),
        OutputFormat::Plain => Ok(format_plain(comparison, options)),
    }
}

fn format_plain(comparison: &Comparison, options: &OutputOptions) -> String {
    let mut output = String::new();
    for (_, text) in comparison_lines(comparison, options) {
        output.push_str(&text);
        output.push('\n');
    }
    output
}

/// Color scheme: headers bold, removed red, added green, changed yellow,
/// group markers cyan.
fn format_terminal(comparison: &Comparison, options: &OutputOptions) -> String {
    if !comparison.has_differences() {
        return format!("{}\n", "No differences detected.".dimmed());
    }

    let mut output = String::new();
    for (role, text) in comparison_lines(comparison, options) {
        output.push_str(&paint(role, &text).to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(comparison));
    output.push('\n');
    output
}

fn paint(role: LineRole, text: &str) -> ColoredString {
    match role {
        LineRole::Header => text.bold(),
        LineRole::Separator | LineRole::Range => text.cyan(),
        LineRole::Context => text.normal(),
        LineRole::Deleted => text.red(),
        LineRole::Inserted => text.green(),
        LineRole::Changed => text.yellow(),
        LineRole::Notice => text.bright_yellow().bold(),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    differences: bool,
    stats: DiffStats,
    events: &'a [DiffEvent],
}

fn format_json(comparison: &Comparison) -> Result<String, OutputError> {
    let report = JsonReport {
        differences: comparison.has_differences(),
        stats: comparison.stats(),
        events: &comparison.events,
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn comparison_lines(comparison: &Comparison, options: &OutputOptions) -> Vec<(LineRole, String)> {
    let mut lines = Vec::new();
    for event in &comparison.events {
        match event {
            DiffEvent::Compared(file) if !file.has_differences() => {}
            DiffEvent::Compared(file) if !options.brief => {
                lines.extend(context_diff_lines(file, options.context_lines));
            }
            _ => lines.push((LineRole::Notice, event.to_string())),
        }
    }
    lines
}

/// Renders one file comparison as a plain context diff. Returns an empty
/// string when the files are equal.
pub fn render_context_diff(file: &FileDiff, context: usize) -> String {
    let mut output = String::new();
    for (_, text) in context_diff_lines(file, context) {
        output.push_str(&text);
        output.push('\n');
    }
    output
}

fn context_diff_lines(file: &FileDiff, context: usize) -> Vec<(LineRole, String)> {
    let groups = group_edits(file.edits.ops(), context);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![
        (LineRole::Header, header("***", &file.left, file.left_modified)),
        (LineRole::Header, header("---", &file.right, file.right_modified)),
    ];

    for group in &groups {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        lines.push((LineRole::Separator, "*".repeat(15)));

        lines.push((
            LineRole::Range,
            format!("*** {} ****", format_range(first.a_start, last.a_end)),
        ));
        if group
            .iter()
            .any(|op| matches!(op.kind, EditKind::Replace | EditKind::Delete))
        {
            for op in group.iter().filter(|op| op.kind != EditKind::Insert) {
                for line in file.old_lines.get(op.a_range()).unwrap_or_default() {
                    lines.push(side_line(op.kind, line.text()));
                }
            }
        }

        lines.push((
            LineRole::Range,
            format!("--- {} ----", format_range(first.b_start, last.b_end)),
        ));
        if group
            .iter()
            .any(|op| matches!(op.kind, EditKind::Replace | EditKind::Insert))
        {
            for op in group.iter().filter(|op| op.kind != EditKind::Delete) {
                for line in file.new_lines.get(op.b_range()).unwrap_or_default() {
                    lines.push(side_line(op.kind, line.text()));
                }
            }
        }
    }

    lines
}

fn side_line(kind: EditKind, text: &str) -> (LineRole, String) {
    let (role, prefix) = match kind {
        EditKind::Equal => (LineRole::Context, "  "),
        EditKind::Delete => (LineRole::Deleted, "- "),
        EditKind::Insert => (LineRole::Inserted, "+ "),
        EditKind::Replace => (LineRole::Changed, "! "),
    };
    (role, format!("{prefix}{text}"))
}

fn header(marker: &str, path: &Path, modified: Option<SystemTime>) -> String {
    match modified {
        Some(time) => format!("{} {}\t{}", marker, path.display(), format_timestamp(time)),
        None => format!("{} {}", marker, path.display()),
    }
}

/// Formats a modification time in local time with nanoseconds and offset.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Formats a half-open range as a 1-based context-diff range: `start,end`
/// for two or more lines, a single number otherwise. An empty range is
/// shown as the line before it.
pub fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    let beginning = if length == 0 { start } else { start + 1 };
    if length <= 1 {
        return beginning.to_string();
    }
    format!("{},{}", beginning, beginning + length - 1)
}

/// Splits an edit list into groups of changes with up to `context` equal
/// lines on either side. Equal runs longer than twice the context start a
/// new group. Returns no groups when nothing changed.
pub fn group_edits(ops: &[EditOp], context: usize) -> Vec<Vec<EditOp>> {
    let mut codes = ops.to_vec();

    if let Some(first) = codes.first_mut() {
        if first.kind == EditKind::Equal {
            *first = EditOp::new(
                EditKind::Equal,
                first.a_start.max(first.a_end.saturating_sub(context)),
                first.a_end,
                first.b_start.max(first.b_end.saturating_sub(context)),
                first.b_end,
            );
        }
    }
    if let Some(last) = codes.last_mut() {
        if last.kind == EditKind::Equal {
            *last = EditOp::new(
                EditKind::Equal,
                last.a_start,
                last.a_end.min(last.a_start + context),
                last.b_start,
                last.b_end.min(last.b_start + context),
            );
        }
    }

    let mut groups = Vec::new();
    let mut group = Vec::new();
    for mut op in codes {
        if op.kind == EditKind::Equal && op.a_len() > 2 * context {
            group.push(EditOp::new(
                EditKind::Equal,
                op.a_start,
                op.a_end.min(op.a_start + context),
                op.b_start,
                op.b_end.min(op.b_start + context),
            ));
            groups.push(mem::take(&mut group));
            op = EditOp::new(
                EditKind::Equal,
                op.a_start.max(op.a_end - context),
                op.a_end,
                op.b_start.max(op.b_end - context),
                op.b_end,
            );
        }
        group.push(op);
    }

    let only_equal = group.len() == 1 && group[0].kind == EditKind::Equal;
    if !group.is_empty() && !only_equal {
        groups.push(group);
    }
    groups
}

fn format_summary(comparison: &Comparison) -> String {
    if !comparison.has_differences() {
        return "Summary: No differences".to_string();
    }

    let (files, only_in, mismatches) = comparison.counts();
    let stats = comparison.stats();

    let mut parts = Vec::new();
    if files > 0 {
        parts.push(format!("{} file(s) differ", files));
    }
    if only_in > 0 {
        parts.push(format!("{} only in one tree", only_in));
    }
    if mismatches > 0 {
        parts.push(format!("{} kind mismatch(es)", mismatches));
    }
    if stats.deleted > 0 {
        parts.push(format!("{} deleted", stats.deleted));
    }
    if stats.inserted > 0 {
        parts.push(format!("{} inserted", stats.inserted));
    }
    if stats.replaced > 0 {
        parts.push(format!("{} replaced", stats.replaced));
    }
    if stats.unchanged > 0 {
        parts.push(format!("{} unchanged", stats.unchanged));
    }

    format!("Summary: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{compute_diff, DiffConfig};
    use crate::options::ComparisonOptions;
    use crate::reader::parse_lines;
    use std::path::PathBuf;

    fn file_diff(old: &str, new: &str) -> FileDiff {
        let options = ComparisonOptions::default();
        let old_lines = parse_lines(old, &options);
        let new_lines = parse_lines(new, &options);
        let edits = compute_diff(&old_lines, &new_lines, &options, &DiffConfig::default()).unwrap();
        FileDiff {
            left: PathBuf::from("old.txt"),
            right: PathBuf::from("new.txt"),
            stats: DiffStats::from_edits(&edits),
            edits,
            old_lines,
            new_lines,
            left_modified: None,
            right_modified: None,
        }
    }

    fn eq(a: (usize, usize), b: (usize, usize)) -> EditOp {
        EditOp::new(EditKind::Equal, a.0, a.1, b.0, b.1)
    }

    fn rep(a: (usize, usize), b: (usize, usize)) -> EditOp {
        EditOp::new(EditKind::Replace, a.0, a.1, b.0, b.1)
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(0, 1), "1");
        assert_eq!(format_range(0, 2), "1,2");
        assert_eq!(format_range(3, 3), "3");
        assert_eq!(format_range(0, 0), "0");
    }

    #[test]
    fn test_group_edits_trims_outer_context() {
        let ops = [eq((0, 10), (0, 10)), rep((10, 11), (10, 11)), eq((11, 20), (11, 20))];
        let groups = group_edits(&ops, 3);
        assert_eq!(
            groups,
            vec![vec![
                eq((7, 10), (7, 10)),
                rep((10, 11), (10, 11)),
                eq((11, 14), (11, 14)),
            ]]
        );
    }

    #[test]
    fn test_group_edits_splits_on_long_equal_run() {
        let ops = [
            rep((0, 1), (0, 1)),
            eq((1, 10), (1, 10)),
            rep((10, 11), (10, 11)),
        ];
        let groups = group_edits(&ops, 2);
        assert_eq!(
            groups,
            vec![
                vec![rep((0, 1), (0, 1)), eq((1, 3), (1, 3))],
                vec![eq((8, 10), (8, 10)), rep((10, 11), (10, 11))],
            ]
        );
    }

    #[test]
    fn test_group_edits_without_changes() {
        assert!(group_edits(&[eq((0, 5), (0, 5))], 3).is_empty());
        assert!(group_edits(&[], 3).is_empty());
    }

    #[test]
    fn test_render_context_diff_replace() {
        let diff = file_diff("a\nb\nc\n", "a\nB\nc\n");
        let expected = "\
*** old.txt
--- new.txt
***************
*** 1,3 ****
  a
! b
  c
--- 1,3 ----
  a
! B
  c
";
        assert_eq!(render_context_diff(&diff, 3), expected);
    }

    #[test]
    fn test_render_context_diff_insert_only_skips_old_lines() {
        let diff = file_diff("a\n", "a\nb\n");
        let expected = "\
*** old.txt
--- new.txt
***************
*** 1 ****
--- 1,2 ----
  a
+ b
";
        assert_eq!(render_context_diff(&diff, 3), expected);
    }

    #[test]
    fn test_render_context_diff_equal_files() {
        let diff = file_diff("x 1.0\n", "x 1.000000000001\n");
        assert_eq!(render_context_diff(&diff, 3), "");
    }

    #[test]
    fn test_header_with_timestamp() {
        let line = header("***", Path::new("a.txt"), Some(SystemTime::UNIX_EPOCH));
        assert!(line.starts_with("*** a.txt\t"));
        assert!(line.contains(".000000000 "));
    }

    #[test]
    fn test_brief_plain_output() {
        let comparison = Comparison {
            events: vec![DiffEvent::Compared(file_diff("1\n", "2\n"))],
        };
        let options = OutputOptions {
            brief: true,
            ..Default::default()
        };
        let output = format_comparison(&comparison, &OutputFormat::Plain, &options).unwrap();
        assert_eq!(output, "Files old.txt and new.txt differ\n");
    }

    #[test]
    fn test_plain_output_empty_when_equal() {
        let comparison = Comparison {
            events: vec![DiffEvent::Compared(file_diff("1\n", "1\n"))],
        };
        let output =
            format_comparison(&comparison, &OutputFormat::Plain, &OutputOptions::default())
                .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_format_json() {
        let comparison = Comparison {
            events: vec![
                DiffEvent::Compared(file_diff("1\n", "2\n")),
                DiffEvent::OnlyIn {
                    base: PathBuf::from("dir1"),
                    name: PathBuf::from("extra.txt"),
                },
            ],
        };
        let output = format_json(&comparison).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["differences"], serde_json::json!(true));
        assert_eq!(value["events"][0]["type"], "compared");
        assert_eq!(value["events"][0]["edits"][0]["kind"], "replace");
        assert_eq!(value["events"][1]["type"], "only_in");
        assert_eq!(value["stats"]["replaced"], 1);
    }

    #[test]
    fn test_format_summary() {
        let comparison = Comparison {
            events: vec![
                DiffEvent::Compared(file_diff("a\nb\n", "a\nc\nd\n")),
                DiffEvent::OnlyIn {
                    base: PathBuf::from("dir2"),
                    name: PathBuf::from("new"),
                },
            ],
        };
        let summary = format_summary(&comparison);
        assert!(summary.starts_with("Summary: 1 file(s) differ"));
        assert!(summary.contains("1 only in one tree"));
        assert!(summary.contains("1 unchanged"));
    }

    #[test]
    fn test_format_summary_no_differences() {
        assert_eq!(format_summary(&Comparison::new()), "Summary: No differences");
    }

    #[test]
    fn test_terminal_no_differences() {
        let output = format_terminal(&Comparison::new(), &OutputOptions::default());
        assert!(output.contains("No differences detected."));
    }
}
