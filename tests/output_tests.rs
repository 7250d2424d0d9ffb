use numdiff_rs::output::{format_range, group_edits, render_context_diff};
use numdiff_rs::reader::parse_lines;
use numdiff_rs::{
    compute_diff, format_comparison, Comparison, ComparisonOptions, DiffConfig, DiffEvent,
    DiffStats, EditKind, EditOp, Entry, FileDiff, FileKind, OutputFormat, OutputOptions,
};
use std::path::PathBuf;

fn file_diff(old: &str, new: &str, options: &ComparisonOptions) -> FileDiff {
    let old_lines = parse_lines(old, options);
    let new_lines = parse_lines(new, options);
    let edits = compute_diff(&old_lines, &new_lines, options, &DiffConfig::default()).unwrap();
    FileDiff {
        left: PathBuf::from("a/run.out"),
        right: PathBuf::from("b/run.out"),
        stats: DiffStats::from_edits(&edits),
        edits,
        old_lines,
        new_lines,
        left_modified: None,
        right_modified: None,
    }
}

fn numbered(count: usize) -> String {
    (1..=count).map(|i| format!("line {i}\n")).collect()
}

#[test]
fn test_range_formatting() {
    assert_eq!(format_range(0, 1), "1");
    assert_eq!(format_range(2, 7), "3,7");
    assert_eq!(format_range(5, 5), "5");
}

#[test]
fn test_delete_only_group_hides_new_lines() {
    let diff = file_diff("a\nb\nc\n", "a\nc\n", &ComparisonOptions::default());
    let expected = "\
*** a/run.out
--- b/run.out
***************
*** 1,3 ****
  a
- b
  c
--- 1,2 ----
";
    assert_eq!(render_context_diff(&diff, 3), expected);
}

#[test]
fn test_distant_changes_form_separate_groups() {
    let old = numbered(20);
    let new = old.replace("line 2\n", "line two\n").replace("line 19\n", "line nineteen\n");
    let diff = file_diff(&old, &new, &ComparisonOptions::default());

    let output = render_context_diff(&diff, 2);
    assert_eq!(output.matches("***************").count(), 2);
    assert!(output.contains("*** 1,4 ****"));
    assert!(output.contains("! line two"));
    assert!(output.contains("*** 17,20 ****"));
    assert!(output.contains("! line nineteen"));
    assert!(!output.contains("line 10"));
}

#[test]
fn test_zero_context() {
    let diff = file_diff("a\nb\nc\n", "a\nB\nc\n", &ComparisonOptions::default());
    let expected = "\
*** a/run.out
--- b/run.out
***************
*** 2 ****
! b
--- 2 ----
! B
";
    assert_eq!(render_context_diff(&diff, 0), expected);
}

#[test]
fn test_original_text_is_rendered() {
    let options = ComparisonOptions::default().with_ignore_space_change(true);
    let diff = file_diff("x\ty   1\n", "x z 1\n", &options);
    let output = render_context_diff(&diff, 3);
    assert!(output.contains("! x\ty   1"));
    assert!(output.contains("! x z 1"));
}

#[test]
fn test_group_edits_on_equal_only_list() {
    let ops = [EditOp::new(EditKind::Equal, 0, 100, 0, 100)];
    assert!(group_edits(&ops, 3).is_empty());
}

#[test]
fn test_plain_directory_events() {
    let comparison = Comparison {
        events: vec![
            DiffEvent::OnlyIn {
                base: PathBuf::from("dir1"),
                name: PathBuf::from("entry1"),
            },
            DiffEvent::KindMismatch {
                left: Entry {
                    base: PathBuf::from("1"),
                    path: PathBuf::from("x"),
                    kind: FileKind::Directory,
                },
                right: Entry {
                    base: PathBuf::from("2"),
                    path: PathBuf::from("x"),
                    kind: FileKind::RegularFile,
                },
            },
        ],
    };

    let output =
        format_comparison(&comparison, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
    assert_eq!(
        output,
        "Only in dir1: entry1.\nFile 1/x is a directory while file 2/x is a regular file\n"
    );
}

#[test]
fn test_plain_skips_equal_files() {
    let options = ComparisonOptions::default();
    let comparison = Comparison {
        events: vec![
            DiffEvent::Compared(file_diff("1.0\n", "1.0000000001\n", &options)),
            DiffEvent::Compared(file_diff("1\n", "2\n", &options)),
        ],
    };
    let output =
        format_comparison(&comparison, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
    assert_eq!(output.matches("*** a/run.out").count(), 1);
    assert!(output.contains("! 2"));
}

#[test]
fn test_terminal_has_summary() {
    let comparison = Comparison {
        events: vec![DiffEvent::Compared(file_diff(
            "a\nb\n",
            "a\nb\nc\n",
            &ComparisonOptions::default(),
        ))],
    };
    let output =
        format_comparison(&comparison, &OutputFormat::Terminal, &OutputOptions::default())
            .unwrap();
    assert!(output.contains("Summary:"));
    assert!(output.contains("1 inserted"));
    assert!(output.contains("2 unchanged"));
}

#[test]
fn test_json_report() {
    let comparison = Comparison {
        events: vec![DiffEvent::Compared(file_diff(
            "a 1\n",
            "a 1.5\n",
            &ComparisonOptions::default(),
        ))],
    };
    let output =
        format_comparison(&comparison, &OutputFormat::Json, &OutputOptions::default()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["differences"], true);
    let event = &report["events"][0];
    assert_eq!(event["type"], "compared");
    assert_eq!(event["left"], "a/run.out");
    assert_eq!(event["stats"]["replaced"], 1);
    assert_eq!(event["edits"][0]["a_end"], 1);
}

#[test]
fn test_json_report_without_differences() {
    let output = format_comparison(
        &Comparison::new(),
        &OutputFormat::Json,
        &OutputOptions::default(),
    )
    .unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["differences"], false);
    assert_eq!(report["events"], serde_json::json!([]));
}
