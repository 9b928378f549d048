//! The scripted walkthrough, captured through `demo::run`

use label_jobs::demo;
use pretty_assertions::assert_eq;

fn demo_output() -> String {
    let mut out = Vec::new();
    demo::run(&mut out).expect("demo should succeed");
    String::from_utf8(out).expect("output is UTF-8")
}

#[test]
fn test_demo_walkthrough() {
    let out = demo_output();

    assert!(out.starts_with("=== Job Management System Demo ===\n"));
    assert!(out.contains("Created 3 jobs\n"));
    assert!(out.contains("Found 1 pending job(s)\n  - JOB003: Package and ship Product C\n"));
    assert!(out.contains("Found 1 in-progress job(s)\n  - JOB001: Package 100 units of Product A\n"));
    assert!(out.contains("Job JOB001 is now completed\n"));
    assert!(out.ends_with("=== Demo Complete ===\n"));
}

#[test]
fn test_demo_lists_jobs_and_statistics() {
    let out = demo_output();

    assert!(out.contains(
        "\nJob ID: JOB002\n  \
         Description: Label 200 items of Product B\n  \
         Status: labeling\n  \
         Labels: bulk_order\n  \
         Packaging: bubble_wrap\n"
    ));

    let stats: Vec<&str> = out
        .split("=== Job Statistics ===\n")
        .nth(1)
        .expect("statistics section")
        .lines()
        .take(7)
        .collect();
    assert_eq!(
        stats,
        [
            "Total jobs: 3",
            "pending: 1",
            "in_progress: 0",
            "labeling: 1",
            "packaging: 0",
            "completed: 1",
            "cancelled: 0",
        ]
    );
}
