//! Scripted walkthrough of the job registry, used by the `demo` binary.

use std::io::Write;

use crate::cli::CliError;
use crate::models::job::{Job, JobStatus};
use crate::services::registry::JobRegistry;

/// Build three jobs, move them through the workflow and print the results to `out`.
pub fn run<W: Write>(out: &mut W) -> Result<(), CliError> {
    writeln!(out, "=== Job Management System Demo ===\n")?;

    let mut registry = JobRegistry::new();

    writeln!(out, "Creating jobs...")?;
    registry.create("JOB001", "Package 100 units of Product A")?;
    registry.create("JOB002", "Label 200 items of Product B")?;
    registry.create("JOB003", "Package and ship Product C")?;
    writeln!(out, "Created {} jobs\n", registry.count(None))?;

    writeln!(out, "Adding labels...")?;
    for (job_id, labels) in [
        ("JOB001", &["urgent", "fragile"][..]),
        ("JOB002", &["bulk_order"][..]),
        ("JOB003", &["priority", "international"][..]),
    ] {
        if let Some(job) = registry.get_mut(job_id) {
            for label in labels {
                job.add_label(*label);
            }
        }
    }
    writeln!(out, "Labels added\n")?;

    writeln!(out, "Setting packaging types...")?;
    for (job_id, packaging) in [
        ("JOB001", "cardboard_box"),
        ("JOB002", "bubble_wrap"),
        ("JOB003", "wooden_crate"),
    ] {
        if let Some(job) = registry.get_mut(job_id) {
            job.set_packaging_type(packaging);
        }
    }
    writeln!(out, "Packaging types set\n")?;

    writeln!(out, "Updating job statuses...")?;
    for (job_id, status) in [
        ("JOB001", JobStatus::InProgress),
        ("JOB002", JobStatus::Labeling),
        ("JOB003", JobStatus::Pending),
    ] {
        if let Some(job) = registry.get_mut(job_id) {
            job.update_status(status);
        }
    }
    writeln!(out, "Statuses updated\n")?;

    writeln!(out, "=== All Jobs ===")?;
    for job in registry.list(None) {
        writeln!(out, "\nJob ID: {}", job.job_id())?;
        writeln!(out, "  Description: {}", job.description())?;
        writeln!(out, "  Status: {}", job.status())?;
        writeln!(out, "  Labels: {}", job.labels().join(", "))?;
        writeln!(out, "  Packaging: {}", job.packaging_type().unwrap_or_default())?;
    }

    writeln!(out, "\n=== Pending Jobs ===")?;
    write_matching(out, &registry.list(Some(JobStatus::Pending)), "pending")?;

    writeln!(out, "\n=== In Progress Jobs ===")?;
    write_matching(out, &registry.list(Some(JobStatus::InProgress)), "in-progress")?;

    writeln!(out, "\n=== Completing Job JOB001 ===")?;
    if let Some(job) = registry.get_mut("JOB001") {
        job.update_status(JobStatus::Completed);
        writeln!(out, "Job {} is now {}", job.job_id(), job.status())?;
    }

    writeln!(out, "\n=== Job Statistics ===")?;
    writeln!(out, "Total jobs: {}", registry.count(None))?;
    for (status, count) in registry.status_counts() {
        writeln!(out, "{status}: {count}")?;
    }

    writeln!(out, "\n=== Demo Complete ===")?;
    Ok(())
}

fn write_matching<W: Write>(out: &mut W, jobs: &[&Job], kind: &str) -> std::io::Result<()> {
    writeln!(out, "Found {} {} job(s)", jobs.len(), kind)?;
    for job in jobs {
        writeln!(out, "  - {}: {}", job.job_id(), job.description())?;
    }
    Ok(())
}
