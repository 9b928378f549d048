//! Shared job fixtures for integration tests

use label_jobs::models::job::JobStatus;
use label_jobs::services::registry::JobRegistry;

/// A job to seed into a registry, with the status it should end up in
#[derive(Debug, Clone)]
pub struct JobFixture {
    pub job_id: &'static str,
    pub description: &'static str,
    pub labels: &'static [&'static str],
    pub packaging_type: Option<&'static str>,
    pub status: JobStatus,
}

pub const JOB_FIXTURES: &[JobFixture] = &[
    JobFixture {
        job_id: "JOB001",
        description: "Package 100 units of Product A",
        labels: &["urgent", "fragile"],
        packaging_type: Some("cardboard_box"),
        status: JobStatus::Completed,
    },
    JobFixture {
        job_id: "JOB002",
        description: "Label 200 items of Product B",
        labels: &["bulk_order"],
        packaging_type: Some("bubble_wrap"),
        status: JobStatus::InProgress,
    },
    JobFixture {
        job_id: "JOB003",
        description: "Package and ship Product C",
        labels: &[],
        packaging_type: None,
        status: JobStatus::Pending,
    },
    JobFixture {
        job_id: "JOB004",
        description: "Relabel returned stock",
        labels: &["returns"],
        packaging_type: Some("wooden_crate"),
        status: JobStatus::Labeling,
    },
];

/// Registry populated with every fixture, in fixture order
pub fn seeded_registry() -> JobRegistry {
    let mut registry = JobRegistry::new();
    for fixture in JOB_FIXTURES {
        let job = registry
            .create(fixture.job_id, fixture.description)
            .expect("fixture IDs are unique");
        for label in fixture.labels {
            job.add_label(*label);
        }
        if let Some(packaging) = fixture.packaging_type {
            job.set_packaging_type(packaging);
        }
        if fixture.status != JobStatus::Pending {
            job.update_status(fixture.status);
        }
    }
    registry
}
