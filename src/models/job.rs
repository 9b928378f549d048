use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Status of a label/packaging job.
///
/// Statuses are free-form tags: any value may be set from any other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Labeling,
    Packaging,
    Completed,
    Cancelled,
}

/// A tracked unit of label or packaging work.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    job_id: String,
    description: String,
    status: JobStatus,
    labels: Vec<String>,
    packaging_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Build a pending job with no labels and no packaging type.
    pub(crate) fn new(job_id: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            job_id: job_id.into(),
            description: description.into(),
            status: JobStatus::Pending,
            labels: Vec::new(),
            packaging_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Labels in the order they were first added.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn packaging_type(&self) -> Option<&str> {
        self.packaging_type.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Add a label. Returns `false` (and leaves `updated_at` alone) if the
    /// label was already present.
    pub fn add_label(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.has_label(&label) {
            return false;
        }
        self.labels.push(label);
        self.touch();
        true
    }

    /// Remove a label. Returns `false` (and leaves `updated_at` alone) if the
    /// label was not present.
    pub fn remove_label(&mut self, label: &str) -> bool {
        let Some(pos) = self.labels.iter().position(|l| l == label) else {
            return false;
        };
        self.labels.remove(pos);
        self.touch();
        true
    }

    /// Overwrite the packaging type. Always refreshes `updated_at`.
    pub fn set_packaging_type(&mut self, packaging_type: impl Into<String>) {
        self.packaging_type = Some(packaging_type.into());
        self.touch();
    }

    /// Overwrite the status. Always refreshes `updated_at`.
    pub fn update_status(&mut self, status: JobStatus) {
        self.status = status;
        self.touch();
    }

    // Strictly monotonic even when the clock has not advanced since the last
    // mutation.
    fn touch(&mut self) {
        let floor = self.updated_at + Duration::nanoseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}
