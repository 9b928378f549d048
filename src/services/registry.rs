use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::models::job::{Job, JobStatus};

/// Tombstones tolerated before `delete` compacts the slot list.
const COMPACT_THRESHOLD: usize = 32;

/// In-memory registry of jobs keyed by job ID.
///
/// Jobs are returned in the order they were created. The registry owns every
/// job; callers mutate through the `&mut Job` handles it lends out.
#[derive(Debug, Default)]
pub struct JobRegistry {
    // Creation-ordered slots; a deleted job leaves a `None` tombstone so
    // delete stays O(1). `index` maps each live job ID to its slot.
    slots: Vec<Option<Job>>,
    index: HashMap<String, usize>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending job and return a handle to it.
    pub fn create(
        &mut self,
        job_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Job, RegistryError> {
        let job_id = job_id.into();
        if self.index.contains_key(&job_id) {
            tracing::warn!(job_id = %job_id, "Rejected duplicate job ID");
            return Err(RegistryError::DuplicateKey { job_id });
        }

        tracing::info!(job_id = %job_id, "Created job");
        let slot = self.slots.len();
        self.slots.push(None);
        self.index.insert(job_id.clone(), slot);

        Ok(self.slots[slot].insert(Job::new(job_id, description)))
    }

    pub fn get(&self, job_id: &str) -> Option<&Job> {
        let slot = *self.index.get(job_id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, job_id: &str) -> Option<&mut Job> {
        let slot = *self.index.get(job_id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.index.contains_key(job_id)
    }

    /// Remove a job. Returns whether anything was removed.
    pub fn delete(&mut self, job_id: &str) -> bool {
        let Some(slot) = self.index.remove(job_id) else {
            tracing::debug!(job_id = %job_id, "Delete skipped, job not found");
            return false;
        };
        self.slots[slot] = None;
        tracing::info!(job_id = %job_id, "Deleted job");

        let tombstones = self.slots.len() - self.index.len();
        if tombstones >= COMPACT_THRESHOLD && tombstones > self.index.len() {
            self.compact();
        }
        true
    }

    /// Jobs in creation order, optionally restricted to one status.
    pub fn list(&self, status: Option<JobStatus>) -> Vec<&Job> {
        self.iter()
            .filter(|job| status.map_or(true, |s| job.status() == s))
            .collect()
    }

    /// Same value as `list(status).len()`.
    pub fn count(&self, status: Option<JobStatus>) -> usize {
        match status {
            None => self.index.len(),
            Some(s) => self.iter().filter(|job| job.status() == s).count(),
        }
    }

    /// Per-status counts in enumeration order.
    pub fn status_counts(&self) -> Vec<(JobStatus, usize)> {
        JobStatus::iter()
            .map(|status| (status, self.count(Some(status))))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &Job> {
        self.slots.iter().flatten()
    }

    // Amortised against the deletes that produced the tombstones.
    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (slot, job) in self.slots.iter().flatten().enumerate() {
            self.index.insert(job.job_id().to_string(), slot);
        }
        tracing::debug!(live = self.index.len(), "Compacted job slots");
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("job with ID {job_id} already exists")]
    DuplicateKey { job_id: String },
}
