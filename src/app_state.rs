use crate::services::{
    die_lines::DieLineRegistry, registry::JobRegistry, sheets::SheetRegistry,
};

/// Everything a command can read or change during one run.
#[derive(Debug, Default)]
pub struct AppState {
    pub jobs: JobRegistry,
    pub sheets: SheetRegistry,
    pub die_lines: DieLineRegistry,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State around an existing job registry, with no sheets or die lines.
    pub fn with_jobs(jobs: JobRegistry) -> Self {
        Self {
            jobs,
            ..Self::default()
        }
    }
}
