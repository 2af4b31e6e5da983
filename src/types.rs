//! Core data types for the Sparkmon dashboard
//!
//! Wire records mirror the Spark monitoring REST API (`/api/v1/...`).
//! The enriched types join those records into the nested [`Snapshot`]
//! the dashboard renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name shown for a stage reference that could not be resolved
pub const UNRESOLVED_STAGE_NAME: &str = "<unresolved stage>";

/// Status shown for a stage reference that could not be resolved
pub const UNRESOLVED_STAGE_STATUS: &str = "UNRESOLVED";

/// One Spark application known to the history/driver UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
}

/// A job inside an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "jobId")]
    pub index: i64,
    pub name: String,
    /// Stage ids in the order the engine reports them
    #[serde(rename = "stageIds", default)]
    pub stage_refs: Vec<i64>,
    pub status: String,
}

/// A stage attempt with its task counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(rename = "stageId")]
    pub index: i64,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub status: String,
    #[serde(rename = "numTasks", default)]
    pub tasks: u32,
    #[serde(rename = "numActiveTasks", default)]
    pub active_tasks: u32,
    #[serde(rename = "numCompleteTasks", default)]
    pub completed_tasks: u32,
    #[serde(rename = "numFailedTasks", default)]
    pub failed_tasks: u32,
    #[serde(rename = "numKilledTasks", default)]
    pub killed_tasks: u32,

    /// False only for placeholders standing in for a missing stage
    #[serde(skip, default = "default_resolved")]
    pub resolved: bool,
}

fn default_resolved() -> bool {
    true
}

impl Stage {
    /// Stand-in for a stage reference with no matching stage.
    ///
    /// Pure function of `index`: the same missing id always produces an
    /// equal placeholder, with zeroed counters so the gauge reads 0%.
    pub fn placeholder(index: i64) -> Self {
        Self {
            index,
            name: UNRESOLVED_STAGE_NAME.to_string(),
            details: String::new(),
            status: UNRESOLVED_STAGE_STATUS.to_string(),
            tasks: 0,
            active_tasks: 0,
            completed_tasks: 0,
            failed_tasks: 0,
            killed_tasks: 0,
            resolved: false,
        }
    }
}

/// Job with its stage refs resolved, in `stage_refs` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedJob {
    pub job: Job,
    pub stages: Vec<Stage>,
}

/// Application with its jobs, ascending by job index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedApplication {
    pub app: Application,
    pub jobs: Vec<EnrichedJob>,
}

/// Fully aggregated view of one host at one point in time.
///
/// Built wholesale by one aggregation pass and never mutated afterwards;
/// the event loop swaps the whole value on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub host: String,
    pub applications: Vec<EnrichedApplication>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Snapshot with no applications, used before the first successful fetch
    pub fn empty(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            applications: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Total number of stages across all jobs of all applications
    pub fn stage_count(&self) -> usize {
        self.applications
            .iter()
            .flat_map(|app| app.jobs.iter())
            .map(|job| job.stages.len())
            .sum()
    }
}
