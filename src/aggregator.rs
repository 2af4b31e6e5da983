//! State aggregation
//!
//! Joins the application, job and stage collections of one host into a
//! single nested [`Snapshot`]. Every call re-fetches everything; there is
//! no caching and no partial result. The first failing fetch aborts the
//! whole pass.

use crate::error::{Result, SparkmonError};
use crate::services::StatusSource;
use crate::types::{Application, EnrichedApplication, EnrichedJob, Job, Snapshot, Stage};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Lookup from stage index to stage, scoped to one application
pub struct StageIndex<'a> {
    app_id: &'a str,
    by_index: HashMap<i64, &'a Stage>,
}

impl<'a> StageIndex<'a> {
    /// Index `stages` of application `app_id`.
    ///
    /// If several entries share an index (retried attempts), the last one
    /// in slice order wins.
    pub fn new(app_id: &'a str, stages: &'a [Stage]) -> Self {
        let by_index = stages.iter().map(|stage| (stage.index, stage)).collect();
        Self { app_id, by_index }
    }

    /// Look up one stage reference
    pub fn resolve(&self, stage_id: i64) -> Result<&'a Stage> {
        self.by_index
            .get(&stage_id)
            .copied()
            .ok_or_else(|| SparkmonError::ResolutionGap {
                app_id: self.app_id.to_string(),
                stage_id,
            })
    }

    /// Resolve a stage reference, substituting [`Stage::placeholder`] for gaps
    pub fn resolve_or_placeholder(&self, stage_id: i64) -> Stage {
        match self.resolve(stage_id) {
            Ok(stage) => stage.clone(),
            Err(gap) => {
                warn!("{}", gap);
                Stage::placeholder(stage_id)
            }
        }
    }
}

/// Fetch and join the full state of `host` through `source`
pub async fn compute_state<S>(host: &str, source: &S) -> Result<Snapshot>
where
    S: StatusSource + ?Sized,
{
    let apps = source.applications().await?;
    debug!("Fetched {} applications from {}", apps.len(), host);

    let mut applications = Vec::with_capacity(apps.len());
    for app in apps {
        let jobs = source.jobs(&app.id).await?;
        let stages = source.stages(&app.id).await?;
        applications.push(enrich_application(app, jobs, stages));
    }

    Ok(Snapshot {
        host: host.to_string(),
        applications,
        fetched_at: Utc::now(),
    })
}

/// Sort and join the records of one application
pub fn enrich_application(
    app: Application,
    mut jobs: Vec<Job>,
    mut stages: Vec<Stage>,
) -> EnrichedApplication {
    // Vec::sort_by_key is stable: equal indices keep fetch order
    jobs.sort_by_key(|job| job.index);
    stages.sort_by_key(|stage| stage.index);

    let jobs: Vec<EnrichedJob> = {
        let index = StageIndex::new(&app.id, &stages);
        jobs.into_iter()
            .map(|job| {
                let resolved = job
                    .stage_refs
                    .iter()
                    .map(|&stage_id| index.resolve_or_placeholder(stage_id))
                    .collect();
                EnrichedJob {
                    job,
                    stages: resolved,
                }
            })
            .collect()
    };

    debug!(
        "Application {}: {} jobs, {} stages",
        app.id,
        jobs.len(),
        stages.len()
    );

    EnrichedApplication { app, jobs }
}
