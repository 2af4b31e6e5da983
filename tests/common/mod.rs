//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use sparkmon_core::{Application, Job, Result, Stage, StatusSource};
use std::collections::HashMap;

/// Records for one application
#[derive(Debug, Clone, Default)]
pub struct AppFixture {
    pub jobs: Vec<Job>,
    pub stages: Vec<Stage>,
}

/// In-memory status source with a fixed data set
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    pub applications: Vec<Application>,
    pub per_app: HashMap<String, AppFixture>,
}

impl FixtureSource {
    pub fn with_app(mut self, id: &str, name: &str, jobs: Vec<Job>, stages: Vec<Stage>) -> Self {
        self.applications.push(Application {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.per_app
            .insert(id.to_string(), AppFixture { jobs, stages });
        self
    }
}

#[async_trait]
impl StatusSource for FixtureSource {
    async fn applications(&self) -> Result<Vec<Application>> {
        Ok(self.applications.clone())
    }

    async fn jobs(&self, app_id: &str) -> Result<Vec<Job>> {
        Ok(self
            .per_app
            .get(app_id)
            .map(|f| f.jobs.clone())
            .unwrap_or_default())
    }

    async fn stages(&self, app_id: &str) -> Result<Vec<Stage>> {
        Ok(self
            .per_app
            .get(app_id)
            .map(|f| f.stages.clone())
            .unwrap_or_default())
    }
}

pub fn job(index: i64, name: &str, stage_refs: Vec<i64>) -> Job {
    Job {
        index,
        name: name.to_string(),
        stage_refs,
        status: "RUNNING".to_string(),
    }
}

pub fn stage(index: i64, name: &str, tasks: u32, completed: u32, active: u32) -> Stage {
    Stage {
        index,
        name: name.to_string(),
        details: format!("org.apache.spark.rdd.RDD.{name}\nJob.run(Job.scala:{index})"),
        status: if completed >= tasks { "COMPLETE" } else { "ACTIVE" }.to_string(),
        tasks,
        active_tasks: active,
        completed_tasks: completed,
        failed_tasks: 0,
        killed_tasks: 0,
        resolved: true,
    }
}

/// Two applications, the second with an out-of-order job list and a
/// dangling stage reference
pub fn sample_source() -> FixtureSource {
    FixtureSource::default()
        .with_app(
            "app-20240101-0001",
            "nightly-etl",
            vec![job(0, "collect at Etl.scala:40", vec![0, 1])],
            vec![stage(1, "reduceByKey", 10, 3, 2), stage(0, "map", 10, 10, 0)],
        )
        .with_app(
            "app-20240101-0002",
            "adhoc",
            vec![
                job(5, "count at Adhoc.scala:9", vec![7]),
                job(2, "first at Adhoc.scala:3", vec![2]),
            ],
            vec![stage(2, "textFile", 0, 0, 0)],
        )
}
