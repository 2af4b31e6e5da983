//! Sparkmon - live terminal dashboard for Spark applications
//!
//! Polls the Spark monitoring REST API of one host and renders a nested
//! progress view: application → job → stage task counts.
//!
//! # Architecture
//!
//! Data flows one way:
//! - **Services**: [`StatusSource`] fetches applications, jobs and stages
//! - **Aggregator**: joins them into an immutable [`Snapshot`]
//! - **TUI**: the layout engine turns a snapshot plus terminal size into
//!   regions, which the draw surface paints; the event loop decides when
//!   each step runs
//!
//! # Example
//!
//! ```ignore
//! use sparkmon_core::{aggregator::compute_state, HttpStatusSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let host = "http://localhost:4040";
//!     let source = HttpStatusSource::new(host, None)?;
//!     let snapshot = compute_state(host, &source).await?;
//!     println!("{} applications", snapshot.applications.len());
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod services;
pub mod tui;
pub mod types;

// Re-export commonly used types
pub use config::DashConfig;
pub use error::{Result, SparkmonError};
pub use services::{HttpStatusSource, StatusSource};
pub use types::{Application, EnrichedApplication, EnrichedJob, Job, Snapshot, Stage};
