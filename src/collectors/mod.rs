//! Metrics Collectors
//!
//! This module contains specialized collectors for the Rubrik statistics endpoints.
//! Each collector queries one endpoint group through [`RubrikClient`] and updates
//! the corresponding Prometheus metrics.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` containing shared state
//! - Query the Rubrik API through the fallible `query_*` accessors
//! - Update Prometheus metrics
//! - Return `CollectionResult` (`Success` or `Failed`)
//!
//! # Error Handling
//!
//! Individual collector failures are non-fatal - they log warnings and return
//! `CollectionStatus::Failed`. Partial metrics are still exposed even if some
//! endpoints are unavailable.

use crate::config::MetricsConfig;
use crate::metrics::MetricsCollector;
use crate::rubrik::RubrikClient;
use tracing::{info, warn};

/// Shared context passed to all collectors
#[derive(Clone, Copy)]
pub struct CollectionContext<'a> {
    /// Rubrik API client for querying endpoints
    pub client: &'a RubrikClient,
    /// Metrics collector for updating Prometheus metrics
    pub metrics: &'a MetricsCollector,
    /// Metrics configuration (feature flags, ranges, etc.)
    pub config: &'a MetricsConfig,
}

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed,
}

/// Result type for collector functions
///
/// - `Ok(CollectionStatus::Success)` = Collection succeeded
/// - `Ok(CollectionStatus::Failed)` = Collection failed but non-fatal (logged as warning)
/// - `Err(_)` = Fatal error (should propagate)
pub type CollectionResult = Result<CollectionStatus, anyhow::Error>;

/// Helper to reduce boilerplate in collectors
///
/// - On success: processes data, logs success, returns `CollectionStatus::Success`
/// - On error: logs warning, returns `CollectionStatus::Failed` (non-fatal)
///
/// # Examples
///
/// ```no_run
/// # use rubrik_exporter::collectors::*;
/// async fn example(ctx: &CollectionContext<'_>) -> CollectionResult {
///     collect_with_handler(
///         "streams",
///         ctx.client.query_stream_count(),
///         |count| ctx.metrics.streams_count.set(count),
///     ).await
/// }
/// ```
pub async fn collect_with_handler<T, F, P, E>(
    name: &str,
    query_future: F,
    process: P,
) -> CollectionResult
where
    F: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: FnOnce(T),
{
    match query_future.await {
        Ok(data) => {
            process(data);
            info!("Updated {} metrics", name);
            Ok(CollectionStatus::Success)
        }
        Err(e) => {
            warn!("Failed to query {}: {}", name, e);
            Ok(CollectionStatus::Failed)
        }
    }
}

/// Value of the most recent sample in a time series
///
/// The appliance does not promise ordering, so the sample with the greatest
/// timestamp wins. Timestamps are ISO-8601 strings and compare lexically.
pub fn latest_stat(series: &[crate::rubrik::types::TimeStat]) -> Option<f64> {
    series
        .iter()
        .max_by(|a, b| a.time.cmp(&b.time))
        .map(|s| s.stat)
}

// Collector modules
pub mod archival;
pub mod capacity;
pub mod ingest;
pub mod streams;
pub mod system_storage;
pub mod vm_storage;

// Re-export collector functions for convenient access
pub use archival::collect_archival_metrics;
pub use capacity::collect_capacity_metrics;
pub use ingest::collect_physical_ingest_metrics;
pub use streams::collect_stream_metrics;
pub use system_storage::collect_system_storage_metrics;
pub use vm_storage::collect_vm_storage_metrics;
