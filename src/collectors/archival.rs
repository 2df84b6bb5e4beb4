//! Archival Metrics Collector
//!
//! Collects archival usage for every data location, then the archival
//! bandwidth series of each location found.
//!
//! # Metrics Produced
//! - `rubrik_archive_location_data_bytes` - Bytes moved per data location
//!   - Labels: location_id, direction (downloaded, archived)
//! - `rubrik_archive_location_objects` - Archived object counts
//!   - Labels: location_id, type
//! - `rubrik_archival_bandwidth_bytes` - Latest bandwidth sample
//!   - Labels: location_id

use super::{latest_stat, CollectionContext, CollectionResult, CollectionStatus};
use tracing::{info, warn};

/// Collects data location usage and per-location archival bandwidth
///
/// Bandwidth failures for a single location are logged and skipped; the
/// collector only fails when the location list itself cannot be fetched.
pub async fn collect_archival_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    let locations = match ctx.client.query_data_location_usage().await {
        Ok(locations) => locations,
        Err(e) => {
            warn!("Failed to query data location usage: {}", e);
            return Ok(CollectionStatus::Failed);
        }
    };

    ctx.metrics.archive_location_data_bytes.reset();
    ctx.metrics.archive_location_objects.reset();
    ctx.metrics.archival_bandwidth_bytes.reset();

    for location in &locations {
        let id = location.location_id.as_str();

        ctx.metrics.set_gauge(
            &ctx.metrics.archive_location_data_bytes,
            &[id, "downloaded"],
            location.data_downloaded as f64,
        );
        ctx.metrics.set_gauge(
            &ctx.metrics.archive_location_data_bytes,
            &[id, "archived"],
            location.data_archived as f64,
        );

        for (kind, count) in location.archived_objects() {
            ctx.metrics.set_gauge(
                &ctx.metrics.archive_location_objects,
                &[id, kind],
                count as f64,
            );
        }

        match ctx
            .client
            .query_archival_bandwidth(id, &ctx.config.archival_bandwidth_range)
            .await
        {
            Ok(series) => {
                if let Some(value) = latest_stat(&series) {
                    ctx.metrics
                        .set_gauge(&ctx.metrics.archival_bandwidth_bytes, &[id], value);
                }
            }
            Err(e) => warn!("Failed to query archival bandwidth for {}: {}", id, e),
        }
    }

    info!("Updated archival metrics for {} data locations", locations.len());
    Ok(CollectionStatus::Success)
}
