//! System Storage Metrics Collector
//!
//! Collects the cluster-wide storage summary.
//!
//! # Metrics Produced
//! - `rubrik_system_storage_bytes` - Cluster storage in bytes
//!   - Labels: type (total, used, available, snapshot, live_mount, miscellaneous)

use super::{collect_with_handler, CollectionContext, CollectionResult};

/// Collects system storage metrics from Rubrik
///
/// # Returns
///
/// * `Ok(CollectionStatus::Success)` - Successfully collected storage metrics
/// * `Ok(CollectionStatus::Failed)` - Failed to collect metrics (non-fatal, logged as warning)
pub async fn collect_system_storage_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    collect_with_handler(
        "system storage",
        ctx.client.query_system_storage(),
        |storage| {
            let values = [
                ("total", storage.total),
                ("used", storage.used),
                ("available", storage.available),
                ("snapshot", storage.snapshot),
                ("live_mount", storage.live_mount),
                ("miscellaneous", storage.miscellaneous),
            ];
            for (kind, bytes) in values {
                ctx.metrics
                    .set_gauge(&ctx.metrics.system_storage_bytes, &[kind], bytes as f64);
            }
        },
    )
    .await
}
