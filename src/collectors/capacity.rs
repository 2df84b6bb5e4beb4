//! Capacity Planning Metrics Collector
//!
//! Collects runway and storage growth figures.
//!
//! # Metrics Produced
//! - `rubrik_runway_remaining_days` - Days before the cluster fills up
//! - `rubrik_average_storage_growth_per_day_bytes` - Average daily storage growth

use super::{collect_with_handler, CollectionContext, CollectionResult, CollectionStatus};

/// Collects runway and growth metrics
///
/// Succeeds if either endpoint answered.
pub async fn collect_capacity_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    let runway = collect_with_handler(
        "runway remaining",
        ctx.client.query_runway_remaining(),
        |days| ctx.metrics.runway_remaining_days.set(days),
    )
    .await?;

    let growth = collect_with_handler(
        "storage growth",
        ctx.client.query_average_storage_growth_per_day(),
        |bytes| ctx.metrics.average_storage_growth_per_day_bytes.set(bytes),
    )
    .await?;

    if runway == CollectionStatus::Success || growth == CollectionStatus::Success {
        Ok(CollectionStatus::Success)
    } else {
        Ok(CollectionStatus::Failed)
    }
}
