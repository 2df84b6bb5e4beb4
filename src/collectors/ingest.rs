//! Physical Ingest Metrics Collector
//!
//! # Metrics Produced
//! - `rubrik_physical_ingest_bytes` - Latest physical ingest sample (last ten minutes)

use super::{collect_with_handler, latest_stat, CollectionContext, CollectionResult};
use tracing::debug;

/// Collects the physical ingest series and exports its latest sample
///
/// An empty series leaves the gauge at its previous value.
pub async fn collect_physical_ingest_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    collect_with_handler(
        "physical ingest",
        ctx.client.query_physical_ingest(),
        |series| match latest_stat(&series) {
            Some(value) => ctx.metrics.physical_ingest_bytes.set(value),
            None => debug!("Physical ingest series is empty"),
        },
    )
    .await
}
