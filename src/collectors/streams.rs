//! Stream Count Metrics Collector
//!
//! # Metrics Produced
//! - `rubrik_streams_count` - Number of active streams

use super::{collect_with_handler, CollectionContext, CollectionResult};

pub async fn collect_stream_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    collect_with_handler("streams", ctx.client.query_stream_count(), |count| {
        ctx.metrics.streams_count.set(count)
    })
    .await
}
