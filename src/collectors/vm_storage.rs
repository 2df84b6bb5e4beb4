//! Per-VM Storage Metrics Collector
//!
//! Collects logical, ingested, physical and index storage for each protected VM.
//!
//! # Metrics Produced
//! - `rubrik_vm_storage_bytes` - Storage consumed by a VM
//!   - Labels: vm_id, type (logical, ingested, exclusive_physical, shared_physical, index_storage)

use super::{CollectionContext, CollectionResult, CollectionStatus};
use tracing::{info, warn};

/// Collects per-VM storage metrics from Rubrik
///
/// The metric family is reset before each update so removed VMs drop out.
pub async fn collect_vm_storage_metrics(ctx: &CollectionContext<'_>) -> CollectionResult {
    match ctx.client.query_per_vm_storage().await {
        Ok(vms) => {
            ctx.metrics.vm_storage_bytes.reset();

            for vm in &vms {
                let values = [
                    ("logical", vm.logical_bytes),
                    ("ingested", vm.ingested_bytes),
                    ("exclusive_physical", vm.exclusive_physical_bytes),
                    ("shared_physical", vm.shared_physical_bytes),
                    ("index_storage", vm.index_storage_bytes),
                ];
                for (kind, bytes) in values {
                    ctx.metrics
                        .set_gauge(&ctx.metrics.vm_storage_bytes, &[vm.id.as_str(), kind], bytes);
                }
            }
            info!("Updated storage metrics for {} VMs", vms.len());
            Ok(CollectionStatus::Success)
        }
        Err(e) => {
            warn!("Failed to query per-VM storage: {}", e);
            Ok(CollectionStatus::Failed)
        }
    }
}
