//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the Rubrik exporter.
//!
//! # Metric Categories
//!
//! ## Storage
//! - Cluster storage summary by type
//! - Per-VM logical, ingested, physical and index storage
//! - Runway remaining and average daily growth
//!
//! ## Ingest & Streams
//! - Active stream count
//! - Latest physical ingest sample
//!
//! ## Archival
//! - Bytes archived/downloaded per data location
//! - Archived object counts per data location
//! - Latest archival bandwidth sample per data location
//!
//! All metrics use the `rubrik_` namespace prefix.

use prometheus::{Encoder, Gauge, GaugeVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

const NAMESPACE: &str = "rubrik";

/// Metrics collector for Rubrik
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    // Storage metrics
    pub system_storage_bytes: Arc<GaugeVec>,
    pub vm_storage_bytes: Arc<GaugeVec>,
    pub runway_remaining_days: Arc<IntGauge>,
    pub average_storage_growth_per_day_bytes: Arc<IntGauge>,

    // Ingest metrics
    pub streams_count: Arc<IntGauge>,
    pub physical_ingest_bytes: Arc<Gauge>,

    // Archival metrics
    pub archive_location_data_bytes: Arc<GaugeVec>,
    pub archive_location_objects: Arc<GaugeVec>,
    pub archival_bandwidth_bytes: Arc<GaugeVec>,

    pub up: Arc<Gauge>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let system_storage_bytes = GaugeVec::new(
            Opts::new(
                "system_storage_bytes",
                "Cluster storage in bytes by type (total, used, available, snapshot, live_mount, miscellaneous)",
            )
            .namespace(NAMESPACE),
            &["type"],
        )?;

        let vm_storage_bytes = GaugeVec::new(
            Opts::new("vm_storage_bytes", "Storage consumed by a protected VM in bytes")
                .namespace(NAMESPACE),
            &["vm_id", "type"],
        )?;

        let runway_remaining_days = IntGauge::with_opts(
            Opts::new(
                "runway_remaining_days",
                "Days remaining before the cluster runs out of storage",
            )
            .namespace(NAMESPACE),
        )?;

        let average_storage_growth_per_day_bytes = IntGauge::with_opts(
            Opts::new(
                "average_storage_growth_per_day_bytes",
                "Average storage growth per day in bytes",
            )
            .namespace(NAMESPACE),
        )?;

        let streams_count = IntGauge::with_opts(
            Opts::new("streams_count", "Number of active streams").namespace(NAMESPACE),
        )?;

        let physical_ingest_bytes = Gauge::with_opts(
            Opts::new(
                "physical_ingest_bytes",
                "Latest physical ingest sample over the last ten minutes",
            )
            .namespace(NAMESPACE),
        )?;

        let archive_location_data_bytes = GaugeVec::new(
            Opts::new(
                "archive_location_data_bytes",
                "Bytes archived to or downloaded from a data location",
            )
            .namespace(NAMESPACE),
            &["location_id", "direction"],
        )?;

        let archive_location_objects = GaugeVec::new(
            Opts::new(
                "archive_location_objects",
                "Number of archived objects per data location and object type",
            )
            .namespace(NAMESPACE),
            &["location_id", "type"],
        )?;

        let archival_bandwidth_bytes = GaugeVec::new(
            Opts::new(
                "archival_bandwidth_bytes",
                "Latest archival bandwidth sample per data location",
            )
            .namespace(NAMESPACE),
            &["location_id"],
        )?;

        let up = Gauge::with_opts(
            Opts::new("up", "Whether the last collection from Rubrik succeeded (1=up, 0=down)")
                .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(system_storage_bytes.clone()))?;
        registry.register(Box::new(vm_storage_bytes.clone()))?;
        registry.register(Box::new(runway_remaining_days.clone()))?;
        registry.register(Box::new(average_storage_growth_per_day_bytes.clone()))?;
        registry.register(Box::new(streams_count.clone()))?;
        registry.register(Box::new(physical_ingest_bytes.clone()))?;
        registry.register(Box::new(archive_location_data_bytes.clone()))?;
        registry.register(Box::new(archive_location_objects.clone()))?;
        registry.register(Box::new(archival_bandwidth_bytes.clone()))?;
        registry.register(Box::new(up.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            system_storage_bytes: Arc::new(system_storage_bytes),
            vm_storage_bytes: Arc::new(vm_storage_bytes),
            runway_remaining_days: Arc::new(runway_remaining_days),
            average_storage_growth_per_day_bytes: Arc::new(average_storage_growth_per_day_bytes),
            streams_count: Arc::new(streams_count),
            physical_ingest_bytes: Arc::new(physical_ingest_bytes),
            archive_location_data_bytes: Arc::new(archive_location_data_bytes),
            archive_location_objects: Arc::new(archive_location_objects),
            archival_bandwidth_bytes: Arc::new(archival_bandwidth_bytes),
            up: Arc::new(up),
        })
    }

    /// Set a labelled gauge value
    pub fn set_gauge(&self, gauge: &GaugeVec, labels: &[&str], value: f64) {
        gauge.with_label_values(labels).set(value);
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics collector")
    }
}
