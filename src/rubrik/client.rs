//! Rubrik Stats API Client
//!
//! Typed accessors for the appliance's internal statistics endpoints.
//!
//! Every endpoint is exposed twice:
//!
//! - `query_*` returns `Result<T>` so callers can tell "no data" from "fetch failed".
//! - `get_*` logs the failure and returns the zero value of `T`, for callers that
//!   treat zero as "metric unavailable".
//!
//! # Example
//!
//! ```no_run
//! use rubrik_exporter::config::RubrikConfig;
//! use rubrik_exporter::rubrik::RubrikClient;
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = RubrikConfig {
//!     url: "https://rubrik.local".to_string(),
//!     username: "admin".to_string(),
//!     password: SecretString::from("secret".to_string()),
//!     verify_ssl: false,
//!     timeout_seconds: 30,
//! };
//!
//! let client = RubrikClient::connect(&config).await?;
//! let storage = client.query_system_storage().await?;
//! println!("used {} of {} bytes", storage.used, storage.total);
//! # Ok(())
//! # }
//! ```

use crate::config::RubrikConfig;
use crate::error::Result;
use crate::rubrik::session::{RequestParams, RubrikSession};
use crate::rubrik::types::*;
use tracing::warn;

pub const SYSTEM_STORAGE_PATH: &str = "/api/internal/stats/system_storage";
pub const PER_VM_STORAGE_PATH: &str = "/api/internal/stats/per_vm_storage";
pub const STREAM_COUNT_PATH: &str = "/api/internal/stats/streams/count";
pub const DATA_LOCATION_USAGE_PATH: &str = "/api/internal/stats/data_location/usage";
pub const PHYSICAL_INGEST_PATH: &str = "/api/internal/stats/physical_ingest/time_series";
pub const ARCHIVAL_BANDWIDTH_PATH: &str = "/api/internal/stats/archival/bandwidth/time_series";
pub const RUNWAY_REMAINING_PATH: &str = "/api/internal/stats/runway_remaining";
pub const STORAGE_GROWTH_PATH: &str = "/api/internal/stats/average_storage_growth_per_day";

/// Range requested for the physical ingest series
pub const PHYSICAL_INGEST_RANGE: &str = "-10min";

/// Range used for archival bandwidth when the caller passes an empty one
pub const DEFAULT_ARCHIVAL_RANGE: &str = "-1h";

/// Client for the Rubrik internal stats API
pub struct RubrikClient {
    session: RubrikSession,
}

impl RubrikClient {
    /// Wrap an existing session
    pub fn new(session: RubrikSession) -> Self {
        Self { session }
    }

    /// Create a session and log in
    pub async fn connect(config: &RubrikConfig) -> Result<Self> {
        Ok(Self::new(RubrikSession::connect(config).await?))
    }

    pub fn session(&self) -> &RubrikSession {
        &self.session
    }

    async fn fetch<T>(&self, path: &str, params: RequestParams) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.session.get_json(path, &params).await
    }

    /// Cluster-wide storage summary
    pub async fn query_system_storage(&self) -> Result<SystemStorage> {
        self.fetch(SYSTEM_STORAGE_PATH, RequestParams::new()).await
    }

    /// Storage usage of every protected VM
    pub async fn query_per_vm_storage(&self) -> Result<Vec<VmStorage>> {
        let list: ResultList<VmStorage> =
            self.fetch(PER_VM_STORAGE_PATH, RequestParams::new()).await?;
        Ok(list.data)
    }

    /// Number of active backup/archival streams
    pub async fn query_stream_count(&self) -> Result<i64> {
        let count: StreamCount = self.fetch(STREAM_COUNT_PATH, RequestParams::new()).await?;
        Ok(count.count)
    }

    /// Archival usage per data location
    pub async fn query_data_location_usage(&self) -> Result<Vec<DataLocationUsage>> {
        let list: ResultList<DataLocationUsage> = self
            .fetch(DATA_LOCATION_USAGE_PATH, RequestParams::new())
            .await?;
        Ok(list.data)
    }

    /// Physical ingest over the last ten minutes
    pub async fn query_physical_ingest(&self) -> Result<Vec<TimeStat>> {
        let params = RequestParams::new().query("range", PHYSICAL_INGEST_RANGE);
        self.fetch(PHYSICAL_INGEST_PATH, params).await
    }

    /// Archival bandwidth for one data location
    ///
    /// An empty `timerange` falls back to [`DEFAULT_ARCHIVAL_RANGE`].
    pub async fn query_archival_bandwidth(
        &self,
        location_id: &str,
        timerange: &str,
    ) -> Result<Vec<TimeStat>> {
        let timerange = if timerange.is_empty() {
            DEFAULT_ARCHIVAL_RANGE
        } else {
            timerange
        };
        let params = RequestParams::new()
            .query("range", timerange)
            .query("data_location_id", location_id);
        self.fetch(ARCHIVAL_BANDWIDTH_PATH, params).await
    }

    /// Days until the cluster runs out of space
    pub async fn query_runway_remaining(&self) -> Result<i64> {
        let runway: RunwayRemaining = self
            .fetch(RUNWAY_REMAINING_PATH, RequestParams::new())
            .await?;
        Ok(runway.days)
    }

    /// Average storage growth per day in bytes
    pub async fn query_average_storage_growth_per_day(&self) -> Result<i64> {
        let growth: StorageGrowth = self
            .fetch(STORAGE_GROWTH_PATH, RequestParams::new())
            .await?;
        Ok(growth.bytes)
    }

    pub async fn get_system_storage(&self) -> SystemStorage {
        or_default("system storage", self.query_system_storage().await)
    }

    pub async fn get_per_vm_storage(&self) -> Vec<VmStorage> {
        or_default("per-VM storage", self.query_per_vm_storage().await)
    }

    pub async fn get_stream_count(&self) -> i64 {
        or_default("stream count", self.query_stream_count().await)
    }

    pub async fn get_data_location_usage(&self) -> Vec<DataLocationUsage> {
        or_default(
            "data location usage",
            self.query_data_location_usage().await,
        )
    }

    pub async fn get_physical_ingest(&self) -> Vec<TimeStat> {
        or_default("physical ingest", self.query_physical_ingest().await)
    }

    pub async fn get_archival_bandwidth(
        &self,
        location_id: &str,
        timerange: &str,
    ) -> Vec<TimeStat> {
        or_default(
            "archival bandwidth",
            self.query_archival_bandwidth(location_id, timerange).await,
        )
    }

    pub async fn get_runway_remaining(&self) -> i64 {
        or_default("runway remaining", self.query_runway_remaining().await)
    }

    pub async fn get_average_storage_growth_per_day(&self) -> i64 {
        or_default(
            "storage growth",
            self.query_average_storage_growth_per_day().await,
        )
    }
}

fn or_default<T: Default>(name: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Failed to query {}: {}", name, e);
        T::default()
    })
}
