//! Rubrik API Type Definitions
//!
//! Rust structs for the JSON payloads returned by the Rubrik internal stats API.
//!
//! # Design Notes
//!
//! - **Zero Defaults**: Every record derives `Default` and uses `#[serde(default)]`,
//!   so a missing key decodes to zero instead of failing the whole payload.
//!   Explicit `null` values decode to zero as well (see [`null_as_default`]).
//!   A value of the wrong type still fails the whole payload.
//! - **camelCase**: The appliance uses camelCase keys; field names follow Rust
//!   conventions and are mapped with `rename_all`.
//!
//! # API Endpoints Covered
//!
//! - `/api/v1/session` → [`SessionToken`]
//! - `/api/internal/stats/system_storage` → [`SystemStorage`]
//! - `/api/internal/stats/per_vm_storage` → [`ResultList`] of [`VmStorage`]
//! - `/api/internal/stats/streams/count` → [`StreamCount`]
//! - `/api/internal/stats/data_location/usage` → [`ResultList`] of [`DataLocationUsage`]
//! - `/api/internal/stats/physical_ingest/time_series` → [`TimeStat`]
//! - `/api/internal/stats/archival/bandwidth/time_series` → [`TimeStat`]
//! - `/api/internal/stats/runway_remaining` → [`RunwayRemaining`]
//! - `/api/internal/stats/average_storage_growth_per_day` → [`StorageGrowth`]

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `POST /api/v1/session`
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionToken {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub token: Option<String>,
}

/// Paginated envelope used by list endpoints
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResultList<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub data: Vec<T>,
}

impl<T> Default for ResultList<T> {
    fn default() -> Self {
        Self {
            has_more: false,
            total: None,
            data: Vec::new(),
        }
    }
}

/// Cluster-wide storage summary, all values in bytes
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemStorage {
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub used: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub available: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub snapshot: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub live_mount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub miscellaneous: i64,
}

/// Storage consumed by a single protected VM
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VmStorage {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logical_bytes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ingested_bytes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub exclusive_physical_bytes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub shared_physical_bytes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub index_storage_bytes: f64,
}

/// Archival usage of one data location (archive target)
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DataLocationUsage {
    #[serde(deserialize_with = "null_as_default")]
    pub location_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_downloaded: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub data_archived: i64,
    #[serde(rename = "numVMsArchived")]
    #[serde(deserialize_with = "null_as_default")]
    pub num_vms_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_filesets_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_linux_filesets_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_windows_filesets_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_share_filesets_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_mssql_dbs_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_hyperv_vms_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_nutanix_vms_archived: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_managed_volumes_archived: i64,
}

impl DataLocationUsage {
    /// Archived object counts paired with their `type` label value.
    pub fn archived_objects(&self) -> [(&'static str, i64); 9] {
        [
            ("vm", self.num_vms_archived),
            ("fileset", self.num_filesets_archived),
            ("linux_fileset", self.num_linux_filesets_archived),
            ("windows_fileset", self.num_windows_filesets_archived),
            ("share_fileset", self.num_share_filesets_archived),
            ("mssql_db", self.num_mssql_dbs_archived),
            ("hyperv_vm", self.num_hyperv_vms_archived),
            ("nutanix_vm", self.num_nutanix_vms_archived),
            ("managed_volume", self.num_managed_volumes_archived),
        ]
    }
}

/// A single time-series sample
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TimeStat {
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stat: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct StreamCount {
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct RunwayRemaining {
    #[serde(deserialize_with = "null_as_default")]
    pub days: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct StorageGrowth {
    #[serde(deserialize_with = "null_as_default")]
    pub bytes: i64,
}
