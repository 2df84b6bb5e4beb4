//! Collector tests
//!
//! Runs the collectors against a wiremock appliance and checks the exported metrics.

use rubrik_exporter::collectors::{
    self, collect_with_handler, latest_stat, CollectionContext, CollectionStatus,
};
use rubrik_exporter::config::{MetricsConfig, RubrikConfig};
use rubrik_exporter::error::ExporterError;
use rubrik_exporter::metrics::MetricsCollector;
use rubrik_exporter::rubrik::client::*;
use rubrik_exporter::rubrik::types::TimeStat;
use rubrik_exporter::rubrik::RubrikClient;
use rubrik_exporter::server::collect_metrics;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn metrics_config() -> MetricsConfig {
    MetricsConfig {
        scrape_interval_seconds: 60,
        collect_vm_metrics: true,
        collect_archival_metrics: true,
        archival_bandwidth_range: "-1h".to_string(),
    }
}

async fn setup() -> (MockServer, RubrikClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok"})))
        .mount(&server)
        .await;

    let config = RubrikConfig {
        url: server.uri(),
        username: "admin".to_string(),
        password: SecretString::from("secret".to_string()),
        verify_ssl: true,
        timeout_seconds: 5,
    };
    let client = RubrikClient::connect(&config)
        .await
        .expect("login should succeed");
    (server, client)
}

async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_collect_with_handler_success() {
    let result = collect_with_handler(
        "test",
        async { Ok::<Vec<String>, ExporterError>(vec!["data".to_string()]) },
        |data| {
            assert_eq!(data.len(), 1);
        },
    )
    .await;

    assert_eq!(result.unwrap(), CollectionStatus::Success);
}

#[tokio::test]
async fn test_collect_with_handler_error() {
    let result = collect_with_handler(
        "test",
        async {
            Err::<Vec<String>, ExporterError>(ExporterError::HttpStatus {
                status: 500,
                path: "/x".to_string(),
            })
        },
        |_data| {
            panic!("Should not process data on error");
        },
    )
    .await;

    // Failure is non-fatal
    assert_eq!(result.unwrap(), CollectionStatus::Failed);
}

#[test]
fn test_latest_stat_picks_newest_sample() {
    let series = vec![
        TimeStat {
            time: "2024-01-01T00:05:00Z".to_string(),
            stat: 5.0,
        },
        TimeStat {
            time: "2024-01-01T00:10:00Z".to_string(),
            stat: 10.0,
        },
        TimeStat {
            time: "2024-01-01T00:00:00Z".to_string(),
            stat: 1.0,
        },
    ];

    assert_eq!(latest_stat(&series), Some(10.0));
    assert_eq!(latest_stat(&[]), None);
}

#[tokio::test]
async fn test_system_storage_collector_sets_all_types() {
    let (server, client) = setup().await;
    mount_json(
        &server,
        SYSTEM_STORAGE_PATH,
        json!({
            "total": 600,
            "used": 500,
            "available": 100,
            "snapshot": 300,
            "liveMount": 20,
            "miscellaneous": 10
        }),
    )
    .await;
    let metrics = MetricsCollector::new().unwrap();
    let config = metrics_config();
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    let status = collectors::collect_system_storage_metrics(&ctx)
        .await
        .unwrap();

    assert_eq!(status, CollectionStatus::Success);
    let gauge = &metrics.system_storage_bytes;
    assert_eq!(gauge.with_label_values(&["total"]).get(), 600.0);
    assert_eq!(gauge.with_label_values(&["live_mount"]).get(), 20.0);
    assert_eq!(gauge.with_label_values(&["miscellaneous"]).get(), 10.0);
}

#[tokio::test]
async fn test_vm_collector_drops_vanished_vms() {
    // Given: A stale series for a VM that no longer exists
    let (server, client) = setup().await;
    mount_json(
        &server,
        PER_VM_STORAGE_PATH,
        json!({"data": [{"id": "vm-new", "logicalBytes": 42.0}]}),
    )
    .await;
    let metrics = MetricsCollector::new().unwrap();
    metrics.set_gauge(&metrics.vm_storage_bytes, &["vm-old", "logical"], 1.0);
    let config = metrics_config();
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    // When: Collecting
    collectors::collect_vm_storage_metrics(&ctx).await.unwrap();

    // Then: Only the current VM is exported
    let rendered = metrics.render().unwrap();
    assert!(!rendered.contains("vm-old"));
    assert!(rendered.contains("vm_id=\"vm-new\""));
}

#[tokio::test]
async fn test_disabled_collectors_are_not_queried() {
    // Given: Per-VM and archival collection turned off
    let (server, client) = setup().await;
    mount_json(&server, SYSTEM_STORAGE_PATH, json!({"total": 10})).await;
    for endpoint in [PER_VM_STORAGE_PATH, DATA_LOCATION_USAGE_PATH] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(&server)
            .await;
    }
    let metrics = MetricsCollector::new().unwrap();
    let config = MetricsConfig {
        collect_vm_metrics: false,
        collect_archival_metrics: false,
        ..metrics_config()
    };
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    // When: Running a collection cycle
    let result = collect_metrics(&ctx).await;

    // Then: The cycle succeeds without touching the disabled endpoints
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_archival_collector_queries_bandwidth_per_location() {
    let (server, client) = setup().await;
    mount_json(
        &server,
        DATA_LOCATION_USAGE_PATH,
        json!({"data": [
            {"locationId": "loc1", "dataArchived": 1000, "dataDownloaded": 5, "numVMsArchived": 3},
            {"locationId": "loc2", "dataArchived": 2000}
        ]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVAL_BANDWIDTH_PATH))
        .and(query_param("data_location_id", "loc1"))
        .and(query_param("range", "-1h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"time": "2024-01-01T00:00:00Z", "stat": 10},
            {"time": "2024-01-01T01:00:00Z", "stat": 77}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVAL_BANDWIDTH_PATH))
        .and(query_param("data_location_id", "loc2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let metrics = MetricsCollector::new().unwrap();
    let config = metrics_config();
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    let status = collectors::collect_archival_metrics(&ctx).await.unwrap();

    // A failing bandwidth query for one location does not fail the collector
    assert_eq!(status, CollectionStatus::Success);
    assert_eq!(
        metrics
            .archive_location_data_bytes
            .with_label_values(&["loc1", "archived"])
            .get(),
        1000.0
    );
    assert_eq!(
        metrics
            .archive_location_objects
            .with_label_values(&["loc1", "vm"])
            .get(),
        3.0
    );
    assert_eq!(
        metrics
            .archival_bandwidth_bytes
            .with_label_values(&["loc1"])
            .get(),
        77.0
    );
    let rendered = metrics.render().unwrap();
    assert!(!rendered.contains("rubrik_archival_bandwidth_bytes{location_id=\"loc2\"}"));
}

#[tokio::test]
async fn test_capacity_collector_succeeds_with_one_endpoint() {
    let (server, client) = setup().await;
    mount_json(&server, RUNWAY_REMAINING_PATH, json!({"days": 90})).await;
    Mock::given(method("GET"))
        .and(path(STORAGE_GROWTH_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let metrics = MetricsCollector::new().unwrap();
    let config = metrics_config();
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    let status = collectors::collect_capacity_metrics(&ctx).await.unwrap();

    assert_eq!(status, CollectionStatus::Success);
    assert_eq!(metrics.runway_remaining_days.get(), 90);
}

#[tokio::test]
async fn test_collect_metrics_full_cycle() {
    let (server, client) = setup().await;
    mount_json(&server, SYSTEM_STORAGE_PATH, json!({"total": 10, "used": 4})).await;
    mount_json(&server, PER_VM_STORAGE_PATH, json!({"data": []})).await;
    mount_json(&server, STREAM_COUNT_PATH, json!({"count": 42})).await;
    mount_json(&server, DATA_LOCATION_USAGE_PATH, json!({"data": []})).await;
    mount_json(
        &server,
        PHYSICAL_INGEST_PATH,
        json!([{"time": "2024-01-01T00:00:00Z", "stat": 2048}]),
    )
    .await;
    mount_json(&server, RUNWAY_REMAINING_PATH, json!({"days": 200})).await;
    mount_json(&server, STORAGE_GROWTH_PATH, json!({"bytes": 1024})).await;
    let metrics = MetricsCollector::new().unwrap();
    let config = metrics_config();
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    collect_metrics(&ctx).await.expect("collection should succeed");

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("rubrik_streams_count 42"));
    assert!(rendered.contains("rubrik_physical_ingest_bytes 2048"));
    assert!(rendered.contains("rubrik_runway_remaining_days 200"));
    assert!(rendered.contains("rubrik_average_storage_growth_per_day_bytes 1024"));
}

#[tokio::test]
async fn test_collect_metrics_fails_when_every_endpoint_fails() {
    // Given: An appliance that answers every stats call with 503
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let metrics = MetricsCollector::new().unwrap();
    let config = metrics_config();
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    // When: Running a collection cycle
    let result = collect_metrics(&ctx).await;

    // Then: The cycle reports failure so rubrik_up goes to 0
    assert!(result.is_err());
}

#[tokio::test]
async fn test_collect_metrics_fails_with_optional_collectors_disabled() {
    // Given: Every stats call fails and the optional collectors are off
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let metrics = MetricsCollector::new().unwrap();
    let config = MetricsConfig {
        collect_vm_metrics: false,
        collect_archival_metrics: false,
        ..metrics_config()
    };
    let ctx = CollectionContext {
        client: &client,
        metrics: &metrics,
        config: &config,
    };

    // When: Running a collection cycle
    let result = collect_metrics(&ctx).await;

    // Then: Disabled collectors do not mask the outage
    assert!(result.is_err());
}
