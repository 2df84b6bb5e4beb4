use serde_json::json;
use rubrik_exporter::rubrik::types::*;

#[test]
fn test_deserialize_system_storage_with_missing_fields() {
    let json = json!({
        "total": 1000,
        "used": 400
    });

    let storage: SystemStorage =
        serde_json::from_value(json).expect("Failed to parse SystemStorage");
    assert_eq!(storage.total, 1000);
    assert_eq!(storage.used, 400);
    // Missing keys decode to zero
    assert_eq!(storage.live_mount, 0);
}

#[test]
fn test_deserialize_vm_storage_list() {
    let json = json!({
        "hasMore": true,
        "total": 10,
        "data": [{
            "id": "VirtualMachine:::abc",
            "logicalBytes": 1.5e12,
            "ingestedBytes": 9.0e11,
            "exclusivePhysicalBytes": 4.0e11,
            "sharedPhysicalBytes": 1.0e11,
            "indexStorageBytes": 2.0e9
        }]
    });

    let list: ResultList<VmStorage> = serde_json::from_value(json).expect("Failed to parse list");
    assert!(list.has_more);
    assert_eq!(list.total, Some(10));
    assert_eq!(list.data[0].id, "VirtualMachine:::abc");
    assert_eq!(list.data[0].shared_physical_bytes, 1.0e11);
}

#[test]
fn test_result_list_without_data_is_empty() {
    let list: ResultList<DataLocationUsage> =
        serde_json::from_value(json!({"hasMore": false})).expect("Failed to parse list");
    assert!(list.data.is_empty());
}

#[test]
fn test_data_location_usage_archived_objects_labels() {
    let json = json!({
        "locationId": "loc-a",
        "numVMsArchived": 1,
        "numFilesetsArchived": 2,
        "numLinuxFilesetsArchived": 3,
        "numWindowsFilesetsArchived": 4,
        "numShareFilesetsArchived": 5,
        "numMssqlDbsArchived": 6,
        "numHypervVmsArchived": 7,
        "numNutanixVmsArchived": 8,
        "numManagedVolumesArchived": 9
    });

    let usage: DataLocationUsage = serde_json::from_value(json).expect("Failed to parse usage");
    let objects = usage.archived_objects();

    assert_eq!(objects[0], ("vm", 1));
    assert_eq!(objects[6], ("hyperv_vm", 7));
    assert_eq!(objects[8], ("managed_volume", 9));
    let total: i64 = objects.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 45);
}

#[test]
fn test_deserialize_time_stat_integer_and_float() {
    let series: Vec<TimeStat> = serde_json::from_value(json!([
        {"time": "2024-03-01T10:00:00.000Z", "stat": 12},
        {"time": "2024-03-01T10:01:00.000Z", "stat": 12.75}
    ]))
    .expect("Failed to parse series");

    assert_eq!(series[0].stat, 12.0);
    assert_eq!(series[1].time, "2024-03-01T10:01:00.000Z");
}

#[test]
fn test_deserialize_session_token() {
    let session: SessionToken = serde_json::from_value(json!({
        "id": "abc",
        "userId": "user",
        "token": "tok"
    }))
    .expect("Failed to parse session");
    assert_eq!(session.user_id.as_deref(), Some("user"));
    assert_eq!(session.token.as_deref(), Some("tok"));
}
