#![allow(clippy::unwrap_used)]
// Integration tests for `EagleEyeClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eagleeye_api::types::{BinaryRequest, CommandRequest, NewDeviceRequest};
use eagleeye_api::{EagleEyeClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, EagleEyeClient) {
    let server = MockServer::start().await;
    let uri = server.uri();
    let client = EagleEyeClient::from_reqwest(&uri, &uri, reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_flat_array() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "deviceId": 7,
            "ssid": "HOMUS-0007",
            "macAddress": "AA:BB:CC:DD:EE:FF",
            "ipAddress": "10.0.0.7",
            "activeState": 1,
            "codeVersion": "2.4.1"
        },
        {
            "deviceId": 8,
            "macAddress": null,
            "activeState": 0
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/eagleeye/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client.list_devices().await.unwrap().into_records();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].device_id, Some(7));
    assert_eq!(records[0].mac_address.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
    assert_eq!(records[0].code_version.as_deref(), Some("2.4.1"));
    assert_eq!(records[1].mac_address, None);
    assert_eq!(records[1].active_state, Some(0));
}

#[tokio::test]
async fn test_list_devices_page_envelope() {
    let (server, client) = setup().await;

    let body = json!({
        "content": [{ "deviceId": 1 }, { "deviceId": 2 }],
        "totalPages": 5
    });

    Mock::given(method("GET"))
        .and(path("/eagleeye/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client.list_devices().await.unwrap().into_records();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_list_devices_paged_sends_query() {
    let (server, client) = setup().await;

    let body = json!({
        "content": [{ "deviceId": 42 }],
        "totalPages": 3
    });

    Mock::given(method("GET"))
        .and(path("/eagleeye/devices"))
        .and(query_param("page", "2"))
        .and(query_param("size", "25"))
        .and(query_param("sortFields", "deviceId"))
        .and(query_param("sortOrders", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .list_devices_paged(2, 25, &["deviceId"], &["asc"])
        .await
        .unwrap();

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.content[0].device_id, Some(42));
}

#[tokio::test]
async fn test_device_telemetry_series_decode() {
    let (server, client) = setup().await;

    let body = json!([{
        "deviceId": 3,
        "macAddress": "aa:aa:aa:aa:aa:aa",
        "wifiSignalStrength": [{ "strength": -62.0, "time": "2025-03-01 10:00:00" }],
        "nvsStorage": [{ "nvs_used": 120, "nvs_free": 380, "nvs_total": 500, "time": "2025-03-01 10:00:00" }],
        "spiffsStorage": [{ "spiffs_used": 2048, "spiffs_total": 4096, "time": "2025-03-01 10:00:00" }],
        "deviceUsers": [{ "customerId": 9, "name": "living room", "userCode": "U-9", "userFailureCount": "2" }]
    }]);

    Mock::given(method("GET"))
        .and(path("/eagleeye/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let records = client.list_devices().await.unwrap().into_records();
    let device = &records[0];

    let signal = device.wifi_signal_strength.as_ref().unwrap();
    assert_eq!(signal[0].strength, Some(-62.0));

    let nvs = device.nvs_storage.as_ref().unwrap();
    assert_eq!(nvs[0].nvs_total, Some(500));

    let users = device.device_users.as_ref().unwrap();
    assert_eq!(users[0].user_failure_count.as_deref(), Some("2"));
}

// ── Alarm tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_alarms_for_entity() {
    let (server, client) = setup().await;

    let body = json!([{
        "severity": 4,
        "entityType": "device",
        "entityId": 42,
        "key": "OFFLINE",
        "status": "active",
        "startTime": "2025-03-01 09:30:00",
        "duration": 90061
    }]);

    Mock::given(method("GET"))
        .and(path("/eagleeye/alarms/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let alarms = client.alarms_for_entity(42).await.unwrap();

    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].severity, Some(4));
    assert_eq!(alarms[0].key.as_deref(), Some("OFFLINE"));
    assert_eq!(alarms[0].duration, Some(90061));
}

// ── Customer tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_customers_array() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 1, "name": "Asha", "email": "asha@example.com", "mobile": "9000000001" },
        { "id": 2, "name": null, "email": null, "mobile": null }
    ]);

    Mock::given(method("GET"))
        .and(path("/eagleeye/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let customers = client.list_customers().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].name.as_deref(), Some("Asha"));
}

#[tokio::test]
async fn test_list_customers_single_object_drift() {
    let (server, client) = setup().await;

    // One backend revision returns a bare object instead of an array.
    let body = json!({
        "id": 12345,
        "code": "ABC123",
        "name": "John Doe",
        "devices": [{ "version": "2.4.1", "connected": true, "demo": false }]
    });

    Mock::given(method("GET"))
        .and(path("/eagleeye/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let customers = client.list_customers().await.unwrap();

    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].id, Some(12345));
    let devices = customers[0].devices.as_ref().unwrap();
    assert_eq!(devices[0].connected, Some(true));
}

// ── Provisioning tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_create_device() {
    let (server, client) = setup().await;

    let request = NewDeviceRequest {
        mac_address: "AA:BB:CC:DD:EE:FF".into(),
        ssid: "HOMUS-0099".into(),
        password: "homus123".into(),
        mqtt_password: "mqttpassword".into(),
    };

    let response = json!({
        "device": {
            "devId": 99,
            "macAddress": "AA:BB:CC:DD:EE:FF",
            "createdAt": "2025-03-01 10:00:00",
            "updatedAt": "2025-03-01 10:00:00"
        },
        "deviceCred": {
            "credId": 501,
            "devId": 99,
            "def_dev_ssid": "HOMUS-0099",
            "def_dev_password": "homus123",
            "mqtt_password": "mqttpassword"
        }
    });

    Mock::given(method("POST"))
        .and(path("/database/api/devices"))
        .and(body_json(json!({
            "macAddress": "AA:BB:CC:DD:EE:FF",
            "ssid": "HOMUS-0099",
            "password": "homus123",
            "mqttpassword": "mqttpassword"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let created = client.create_device(&request).await.unwrap();

    assert_eq!(created.device.dev_id, Some(99));
    assert_eq!(created.device_cred.def_dev_ssid.as_deref(), Some("HOMUS-0099"));
    assert_eq!(created.device_cred.mqtt_password.as_deref(), Some("mqttpassword"));
}

#[tokio::test]
async fn test_delete_device() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/database/api/devices/99"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "device deleted" })),
        )
        .mount(&server)
        .await;

    let ack = client.delete_device(99).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("device deleted"));
}

#[tokio::test]
async fn test_list_provisioned_uses_one_based_page() {
    let (server, client) = setup().await;

    let body = json!({
        "devices": [{ "devId": 1, "macAddress": "aa:aa:aa:aa:aa:01" }],
        "totalPages": 4
    });

    Mock::given(method("GET"))
        .and(path("/database/api/devices"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client.list_provisioned(1, 10).await.unwrap();
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.devices.len(), 1);
}

// ── Monitor service tests ───────────────────────────────────────────

#[tokio::test]
async fn test_suggest_ssid() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/get_new_device_ssid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ssid": "HOMUS-0142" })))
        .mount(&server)
        .await;

    let suggestion = client.suggest_ssid().await.unwrap();
    assert_eq!(suggestion.ssid.as_deref(), Some("HOMUS-0142"));
}

#[tokio::test]
async fn test_generate_binary_returns_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/generate_binary"))
        .and(body_json(json!({ "version": "2.4.1", "device_id": "42" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("binary queued: fw-2.4.1-dev42"))
        .mount(&server)
        .await;

    let text = client
        .generate_binary(&BinaryRequest {
            version: "2.4.1".into(),
            device_id: "42".into(),
        })
        .await
        .unwrap();

    assert_eq!(text, "binary queued: fw-2.4.1-dev42");
}

#[tokio::test]
async fn test_send_command() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/restart_device"))
        .and(body_json(json!({
            "mac_address": "aa:bb:cc:dd:ee:ff",
            "command": "change-relay",
            "relay_no": "3",
            "state": "1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "relay set" })))
        .mount(&server)
        .await;

    let ack = client
        .send_command(&CommandRequest {
            mac_address: "aa:bb:cc:dd:ee:ff".into(),
            command: "change-relay".into(),
            relay_no: "3".into(),
            state: "1".into(),
        })
        .await
        .unwrap();

    assert_eq!(ack.message.as_deref(), Some("relay set"));
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_maps_status_and_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/eagleeye/devices"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "maintenance window" })),
        )
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_transient_classification() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/eagleeye/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list_devices().await.unwrap_err();
    assert!(err.is_transient());
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_decode_error_keeps_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/eagleeye/alarms"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.list_alarms().await.unwrap_err();

    match err {
        Error::Decode { body, .. } => assert!(body.contains("not json")),
        other => panic!("expected Decode error, got: {other:?}"),
    }
}
