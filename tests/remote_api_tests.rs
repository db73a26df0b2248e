use chrono::NaiveDate;
use inmet_sync::config::Settings;
use inmet_sync::error::SyncError;
use inmet_sync::models::Station;
use inmet_sync::remote::{InmetClient, StationDataClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_station() -> Station {
    Station::new(
        "A001".to_string(),
        "Brasilia".to_string(),
        "DF".to_string(),
        -15.789,
        -47.926,
        date(2020, 1, 1),
    )
}

/// Client pointed at the mock server, with the throttle disabled so the
/// retry loop runs at test speed.
fn test_client(server: &MockServer, max_attempts: u32) -> InmetClient {
    let settings = Settings {
        base_url: server.uri(),
        timeout_secs: 5,
        max_attempts,
        throttle_ms: 0,
        ..Default::default()
    };
    InmetClient::new(&settings).unwrap()
}

fn sample_window_body() -> serde_json::Value {
    serde_json::json!([
        {
            "DT_MEDICAO": "2020-01-01",
            "HR_MEDICAO": "0000",
            "TEM_MIN": "17.9",
            "TEM_MAX": "18.6",
            "TEM_INS": "18.2",
            "PRE_MIN": "884.2",
            "PRE_MAX": "884.9",
            "PRE_INS": "884.6",
            "UMD_MIN": "81",
            "UMD_MAX": "88",
            "UMD_INS": "84",
            "VEN_VEL": "1.6",
            "VEN_DIR": "104",
            "VEN_RAJ": "4.3",
            "RAD_GLO": "-3.5",
            "PTO_MIN": "15.1",
            "PTO_MAX": "15.9",
            "PTO_INS": "15.5",
            "CHUVA": "0.0"
        },
        {
            "DT_MEDICAO": "2020-01-01",
            "HR_MEDICAO": "1200",
            "TEM_MIN": "22.0",
            "TEM_MAX": "24.7",
            "TEM_INS": "24.1",
            "PRE_MIN": "885.0",
            "PRE_MAX": "885.8",
            "PRE_INS": "885.3",
            "UMD_MIN": "52",
            "UMD_MAX": "61",
            "UMD_INS": "55",
            "VEN_VEL": "2.8",
            "VEN_DIR": "121",
            "VEN_RAJ": "7.9",
            "RAD_GLO": "2815.4",
            "PTO_MIN": "13.8",
            "PTO_MAX": "14.6",
            "PTO_INS": "14.2",
            "CHUVA": null
        }
    ])
}

#[tokio::test]
async fn test_successful_fetch_tags_readings_with_station() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2020-01-01/2020-01-31/A001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_window_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 6);
    let readings = client
        .fetch_window(&test_station(), date(2020, 1, 1), date(2020, 1, 31))
        .await
        .unwrap();

    assert_eq!(readings.len(), 2);
    assert!(readings.iter().all(|r| r.station_code == "A001"));
    assert_eq!(readings[0].temp_min, Some(17.9));
    assert_eq!(readings[1].rain, None);
    assert_eq!(readings[1].radiation, Some(2815.4));
}

#[tokio::test]
async fn test_empty_body_is_authoritative_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 6);
    let result = client
        .fetch_window(&test_station(), date(2020, 1, 1), date(2020, 1, 31))
        .await;

    match result {
        Err(SyncError::EmptyWindow { station, .. }) => assert_eq!(station, "A001"),
        other => panic!("expected EmptyWindow, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_transient_failures_are_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_window_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 6);
    let readings = client
        .fetch_window(&test_station(), date(2020, 1, 1), date(2020, 1, 31))
        .await
        .unwrap();

    assert_eq!(readings.len(), 2);
}

#[tokio::test]
async fn test_budget_exhaustion_carries_every_cause() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server, 3);
    let result = client
        .fetch_window(&test_station(), date(2020, 1, 1), date(2020, 1, 31))
        .await;

    match result {
        Err(SyncError::AttemptsExhausted {
            attempts, causes, ..
        }) => {
            assert_eq!(attempts, 3);
            assert_eq!(causes.len(), 3);
        }
        other => panic!("expected AttemptsExhausted, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_garbled_body_is_retried_as_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server, 2);
    let result = client
        .fetch_window(&test_station(), date(2020, 1, 1), date(2020, 1, 31))
        .await;

    assert!(matches!(result, Err(SyncError::AttemptsExhausted { .. })));
}
