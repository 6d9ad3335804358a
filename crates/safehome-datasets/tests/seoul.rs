//! Integration tests for `SeoulDataClient` using wiremock HTTP mocks.

use chrono::Datelike;
use safehome_datasets::{average_rent, DatasetError, SeoulDataClient};
use safehome_juso::{Address, RawAddressFields};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SeoulDataClient {
    SeoulDataClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

/// A valid record whose district name is ASCII so the expected request path
/// is easy to assert on.
fn dobong() -> Address {
    Address::from_fields(RawAddressFields {
        road_address: "서울특별시 도봉구 도봉로 552".to_owned(),
        jurisdiction_code: Some("1174010800".to_owned()),
        district_name: Some("Dobong-gu".to_owned()),
        land_type: Some("0".to_owned()),
        parcel_main: Some("3".to_owned()),
        parcel_sub: Some("0".to_owned()),
        ..RawAddressFields::default()
    })
}

fn invalid_address() -> Address {
    Address::from_fields(RawAddressFields {
        road_address: "어딘가".to_owned(),
        jurisdiction_code: Some("123".to_owned()),
        ..RawAddressFields::default()
    })
}

fn rent_body(rows: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "tbLnOpendataRentV": {
            "list_total_count": 2,
            "RESULT": { "CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다" },
            "row": rows
        }
    })
}

#[tokio::test]
async fn rent_prices_builds_segment_path_from_record() {
    let server = MockServer::start().await;

    let rows = serde_json::json!([
        { "RCPT_YR": "2023", "CGG_NM": "도봉구", "GRFE": "50000", "RTFE": "0", "RENT_SE": "전세" },
        { "RCPT_YR": "2023", "CGG_NM": "도봉구", "GRFE": "5000", "RTFE": "60", "RENT_SE": "월세" }
    ]);

    // District code, name, dong code, remapped land type, padded parcels —
    // all straight off the record, in this exact segment order.
    Mock::given(method("GET"))
        .and(path(
            "/test-key/json/tbLnOpendataRentV/1/10/2023/11740/Dobong-gu/10800/1/0003/0000",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(rent_body(rows)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let rows = client
        .rent_prices(2023, 1, 10, &dobong())
        .await
        .expect("should parse rent rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].deposit, "50000");
    assert_eq!(rows[1].monthly_rent, "60");
    server.verify().await;
}

#[tokio::test]
async fn rent_prices_rejects_invalid_record_without_request() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    let result = client.rent_prices(2023, 1, 10, &invalid_address()).await;
    assert!(matches!(result, Err(DatasetError::InvalidAddress)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn rent_prices_no_data_result_is_empty() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "RESULT": { "CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다." }
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let rows = client
        .rent_prices(2023, 1, 10, &dobong())
        .await
        .expect("INFO-200 is an empty result, not an error");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn rent_prices_portal_error_is_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "RESULT": { "CODE": "INFO-100", "MESSAGE": "인증키가 유효하지 않습니다." }
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.rent_prices(2023, 1, 10, &dobong()).await;
    assert!(
        matches!(result, Err(DatasetError::Api { ref code, .. }) if code == "INFO-100"),
        "expected Api(INFO-100), got: {result:?}"
    );
}

#[tokio::test]
async fn yearly_air_quality_scopes_by_district_segment() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "YearlyAverageAirQuality": {
            "list_total_count": 1,
            "RESULT": { "CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다" },
            "row": [
                {
                    "MSRDT_YEAR": "2023",
                    "MSRSTE_NM": "Gangnam-gu",
                    "PM10": 32.5,
                    "PM25": 17.1,
                    "O3": 0.028
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/test-key/json/YearlyAverageAirQuality/1/25/2023/Gangnam-gu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let rows = client
        .yearly_air_quality(2023, 1, 25, Some("Gangnam-gu"))
        .await
        .expect("should parse air-quality rows");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].station_name.as_deref(), Some("Gangnam-gu"));
    assert_eq!(rows[0].pm10, Some(32.5));
}

#[tokio::test]
async fn average_rent_aggregates_and_skips_bad_rows() {
    let server = MockServer::start().await;

    let rows = serde_json::json!([
        { "GRFE": "50000", "RTFE": "0" },
        { "GRFE": "40000", "RTFE": "60" },
        { "GRFE": "not-a-number", "RTFE": "10" }
    ]);

    Mock::given(method("GET"))
        .and(path_regex(r"^/test-key/json/tbLnOpendataRentV/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rent_body(rows)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    // Start at the current year so exactly one yearly lookup happens.
    let this_year = chrono::Utc::now().year();
    let avg = average_rent(&client, this_year, 10, &dobong())
        .await
        .expect("should aggregate rent rows");

    assert_eq!(avg.sample_count, 2, "the malformed row must be skipped");
    assert!((avg.avg_security_deposit - 45_000.0).abs() < f64::EPSILON);
    assert!((avg.avg_monthly_rent - 30.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn average_rent_with_no_rows_is_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/test-key/json/tbLnOpendataRentV/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(rent_body(serde_json::json!([]))),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let this_year = chrono::Utc::now().year();
    let result = average_rent(&client, this_year, 10, &dobong()).await;
    assert!(matches!(result, Err(DatasetError::NoData { .. })));
}
