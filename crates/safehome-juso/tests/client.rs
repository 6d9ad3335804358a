//! Integration tests for `JusoClient` and `Address::resolve` using wiremock
//! HTTP mocks.

use safehome_juso::{Address, JusoClient, JusoError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> JusoClient {
    JusoClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
        .retry_policy(0, 0)
}

fn normal_body() -> serde_json::Value {
    serde_json::json!({
        "results": {
            "common": {
                "errorCode": "0",
                "errorMessage": "정상",
                "totalCount": "2"
            },
            "juso": [
                {
                    "roadAddr": "서울특별시 도봉구 도봉로 552",
                    "bdNm": "도봉타워",
                    "admCd": "1174010800",
                    "sggNm": "도봉구",
                    "mtYn": "0",
                    "lnbrMnnm": "3",
                    "lnbrSlno": "0"
                },
                {
                    "roadAddr": "서울특별시 도봉구 도봉로 552-1",
                    "bdNm": "",
                    "admCd": "1174010801",
                    "sggNm": "도봉구",
                    "mtYn": "1",
                    "lnbrMnnm": "12",
                    "lnbrSlno": "7"
                }
            ]
        }
    })
}

#[tokio::test]
async fn search_returns_parsed_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .and(query_param("confmKey", "test-key"))
        .and(query_param("keyword", "도봉로 552"))
        .and(query_param("resultType", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(normal_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let entries = client
        .search("도봉로 552", 10, 1)
        .await
        .expect("should parse search results");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].road_addr, "서울특별시 도봉구 도봉로 552");
    assert_eq!(entries[0].adm_cd.as_deref(), Some("1174010800"));
    assert_eq!(entries[0].mt_yn.as_deref(), Some("0"));
}

#[tokio::test]
async fn resolve_takes_first_result_and_normalizes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(normal_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = Address::resolve(&client, "도봉로 552").await;

    assert!(address.is_valid());
    // First result wins; the second entry must not leak through.
    assert_eq!(address.district_code(), Some("11740"));
    assert_eq!(address.legal_dong_code(), Some("10800"));
    assert_eq!(address.land_type(), Some("1"));
    assert_eq!(address.parcel_main(), Some("0003"));
    assert_eq!(address.parcel_sub(), Some("0000"));
    assert_eq!(address.building_name(), "도봉타워");
    // The record carries the gateway's canonical text, not the query.
    assert_eq!(address.road_address(), "서울특별시 도봉구 도봉로 552");
}

#[tokio::test]
async fn resolve_keeps_query_when_entry_lacks_road_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": {
            "common": {
                "errorCode": "0",
                "errorMessage": "정상",
                "totalCount": "1"
            },
            "juso": [
                {
                    "roadAddr": "",
                    "bdNm": "",
                    "admCd": "1174010800",
                    "sggNm": "도봉구",
                    "mtYn": "0",
                    "lnbrMnnm": "3",
                    "lnbrSlno": "0"
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = Address::resolve(&client, "도봉로 552").await;

    assert!(address.is_valid());
    assert_eq!(address.road_address(), "도봉로 552");
}

#[tokio::test]
async fn api_error_envelope_returns_err_and_invalid_record() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": {
            "common": {
                "errorCode": "E0001",
                "errorMessage": "승인되지 않은 KEY 입니다.",
                "totalCount": "0"
            },
            "juso": null
        }
    });

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let result = client.search("도봉로 552", 10, 1).await;
    assert!(matches!(result, Err(JusoError::Api { .. })));

    let address = Address::resolve(&client, "도봉로 552").await;
    assert!(!address.is_valid());
    assert_eq!(address.district_code(), None);
    assert_eq!(address.parcel_main(), None);
}

#[tokio::test]
async fn empty_result_set_yields_invalid_record() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": {
            "common": {
                "errorCode": "0",
                "errorMessage": "정상",
                "totalCount": "0"
            },
            "juso": []
        }
    });

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = Address::resolve(&client, "없는 주소").await;
    assert!(!address.is_valid());
}

#[tokio::test]
async fn http_failure_yields_invalid_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = Address::resolve(&client, "도봉로 552").await;
    assert!(!address.is_valid());
}

#[tokio::test]
async fn malformed_entry_fields_yield_invalid_record() {
    let server = MockServer::start().await;

    // Gateway answers normally but with a truncated jurisdiction code.
    let body = serde_json::json!({
        "results": {
            "common": {
                "errorCode": "0",
                "errorMessage": "정상",
                "totalCount": "1"
            },
            "juso": [
                {
                    "roadAddr": "서울특별시 도봉구 도봉로 552",
                    "bdNm": "",
                    "admCd": "117",
                    "sggNm": "도봉구",
                    "mtYn": "0",
                    "lnbrMnnm": "3",
                    "lnbrSlno": "0"
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = Address::resolve(&client, "도봉로 552").await;
    assert!(!address.is_valid());
}

#[tokio::test]
async fn empty_keyword_is_still_sent_to_gateway() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": {
            "common": {
                "errorCode": "E0005",
                "errorMessage": "검색어는 필수 입력입니다.",
                "totalCount": "0"
            },
            "juso": null
        }
    });

    // No pre-validation guard: the request goes out even for "".
    Mock::given(method("GET"))
        .and(path("/addrlink/addrLinkApi.do"))
        .and(query_param("keyword", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = Address::resolve(&client, "").await;
    assert!(!address.is_valid());

    server.verify().await;
}
