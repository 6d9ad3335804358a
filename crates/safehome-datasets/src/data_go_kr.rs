//! HTTP client for apis.data.go.kr services: the building-ledger title
//! record (건축HUB) and the flood-statistics inquiry.
//!
//! Both services share the `{ response: { header, body } }` envelope with
//! `header.resultCode == "00"` on success, and both are keyed by slices of
//! the resolved address record.

use std::time::Duration;

use reqwest::{Client, Url};
use safehome_juso::Address;

use crate::ensure_valid;
use crate::error::DatasetError;
use crate::types::{BuildingLedger, FloodStats, GovResponse, DATA_GO_KR_OK};

const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/";
const BUILDING_PATH: &str = "1613000/BldRgstHubService/getBrTitleInfo";
const FLOOD_PATH: &str = "1480964/InquireAdmCtyFLService_v2/get-list_v2";

/// Client for apis.data.go.kr.
///
/// Use [`DataGoKrClient::new`] for production or
/// [`DataGoKrClient::with_base_url`] to point at a mock server in tests.
pub struct DataGoKrClient {
    client: Client,
    service_key: String,
    base_url: Url,
}

impl DataGoKrClient {
    /// Creates a new client pointed at the production gateway. `service_key`
    /// is the decoded key; `reqwest` handles the percent-encoding.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(service_key: &str, timeout_secs: u64) -> Result<Self, DatasetError> {
        Self::with_base_url(service_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DatasetError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        service_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, DatasetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("safehome/0.1 (rental-risk)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DatasetError::Api {
            service: "data.go.kr".to_owned(),
            code: "config".to_owned(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            service_key: service_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the building-ledger title record (표제부) for the address's
    /// parcel: district code, legal-dong code and the 4-digit parcel numbers.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::InvalidAddress`] if the record's derivation failed.
    /// - [`DatasetError::NoData`] if the ledger has no entry for the parcel.
    /// - [`DatasetError::Api`] on a service-level error code.
    /// - [`DatasetError::Http`] / [`DatasetError::Deserialize`] on transport
    ///   or shape failures.
    pub async fn building_ledger(&self, address: &Address) -> Result<BuildingLedger, DatasetError> {
        ensure_valid(address)?;

        let district_code = address.district_code().ok_or(DatasetError::InvalidAddress)?;
        let legal_dong = address.legal_dong_code().ok_or(DatasetError::InvalidAddress)?;
        let parcel_main = address.parcel_main().ok_or(DatasetError::InvalidAddress)?;
        let parcel_sub = address.parcel_sub().ok_or(DatasetError::InvalidAddress)?;

        let envelope = self
            .request_json(
                BUILDING_PATH,
                &[
                    ("sigunguCd", district_code),
                    ("bjdongCd", legal_dong),
                    ("bun", parcel_main),
                    ("ji", parcel_sub),
                    ("_type", "json"),
                ],
            )
            .await?;
        check_header(BUILDING_PATH, &envelope)?;

        let first = envelope
            .response
            .body
            .as_ref()
            .map(|body| body.item_values())
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| DatasetError::NoData {
                service: BUILDING_PATH.to_owned(),
            })?;

        serde_json::from_value(first).map_err(|e| DatasetError::Deserialize {
            context: BUILDING_PATH.to_owned(),
            source: e,
        })
    }

    /// Fetches flood statistics for the address's province and city-ward
    /// slices of the jurisdiction code.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::InvalidAddress`] if the record's derivation failed.
    /// - [`DatasetError::Api`] on a service-level error code.
    /// - [`DatasetError::Http`] / [`DatasetError::Deserialize`] on transport
    ///   or shape failures.
    pub async fn flood_stats(&self, address: &Address) -> Result<FloodStats, DatasetError> {
        ensure_valid(address)?;

        let province = address.province_code().ok_or(DatasetError::InvalidAddress)?;
        let city_ward = address.city_ward_code().ok_or(DatasetError::InvalidAddress)?;

        let envelope = self
            .request_json(
                FLOOD_PATH,
                &[
                    ("pageNo", "1"),
                    ("numOfRows", "10"),
                    ("stdCtpvCd", province),
                    ("stdgSggCd", city_ward),
                    ("type", "json"),
                ],
            )
            .await?;
        check_header(FLOOD_PATH, &envelope)?;

        let body = envelope.response.body.as_ref();
        Ok(FloodStats {
            total_count: body.and_then(|b| b.total_count).unwrap_or(0),
            items: body.map(|b| b.item_values()).unwrap_or_default(),
        })
    }

    /// Sends a GET with the service key appended and parses the shared
    /// data.go.kr envelope.
    async fn request_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<GovResponse, DatasetError> {
        // The base URL is validated at construction, so the join cannot fail.
        let mut url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("serviceKey", &self.service_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DatasetError::Deserialize {
            context: path.to_owned(),
            source: e,
        })
    }
}

fn check_header(service: &str, envelope: &GovResponse) -> Result<(), DatasetError> {
    let header = &envelope.response.header;
    if header.result_code == DATA_GO_KR_OK {
        Ok(())
    } else {
        Err(DatasetError::Api {
            service: service.to_owned(),
            code: header.result_code.clone(),
            message: header.result_msg.clone(),
        })
    }
}
