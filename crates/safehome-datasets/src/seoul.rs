//! HTTP client for the Seoul open-data portal (openapi.seoul.go.kr).
//!
//! The portal routes everything through path segments rather than query
//! parameters: `/{key}/json/{service}/{start}/{end}/...`, with service-specific
//! filter segments appended after the paging ones. Success is reported as
//! `RESULT.CODE == "INFO-000"` inside the service block; request-level failures
//! come back as a bare top-level `RESULT`.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Url};
use safehome_juso::Address;

use crate::ensure_valid;
use crate::error::DatasetError;
use crate::types::{
    AirQualityEnvelope, AirQualityRow, RentEnvelope, RentRow, ServiceResult, SEOUL_NO_DATA,
    SEOUL_OK,
};

const DEFAULT_BASE_URL: &str = "http://openapi.seoul.go.kr:8088/";
const RENT_SERVICE: &str = "tbLnOpendataRentV";
const AIR_SERVICE: &str = "YearlyAverageAirQuality";

/// Characters escaped when a value is embedded as a path segment. Non-ASCII
/// bytes (the Korean district names) are always percent-encoded.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'%');

/// Client for the Seoul open-data portal.
///
/// Use [`SeoulDataClient::new`] for production or
/// [`SeoulDataClient::with_base_url`] to point at a mock server in tests.
pub struct SeoulDataClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SeoulDataClient {
    /// Creates a new client pointed at the production portal.
    ///
    /// The rent dataset is slow; pass a generous `timeout_secs` (the config
    /// default is 120).
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, DatasetError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DatasetError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
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
            service: "seoul".to_owned(),
            code: "config".to_owned(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches rent transactions for one year, scoped to the address's
    /// district, legal dong and parcel.
    ///
    /// The filter segments come straight off the record: district code,
    /// district name, legal-dong code, land type (already in this dataset's
    /// `1`=lot/`2`=mountain convention) and the 4-digit parcel numbers.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::InvalidAddress`] if the record's derivation failed.
    /// - [`DatasetError::Api`] on a portal-level error code.
    /// - [`DatasetError::Http`] / [`DatasetError::Deserialize`] on transport
    ///   or shape failures.
    pub async fn rent_prices(
        &self,
        year: i32,
        page: u32,
        size: u32,
        address: &Address,
    ) -> Result<Vec<RentRow>, DatasetError> {
        ensure_valid(address)?;

        let district_code = address.district_code().ok_or(DatasetError::InvalidAddress)?;
        let legal_dong = address.legal_dong_code().ok_or(DatasetError::InvalidAddress)?;
        let land_type = address.land_type().ok_or(DatasetError::InvalidAddress)?;
        let parcel_main = address.parcel_main().ok_or(DatasetError::InvalidAddress)?;
        let parcel_sub = address.parcel_sub().ok_or(DatasetError::InvalidAddress)?;
        let district_name =
            utf8_percent_encode(address.district_name().unwrap_or(""), PATH_SEGMENT).to_string();

        let path = format!(
            "{key}/json/{RENT_SERVICE}/{page}/{size}/{year}/{district_code}/{district_name}/{legal_dong}/{land_type}/{parcel_main}/{parcel_sub}",
            key = self.api_key,
        );
        let body = self.request_text(&path).await?;
        let envelope: RentEnvelope = parse(RENT_SERVICE, &body)?;

        match envelope.block {
            Some(block) => {
                check_result(RENT_SERVICE, &block.result)?;
                Ok(block.rows)
            }
            None => empty_or_error(RENT_SERVICE, envelope.result.as_ref()),
        }
    }

    /// Fetches yearly average air-quality rows, optionally scoped to one
    /// district (구) by name.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::Api`] on a portal-level error code.
    /// - [`DatasetError::Http`] / [`DatasetError::Deserialize`] on transport
    ///   or shape failures.
    pub async fn yearly_air_quality(
        &self,
        year: i32,
        start: u32,
        end: u32,
        district_name: Option<&str>,
    ) -> Result<Vec<AirQualityRow>, DatasetError> {
        let mut path = format!(
            "{key}/json/{AIR_SERVICE}/{start}/{end}/{year}/",
            key = self.api_key,
        );
        if let Some(name) = district_name {
            path.push_str(&utf8_percent_encode(name, PATH_SEGMENT).to_string());
        }

        let body = self.request_text(&path).await?;
        let envelope: AirQualityEnvelope = parse(AIR_SERVICE, &body)?;

        match envelope.block {
            Some(block) => {
                check_result(AIR_SERVICE, &block.result)?;
                Ok(block.rows)
            }
            None => empty_or_error(AIR_SERVICE, envelope.result.as_ref()),
        }
    }

    /// Sends a GET for the given pre-encoded path and returns the body text
    /// after asserting a 2xx status.
    async fn request_text(&self, path: &str) -> Result<String, DatasetError> {
        // The base URL is validated at construction, so the join cannot fail.
        let url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

fn parse<T: serde::de::DeserializeOwned>(service: &str, body: &str) -> Result<T, DatasetError> {
    serde_json::from_str(body).map_err(|e| DatasetError::Deserialize {
        context: service.to_owned(),
        source: e,
    })
}

fn check_result(service: &str, result: &ServiceResult) -> Result<(), DatasetError> {
    if result.code == SEOUL_OK {
        Ok(())
    } else {
        Err(DatasetError::Api {
            service: service.to_owned(),
            code: result.code.clone(),
            message: result.message.clone(),
        })
    }
}

/// A missing service block is either the portal's "no data" answer or a
/// request-level error.
fn empty_or_error<T>(
    service: &str,
    result: Option<&ServiceResult>,
) -> Result<Vec<T>, DatasetError> {
    match result {
        Some(r) if r.code == SEOUL_NO_DATA => Ok(Vec::new()),
        Some(r) => Err(DatasetError::Api {
            service: service.to_owned(),
            code: r.code.clone(),
            message: r.message.clone(),
        }),
        None => Err(DatasetError::Api {
            service: service.to_owned(),
            code: "unknown".to_owned(),
            message: "response missing both service block and RESULT".to_owned(),
        }),
    }
}
