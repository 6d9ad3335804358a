//! juso.go.kr address-link API response types.
//!
//! The API wraps every response in a `{"results": {"common": ..., "juso": [...]}}`
//! envelope. `common.errorMessage` is the success sentinel: the literal string
//! `"정상"` ("normal") signals success, anything else is an API-level failure.

use serde::{Deserialize, Deserializer};

/// Success sentinel carried in [`SearchCommon::error_message`].
pub const NORMAL_MESSAGE: &str = "정상";

/// Top-level envelope of the `addrLinkApi.do` endpoint.
#[derive(Debug, Deserialize)]
pub struct AddrLinkResponse {
    pub results: SearchResults,
}

/// Inner result block: status metadata plus the matching address entries.
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    pub common: SearchCommon,
    /// Absent or explicitly `null` when the request failed.
    #[serde(default, deserialize_with = "nullable_entries")]
    pub juso: Vec<JusoEntry>,
}

/// The API sends `"juso": null` on failure; treat that the same as missing.
fn nullable_entries<'de, D>(deserializer: D) -> Result<Vec<JusoEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<JusoEntry>>::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default())
}

/// Status metadata for a search response.
///
/// `totalCount` is a numeric string on the wire (`"25"`), not an integer.
#[derive(Debug, Deserialize)]
pub struct SearchCommon {
    #[serde(rename = "errorCode", default)]
    pub error_code: String,
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(rename = "totalCount", default)]
    pub total_count: String,
}

impl SearchCommon {
    /// Whether the envelope reports success.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.error_message == NORMAL_MESSAGE
    }
}

/// A single address match.
///
/// Only the fields the normalization pipeline consumes are modeled; the API
/// returns many more. `mtYn` is the raw land-type flag in the geocoder
/// convention (`"0"` = lot, `"1"` = mountain) and must be remapped before use.
#[derive(Debug, Clone, Deserialize)]
pub struct JusoEntry {
    /// Road address text (도로명주소).
    #[serde(rename = "roadAddr", default)]
    pub road_addr: String,
    /// Building name; often empty.
    #[serde(rename = "bdNm", default)]
    pub bd_nm: String,
    /// 10-digit jurisdiction code (행정구역코드).
    #[serde(rename = "admCd", default)]
    pub adm_cd: Option<String>,
    /// District name, e.g. 도봉구.
    #[serde(rename = "sggNm", default)]
    pub sgg_nm: Option<String>,
    /// Raw land-type flag, geocoder convention.
    #[serde(rename = "mtYn", default)]
    pub mt_yn: Option<String>,
    /// Parcel main number (본번).
    #[serde(rename = "lnbrMnnm", default)]
    pub lnbr_mnnm: Option<String>,
    /// Parcel sub number (부번).
    #[serde(rename = "lnbrSlno", default)]
    pub lnbr_slno: Option<String>,
}
