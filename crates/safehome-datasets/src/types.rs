//! Wire types for the Seoul open-data portal and apis.data.go.kr services.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Seoul open-data portal (openapi.seoul.go.kr)
// ---------------------------------------------------------------------------

/// Result code signalling success on the Seoul portal.
pub const SEOUL_OK: &str = "INFO-000";
/// Result code for "no matching data" — an empty result, not a failure.
pub const SEOUL_NO_DATA: &str = "INFO-200";

/// Status block carried both inside a service block and, on request-level
/// failures, at the top level of the envelope.
#[derive(Debug, Deserialize)]
pub struct ServiceResult {
    #[serde(rename = "CODE", default)]
    pub code: String,
    #[serde(rename = "MESSAGE", default)]
    pub message: String,
}

/// Envelope of the `tbLnOpendataRentV` rent-price service.
///
/// On success the payload lives under the service-name key; on request-level
/// errors (bad key, missing segment) the portal instead returns a bare
/// top-level `RESULT`.
#[derive(Debug, Deserialize)]
pub struct RentEnvelope {
    #[serde(rename = "tbLnOpendataRentV")]
    pub block: Option<RentBlock>,
    #[serde(rename = "RESULT")]
    pub result: Option<ServiceResult>,
}

#[derive(Debug, Deserialize)]
pub struct RentBlock {
    #[serde(rename = "list_total_count", default)]
    pub total_count: i64,
    #[serde(rename = "RESULT")]
    pub result: ServiceResult,
    #[serde(rename = "row", default)]
    pub rows: Vec<RentRow>,
}

/// A single rent transaction. Amounts are numeric strings in 만원
/// (ten-thousand won) units, exactly as on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RentRow {
    /// Receipt year.
    #[serde(rename = "RCPT_YR", default)]
    pub year: Option<String>,
    #[serde(rename = "CGG_NM", default)]
    pub district_name: Option<String>,
    #[serde(rename = "BLDG_NM", default)]
    pub building_name: Option<String>,
    /// Security deposit (보증금).
    #[serde(rename = "GRFE", default)]
    pub deposit: String,
    /// Monthly rent (임대료); `"0"` for jeonse contracts.
    #[serde(rename = "RTFE", default)]
    pub monthly_rent: String,
    /// Contract kind, e.g. 전세 or 월세.
    #[serde(rename = "RENT_SE", default)]
    pub rent_kind: Option<String>,
}

/// Envelope of the `YearlyAverageAirQuality` service.
#[derive(Debug, Deserialize)]
pub struct AirQualityEnvelope {
    #[serde(rename = "YearlyAverageAirQuality")]
    pub block: Option<AirQualityBlock>,
    #[serde(rename = "RESULT")]
    pub result: Option<ServiceResult>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityBlock {
    #[serde(rename = "list_total_count", default)]
    pub total_count: i64,
    #[serde(rename = "RESULT")]
    pub result: ServiceResult,
    #[serde(rename = "row", default)]
    pub rows: Vec<AirQualityRow>,
}

/// Yearly average pollutant readings for one measuring station (구).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirQualityRow {
    #[serde(rename = "MSRDT_YEAR", default)]
    pub year: Option<String>,
    /// Station (district) name, e.g. 강남구.
    #[serde(rename = "MSRSTE_NM", default)]
    pub station_name: Option<String>,
    #[serde(rename = "PM10", default)]
    pub pm10: Option<f64>,
    #[serde(rename = "PM25", default)]
    pub pm25: Option<f64>,
    #[serde(rename = "O3", default)]
    pub ozone: Option<f64>,
    #[serde(rename = "NO2", default)]
    pub nitrogen_dioxide: Option<f64>,
    #[serde(rename = "CO", default)]
    pub carbon_monoxide: Option<f64>,
    #[serde(rename = "SO2", default)]
    pub sulfur_dioxide: Option<f64>,
}

// ---------------------------------------------------------------------------
// apis.data.go.kr
// ---------------------------------------------------------------------------

/// Result code signalling success on apis.data.go.kr.
pub const DATA_GO_KR_OK: &str = "00";

/// Shared `{ response: { header, body } }` envelope of data.go.kr services.
#[derive(Debug, Deserialize)]
pub struct GovResponse {
    pub response: GovInner,
}

#[derive(Debug, Deserialize)]
pub struct GovInner {
    pub header: GovHeader,
    #[serde(default)]
    pub body: Option<GovBody>,
}

#[derive(Debug, Deserialize)]
pub struct GovHeader {
    #[serde(rename = "resultCode", default)]
    pub result_code: String,
    #[serde(rename = "resultMsg", default)]
    pub result_msg: String,
}

/// Body with an untyped `items` slot: services return `{"item": ...}` where
/// `item` is an object for a single hit, an array for many, and the whole
/// `items` value collapses to `""` when there are none.
#[derive(Debug, Deserialize)]
pub struct GovBody {
    #[serde(default)]
    pub items: serde_json::Value,
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<i64>,
}

impl GovBody {
    /// Flattens the `items.item` slot into a list of raw values.
    #[must_use]
    pub fn item_values(&self) -> Vec<serde_json::Value> {
        match self.items.get("item") {
            Some(serde_json::Value::Array(values)) => values.clone(),
            Some(value @ serde_json::Value::Object(_)) => vec![value.clone()],
            _ => Vec::new(),
        }
    }
}

/// Summary of a building-ledger title record (건축물대장 표제부), the subset
/// the risk report reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildingLedger {
    /// Main purpose name (주용도), e.g. 공동주택.
    #[serde(rename = "mainPurpsCdNm", default)]
    pub main_purpose: Option<String>,
    /// Other registered purposes.
    #[serde(rename = "etcPurps", default)]
    pub other_purposes: Option<String>,
    /// Roof structure name, e.g. 철근콘크리트.
    #[serde(rename = "roofCdNm", default)]
    pub roof: Option<String>,
    /// Household count (세대수).
    #[serde(rename = "hhldCnt", default)]
    pub household_count: Option<i64>,
    /// Family count (가구수).
    #[serde(rename = "fmlyCnt", default)]
    pub family_count: Option<i64>,
    /// Building height in meters.
    #[serde(rename = "heit", default)]
    pub height: Option<f64>,
    #[serde(rename = "grndFlrCnt", default)]
    pub ground_floors: Option<i64>,
    #[serde(rename = "ugrndFlrCnt", default)]
    pub underground_floors: Option<i64>,
    /// Passenger elevator count.
    #[serde(rename = "rideUseElvtCnt", default)]
    pub passenger_elevators: Option<i64>,
    /// Permit date (허가일), `YYYYMMDD`.
    #[serde(rename = "pmsDay", default)]
    pub permit_date: Option<String>,
    /// Construction start date (착공일).
    #[serde(rename = "stcnsDay", default)]
    pub construction_start_date: Option<String>,
    /// Use-approval date (사용승인일).
    #[serde(rename = "useAprDay", default)]
    pub use_approval_date: Option<String>,
    /// Plot area in m² (대지면적).
    #[serde(rename = "platArea", default)]
    pub plot_area: Option<f64>,
    /// Building footprint area in m² (건축면적).
    #[serde(rename = "archArea", default)]
    pub building_area: Option<f64>,
    /// Building-to-land ratio (건폐율).
    #[serde(rename = "bcRat", default)]
    pub coverage_ratio: Option<f64>,
    /// Total floor area in m² (연면적).
    #[serde(rename = "totArea", default)]
    pub total_floor_area: Option<f64>,
    /// Floor area counted for the floor-area ratio (용적률산정연면적).
    #[serde(rename = "vlRatEstmTotArea", default)]
    pub far_floor_area: Option<f64>,
    /// Whether seismic design applies (내진설계적용여부), `"Y"`/`"N"`.
    #[serde(rename = "rserthqkDsgnApplyYn", default)]
    pub seismic_design: Option<String>,
}

/// Flood statistics for a city-ward: the raw rows are passed through, the
/// report layer only needs presence and counts.
#[derive(Debug, Clone, Serialize)]
pub struct FloodStats {
    pub total_count: i64,
    pub items: Vec<serde_json::Value>,
}
