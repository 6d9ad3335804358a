//! Canonical address record and its two construction paths.
//!
//! Every government-data lookup in the workspace reads jurisdiction and
//! parcel fields off an [`Address`]. A record is built either by a geocode
//! round-trip ([`Address::resolve`]) or directly from stored fields
//! ([`Address::from_fields`], re-hydration with no network call); both paths
//! run the same normalization pipeline.
//!
//! Construction never fails: derivation errors are logged and folded into
//! the `valid` flag, and callers branch on [`Address::is_valid`] instead of
//! catching errors. Records are immutable once constructed; re-resolving
//! means building a new record.

use serde::Serialize;

use crate::client::JusoClient;
use crate::normalize::{pad_parcel_number, remap_land_type, split_jurisdiction_code, AddressError};

/// Raw input fields for direct construction, in geocoder conventions.
///
/// `land_type` is the raw geocoder flag (`"0"` = lot, `"1"` = mountain) and
/// defaults to `"0"` when absent; parcel numbers may be unpadded.
#[derive(Debug, Clone, Default)]
pub struct RawAddressFields {
    pub road_address: String,
    pub building_name: Option<String>,
    pub jurisdiction_code: Option<String>,
    pub district_name: Option<String>,
    pub land_type: Option<String>,
    pub parcel_main: Option<String>,
    pub parcel_sub: Option<String>,
    pub details: Option<String>,
}

/// A resolved, normalized address.
///
/// Derived accessors return `None` on an invalid record; consumers must
/// check [`Address::is_valid`] before reading them. The stored land type is
/// always in the rent-dataset convention (`"1"` = lot, `"2"` = mountain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    road_address: String,
    building_name: String,
    jurisdiction_code: Option<String>,
    district_code: Option<String>,
    legal_dong_code: Option<String>,
    district_name: Option<String>,
    land_type: Option<String>,
    parcel_main: Option<String>,
    parcel_sub: Option<String>,
    details: Option<String>,
    valid: bool,
}

/// Output of a successful derivation pass.
struct Derived {
    jurisdiction_code: String,
    district_code: String,
    legal_dong_code: String,
    land_type: String,
    parcel_main: String,
    parcel_sub: String,
}

fn derive(fields: &RawAddressFields) -> Result<Derived, AddressError> {
    let raw_code = fields.jurisdiction_code.as_deref().unwrap_or("");
    let (district_code, legal_dong_code) = split_jurisdiction_code(raw_code)?;
    let land_type = remap_land_type(fields.land_type.as_deref().unwrap_or("0"))?;
    let parcel_main = pad_parcel_number(fields.parcel_main.as_deref().unwrap_or(""))?;
    let parcel_sub = pad_parcel_number(fields.parcel_sub.as_deref().unwrap_or(""))?;
    Ok(Derived {
        jurisdiction_code: raw_code.trim().to_owned(),
        district_code,
        legal_dong_code,
        land_type,
        parcel_main,
        parcel_sub,
    })
}

impl Address {
    /// Resolves a free-text road address through the juso.go.kr geocoder.
    ///
    /// Takes the first entry of the result list; there is no ranking or
    /// disambiguation of multiple matches. The record keeps the gateway's
    /// canonical road-address text for that entry rather than the raw
    /// query. A gateway error, an empty result set, or a failed derivation
    /// all produce an invalid record rather than an error — the `valid`
    /// flag is the only failure signal.
    pub async fn resolve(client: &JusoClient, road_address: &str) -> Address {
        let entries = match client.search(road_address, 10, 1).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(road_address, error = %err, "juso search failed");
                return Self::invalid(road_address, None);
            }
        };

        let Some(entry) = entries.into_iter().next() else {
            tracing::warn!(road_address, "juso search returned no matches");
            return Self::invalid(road_address, None);
        };

        // Store the gateway's canonical road-address text, not the raw
        // query; fall back to the query if the entry carries none.
        let canonical = if entry.road_addr.trim().is_empty() {
            road_address.to_owned()
        } else {
            entry.road_addr
        };

        Self::from_fields(RawAddressFields {
            road_address: canonical,
            building_name: Some(entry.bd_nm),
            jurisdiction_code: entry.adm_cd,
            district_name: entry.sgg_nm,
            land_type: entry.mt_yn,
            parcel_main: entry.lnbr_mnnm,
            parcel_sub: entry.lnbr_slno,
            details: None,
        })
    }

    /// Builds a record directly from known fields — no network call.
    ///
    /// Used when re-hydrating a previously resolved address from storage.
    /// The full normalization pipeline (jurisdiction split, land-type remap,
    /// parcel padding) still runs; skipping the lookup never skips
    /// normalization.
    #[must_use]
    pub fn from_fields(fields: RawAddressFields) -> Address {
        match derive(&fields) {
            Ok(derived) => Address {
                road_address: fields.road_address,
                building_name: fields.building_name.unwrap_or_default(),
                jurisdiction_code: Some(derived.jurisdiction_code),
                district_code: Some(derived.district_code),
                legal_dong_code: Some(derived.legal_dong_code),
                district_name: fields.district_name,
                land_type: Some(derived.land_type),
                parcel_main: Some(derived.parcel_main),
                parcel_sub: Some(derived.parcel_sub),
                details: fields.details,
                valid: true,
            },
            Err(err) => {
                tracing::warn!(
                    road_address = %fields.road_address,
                    error = %err,
                    "address derivation failed"
                );
                Self::invalid(&fields.road_address, fields.details)
            }
        }
    }

    /// An invalid record: derived fields stay unset.
    fn invalid(road_address: &str, details: Option<String>) -> Address {
        Address {
            road_address: road_address.to_owned(),
            building_name: String::new(),
            jurisdiction_code: None,
            district_code: None,
            legal_dong_code: None,
            district_name: None,
            land_type: None,
            parcel_main: None,
            parcel_sub: None,
            details,
            valid: false,
        }
    }

    /// Returns a new record with the free-text supplement (unit, floor)
    /// attached. Consumes `self`; records are never mutated in place.
    #[must_use]
    pub fn with_details(mut self, details: &str) -> Address {
        let trimmed = details.trim();
        self.details = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Whether all derivations succeeded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn road_address(&self) -> &str {
        &self.road_address
    }

    /// Building name; may be empty.
    #[must_use]
    pub fn building_name(&self) -> &str {
        &self.building_name
    }

    /// Full 10-digit jurisdiction code.
    #[must_use]
    pub fn jurisdiction_code(&self) -> Option<&str> {
        self.jurisdiction_code.as_deref()
    }

    /// First 5 digits of the jurisdiction code (자치구).
    #[must_use]
    pub fn district_code(&self) -> Option<&str> {
        self.district_code.as_deref()
    }

    /// Last 5 digits of the jurisdiction code (법정동).
    #[must_use]
    pub fn legal_dong_code(&self) -> Option<&str> {
        self.legal_dong_code.as_deref()
    }

    /// Human-readable district name, e.g. 도봉구.
    #[must_use]
    pub fn district_name(&self) -> Option<&str> {
        self.district_name.as_deref()
    }

    /// Land type in the rent-dataset convention: `"1"` = lot, `"2"` = mountain.
    #[must_use]
    pub fn land_type(&self) -> Option<&str> {
        self.land_type.as_deref()
    }

    /// 4-digit zero-padded parcel main number (본번).
    #[must_use]
    pub fn parcel_main(&self) -> Option<&str> {
        self.parcel_main.as_deref()
    }

    /// 4-digit zero-padded parcel sub number (부번).
    #[must_use]
    pub fn parcel_sub(&self) -> Option<&str> {
        self.parcel_sub.as_deref()
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// First 2 digits of the jurisdiction code — the province/city slice
    /// the flood-statistics dataset keys on.
    #[must_use]
    pub fn province_code(&self) -> Option<&str> {
        self.jurisdiction_code.as_deref().and_then(|c| c.get(..2))
    }

    /// Digits 3–5 of the jurisdiction code — the city-ward slice the
    /// flood-statistics dataset keys on.
    #[must_use]
    pub fn city_ward_code(&self) -> Option<&str> {
        self.jurisdiction_code.as_deref().and_then(|c| c.get(2..5))
    }

    /// Road address plus the details supplement, space-joined and empty-safe.
    /// This is the single human-readable string the property-registry
    /// service takes as its lookup key.
    #[must_use]
    pub fn full_address(&self) -> String {
        let road = self.road_address.trim();
        match self.details.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(details) if road.is_empty() => details.to_owned(),
            Some(details) => format!("{road} {details}"),
            None => road.to_owned(),
        }
    }
}
