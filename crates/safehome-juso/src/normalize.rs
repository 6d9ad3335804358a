//! Derivation rules for the canonical address record.
//!
//! These functions are the single owner of the jurisdiction-code split, the
//! land-type convention remap, and parcel-number padding. Two incompatible
//! land-type conventions exist across the external APIs: the geocoder returns
//! `0`=lot/`1`=mountain while the rent-price dataset expects `1`=lot/`2`=mountain.
//! The remap happens here, once; the raw convention never escapes this module.

use thiserror::Error;

/// A derivation step failed. Logged by the address constructor and folded
/// into the record's `valid` flag — never surfaced to callers directly.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("malformed jurisdiction code: {0:?}")]
    MalformedJurisdictionCode(String),

    #[error("malformed land type: {0:?}")]
    MalformedLandType(String),

    #[error("malformed parcel number: {0:?}")]
    MalformedParcelNumber(String),
}

/// Splits a 10-digit jurisdiction code (행정구역코드) into the 5-digit
/// district code (자치구) and 5-digit legal-dong code (법정동).
///
/// # Errors
///
/// Returns [`AddressError::MalformedJurisdictionCode`] unless the trimmed
/// input is exactly 10 ASCII digits.
pub fn split_jurisdiction_code(raw: &str) -> Result<(String, String), AddressError> {
    let code = raw.trim();
    if code.len() != 10 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::MalformedJurisdictionCode(raw.to_owned()));
    }
    Ok((code[..5].to_owned(), code[5..].to_owned()))
}

/// Converts the geocoder land-type flag into the rent-dataset convention
/// by adding one: raw `"0"` (lot) becomes `"1"`, raw `"1"` (mountain)
/// becomes `"2"`.
///
/// Raw values outside `{"0","1"}` still get the mechanical +1 shift rather
/// than a rejection, matching the behavior downstream datasets were built
/// against.
///
/// # Errors
///
/// Returns [`AddressError::MalformedLandType`] if the input does not parse
/// as an integer.
pub fn remap_land_type(raw: &str) -> Result<String, AddressError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AddressError::MalformedLandType(raw.to_owned()))?;
    // i64::MAX parses fine but cannot be shifted; fold the overflow into
    // the same malformed-input signal instead of panicking.
    let shifted = n
        .checked_add(1)
        .ok_or_else(|| AddressError::MalformedLandType(raw.to_owned()))?;
    Ok(shifted.to_string())
}

/// Left-zero-pads a parcel number (본번/부번) to 4 digits: `"3"` → `"0003"`.
///
/// Inputs already 4 digits or longer pass through unchanged; real cadastral
/// numbers never exceed 4 digits.
///
/// # Errors
///
/// Returns [`AddressError::MalformedParcelNumber`] if the trimmed input is
/// empty or contains a non-digit.
pub fn pad_parcel_number(raw: &str) -> Result<String, AddressError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::MalformedParcelNumber(raw.to_owned()));
    }
    Ok(format!("{digits:0>4}"))
}
