//! Government open-data lookups keyed by a resolved address record.
//!
//! Each client here reads derived fields off a valid
//! [`safehome_juso::Address`]: the Seoul open-data portal for rent prices
//! and air quality, and apis.data.go.kr for the building ledger and flood
//! statistics. Passing an invalid record is a caller bug and is rejected
//! with [`DatasetError::InvalidAddress`] before any request goes out.

use safehome_juso::Address;

pub mod data_go_kr;
pub mod error;
pub mod price;
pub mod seoul;
pub mod types;

pub use data_go_kr::DataGoKrClient;
pub use error::DatasetError;
pub use price::{average_rent, AverageRent};
pub use seoul::SeoulDataClient;

/// Guards the "invalid records never reach a downstream consumer" invariant
/// at the consumer seam.
pub(crate) fn ensure_valid(address: &Address) -> Result<(), DatasetError> {
    if address.is_valid() {
        Ok(())
    } else {
        Err(DatasetError::InvalidAddress)
    }
}
