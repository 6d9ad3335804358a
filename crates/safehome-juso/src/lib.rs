//! Road-address search client and address normalization pipeline.
//!
//! The juso.go.kr address-link API resolves a free-text road address
//! (도로명주소) into jurisdiction and parcel fields. [`Address`] is the
//! canonical record every downstream government-data lookup reads from;
//! construction runs the full normalization pipeline and flags the record
//! valid or invalid instead of returning errors.

pub mod address;
pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use address::{Address, RawAddressFields};
pub use client::JusoClient;
pub use error::JusoError;
