//! Average-rent aggregation over the Seoul rent-price dataset.

use chrono::{Datelike, Utc};
use safehome_juso::Address;
use serde::Serialize;

use crate::error::DatasetError;
use crate::seoul::SeoulDataClient;

/// Averages over the sampled rent transactions, in 만원 (ten-thousand won).
///
/// `avg_monthly_rent` includes jeonse rows, which report `0` rent; the
/// sample is not split by contract kind.
#[derive(Debug, Clone, Serialize)]
pub struct AverageRent {
    pub avg_security_deposit: f64,
    pub avg_monthly_rent: f64,
    pub sample_count: usize,
}

/// Averages security deposits and monthly rents for the address's parcel
/// from `start_year` through the current year, sampling up to `size` rows
/// per year.
///
/// Rows with non-numeric amounts are skipped with a warning rather than
/// failing the whole aggregation.
///
/// # Errors
///
/// - [`DatasetError::InvalidAddress`] if the record's derivation failed.
/// - [`DatasetError::NoData`] if no year contributed a single usable row.
/// - Any transport or portal error from the underlying rent-price lookups.
pub async fn average_rent(
    client: &SeoulDataClient,
    start_year: i32,
    size: u32,
    address: &Address,
) -> Result<AverageRent, DatasetError> {
    let current_year = Utc::now().year();

    let mut total_deposit: i64 = 0;
    let mut total_rent: i64 = 0;
    let mut count: usize = 0;

    for year in start_year..=current_year {
        let rows = client.rent_prices(year, 1, size, address).await?;
        for row in rows {
            let deposit = row.deposit.trim().parse::<i64>();
            let rent = row.monthly_rent.trim().parse::<i64>();
            match (deposit, rent) {
                (Ok(deposit), Ok(rent)) => {
                    total_deposit += deposit;
                    total_rent += rent;
                    count += 1;
                }
                _ => {
                    tracing::warn!(
                        year,
                        deposit = %row.deposit,
                        rent = %row.monthly_rent,
                        "skipping rent row with non-numeric amounts"
                    );
                }
            }
        }
    }

    if count == 0 {
        return Err(DatasetError::NoData {
            service: "tbLnOpendataRentV".to_owned(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let avg_security_deposit = total_deposit as f64 / count as f64;
    #[allow(clippy::cast_precision_loss)]
    let avg_monthly_rent = total_rent as f64 / count as f64;

    Ok(AverageRent {
        avg_security_deposit,
        avg_monthly_rent,
        sample_count: count,
    })
}
