//! Batch tax calculation.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{CsvTaxRecord, CsvTaxResponse, Deduction, TaxInformation};

use super::tax::calculate_tax;

/// Calculates tax for every record, preserving input order.
///
/// The batch is all-or-nothing: if any record fails, no results are returned
/// and the error names the failing record.
///
/// # Example
///
/// ```
/// use ktax::calculation::calculate_tax_batch;
/// use ktax::models::{AllowanceType, Deduction, TaxInformation};
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     TaxInformation::new(Decimal::from(500_000)),
///     TaxInformation::new(Decimal::from(600_000))
///         .with_wht(Decimal::from(40_000))
///         .with_allowance(AllowanceType::Donation, Decimal::from(20_000)),
/// ];
/// let response = calculate_tax_batch(&records, &Deduction::initial()).unwrap();
///
/// assert_eq!(response.taxes[0].tax, Decimal::from(29_000));
/// assert_eq!(response.taxes[1].tax_refund, Decimal::from(2_000));
/// ```
pub fn calculate_tax_batch(
    records: &[TaxInformation],
    deduction: &Deduction,
) -> EngineResult<CsvTaxResponse> {
    let taxes = records
        .iter()
        .enumerate()
        .map(|(record, info)| {
            let result =
                calculate_tax(info, deduction).map_err(|source| EngineError::BatchCalculation {
                    record,
                    source: Box::new(source),
                })?;
            Ok(CsvTaxRecord {
                total_income: info.total_income,
                tax: result.tax,
                tax_refund: result.tax_refund,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    debug!(records = taxes.len(), "Batch calculated");

    Ok(CsvTaxResponse { taxes })
}
