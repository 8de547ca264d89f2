//! Deduction configuration storage.
//!
//! The tax calculator never reads storage itself; handlers fetch the current
//! [`Deduction`] through a [`DeductionStore`] and pass it in explicitly.
//!
//! Two stores are provided:
//! - [`PgDeductionStore`]: the `deductions` table in PostgreSQL
//! - [`InMemoryDeductionStore`]: a process-local store for tests and local runs

mod memory;
mod postgres;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Deduction, DeductionKind};

pub use memory::InMemoryDeductionStore;
pub use postgres::PgDeductionStore;

/// Errors raised by a deduction store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A query could not be executed.
    #[error("error getting deduction: {0}")]
    Query(#[source] sqlx::Error),

    /// A row was returned but could not be decoded.
    #[error("error decoding deduction row: {0}")]
    Decode(#[source] sqlx::Error),

    /// An update could not be executed.
    #[error("error setting deduction: {0}")]
    Update(#[source] sqlx::Error),

    /// Embedded migrations failed to apply.
    #[error("error running migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store cannot serve requests.
    #[error("deduction store unavailable: {0}")]
    Unavailable(String),
}

/// Reads and updates the deduction configuration.
#[async_trait]
pub trait DeductionStore: Send + Sync {
    /// Returns the current deduction configuration.
    async fn get_deduction(&self) -> Result<Deduction, RepositoryError>;

    /// Replaces one component of the deduction configuration.
    async fn set_deduction(
        &self,
        kind: DeductionKind,
        amount: Decimal,
    ) -> Result<(), RepositoryError>;
}

/// Builds a [`Deduction`] from `(name, amount)` rows.
///
/// Unknown names are ignored. Kinds with no row stay at zero.
pub fn deduction_from_rows<I, S>(rows: I) -> Deduction
where
    I: IntoIterator<Item = (S, Decimal)>,
    S: AsRef<str>,
{
    rows.into_iter()
        .fold(Deduction::default(), |mut deduction, (name, amount)| {
            if let Some(kind) = DeductionKind::from_name(name.as_ref()) {
                deduction.set(kind, amount);
            }
            deduction
        })
}
