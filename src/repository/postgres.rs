use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::info;

use crate::models::{Deduction, DeductionKind};

use super::{DeductionStore, RepositoryError, deduction_from_rows};

/// Deduction store backed by the `deductions` table.
#[derive(Debug, Clone)]
pub struct PgDeductionStore {
    pool: PgPool,
}

impl PgDeductionStore {
    /// Connects a pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        info!("Connected to deduction database");
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `deductions` table and seeds default amounts if missing.
    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DeductionStore for PgDeductionStore {
    async fn get_deduction(&self) -> Result<Deduction, RepositoryError> {
        let rows = sqlx::query("SELECT name, amount FROM deductions")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::Query)?;

        let pairs = rows
            .iter()
            .map(|row| {
                let name: String = row.try_get("name").map_err(RepositoryError::Decode)?;
                let amount: Decimal = row.try_get("amount").map_err(RepositoryError::Decode)?;
                Ok((name, amount))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(deduction_from_rows(pairs))
    }

    async fn set_deduction(
        &self,
        kind: DeductionKind,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO deductions (name, amount) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET amount = EXCLUDED.amount",
        )
        .bind(kind.name())
        .bind(amount)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::Update)?;

        info!(deduction = kind.name(), amount = %amount, "Deduction updated");
        Ok(())
    }
}
