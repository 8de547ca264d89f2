use std::sync::RwLock;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{Deduction, DeductionKind};

use super::{DeductionStore, RepositoryError};

/// Process-local deduction store.
///
/// Starts from any [`Deduction`], so tests can seed out-of-range values.
/// [`InMemoryDeductionStore::failing`] builds a store whose every call fails.
#[derive(Debug)]
pub struct InMemoryDeductionStore {
    deduction: RwLock<Deduction>,
    failure: Option<String>,
}

impl InMemoryDeductionStore {
    /// Creates a store holding `deduction`.
    pub fn new(deduction: Deduction) -> Self {
        Self {
            deduction: RwLock::new(deduction),
            failure: None,
        }
    }

    /// Creates a store that rejects every read and write with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            deduction: RwLock::new(Deduction::default()),
            failure: Some(reason.into()),
        }
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        match &self.failure {
            Some(reason) => Err(RepositoryError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Unavailable("deduction lock poisoned".to_string())
    }
}

impl Default for InMemoryDeductionStore {
    fn default() -> Self {
        Self::new(Deduction::initial())
    }
}

#[async_trait]
impl DeductionStore for InMemoryDeductionStore {
    async fn get_deduction(&self) -> Result<Deduction, RepositoryError> {
        self.check_available()?;
        let deduction = self.deduction.read().map_err(|_| Self::poisoned())?;
        Ok(*deduction)
    }

    async fn set_deduction(
        &self,
        kind: DeductionKind,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut deduction = self.deduction.write().map_err(|_| Self::poisoned())?;
        deduction.set(kind, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_default_store_holds_initial_deduction() {
        let store = InMemoryDeductionStore::default();
        assert_eq!(store.get_deduction().await.unwrap(), Deduction::initial());
    }

    #[tokio::test]
    async fn test_set_replaces_only_one_component() {
        let store = InMemoryDeductionStore::default();
        store
            .set_deduction(DeductionKind::KReceipt, dec!(70000))
            .await
            .unwrap();

        let deduction = store.get_deduction().await.unwrap();
        assert_eq!(deduction.k_receipt, dec!(70000));
        assert_eq!(deduction.personal, dec!(60000));
        assert_eq!(deduction.donation, dec!(100000));
    }

    #[tokio::test]
    async fn test_failing_store_rejects_reads_and_writes() {
        let store = InMemoryDeductionStore::failing("database down");
        assert!(matches!(
            store.get_deduction().await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(matches!(
            store.set_deduction(DeductionKind::Personal, dec!(70000)).await,
            Err(RepositoryError::Unavailable(_))
        ));
    }
}
