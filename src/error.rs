//! Error types for the K-Tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during tax calculation.
//! Validation failures carry every rule that was broken, not just the first,
//! as a [`Violations`] set.

use std::fmt;

use thiserror::Error;

/// A single validation rule that an input failed.
///
/// Violations are tags: callers check for them with [`Violations::contains`]
/// rather than matching on error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Violation {
    /// Total income is negative.
    InvalidTotalIncome,
    /// Withholding tax is negative or exceeds total income.
    InvalidWht,
    /// An allowance carries a negative amount.
    InvalidAllowanceAmount,
    /// Personal deduction is outside `(10,000, 100,000]`.
    InvalidPersonalDeduction,
    /// K-receipt deduction ceiling is outside `(0, 100,000]`.
    InvalidKReceiptDeduction,
    /// Donation deduction ceiling is above 100,000.
    InvalidDonationDeduction,
}

impl Violation {
    /// Returns the human-readable message for this violation.
    pub fn message(&self) -> &'static str {
        match self {
            Violation::InvalidTotalIncome => "total income must be greater than or equal to 0",
            Violation::InvalidWht => {
                "WHT must be greater than or equal to 0 and less than total income"
            }
            Violation::InvalidAllowanceAmount => {
                "allowance amount must be greater than or equal to 0"
            }
            Violation::InvalidPersonalDeduction => "invalid personal deduction",
            Violation::InvalidKReceiptDeduction => "invalid k-receipt deduction",
            Violation::InvalidDonationDeduction => "invalid donation deduction",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// An ordered set of violated rules.
///
/// Rules are kept in the order they were first recorded and each rule
/// appears at most once.
///
/// # Example
///
/// ```
/// use ktax::error::{Violation, Violations};
///
/// let mut violations = Violations::new();
/// violations.push(Violation::InvalidWht);
/// violations.push(Violation::InvalidWht);
///
/// assert_eq!(violations.len(), 1);
/// assert!(violations.contains(Violation::InvalidWht));
/// assert!(!violations.contains(Violation::InvalidTotalIncome));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. Recording the same rule twice has no effect.
    pub fn push(&mut self, violation: Violation) {
        if !self.0.contains(&violation) {
            self.0.push(violation);
        }
    }

    /// Returns true if `violation` was recorded.
    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }

    /// Returns true if no rule was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of distinct violated rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded violations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Converts the set into `Ok(())` when empty, or `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut violations = Violations::new();
        for violation in iter {
            violations.push(violation);
        }
        violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// The main error type for the K-Tax engine.
///
/// # Example
///
/// ```
/// use ktax::error::{EngineError, Violation, Violations};
///
/// let error = EngineError::InvalidDeduction {
///     violations: Violations::from_iter([Violation::InvalidPersonalDeduction]),
/// };
/// assert_eq!(error.to_string(), "invalid deduction: invalid personal deduction");
/// assert!(error.has_violation(Violation::InvalidPersonalDeduction));
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The tax information supplied by the caller broke one or more rules.
    #[error("invalid tax information: {violations}")]
    InvalidTaxInformation {
        /// Every rule the tax information broke.
        violations: Violations,
    },

    /// The deduction configuration broke one or more rules.
    #[error("invalid deduction: {violations}")]
    InvalidDeduction {
        /// Every rule the deduction configuration broke.
        violations: Violations,
    },

    /// A record in a batch could not be calculated; the whole batch fails.
    #[error("error calculating tax for record {record}: {source}")]
    BatchCalculation {
        /// Zero-based index of the failing record.
        record: usize,
        /// The failure for that record.
        source: Box<EngineError>,
    },

    /// An amount grew past what `Decimal` can hold.
    #[error("amount too large to calculate: {stage}")]
    AmountOverflow {
        /// The calculation step that overflowed.
        stage: &'static str,
    },

    /// A configuration value could not be parsed.
    #[error("Failed to parse configuration value '{key}': {message}")]
    ConfigParseError {
        /// The configuration key.
        key: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the violation set carried by a validation error.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            EngineError::InvalidTaxInformation { violations }
            | EngineError::InvalidDeduction { violations } => Some(violations),
            EngineError::BatchCalculation { source, .. } => source.violations(),
            EngineError::AmountOverflow { .. } | EngineError::ConfigParseError { .. } => None,
        }
    }

    /// Returns true if this error carries `violation`.
    pub fn has_violation(&self, violation: Violation) -> bool {
        self.violations()
            .is_some_and(|violations| violations.contains(violation))
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_keep_insertion_order_without_duplicates() {
        let violations = Violations::from_iter([
            Violation::InvalidWht,
            Violation::InvalidTotalIncome,
            Violation::InvalidWht,
        ]);

        let collected: Vec<_> = violations.iter().copied().collect();
        assert_eq!(
            collected,
            vec![Violation::InvalidWht, Violation::InvalidTotalIncome]
        );
    }

    #[test]
    fn test_empty_violations_into_result_is_ok() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn test_non_empty_violations_into_result_is_err() {
        let result = Violations::from_iter([Violation::InvalidDonationDeduction]).into_result();
        let violations = result.unwrap_err();
        assert!(violations.contains(Violation::InvalidDonationDeduction));
    }

    #[test]
    fn test_invalid_tax_information_displays_all_violations() {
        let error = EngineError::InvalidTaxInformation {
            violations: Violations::from_iter([
                Violation::InvalidTotalIncome,
                Violation::InvalidAllowanceAmount,
            ]),
        };
        assert_eq!(
            error.to_string(),
            "invalid tax information: total income must be greater than or equal to 0; \
             allowance amount must be greater than or equal to 0"
        );
    }

    #[test]
    fn test_batch_error_exposes_inner_violations() {
        let error = EngineError::BatchCalculation {
            record: 2,
            source: Box::new(EngineError::InvalidTaxInformation {
                violations: Violations::from_iter([Violation::InvalidWht]),
            }),
        };
        assert!(error.has_violation(Violation::InvalidWht));
        assert!(error.to_string().starts_with("error calculating tax for record 2"));
    }

    #[test]
    fn test_config_parse_error_displays_key_and_message() {
        let error = EngineError::ConfigParseError {
            key: "PORT".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration value 'PORT': invalid digit found in string"
        );
        assert!(error.violations().is_none());
    }

    #[test]
    fn test_amount_overflow_names_stage() {
        let error = EngineError::AmountOverflow { stage: "allowance sum" };
        assert_eq!(error.to_string(), "amount too large to calculate: allowance sum");
        assert!(error.violations().is_none());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_deduction() -> EngineResult<()> {
            Err(EngineError::InvalidDeduction {
                violations: Violations::from_iter([Violation::InvalidKReceiptDeduction]),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_deduction()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
