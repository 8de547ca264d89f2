//! Progressive bracket tax calculation.
//!
//! Each bracket taxes only the slice of net income that falls inside it, and
//! the slices are summed. The per-bracket contributions are kept alongside
//! the total so callers can show how the tax was built up.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxLevel;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// One band of a progressive tax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Income at which this bracket starts (exclusive).
    pub lower: Decimal,
    /// Income at which this bracket ends (inclusive); `None` means unbounded.
    pub upper: Option<Decimal>,
    /// Marginal rate as a whole-number percentage, e.g. `10` for 10%.
    pub percentage: Decimal,
    /// Human-readable income range shown in results.
    pub description: &'static str,
}

impl TaxBracket {
    /// Returns the part of `net_income` that falls inside this bracket.
    pub fn taxable_slice(&self, net_income: Decimal) -> Decimal {
        if net_income <= self.lower {
            return Decimal::ZERO;
        }
        let top = match self.upper {
            Some(upper) => net_income.min(upper),
            None => net_income,
        };
        top - self.lower
    }
}

/// Thai personal income tax brackets.
pub const PERSONAL_INCOME_TAX_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        lower: Decimal::ZERO,
        upper: Some(Decimal::from_parts(150_000, 0, 0, false, 0)),
        percentage: Decimal::ZERO,
        description: "0-150,000",
    },
    TaxBracket {
        lower: Decimal::from_parts(150_000, 0, 0, false, 0),
        upper: Some(Decimal::from_parts(500_000, 0, 0, false, 0)),
        percentage: Decimal::from_parts(10, 0, 0, false, 0),
        description: "150,001-500,000",
    },
    TaxBracket {
        lower: Decimal::from_parts(500_000, 0, 0, false, 0),
        upper: Some(Decimal::from_parts(1_000_000, 0, 0, false, 0)),
        percentage: Decimal::from_parts(15, 0, 0, false, 0),
        description: "500,001-1,000,000",
    },
    TaxBracket {
        lower: Decimal::from_parts(1_000_000, 0, 0, false, 0),
        upper: Some(Decimal::from_parts(2_000_000, 0, 0, false, 0)),
        percentage: Decimal::from_parts(20, 0, 0, false, 0),
        description: "1,000,001-2,000,000",
    },
    TaxBracket {
        lower: Decimal::from_parts(2_000_000, 0, 0, false, 0),
        upper: None,
        percentage: Decimal::from_parts(35, 0, 0, false, 0),
        description: "2,000,001 ขึ้นไป",
    },
];

/// An ordered, immutable set of brackets.
///
/// The schedule is passed explicitly to the calculator, so an alternate
/// schedule can be used without touching any shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl TaxSchedule<'static> {
    /// The schedule for Thai personal income tax.
    pub const fn personal_income() -> Self {
        Self::new(&PERSONAL_INCOME_TAX_BRACKETS)
    }
}

impl Default for TaxSchedule<'static> {
    fn default() -> Self {
        Self::personal_income()
    }
}

impl<'a> TaxSchedule<'a> {
    /// Creates a schedule over `brackets`, which must be in ascending order.
    pub const fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Returns the brackets in schedule order.
    pub fn brackets(&self) -> &'a [TaxBracket] {
        self.brackets
    }

    /// Computes the tax on `net_income`, bracket by bracket.
    ///
    /// # Example
    ///
    /// ```
    /// use ktax::calculation::TaxSchedule;
    /// use rust_decimal::Decimal;
    ///
    /// let result = TaxSchedule::personal_income().apply(Decimal::from(440_000))?;
    ///
    /// // (440,000 - 150,000) * 10%
    /// assert_eq!(result.gross_tax, Decimal::from(29_000));
    /// assert_eq!(result.tax_levels.len(), 5);
    /// # Ok::<(), ktax::error::EngineError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] when a bracket's tax or the
    /// running total does not fit in a `Decimal`.
    pub fn apply(&self, net_income: Decimal) -> EngineResult<BracketTaxResult> {
        let tax_levels = self
            .brackets
            .iter()
            .map(|bracket| {
                Ok(TaxLevel {
                    level: bracket.description.to_string(),
                    tax: tax_for_bracket(bracket, net_income)?,
                })
            })
            .collect::<EngineResult<Vec<TaxLevel>>>()?;

        let mut gross_tax = Decimal::ZERO;
        for level in &tax_levels {
            gross_tax = gross_tax
                .checked_add(level.tax)
                .ok_or(EngineError::AmountOverflow { stage: "gross tax" })?;
        }

        Ok(BracketTaxResult {
            gross_tax,
            tax_levels,
        })
    }
}

/// The result of running a net income through a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTaxResult {
    /// Sum of every bracket's contribution, before withholding.
    pub gross_tax: Decimal,
    /// One entry per bracket, in schedule order.
    pub tax_levels: Vec<TaxLevel>,
}

/// Computes the tax contributed by one bracket.
///
/// Returns zero when `net_income` does not reach the bracket, otherwise the
/// bracket's slice of the income multiplied by its rate.
pub fn tax_for_bracket(bracket: &TaxBracket, net_income: Decimal) -> EngineResult<Decimal> {
    bracket
        .taxable_slice(net_income)
        .checked_mul(bracket.percentage)
        .and_then(|scaled| scaled.checked_div(ONE_HUNDRED))
        .ok_or(EngineError::AmountOverflow { stage: "bracket tax" })
}
