//! Overflow-checked decimal arithmetic.
//!
//! `Decimal` operators panic when a result exceeds 96 bits. Every
//! calculator goes through these helpers so oversized amounts surface as
//! [`EngineError::CalculationError`] instead.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

fn overflow(operation: &str, lhs: Decimal, rhs: Decimal) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} of {} and {} is out of range", operation, lhs, rhs),
    }
}

pub(crate) fn mul(lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow("multiplication", lhs, rhs))
}

pub(crate) fn add(lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| overflow("addition", lhs, rhs))
}

pub(crate) fn sub(lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow("subtraction", lhs, rhs))
}

/// Resolves `percent` of `base`.
pub(crate) fn percent_of(base: Decimal, percent: Decimal) -> EngineResult<Decimal> {
    Ok(mul(base, percent)? / Decimal::ONE_HUNDRED)
}

/// Sums a sequence of amounts.
pub(crate) fn sum<I>(values: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = EngineResult<Decimal>>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| add(total, value?))
}
