//! Travel budget calculator.
//!
//! `total = nightly_stay * days * people + transport * people`
//!
//! Inputs are taken as-is: zero and negative values are not rejected.

use serde::Serialize;
use utoipa::ToSchema;

use super::error::CalculationError;

/// Compute the trip total.
///
/// Arithmetic is checked; a total outside the `i64` range is reported as
/// `CalculationError::Overflow`.
pub fn compute(
    people: i64,
    days: i64,
    nightly_stay: i64,
    transport: i64,
) -> Result<i64, CalculationError> {
    let (stay_total, transport_total) = components(people, days, nightly_stay, transport)?;
    stay_total
        .checked_add(transport_total)
        .ok_or(CalculationError::Overflow)
}

fn components(
    people: i64,
    days: i64,
    nightly_stay: i64,
    transport: i64,
) -> Result<(i64, i64), CalculationError> {
    let stay_total = nightly_stay
        .checked_mul(days)
        .and_then(|v| v.checked_mul(people))
        .ok_or(CalculationError::Overflow)?;
    let transport_total = transport
        .checked_mul(people)
        .ok_or(CalculationError::Overflow)?;
    Ok((stay_total, transport_total))
}

/// Parse one numeric trip parameter from text.
///
/// Surrounding whitespace and a leading sign are accepted.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<i64, CalculationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalculationError::Missing { field });
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| CalculationError::NotNumeric { field })
}

/// Parsed trip parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRequest {
    pub destination: String,
    pub people: i64,
    pub days: i64,
    pub nightly_stay: i64,
    pub transport: i64,
}

impl BudgetRequest {
    /// Run the calculator and keep the breakdown.
    pub fn estimate(&self) -> Result<BudgetEstimate, CalculationError> {
        let (stay_total, transport_total) =
            components(self.people, self.days, self.nightly_stay, self.transport)?;
        let total = stay_total
            .checked_add(transport_total)
            .ok_or(CalculationError::Overflow)?;

        Ok(BudgetEstimate {
            destination: self.destination.clone(),
            people: self.people,
            days: self.days,
            nightly_stay: self.nightly_stay,
            transport: self.transport,
            stay_total,
            transport_total,
            total,
        })
    }
}

/// Calculator result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BudgetEstimate {
    #[schema(example = "Goa")]
    pub destination: String,
    #[schema(example = 2)]
    pub people: i64,
    #[schema(example = 3)]
    pub days: i64,
    /// Accommodation cost per night
    #[schema(example = 1000)]
    pub nightly_stay: i64,
    /// Transport cost per person
    #[schema(example = 500)]
    pub transport: i64,
    #[schema(example = 6000)]
    pub stay_total: i64,
    #[schema(example = 1000)]
    pub transport_total: i64,
    #[schema(example = 7000)]
    pub total: i64,
}
