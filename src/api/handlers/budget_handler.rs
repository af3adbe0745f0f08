//! Budget calculator handler.

use axum::{response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::budget::parse_amount;
use crate::domain::{BudgetEstimate, BudgetRequest, CalculationError};
use crate::errors::{AppError, AppResult};

/// A numeric trip parameter as sent by the client.
///
/// Integers and numeric strings are accepted; anything else is reported as
/// a calculation error naming the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl AmountInput {
    fn into_amount(self, field: &'static str) -> Result<i64, CalculationError> {
        match self {
            AmountInput::Integer(value) => Ok(value),
            AmountInput::Text(raw) => parse_amount(field, &raw),
            AmountInput::Other(_) => Err(CalculationError::NotNumeric { field }),
        }
    }
}

/// Budget calculator input
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BudgetForm {
    /// Free-text destination label
    #[serde(default)]
    #[validate(length(max = 120, message = "Destination is too long"))]
    #[schema(example = "Goa")]
    pub destination: Option<String>,
    /// Number of travelers
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 2)]
    pub people: Option<AmountInput>,
    /// Trip length in days
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 3)]
    pub days: Option<AmountInput>,
    /// Accommodation cost per night
    #[serde(default, alias = "stay")]
    #[schema(value_type = Option<i64>, example = 1000)]
    pub nightly_stay: Option<AmountInput>,
    /// Transport cost per person
    #[serde(default, alias = "mode")]
    #[schema(value_type = Option<i64>, example = 500)]
    pub transport: Option<AmountInput>,
}

impl BudgetForm {
    /// Parse every field, reporting the first one that is missing or
    /// not a whole number.
    pub fn into_request(self) -> Result<BudgetRequest, CalculationError> {
        fn amount(input: Option<AmountInput>, field: &'static str) -> Result<i64, CalculationError> {
            input
                .ok_or(CalculationError::Missing { field })?
                .into_amount(field)
        }

        Ok(BudgetRequest {
            destination: self
                .destination
                .map(|d| d.trim().to_string())
                .ok_or(CalculationError::Missing {
                    field: "destination",
                })?,
            people: amount(self.people, "people")?,
            days: amount(self.days, "days")?,
            nightly_stay: amount(self.nightly_stay, "nightly_stay")?,
            transport: amount(self.transport, "transport")?,
        })
    }
}

/// Create budget routes
pub fn budget_routes() -> Router<AppState> {
    Router::new().route("/estimate", post(estimate))
}

/// Estimate a trip budget
///
/// `total = nightly_stay * days * people + transport * people`
#[utoipa::path(
    post,
    path = "/budget/estimate",
    tag = "Budget",
    request_body = BudgetForm,
    responses(
        (status = 200, description = "Estimated budget", body = BudgetEstimate),
        (status = 400, description = "Missing or non-numeric trip parameter")
    )
)]
pub async fn estimate(
    ValidatedJson(form): ValidatedJson<BudgetForm>,
) -> AppResult<Json<BudgetEstimate>> {
    let estimate = form
        .into_request()
        .and_then(|request| request.estimate())
        .map_err(|e| {
            tracing::warn!("Budget calculation failed: {}", e);
            AppError::from(e)
        })?;

    tracing::info!(
        destination = %estimate.destination,
        total = estimate.total,
        "Budget calculated"
    );

    Ok(Json(estimate))
}
