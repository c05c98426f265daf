//! `POST /api/calculate` — perform a single arithmetic calculation.
//!
//! Inputs are validated before the evaluator runs so the two rejection
//! classes (bad operator, division by zero) keep distinguishable messages;
//! the evaluator itself only knows the NaN sentinel.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::calculator::{Operator, evaluate_symbol};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: operand1, operator, and operand2 are required and must be valid types.")]
    InvalidInput,
    #[error("Invalid operator: {0}. Supported operators are +, -, *, /.")]
    UnsupportedOperator(String),
    #[error("Division by zero is not allowed.")]
    DivisionByZero,
    #[error("Calculation resulted in an invalid number.")]
    InvalidResult,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidResult => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct CalculateResponse {
    result: f64,
}

/// Validate the request body, evaluate, and return the numeric result.
pub async fn calculate(Json(body): Json<Value>) -> Result<Json<CalculateResponse>, ApiError> {
    let operand1 = number_field(&body, "operand1")?;
    let operand2 = number_field(&body, "operand2")?;
    let symbol = body
        .get("operator")
        .and_then(Value::as_str)
        .ok_or(ApiError::InvalidInput)?;

    let operator = Operator::from_symbol(symbol)
        .ok_or_else(|| ApiError::UnsupportedOperator(symbol.to_string()))?;
    if operator == Operator::Divide && operand2 == 0.0 {
        return Err(ApiError::DivisionByZero);
    }

    let result = evaluate_symbol(operand1, symbol, operand2);
    // Overflow to infinity, or a sentinel that slipped past validation.
    if !result.is_finite() {
        tracing::warn!(operand1, symbol, operand2, "calculation produced a non-finite result");
        return Err(ApiError::InvalidResult);
    }

    Ok(Json(CalculateResponse { result }))
}

fn number_field(body: &Value, name: &str) -> Result<f64, ApiError> {
    body.get(name)
        .and_then(Value::as_f64)
        .ok_or(ApiError::InvalidInput)
}
