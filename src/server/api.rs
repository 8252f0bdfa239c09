//! Request handlers, payload types and the OpenAPI document.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use super::AppState;
use crate::batch::{identify_all, BatchSummary};
use crate::{identify, ClassificationResult};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Identifier API",
        version = "0.1.0",
        description = "Identifies the brand of a payment card from its BIN prefix and verifies the Luhn checksum. Responses only ever contain the masked card number.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Identification", description = "Card brand identification endpoints"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(identify_card, identify_batch, health),
    components(schemas(
        IdentifyRequest,
        IdentifyResponse,
        BatchIdentifyRequest,
        BatchIdentifyResponse,
        BatchSummary,
        HealthResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `POST /api/card/identify`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"cardNumber": "4111 1111 1111 1111"}))]
pub struct IdentifyRequest {
    /// Card number to identify. Digits with optional spaces or hyphens as separators.
    pub card_number: Option<String>,
}

/// Identification result for one card number.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "brand": "Visa",
    "isValid": true,
    "isFormatValid": true,
    "maskedCardNumber": "4111********1111",
    "cardLength": 16,
    "message": "valid Visa card",
    "statusCode": 200
}))]
pub struct IdentifyResponse {
    /// Identified brand: Visa, MasterCard, AmericanExpress, DinersClub, Discover, JCB, EnRoute, Voyager, HiperCard, Aura or Unknown
    pub brand: String,
    /// Whether the digits pass the Luhn checksum
    pub is_valid: bool,
    /// Whether the input was a well-formed card number (digits, spaces, hyphens; 12-19 digits)
    pub is_format_valid: bool,
    /// Card number with all but the first 4 and last 4 digits replaced by `*`
    pub masked_card_number: String,
    /// Number of digits after removing separators
    pub card_length: usize,
    /// Human-readable outcome
    pub message: String,
    /// HTTP status this result maps to
    pub status_code: u16,
}

impl IdentifyResponse {
    fn from_result(result: &ClassificationResult) -> Self {
        Self {
            brand: result.brand().code().to_string(),
            is_valid: result.is_luhn_valid(),
            is_format_valid: result.is_format_valid(),
            masked_card_number: result.masked_number().to_string(),
            card_length: result.digit_count(),
            message: result.message().to_string(),
            status_code: status_for(result).as_u16(),
        }
    }
}

/// Body of `POST /api/card/identify/batch`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"cardNumbers": ["4111111111111111", "5105105105105100", "378282246310005"]}))]
pub struct BatchIdentifyRequest {
    /// Card numbers to identify. Each may include spaces or hyphens.
    pub card_numbers: Option<Vec<String>>,
}

/// Results of a batch identification, in request order.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchIdentifyResponse {
    /// One result per submitted card number
    pub results: Vec<IdentifyResponse>,
    /// Outcome counts
    pub summary: BatchSummary,
}

/// Service status.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the service is answering
    pub status: String,
    /// Current server time (UTC)
    pub timestamp: DateTime<Utc>,
    /// API version
    pub version: String,
}

/// Error payload for requests that could not be processed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "message": "invalid request",
    "statusCode": 400,
    "errors": {"cardNumber": ["cardNumber is required"]},
    "timestamp": "2025-11-21T10:30:00Z"
}))]
pub struct ErrorResponse {
    /// What went wrong
    pub message: String,
    /// HTTP status code
    pub status_code: u16,
    /// Field-level details, keyed by field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    /// When the error occurred (UTC)
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Creates an error payload stamped with the current time.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
            errors: None,
            timestamp: Utc::now(),
        }
    }

    fn invalid_field(field: &str, detail: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![detail.to_string()]);
        Self {
            errors: Some(errors),
            ..Self::new(StatusCode::BAD_REQUEST, "invalid request")
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Maps an identification result to its HTTP status.
///
/// Malformed input is 400, a well-formed number failing Luhn is 422, and
/// everything else is 200 (including an unidentified brand).
pub fn status_for(result: &ClassificationResult) -> StatusCode {
    if !result.is_format_valid() {
        StatusCode::BAD_REQUEST
    } else if !result.is_luhn_valid() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    }
}

fn rejected_body(rejection: &JsonRejection, field: &str) -> ErrorResponse {
    // The rejection text can quote the body, so it is never echoed back
    tracing::warn!(status = %rejection.status(), "rejected request body");
    let detail = format!("request body must be a JSON object with a {} field", field);
    ErrorResponse::invalid_field(field, &detail)
}

/// Identify the brand of a card number
#[utoipa::path(
    post,
    path = "/api/card/identify",
    request_body = IdentifyRequest,
    responses(
        (status = 200, description = "Well-formed number that passes the Luhn check", body = IdentifyResponse),
        (status = 400, description = "Malformed card number or request body", body = IdentifyResponse),
        (status = 422, description = "Well-formed number that fails the Luhn check", body = IdentifyResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "Identification"
)]
pub(crate) async fn identify_card(payload: Result<Json<IdentifyRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected_body(&rejection, "cardNumber").into_response(),
    };

    let Some(card_number) = request.card_number else {
        return ErrorResponse::invalid_field("cardNumber", "cardNumber is required").into_response();
    };

    let result = identify(&card_number);
    let status = status_for(&result);

    tracing::info!(
        brand = result.brand().code(),
        outcome = %result.outcome(),
        masked = result.masked_number(),
        "card identified"
    );

    (status, Json(IdentifyResponse::from_result(&result))).into_response()
}

/// Identify several card numbers in one request
#[utoipa::path(
    post,
    path = "/api/card/identify/batch",
    request_body = BatchIdentifyRequest,
    responses(
        (status = 200, description = "Per-number results and summary", body = BatchIdentifyResponse),
        (status = 400, description = "Missing list or batch too large", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    tag = "Identification"
)]
pub(crate) async fn identify_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchIdentifyRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected_body(&rejection, "cardNumbers").into_response(),
    };

    let Some(card_numbers) = request.card_numbers else {
        return ErrorResponse::invalid_field("cardNumbers", "cardNumbers is required").into_response();
    };

    if card_numbers.len() > state.max_batch_size {
        return ErrorResponse::invalid_field(
            "cardNumbers",
            &format!(
                "batch of {} exceeds the maximum of {}",
                card_numbers.len(),
                state.max_batch_size
            ),
        )
        .into_response();
    }

    let results = identify_all(&card_numbers);
    let summary = BatchSummary::from_results(&results);

    tracing::info!(
        total = summary.total,
        valid = summary.valid,
        luhn_failed = summary.luhn_failed,
        brand_not_identified = summary.brand_not_identified,
        format_errors = summary.format_errors,
        "batch identified"
    );

    Json(BatchIdentifyResponse {
        results: results.iter().map(IdentifyResponse::from_result).collect(),
        summary,
    })
    .into_response()
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/card/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_policy() {
        assert_eq!(status_for(&identify("4111111111111111")), StatusCode::OK);
        assert_eq!(status_for(&identify("1234567812345670")), StatusCode::OK);
        assert_eq!(
            status_for(&identify("4111111111111112")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&identify("8698000000000009")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&identify("411111111111111A")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&identify("")), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_response_mapping() {
        let response = IdentifyResponse::from_result(&identify("3530 1113 3330 0000"));
        assert_eq!(response.brand, "JCB");
        assert!(response.is_valid);
        assert!(response.is_format_valid);
        assert_eq!(response.masked_card_number, "3530********0000");
        assert_eq!(response.card_length, 16);
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = IdentifyResponse::from_result(&identify("378282246310005"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["brand"], "AmericanExpress");
        assert_eq!(json["maskedCardNumber"], "3782*******0005");
        assert_eq!(json["cardLength"], 15);
        assert_eq!(json["isFormatValid"], true);
        assert_eq!(json["statusCode"], 200);
    }

    #[test]
    fn test_error_response_shape() {
        let error = ErrorResponse::new(StatusCode::TOO_MANY_REQUESTS, "slow down");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["message"], "slow down");
        assert_eq!(json["statusCode"], 429);
        assert!(json["timestamp"].is_string());
        assert!(json.get("errors").is_none());

        let error = ErrorResponse::invalid_field("cardNumber", "cardNumber is required");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["errors"]["cardNumber"][0], "cardNumber is required");
    }
}
