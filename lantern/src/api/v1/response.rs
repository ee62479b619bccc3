//! # V1 API Response Envelope & Error Contract
//!
//! Defines the canonical wire format for all v1 API responses. Every endpoint
//! returns an [`ApiResponse<T>`] envelope with three optional top-level fields:
//!
//! ```json
//! {
//!   "data": { ... },       // present on success, absent on error
//!   "meta": { "page": 1, "totalPages": 3, "total": 42 },  // optional pagination
//!   "error": { "code": "not_found", "message": "..." }  // present on error, absent on success
//! }
//! ```
//!
//! ## ID Formats
//!
//! All resource IDs (alerts, circles, notifications, ...) are nanoids,
//! 21 characters (e.g. `"V1StGXR8_Z5jdHi6B-myT"`).
//!
//! ## Pagination
//!
//! List endpoints that paginate take 1-based `page` and `limit` query
//! parameters and echo the page shape back in `meta`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::LanternError;
use crate::models::Pagination;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed, had invalid parameters, or failed validation.
    /// HTTP 400.
    InvalidRequest,
    /// Authentication is required or the provided credentials are invalid.
    /// HTTP 401.
    Unauthorized,
    /// The caller is authenticated but not allowed to act on this resource.
    /// HTTP 403.
    Forbidden,
    /// The requested resource does not exist. HTTP 404.
    NotFound,
    /// The request conflicts with the current state of the resource. HTTP 409.
    Conflict,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
    /// A dependent upstream service (e.g. the geocoder) failed. HTTP 502.
    UpstreamUnavailable,
}

impl ErrorCode {
    /// Returns the HTTP status code corresponding to this error code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::InternalError => write!(f, "internal_error"),
            Self::UpstreamUnavailable => write!(f, "upstream_unavailable"),
        }
    }
}

/// Structured error payload within the API envelope.
///
/// ```json
/// { "code": "not_found", "message": "Alert abc123 not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    /// Internal implementation details are never included.
    pub message: String,
}

/// Pagination metadata included in list responses.
///
/// Field names serialize as camelCase on the wire (`totalPages`, `total`).
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// 1-based page echoed from the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of pages at the requested limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Total number of matching items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<Pagination> for ResponseMeta {
    fn from(page: Pagination) -> Self {
        Self {
            page: Some(page.current_page),
            total_pages: Some(page.total_pages),
            total: Some(u64::from(page.total_items)),
        }
    }
}

/// Canonical v1 API response envelope.
///
/// Every v1 endpoint returns this shape. On success, `data` is present and
/// `error` is absent. On error, `error` is present and `data` is absent.
/// `meta` is optionally present for paginated responses.
///
/// The HTTP status code is derived from the error code (on error) or
/// from the explicit status set via constructors like [`ApiResponse::created`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// The response payload. Present on success, absent on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Pagination metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    /// Error details. Present on error, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Success response with data and pagination metadata (HTTP 200).
    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Resource created response (HTTP 201).
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::CREATED,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            meta: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let fallback = ApiResponse::<()>::error(
                    ErrorCode::InternalError,
                    "An internal error occurred",
                );
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (fallback.status, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<LanternError> for ApiResponse<T> {
    /// Convert a [`LanternError`] into a v1 [`ApiResponse`].
    ///
    /// Internal error details are **never** leaked to the client. For
    /// `internal_error` and `upstream_unavailable` responses from raw
    /// transport errors, a generic message is returned and the real error
    /// is logged via `tracing::error!`.
    fn from(err: LanternError) -> Self {
        match err {
            LanternError::NotFound(ref msg) => ApiResponse::error(ErrorCode::NotFound, msg.clone()),

            LanternError::InvalidArgument(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            LanternError::Forbidden(ref msg) => {
                ApiResponse::error(ErrorCode::Forbidden, msg.clone())
            }

            LanternError::Conflict(ref msg) => ApiResponse::error(ErrorCode::Conflict, msg.clone()),

            LanternError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            LanternError::Geocode(ref msg) => {
                ApiResponse::error(ErrorCode::UpstreamUnavailable, msg.clone())
            }

            // reqwest errors can embed request URLs (including credentials in
            // query strings), so only a generic message goes out.
            LanternError::Http(ref e) => {
                tracing::error!(error = %e, "Upstream HTTP error mapped to v1 response");
                ApiResponse::error(
                    ErrorCode::UpstreamUnavailable,
                    "Upstream service unavailable",
                )
            }

            ref internal @ (LanternError::Database(_) | LanternError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
