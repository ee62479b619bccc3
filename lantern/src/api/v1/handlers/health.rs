use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub geocoder: GeocoderStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DatabaseStatus {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct GeocoderStatus {
    pub enabled: bool,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let database = match state.db.sync().await {
        Ok(_) => DatabaseStatus {
            status: "ok".to_string(),
        },
        Err(_) => DatabaseStatus {
            status: "error".to_string(),
        },
    };

    let geocoder = GeocoderStatus {
        enabled: state.config.geocoder.is_some(),
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        geocoder,
    })
}
