//! JSON API, nested under `/api`

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::models::{ClientAddress, LookupResult};
use crate::web::AppState;
use crate::{LookupError, VERSION};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// Look up this address instead of the requesting client's
    pub ip: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// A failed lookup, answered as `502 Bad Gateway` with an [`ErrorBody`]
pub struct ApiError(pub LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.kind().to_string(),
            message: self.0.user_message(),
        };
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/health", get(get_health))
}

async fn get_weather(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<LookupResult>, ApiError> {
    let address = query.ip.map(ClientAddress::new);
    let result = state.lookup(&headers, address).await?;
    Ok(Json(result))
}

async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}
