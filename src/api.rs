// HTTP boundary
// Thin axum surface over the formatter and the countries catalog. Owns nothing but the
// mapping from lookup outcomes to status codes and JSON bodies.

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::countries::{self, CountryEntry};
use crate::formatter::{HolidayFormatter, HolidayLookup, HolidayQuery, HolidayRecord, LookupError};

#[derive(Clone)]
pub struct AppState {
    pub formatter: Arc<HolidayFormatter>,
}

impl AppState {
    pub fn new(formatter: HolidayFormatter) -> Self {
        Self {
            formatter: Arc::new(formatter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

// Everything a holiday lookup can answer with besides a list of holidays
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NoHolidays { country: String, year: i32 },
    Internal { error: String, message: String },
}

impl From<LookupError> for ApiError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::MissingParameter => {
                ApiError::BadRequest("Required parameters: year and country code".to_string())
            }
            LookupError::InvalidYear(_) => {
                ApiError::BadRequest("Year must be a number between 2000 and 2030".to_string())
            }
            LookupError::Provider(_) | LookupError::Internal(_) => ApiError::Internal {
                error: "Internal server error getting holidays".to_string(),
                message: error.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            ApiError::NoHolidays { country, year } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": format!("No holidays found for {} in {}", country, year),
                    "holidays": [],
                })),
            )
                .into_response(),
            ApiError::Internal { error, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/countries", get(list_countries))
        .route("/api/holidays/:year/:country", get(get_holidays))
        .fallback(not_found)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Holiday server running correctly".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn list_countries() -> Json<Vec<CountryEntry>> {
    Json(countries::catalog())
}

async fn get_holidays(
    State(state): State<AppState>,
    Path((year, country)): Path<(String, String)>,
) -> Result<Json<Vec<HolidayRecord>>, ApiError> {
    let query = HolidayQuery::new(country, year);

    match state.formatter.lookup(&query).await {
        Ok(HolidayLookup::Found(records)) => Ok(Json(records)),
        Ok(HolidayLookup::NoHolidaysFound { country, year }) => {
            tracing::info!(%country, year, "no holidays found");
            Err(ApiError::NoHolidays { country, year })
        }
        Err(error) if error.is_user_error() => {
            tracing::debug!(?query, %error, "rejected holiday query");
            Err(error.into())
        }
        Err(error) => {
            tracing::error!(?query, %error, "error getting holidays");
            Err(error.into())
        }
    }
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "message": format!("The route {} does not exist on this server", uri),
        })),
    )
}
