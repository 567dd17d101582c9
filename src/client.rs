// Client data service
// Remote-call wrapper used by the presentation layer. One request per call, fixed timeout,
// no retry. Catalog and health calls degrade to explicit fallbacks instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::countries::{self, CountryEntry};
use crate::formatter::HolidayRecord;

pub const HOLIDAYS_ENDPOINT: &str = "/holidays";
pub const COUNTRIES_ENDPOINT: &str = "/countries";
pub const HEALTH_ENDPOINT: &str = "/health";

const NO_HOLIDAYS_PREFIX: &str = "No holidays found";

pub const BACKEND_UNAVAILABLE_MESSAGE: &str =
    "Could not retrieve holidays. Please check that the backend server is running.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("{message}")]
    BackendUnavailable {
        message: String,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::BackendUnavailable { source, .. } => source.status(),
            _ => None,
        }
    }

    // A lookup that reached the API and found nothing, as opposed to a 404 for a route
    // the server does not have (for example a base URL missing its /api prefix)
    pub fn is_no_holidays(&self) -> bool {
        match self {
            ClientError::Status { status, message } => {
                *status == 404 && message.starts_with(NO_HOLIDAYS_PREFIX)
            }
            ClientError::BackendUnavailable { source, .. } => source.is_no_holidays(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}

// Where the country list came from; the two sources are never merged
#[derive(Debug, Clone, PartialEq)]
pub enum CountryCatalog {
    Primary(Vec<CountryEntry>),
    Fallback(Vec<CountryEntry>),
}

impl CountryCatalog {
    pub fn entries(&self) -> &[CountryEntry] {
        match self {
            CountryCatalog::Primary(entries) | CountryCatalog::Fallback(entries) => entries,
        }
    }

    pub fn into_entries(self) -> Vec<CountryEntry> {
        match self {
            CountryCatalog::Primary(entries) | CountryCatalog::Fallback(entries) => entries,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CountryCatalog::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub const OK: &'static str = "OK";
    pub const ERROR: &'static str = "ERROR";

    pub fn unavailable() -> Self {
        Self {
            status: Self::ERROR.to_string(),
            message: "Backend unavailable".to_string(),
            timestamp: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == Self::OK
    }
}

// Body of a non-2xx answer from the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HolidaysClient {
    http: reqwest::Client,
    base_url: String,
}

impl HolidaysClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
            };
            tracing::error!(%url, status = status.as_u16(), %message, "API error");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn get_holidays(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<HolidayRecord>, ClientError> {
        let path = format!("{}/{}/{}", HOLIDAYS_ENDPOINT, year, country_code);
        self.get_json(&path).await.map_err(|error| {
            tracing::error!(%error, country = country_code, year, "error getting holidays");
            error
        })
    }

    // Same call, with any failure turned into the message shown to end users
    pub async fn get_holidays_with_fallback(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<HolidayRecord>, ClientError> {
        self.get_holidays(country_code, year)
            .await
            .map_err(|error| ClientError::BackendUnavailable {
                message: BACKEND_UNAVAILABLE_MESSAGE.to_string(),
                source: Box::new(error),
            })
    }

    pub async fn get_countries(&self) -> CountryCatalog {
        match self.get_json::<Vec<CountryEntry>>(COUNTRIES_ENDPOINT).await {
            Ok(entries) => CountryCatalog::Primary(entries),
            Err(error) => {
                tracing::warn!(%error, "country catalog unavailable, using fallback list");
                CountryCatalog::Fallback(countries::fallback_countries())
            }
        }
    }

    pub async fn check_health(&self) -> HealthStatus {
        match self.get_json::<HealthStatus>(HEALTH_ENDPOINT).await {
            Ok(status) => status,
            Err(error) => {
                tracing::warn!(%error, "backend unavailable");
                HealthStatus::unavailable()
            }
        }
    }
}
