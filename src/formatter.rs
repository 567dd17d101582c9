// Holiday response formatter
// Validates a lookup query, calls the provider and normalizes its records into the
// stable output schema served by the API.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::provider::{HolidayKind, HolidayProvider, ProviderError, RawDate, RawHoliday};

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2030;
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Required parameters: year and country code")]
    MissingParameter,

    #[error("Year must be a number between 2000 and 2030 (got {0:?})")]
    InvalidYear(String),

    #[error("Holiday provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookupError {
    // Input errors are the caller's fault and are reported, not logged
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LookupError::MissingParameter | LookupError::InvalidYear(_)
        )
    }
}

// Raw request parameters as received from the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayQuery {
    pub country: Option<String>,
    pub year: Option<String>,
}

impl HolidayQuery {
    pub fn new(country: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            year: Some(year.into()),
        }
    }

    pub fn validate(&self) -> Result<ValidatedQuery, LookupError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let (Some(country), Some(year)) = (present(&self.country), present(&self.year)) else {
            return Err(LookupError::MissingParameter);
        };

        let year = match year.parse::<i32>() {
            Ok(parsed) if (MIN_YEAR..=MAX_YEAR).contains(&parsed) => parsed,
            _ => return Err(LookupError::InvalidYear(year)),
        };

        Ok(ValidatedQuery {
            country: country.to_ascii_uppercase(),
            year,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub country: String,
    pub year: i32,
}

// Marks a substitute/observed holiday. Serialized as `["substitute"]` for output
// compatibility; it is not a list of subdivisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstituteMarker;

impl SubstituteMarker {
    pub const LABEL: &'static str = "substitute";
}

impl Serialize for SubstituteMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [Self::LABEL].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SubstituteMarker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(|_| SubstituteMarker)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRecord {
    pub date: String, // YYYY-MM-DD
    pub name: String,
    pub local_name: String,
    pub country_code: String,
    pub global: bool,
    pub counties: Option<SubstituteMarker>,
    pub launch_year: Option<i32>,
}

impl HolidayRecord {
    pub fn is_substitute(&self) -> bool {
        self.counties.is_some()
    }
}

// Successful lookup outcomes. An empty provider result is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum HolidayLookup {
    Found(Vec<HolidayRecord>),
    NoHolidaysFound { country: String, year: i32 },
}

// Public, bank and untagged holidays apply nationwide
pub fn is_global(kind: Option<&HolidayKind>) -> bool {
    matches!(
        kind,
        None | Some(HolidayKind::Public) | Some(HolidayKind::Bank)
    )
}

pub fn normalize_date(raw: &RawDate) -> Result<String, LookupError> {
    let date = match raw {
        RawDate::Date(date) => *date,
        RawDate::Text(text) => {
            let date_part = text
                .trim()
                .split(|c: char| c == ' ' || c == 'T')
                .next()
                .unwrap_or_default();
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
                LookupError::Internal(format!("unparseable holiday date {:?}: {}", text, e))
            })?
        }
        RawDate::Timestamp(millis) => DateTime::from_timestamp_millis(*millis)
            .map(|timestamp| timestamp.date_naive())
            .ok_or_else(|| {
                LookupError::Internal(format!("holiday timestamp out of range: {}", millis))
            })?,
    };

    Ok(date.format("%Y-%m-%d").to_string())
}

pub fn normalize_record(raw: &RawHoliday, country_code: &str) -> Result<HolidayRecord, LookupError> {
    Ok(HolidayRecord {
        date: normalize_date(&raw.date)?,
        name: raw.name.clone(),
        local_name: raw.name.clone(),
        country_code: country_code.to_ascii_uppercase(),
        global: is_global(raw.kind.as_ref()),
        counties: raw.substitute.then_some(SubstituteMarker),
        launch_year: None,
    })
}

pub struct HolidayFormatter {
    provider: Arc<dyn HolidayProvider>,
    provider_timeout: Duration,
}

impl HolidayFormatter {
    pub fn new(provider: Arc<dyn HolidayProvider>) -> Self {
        Self {
            provider,
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    // Validation always completes before the provider is touched
    pub async fn lookup(&self, query: &HolidayQuery) -> Result<HolidayLookup, LookupError> {
        let query = query.validate()?;
        self.lookup_validated(&query).await
    }

    pub async fn lookup_validated(
        &self,
        query: &ValidatedQuery,
    ) -> Result<HolidayLookup, LookupError> {
        let fetch = self.provider.fetch(&query.country, query.year);
        let raw = match tokio::time::timeout(self.provider_timeout, fetch).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ProviderError::Timeout(self.provider_timeout.as_millis() as u64).into())
            }
        };

        if raw.is_empty() {
            return Ok(HolidayLookup::NoHolidaysFound {
                country: query.country.clone(),
                year: query.year,
            });
        }

        let records = raw
            .iter()
            .map(|holiday| normalize_record(holiday, &query.country))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            country = %query.country,
            year = query.year,
            count = records.len(),
            "holidays formatted"
        );
        Ok(HolidayLookup::Found(records))
    }
}
