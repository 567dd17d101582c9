// Holiday provider adapter
// The single integration point with a holiday-calendar data source. Records coming out of
// here are loosely structured and unvalidated; the formatter owns all business rules.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

// Failures surfaced by a provider. "No holidays this year" is not one of them,
// that case is an empty Vec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    #[error("Holiday provider unavailable: {0}")]
    Unavailable(String),

    #[error("Holiday provider timed out after {0}ms")]
    Timeout(u64),
}

// Kind tag attached to a raw holiday by the underlying calendar
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    Public,
    Bank,
    Observance,
    School,
    Optional,
    Other(String),
}

impl HolidayKind {
    pub fn as_str(&self) -> &str {
        match self {
            HolidayKind::Public => "public",
            HolidayKind::Bank => "bank",
            HolidayKind::Observance => "observance",
            HolidayKind::School => "school",
            HolidayKind::Optional => "optional",
            HolidayKind::Other(kind) => kind,
        }
    }
}

impl From<&str> for HolidayKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "public" => HolidayKind::Public,
            "bank" => HolidayKind::Bank,
            "observance" => HolidayKind::Observance,
            "school" => HolidayKind::School,
            "optional" => HolidayKind::Optional,
            _ => HolidayKind::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The date representations a provider may hand back
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    // Structured calendar date
    Date(NaiveDate),
    // Date-like string, possibly with a time suffix ("2025-01-01 00:00:00")
    Text(String),
    // Unix epoch milliseconds
    Timestamp(i64),
}

impl From<NaiveDate> for RawDate {
    fn from(date: NaiveDate) -> Self {
        RawDate::Date(date)
    }
}

impl From<&str> for RawDate {
    fn from(text: &str) -> Self {
        RawDate::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawHoliday {
    pub date: RawDate,
    pub name: String,
    pub kind: Option<HolidayKind>,
    pub substitute: bool,
}

impl RawHoliday {
    pub fn new(date: impl Into<RawDate>, name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            kind: None,
            substitute: false,
        }
    }

    pub fn with_kind(mut self, kind: HolidayKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn as_substitute(mut self) -> Self {
        self.substitute = true;
        self
    }
}

// Capability over an external holiday-calendar source. Implementations perform no
// validation of their own; an unrecognized country is a ProviderError, a recognized
// country without holidays is Ok(vec![]).
#[async_trait]
pub trait HolidayProvider: Send + Sync + 'static {
    async fn fetch(&self, country_code: &str, year: i32) -> Result<Vec<RawHoliday>, ProviderError>;
}

// In-memory provider serving fixed records, used for fixtures and tests
#[derive(Debug, Default)]
pub struct StaticProvider {
    holidays: HashMap<(String, i32), Vec<RawHoliday>>,
    known_countries: Vec<String>,
    failure: Option<ProviderError>,
    call_count: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers records for a country/year; the country becomes known for every year
    pub fn with_holidays(mut self, country_code: &str, year: i32, holidays: Vec<RawHoliday>) -> Self {
        let code = country_code.to_ascii_uppercase();
        if !self.known_countries.contains(&code) {
            self.known_countries.push(code.clone());
        }
        self.holidays.insert((code, year), holidays);
        self
    }

    // Every fetch fails with the given error
    pub fn failing_with(mut self, error: ProviderError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HolidayProvider for StaticProvider {
    async fn fetch(&self, country_code: &str, year: i32) -> Result<Vec<RawHoliday>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let code = country_code.to_ascii_uppercase();
        if !self.known_countries.contains(&code) {
            return Err(ProviderError::UnknownCountry(code));
        }

        Ok(self
            .holidays
            .get(&(code, year))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("public", HolidayKind::Public)]
    #[test_case("BANK", HolidayKind::Bank)]
    #[test_case(" observance ", HolidayKind::Observance)]
    #[test_case("school", HolidayKind::School)]
    #[test_case("optional", HolidayKind::Optional)]
    #[test_case("regional", HolidayKind::Other("regional".to_string()))]
    fn test_kind_from_str(input: &str, expected: HolidayKind) {
        assert_eq!(HolidayKind::from(input), expected);
    }

    #[test]
    fn test_raw_holiday_builder() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 26).unwrap();
        let raw = RawHoliday::new(date, "Boxing Day")
            .with_kind(HolidayKind::Bank)
            .as_substitute();

        assert_eq!(raw.date, RawDate::Date(date));
        assert_eq!(raw.kind, Some(HolidayKind::Bank));
        assert!(raw.substitute);
        assert_eq!(raw.kind.unwrap().to_string(), "bank");
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticProvider::new().with_holidays(
            "es",
            2025,
            vec![RawHoliday::new("2025-01-01", "New Year's Day")],
        );

        assert_eq!(provider.fetch("ES", 2025).await.unwrap().len(), 1);
        assert!(provider.fetch("ES", 2026).await.unwrap().is_empty());
        assert_eq!(
            provider.fetch("FR", 2025).await,
            Err(ProviderError::UnknownCountry("FR".to_string()))
        );
        assert_eq!(provider.call_count(), 3);
    }
}
