// Holiday provider backed by the `holidays` crate
// The crate keeps its calendars in a process-wide table that is loaded once for the
// supported year range; lookups after that are in-memory.

use async_trait::async_trait;
use holidays::Country;
use std::sync::OnceLock;

use crate::countries;
use crate::formatter::{MAX_YEAR, MIN_YEAR};
use crate::provider::{HolidayProvider, ProviderError, RawHoliday};

// Name fragments the calendars use for observed and substitute days
const SUBSTITUTE_MARKERS: &[&str] = &["observed", "振替休日"];

static LOADED: OnceLock<Result<(), String>> = OnceLock::new();

// Maps an ISO 3166-1 alpha-2 code onto the library's calendars
pub fn country_for(code: &str) -> Option<Country> {
    let country = match code {
        "AR" => Country::AR,
        "AT" => Country::AT,
        "AU" => Country::AU,
        "BE" => Country::BE,
        "BR" => Country::BR,
        "CA" => Country::CA,
        "CH" => Country::CH,
        "CL" => Country::CL,
        "CN" => Country::CN,
        "CO" => Country::CO,
        "CU" => Country::CU,
        "CZ" => Country::CZ,
        "DE" => Country::DE,
        "DK" => Country::DK,
        "DO" => Country::DO,
        "ES" => Country::ES,
        "FI" => Country::FI,
        "FR" => Country::FR,
        "GB" => Country::GB,
        "GR" => Country::GR,
        "HN" => Country::HN,
        "HR" => Country::HR,
        "HU" => Country::HU,
        "IE" => Country::IE,
        "IN" => Country::IN,
        "IT" => Country::IT,
        "JP" => Country::JP,
        "KR" => Country::KR,
        "LU" => Country::LU,
        "MX" => Country::MX,
        "NL" => Country::NL,
        "NO" => Country::NO,
        "NZ" => Country::NZ,
        "PE" => Country::PE,
        "PL" => Country::PL,
        "PT" => Country::PT,
        "PY" => Country::PY,
        "RO" => Country::RO,
        "RU" => Country::RU,
        "SE" => Country::SE,
        "SI" => Country::SI,
        "SK" => Country::SK,
        "TR" => Country::TR,
        "UA" => Country::UA,
        "US" => Country::US,
        "UY" => Country::UY,
        "VE" => Country::VE,
        _ => return None,
    };
    Some(country)
}

pub fn is_substitute_name(name: &str) -> bool {
    let name = name.to_lowercase();
    SUBSTITUTE_MARKERS.iter().any(|marker| name.contains(marker))
}

fn ensure_loaded() -> Result<(), ProviderError> {
    LOADED
        .get_or_init(|| {
            let calendars: Vec<Country> = countries::catalog()
                .iter()
                .filter_map(|entry| country_for(&entry.code))
                .collect();

            let result = holidays::Builder::new()
                .countries(&calendars)
                .years(MIN_YEAR..MAX_YEAR + 1)
                .init()
                .map_err(|error| error.to_string());

            match &result {
                Ok(()) => tracing::info!(countries = calendars.len(), "holiday calendars loaded"),
                Err(error) => tracing::error!(%error, "failed to load holiday calendars"),
            }
            result
        })
        .clone()
        .map_err(ProviderError::Unavailable)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryProvider;

impl LibraryProvider {
    pub fn new() -> Self {
        Self
    }

    // Loads the calendars up front so the first request does not pay for it
    pub fn preload(&self) -> Result<(), ProviderError> {
        ensure_loaded()
    }
}

#[async_trait]
impl HolidayProvider for LibraryProvider {
    async fn fetch(&self, country_code: &str, year: i32) -> Result<Vec<RawHoliday>, ProviderError> {
        let code = country_code.to_ascii_uppercase();

        let Some(country) = country_for(&code) else {
            // Listed countries the library has no calendar for simply have no holidays
            if countries::find(&code).is_some() {
                tracing::debug!(country = %code, year, "no calendar data for listed country");
                return Ok(Vec::new());
            }
            return Err(ProviderError::UnknownCountry(code));
        };

        ensure_loaded()?;

        let (Some(since), Some(until)) = (
            chrono::NaiveDate::from_ymd_opt(year, 1, 1),
            chrono::NaiveDate::from_ymd_opt(year + 1, 1, 1),
        ) else {
            return Err(ProviderError::Unavailable(format!("year {year} out of range")));
        };

        let holidays: Vec<RawHoliday> = holidays::iter(country, since, until)
            .map_err(|error| ProviderError::Unavailable(error.to_string()))?
            .map(|holiday| {
                let raw = RawHoliday::new(holiday.date, holiday.name.clone());
                if is_substitute_name(&raw.name) {
                    raw.as_substitute()
                } else {
                    raw
                }
            })
            .collect();

        tracing::debug!(country = %code, year, count = holidays.len(), "calendar evaluated");
        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::RawDate;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn dates(holidays: &[RawHoliday]) -> Vec<NaiveDate> {
        holidays
            .iter()
            .filter_map(|holiday| match holiday.date {
                RawDate::Date(date) => Some(date),
                _ => None,
            })
            .collect()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test_case("Christmas Day (Observed)", true)]
    #[test_case("New Year's Day (observed)", true)]
    #[test_case("振替休日", true)]
    #[test_case("Christmas Day", false)]
    #[test_case("Año Nuevo", false)]
    fn test_substitute_names(name: &str, expected: bool) {
        assert_eq!(is_substitute_name(name), expected);
    }

    #[test]
    fn test_country_mapping() {
        assert!(country_for("ES").is_some());
        assert!(country_for("ZZ").is_none());
        // Lookups are uppercased before mapping
        assert!(country_for("es").is_none());
    }

    #[tokio::test]
    async fn test_every_listed_country_is_served() {
        let provider = LibraryProvider::new();

        for entry in countries::catalog() {
            let result = provider.fetch(&entry.code, 2025).await;
            assert!(result.is_ok(), "{}: {:?}", entry.code, result);
        }
    }

    #[tokio::test]
    async fn test_fallback_countries_have_holidays() {
        let provider = LibraryProvider::new();

        for entry in countries::fallback_countries() {
            let holidays = provider.fetch(&entry.code, 2025).await.unwrap();
            assert!(!holidays.is_empty(), "{} has no holidays", entry.code);
            assert!(holidays.iter().all(|h| matches!(h.date, RawDate::Date(_))));
        }
    }

    #[tokio::test]
    async fn test_unknown_country() {
        let result = LibraryProvider::new().fetch("ZZ", 2025).await;
        assert_eq!(result, Err(ProviderError::UnknownCountry("ZZ".to_string())));
    }

    #[tokio::test]
    async fn test_listed_country_without_calendar_is_empty() {
        let holidays = LibraryProvider::new().fetch("AD", 2025).await.unwrap();
        assert!(holidays.is_empty());
    }

    #[tokio::test]
    async fn test_country_code_is_case_insensitive() {
        let provider = LibraryProvider::new();
        let lower = provider.fetch("es", 2025).await.unwrap();
        let upper = provider.fetch("ES", 2025).await.unwrap();

        assert_eq!(lower, upper);
        assert!(dates(&upper).contains(&ymd(2025, 1, 1)));
    }

    #[tokio::test]
    async fn test_moved_bank_holidays() {
        let provider = LibraryProvider::new();

        // Early May bank holiday moved to VE Day in 2020
        let gb = dates(&provider.fetch("GB", 2020).await.unwrap());
        assert!(gb.contains(&ymd(2020, 5, 8)));
        assert!(!gb.contains(&ymd(2020, 5, 4)));

        // Olympic year shifts in Japan
        let jp = dates(&provider.fetch("JP", 2020).await.unwrap());
        for date in [ymd(2020, 7, 23), ymd(2020, 7, 24), ymd(2020, 8, 10)] {
            assert!(jp.contains(&date), "missing {}", date);
        }
        assert!(!jp.contains(&ymd(2020, 7, 20)));
    }

    #[tokio::test]
    async fn test_observed_days_are_marked() {
        let holidays = LibraryProvider::new().fetch("GB", 2022).await.unwrap();

        let observed = holidays
            .iter()
            .find(|h| h.date == RawDate::Date(ymd(2022, 12, 27)))
            .expect("Christmas observed on the 27th");
        assert!(observed.substitute);
        assert!(holidays
            .iter()
            .filter(|h| h.date == RawDate::Date(ymd(2022, 12, 25)))
            .all(|h| !h.substitute));
    }
}
