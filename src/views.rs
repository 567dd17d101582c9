// Presentation views
// Text rendering of the country/year picker and of holiday results grouped by month.

use chrono::NaiveDate;

use crate::client::{ClientError, HealthStatus};
use crate::countries::CountryEntry;
use crate::formatter::HolidayRecord;

pub const YEAR_OPTIONS: i32 = 8;
pub const UNKNOWN_MONTH: &str = "Unknown";
pub const LOOKUP_FAILED_MESSAGE: &str = "Error loading holidays. Try another country or year.";

// Selectable years: two back, five ahead
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_OPTIONS).map(|i| current_year - 2 + i).collect()
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

pub fn month_name(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_else(|| UNKNOWN_MONTH.to_string())
}

// "2025-01-01" -> "Wednesday, January 1, 2025"; unparseable input is shown as is
pub fn format_long_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    pub month: String,
    pub holidays: Vec<&'a HolidayRecord>,
}

// Months appear in the order first seen, records keep their order within a month
pub fn group_by_month(holidays: &[HolidayRecord]) -> Vec<MonthGroup<'_>> {
    let mut groups: Vec<MonthGroup<'_>> = Vec::new();

    for holiday in holidays {
        let month = month_name(&holiday.date);
        match groups.iter_mut().find(|group| group.month == month) {
            Some(group) => group.holidays.push(holiday),
            None => groups.push(MonthGroup {
                month,
                holidays: vec![holiday],
            }),
        }
    }

    groups
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    // A successful lookup that returned nothing; not an error for the user
    Empty {
        country_name: String,
        year: i32,
    },
    Results {
        country: CountryEntry,
        year: i32,
        holidays: Vec<HolidayRecord>,
    },
}

impl ViewState {
    // State shown for the outcome of a holiday lookup
    pub fn from_lookup(
        country: CountryEntry,
        year: i32,
        result: Result<Vec<HolidayRecord>, ClientError>,
    ) -> Self {
        match result {
            Ok(holidays) if holidays.is_empty() => ViewState::Empty {
                country_name: country.name,
                year,
            },
            Ok(holidays) => ViewState::Results {
                country,
                year,
                holidays,
            },
            Err(error) if error.is_no_holidays() => ViewState::Empty {
                country_name: country.name,
                year,
            },
            Err(ClientError::BackendUnavailable { source, .. })
                if matches!(*source, ClientError::Status { .. }) =>
            {
                ViewState::Error(LOOKUP_FAILED_MESSAGE.to_string())
            }
            Err(error) => ViewState::Error(error.to_string()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            ViewState::Loading => "Loading...\n".to_string(),
            ViewState::Error(message) => format!("[!] {}\n", message),
            ViewState::Empty { country_name, year } => format!(
                "No holidays found\nNo information available for {} in the year {}\n",
                country_name, year
            ),
            ViewState::Results {
                country,
                year,
                holidays,
            } => render_results(country, *year, holidays),
        }
    }
}

fn render_results(country: &CountryEntry, year: i32, holidays: &[HolidayRecord]) -> String {
    let mut lines = vec![
        format!("{} Holidays in {}", country.flag, country.name),
        format!("Year {} • {} holidays", year, holidays.len()),
    ];

    for group in group_by_month(holidays) {
        lines.push(String::new());
        lines.push(format!("== {} ==", group.month));
        for holiday in group.holidays {
            let mut title = format!("  {}", holiday.name);
            if holiday.global {
                title.push_str(" [National]");
            }
            if holiday.counties.is_some() {
                title.push_str(" [Regional]");
            }
            lines.push(title);
            lines.push(format!("    {}", format_long_date(&holiday.date)));
        }
    }

    lines.join("\n") + "\n"
}

pub fn render_country_picker(countries: &[CountryEntry]) -> String {
    let mut out = String::from("-- Select a country --\n");
    for country in countries {
        out.push_str(&format!("  {}  {} {}\n", country.code, country.flag, country.name));
    }
    out
}

pub fn render_year_picker(current_year: i32, selected: i32) -> String {
    year_options(current_year)
        .into_iter()
        .map(|year| {
            if year == selected {
                format!("[{}]", year)
            } else {
                year.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_backend_status(health: &HealthStatus) -> String {
    let state = if health.is_online() { "online" } else { "offline" };
    let mut lines = vec![
        format!("Backend: {}", state),
        format!("Status: {}", health.status),
        format!("Message: {}", health.message),
    ];
    if let Some(timestamp) = &health.timestamp {
        lines.push(format!("Timestamp: {}", timestamp));
    }
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::SubstituteMarker;

    fn record(date: &str, name: &str, global: bool, substitute: bool) -> HolidayRecord {
        HolidayRecord {
            date: date.to_string(),
            name: name.to_string(),
            local_name: name.to_string(),
            country_code: "GB".to_string(),
            global,
            counties: substitute.then_some(SubstituteMarker),
            launch_year: None,
        }
    }

    fn sample() -> Vec<HolidayRecord> {
        vec![
            record("2022-01-01", "New Year's Day", true, false),
            record("2022-01-03", "New Year's Day (substitute day)", true, true),
            record("2022-03-27", "Mothering Sunday", false, false),
            record("2022-12-25", "Christmas Day", true, false),
            record("2022-12-27", "Christmas Day (substitute day)", true, true),
        ]
    }

    #[test]
    fn test_year_options() {
        assert_eq!(
            year_options(2026),
            vec![2024, 2025, 2026, 2027, 2028, 2029, 2030, 2031]
        );
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2025-01-01"), "Wednesday, January 1, 2025");
        assert_eq!(format_long_date("garbage"), "garbage");
    }

    #[test]
    fn test_group_by_month_keeps_every_record() {
        let holidays = sample();
        let groups = group_by_month(&holidays);

        let months: Vec<&str> = groups.iter().map(|g| g.month.as_str()).collect();
        assert_eq!(months, vec!["January", "March", "December"]);
        assert_eq!(groups[0].holidays.len(), 2);
        assert_eq!(groups[2].holidays[1].name, "Christmas Day (substitute day)");

        let total: usize = groups.iter().map(|g| g.holidays.len()).sum();
        assert_eq!(total, holidays.len());
    }

    #[test]
    fn test_unparseable_dates_are_grouped_not_dropped() {
        let holidays = vec![record("someday", "Mystery", true, false)];
        let groups = group_by_month(&holidays);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].month, UNKNOWN_MONTH);
    }

    #[test]
    fn test_render_results() {
        let state = ViewState::Results {
            country: CountryEntry {
                code: "GB".to_string(),
                name: "United Kingdom".to_string(),
                flag: "🇬🇧".to_string(),
            },
            year: 2022,
            holidays: sample(),
        };
        let text = state.render();

        assert!(text.contains("Holidays in United Kingdom"));
        assert!(text.contains("Year 2022 • 5 holidays"));
        assert!(text.contains("== January =="));
        assert!(text.contains("Christmas Day (substitute day) [National] [Regional]"));
        assert!(text.contains("  Mothering Sunday\n"));
        assert!(text.contains("Sunday, December 25, 2022"));
    }

    #[test]
    fn test_empty_and_error_states_differ() {
        let empty = ViewState::Empty {
            country_name: "Andorra".to_string(),
            year: 2025,
        }
        .render();
        let error = ViewState::Error("Error loading holidays.".to_string()).render();

        assert!(empty.contains("No holidays found"));
        assert!(empty.contains("Andorra in the year 2025"));
        assert!(error.starts_with("[!]"));
        assert_ne!(empty, error);
    }

    fn andorra() -> CountryEntry {
        CountryEntry {
            code: "AD".to_string(),
            name: "Andorra".to_string(),
            flag: "🇦🇩".to_string(),
        }
    }

    #[test]
    fn test_state_from_lookup() {
        let no_holidays = ClientError::Status {
            status: 404,
            message: "No holidays found for AD in 2025".to_string(),
        };
        assert_eq!(
            ViewState::from_lookup(andorra(), 2025, Err(no_holidays)),
            ViewState::Empty {
                country_name: "Andorra".to_string(),
                year: 2025,
            }
        );

        let missing_route = ClientError::BackendUnavailable {
            message: "Could not retrieve holidays.".to_string(),
            source: Box::new(ClientError::Status {
                status: 404,
                message: "Route not found".to_string(),
            }),
        };
        assert_eq!(
            ViewState::from_lookup(andorra(), 2025, Err(missing_route)),
            ViewState::Error(LOOKUP_FAILED_MESSAGE.to_string())
        );

        let transport = ClientError::Transport("connection refused".to_string());
        assert!(matches!(
            ViewState::from_lookup(andorra(), 2025, Err(transport)),
            ViewState::Error(_)
        ));

        assert!(matches!(
            ViewState::from_lookup(andorra(), 2025, Ok(sample())),
            ViewState::Results { .. }
        ));
    }

    #[test]
    fn test_pickers_and_status() {
        let picker = render_country_picker(&crate::countries::fallback_countries());
        assert!(picker.contains("ES  🇪🇸 Spain"));

        assert_eq!(
            render_year_picker(2026, 2025),
            "2024 [2025] 2026 2027 2028 2029 2030 2031"
        );

        let status = render_backend_status(&HealthStatus::unavailable());
        assert!(status.contains("Backend: offline"));
        assert!(status.contains("Status: ERROR"));
    }
}
