// Holiday explorer: holiday lookups per country/year over HTTP, plus the client and
// terminal views that consume them

pub mod api;
pub mod client;
pub mod config;
pub mod countries;
pub mod formatter;
pub mod library;
pub mod provider;
pub mod views;

// Re-export key types for convenience
pub use api::{router, AppState, HealthResponse};
pub use client::{ClientError, CountryCatalog, HealthStatus, HolidaysClient};
pub use config::{ClientConfig, ConfigError, ServerConfig};
pub use countries::CountryEntry;
pub use formatter::{
    HolidayFormatter, HolidayLookup, HolidayQuery, HolidayRecord, LookupError, SubstituteMarker,
};
pub use library::LibraryProvider;
pub use provider::{HolidayKind, HolidayProvider, ProviderError, RawDate, RawHoliday};
pub use views::ViewState;
