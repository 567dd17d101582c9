// Countries catalog
// Static, immutable list of the countries offered for selection.

use serde::{Deserialize, Serialize};

// Row of the static table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

impl Country {
    pub const fn new(code: &'static str, name: &'static str, flag: &'static str) -> Self {
        Self { code, name, flag }
    }
}

// Wire representation, shared by the API and the client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
    pub flag: String,
}

impl From<&Country> for CountryEntry {
    fn from(country: &Country) -> Self {
        Self {
            code: country.code.to_string(),
            name: country.name.to_string(),
            flag: country.flag.to_string(),
        }
    }
}

pub static CATALOG: &[Country] = &[
    Country::new("AD", "Andorra", "🇦🇩"),
    Country::new("AR", "Argentina", "🇦🇷"),
    Country::new("AT", "Austria", "🇦🇹"),
    Country::new("AU", "Australia", "🇦🇺"),
    Country::new("BE", "Belgium", "🇧🇪"),
    Country::new("BR", "Brazil", "🇧🇷"),
    Country::new("CA", "Canada", "🇨🇦"),
    Country::new("CH", "Switzerland", "🇨🇭"),
    Country::new("CL", "Chile", "🇨🇱"),
    Country::new("CN", "China", "🇨🇳"),
    Country::new("CO", "Colombia", "🇨🇴"),
    Country::new("CR", "Costa Rica", "🇨🇷"),
    Country::new("CU", "Cuba", "🇨🇺"),
    Country::new("CZ", "Czech Republic", "🇨🇿"),
    Country::new("DE", "Germany", "🇩🇪"),
    Country::new("DK", "Denmark", "🇩🇰"),
    Country::new("DO", "Dominican Republic", "🇩🇴"),
    Country::new("EC", "Ecuador", "🇪🇨"),
    Country::new("ES", "Spain", "🇪🇸"),
    Country::new("FI", "Finland", "🇫🇮"),
    Country::new("FR", "France", "🇫🇷"),
    Country::new("GB", "United Kingdom", "🇬🇧"),
    Country::new("GR", "Greece", "🇬🇷"),
    Country::new("GT", "Guatemala", "🇬🇹"),
    Country::new("HN", "Honduras", "🇭🇳"),
    Country::new("HR", "Croatia", "🇭🇷"),
    Country::new("HU", "Hungary", "🇭🇺"),
    Country::new("IE", "Ireland", "🇮🇪"),
    Country::new("IN", "India", "🇮🇳"),
    Country::new("IT", "Italy", "🇮🇹"),
    Country::new("JP", "Japan", "🇯🇵"),
    Country::new("KR", "South Korea", "🇰🇷"),
    Country::new("LU", "Luxembourg", "🇱🇺"),
    Country::new("MX", "Mexico", "🇲🇽"),
    Country::new("NL", "Netherlands", "🇳🇱"),
    Country::new("NO", "Norway", "🇳🇴"),
    Country::new("NZ", "New Zealand", "🇳🇿"),
    Country::new("PA", "Panama", "🇵🇦"),
    Country::new("PE", "Peru", "🇵🇪"),
    Country::new("PL", "Poland", "🇵🇱"),
    Country::new("PT", "Portugal", "🇵🇹"),
    Country::new("PY", "Paraguay", "🇵🇾"),
    Country::new("RO", "Romania", "🇷🇴"),
    Country::new("RU", "Russia", "🇷🇺"),
    Country::new("SE", "Sweden", "🇸🇪"),
    Country::new("SI", "Slovenia", "🇸🇮"),
    Country::new("SK", "Slovakia", "🇸🇰"),
    Country::new("SV", "El Salvador", "🇸🇻"),
    Country::new("TR", "Turkey", "🇹🇷"),
    Country::new("UA", "Ukraine", "🇺🇦"),
    Country::new("US", "United States", "🇺🇸"),
    Country::new("UY", "Uruguay", "🇺🇾"),
    Country::new("VE", "Venezuela", "🇻🇪"),
];

// Codes offered when the catalog cannot be fetched from the backend
pub const FALLBACK_CODES: &[&str] = &[
    "AR", "AU", "BR", "CA", "CL", "CO", "DE", "ES", "FR", "GB", "IT", "JP", "MX", "PE", "US",
];

// Full catalog, ordered by code
pub fn catalog() -> Vec<CountryEntry> {
    CATALOG.iter().map(CountryEntry::from).collect()
}

// Degraded-mode list; every entry also appears in the full catalog
pub fn fallback_countries() -> Vec<CountryEntry> {
    CATALOG
        .iter()
        .filter(|country| FALLBACK_CODES.contains(&country.code))
        .map(CountryEntry::from)
        .collect()
}

pub fn find(code: &str) -> Option<&'static Country> {
    CATALOG
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(code.trim()))
}
