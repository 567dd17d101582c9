use anyhow::Context;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use holiday_explorer::views::{self, ViewState};
use holiday_explorer::{countries, ClientConfig, CountryEntry, HolidaysClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "holiday-explorer", about = "Worldwide holiday inquiry")]
struct Cli {
    /// Base URL of the holidays API (overrides HOLIDAYS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable countries
    Countries,
    /// Show backend status
    Status,
    /// Show the holidays of a country, grouped by month
    Holidays {
        /// ISO 3166-1 alpha-2 country code
        country: String,
        /// Year to query (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Check health, the catalog and a sample lookup (Spain, 2025)
    BackendTest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    let client = HolidaysClient::new(&config)?;

    match cli.command {
        Command::Countries => {
            let catalog = client.get_countries().await;
            if catalog.is_fallback() {
                eprintln!("(backend unreachable, showing default countries)");
            }
            print!("{}", views::render_country_picker(catalog.entries()));
        }
        Command::Status => {
            print!("{}", views::render_backend_status(&client.check_health().await));
        }
        Command::Holidays { country, year } => {
            let current_year = chrono::Local::now().year();
            let year = year.unwrap_or(current_year);
            println!("Year: {}", views::render_year_picker(current_year, year));
            println!();

            let (health, catalog) = futures::join!(client.check_health(), client.get_countries());
            if !health.is_online() {
                eprintln!("(backend offline)");
            }
            let entry = catalog
                .entries()
                .iter()
                .find(|c| c.code.eq_ignore_ascii_case(&country))
                .cloned()
                .or_else(|| countries::find(&country).map(CountryEntry::from))
                .unwrap_or_else(|| CountryEntry {
                    code: country.to_ascii_uppercase(),
                    name: country.to_ascii_uppercase(),
                    flag: String::new(),
                });

            eprint!("{}", ViewState::Loading.render());
            let result = client.get_holidays_with_fallback(&entry.code, year).await;
            let state = ViewState::from_lookup(entry, year, result);
            print!("{}", state.render());
        }
        Command::BackendTest => backend_test(&client).await,
    }

    Ok(())
}

async fn backend_test(client: &HolidaysClient) {
    println!("Backend Test");
    println!();

    let (health, catalog) = futures::join!(client.check_health(), client.get_countries());
    print!("{}", views::render_backend_status(&health));
    println!();

    println!("Available Countries ({})", catalog.entries().len());
    for country in catalog.entries().iter().take(10) {
        println!("  {} {} ({})", country.flag, country.name, country.code);
    }
    println!();

    println!("Holiday Test: Spain 2025");
    match client.get_holidays_with_fallback("ES", 2025).await {
        Ok(holidays) => {
            println!("Results ({} holidays):", holidays.len());
            for holiday in holidays.iter().take(6) {
                println!("  {} - {}", holiday.date, holiday.name);
            }
        }
        Err(error) => println!("  {}", error),
    }
}
