use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use weather_core::{
    Config, TemperatureUnit, WeatherReport, WeatherRequest, WeatherService, WeatherSummary,
    model::DEFAULT_LOCATION,
};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather summaries from met.no")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Overrides the configured port (and `PORT`).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show current weather for a named location.
    Show {
        /// Location name, e.g. "Oslo". Case-sensitive.
        #[arg(default_value = DEFAULT_LOCATION)]
        location: String,

        /// Temperature unit: C or F.
        #[arg(long, default_value = "C")]
        unit: String,

        /// Leave out wind, humidity, pressure, clouds and precipitation.
        #[arg(long)]
        no_details: bool,

        /// Print the raw JSON summary instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List known locations.
    Locations,

    /// Interactively edit the configuration file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { port } => {
                let config = Config::load()?;
                let port = port.unwrap_or(config.port);
                let service = WeatherService::from_config(&config)?;
                tracing::info!(
                    locations = service.registry().len(),
                    user_agent = %config.user_agent,
                    "starting weather service"
                );
                server::serve(Arc::new(service), port).await?;
            }
            Command::Show { location, unit, no_details, json } => {
                let config = Config::load()?;
                let service = WeatherService::from_config(&config)?;
                let request = WeatherRequest {
                    location,
                    unit: unit.parse::<TemperatureUnit>()?,
                    details: !no_details,
                };

                let summary = service.get_weather(&request).await;
                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                match summary {
                    WeatherSummary::Success(report) => {
                        if !json {
                            print!("{}", format_report(&report));
                        }
                    }
                    WeatherSummary::Failure(message) => return Err(anyhow!(message)),
                }
            }
            Command::Locations => {
                let registry = Config::load()?.registry();
                for name in registry.names() {
                    let loc = registry.resolve(name)?;
                    println!("{:<16} {:>9.4} {:>9.4}", loc.name, loc.latitude, loc.longitude);
                }
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_file(&path)?;

    let current_agent = config.user_agent.clone();
    config.user_agent = Text::new("User-Agent sent to met.no:")
        .with_default(&current_agent)
        .with_help_message("met.no asks for an app name and contact, e.g. MyApp/1.0 me@example.com")
        .prompt()
        .context("Failed to read User-Agent")?;

    config.port = CustomType::<u16>::new("HTTP port:")
        .with_default(config.port)
        .with_error_message("Please enter a port number between 0 and 65535")
        .prompt()
        .context("Failed to read port")?;

    config.timeout_secs = CustomType::<u64>::new("Upstream timeout (seconds):")
        .with_default(config.timeout_secs)
        .prompt()
        .context("Failed to read timeout")?;

    while Confirm::new("Add a custom location?").with_default(false).prompt()? {
        let name = Text::new("Name:").prompt()?;
        let lat = CustomType::<f64>::new("Latitude:").prompt()?;
        let lon = CustomType::<f64>::new("Longitude:").prompt()?;
        config.upsert_location(name.trim(), lat, lon);
    }

    config.save_to(&path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// Human-friendly rendering of a report.
fn format_report(report: &WeatherReport) -> String {
    let mut out = format!(
        "{}: {:.1}°{}, {} (updated {})\n",
        report.location, report.temperature, report.unit, report.condition, report.updated
    );

    if let Some(details) = &report.details {
        let wind_dir = details.wind_direction.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        if let Some(speed) = details.wind_speed {
            out.push_str(&format!("  wind:          {speed} m/s {wind_dir}\n"));
        }
        if let Some(humidity) = details.humidity {
            out.push_str(&format!("  humidity:      {humidity}%\n"));
        }
        if let Some(pressure) = details.pressure {
            out.push_str(&format!("  pressure:      {pressure} hPa\n"));
        }
        if let Some(clouds) = details.cloudiness {
            out.push_str(&format!("  cloudiness:    {clouds}%\n"));
        }
        out.push_str(&format!("  precipitation: {} mm\n", details.precipitation));
    }

    out
}
