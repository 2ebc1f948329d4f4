use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use std::path::PathBuf;
use tracing::debug;
use weatherdoor_core::{Config, FetchOrchestrator, FetchOutcome, HttpForecastSource};

use crate::terminal::FilePage;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdoor", version, about = "Short-term forecasts for Taiwanese cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API endpoint and default city.
    Configure,

    /// Load one city and write the forecast page.
    Show {
        /// City name as understood by the API; defaults to the configured city.
        city: Option<String>,

        /// Output file; defaults to the configured path.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Load the default city, then pick cities interactively.
    Browse {
        /// Output file; defaults to the configured path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

type Door = FetchOrchestrator<HttpForecastSource, FilePage>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        debug!(api = %config.base_api_url, city = %config.default_city, "Configuration loaded");

        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { city, out } => {
                let city = city.unwrap_or_else(|| config.default_city.clone());
                let door = build_door(&config, out);
                let outcome = load(&door, &city).await?;
                ensure_applied(&city, &outcome)?;
            }
            Command::Browse { out } => {
                let door = build_door(&config, out);
                let mut city = config.default_city.clone();
                loop {
                    load(&door, &city).await?;

                    let start = config.cities.iter().position(|c| *c == city).unwrap_or(0);
                    let picked = Select::new("City:", config.cities.clone())
                        .with_starting_cursor(start)
                        .prompt();

                    match picked {
                        Ok(next) => city = next,
                        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                            break;
                        }
                        Err(e) => return Err(e).context("City picker failed"),
                    }
                }
            }
        }

        Ok(())
    }
}

fn build_door(config: &Config, out: Option<PathBuf>) -> Door {
    let out = out.unwrap_or_else(|| config.output.clone());
    let page = FilePage::new(out, config.cities.clone());

    FetchOrchestrator::new(HttpForecastSource::new(config.base_api_url.clone()), page)
        .with_min_loading(config.min_loading())
}

async fn load(door: &Door, city: &str) -> anyhow::Result<FetchOutcome> {
    door.page().select(city);
    let outcome = door.fetch_weather(city).await;

    let page = door.page();
    page.write()?;
    if outcome == FetchOutcome::Applied {
        println!("{city}: {}", page.path().display());
    }
    Ok(outcome)
}

/// Turn a load that never reached the page into an error for the exit status.
fn ensure_applied(city: &str, outcome: &FetchOutcome) -> anyhow::Result<()> {
    match outcome {
        FetchOutcome::Applied => Ok(()),
        FetchOutcome::Failed(notice) => Err(anyhow!("Failed to load {city}: {notice}")),
        FetchOutcome::Superseded => Err(anyhow!("Load of {city} was superseded")),
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let url = Text::new("API URL:").with_default(&config.base_api_url).prompt()?;
    config.set_base_api_url(&url)?;

    let start = config.cities.iter().position(|c| *c == config.default_city).unwrap_or(0);
    let city = Select::new("Default city:", config.cities.clone())
        .with_starting_cursor(start)
        .prompt()?;
    config.set_default_city(&city)?;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_load_succeeds() {
        assert!(ensure_applied("臺南市", &FetchOutcome::Applied).is_ok());
    }

    #[test]
    fn failed_load_is_an_error() {
        let outcome = FetchOutcome::Failed("大雄！任意門壞掉了！(X)".into());
        let err = ensure_applied("火星", &outcome).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("火星"));
        assert!(msg.contains("(X)"));
    }

    #[test]
    fn superseded_load_is_an_error() {
        assert!(ensure_applied("臺南市", &FetchOutcome::Superseded).is_err());
    }
}
