use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select};
use weather_view_core::{Config, DisplayLocale, Event, Screen, Session};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-view", version, about = "Weather display in the terminal")]
pub struct Cli {
    /// Display locale, "ru" or "en"; overrides the configured one.
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set search delay, locale and simulated latency.
    Configure,

    /// Show the current weather and forecast strip.
    Show {
        /// Print the screen model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open the detail view for one forecast day.
    Day {
        /// Zero-based position in the forecast strip.
        index: usize,

        #[arg(long)]
        json: bool,
    },

    /// Type a query into the search box and list the candidates.
    Search {
        query: String,

        /// Select the candidate with this name and show its weather.
        #[arg(long)]
        pick: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Drive the screen from a menu.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(locale) = &self.locale {
            config.locale = DisplayLocale::try_from(locale.as_str())?;
        }

        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { json } => {
                let session = Session::from_config(&config)?;
                print_screen(&session.screen(), json)?;
            }
            Command::Day { index, json } => {
                let mut session = Session::from_config(&config)?;
                session.dispatch(Event::OpenDay(index));

                let screen = session.screen();
                if screen.detail.is_none() {
                    bail!(
                        "No forecast day at index {index}; the forecast has {} days.",
                        screen.forecast.len()
                    );
                }
                print_screen(&screen, json)?;
            }
            Command::Search { query, pick, json } => {
                let mut session = Session::from_config(&config)?;
                search(&mut session, &query, pick.as_deref()).await?;
                print_screen(&session.screen(), json)?;
            }
            Command::Interactive => {
                let session = Session::from_config(&config)?;
                interactive::run(session).await?;
            }
        }

        Ok(())
    }
}

/// Types `query` one character at a time, then optionally picks a candidate by name.
async fn search(session: &mut Session, query: &str, pick: Option<&str>) -> anyhow::Result<()> {
    session.dispatch(Event::ToggleSearch);

    let mut typed = String::new();
    for ch in query.chars() {
        typed.push(ch);
        session.dispatch(Event::QueryChanged(typed.clone()));
    }
    session.settle().await;

    let Some(name) = pick else {
        return Ok(());
    };

    let candidates = session.state().phase.candidates();
    let Some(index) = candidates.iter().position(|c| c.name.eq_ignore_ascii_case(name)) else {
        let offered: Vec<_> = candidates.iter().map(ToString::to_string).collect();
        bail!(
            "No candidate named '{name}' for query '{query}'.\n\
             Offered: {}",
            if offered.is_empty() { "none".to_string() } else { offered.join("; ") }
        );
    };

    session.dispatch(Event::PickCandidate(index));
    session.settle().await;

    Ok(())
}

fn print_screen(screen: &Screen, json: bool) -> anyhow::Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(screen).context("Failed to serialize screen to JSON")?;
        println!("{text}");
    } else {
        print!("{}", render::render(screen));
    }
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.debounce_ms = CustomType::<u64>::new("Search delay (ms):")
        .with_default(config.debounce_ms)
        .prompt()?;

    config.min_query_chars = CustomType::<usize>::new("Search only after more than N characters:")
        .with_default(config.min_query_chars)
        .prompt()?;

    let locales = DisplayLocale::all().to_vec();
    let cursor = locales.iter().position(|l| *l == config.locale).unwrap_or(0);
    config.locale = Select::new("Display locale:", locales).with_starting_cursor(cursor).prompt()?;

    config.fake_latency_ms = CustomType::<u64>::new("Simulated network latency (ms):")
        .with_default(config.fake_latency_ms)
        .prompt()?;

    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_with_global_locale() {
        let cli = Cli::try_parse_from(["weather-view", "day", "2", "--json", "--locale", "en"])
            .expect("arguments are valid");

        assert_eq!(cli.locale.as_deref(), Some("en"));
        assert!(matches!(cli.command, Command::Day { index: 2, json: true }));
    }

    #[test]
    fn parses_search_with_pick() {
        let cli = Cli::try_parse_from(["weather-view", "search", "Lon", "--pick", "London"])
            .expect("arguments are valid");

        match cli.command {
            Command::Search { query, pick, json } => {
                assert_eq!(query, "Lon");
                assert_eq!(pick.as_deref(), Some("London"));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_day_index() {
        assert!(Cli::try_parse_from(["weather-view", "day", "-1"]).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn search_and_pick_loads_the_city() {
        let mut session = Session::from_config(&Config::default()).expect("built-in session");

        search(&mut session, "Lon", Some("london")).await.expect("London is offered");

        let current = session.screen().current.expect("snapshot is loaded");
        assert_eq!(current.location, "London");
    }

    #[tokio::test(start_paused = true)]
    async fn picking_an_unknown_city_fails() {
        let mut session = Session::from_config(&Config::default()).expect("built-in session");

        let err = search(&mut session, "Lon", Some("Tokyo")).await.unwrap_err();

        assert!(err.to_string().contains("No candidate named 'Tokyo'"));
    }
}
