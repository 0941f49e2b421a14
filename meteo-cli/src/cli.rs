use std::{fs, path::PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::{InquireError, Select};
use meteo_core::{
    Config, Place, Query, SearchOutcome, Session, Status, StatusReporter, WmoTable,
    providers_from_config,
    render::{self, Report, html::HtmlRenderer, text},
    theme::detect_system_theme,
};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather and a 5-day forecast for any city")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for a city and show its weather.
    Search {
        /// City name, e.g. "Berlin".
        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather for the city your IP address points to.
    Here {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show or toggle the light/dark theme used for HTML output.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the theme currently in effect.
    Show,
    /// Switch between light and dark and remember the choice.
    Toggle,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Take the Nth match (1-based) instead of prompting.
    #[arg(long)]
    pub pick: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also show the next N hours (text and JSON output).
    #[arg(long, default_value_t = 0)]
    pub hours: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
    Json,
}

/// Prints status transitions to stderr. The candidate prompt carries its own
/// "Select a location" message, and an idle status prints nothing.
#[derive(Debug)]
struct ConsoleStatus;

impl StatusReporter for ConsoleStatus {
    fn report(&self, status: &Status) {
        match status {
            Status::SelectLocation | Status::Idle => {}
            other => eprintln!("{other}"),
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&config_path)?;
        debug!(path = %config_path.display(), "loaded config");

        match self.command {
            Command::Search { query, output } => {
                let query = Query::parse(&query)
                    .ok_or_else(|| anyhow!("Enter a city name to search for."))?;
                let session = Session::new(providers_from_config(&config)?, ConsoleStatus);
                lookup(&session, &config, &query, &output).await?;
            }
            Command::Here { output } => {
                let session = Session::new(providers_from_config(&config)?, ConsoleStatus);
                let Some(query) = session.quick_start().await else {
                    bail!(
                        "Could not determine your city from your IP address. \
                         Try `meteo search <city>`."
                    );
                };
                eprintln!("Detected city: {}", query.as_str());
                lookup(&session, &config, &query, &output).await?;
            }
            Command::Theme { action } => {
                let system = detect_system_theme();
                match action.unwrap_or(ThemeAction::Show) {
                    ThemeAction::Show => println!("{}", config.effective_theme(system)),
                    ThemeAction::Toggle => {
                        let theme = config.toggle_theme(system);
                        config.save_to(&config_path)?;
                        println!("Theme set to {theme}");
                    }
                }
            }
        }

        Ok(())
    }
}

async fn lookup(
    session: &Session<ConsoleStatus>,
    config: &Config,
    query: &Query,
    output: &OutputArgs,
) -> Result<()> {
    let places = match session.search(query).await {
        SearchOutcome::Candidates(places) => places,
        SearchOutcome::NoMatch | SearchOutcome::Failed => return Ok(()),
    };

    let Some(place) = choose(&places, output.pick)? else {
        return Ok(());
    };

    let Some(snapshot) = session.load(place).await else {
        return Ok(());
    };

    let table = WmoTable::standard();
    let rendered = match output.format {
        Format::Text => text::report(&Report::build(place, &snapshot, &table, output.hours)),
        Format::Html => {
            let theme = config.effective_theme(detect_system_theme());
            HtmlRenderer::new()?.document(theme, &Report::build(place, &snapshot, &table, 0))?
        }
        Format::Json => {
            let mut value = serde_json::json!({ "place": place, "weather": snapshot });
            if output.hours > 0 {
                let observed_at = snapshot.current.observed_at.as_deref();
                let hours = render::upcoming_hours(&snapshot.hourly, observed_at, output.hours);
                value["upcoming_hours"] = serde_json::to_value(hours)?;
            }
            serde_json::to_string_pretty(&value)?
        }
    };

    match &output.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Resolve the user's choice among candidates. `None` if they cancelled the prompt.
fn choose(places: &[Place], pick: Option<usize>) -> Result<Option<&Place>> {
    if let Some(n) = pick {
        return pick_nth(places, n).map(Some);
    }

    let labels: Vec<String> = places.iter().map(render::candidate_label).collect();
    match Select::new(&Status::SelectLocation.to_string(), labels).raw_prompt() {
        Ok(choice) => Ok(places.get(choice.index)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read location choice"),
    }
}

fn pick_nth(places: &[Place], n: usize) -> Result<&Place> {
    n.checked_sub(1)
        .and_then(|i| places.get(i))
        .ok_or_else(|| anyhow!("--pick {n} is out of range: {} location(s) matched", places.len()))
}
