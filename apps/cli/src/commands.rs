//! CLI command definitions, routing, and tracing setup.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::info;

use wikiharvest_client::WikiClient;
use wikiharvest_extract::{extract_infobox, extract_roster};
use wikiharvest_shared::{
    AppConfig, RosterEntry, SectionScoping, WikiHarvestError, init_config, load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// WikiHarvest: turn wiki pages into typed JSON records.
#[derive(Parser)]
#[command(
    name = "wikiharvest",
    version,
    about = "Extract structured records (biographies, squad rosters) from MediaWiki pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract a biographical record from a page's infobox.
    Person {
        /// Page title (e.g. "Guillermo_Stábile").
        title: String,
    },

    /// Extract squad rosters from World Cup squad pages.
    Squads {
        /// Section title to extract from (defaults to config).
        #[arg(short, long)]
        section: Option<String>,

        /// First tournament year (defaults to config).
        #[arg(long)]
        from: Option<u16>,

        /// Last tournament year, inclusive (defaults to config).
        #[arg(long)]
        to: Option<u16>,

        /// Section scoping: flat or nested (defaults to config).
        #[arg(long)]
        scoping: Option<SectionScoping>,
    },

    /// Fetch a page's raw wikitext and print it.
    Fetch {
        /// Page title.
        title: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr so that JSON output on stdout stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "wikiharvest=info",
        1 => "wikiharvest=debug",
        _ => "wikiharvest=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Person { title } => cmd_person(&title).await,
        Command::Squads {
            section,
            from,
            to,
            scoping,
        } => cmd_squads(section, from, to, scoping).await,
        Command::Fetch { title } => cmd_fetch(&title).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_person(title: &str) -> Result<()> {
    let config = load_config()?;
    let client = WikiClient::new(&config.api)?;

    info!(title, "extracting person record");

    let wikitext = client.fetch_page(title).await?;
    let doc = wikiharvest_wikitext::parse(&wikitext);
    let record = extract_infobox(&doc)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn cmd_squads(
    section: Option<String>,
    from: Option<u16>,
    to: Option<u16>,
    scoping: Option<SectionScoping>,
) -> Result<()> {
    let config = load_config()?;

    // CLI flags override config file values
    let mut squads = config.squads.clone();
    if let Some(section) = section {
        squads.section = section;
    }
    if let Some(from) = from {
        squads.from_year = from;
    }
    if let Some(to) = to {
        squads.to_year = to;
    }
    if let Some(scoping) = scoping {
        squads.scoping = scoping;
    }

    let years = squads.years();
    if years.is_empty() {
        return Err(eyre!(
            "no tournament years between {} and {}",
            squads.from_year,
            squads.to_year
        ));
    }

    info!(
        section = %squads.section,
        scoping = %squads.scoping,
        years = years.len(),
        concurrency = config.fetch.concurrency,
        "extracting squad rosters"
    );

    let client = Arc::new(WikiClient::new(&config.api)?);
    let semaphore = Arc::new(Semaphore::new(config.fetch.concurrency as usize));
    let progress = CliProgress::new(years.len());

    let mut handles = Vec::new();
    for year in years {
        let client = client.clone();
        let sem = semaphore.clone();
        let section = squads.section.clone();
        let scoping = squads.scoping;
        let rate_limit = config.fetch.rate_limit_ms;

        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");

            // Rate limiting
            if rate_limit > 0 {
                tokio::time::sleep(Duration::from_millis(rate_limit)).await;
            }

            let title = format!("{year}_FIFA_World_Cup_squads");
            let wikitext = client.fetch_page(&title).await?;
            let doc = wikiharvest_wikitext::parse(&wikitext);
            let entries = extract_roster(&doc, &section, scoping);
            Ok::<_, WikiHarvestError>((year, entries))
        }));
    }

    let mut rosters: BTreeMap<u16, Vec<RosterEntry>> = BTreeMap::new();
    for handle in handles {
        let (year, entries) = handle
            .await
            .map_err(|e| eyre!("squad task failed: {e}"))??;

        if entries.is_empty() {
            info!(year, "no players found");
        }
        progress.year_done(year, entries.len());
        rosters.insert(year, entries);
    }

    progress.finish();

    println!("{}", serde_json::to_string_pretty(&rosters)?);
    Ok(())
}

async fn cmd_fetch(title: &str) -> Result<()> {
    let config = load_config()?;
    let client = WikiClient::new(&config.api)?;

    info!(title, "fetching raw wikitext");

    let wikitext = client.fetch_page(title).await?;
    println!("{wikitext}");
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Per-year progress bar using indicatif.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar }
    }

    fn year_done(&self, year: u16, players: usize) {
        self.bar.set_message(format!("{year}: {players} players"));
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
