mod report;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use grisp_indicators::AdapterRegistry;
use tracing_subscriber::EnvFilter;

use crate::report::{assemble_report, ReportRequest, DEFAULT_INDICATORS};

#[derive(Debug, Parser)]
#[command(name = "grisp")]
#[command(about = "GRiSP country risk report generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every available adapter for one country and print the report
    Report {
        /// Country name as spelled in the datasets (case-insensitive)
        #[arg(long)]
        country: String,

        /// ISO country code for World Bank lookups (e.g. US)
        #[arg(long)]
        country_code: Option<String>,

        /// World Bank indicator code; repeat for several
        #[arg(long = "indicator")]
        indicators: Vec<String>,

        /// News search text (defaults to the country name)
        #[arg(long)]
        news_query: Option<String>,

        /// Web search text (defaults to the country name)
        #[arg(long)]
        search_query: Option<String>,

        /// Social media search text (defaults to the country name)
        #[arg(long)]
        social_query: Option<String>,

        /// Abort if any adapter cannot be constructed
        #[arg(long)]
        strict: bool,
    },
    /// Run a single adapter with a single query
    Fetch {
        /// Adapter name (see `list`)
        adapter: String,

        /// Query passed verbatim to the adapter
        query: String,
    },
    /// List the adapters that can be constructed from the current config
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = grisp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Report {
            country,
            country_code,
            indicators,
            news_query,
            search_query,
            social_query,
            strict,
        } => {
            let (registry, excluded) = if strict {
                let registry = AdapterRegistry::from_config(&config)
                    .context("failed to construct adapters (strict mode)")?;
                (registry, Vec::new())
            } else {
                AdapterRegistry::from_config_lenient(&config)
            };

            let indicators = if indicators.is_empty() {
                DEFAULT_INDICATORS.iter().map(ToString::to_string).collect()
            } else {
                indicators
            };
            let request = ReportRequest {
                country,
                country_code,
                indicators,
                news_query,
                search_query,
                social_query,
            };

            println!("{}", assemble_report(&registry, &excluded, &request).await);
        }
        Commands::Fetch { adapter, query } => {
            let (registry, excluded) = AdapterRegistry::from_config_lenient(&config);
            if let Some(failed) = excluded.iter().find(|e| e.name == adapter) {
                anyhow::bail!("adapter '{adapter}' is unavailable: {}", failed.error);
            }
            let Some(selected) = registry.get(&adapter) else {
                anyhow::bail!(
                    "unknown adapter '{adapter}'; expected one of: {}",
                    grisp_indicators::Adapter::NAMES.join(", ")
                );
            };
            println!("{}", selected.fetch(&query).await);
        }
        Commands::List => {
            let (registry, excluded) = AdapterRegistry::from_config_lenient(&config);
            for adapter in registry.iter() {
                println!(
                    "{:<18} {}  [query: {}]",
                    adapter.name(),
                    adapter.description(),
                    adapter.query_hint()
                );
            }
            for failed in &excluded {
                println!("{:<18} unavailable: {}", failed.name, failed.error);
            }
        }
    }

    Ok(())
}
