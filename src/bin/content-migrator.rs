//! content-migrator CLI — migrate a Joomla or WordPress site into the
//! destination content platform.
//!
//! Usage:
//!   content-migrator --source wordpress --wordpress-url URL \
//!       --destination-url URL --destination-token TOKEN
//!
//! Every flag can also come from the environment (see `--help`).

use clap::Parser;
use content_migrator::{migration, MigrationConfig, RemoteConfig, SourceSystem};
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(
    name = "content-migrator",
    version,
    about = "Migrate categories, tags and content into the destination platform"
)]
struct Cli {
    /// Source system to migrate from
    #[arg(long, value_enum, env = "AESIRX_MIGRATE", ignore_case = true, default_value_t = SourceSystem::Joomla)]
    source: SourceSystem,

    /// Destination base URL
    #[arg(long, env = "AESIRX_API_URL")]
    destination_url: String,

    /// Destination bearer token
    #[arg(long, env = "AESIRX_BEARER_TOKEN", hide_env_values = true)]
    destination_token: String,

    /// WordPress base URL
    #[arg(long, env = "WORDPRESS_API_URL")]
    wordpress_url: Option<String>,

    /// Joomla base URL
    #[arg(long, env = "JOOMLA_API_URL")]
    joomla_url: Option<String>,

    /// Joomla API token
    #[arg(long, env = "JOOMLA_BEARER_TOKEN", hide_env_values = true)]
    joomla_token: Option<String>,

    /// Remote key label (defaults to the source name in upper case)
    #[arg(long, env = "MIGRATION_KEY")]
    migration_key: Option<String>,

    /// Records requested per source page
    #[arg(long, env = "MIGRATION_PAGE_SIZE", default_value_t = content_migrator::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Log level: trace, debug, info, warn, error (or 0-6)
    #[arg(long, env = "LOGGER_LEVEL", default_value = "info")]
    log_level: String,
}

/// Accepts level names as well as the numeric levels (0 = most verbose)
/// older deployments configured.
fn parse_level(value: &str) -> Level {
    match value.trim() {
        "0" | "1" => Level::TRACE,
        "2" => Level::DEBUG,
        "3" => Level::INFO,
        "4" => Level::WARN,
        "5" | "6" => Level::ERROR,
        other => other.parse().unwrap_or(Level::INFO),
    }
}

fn build_config(cli: Cli) -> MigrationConfig {
    let source = match cli.source {
        SourceSystem::Wordpress => RemoteConfig::new(cli.wordpress_url.unwrap_or_default()),
        SourceSystem::Joomla => {
            let remote = RemoteConfig::new(cli.joomla_url.unwrap_or_default());
            match cli.joomla_token {
                Some(token) => remote.with_bearer_token(token),
                None => remote,
            }
        }
    };
    let destination = RemoteConfig::new(cli.destination_url).with_bearer_token(cli.destination_token);

    let config = MigrationConfig::new(cli.source, source, destination).with_page_size(cli.page_size);
    match cli.migration_key {
        Some(label) => config.with_label(label),
        None => config,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .init();

    let config = build_config(cli);
    match migration::run(&config).await {
        Ok(report) => {
            info!("Done: {}", report);
        }
        Err(e) => {
            error!("Failed: {}", e);
            eprintln!("Failed: {}", e);
            std::process::exit(1);
        }
    }
}
