//! DigitalOcean dynamic inventory for Ansible
//!
//! Queries the DigitalOcean API for droplets and prints the grouped
//! inventory, or a single droplet's variables, as JSON on stdout, caching
//! the results on disk between runs.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use do_inventory::api::ApiClient;
use do_inventory::app::App;
use do_inventory::cache::CacheStore;
use do_inventory::cli::{Cli, Mode};
use do_inventory::config::{EnvSettings, FileSettings, Settings, DEFAULT_SETTINGS_FILE};
use do_inventory::inventory::HostLookup;

/// Routes diagnostics to stderr so stdout stays parseable by Ansible
fn setup_tracing() {
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    match run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let file = FileSettings::load(&settings_path)?;
    let settings = Settings::resolve(file, EnvSettings::capture(), &cli);

    // Credentials are verified before any network call.
    let credentials = settings.credentials()?;

    let cache = match &settings.cache_path {
        Some(dir) => CacheStore::with_dir(dir.clone()),
        None => CacheStore::new().ok_or("could not determine a cache directory")?,
    };

    let client = ApiClient::new(credentials);
    let app = App::new(client, cache, settings.cache_max_age);

    match cli.mode() {
        Mode::List => Ok(app.list(cli.refresh_cache).await?),
        Mode::Host(address) => match app.host_info(&address, cli.refresh_cache).await? {
            HostLookup::Found(droplet) => Ok(serde_json::to_string_pretty(&droplet)?),
            HostLookup::NotFound => Ok("{}".to_string()),
        },
    }
}
