//! Command-line interface for the inventory script
//!
//! This module handles parsing of CLI arguments using clap, mirroring the
//! flag set Ansible expects from a dynamic inventory: `--list` (the default)
//! and `--host`, plus cache and credential overrides.

use clap::Parser;
use std::path::PathBuf;

/// Produce an Ansible inventory from DigitalOcean droplets
#[derive(Parser, Debug)]
#[command(name = "do-inventory")]
#[command(about = "Ansible dynamic inventory backed by the DigitalOcean API")]
#[command(version)]
pub struct Cli {
    /// List droplet groups (the default mode)
    #[arg(long)]
    pub list: bool,

    /// Print all variables for a single droplet, looked up by address
    #[arg(long, value_name = "ADDRESS")]
    pub host: Option<String>,

    /// Directory holding the cache files
    #[arg(long, value_name = "DIR")]
    pub cache_path: Option<PathBuf>,

    /// Maximum age of the cached inventory, in seconds (default: 0)
    #[arg(long, value_name = "SECONDS")]
    pub cache_max_age: Option<u64>,

    /// Refresh the cache by querying the API even if it is still fresh
    #[arg(long)]
    pub refresh_cache: bool,

    /// DigitalOcean client id (overrides the settings file and environment)
    #[arg(long, value_name = "ID")]
    pub client_id: Option<String>,

    /// DigitalOcean API key (overrides the settings file and environment)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to the settings file (default: digitalocean.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// The run mode selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Emit the full grouped inventory
    List,
    /// Emit the variables for one droplet
    Host(String),
}

impl Cli {
    /// Collapses the mode flags: `--host` wins over the default list mode
    pub fn mode(&self) -> Mode {
        match &self.host {
            Some(address) => Mode::Host(address.clone()),
            None => Mode::List,
        }
    }
}
