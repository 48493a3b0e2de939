//! Configuration management for kona.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! The dataset constants (`cutoff_date`, `reference_station`, `first_date`,
//! `final_date`) default to values read off the Hawaii reference dataset
//! (`hawaii.sqlite`): its observations span 2010-01-01 to 2017-08-23, the cutoff
//! is the final date minus one year, and USC00519281 is its most active station.
//! They are never re-derived from the data at runtime.

use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{KonaError, Result};

/// Format of every date stored in, and accepted by, the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Command-line arguments for kona
#[derive(Parser, Debug)]
#[command(name = "kona")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite climate database to serve
    #[arg(default_value = "Resources/hawaii.sqlite")]
    pub database: PathBuf,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "KONA_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "KONA_PORT")]
    pub port: Option<u16>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "KONA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "KONA_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the SQLite file
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Exclusive lower bound for the "last 12 months" routes
    #[serde(default = "default_cutoff_date")]
    pub cutoff_date: String,

    /// Station reported by the temperature observation route
    #[serde(default = "default_reference_station")]
    pub reference_station: String,

    /// Earliest start date accepted by the range route
    #[serde(default = "default_first_date")]
    pub first_date: String,

    /// Latest date accepted by both stats routes
    #[serde(default = "default_final_date")]
    pub final_date: String,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Parsed inclusive date bounds of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetBounds {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DatasetBounds {
    /// Whether `date` lies in `[first, last]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        // Database path from the command line takes precedence
        config.data.file_path = Some(args.database.clone());

        Ok((config, args.database))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server = other.server;
        self.data = other.data;
        self.log_level = other.log_level;
    }

    /// Parse the configured first/final dates
    pub fn bounds(&self) -> Result<DatasetBounds> {
        let first = parse_config_date("first_date", &self.data.first_date)?;
        let last = parse_config_date("final_date", &self.data.final_date)?;
        Ok(DatasetBounds { first, last })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(KonaError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(KonaError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(KonaError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.data.reference_station.trim().is_empty() {
            return Err(KonaError::Config {
                message: "Reference station cannot be empty".to_string(),
            });
        }

        parse_config_date("cutoff_date", &self.data.cutoff_date)?;

        let bounds = self.bounds()?;
        if bounds.first > bounds.last {
            return Err(KonaError::Config {
                message: format!(
                    "first_date {} is after final_date {}",
                    self.data.first_date, self.data.final_date
                ),
            });
        }

        Ok(())
    }
}

fn parse_config_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| KonaError::Config {
        message: format!("Invalid {}: {} ({})", field, value, e),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file_path: None,
            cutoff_date: default_cutoff_date(),
            reference_station: default_reference_station(),
            first_date: default_first_date(),
            final_date: default_final_date(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cutoff_date() -> String {
    "2016-08-22".to_string()
}

fn default_reference_station() -> String {
    "USC00519281".to_string()
}

fn default_first_date() -> String {
    "2010-01-01".to_string()
}

fn default_final_date() -> String {
    "2017-08-23".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
