use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, UpstreamMode};

/// Nixie-tube divergence meter for the terminal.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "divergence-meter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Connect to a JSON-lines upstream at HOST:PORT
    #[arg(long, value_name = "HOST:PORT", conflicts_with = "simulate")]
    pub connect: Option<String>,

    /// Use the built-in simulated upstream
    #[arg(long)]
    pub simulate: bool,

    /// Seed for the digit source and simulator
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Write logs here instead of the default location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file named by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config, crate::config::ConfigError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Applies flag overrides on top of a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(address) = &self.connect {
            config.upstream.mode = UpstreamMode::Tcp;
            config.upstream.address = address.clone();
        }
        if self.simulate {
            config.upstream.mode = UpstreamMode::Simulator;
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(Config::log_path)
    }
}
