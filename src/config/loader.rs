use anyhow::Result;
use std::fs;

use super::types::*;
use crate::cli::GlobalArgs;
use crate::errors::WalletError;

impl Config {
    /// Load configuration from CLI/env arguments and optional config file
    pub fn load(cli: GlobalArgs) -> Result<Self> {
        let base = match &cli.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Self::default(),
        };

        Ok(Self::merge_configurations(base, cli))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(config_path: &str) -> Result<Self, WalletError> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            WalletError::Config(format!("Failed to read config file {config_path}: {e}"))
        })?;

        toml::from_str(&config_content)
            .map_err(|e| WalletError::Config(format!("Failed to parse config file: {e}")))
    }

    /// Explicit CLI/env values override the config file
    fn merge_configurations(mut config: Self, cli: GlobalArgs) -> Self {
        if cli.app_id.is_some() {
            config.auth.app_id = cli.app_id;
        }
        if cli.client_id.is_some() {
            config.auth.client_id = cli.client_id;
        }
        if cli.rpc_url.is_some() {
            config.network.rpc_url = cli.rpc_url;
        }
        if cli.contract_address.is_some() {
            config.contract.address = cli.contract_address;
        }
        if cli.avnu_api_key.is_some() {
            config.relay.api_key = cli.avnu_api_key;
        }
        if let Some(base_url) = cli.avnu_base_url {
            config.relay.base_url = base_url;
        }
        if let Some(interval) = cli.refresh_interval {
            config.session.refresh_interval_secs = interval;
        }
        if let Some(level) = cli.log_level {
            config.logging.level = level;
        }

        config
    }
}
