//! Runtime configuration.
//!
//! Values come from an optional TOML file (`decloneify.toml` in the working
//! directory, or the path in `DECLONEIFY_CONFIG`), then environment variables,
//! which the binary fills from a `.env` file at startup. Environment wins.

use std::{env, path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    spotify::{Token, API_URL},
};

const DEFAULT_CONFIG_FILE: &str = "decloneify.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: Option<String>,
    pub user_id: Option<String>,
    pub token_type: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the config file if there is one, then environment overrides.
    ///
    /// `.env` is expected to have been loaded into the environment already.
    pub fn load() -> Result<Self> {
        let explicit = env::var("DECLONEIFY_CONFIG").ok().map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            log::debug!("reading configuration from {}", path.display());
            Self::from_toml(&std::fs::read_to_string(&path)?)?
        } else if explicit.is_some() {
            return Err(Error::Config(format!(
                "configuration file {} does not exist",
                path.display()
            )));
        } else {
            Self::default()
        };

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overrides fields with whatever `lookup` returns for the `SPOTIFY_*` keys.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = lookup("SPOTIFY_API_URL") {
            self.api_url = Some(api_url);
        }
        if let Some(user_id) = lookup("SPOTIFY_USER_ID") {
            self.user_id = Some(user_id);
        }
        if let Some(token_type) = lookup("SPOTIFY_TOKEN_TYPE") {
            self.token_type = Some(token_type);
        }
        if let Some(access_token) = lookup("SPOTIFY_ACCESS_TOKEN") {
            self.access_token = Some(access_token);
        }
        if let Some(timeout) = lookup("SPOTIFY_TIMEOUT_SECS") {
            let secs = timeout.parse().map_err(|_| {
                Error::Config(format!("SPOTIFY_TIMEOUT_SECS must be a number, got {timeout:?}"))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(API_URL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The configured credential, if any. Without one, requests go out unauthenticated.
    pub fn credential(&self) -> Option<Token> {
        let access_token = self.access_token.as_deref()?;
        let token_type = self.token_type.as_deref().unwrap_or("Bearer");
        Some(Token::new(token_type, access_token))
    }
}
