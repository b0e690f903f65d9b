//! Explorer endpoints and credentials for every supported network.
//!
//! The registry is built once at startup and handed to the
//! [`ExplorerClient`](crate::api::ExplorerClient); nothing looks
//! networks up through global state.

use std::{collections::HashMap, env, fmt, str::FromStr};
use thiserror::Error;
use url::Url;

use crate::address::Address;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetworkId {
    /// Ethereum mainnet (etherscan.io)
    Ethereum,
    /// Polygon PoS (polygonscan.com)
    Polygon,
    /// BNB Smart Chain (bscscan.com)
    Bsc,
    /// Arbitrum One (arbiscan.io)
    Arbitrum,
    /// OP Mainnet (optimistic.etherscan.io)
    Optimism,
    /// Base (basescan.org)
    Base,
}

impl NetworkId {
    pub const ALL: [Self; 6] = [
        Self::Ethereum,
        Self::Polygon,
        Self::Bsc,
        Self::Arbitrum,
        Self::Optimism,
        Self::Base,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Polygon => "polygon",
            Self::Bsc => "bsc",
            Self::Arbitrum => "arbitrum",
            Self::Optimism => "optimism",
            Self::Base => "base",
        }
    }

    /// Prefix of the `<PREFIX>_API_KEY` / `<PREFIX>_API_URL` variables.
    pub const fn env_prefix(self) -> &'static str {
        match self {
            Self::Ethereum => "ETHERSCAN",
            Self::Polygon => "POLYGONSCAN",
            Self::Bsc => "BSCSCAN",
            Self::Arbitrum => "ARBISCAN",
            Self::Optimism => "OPTIMISTIC_ETHERSCAN",
            Self::Base => "BASESCAN",
        }
    }

    pub fn api_key_var(self) -> String {
        format!("{}_API_KEY", self.env_prefix())
    }

    pub fn api_url_var(self) -> String {
        format!("{}_API_URL", self.env_prefix())
    }

    const fn defaults(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Ethereum => (
                "Ethereum Mainnet",
                "https://api.etherscan.io/api",
                "https://etherscan.io",
            ),
            Self::Polygon => (
                "Polygon",
                "https://api.polygonscan.com/api",
                "https://polygonscan.com",
            ),
            Self::Bsc => (
                "BNB Smart Chain",
                "https://api.bscscan.com/api",
                "https://bscscan.com",
            ),
            Self::Arbitrum => (
                "Arbitrum One",
                "https://api.arbiscan.io/api",
                "https://arbiscan.io",
            ),
            Self::Optimism => (
                "OP Mainnet",
                "https://api-optimistic.etherscan.io/api",
                "https://optimistic.etherscan.io",
            ),
            Self::Base => (
                "Base",
                "https://api.basescan.org/api",
                "https://basescan.org",
            ),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnsupportedNetwork(s.to_string()))
    }
}

/// Explorer API key. Never printed, not even through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    pub api_url: Url,
    pub explorer_url: Url,
    pub credential: Option<ApiKey>,
}

impl NetworkConfig {
    /// Explorer page showing the contract code at `address`.
    pub fn address_url(&self, address: &Address) -> Url {
        let mut url = self.explorer_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(&["address", address.as_str()]);
        }
        url.set_fragment(Some("code"));
        url
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("[E040] Unsupported network '{0}'\n\nSuggestions:\n  • Use one of: ethereum, polygon, bsc, arbitrum, optimism, base")]
    UnsupportedNetwork(String),

    #[error("[E041] No API key configured for {network}\n\nSuggestions:\n  • Set {var} in the environment or in a .env file\n  • Create a key on the explorer's website under API Keys")]
    MissingCredential { network: NetworkId, var: String },

    #[error("[E042] {var} is not a valid URL: {source}")]
    InvalidUrl {
        var: String,
        #[source]
        source: url::ParseError,
    },
}

impl ConfigError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedNetwork(_) => "E040",
            Self::MissingCredential { .. } => "E041",
            Self::InvalidUrl { .. } => "E042",
        }
    }
}

/// Immutable map from network identifier to its explorer configuration.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: HashMap<NetworkId, NetworkConfig>,
}

impl NetworkRegistry {
    pub fn new(networks: impl IntoIterator<Item = (NetworkId, NetworkConfig)>) -> Self {
        Self {
            networks: networks.into_iter().collect(),
        }
    }

    /// Builds the registry for every supported network from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails if an `<PREFIX>_API_URL` override is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`Self::from_env`] but reads variables through `lookup`.
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Fails if a default or overridden API URL doesn't parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let mut networks = HashMap::new();
        for id in NetworkId::ALL {
            let (name, default_api, explorer) = id.defaults();
            let api_var = id.api_url_var();
            let api_raw = read(&api_var).unwrap_or_else(|| default_api.to_string());

            let api_url = Url::parse(api_raw.trim()).map_err(|source| ConfigError::InvalidUrl {
                var: api_var.clone(),
                source,
            })?;
            let explorer_url = Url::parse(explorer).map_err(|source| ConfigError::InvalidUrl {
                var: api_var,
                source,
            })?;

            networks.insert(
                id,
                NetworkConfig {
                    name: name.to_string(),
                    api_url,
                    explorer_url,
                    credential: read(&id.api_key_var()).map(|key| ApiKey::new(key.trim())),
                },
            );
        }

        Ok(Self { networks })
    }

    /// # Errors
    ///
    /// `UnsupportedNetwork` when the registry has no entry for `id`.
    pub fn get(&self, id: NetworkId) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(&id)
            .ok_or_else(|| ConfigError::UnsupportedNetwork(id.to_string()))
    }

    /// # Errors
    ///
    /// `UnsupportedNetwork` for unknown networks and `MissingCredential`
    /// when no API key is configured.
    pub fn credential(&self, id: NetworkId) -> Result<&ApiKey, ConfigError> {
        self.get(id)?
            .credential
            .as_ref()
            .ok_or_else(|| ConfigError::MissingCredential {
                network: id,
                var: id.api_key_var(),
            })
    }

    pub fn with_api_url(mut self, id: NetworkId, api_url: Url) -> Self {
        if let Some(config) = self.networks.get_mut(&id) {
            config.api_url = api_url;
        }
        self
    }

    pub fn ids(&self) -> impl Iterator<Item = NetworkId> + '_ {
        self.networks.keys().copied()
    }
}
