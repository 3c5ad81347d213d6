//! Process configuration read from the environment.

use bidquiz_room::GameConfig;

use crate::BidquizError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Where the server listens and how new rooms are set up.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub game: GameConfig,
}

impl ServerConfig {
    /// Reads `PORT` and `BIND_HOST`, falling back to `0.0.0.0:3000`.
    ///
    /// # Errors
    /// Returns [`BidquizError::Config`] if `PORT` is set but is not a
    /// valid port number.
    pub fn from_env() -> Result<Self, BidquizError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BidquizError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| BidquizError::Config(format!("PORT={raw}")))?,
            None => DEFAULT_PORT,
        };
        let host = lookup("BIND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            game: GameConfig::default(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            game: GameConfig::default(),
        }
    }
}
