//! Connection options.
//!
//! [`ConnectOptions`] carries the connection string together with optional
//! credential and parameter overrides. Overrides always win over whatever
//! the connection string says, even when the string carries its own
//! credentials.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::DialResult;
use crate::target::ConnectionTarget;

// Environment variables read by `ConnectOptions::from_env`.
const ENV_URI: &str = "MYSQL_URI";
const ENV_USERNAME: &str = "MYSQL_USERNAME";
const ENV_PASSWORD: &str = "MYSQL_PASSWORD";

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;

    /// Check if a variable exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Default environment source using std::env.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a HashMap.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create a new map-based environment source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Options for opening a MySQL connection.
///
/// The connection string is required; everything else overrides or extends
/// what the string resolves to.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Connection string in URI, native DSN, or bare hostname form.
    pub uri: Option<String>,
    /// Username override.
    pub username: Option<String>,
    /// Password override.
    pub password: Option<String>,
    /// Parameter overrides, applied over any query parameters in the
    /// connection string.
    pub params: IndexMap<String, String>,
}

impl ConnectOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection string.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Override the username, regardless of what the connection string says.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Override the password, regardless of what the connection string says.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set a single parameter override.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Build options from key/value pairs.
    ///
    /// The keys `uri`, `username`, and `password` populate the matching
    /// fields; every other key becomes a parameter override.
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut options = Self::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "uri" => options.uri = Some(value),
                "username" => options.username = Some(value),
                "password" => options.password = Some(value),
                _ => {
                    options.params.insert(key, value);
                }
            }
        }
        options
    }

    /// Build options from the `MYSQL_URI`, `MYSQL_USERNAME`, and
    /// `MYSQL_PASSWORD` environment variables.
    pub fn from_env() -> Self {
        Self::from_env_source(&StdEnvSource)
    }

    /// Build options from a custom environment source.
    pub fn from_env_source(source: &impl EnvSource) -> Self {
        Self {
            uri: source.get(ENV_URI),
            username: source.get(ENV_USERNAME),
            password: source.get(ENV_PASSWORD),
            params: IndexMap::new(),
        }
    }

    /// Resolve these options into a [`ConnectionTarget`].
    pub fn resolve(&self) -> DialResult<ConnectionTarget> {
        crate::resolve::resolve(self)
    }
}
