//! Server configuration.
//!
//! Everything is read from `HUDDLE_*` environment variables, falling back to
//! defaults suited to a single local instance.

use std::net::SocketAddr;

use huddle_core::{LobbyConfig, DEFAULT_CAPACITY, DEFAULT_THRESHOLD};
use thiserror::Error;

/// Errors produced while loading configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A variable was present but could not be parsed
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// A value parsed but is outside its allowed range
    #[error("{var} out of range: {reason}")]
    OutOfRange { var: &'static str, reason: &'static str },
}

/// Dimensions of the surface participants are placed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
        }
    }
}

/// Configuration for a Huddle server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Surface new participants are placed on
    pub surface: Surface,

    /// Registry capacity and grouping threshold
    pub lobby: LobbyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            surface: Surface::default(),
            lobby: LobbyConfig::default(),
        }
    }
}

impl ServerConfig {
    pub const API_ADDR: &'static str = "HUDDLE_API_ADDR";
    pub const MAP_WIDTH: &'static str = "HUDDLE_MAP_WIDTH";
    pub const MAP_HEIGHT: &'static str = "HUDDLE_MAP_HEIGHT";
    pub const CAPACITY: &'static str = "HUDDLE_CAPACITY";
    pub const THRESHOLD: &'static str = "HUDDLE_THRESHOLD";

    /// Create config from environment variables with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_addr = parse_or(&lookup, Self::API_ADDR, defaults.api_addr)?;
        let width = parse_or(&lookup, Self::MAP_WIDTH, defaults.surface.width)?;
        let height = parse_or(&lookup, Self::MAP_HEIGHT, defaults.surface.height)?;
        let capacity = parse_or(&lookup, Self::CAPACITY, DEFAULT_CAPACITY)?;
        let threshold = parse_or(&lookup, Self::THRESHOLD, DEFAULT_THRESHOLD)?;

        let config = Self {
            api_addr,
            surface: Surface { width, height },
            lobby: LobbyConfig {
                capacity,
                threshold,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.surface.width) {
            return Err(ConfigError::OutOfRange {
                var: Self::MAP_WIDTH,
                reason: "must be finite and greater than zero",
            });
        }
        if !positive(self.surface.height) {
            return Err(ConfigError::OutOfRange {
                var: Self::MAP_HEIGHT,
                reason: "must be finite and greater than zero",
            });
        }
        if self.lobby.capacity == 0 {
            return Err(ConfigError::OutOfRange {
                var: Self::CAPACITY,
                reason: "must be at least one",
            });
        }
        if !positive(self.lobby.threshold) {
            return Err(ConfigError::OutOfRange {
                var: Self::THRESHOLD,
                reason: "must be finite and greater than zero",
            });
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
