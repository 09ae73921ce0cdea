//! Layered configuration for the update-config-event command.
//!
//! Values arrive in layers. Command arguments form the base layer, a json
//! file (credentials or event) laid over it wins per field, and anything
//! still unset falls back to the process settings or the command defaults
//! at resolution time.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thing_config_client::{EventConfig, EventConfigError, Protocol, SensorConfig, Settings};

pub const DEFAULT_CHANGE: bool = true;
pub const DEFAULT_TIME_SEC: u64 = 10;
pub const DEFAULT_LOWER_THRESHOLD: f64 = 1000.0;
pub const DEFAULT_UPPER_THRESHOLD: f64 = 3000.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error reading config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json in config file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("thing id must not be empty")]
    EmptyThingId,
    #[error("no sensor id given on the command line or in an event file")]
    MissingSensorId,
    #[error(transparent)]
    Event(#[from] EventConfigError),
}

/// Partial connection parameters from one source.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectionOverlay {
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<Protocol>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl ConnectionOverlay {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    /// Lay `over` on top of this overlay. Fields present in `over` win.
    pub fn merge(self, over: Self) -> Self {
        Self {
            hostname: over.hostname.or(self.hostname),
            port: over.port.or(self.port),
            protocol: over.protocol.or(self.protocol),
            username: over.username.or(self.username),
            password: over.password.or(self.password),
            token: over.token.or(self.token),
        }
    }

    /// Apply the overlay to the base connection settings.
    pub fn resolve(self, base: Settings) -> Settings {
        Settings {
            hostname: self.hostname.unwrap_or(base.hostname),
            port: self.port.unwrap_or(base.port),
            protocol: self.protocol.unwrap_or(base.protocol),
            username: self.username.or(base.username),
            password: self.password.or(base.password),
            token: self.token.or(base.token),
            connect: base.connect,
            rpc: base.rpc,
        }
    }
}

/// Partial event parameters from one source, in the wire's camelCase
/// naming so event files map onto the config losslessly.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOverlay {
    pub sensor_id: Option<String>,
    pub change: Option<bool>,
    pub time_sec: Option<u64>,
    pub lower_threshold: Option<f64>,
    pub upper_threshold: Option<f64>,
}

impl EventOverlay {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    /// Lay `over` on top of this overlay. Fields present in `over` win.
    pub fn merge(self, over: Self) -> Self {
        Self {
            sensor_id: over.sensor_id.or(self.sensor_id),
            change: over.change.or(self.change),
            time_sec: over.time_sec.or(self.time_sec),
            lower_threshold: over.lower_threshold.or(self.lower_threshold),
            upper_threshold: over.upper_threshold.or(self.upper_threshold),
        }
    }

    /// Fill the remaining fields from the command defaults and validate.
    ///
    /// The sensor id has no default and must come from an argument or an
    /// event file.
    pub fn resolve(self) -> Result<SensorConfig, ConfigError> {
        let sensor_id = self.sensor_id.ok_or(ConfigError::MissingSensorId)?;
        let event = EventConfig {
            change: self.change.unwrap_or(DEFAULT_CHANGE),
            time_sec: self.time_sec.unwrap_or(DEFAULT_TIME_SEC),
            lower_threshold: self.lower_threshold.unwrap_or(DEFAULT_LOWER_THRESHOLD),
            upper_threshold: self.upper_threshold.unwrap_or(DEFAULT_UPPER_THRESHOLD),
        };
        event.validate()?;
        Ok(SensorConfig { sensor_id, event })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
