use serde::Deserialize;
use std::{fmt, str::FromStr, time::Duration};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Hostname of the thing config service. Default "localhost"
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Port of the thing config service. Default 443
    #[serde(default = "default_port")]
    pub port: u16,
    /// Protocol used to reach the service, http or https. Default https
    #[serde(default)]
    pub protocol: Protocol,
    /// Username presented when opening a session
    #[serde(default)]
    pub username: Option<String>,
    /// Password presented when opening a session
    #[serde(default)]
    pub password: Option<String>,
    /// Pre-issued token presented when opening a session instead of a
    /// username and password
    #[serde(default)]
    pub token: Option<String>,
    /// Connect timeout for the thing config client in seconds. Default 5
    #[serde(default = "default_connect_timeout")]
    pub connect: u64,
    /// RPC timeout for the thing config client in seconds. Default 5
    #[serde(default = "default_rpc_timeout")]
    pub rpc: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            port: default_port(),
            protocol: Protocol::default(),
            username: None,
            password: None,
            token: None,
            connect: default_connect_timeout(),
            rpc: default_rpc_timeout(),
        }
    }
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    443
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_rpc_timeout() -> u64 {
    5
}

impl Settings {
    /// Base url of the service, assembled from protocol, hostname and port.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.hostname, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported protocol {0}, expected http or https")]
pub struct UnsupportedProtocol(String);

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Https => f.write_str("https"),
        }
    }
}

impl FromStr for Protocol {
    type Err = UnsupportedProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(UnsupportedProtocol(other.to_string())),
        }
    }
}
