use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// RUST_LOG compatible settings string. Default to
    /// "thing_config_cli=info"
    #[serde(default = "default_log")]
    pub log: String,
    /// Connection settings for the thing config cloud service. Every
    /// field can be overridden per invocation with flags or a
    /// credentials file
    #[serde(default)]
    pub cloud: thing_config_client::Settings,
}

fn default_log() -> String {
    "thing_config_cli=info".to_string()
}

impl Settings {
    /// Settings can be loaded from a given optional path and
    /// can be overridden with environment variables.
    ///
    /// Environment overrides have the same name as the entries
    /// in the settings file in uppercase and prefixed with "THING_CONFIG__".
    /// Example: "THING_CONFIG__CLOUD__HOSTNAME" will override the
    /// cloud hostname.
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = path {
            // Add optional file
            builder = builder
                .add_source(File::with_name(&file.as_ref().to_string_lossy()).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix("THING_CONFIG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize())
    }
}
