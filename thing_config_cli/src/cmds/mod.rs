use crate::{
    overlay::{ConnectionOverlay, EventOverlay},
    settings::Settings,
    Msg, Result,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thing_config_client::Protocol;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod event;

#[derive(Debug, Parser)]
#[command(name = "thing-config")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cli for the thing config cloud service", long_about = None)]
pub struct Cli {
    /// Optional configuration file to use. If present the toml file at the
    /// given path will be loaded. Env variables can override the
    /// settings in the given file.
    #[arg(short = 'c')]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

impl Cli {
    pub async fn run(self) -> Result<Msg> {
        let settings = Settings::new(self.config)?;

        // Logs go to stderr, stdout carries only the command result
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&settings.log))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        self.cmd.run(settings).await
    }
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Update the event configuration for a sensor of a thing
    UpdateConfigEvent(UpdateConfigEvent),
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<Msg> {
        match self {
            Self::UpdateConfigEvent(args) => event::update_config_event(args, settings).await,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateConfigEvent {
    /// Id of the thing whose sensor config to update
    pub thing_id: String,
    /// Id of the sensor. Required here or in the event file
    pub sensor_id: Option<String>,
    /// Send sensor data when its value changes
    pub change: Option<bool>,
    /// Send sensor data every time-sec seconds
    pub time_sec: Option<u64>,
    /// Send sensor data when its value drops below this threshold
    #[arg(allow_negative_numbers = true)]
    pub lower_threshold: Option<f64>,
    /// Send sensor data when its value rises above this threshold
    #[arg(allow_negative_numbers = true)]
    pub upper_threshold: Option<f64>,

    /// Json file with event entries. Entries override the event
    /// arguments given on the command line
    #[arg(long)]
    pub event_file: Option<PathBuf>,
    /// Json file with connection entries. Entries override the
    /// connection options given on the command line
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Hostname of the thing config cloud service
    #[arg(long)]
    pub hostname: Option<String>,
    /// Port of the thing config cloud service
    #[arg(long)]
    pub port: Option<u16>,
    /// Protocol to connect with, http or https
    #[arg(long)]
    pub protocol: Option<Protocol>,
    /// Username to open the session with
    #[arg(long)]
    pub username: Option<String>,
    /// Password to open the session with
    #[arg(long)]
    pub password: Option<String>,
    /// Pre-issued token to open the session with instead of a
    /// username and password
    #[arg(long)]
    pub token: Option<String>,
}

impl From<&ConnectionArgs> for ConnectionOverlay {
    fn from(args: &ConnectionArgs) -> Self {
        Self {
            hostname: args.hostname.clone(),
            port: args.port,
            protocol: args.protocol,
            username: args.username.clone(),
            password: args.password.clone(),
            token: args.token.clone(),
        }
    }
}

impl From<&UpdateConfigEvent> for EventOverlay {
    fn from(args: &UpdateConfigEvent) -> Self {
        Self {
            sensor_id: args.sensor_id.clone(),
            change: args.change,
            time_sec: args.time_sec,
            lower_threshold: args.lower_threshold,
            upper_threshold: args.upper_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(line: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(line)
    }

    #[test]
    fn parses_full_positional_form() {
        let cli = parse(&[
            "thing-config",
            "update-config-event",
            "thing-1",
            "7",
            "false",
            "30",
            "5",
            "60",
        ])
        .unwrap();
        let Cmd::UpdateConfigEvent(args) = cli.cmd;
        assert_eq!(args.thing_id, "thing-1");
        assert_eq!(args.sensor_id.as_deref(), Some("7"));
        assert_eq!(args.change, Some(false));
        assert_eq!(args.time_sec, Some(30));
        assert_eq!(args.lower_threshold, Some(5.0));
        assert_eq!(args.upper_threshold, Some(60.0));
        assert_eq!(args.event_file, None);
        assert_eq!(args.credentials_file, None);
    }

    #[test]
    fn event_arguments_are_optional() {
        let cli = parse(&["thing-config", "update-config-event", "thing-1"]).unwrap();
        let Cmd::UpdateConfigEvent(args) = cli.cmd;
        assert_eq!(args.thing_id, "thing-1");
        assert_eq!(args.sensor_id, None);
        assert_eq!(args.change, None);
    }

    #[test]
    fn thing_id_is_required() {
        let err = parse(&["thing-config", "update-config-event"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn thresholds_accept_negative_values() {
        let cli = parse(&[
            "thing-config",
            "update-config-event",
            "thing-1",
            "7",
            "true",
            "10",
            "-12.5",
            "5",
        ])
        .unwrap();
        let Cmd::UpdateConfigEvent(args) = cli.cmd;
        assert_eq!(args.lower_threshold, Some(-12.5));
        assert_eq!(args.upper_threshold, Some(5.0));
    }

    #[test]
    fn change_accepts_only_true_or_false() {
        assert!(parse(&["thing-config", "update-config-event", "thing-1", "7", "yes"]).is_err());
        assert!(parse(&["thing-config", "update-config-event", "thing-1", "7", "1"]).is_err());
    }

    #[test]
    fn protocol_rejects_unknown_schemes() {
        let result = parse(&[
            "thing-config",
            "update-config-event",
            "thing-1",
            "--protocol",
            "wss",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn connection_flags_and_files_parse() {
        let cli = parse(&[
            "thing-config",
            "-c",
            "settings.toml",
            "update-config-event",
            "thing-1",
            "--hostname",
            "cloud.example.com",
            "--port",
            "8443",
            "--protocol",
            "http",
            "--username",
            "operator",
            "--password",
            "hunter2",
            "--token",
            "abc",
            "--credentials-file",
            "creds.json",
            "--event-file",
            "event.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("settings.toml")));
        let Cmd::UpdateConfigEvent(args) = cli.cmd;
        assert_eq!(args.connection.hostname.as_deref(), Some("cloud.example.com"));
        assert_eq!(args.connection.port, Some(8443));
        assert_eq!(args.connection.protocol, Some(Protocol::Http));
        assert_eq!(args.connection.username.as_deref(), Some("operator"));
        assert_eq!(args.connection.password.as_deref(), Some("hunter2"));
        assert_eq!(args.connection.token.as_deref(), Some("abc"));
        assert_eq!(args.credentials_file, Some(PathBuf::from("creds.json")));
        assert_eq!(args.event_file, Some(PathBuf::from("event.json")));
    }

    #[test]
    fn argument_overlays_carry_given_values_only() {
        let cli = parse(&[
            "thing-config",
            "update-config-event",
            "thing-1",
            "7",
            "--hostname",
            "cloud.example.com",
        ])
        .unwrap();
        let Cmd::UpdateConfigEvent(args) = cli.cmd;

        let connection = ConnectionOverlay::from(&args.connection);
        assert_eq!(connection.hostname.as_deref(), Some("cloud.example.com"));
        assert_eq!(connection.port, None);

        let event = EventOverlay::from(&args);
        assert_eq!(event.sensor_id.as_deref(), Some("7"));
        assert_eq!(event.change, None);
        assert_eq!(event.time_sec, None);
    }
}
