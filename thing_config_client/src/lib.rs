pub mod client;
pub mod event;
mod settings;

pub use client::{ClientError, Session, ThingConfigClient};
pub use event::{EventConfig, EventConfigError, SensorConfig};
pub use settings::{Protocol, Settings, UnsupportedProtocol};
