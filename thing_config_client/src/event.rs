use serde::{Deserialize, Serialize};

/// Rules governing when a sensor pushes its data to the cloud: on value
/// change, on a time interval, or when the value leaves a threshold band.
///
/// Serialized camelCase on the wire and in event files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    /// Send data when the sensor value changes
    pub change: bool,
    /// Interval in seconds for time based publishing
    pub time_sec: u64,
    /// Send data when the value drops below this threshold
    pub lower_threshold: f64,
    /// Send data when the value rises above this threshold
    pub upper_threshold: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum EventConfigError {
    #[error("lower threshold {lower} above upper threshold {upper}")]
    ThresholdOrder { lower: f64, upper: f64 },
}

impl EventConfig {
    /// The lower threshold must not exceed the upper threshold.
    pub fn validate(&self) -> Result<(), EventConfigError> {
        if self.lower_threshold > self.upper_threshold {
            return Err(EventConfigError::ThresholdOrder {
                lower: self.lower_threshold,
                upper: self.upper_threshold,
            });
        }
        Ok(())
    }
}

/// One entry of an update-config request: the sensor and its event config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConfig {
    pub sensor_id: String,
    pub event: EventConfig,
}
