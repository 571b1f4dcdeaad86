use holdem_engine::config::GameParameters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Service-wide settings shared by every table the manager creates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceSettings {
    /// Length of one turn-timer tick in milliseconds (one tick per turn second)
    pub timer_tick_ms: u64,
    /// Per-subscriber event channel capacity
    pub event_buffer: usize,
    /// Parameters used when a table is created without its own
    pub default_parameters: GameParameters,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            timer_tick_ms: 1000,
            event_buffer: crate::events::EVENT_CHANNEL_BUFFER,
            default_parameters: GameParameters::default(),
        }
    }
}

impl ServiceSettings {
    pub fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.timer_tick_ms == 0 {
            return Err(SettingsError::InvalidValue(
                "timer_tick_ms must be greater than 0".to_string(),
            ));
        }

        if self.event_buffer == 0 {
            return Err(SettingsError::InvalidValue(
                "event_buffer must be greater than 0".to_string(),
            ));
        }

        self.default_parameters
            .validate()
            .map_err(|e| SettingsError::InvalidValue(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = ServiceSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timer_tick(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_zero_tick_and_buffer() {
        let settings = ServiceSettings {
            timer_tick_ms: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ServiceSettings {
            event_buffer: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_invalid_default_parameters() {
        let mut settings = ServiceSettings::default();
        settings.default_parameters.max_players = 30;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: ServiceSettings =
            serde_json::from_str(r#"{ "timer_tick_ms": 250 }"#).unwrap();
        assert_eq!(settings.timer_tick(), Duration::from_millis(250));
        assert_eq!(settings.event_buffer, crate::events::EVENT_CHANNEL_BUFFER);
        assert!(settings.validate().is_ok());
    }
}
