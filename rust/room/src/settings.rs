use std::time::Duration;

use chipstack_engine::table::{TableConfig, MAX_SEATS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-game settings chosen when a game is started in a room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    /// Chips every participant starts with
    pub starting_chips: u32,
    /// Small blind; the big blind is twice this
    pub small_blind: u32,
    /// Fixed seed for reproducible deals
    pub seed: Option<u64>,
    /// Fold a player automatically after this many idle seconds
    pub turn_timeout_secs: Option<u64>,
    /// Commands that may queue up for the table before senders wait
    pub inbox_capacity: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_chips: 1000,
            small_blind: 10,
            seed: None,
            turn_timeout_secs: None,
            inbox_capacity: 32,
        }
    }
}

impl GameSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.small_blind == 0 {
            return Err(SettingsError::InvalidValue(
                "small_blind must be greater than 0".to_string(),
            ));
        }

        let Some(big_blind) = self.small_blind.checked_mul(2) else {
            return Err(SettingsError::InvalidValue(
                "small_blind is too large".to_string(),
            ));
        };
        if self.starting_chips < big_blind {
            return Err(SettingsError::InvalidValue(
                "starting_chips must cover the big blind".to_string(),
            ));
        }

        if self.turn_timeout_secs == Some(0) {
            return Err(SettingsError::InvalidValue(
                "turn_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.inbox_capacity == 0 {
            return Err(SettingsError::InvalidValue(
                "inbox_capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Check a participant list against what a table can seat.
    pub fn validate_seats(&self, count: usize) -> Result<(), SettingsError> {
        if !(2..=MAX_SEATS).contains(&count) {
            return Err(SettingsError::InvalidValue(format!(
                "a game needs between 2 and {MAX_SEATS} participants, got {count}"
            )));
        }
        let seats = u32::try_from(count).unwrap_or(u32::MAX);
        if self.starting_chips.checked_mul(seats).is_none() {
            return Err(SettingsError::InvalidValue(format!(
                "{count} stacks of {} chips exceed the supported table total",
                self.starting_chips
            )));
        }
        Ok(())
    }

    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            starting_chips: self.starting_chips,
            small_blind: self.small_blind,
            seed: self.seed,
            first_dealer: None,
        }
    }

    pub fn turn_timeout(&self) -> Option<Duration> {
        self.turn_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.starting_chips, 1000);
        assert_eq!(settings.small_blind, 10);
        assert_eq!(settings.turn_timeout(), None);
    }

    #[test]
    fn zero_blind_is_rejected() {
        let settings = GameSettings {
            small_blind: 0,
            ..GameSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue(msg)) if msg.contains("small_blind")
        ));
    }

    #[test]
    fn stack_must_cover_big_blind() {
        let settings = GameSettings {
            starting_chips: 15,
            small_blind: 10,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn zero_timeout_and_capacity_are_rejected() {
        let timeout = GameSettings {
            turn_timeout_secs: Some(0),
            ..GameSettings::default()
        };
        assert!(timeout.validate().is_err());
        let inbox = GameSettings {
            inbox_capacity: 0,
            ..GameSettings::default()
        };
        assert!(inbox.validate().is_err());
    }

    #[test]
    fn seat_count_bounds() {
        let settings = GameSettings::default();
        assert!(settings.validate_seats(1).is_err());
        assert!(settings.validate_seats(2).is_ok());
        assert!(settings.validate_seats(MAX_SEATS).is_ok());
        assert!(settings.validate_seats(MAX_SEATS + 1).is_err());
    }

    #[test]
    fn oversized_blinds_and_stacks_are_rejected() {
        let blinds = GameSettings {
            starting_chips: u32::MAX,
            small_blind: 3_000_000_000,
            ..GameSettings::default()
        };
        assert!(blinds.validate().is_err());

        let stacks = GameSettings {
            starting_chips: 3_000_000_000,
            ..GameSettings::default()
        };
        assert!(stacks.validate().is_ok());
        assert!(stacks.validate_seats(2).is_err());
        assert!(GameSettings::default().validate_seats(MAX_SEATS).is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: GameSettings =
            serde_json::from_str(r#"{"small_blind": 25, "turn_timeout_secs": 30}"#).unwrap();
        assert_eq!(settings.small_blind, 25);
        assert_eq!(settings.starting_chips, 1000);
        assert_eq!(settings.turn_timeout(), Some(Duration::from_secs(30)));
    }
}
