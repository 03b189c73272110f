// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: a real IANA timezone, well-formed operating hours, a usable
//! bind address, and positive booking-window parameters.

use crate::diagnostic::ConfigError;
use crate::model::GoldforkConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GoldforkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Database path must be set.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Timezone must exist in the tz database. Every reservation instant is
    // interpreted in it, so a silent UTC fallback would corrupt bookings.
    if config.restaurant.tz().is_none() {
        errors.push(ConfigError::Validation {
            message: format!(
                "restaurant.timezone `{}` is not a known IANA timezone",
                config.restaurant.timezone
            ),
        });
    }

    // Operating hours must parse and open must precede close.
    for (day, hours) in config.restaurant.hours.iter_named() {
        match hours.parse() {
            None => {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "restaurant.hours.{day} must use HH:MM, got open=`{}` close=`{}`",
                        hours.open, hours.close
                    ),
                });
            }
            Some((open, close)) if open > close => {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "restaurant.hours.{day}: open ({}) is after close ({})",
                        hours.open, hours.close
                    ),
                });
            }
            Some(_) => {}
        }
    }

    // Booking window parameters must be positive.
    if config.booking.window_hours <= 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "booking.window_hours must be positive, got {}",
                config.booking.window_hours
            ),
        });
    }
    if config.booking.max_per_window == 0 {
        errors.push(ConfigError::Validation {
            message: "booking.max_per_window must be at least 1".to_string(),
        });
    }

    // Bind address must look like an IP or hostname.
    let addr = config.gateway.bind_address.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.bind_address must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GoldforkConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let mut config = GoldforkConfig::default();
        config.restaurant.timezone = "Mars/Olympus_Mons".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("timezone")));
    }

    #[test]
    fn malformed_hours_are_rejected() {
        let mut config = GoldforkConfig::default();
        config.restaurant.hours.friday.open = "eleven".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("friday")));
    }

    #[test]
    fn open_after_close_is_rejected() {
        let mut config = GoldforkConfig::default();
        config.restaurant.hours.sunday.open = "22:00".to_string();
        config.restaurant.hours.sunday.close = "10:00".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("sunday")));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut config = GoldforkConfig::default();
        config.booking.max_per_window = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("max_per_window"))
        );
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = GoldforkConfig::default();
        config.storage.database_path = String::new();
        config.restaurant.timezone = "nope".to_string();
        config.booking.window_hours = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3, "expected all failures, got {errors:?}");
    }
}
