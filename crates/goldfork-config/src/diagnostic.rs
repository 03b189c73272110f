// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! valid key listings and "did you mean?" suggestions using Jaro-Winkler
//! string similarity.

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `modle` -> `model` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic information.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(goldfork::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
    },

    /// A configuration value has the wrong type or an invalid value.
    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(code(goldfork::config::invalid_value))]
    InvalidValue {
        /// The offending key path.
        key: String,
        /// Description of the problem.
        detail: String,
    },

    /// A semantic validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(goldfork::config::validation))]
    Validation {
        /// Human-readable description of the constraint violation.
        message: String,
    },
}

/// Convert a Figment error (which may aggregate several failures) into a
/// list of diagnostics.
pub fn figment_to_config_errors(error: figment::Error) -> Vec<ConfigError> {
    let mut out = Vec::new();
    for err in error {
        let key_path = err.path.join(".");
        match &err.kind {
            figment::error::Kind::UnknownField(field, valid) => {
                let suggestion = suggest(field, valid);
                out.push(ConfigError::UnknownKey {
                    key: if key_path.is_empty() {
                        field.clone()
                    } else {
                        format!("{key_path}.{field}")
                    },
                    suggestion,
                    valid_keys: valid.join(", "),
                });
            }
            figment::error::Kind::InvalidType(actual, expected) => {
                out.push(ConfigError::InvalidValue {
                    key: key_path,
                    detail: format!("found {actual}, expected {expected}"),
                });
            }
            figment::error::Kind::InvalidValue(actual, expected) => {
                out.push(ConfigError::InvalidValue {
                    key: key_path,
                    detail: format!("found {actual}, expected {expected}"),
                });
            }
            _ => {
                out.push(ConfigError::Validation {
                    message: err.to_string(),
                });
            }
        }
    }
    out
}

/// Render collected config errors to stderr as miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error.clone()));
    }
}

/// Find the closest valid key by Jaro-Winkler similarity.
fn suggest(field: &str, valid: &[&str]) -> Option<String> {
    valid
        .iter()
        .map(|candidate| (strsim::jaro_winkler(field, candidate), *candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}
