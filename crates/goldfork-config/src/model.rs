// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Goldfork reservation agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Top-level Goldfork configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoldforkConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI API settings (chat completions + embeddings).
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Qdrant semantic search settings.
    #[serde(default)]
    pub qdrant: QdrantConfig,

    /// External calendar service settings.
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Restaurant identity, timezone, and operating hours.
    #[serde(default)]
    pub restaurant: RestaurantConfig,

    /// Booking pipeline policy knobs.
    #[serde(default)]
    pub booking: BookingConfig,

    /// HTTP/WebSocket gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional override for the assistant system prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
        }
    }
}

fn default_agent_name() -> String {
    "goldfork".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Empty by default; required for `serve`.
    #[serde(default)]
    pub api_key: String,

    /// Chat completion model.
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Embedding model for semantic search.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// API base URL. Overridable for tests and self-hosted gateways.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_openai_model(),
            embedding_model: default_embedding_model(),
            base_url: default_openai_base_url(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Qdrant semantic search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QdrantConfig {
    /// Base URL of the Qdrant REST API.
    #[serde(default = "default_qdrant_url")]
    pub url: String,

    /// Collection holding restaurant information snippets.
    #[serde(default = "default_qdrant_collection")]
    pub collection: String,

    /// Embedding vector dimension.
    #[serde(default = "default_vector_size")]
    pub vector_size: usize,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: default_qdrant_url(),
            collection: default_qdrant_collection(),
            vector_size: default_vector_size(),
        }
    }
}

fn default_qdrant_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_qdrant_collection() -> String {
    "restaurant_info".to_string()
}

fn default_vector_size() -> usize {
    1536
}

/// External calendar service configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Base URL of the calendar REST API.
    #[serde(default)]
    pub base_url: String,

    /// Calendar identifier events are read from and written to.
    #[serde(default)]
    pub calendar_id: String,

    /// Static bearer token for calendar API calls.
    #[serde(default)]
    pub api_token: String,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Whether to enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "goldfork.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Restaurant identity, timezone, and operating hours.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RestaurantConfig {
    /// Restaurant display name, used in prompts and confirmations.
    #[serde(default = "default_restaurant_name")]
    pub name: String,

    /// IANA timezone all reservation times are interpreted in.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Per-weekday operating hours.
    #[serde(default)]
    pub hours: WeekHours,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            name: default_restaurant_name(),
            timezone: default_timezone(),
            hours: WeekHours::default(),
        }
    }
}

impl RestaurantConfig {
    /// Parses the configured timezone against the tz database.
    pub fn tz(&self) -> Option<chrono_tz::Tz> {
        self.timezone.parse().ok()
    }
}

fn default_restaurant_name() -> String {
    "The Golden Fork".to_string()
}

fn default_timezone() -> String {
    "Asia/Karachi".to_string()
}

/// Operating hours for one weekday, as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    /// Parses the open/close pair. `None` when either side is malformed.
    pub fn parse(&self) -> Option<(NaiveTime, NaiveTime)> {
        let open = NaiveTime::parse_from_str(&self.open, "%H:%M").ok()?;
        let close = NaiveTime::parse_from_str(&self.close, "%H:%M").ok()?;
        Some((open, close))
    }
}

/// Operating hours for the full week.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeekHours {
    #[serde(default = "default_weekday_hours")]
    pub monday: DayHours,
    #[serde(default = "default_weekday_hours")]
    pub tuesday: DayHours,
    #[serde(default = "default_weekday_hours")]
    pub wednesday: DayHours,
    #[serde(default = "default_late_hours")]
    pub thursday: DayHours,
    #[serde(default = "default_late_hours")]
    pub friday: DayHours,
    #[serde(default = "default_saturday_hours")]
    pub saturday: DayHours,
    #[serde(default = "default_sunday_hours")]
    pub sunday: DayHours,
}

impl Default for WeekHours {
    fn default() -> Self {
        Self {
            monday: default_weekday_hours(),
            tuesday: default_weekday_hours(),
            wednesday: default_weekday_hours(),
            thursday: default_late_hours(),
            friday: default_late_hours(),
            saturday: default_saturday_hours(),
            sunday: default_sunday_hours(),
        }
    }
}

impl WeekHours {
    /// Hours for a given weekday.
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Iterates all seven days with their config key names.
    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, &DayHours)> {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
        .into_iter()
    }
}

fn default_weekday_hours() -> DayHours {
    DayHours::new("11:00", "22:00")
}

fn default_late_hours() -> DayHours {
    DayHours::new("11:00", "23:00")
}

fn default_saturday_hours() -> DayHours {
    DayHours::new("10:00", "23:00")
}

fn default_sunday_hours() -> DayHours {
    DayHours::new("10:00", "21:00")
}

/// Booking pipeline policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Length of the dining window, in hours.
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,

    /// Maximum concurrent bookings per dining window.
    #[serde(default = "default_max_per_window")]
    pub max_per_window: usize,

    /// When the external capacity query fails, treat the slot as available
    /// (fail-open) instead of rejecting the booking.
    #[serde(default = "default_true")]
    pub fail_open_on_check_error: bool,

    /// When the calendar write fails with a not-found signature, synthesize a
    /// local reference and continue with the durable write.
    #[serde(default = "default_true")]
    pub fallback_on_calendar_not_found: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            max_per_window: default_max_per_window(),
            fail_open_on_check_error: true,
            fallback_on_calendar_not_found: true,
        }
    }
}

fn default_window_hours() -> i64 {
    2
}

fn default_max_per_window() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// HTTP/WebSocket gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Bind address for the gateway listener.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Listener port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}
