// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP calendar adapter for the Goldfork reservation agent.
//!
//! [`HttpCalendar`] implements [`CalendarAdapter`] over a Google-Calendar-
//! shaped REST API: list events overlapping a window (the capacity query)
//! and insert a reservation event. A 404 from either endpoint is surfaced
//! with the not-found signature so the booking orchestrator can apply its
//! local-reference fallback.

pub mod types;

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use goldfork_config::model::CalendarConfig;
use goldfork_core::error::GoldforkError;
use goldfork_core::traits::{CalendarAdapter, PluginAdapter};
use goldfork_core::types::{AdapterType, EventDetails, HealthStatus};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::types::{CreatedEvent, EventBody, EventReminders, EventTime, EventsListResponse};

/// Calendar adapter over a bearer-authenticated events REST API.
pub struct HttpCalendar {
    client: reqwest::Client,
    base_url: String,
    calendar_id: String,
    tz: Tz,
}

impl HttpCalendar {
    /// Creates a new calendar adapter.
    ///
    /// `tz` is the restaurant timezone; event boundaries are rendered in it.
    pub fn new(config: &CalendarConfig, tz: Tz) -> Result<Self, GoldforkError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_token);
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                GoldforkError::Config(format!("invalid calendar token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(StdDuration::from_secs(30))
            .build()
            .map_err(|e| GoldforkError::Calendar {
                message: format!("failed to build HTTP client: {e}"),
                not_found: false,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            calendar_id: config.calendar_id.clone(),
            tz,
        })
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, self.calendar_id)
    }

    /// Renders the insert body for a reservation event.
    fn event_body(&self, details: &EventDetails) -> EventBody {
        let start_local = details.start.with_timezone(&self.tz);
        let end_local = start_local + details.window;
        let tz_name = self.tz.name().to_string();

        let summary = format!(
            "Reservation - {} ({} guests)",
            details.customer_name, details.party_size
        );
        let description = format!(
            "Restaurant Reservation Details:\n\
             ================================\n\
             Customer: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Party Size: {party} guests\n\
             Special Requests: {requests}\n\
             --------------------------------\n\
             Reservation Time: {when}",
            name = details.customer_name,
            email = details.customer_email,
            phone = details.customer_phone,
            party = details.party_size,
            requests = details.special_requests.as_deref().unwrap_or("None"),
            when = start_local.format("%B %d, %Y at %I:%M %p"),
        );

        EventBody {
            summary,
            description,
            start: EventTime {
                date_time: start_local.to_rfc3339(),
                time_zone: tz_name.clone(),
            },
            end: EventTime {
                date_time: end_local.to_rfc3339(),
                time_zone: tz_name,
            },
            color_id: "11".to_string(),
            reminders: EventReminders { use_default: true },
        }
    }
}

#[async_trait]
impl PluginAdapter for HttpCalendar {
    fn name(&self) -> &str {
        "calendar"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Calendar
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        debug!("calendar adapter shutting down");
        Ok(())
    }
}

#[async_trait]
impl CalendarAdapter for HttpCalendar {
    async fn count_overlapping(
        &self,
        start: DateTime<Utc>,
        window: Duration,
    ) -> Result<usize, GoldforkError> {
        let start_local = start.with_timezone(&self.tz);
        let end_local = start_local + window;

        let response = self
            .client
            .get(self.events_url())
            .query(&[
                ("timeMin", start_local.to_rfc3339()),
                ("timeMax", end_local.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(map_transport_err)?;

        let listing: EventsListResponse = parse_response(response).await?;
        debug!(count = listing.items.len(), "overlapping events counted");
        Ok(listing.items.len())
    }

    async fn create_event(&self, details: &EventDetails) -> Result<String, GoldforkError> {
        let body = self.event_body(details);
        let response = self
            .client
            .post(self.events_url())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_err)?;

        let created: CreatedEvent = parse_response(response).await?;
        info!(event_id = %created.id, "calendar event created");
        Ok(created.id)
    }
}

fn map_transport_err(e: reqwest::Error) -> GoldforkError {
    GoldforkError::Calendar {
        message: format!("HTTP request failed: {e}"),
        not_found: false,
        source: Some(Box::new(e)),
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GoldforkError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| GoldforkError::Calendar {
        message: format!("failed to read response body: {e}"),
        not_found: false,
        source: Some(Box::new(e)),
    })?;

    if !status.is_success() {
        return Err(GoldforkError::Calendar {
            message: format!("calendar API returned {status}: {body}"),
            not_found: status == reqwest::StatusCode::NOT_FOUND,
            source: None,
        });
    }

    serde_json::from_str(&body).map_err(|e| GoldforkError::Calendar {
        message: format!("failed to parse calendar response: {e}"),
        not_found: false,
        source: Some(Box::new(e)),
    })
}
