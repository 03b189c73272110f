// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt composition for the reservation assistant.
//!
//! The prompt anchors the model to the restaurant's identity, the current
//! date in the restaurant timezone, and the operating hours, so relative
//! dates in customer messages are interpreted consistently.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use goldfork_config::model::RestaurantConfig;

/// Builds the primary system instruction for a conversation turn.
///
/// `now` must already be in the restaurant timezone; the prompt spells out
/// the current date and what "tomorrow" resolves to so the model's relative
/// date talk stays consistent with the temporal resolver.
pub fn build_system_prompt(restaurant: &RestaurantConfig, now: DateTime<Tz>) -> String {
    let current_date = now.format("%A, %B %d, %Y");
    let tomorrow = (now + Duration::days(1)).format("%B %d, %Y");
    let hours = format_hours(restaurant);

    format!(
        "You are a friendly and professional restaurant reservation assistant for {name}, \
         an upscale dining establishment.\n\
         \n\
         IMPORTANT CONTEXT:\n\
         - Current date/time: {current_date} (Timezone: {tz})\n\
         - When customer says \"tomorrow\", it means {tomorrow}\n\
         - Always interpret dates relative to {tz} timezone\n\
         \n\
         Your ROLE is to:\n\
         1. Answer questions about our menu, restaurant, and services\n\
         2. Help customers make table reservations\n\
         3. Collect necessary information for bookings (name, email, phone, party size, \
         date/time, special requests)\n\
         \n\
         Be warm, professional, and helpful. When collecting reservation information, \
         ensure you get:\n\
         - Customer's full name\n\
         - Email address\n\
         - Phone number\n\
         - Number of guests (party size)\n\
         - Preferred date and time\n\
         - Any special requests or dietary restrictions\n\
         \n\
         Restaurant Hours:\n\
         {hours}\n\
         \n\
         Always confirm the information before finalizing the reservation.",
        name = restaurant.name,
        tz = restaurant.timezone,
    )
}

/// Renders the weekly schedule as one line per day in 12-hour time.
fn format_hours(restaurant: &RestaurantConfig) -> String {
    restaurant
        .hours
        .iter_named()
        .map(|(day, hours)| {
            let label = capitalize(day);
            match hours.parse() {
                Some((open, close)) => format!(
                    "{label}: {} - {}",
                    open.format("%-I:%M %p"),
                    close.format("%-I:%M %p")
                ),
                None => format!("{label}: {} - {}", hours.open, hours.close),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Karachi;

    fn default_restaurant() -> RestaurantConfig {
        goldfork_config::model::GoldforkConfig::default().restaurant
    }

    #[test]
    fn prompt_contains_current_date_and_tomorrow_anchor() {
        let now = Karachi.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let prompt = build_system_prompt(&default_restaurant(), now);
        assert!(prompt.contains("Wednesday, August 26, 2026"), "{prompt}");
        assert!(prompt.contains("it means August 27, 2026"), "{prompt}");
        assert!(prompt.contains("Asia/Karachi"));
    }

    #[test]
    fn prompt_contains_restaurant_name_and_hours() {
        let now = Karachi.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let prompt = build_system_prompt(&default_restaurant(), now);
        assert!(prompt.contains("The Golden Fork"));
        assert!(prompt.contains("Monday: 11:00 AM - 10:00 PM"), "{prompt}");
        assert!(prompt.contains("Saturday: 10:00 AM - 11:00 PM"), "{prompt}");
        assert!(prompt.contains("Sunday: 10:00 AM - 9:00 PM"), "{prompt}");
    }

    #[test]
    fn unparseable_hours_fall_back_to_raw_strings() {
        let mut restaurant = default_restaurant();
        restaurant.hours.monday.open = "eleven".to_string();
        let now = Karachi.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let prompt = build_system_prompt(&restaurant, now);
        assert!(prompt.contains("Monday: eleven - 22:00"), "{prompt}");
    }
}
