//! Event metadata entered by the user before an organize run.
//!
//! All fields are trimmed on construction and never change afterwards.
//! `event_name`, `event_date`, and `photographer` are required; `venue` and
//! `location` may be empty and show up as "Not specified" in the summary file.

use crate::naming;

/// Placeholder written to the summary file for empty optional fields.
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    event_name: String,
    venue: String,
    location: String,
    event_date: String,
    photographer: String,
}

impl EventMetadata {
    pub fn new(
        event_name: &str,
        venue: &str,
        location: &str,
        event_date: &str,
        photographer: &str,
    ) -> Self {
        Self {
            event_name: event_name.trim().to_string(),
            venue: venue.trim().to_string(),
            location: location.trim().to_string(),
            event_date: event_date.trim().to_string(),
            photographer: photographer.trim().to_string(),
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn event_date(&self) -> &str {
        &self.event_date
    }

    pub fn photographer(&self) -> &str {
        &self.photographer
    }

    /// Names of the required fields that are empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("event name", &self.event_name),
            ("event date", &self.event_date),
            ("photographer", &self.photographer),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Name of the folder created under the destination root.
    pub fn folder_name(&self) -> String {
        naming::folder_name(&self.venue, &self.event_date)
    }

    /// Title shown in the gallery header.
    pub fn header_title(&self) -> String {
        naming::header_title(&self.venue, &self.location, &self.event_name)
    }

    /// Venue for display, or [`NOT_SPECIFIED`].
    pub fn venue_or_placeholder(&self) -> &str {
        or_placeholder(&self.venue)
    }

    /// Location for display, or [`NOT_SPECIFIED`].
    pub fn location_or_placeholder(&self) -> &str {
        or_placeholder(&self.location)
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { NOT_SPECIFIED } else { value }
}
