//! Date picker configuration and event scheduling
//!
//! Picker formats use the flatpickr token set (`Y`, `m`, `d`, `H`, `i`, `S`);
//! they are translated to chrono format strings for parsing.

use crate::error::{Result, WidgetError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Date picker options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePickerConfig {
    /// Whether a time can be picked
    #[serde(default = "default_true")]
    pub enable_time: bool,
    /// Value format, in picker tokens
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// 24 hour clock
    #[serde(default = "default_true", rename = "time_24hr")]
    pub time_24hr: bool,
    /// Render the calendar inline instead of as a popup
    #[serde(default = "default_true")]
    pub inline: bool,
    /// Locale code
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "Y-m-d H:i:00.000000".to_string()
}

fn default_locale() -> String {
    "da".to_string()
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            enable_time: true,
            date_format: default_date_format(),
            time_24hr: true,
            inline: true,
            locale: default_locale(),
        }
    }
}

impl DatePickerConfig {
    /// Use another value format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// The value format as a chrono format string
    pub fn chrono_format(&self) -> String {
        let mut out = String::with_capacity(self.date_format.len() * 2);
        for c in self.date_format.chars() {
            match c {
                'Y' => out.push_str("%Y"),
                'm' => out.push_str("%m"),
                'd' => out.push_str("%d"),
                'H' => out.push_str("%H"),
                'i' => out.push_str("%M"),
                'S' => out.push_str("%S"),
                '%' => out.push_str("%%"),
                other => out.push(other),
            }
        }
        out
    }

    /// Parse a picker value
    pub fn parse(&self, value: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.trim(), &self.chrono_format())
            .map_err(|e| WidgetError::InvalidDate(format!("{value}: {e}")))
    }

    /// Format a date the way the picker writes it
    pub fn format(&self, value: &NaiveDateTime) -> String {
        value.format(&self.chrono_format()).to_string()
    }
}

/// A start and end picker pair
///
/// The end picker never offers a date before the chosen start.
#[derive(Debug, Clone, Default)]
pub struct EventSchedule {
    config: DatePickerConfig,
    starts_at: Option<NaiveDateTime>,
    ends_at: Option<NaiveDateTime>,
    end_min_date: Option<NaiveDateTime>,
}

impl EventSchedule {
    /// Create a schedule whose pickers share one configuration
    pub fn new(config: DatePickerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Picker configuration
    pub fn config(&self) -> &DatePickerConfig {
        &self.config
    }

    /// Start picker changed
    pub fn on_starts_at_changed(&mut self, date_str: &str) -> Result<()> {
        let starts_at = self.config.parse(date_str)?;
        self.starts_at = Some(starts_at);
        self.end_min_date = Some(starts_at);
        tracing::debug!(min_date = %starts_at, "end picker minimum moved");
        Ok(())
    }

    /// End picker changed
    pub fn on_ends_at_changed(&mut self, date_str: &str) -> Result<()> {
        let ends_at = self.config.parse(date_str)?;
        if let Some(min) = self.end_min_date {
            if ends_at < min {
                return Err(WidgetError::InvalidDate(format!(
                    "{date_str} is before {}",
                    self.config.format(&min)
                )));
            }
        }
        self.ends_at = Some(ends_at);
        Ok(())
    }

    /// Chosen start
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.starts_at
    }

    /// Chosen end
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        self.ends_at
    }

    /// Earliest date the end picker accepts
    pub fn end_min_date(&self) -> Option<NaiveDateTime> {
        self.end_min_date
    }
}
