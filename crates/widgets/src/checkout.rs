//! Donation checkout
//!
//! Payment popup configuration and the donation amount slider. Amounts are
//! in øre; one krone is 100.

use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};

/// Payment popup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// Publishable key
    pub key: String,
    /// Popup language
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Charge currency
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Merchant name
    #[serde(default)]
    pub name: String,
    /// Charge description
    #[serde(default)]
    pub description: String,
    /// Logo path
    #[serde(default)]
    pub image: String,
}

fn default_locale() -> String {
    "da".to_string()
}

fn default_currency() -> String {
    "dkk".to_string()
}

impl CheckoutConfig {
    /// Configuration for a publishable key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            locale: default_locale(),
            currency: default_currency(),
            name: String::new(),
            description: String::new(),
            image: String::new(),
        }
    }

    /// Set merchant name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set charge description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set logo path
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Parse the amount field of the donation form
pub fn parse_amount(value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| WidgetError::InvalidAmount(value.to_string()))
}

/// Labels shown while the slider moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderPreview {
    /// Amount label on the slider handle
    pub label: String,
    /// Extra storage the donation buys
    pub extra_space: String,
}

/// Donation amount slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonationSlider {
    step_size: u64,
    extra_space_per_step: u64,
}

impl DonationSlider {
    /// Create a slider granting `extra_space_per_step` bytes per step
    pub fn new(step_size: u64, extra_space_per_step: u64) -> Result<Self> {
        if step_size == 0 {
            return Err(WidgetError::InvalidStep);
        }
        Ok(Self { step_size, extra_space_per_step })
    }

    /// Handle label for an amount, e.g. `25.5 kr.`
    pub fn label(&self, amount: u64) -> String {
        format!("{} kr.", amount as f64 / 100.0)
    }

    /// Extra storage in whole megabytes for an amount
    pub fn extra_space_mb(&self, amount: u64) -> u64 {
        let steps = amount as f64 / self.step_size as f64;
        (self.extra_space_per_step as f64 * steps / 1024.0 / 1024.0).round() as u64
    }

    /// Both labels for an amount
    pub fn preview(&self, amount: u64) -> SliderPreview {
        SliderPreview {
            label: self.label(amount),
            extra_space: format!("{} MB", self.extra_space_mb(amount)),
        }
    }
}
