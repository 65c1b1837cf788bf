//! Select with a free-text fallback
//!
//! A select whose list of options is extended with a "custom" entry. Picking
//! that entry reveals a text input holding the custom value. A stored value
//! that matches no option is treated as custom.

use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};

/// Option value standing for "use the custom input"
pub const CUSTOM_OPTION_VALUE: &str = "%%CUSTOM%%";

/// One select option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Text shown
    pub label: String,
}

impl SelectOption {
    /// Create an option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// State of a select with a custom entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectWithCustom {
    options: Vec<SelectOption>,
    selected: String,
    custom_value: String,
    custom_input_visible: bool,
}

impl SelectWithCustom {
    /// Build the select for a stored value
    ///
    /// The custom entry is appended after `options`.
    pub fn new(options: Vec<SelectOption>, custom_label: impl Into<String>, stored_value: &str) -> Self {
        let predefined = options.iter().any(|o| o.value == stored_value);
        let mut options = options;
        options.push(SelectOption::new(CUSTOM_OPTION_VALUE, custom_label));

        if predefined {
            Self {
                options,
                selected: stored_value.to_string(),
                custom_value: String::new(),
                custom_input_visible: false,
            }
        } else {
            Self {
                options,
                selected: CUSTOM_OPTION_VALUE.to_string(),
                custom_value: stored_value.to_string(),
                custom_input_visible: true,
            }
        }
    }

    /// Options including the custom entry
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Value of the selected option
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Whether the custom entry is selected
    pub fn is_custom(&self) -> bool {
        self.selected == CUSTOM_OPTION_VALUE
    }

    /// Whether the custom text input is shown
    pub fn custom_input_visible(&self) -> bool {
        self.custom_input_visible
    }

    /// Contents of the custom text input
    pub fn custom_value(&self) -> &str {
        &self.custom_value
    }

    /// The user picked an option
    pub fn on_change(&mut self, value: &str) -> Result<()> {
        if !self.options.iter().any(|o| o.value == value) {
            return Err(WidgetError::UnknownOption(value.to_string()));
        }
        self.selected = value.to_string();
        self.custom_input_visible = self.is_custom();
        Ok(())
    }

    /// The user typed into the custom input
    pub fn set_custom_value(&mut self, value: impl Into<String>) {
        self.custom_value = value.into();
    }

    /// The value the form submits
    pub fn value(&self) -> &str {
        if self.is_custom() {
            &self.custom_value
        } else {
            &self.selected
        }
    }
}
