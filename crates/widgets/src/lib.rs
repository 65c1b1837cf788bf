//! Widget models
//!
//! Typed configuration and state for the interactive widgets that sit next to
//! rewritten content: the post editor, event date pickers, mention
//! autocomplete, donation checkout, photo uploads and sorting, and selects
//! with a custom value.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checkout;
pub mod date_picker;
pub mod editor;
pub mod error;
pub mod mentionable;
pub mod photo_sorter;
pub mod photo_upload;
pub mod select_with_custom;

pub use checkout::{parse_amount, CheckoutConfig, DonationSlider, SliderPreview};
pub use date_picker::{DatePickerConfig, EventSchedule};
pub use editor::{EditorAction, EditorConfig};
pub use error::{Result, WidgetError};
pub use mentionable::{tributes_from_meta, MentionableConfig, Tribute};
pub use photo_sorter::{PhotoSorter, PhotoTile, Reposition, RepositionRequest};
pub use photo_upload::PhotoUploadConfig;
pub use select_with_custom::{SelectOption, SelectWithCustom, CUSTOM_OPTION_VALUE};
