//! Page integration for content rewriting
//!
//! Runs the embed and mention pipelines over the marked elements of a page
//! and keeps live fragments fresh as push events arrive.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod live;
pub mod locator;
pub mod page;
pub mod runner;

pub use live::{
    badge_total, BadgeCounter, FragmentSource, HostError, LiveConfig, LiveRefresher, PushEvent, RefreshOutcome,
};
pub use locator::{ElementId, ElementLocator};
pub use page::{Element, StaticPage};
pub use runner::{HostConfig, PageRunner, Pipeline, Pipelines, RunReport};
