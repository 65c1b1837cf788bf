//! Live fragment refresh
//!
//! Listens for push events on a topic, fetches a freshly rendered page
//! fragment and swaps it into the page. A fragment element carrying a
//! pipeline marker has that pipeline run over the new markup first. The transport delivering
//! push events and the HTTP client fetching fragments live with the host.

use crate::locator::{ElementId, ElementLocator};
use crate::runner::{HostConfig, Pipeline, Pipelines};
use async_trait::async_trait;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tokio::sync::broadcast;

/// Errors raised while refreshing a fragment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The fragment could not be fetched
    #[error("Failed to fetch fragment: {0}")]
    FetchFailed(String),

    /// The page has no element for the fragment
    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),

    /// The push event channel was closed
    #[error("Push channel closed")]
    ChannelClosed,
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// A message delivered by the push transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    /// Channel topic, e.g. `notifications:42`
    pub topic: String,
    /// Event name on the topic
    pub event: String,
    /// Event payload
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl PushEvent {
    /// Create an event with an empty payload
    pub fn new(topic: impl Into<String>, event: impl Into<String>) -> Self {
        Self { topic: topic.into(), event: event.into(), payload: serde_json::Value::Null }
    }
}

/// Fetches freshly rendered fragments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Fetch the current markup of a fragment
    async fn fetch(&self, fragment: &ElementId) -> Result<String>;
}

/// What to listen for and what to refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveConfig {
    /// Topic to listen on
    pub topic: String,
    /// Event name that triggers a refresh
    #[serde(default = "default_event")]
    pub event: String,
    /// Fragment to refetch and replace
    #[serde(default = "default_fragment")]
    pub fragment: ElementId,
    /// Ids of the links whose badges hold unread counters
    #[serde(default = "default_badge_links")]
    pub badge_links: Vec<String>,
    /// Suppress the notification sound
    #[serde(default)]
    pub muted: bool,
}

fn default_event() -> String {
    "notification".to_string()
}

fn default_fragment() -> ElementId {
    ElementId::new("navbar")
}

fn default_badge_links() -> Vec<String> {
    vec![
        "nav-link-unread-messages".to_string(),
        "nav-link-notifications".to_string(),
        "nav-link-pending-friendships".to_string(),
    ]
}

impl LiveConfig {
    /// Listen for notifications addressed to a user
    pub fn for_user(user_id: impl std::fmt::Display) -> Self {
        Self {
            topic: format!("notifications:{user_id}"),
            event: default_event(),
            fragment: default_fragment(),
            badge_links: default_badge_links(),
            muted: false,
        }
    }

    /// Refresh another fragment
    pub fn with_fragment(mut self, fragment: impl Into<ElementId>) -> Self {
        self.fragment = fragment.into();
        self
    }

    /// Mute or unmute the notification sound
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Whether a push event is the one this refresher reacts to
    pub fn matches(&self, event: &PushEvent) -> bool {
        event.topic == self.topic && event.event == self.event
    }
}

/// Result of one completed refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    /// The fragment that was replaced
    pub fragment: ElementId,
    /// Sum of the unread counters in the new fragment
    pub badge_total: u32,
    /// Whether the host should play the notification sound
    pub play_sound: bool,
}

/// Leading decimal digits of a counter, or 0
fn parse_counter(text: &str) -> u32 {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn badge_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"class="(?:[^"]*\s)?badge(?:\s[^"]*)?"[^>]*>([^<]*)<"#).unwrap()
    })
}

/// Reads unread counters out of the badges of a fixed set of links
#[derive(Debug, Clone)]
pub struct BadgeCounter {
    links: Vec<Regex>,
}

impl BadgeCounter {
    /// Compile the lookups for the given link ids
    pub fn new(badge_links: &[String]) -> Self {
        let links = badge_links
            .iter()
            .filter_map(|link| {
                let pattern = format!(r#"<([A-Za-z][A-Za-z0-9]*)\b[^>]*\sid="{}"[^>]*>"#, regex::escape(link));
                match Regex::new(&pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!(link = %link, error = %e, "invalid badge link id");
                        None
                    }
                }
            })
            .collect();
        Self { links }
    }

    /// Markup between a link's opening tag and its closing tag
    fn link_body<'h>(re: &Regex, markup: &'h str) -> Option<&'h str> {
        let caps = re.captures(markup)?;
        let open = caps.get(0)?;
        let tag = caps.get(1)?.as_str();
        let rest = &markup[open.end()..];
        let close = format!("</{tag}>");
        let end = rest.find(&close).unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// Sum the counters; links without a badge count as 0
    pub fn total(&self, markup: &str) -> u32 {
        self.links
            .iter()
            .filter_map(|re| Self::link_body(re, markup))
            .filter_map(|body| badge_regex().captures(body).and_then(|caps| caps.get(1)))
            .map(|m| parse_counter(m.as_str()))
            .fold(0u32, u32::saturating_add)
    }
}

/// Sum the badge counters of the given links in a rendered fragment
///
/// Only a `badge` element inside a link counts towards it. Missing badges and
/// non-numeric counters count as 0.
pub fn badge_total(markup: &str, badge_links: &[String]) -> u32 {
    BadgeCounter::new(badge_links).total(markup)
}

/// Refreshes a page fragment whenever a matching push event arrives
pub struct LiveRefresher<P, S> {
    page: Arc<RwLock<P>>,
    source: S,
    pipelines: Pipelines,
    markers: HostConfig,
    config: LiveConfig,
    badges: BadgeCounter,
    outcomes: broadcast::Sender<RefreshOutcome>,
}

impl<P, S> LiveRefresher<P, S>
where
    P: ElementLocator + Send + Sync,
    S: FragmentSource,
{
    /// Create a refresher for a shared page
    ///
    /// The fragment is rewritten only by the pipelines whose marker it
    /// carries on the page; an unmarked fragment is swapped in as fetched.
    pub fn new(page: Arc<RwLock<P>>, source: S, pipelines: Pipelines, config: LiveConfig) -> Self {
        let (outcomes, _) = broadcast::channel(16);
        let badges = BadgeCounter::new(&config.badge_links);
        Self { page, source, pipelines, markers: HostConfig::default(), config, badges, outcomes }
    }

    /// Use other marker classes
    pub fn with_host_config(mut self, markers: HostConfig) -> Self {
        self.markers = markers;
        self
    }

    fn marked_pipelines(&self, fragment: &ElementId) -> Vec<Pipeline> {
        let page = self.page.read();
        let mut pipelines = Vec::new();
        if page.find_marked(&self.markers.embeds_marker).contains(fragment) {
            pipelines.push(Pipeline::Embeds);
        }
        if page.find_marked(&self.markers.mentions_marker).contains(fragment) {
            pipelines.push(Pipeline::Mentions);
        }
        pipelines
    }

    /// Listening configuration
    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    /// Subscribe to completed refreshes
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshOutcome> {
        self.outcomes.subscribe()
    }

    /// Handle one push event
    ///
    /// Returns `Ok(None)` for events this refresher does not listen to.
    pub async fn handle(&self, event: &PushEvent) -> Result<Option<RefreshOutcome>> {
        if !self.config.matches(event) {
            tracing::trace!(topic = %event.topic, event = %event.event, "ignoring push event");
            return Ok(None);
        }

        let fragment = &self.config.fragment;
        let markup = self.source.fetch(fragment).await?;
        let rewritten = self
            .marked_pipelines(fragment)
            .into_iter()
            .fold(markup, |content, pipeline| self.pipelines.apply(pipeline, &content));
        let badge_total = self.badges.total(&rewritten);

        {
            let mut page = self.page.write();
            if !page.replace_fragment(fragment, rewritten) {
                return Err(HostError::UnknownFragment(fragment.to_string()));
            }
        }

        let outcome = RefreshOutcome {
            fragment: fragment.clone(),
            badge_total,
            play_sound: !self.config.muted,
        };
        tracing::debug!(fragment = %fragment, badge_total, "fragment refreshed");
        // No subscribers is fine
        let _ = self.outcomes.send(outcome.clone());
        Ok(Some(outcome))
    }

    /// Receive and handle the next push event
    ///
    /// Returns [`HostError::ChannelClosed`] once the sending side is gone.
    /// Dropped events are logged and reported as `Ok(None)`.
    pub async fn step(&self, events: &mut broadcast::Receiver<PushEvent>) -> Result<Option<RefreshOutcome>> {
        match events.recv().await {
            Ok(event) => self.handle(&event).await,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "push events dropped");
                Ok(None)
            }
            Err(broadcast::error::RecvError::Closed) => Err(HostError::ChannelClosed),
        }
    }

    /// Process push events until the channel closes
    pub async fn run(self, mut events: broadcast::Receiver<PushEvent>) {
        tracing::info!(topic = %self.config.topic, "live refresh started");
        loop {
            match self.step(&mut events).await {
                Ok(_) => {}
                Err(HostError::ChannelClosed) => break,
                Err(e) => {
                    tracing::warn!(error = %e, fragment = %self.config.fragment, "refresh failed");
                }
            }
        }
        tracing::info!(topic = %self.config.topic, "live refresh stopped");
    }
}
