//! Page runner
//!
//! Applies the embed pipeline to every element marked `embeds` and the
//! mention pipeline to every element marked `mentionable`. Each element is
//! processed at most once per page load.

use crate::locator::{ElementId, ElementLocator};
use rewrite_core::{MentionRewriter, RewriteConfig, Rewriter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker classes the runner looks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Class flagging elements for embed rewriting
    #[serde(default = "default_embeds_marker")]
    pub embeds_marker: String,
    /// Class flagging elements for mention rewriting
    #[serde(default = "default_mentions_marker")]
    pub mentions_marker: String,
}

fn default_embeds_marker() -> String {
    "embeds".to_string()
}

fn default_mentions_marker() -> String {
    "mentionable".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { embeds_marker: default_embeds_marker(), mentions_marker: default_mentions_marker() }
    }
}

impl HostConfig {
    /// Use another embeds marker
    pub fn with_embeds_marker(mut self, marker: impl Into<String>) -> Self {
        self.embeds_marker = marker.into();
        self
    }

    /// Use another mentions marker
    pub fn with_mentions_marker(mut self, marker: impl Into<String>) -> Self {
        self.mentions_marker = marker.into();
        self
    }
}

/// Which pipeline touched an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    /// Embed rewriting
    Embeds,
    /// Mention rewriting
    Mentions,
}

/// The two content transforms
#[derive(Debug, Clone)]
pub struct Pipelines {
    embeds: Rewriter,
    mentions: Option<MentionRewriter>,
}

impl Default for Pipelines {
    fn default() -> Self {
        Self { embeds: Rewriter::new(), mentions: Some(MentionRewriter::new()) }
    }
}

impl Pipelines {
    /// Build from explicit rewriters
    pub fn new(embeds: Rewriter, mentions: Option<MentionRewriter>) -> Self {
        Self { embeds, mentions }
    }

    /// Build from rewrite configuration
    pub fn from_config(config: &RewriteConfig) -> rewrite_core::config::Result<Self> {
        Ok(Self {
            embeds: Rewriter::from_config(config)?,
            mentions: MentionRewriter::from_config(&config.mentions),
        })
    }

    /// Embed rewriter
    pub fn embeds(&self) -> &Rewriter {
        &self.embeds
    }

    /// Mention rewriter, if mentions are enabled
    pub fn mentions(&self) -> Option<&MentionRewriter> {
        self.mentions.as_ref()
    }

    /// Run one pipeline over a content block
    pub fn apply(&self, pipeline: Pipeline, content: &str) -> String {
        match pipeline {
            Pipeline::Embeds => self.embeds.rewrite(content),
            Pipeline::Mentions => match &self.mentions {
                Some(mentions) => mentions.rewrite(content),
                None => content.to_string(),
            },
        }
    }

    /// Run embeds then mentions over a content block
    pub fn apply_all(&self, content: &str) -> String {
        let embedded = self.apply(Pipeline::Embeds, content);
        self.apply(Pipeline::Mentions, &embedded)
    }
}

/// What a page run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Elements whose markup the embed pipeline changed
    pub embeds_rewritten: usize,
    /// Elements whose markup the mention pipeline changed
    pub mentions_rewritten: usize,
    /// Elements processed but left as they were
    pub unchanged: usize,
    /// Elements skipped because they were already processed this page load
    pub skipped: usize,
    /// Marked elements whose markup could not be read
    #[serde(default)]
    pub missing: usize,
}

impl RunReport {
    /// Whether anything on the page changed
    pub fn changed(&self) -> bool {
        self.embeds_rewritten + self.mentions_rewritten > 0
    }
}

/// Runs the pipelines over a page, once per element per page load
#[derive(Debug, Clone, Default)]
pub struct PageRunner {
    config: HostConfig,
    pipelines: Pipelines,
    processed: HashSet<(Pipeline, ElementId)>,
}

impl PageRunner {
    /// Create a runner from host and rewrite configuration
    pub fn new(config: HostConfig, rewrite: &RewriteConfig) -> rewrite_core::config::Result<Self> {
        Ok(Self::with_pipelines(config, Pipelines::from_config(rewrite)?))
    }

    /// Create a runner from prepared pipelines
    pub fn with_pipelines(config: HostConfig, pipelines: Pipelines) -> Self {
        Self { config, pipelines, processed: HashSet::new() }
    }

    /// Host configuration
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The pipelines this runner applies
    pub fn pipelines(&self) -> &Pipelines {
        &self.pipelines
    }

    /// Whether an element was already processed by a pipeline
    pub fn is_processed(&self, pipeline: Pipeline, id: &ElementId) -> bool {
        self.processed.contains(&(pipeline, id.clone()))
    }

    /// Start a new page load
    pub fn reset(&mut self) {
        self.processed.clear();
    }

    /// Process every marked element not yet seen this page load
    pub fn run<L: ElementLocator + ?Sized>(&mut self, page: &mut L) -> RunReport {
        let mut report = RunReport::default();

        let embeds_marker = self.config.embeds_marker.clone();
        let mentions_marker = self.config.mentions_marker.clone();
        self.run_pipeline(page, Pipeline::Embeds, &embeds_marker, &mut report);
        if self.pipelines.mentions.is_some() {
            self.run_pipeline(page, Pipeline::Mentions, &mentions_marker, &mut report);
        }

        tracing::info!(
            embeds = report.embeds_rewritten,
            mentions = report.mentions_rewritten,
            unchanged = report.unchanged,
            skipped = report.skipped,
            missing = report.missing,
            "page run complete"
        );
        report
    }

    fn run_pipeline<L: ElementLocator + ?Sized>(
        &mut self,
        page: &mut L,
        pipeline: Pipeline,
        marker: &str,
        report: &mut RunReport,
    ) {
        for id in page.find_marked(marker) {
            if self.is_processed(pipeline, &id) {
                report.skipped += 1;
                continue;
            }

            let Some(content) = page.inner_html(&id) else {
                tracing::debug!(element = %id, "marked element vanished before processing");
                report.missing += 1;
                continue;
            };
            self.processed.insert((pipeline, id.clone()));

            let rewritten = self.pipelines.apply(pipeline, &content);
            if rewritten == content {
                report.unchanged += 1;
                continue;
            }

            page.set_inner_html(&id, rewritten);
            match pipeline {
                Pipeline::Embeds => report.embeds_rewritten += 1,
                Pipeline::Mentions => report.mentions_rewritten += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, StaticPage};
    use rewrite_core::EmbedProvider;

    fn page() -> StaticPage {
        StaticPage::new()
            .with_element(Element::new("post", "[vimeo]76979871[/vimeo] by @alice").with_class("embeds"))
            .with_element(Element::new("comment", "ping @bob").with_class("mentionable"))
            .with_element(Element::new("sidebar", "[giphy]abc[/giphy] @carol"))
            .with_element(
                Element::new("both", "[youtube]dQw4w9WgXcQ[/youtube] @dave")
                    .with_class("embeds")
                    .with_class("mentionable"),
            )
    }

    #[test]
    fn test_host_config_defaults() {
        let config: HostConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.embeds_marker, "embeds");
        assert_eq!(config.mentions_marker, "mentionable");

        let config: HostConfig = serde_json::from_str(r#"{"embedsMarker": "rich"}"#).unwrap();
        assert_eq!(config.embeds_marker, "rich");
        assert_eq!(config.mentions_marker, "mentionable");
    }

    #[test]
    fn test_run_rewrites_marked_elements_only() {
        let mut page = page();
        let mut runner = PageRunner::default();
        let report = runner.run(&mut page);

        assert_eq!(report.embeds_rewritten, 2);
        assert_eq!(report.mentions_rewritten, 2);
        assert!(report.changed());

        let post = page.html("post").unwrap();
        assert!(post.contains("player.vimeo.com/video/76979871"));
        // not mentionable
        assert!(post.ends_with(" by @alice"));

        assert_eq!(page.html("comment"), Some(r#"ping <a href="/usernames/bob">bob</a>"#));
        assert_eq!(page.html("sidebar"), Some("[giphy]abc[/giphy] @carol"));

        let both = page.html("both").unwrap();
        assert!(both.contains("youtube-nocookie.com/embed/dQw4w9WgXcQ"));
        assert!(both.ends_with(r#"<a href="/usernames/dave">dave</a>"#));
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut page = page();
        let mut runner = PageRunner::default();
        runner.run(&mut page);
        let after_first = page.clone();

        // reintroduce raw text into an already processed element
        page.set_inner_html(&"comment".into(), "again @erin".to_string());
        let report = runner.run(&mut page);

        assert!(!report.changed());
        assert_eq!(report.skipped, 4);
        assert_eq!(page.html("comment"), Some("again @erin"));
        assert_eq!(page.html("post"), after_first.html("post"));
    }

    #[test]
    fn test_reset_starts_new_page_load() {
        let mut page = page();
        let mut runner = PageRunner::default();
        runner.run(&mut page);
        assert!(runner.is_processed(Pipeline::Mentions, &"comment".into()));

        page.set_inner_html(&"comment".into(), "again @erin".to_string());
        runner.reset();
        assert!(!runner.is_processed(Pipeline::Mentions, &"comment".into()));

        let report = runner.run(&mut page);
        assert_eq!(report.mentions_rewritten, 1);
        assert_eq!(page.html("comment"), Some(r#"again <a href="/usernames/erin">erin</a>"#));
    }

    #[test]
    fn test_elements_added_later_are_processed() {
        let mut page = page();
        let mut runner = PageRunner::default();
        runner.run(&mut page);

        page.push(Element::new("late", "[imgur]AbCdE[/imgur]").with_class("embeds"));
        let report = runner.run(&mut page);
        assert_eq!(report.embeds_rewritten, 1);
        assert!(page.html("late").unwrap().contains(r#"data-id="a/AbCdE""#));
    }

    /// Locator whose elements can disappear between lookup and read
    struct VanishingPage {
        page: StaticPage,
        gone: Option<ElementId>,
    }

    impl ElementLocator for VanishingPage {
        fn find_marked(&self, marker: &str) -> Vec<ElementId> {
            self.page.find_marked(marker)
        }

        fn inner_html(&self, id: &ElementId) -> Option<String> {
            if self.gone.as_ref() == Some(id) {
                return None;
            }
            self.page.inner_html(id)
        }

        fn set_inner_html(&mut self, id: &ElementId, html: String) -> bool {
            self.page.set_inner_html(id, html)
        }

        fn replace_fragment(&mut self, id: &ElementId, html: String) -> bool {
            self.page.replace_fragment(id, html)
        }
    }

    #[test]
    fn test_vanished_element_is_counted_and_retried() {
        let mut page = VanishingPage {
            page: StaticPage::new().with_element(Element::new("late", "[vimeo]5[/vimeo]").with_class("embeds")),
            gone: Some(ElementId::new("late")),
        };
        let mut runner = PageRunner::default();

        let report = runner.run(&mut page);
        assert_eq!(report.missing, 1);
        assert_eq!(report.embeds_rewritten, 0);
        assert!(!runner.is_processed(Pipeline::Embeds, &"late".into()));

        page.gone = None;
        let report = runner.run(&mut page);
        assert_eq!(report.missing, 0);
        assert_eq!(report.embeds_rewritten, 1);
        assert!(page.page.html("late").unwrap().contains("player.vimeo.com/video/5"));
    }

    #[test]
    fn test_unchanged_elements_are_counted() {
        let mut page = StaticPage::new().with_element(Element::new("plain", "nothing here").with_class("embeds"));
        let report = PageRunner::default().run(&mut page);
        assert_eq!(report.unchanged, 1);
        assert!(!report.changed());
    }

    #[test]
    fn test_custom_markers_and_config() {
        let rewrite = RewriteConfig::default()
            .with_providers(vec![EmbedProvider::Giphy])
            .with_mentions(rewrite_core::MentionConfig {
                enabled: false,
                base_path: "/usernames".to_string(),
            });
        let config = HostConfig::default().with_embeds_marker("rich");
        let mut runner = PageRunner::new(config, &rewrite).unwrap();

        let mut page = StaticPage::new()
            .with_element(Element::new("a", "[giphy]abc[/giphy] [vimeo]1[/vimeo]").with_class("rich"))
            .with_element(Element::new("b", "@frank").with_class("mentionable"));
        let report = runner.run(&mut page);

        assert_eq!(report.embeds_rewritten, 1);
        assert_eq!(report.mentions_rewritten, 0);
        let a = page.html("a").unwrap();
        assert!(a.contains("giphy.com/embed/abc"));
        assert!(a.ends_with("[vimeo]1[/vimeo]"));
        assert_eq!(page.html("b"), Some("@frank"));
    }

    #[test]
    fn test_apply_all_runs_embeds_then_mentions() {
        let pipelines = Pipelines::default();
        let out = pipelines.apply_all("[soundcloud]123[/soundcloud] @gina");
        assert!(out.starts_with("<iframe"));
        assert!(out.ends_with(r#"<a href="/usernames/gina">gina</a>"#));
    }
}
