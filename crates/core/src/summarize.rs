//! Main summarization API.
//!
//! This module wires the pipeline together: extract → segment → rank →
//! select. The main entry point is the [`Summarizer`] struct, along with
//! convenience functions like [`summarize`] and [`fetch_and_summarize`].
//!
//! # Example
//!
//! ```rust
//! use gist_core::{Summarizer, SummaryConfig};
//!
//! let html = r#"<html><head><title>Rust</title></head><body>
//!     <p>Rust is a systems programming language focused on safety.</p>
//!     <p>The Rust compiler checks memory safety at compile time.</p>
//! </body></html>"#;
//!
//! let config = SummaryConfig::builder().sentences(1).build();
//! let summary = Summarizer::with_config(config).summarize_html(html).unwrap();
//! assert_eq!(summary.title, "Rust");
//! assert_eq!(summary.sentences.len(), 1);
//! ```

use crate::extract::{ExtractConfig, Page, extract_page_with_config};
#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};
use crate::fetch::parse_url;
use crate::rank::{Counting, RankConfig, Scoring, rank};
use crate::segment::{DEFAULT_MIN_CHARS, segment};
use crate::select::{DEFAULT_SENTENCES, select_top};
use crate::summary::Summary;
use crate::{GistError, Result};

/// Configuration for a summarization run.
///
/// # Example
///
/// ```rust
/// use gist_core::SummaryConfig;
///
/// let config = SummaryConfig::builder()
///     .sentences(3)
///     .min_chars(20)
///     .build();
/// assert_eq!(config.sentences, 3);
/// ```
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Maximum number of summary sentences (default: 5, must be at least 1).
    pub sentences: usize,

    /// Minimum sentence length in characters (default: 40).
    pub min_chars: usize,

    /// Frequency counting and scoring options.
    pub rank: RankConfig,

    /// Extraction options.
    pub extract: ExtractConfig,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            sentences: DEFAULT_SENTENCES,
            min_chars: DEFAULT_MIN_CHARS,
            rank: RankConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

impl SummaryConfig {
    /// Creates a new builder for SummaryConfig.
    pub fn builder() -> SummaryConfigBuilder {
        SummaryConfigBuilder::new()
    }

    /// Checks that the configuration can produce a summary.
    ///
    /// # Errors
    ///
    /// Returns [`GistError::InvalidSentenceCount`] when `sentences` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.sentences == 0 {
            return Err(GistError::InvalidSentenceCount(self.sentences));
        }
        Ok(())
    }
}

/// Builder for SummaryConfig.
pub struct SummaryConfigBuilder {
    config: SummaryConfig,
}

impl SummaryConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SummaryConfig::default() }
    }

    /// Sets the number of summary sentences.
    pub fn sentences(mut self, value: usize) -> Self {
        self.config.sentences = value;
        self
    }

    /// Sets the minimum sentence length.
    pub fn min_chars(mut self, value: usize) -> Self {
        self.config.min_chars = value;
        self
    }

    /// Sets how token frequencies are counted.
    pub fn counting(mut self, value: Counting) -> Self {
        self.config.rank.counting = value;
        self
    }

    /// Sets how sentence scores are computed.
    pub fn scoring(mut self, value: Scoring) -> Self {
        self.config.rank.scoring = value;
        self
    }

    /// Sets the extraction options.
    pub fn extract(mut self, value: ExtractConfig) -> Self {
        self.config.extract = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> SummaryConfig {
        self.config
    }
}

impl Default for SummaryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for summarization.
///
/// A Summarizer holds only immutable configuration; every call runs the full
/// pipeline independently, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    config: SummaryConfig,
}

impl Summarizer {
    /// Creates a new Summarizer with default settings.
    pub fn new() -> Self {
        Self { config: SummaryConfig::default() }
    }

    /// Creates a new Summarizer with a custom configuration.
    pub fn with_config(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Summarizes an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`GistError::InvalidSentenceCount`] if the configuration asks
    /// for zero sentences. Pages without usable text give an empty summary.
    pub fn summarize_html(&self, html: &str) -> Result<Summary> {
        self.config.validate()?;
        let page = extract_page_with_config(html, &self.config.extract);
        self.summarize_page_with_source(page, None)
    }

    /// Summarizes HTML that was retrieved from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`GistError::InvalidUrl`] if the URL is invalid.
    pub fn summarize_html_with_url(&self, html: &str, url: &str) -> Result<Summary> {
        self.config.validate()?;
        parse_url(url)?;
        let page = extract_page_with_config(html, &self.config.extract);
        self.summarize_page_with_source(page, Some(url.to_string()))
    }

    /// Summarizes an already extracted page.
    pub fn summarize_page(&self, page: &Page) -> Result<Summary> {
        self.config.validate()?;
        self.summarize_page_with_source(page.clone(), None)
    }

    fn summarize_page_with_source(&self, page: Page, source_url: Option<String>) -> Result<Summary> {
        if page.is_empty() {
            tracing::debug!(source = ?source_url, "page has no extractable text");
        }

        let candidates = segment(&page.text, self.config.min_chars);
        let scored = rank(&candidates, &self.config.rank);
        let selected = select_top(&scored, self.config.sentences);

        tracing::debug!(candidates = candidates.len(), selected = selected.len(), "selected summary sentences");

        Ok(Summary::new(page, selected, candidates.len(), source_url))
    }

    /// Fetch a URL and summarize it using the default fetch config.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_summarize(&self, url: &str) -> Result<Summary> {
        self.fetch_and_summarize_with_config(url, &FetchConfig::default()).await
    }

    /// Fetch a URL and summarize it with a custom fetch config.
    ///
    /// The configuration is validated before any network traffic.
    ///
    /// # Errors
    ///
    /// Any fetch error from [`fetch_url`], or an invalid configuration.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_summarize_with_config(&self, url: &str, fetch_config: &FetchConfig) -> Result<Summary> {
        self.config.validate()?;
        let html = fetch_url(url, fetch_config).await?;
        self.summarize_html_with_url(&html, url)
    }
}

/// Convenience function for one-liner summarization with defaults.
pub fn summarize(html: &str) -> Result<Summary> {
    Summarizer::new().summarize_html(html)
}

/// Convenience function: fetch and summarize a URL with default configurations.
///
/// # Example
///
/// ```no_run
/// use gist_core::fetch_and_summarize;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let summary = fetch_and_summarize("https://example.com/article").await?;
///     println!("{}", summary.to_text(false));
///     Ok(())
/// }
/// ```
#[cfg(feature = "fetch")]
pub async fn fetch_and_summarize(url: &str) -> Result<Summary> {
    Summarizer::new().fetch_and_summarize(url).await
}

/// Convenience function: fetch and summarize with custom configurations.
#[cfg(feature = "fetch")]
pub async fn fetch_and_summarize_with_config(
    url: &str, summary_config: &SummaryConfig, fetch_config: &FetchConfig,
) -> Result<Summary> {
    let summarizer = Summarizer::with_config(summary_config.clone());
    summarizer.fetch_and_summarize_with_config(url, fetch_config).await
}
