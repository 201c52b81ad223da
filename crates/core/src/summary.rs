//! Summary output type and its renderings.
//!
//! This module defines the [`Summary`] struct, the complete result of a
//! summarization run, and converts it to plain text, Markdown or JSON.

use std::str::FromStr;

use serde::Serialize;

use crate::extract::Page;
use crate::segment::Sentence;

/// Title shown when the page has none.
pub const UNTITLED: &str = "Untitled page";

/// Shown in place of bullets when no sentence qualified.
pub const NO_SUMMARY: &str = "No summary available.";

/// Output format options for a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Title, blank line, `- sentence` bullets.
    #[default]
    Text,
    /// Markdown heading and bullet list.
    Markdown,
    /// JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, markdown, json", s)),
        }
    }
}

/// The result of summarizing one page.
///
/// `sentences` is ordered by [`Sentence::index`] and never longer than the
/// requested count. An empty `sentences` means the page had no usable text
/// or no sentence passed the length filter; it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Page title, empty if the page has none.
    pub title: String,

    /// Source URL if known.
    pub source_url: Option<String>,

    /// Selected sentences in document order.
    pub sentences: Vec<Sentence>,

    /// Number of sentences that passed the length filter.
    pub candidate_count: usize,

    /// Full extracted text of the page.
    pub text: String,
}

impl Summary {
    /// Creates a new Summary from an extracted page and the selected sentences.
    pub fn new(page: Page, sentences: Vec<Sentence>, candidate_count: usize, source_url: Option<String>) -> Self {
        Self { title: page.title, source_url, sentences, candidate_count, text: page.text }
    }

    /// True when no sentence was selected.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Title for display, with a placeholder for untitled pages.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { UNTITLED } else { &self.title }
    }

    /// Converts the summary to the specified format.
    ///
    /// With `include_text`, the full extracted text follows the summary
    /// (ignored for JSON, which always carries it).
    pub fn to_format(&self, format: OutputFormat, include_text: bool) -> String {
        match format {
            OutputFormat::Text => self.to_text(include_text),
            OutputFormat::Markdown => self.to_markdown(include_text),
            OutputFormat::Json => self.to_json().to_string(),
        }
    }

    /// Plain text: title, blank line, one `- ` bullet per sentence.
    pub fn to_text(&self, include_text: bool) -> String {
        let mut lines = vec![self.display_title().to_string(), String::new()];
        lines.extend(self.bullets());

        if include_text && !self.text.is_empty() {
            lines.push(String::new());
            lines.push(self.text.clone());
        }

        lines.join("\n")
    }

    /// Markdown with a heading, optional source link and bullet list.
    pub fn to_markdown(&self, include_text: bool) -> String {
        let mut lines = vec![format!("# {}", self.display_title()), String::new()];

        if let Some(url) = &self.source_url {
            lines.push(format!("Source: <{}>", url));
            lines.push(String::new());
        }

        lines.extend(self.bullets());

        if include_text && !self.text.is_empty() {
            lines.push(String::new());
            lines.push("## Extracted text".to_string());
            lines.push(String::new());
            lines.push(self.text.clone());
        }

        lines.join("\n")
    }

    /// Gets the summary as structured JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "source_url": self.source_url,
            "sentences": self.sentences,
            "candidate_count": self.candidate_count,
            "text": self.text,
        })
    }

    fn bullets(&self) -> Vec<String> {
        if self.sentences.is_empty() {
            vec![NO_SUMMARY.to_string()]
        } else {
            self.sentences.iter().map(|s| format!("- {}", s.text)).collect()
        }
    }
}
