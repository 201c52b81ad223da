//! HTML parsing.
//!
//! This module provides the [`Document`] type, a tolerant parse of an HTML
//! page that can be queried for its title and body.
//!
//! # Example
//!
//! ```rust
//! use gist_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title>  A   Title </title></head>
//!         <body><p>Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("A Title".to_string()));
//! assert!(doc.body().is_some());
//! ```

use scraper::{ElementRef, Html, Selector};

/// Represents a parsed HTML document.
///
/// Parsing never fails: malformed markup is repaired the way browsers do it,
/// so every document has an `<html>`, `<head>` and `<body>`.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the raw HTML representation.
    ///
    /// Returns a reference to the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the title of the document.
    ///
    /// Returns the whitespace-collapsed text of the first `<title>` element,
    /// or `None` if there is no title or it is blank.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let element = self.html.select(&selector).next()?;
        let title = collapse_whitespace(&element.text().collect::<String>());

        (!title.is_empty()).then_some(title)
    }

    /// Gets the `<body>` element.
    pub fn body(&self) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("body").ok()?;
        self.html.select(&selector).next()
    }
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
