//! Readable text extraction.
//!
//! Turns raw HTML into a [`Page`]: a best-effort title plus the plain text
//! of every content text node under `<body>`, in document order.

use scraper::ElementRef;
use serde::Serialize;

use crate::parse::{Document, collapse_whitespace};
use crate::preprocess::{PreprocessConfig, preprocess_html};

/// Configuration for content extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Preprocessing configuration; its tag list also filters the tree walk
    pub preprocess: PreprocessConfig,
}

/// Title and plain text of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Text of the `<title>` element, empty if there is none.
    pub title: String,
    /// Body text with whitespace runs collapsed to single spaces.
    pub text: String,
}

impl Page {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into() }
    }

    /// True when the page has no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Extracts a [`Page`] using the default configuration.
pub fn extract_page(html: &str) -> Page {
    extract_page_with_config(html, &ExtractConfig::default())
}

/// Extracts a [`Page`] from HTML.
///
/// Never fails: malformed markup is parsed tolerantly and a page without a
/// title or text yields empty strings.
pub fn extract_page_with_config(html: &str, config: &ExtractConfig) -> Page {
    let cleaned = preprocess_html(html, &config.preprocess);
    let doc = Document::parse(&cleaned);

    let title = doc.title().unwrap_or_default();
    let text = match doc.body() {
        Some(body) => content_text(body, &config.preprocess),
        None => String::new(),
    };

    tracing::debug!(title = %title, chars = text.chars().count(), "extracted page text");

    Page { title, text }
}

/// Elements that start a new run of text; text inside one never glues to text outside it.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "body", "dd", "div", "dl", "dt", "figcaption", "figure", "h1", "h2", "h3",
    "h4", "h5", "h6", "li", "main", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Joins the text nodes below `root`, skipping anything inside a removed tag.
///
/// Text nodes within the same block element are concatenated as-is so inline
/// markup does not introduce spaces; crossing a block boundary or a `<br>`
/// inserts one.
fn content_text(root: ElementRef<'_>, config: &PreprocessConfig) -> String {
    let mut output = String::new();
    let mut last_block = None;

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let mut block = None;
        let mut removed = false;
        for el in node.ancestors().filter_map(ElementRef::wrap) {
            let name = el.value().name();
            if config.is_removed(name) {
                removed = true;
                break;
            }
            if block.is_none() && BLOCK_TAGS.contains(&name) {
                block = Some(el.id());
            }
        }
        if removed {
            continue;
        }

        let after_break = node
            .prev_sibling()
            .and_then(ElementRef::wrap)
            .is_some_and(|el| el.value().name() == "br");

        if block != last_block || after_break {
            output.push(' ');
        }
        output.push_str(text);
        last_block = block;
    }

    collapse_whitespace(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_HTML: &str = r##"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Test Article</title>
            <style>.lead { font-weight: bold; }</style>
            <script>var tracking = "secret";</script>
        </head>
        <body>
            <header><h1>My Blog</h1></header>
            <nav><a href="/">Home</a> <a href="/about">About</a></nav>
            <article>
                <p class="lead">First   paragraph
                    with <em>emphasis</em>.</p>
                <p>Second paragraph.</p>
            </article>
            <aside>Sponsored</aside>
            <footer>All rights reserved</footer>
            <script>document.write("late script");</script>
        </body>
        </html>
    "##;

    #[test]
    fn test_extract_title_and_text() {
        let page = extract_page(ARTICLE_HTML);
        assert_eq!(page.title, "Test Article");
        assert_eq!(page.text, "First paragraph with emphasis. Second paragraph.");
    }

    #[test]
    fn test_extract_never_contains_script_or_style() {
        let page = extract_page(ARTICLE_HTML);
        for gone in ["secret", "late script", "font-weight", "My Blog", "Home", "Sponsored", "All rights reserved"] {
            assert!(!page.text.contains(gone), "{} leaked into text", gone);
        }
    }

    #[test]
    fn test_hidden_elements_kept_when_configured() {
        let config = ExtractConfig { preprocess: PreprocessConfig { remove_hidden: false, ..Default::default() } };
        let html = r#"<body><div style="display:none">Hidden</div><p>Kept</p><script>dropped()</script></body>"#;

        assert_eq!(extract_page_with_config(html, &config).text, "Hidden Kept");
        assert_eq!(extract_page(html).text, "Kept");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let page = extract_page("<html><body><p>Only text</p></body></html>");
        assert_eq!(page.title, "");
        assert_eq!(page.text, "Only text");
    }

    #[test]
    fn test_title_not_part_of_text() {
        let page = extract_page("<html><head><title>Heading</title></head><body>Body</body></html>");
        assert_eq!(page.text, "Body");
    }

    #[test]
    fn test_empty_document() {
        let page = extract_page("");
        assert!(page.is_empty());
        assert_eq!(page.title, "");
    }

    #[test]
    fn test_malformed_html() {
        let page = extract_page("<p>Unclosed <b>bold <i>text</p><div>after");
        assert_eq!(page.text, "Unclosed bold text after");
    }

    #[test]
    fn test_adjacent_blocks_do_not_glue() {
        let page = extract_page("<body><p>One</p><p>Two</p><ul><li>Three</li></ul></body>");
        assert_eq!(page.text, "One Two Three");
    }

    #[test]
    fn test_inline_markup_joins_and_breaks_split() {
        let page = extract_page("<body><p>A <a href=\"#\">link</a>, then more.<br>Next line</p></body>");
        assert_eq!(page.text, "A link, then more. Next line");
    }
}
