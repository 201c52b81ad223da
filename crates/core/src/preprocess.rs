//! HTML cleanup ahead of parsing.
//!
//! Streams the raw markup through lol_html to drop elements that never carry
//! readable text (scripts, navigation, forms and the like), HTML comments, and
//! elements hidden with an inline style.

use std::borrow::Cow;
use std::sync::LazyLock;

use lol_html::html_content::Element;
use regex::Regex;

/// Elements whose content is never part of a page's readable text.
pub const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe", "svg", "canvas", "template",
];

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("hidden style pattern"));

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Tag names removed together with everything inside them
    pub remove_tags: Vec<String>,
    /// Whether to remove HTML comments
    pub remove_comments: bool,
    /// Whether to remove elements hidden with an inline style
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_tags: NON_CONTENT_TAGS.iter().map(|tag| tag.to_string()).collect(),
            remove_comments: true,
            remove_hidden: true,
        }
    }
}

impl PreprocessConfig {
    /// Whether `tag` is configured for removal (case-insensitive).
    pub fn is_removed(&self, tag: &str) -> bool {
        self.remove_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Preprocess HTML by removing non-content elements before parsing
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut processed = if config.remove_comments { remove_comments(html) } else { html.to_string() };

    if !config.remove_tags.is_empty() {
        processed = remove_tags(&processed, &config.remove_tags);
    }

    if config.remove_hidden {
        processed = remove_hidden_elements(&processed);
    }

    processed
}

/// Parses a configured tag name into a selector. Anything that is not a plain
/// tag name, or that lol_html rejects, is skipped with a warning.
fn tag_selector(tag: &str) -> Option<lol_html::Selector> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        tracing::warn!(tag, "ignoring invalid tag name");
        return None;
    }
    match tag.parse::<lol_html::Selector>() {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(tag, error = %e, "ignoring invalid tag name");
            None
        }
    }
}

/// Remove the listed elements and their content
fn remove_tags(html: &str, tags: &[String]) -> String {
    let selectors: Vec<lol_html::Selector> = tags.iter().filter_map(|tag| tag_selector(tag)).collect();

    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: selectors
                .into_iter()
                .map(|selector| {
                    let handlers = lol_html::ElementContentHandlers::default().element(
                        |el: &mut Element<'_, '_>| -> lol_html::HandlerResult {
                            el.remove();
                            Ok(())
                        },
                    );
                    (Cow::Owned(selector), handlers)
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::warn!(error = %e, "tag removal failed, keeping unmodified markup");
        return html.to_string();
    }

    if let Err(e) = rewriter.end() {
        tracing::warn!(error = %e, "tag removal failed, keeping unmodified markup");
        return html.to_string();
    }

    into_string(output)
}

fn into_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Remove HTML comments from the document
fn remove_comments(html: &str) -> String {
    COMMENT.replace_all(html, "").into_owned()
}

/// Remove elements with display:none or visibility:hidden styles
fn remove_hidden_elements(html: &str) -> String {
    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("*[style]", |el| {
                if let Some(style) = el.get_attribute("style")
                    && HIDDEN_STYLE.is_match(&style)
                {
                    el.remove();
                }
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::warn!(error = %e, "hidden element removal failed, keeping unmodified markup");
        return html.to_string();
    }

    if let Err(e) = rewriter.end() {
        tracing::warn!(error = %e, "hidden element removal failed, keeping unmodified markup");
        return html.to_string();
    }

    into_string(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_non_content_tags() {
        let html = r#"
            <html>
                <head><script>alert('test');</script><style>body{color:red;}</style></head>
                <body>
                    <header>Site header</header>
                    <nav><a href="/">Home</a></nav>
                    <noscript>Enable JavaScript</noscript>
                    <p>Content</p>
                    <aside>Related links</aside>
                    <form><input name="q"> Search</form>
                    <footer>Copyright</footer>
                </body>
            </html>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default());
        assert!(result.contains("<p>Content</p>"));
        for gone in ["alert", "color:red", "Site header", "Home", "Enable JavaScript", "Related links", "Search", "Copyright"] {
            assert!(!result.contains(gone), "{} should be removed", gone);
        }
    }

    #[test]
    fn test_keeps_tags_not_configured() {
        let html = "<body><nav>Menu</nav><script>x()</script><p>Body</p></body>";
        let config = PreprocessConfig { remove_tags: vec!["script".to_string()], ..Default::default() };

        let result = preprocess_html(html, &config);
        assert!(result.contains("Menu"));
        assert!(!result.contains("x()"));
    }

    #[test]
    fn test_remove_comments_across_lines() {
        let html = "<body><!-- one\n two --><p>Visible content</p><!-- three --></body>";
        let result = remove_comments(html);
        assert!(!result.contains("<!--"));
        assert!(!result.contains("two"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_remove_hidden_elements() {
        let html = r#"
            <html>
                <body>
                    <div style="display:none">Hidden content</div>
                    <div style="visibility: hidden">Invisible content</div>
                    <div style="color: blue">Visible content</div>
                </body>
            </html>
        "#;

        let result = remove_hidden_elements(html);
        assert!(!result.contains("Hidden content"));
        assert!(!result.contains("Invisible content"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_invalid_tag_names_are_ignored() {
        let html = "<body><p>Kept</p></body>";
        let config = PreprocessConfig {
            remove_tags: ["[[bad", "", "1x", "p, div", "script"].iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        };
        assert!(preprocess_html(html, &config).contains("Kept"));

        let html = "<body><script>x()</script><p>Kept</p></body>";
        let result = preprocess_html(html, &config);
        assert!(result.contains("Kept"));
        assert!(!result.contains("x()"));
    }

    #[test]
    fn test_is_removed_case_insensitive() {
        let config = PreprocessConfig::default();
        assert!(config.is_removed("SCRIPT"));
        assert!(config.is_removed("nav"));
        assert!(!config.is_removed("p"));
    }
}
