//! HTML rendering for the summary form and results.
//!
//! Pages are assembled from string fragments. Every value that came from the
//! request or from a fetched page goes through [`escape_html`].

use gist_core::{NO_SUMMARY, Summary};
use url::Url;

const STYLE: &str = "body{font-family:Georgia,serif;max-width:46rem;margin:2rem auto;padding:0 1rem;line-height:1.5}\
label{display:block;margin:.5rem 0}input[type=url]{width:100%}\
.error{color:#a40000;border-left:3px solid #a40000;padding-left:.75rem}\
.source{color:#555}details p{white-space:pre-wrap}";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Values shown in the form, echoed back exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub url: String,
    pub sentences: String,
    pub min_chars: String,
    pub show_text: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            url: String::new(),
            sentences: gist_core::DEFAULT_SENTENCES.to_string(),
            min_chars: gist_core::DEFAULT_MIN_CHARS.to_string(),
            show_text: false,
        }
    }
}

/// What to show below the form.
#[derive(Debug)]
pub enum Outcome<'a> {
    Empty,
    Summary(&'a Summary),
    Error(&'a str),
}

/// Renders the full page: form first, then the outcome.
pub fn page(form: &FormValues, outcome: Outcome<'_>) -> String {
    let body = match outcome {
        Outcome::Empty => String::new(),
        Outcome::Summary(summary) => summary_section(summary, form.show_text),
        Outcome::Error(message) => format!("<p class=\"error\" role=\"alert\">{}</p>", escape_html(message)),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Gist</title>\n<style>{style}</style>\n</head>\n<body>\n<main>\n\
         <h1>Gist</h1>\n{form}\n{body}\n</main>\n</body>\n</html>\n",
        style = STYLE,
        form = form_section(form),
        body = body,
    )
}

fn form_section(form: &FormValues) -> String {
    format!(
        "<form method=\"post\" action=\"/\">\n\
         <label>Page URL <input type=\"url\" name=\"url\" value=\"{url}\" placeholder=\"https://\" required></label>\n\
         <label>Sentences <input type=\"number\" name=\"sentences\" min=\"1\" value=\"{sentences}\"></label>\n\
         <label>Minimum characters <input type=\"number\" name=\"min_chars\" min=\"0\" value=\"{min_chars}\"></label>\n\
         <label><input type=\"checkbox\" name=\"show_text\" value=\"on\"{checked}> Show extracted text</label>\n\
         <button type=\"submit\">Summarize</button>\n\
         </form>",
        url = escape_html(&form.url),
        sentences = escape_html(&form.sentences),
        min_chars = escape_html(&form.min_chars),
        checked = if form.show_text { " checked" } else { "" },
    )
}

fn summary_section(summary: &Summary, show_text: bool) -> String {
    let mut html = String::from("<section class=\"summary\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(summary.display_title())));

    if let Some(source) = &summary.source_url {
        html.push_str(&format!(
            "<p class=\"source\">Source: <a href=\"{}\">{}</a></p>\n",
            escape_html(source),
            escape_html(&link_label(source)),
        ));
    }

    if summary.is_empty() {
        html.push_str(&format!("<p class=\"empty\">{}</p>\n", NO_SUMMARY));
    } else {
        html.push_str("<ul>\n");
        for sentence in &summary.sentences {
            html.push_str(&format!("<li>{}</li>\n", escape_html(&sentence.text)));
        }
        html.push_str("</ul>\n");
    }

    if show_text && !summary.text.is_empty() {
        html.push_str(&format!(
            "<details open>\n<summary>Extracted text</summary>\n<p>{}</p>\n</details>\n",
            escape_html(&summary.text)
        ));
    }

    html.push_str("</section>");
    html
}

/// Host plus path, without the scheme.
fn link_label(source: &str) -> String {
    match Url::parse(source) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}{}", host, url.path().trim_end_matches('/')),
            None => source.to_string(),
        },
        Err(_) => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gist_core::{Page, Sentence};

    fn summary(sentences: Vec<Sentence>) -> Summary {
        Summary::new(
            Page::new("Tom & Jerry <3", "Cats chase mice. Mice hide."),
            sentences,
            2,
            Some("https://example.com/cartoons/".to_string()),
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain café"), "plain café");
    }

    #[test]
    fn test_empty_page_has_form_defaults() {
        let html = page(&FormValues::default(), Outcome::Empty);
        assert!(html.contains("name=\"sentences\" min=\"1\" value=\"5\""));
        assert!(html.contains("name=\"min_chars\" min=\"0\" value=\"40\""));
        assert!(!html.contains("class=\"summary\""));
        assert!(!html.contains(" checked"));
    }

    #[test]
    fn test_summary_is_escaped() {
        let result = summary(vec![Sentence::new("Cats <b>chase</b> mice & more.", 0)]);
        let html = page(&FormValues::default(), Outcome::Summary(&result));

        assert!(html.contains("<h2>Tom &amp; Jerry &lt;3</h2>"));
        assert!(html.contains("<li>Cats &lt;b&gt;chase&lt;/b&gt; mice &amp; more.</li>"));
        assert!(html.contains("<a href=\"https://example.com/cartoons/\">example.com/cartoons</a>"));
        assert!(!html.contains("<details"));
    }

    #[test]
    fn test_empty_summary_placeholder_and_text() {
        let form = FormValues { show_text: true, ..Default::default() };
        let html = page(&form, Outcome::Summary(&summary(Vec::new())));

        assert!(html.contains("<p class=\"empty\">No summary available.</p>"));
        assert!(html.contains("<details open>"));
        assert!(html.contains("Cats chase mice. Mice hide."));
        assert!(html.contains(" checked"));
    }

    #[test]
    fn test_error_and_echoed_values() {
        let form = FormValues {
            url: "https://example.com/?q=\"x\"".to_string(),
            sentences: "abc".to_string(),
            ..Default::default()
        };
        let html = page(&form, Outcome::Error("Bad <input>"));

        assert!(html.contains("<p class=\"error\" role=\"alert\">Bad &lt;input&gt;</p>"));
        assert!(html.contains("value=\"https://example.com/?q=&quot;x&quot;\""));
        assert!(html.contains("name=\"sentences\" min=\"1\" value=\"abc\""));
    }
}
