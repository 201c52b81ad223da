//! Content fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving HTML content from
//! HTTP/HTTPS URLs, local files, and standard input, and for decoding the
//! raw bytes using the declared or detected character encoding.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::{GistError, Result};

/// Browser User-Agent sent with every request; many sites refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Number of leading body bytes searched for a `<meta>` charset declaration.
const META_SNIFF_LIMIT: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]+charset\s*=\s*["']?\s*([a-z0-9_\-:.]+)"#).expect("meta charset pattern")
});

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT_SECS, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// Parses and validates a page URL.
///
/// Only absolute `http` and `https` URLs are accepted.
///
/// # Errors
///
/// Returns [`GistError::InvalidUrl`] naming the rejected input.
pub fn parse_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(GistError::InvalidUrl { url: url.to_string(), reason: "URL is empty".to_string() });
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| GistError::InvalidUrl { url: url.to_string(), reason: e.to_string() })?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        "http" | "https" => Err(GistError::InvalidUrl { url: url.to_string(), reason: "URL has no host".to_string() }),
        other => Err(GistError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}' (expected http or https)", other),
        }),
    }
}

/// Fetches HTML content from a URL.
///
/// Performs a single HTTP GET with the configured User-Agent and timeout.
/// Redirects are followed up to the client's default limit. There are no
/// retries: the first failure is returned.
///
/// # Errors
///
/// - [`GistError::InvalidUrl`] if the URL is malformed or not http(s)
/// - [`GistError::Timeout`] if the request exceeds `config.timeout`
/// - [`GistError::Connection`] for DNS, connection and transport failures
/// - [`GistError::BadStatus`] for any non-2xx response
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(|e| GistError::Connection { url: url.to_string(), source: e })?;

    tracing::debug!(url, timeout = config.timeout, "fetching page");

    let response = client
        .get(parsed_url)
        .header(USER_AGENT, &config.user_agent)
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| transport_error(url, config.timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GistError::BadStatus { url: url.to_string(), status: status.as_u16() });
    }

    let declared = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type)
        .map(str::to_string);

    let bytes = response.bytes().await.map_err(|e| transport_error(url, config.timeout, e))?;
    let content = decode_html(&bytes, declared.as_deref());

    tracing::debug!(url, status = status.as_u16(), bytes = bytes.len(), "fetched page");

    Ok(content)
}

#[cfg(feature = "fetch")]
fn transport_error(url: &str, timeout: u64, err: reqwest::Error) -> GistError {
    if err.is_timeout() {
        GistError::Timeout { url: url.to_string(), timeout }
    } else {
        GistError::Connection { url: url.to_string(), source: err }
    }
}

/// Extracts the `charset` parameter from a `Content-Type` header value.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then_some(value)
        } else {
            None
        }
    })
}

/// Finds a charset declared by a `<meta>` tag near the start of the document.
fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

/// Decodes an HTML body to text.
///
/// The encoding is chosen in order: byte order mark, the `declared` label
/// (usually from `Content-Type`), a `<meta>` declaration, then UTF-8.
/// Malformed sequences are replaced rather than rejected.
pub fn decode_html(bytes: &[u8], declared: Option<&str>) -> String {
    let encoding = declared
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced malformed byte sequences while decoding");
    }
    text.into_owned()
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(GistError::FileNotFound(path_buf))
    } else {
        let bytes = fs::read(&path_buf)?;
        Ok(decode_html(&bytes, None))
    }
}

/// Reads HTML content from standard input.
///
/// This function reads all available input from stdin until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    Ok(decode_html(&buffer, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 15);
        assert!(config.user_agent.contains("Chrome"));
    }

    #[test]
    fn test_parse_url_accepts_http_and_https() {
        assert!(parse_url("http://example.com").is_ok());
        assert!(parse_url("https://example.com/path?q=1").is_ok());
        assert!(parse_url("  https://example.com  ").is_ok());
    }

    #[test]
    fn test_parse_url_rejects_bad_input() {
        for input in ["", "example.com", "not-a-url", "ftp://example.com/file", "file:///etc/passwd"] {
            let result = parse_url(input);
            assert!(
                matches!(result, Err(GistError::InvalidUrl { .. })),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(charset_from_content_type("text/html; charset=ISO-8859-1"), Some("ISO-8859-1"));
        assert_eq!(charset_from_content_type("text/html;Charset=\"utf-8\""), Some("utf-8"));
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset="), None);
    }

    #[test]
    fn test_decode_declared_charset() {
        let bytes = b"<p>caf\xe9</p>";
        assert_eq!(decode_html(bytes, Some("windows-1252")), "<p>café</p>");
    }

    #[test]
    fn test_decode_meta_charset() {
        let bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body>na\xefve</body></html>";
        assert!(decode_html(bytes, None).contains("naïve"));

        let bytes = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><p>\x93quoted\x94</p>";
        assert!(decode_html(bytes, None).contains("\u{201c}quoted\u{201d}"));
    }

    #[test]
    fn test_decode_defaults_to_utf8_and_replaces_garbage() {
        assert_eq!(decode_html("héllo".as_bytes(), None), "héllo");
        assert_eq!(decode_html(b"ok\xff", None), "ok\u{fffd}");
        assert_eq!(decode_html("plain".as_bytes(), Some("no-such-charset")), "plain");
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(GistError::FileNotFound(_))));
    }

    #[cfg(feature = "fetch")]
    mod http {
        use super::*;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test]
        async fn test_fetch_url_invalid() {
            let result = fetch_url("not-a-url", &FetchConfig::default()).await;
            assert!(matches!(result, Err(GistError::InvalidUrl { .. })));
        }

        #[tokio::test]
        async fn test_fetch_url_sends_user_agent() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/article"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("content-type", "text/html")
                        .set_body_string("<html><body><p>Hello</p></body></html>"),
                )
                .expect(1)
                .mount(&server)
                .await;

            let body = fetch_url(&format!("{}/article", server.uri()), &FetchConfig::default())
                .await
                .unwrap();
            assert!(body.contains("<p>Hello</p>"));

            let requests = server.received_requests().await.unwrap();
            let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
            assert_eq!(agent, DEFAULT_USER_AGENT);
        }

        #[tokio::test]
        async fn test_fetch_url_not_found_is_bad_status() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/missing"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let url = format!("{}/missing", server.uri());
            let result = fetch_url(&url, &FetchConfig::default()).await;

            match result {
                Err(GistError::BadStatus { url: failed, status }) => {
                    assert_eq!(status, 404);
                    assert_eq!(failed, url);
                }
                other => panic!("expected BadStatus, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_fetch_url_server_error_is_bad_status() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;

            let result = fetch_url(&server.uri(), &FetchConfig::default()).await;
            assert!(matches!(result, Err(GistError::BadStatus { status: 503, .. })));
        }

        #[tokio::test]
        async fn test_fetch_url_timeout() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
                .mount(&server)
                .await;

            let config = FetchConfig { timeout: 1, ..Default::default() };
            let result = fetch_url(&server.uri(), &config).await;
            assert!(matches!(result, Err(GistError::Timeout { timeout: 1, .. })));
        }

        #[tokio::test]
        async fn test_fetch_url_connection_refused() {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let result = fetch_url(&format!("http://{}/", addr), &FetchConfig::default()).await;
            assert!(matches!(result, Err(GistError::Connection { .. })));
        }

        #[tokio::test]
        async fn test_fetch_url_decodes_declared_charset() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("content-type", "text/html; charset=windows-1252")
                        .set_body_bytes(b"<p>caf\xe9 cr\xe8me</p>".to_vec()),
                )
                .mount(&server)
                .await;

            let body = fetch_url(&server.uri(), &FetchConfig::default()).await.unwrap();
            assert!(body.contains("café crème"));
        }
    }
}
