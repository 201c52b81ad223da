//! Request handlers for the HTML form and the JSON API.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use gist_core::{DEFAULT_MIN_CHARS, DEFAULT_SENTENCES, FetchConfig, GistError, Summarizer, Summary, SummaryConfig, parse_url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::render::{self, FormValues, Outcome};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fetch: Arc<FetchConfig>,
}

impl AppState {
    pub fn new(fetch: FetchConfig) -> Self {
        Self { fetch: Arc::new(fetch) }
    }
}

/// Form fields as submitted; numbers stay text until validated.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sentences: String,
    #[serde(default)]
    pub min_chars: String,
    pub show_text: Option<String>,
}

impl From<SummaryForm> for FormValues {
    fn from(form: SummaryForm) -> Self {
        let defaults = FormValues::default();
        Self {
            url: form.url,
            sentences: if form.sentences.is_empty() { defaults.sentences } else { form.sentences },
            min_chars: if form.min_chars.is_empty() { defaults.min_chars } else { form.min_chars },
            show_text: form.show_text.is_some_and(|v| !v.is_empty() && v != "off"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub url: String,
    pub sentences: Option<usize>,
    pub min_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "ok"
}

/// Empty form
pub async fn index() -> Html<String> {
    Html(render::page(&FormValues::default(), Outcome::Empty))
}

/// Form submission: validates, fetches, summarizes and renders in one page.
pub async fn summarize_form(State(state): State<AppState>, Form(form): Form<SummaryForm>) -> impl IntoResponse {
    let values = FormValues::from(form);

    let (url, config) = match validate_form(&values) {
        Ok(parsed) => parsed,
        Err(message) => {
            debug!(%message, "rejected form submission");
            return (StatusCode::BAD_REQUEST, Html(render::page(&values, Outcome::Error(&message))));
        }
    };

    match run_summary(&state, &url, config).await {
        Ok(summary) => (StatusCode::OK, Html(render::page(&values, Outcome::Summary(&summary)))),
        Err(err) => {
            let message = err.to_string();
            (status_for(&err), Html(render::page(&values, Outcome::Error(&message))))
        }
    }
}

/// JSON API endpoint. Malformed bodies get the same `{ "error": ... }` shape as other invalid input.
pub async fn api_summary(
    State(state): State<AppState>,
    request: Result<Json<SummaryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection.body_text();
            debug!(%error, "rejected API request body");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };

    let config = SummaryConfig::builder()
        .sentences(request.sentences.unwrap_or(DEFAULT_SENTENCES))
        .min_chars(request.min_chars.unwrap_or(DEFAULT_MIN_CHARS))
        .build();

    match run_summary(&state, request.url.trim(), config).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => (status_for(&err), Json(ErrorResponse { error: err.to_string() })).into_response(),
    }
}

async fn run_summary(state: &AppState, url: &str, config: SummaryConfig) -> Result<Summary, GistError> {
    info!(url, sentences = config.sentences, min_chars = config.min_chars, "summarizing page");

    let result = Summarizer::with_config(config)
        .fetch_and_summarize_with_config(url, &state.fetch)
        .await;

    match &result {
        Ok(summary) => debug!(url, selected = summary.sentences.len(), "summary ready"),
        Err(err) if err.is_fetch_error() => warn!(url, error = %err, "fetch failed"),
        Err(err) => debug!(url, error = %err, "rejected request"),
    }
    result
}

/// Maps an error to its response status: bad input is the client's fault,
/// a failed fetch is the upstream site's.
pub fn status_for(err: &GistError) -> StatusCode {
    if err.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else if err.is_fetch_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Checks form values and builds the summary configuration.
fn validate_form(values: &FormValues) -> Result<(String, SummaryConfig), String> {
    let url = values.url.trim();
    if url.is_empty() {
        return Err("Please enter a URL to summarize.".to_string());
    }
    parse_url(url).map_err(|err| err.to_string())?;

    let sentences = match values.sentences.trim().parse::<i64>() {
        Ok(n) if n > 0 => n as usize,
        _ => return Err("Number of sentences must be a positive whole number.".to_string()),
    };
    let min_chars = values
        .min_chars
        .trim()
        .parse::<usize>()
        .map_err(|_| "Minimum characters must be a whole number of zero or more.".to_string())?;

    let config = SummaryConfig::builder().sentences(sentences).min_chars(min_chars).build();
    Ok((url.to_string(), config))
}
