use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use gist_core::{
    DEFAULT_MIN_CHARS, DEFAULT_SENTENCES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FetchConfig, OutputFormat,
    Summarizer, SummaryConfig, fetch_file, fetch_stdin, fetch_url,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

mod echo;

use echo::Status;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize a web page into its most salient sentences
#[derive(Parser, Debug)]
#[command(name = "gist")]
#[command(version)]
#[command(about = "Summarize web pages into their key sentences", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Number of sentences in the summary
    #[arg(short = 'n', long, default_value_t = DEFAULT_SENTENCES, value_name = "NUM")]
    sentences: usize,

    /// Minimum sentence length in characters
    #[arg(long, default_value_t = DEFAULT_MIN_CHARS, value_name = "NUM")]
    min_chars: usize,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, markdown, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Append the full extracted text after the summary
    #[arg(long)]
    full_text: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Where the HTML comes from
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Stdin,
    Url(String),
    File(String),
}

impl Input {
    /// Inputs with a scheme and host are URLs (even unsupported ones); the rest are file paths.
    fn classify(input: &str) -> Self {
        if input == "-" {
            return Self::Stdin;
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::Url(input.to_string());
        }
        match Url::parse(input) {
            Ok(url) if !url.cannot_be_a_base() && url.has_host() => Self::Url(input.to_string()),
            _ => Self::File(input.to_string()),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "gist=debug,gist_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::banner();
        echo::status(Status::Info, "Debug logging enabled");
        eprintln!();
    }

    let config = SummaryConfig::builder().sentences(args.sentences).min_chars(args.min_chars).build();
    config.validate()?;

    let started = Instant::now();
    let input = Input::classify(&args.input);

    let (html, source_url) = match &input {
        Input::Stdin => {
            if args.verbose {
                echo::step(1, 3, "Reading from stdin");
            }
            (fetch_stdin().context("Failed to read from stdin")?, None)
        }
        Input::Url(url) => {
            if args.verbose {
                echo::step(1, 3, &format!("Fetching {}", url.bright_white().underline()));
            }
            let fetch_config = FetchConfig {
                timeout: args.timeout,
                user_agent: args.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            };
            let html = fetch_url(url, &fetch_config)
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;
            (html, Some(url.clone()))
        }
        Input::File(path) => {
            if args.verbose {
                echo::step(1, 3, &format!("Reading from file {}", path.bright_white()));
            }
            (fetch_file(path).with_context(|| format!("Failed to read file: {}", path))?, None)
        }
    };
    let fetched = started.elapsed();

    if args.verbose {
        echo::detail("Size", echo::format_size(html.len()));
        echo::timing("Read", fetched);
        eprintln!();
        echo::step(2, 3, "Summarizing");
    }

    let summarizer = Summarizer::with_config(config);
    let summary = match &source_url {
        Some(url) => summarizer.summarize_html_with_url(&html, url)?,
        None => summarizer.summarize_html(&html)?,
    };

    if args.verbose {
        echo::detail("Title", summary.display_title());
        echo::detail("Candidates", summary.candidate_count);
        echo::detail("Selected", summary.sentences.len());
        echo::timing("Summarize", started.elapsed() - fetched);
        if summary.is_empty() {
            echo::status(Status::Warning, "No sentence passed the length filter");
        }
        eprintln!();
        echo::step(3, 3, "Writing output");
        echo::detail("Format", format!("{:?}", args.format));
        eprintln!();
    }

    let output = summary.to_format(args.format, args.full_text);

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(&path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::status(Status::Success, &format!("Summary written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_classify_input() {
        assert_eq!(Input::classify("-"), Input::Stdin);
        assert_eq!(
            Input::classify("https://example.com/a"),
            Input::Url("https://example.com/a".to_string())
        );
        assert_eq!(Input::classify("http://"), Input::Url("http://".to_string()));
        assert_eq!(Input::classify("ftp://example.com/a"), Input::Url("ftp://example.com/a".to_string()));
        assert_eq!(Input::classify("page.html"), Input::File("page.html".to_string()));
        assert_eq!(Input::classify("./saved/page.html"), Input::File("./saved/page.html".to_string()));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["gist", "https://example.com"]);
        assert_eq!(args.sentences, 5);
        assert_eq!(args.min_chars, 40);
        assert_eq!(args.timeout, 15);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.full_text);
    }

    #[test]
    fn test_args_format_parse() {
        let args = Args::parse_from(["gist", "-f", "md", "-n", "3", "page.html"]);
        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.sentences, 3);
        assert!(Args::try_parse_from(["gist", "-f", "html", "page.html"]).is_err());
    }

    #[test]
    fn test_completions_offer_accepted_flags() {
        let bash = include_str!(concat!(env!("OUT_DIR"), "/completions/gist.bash"));
        let command = Args::command();

        for arg in command.get_arguments() {
            if let Some(long) = arg.get_long() {
                assert!(bash.contains(&format!("--{}", long)), "completions lack --{}", long);
            }
        }
        for snake in ["--min_chars", "--full_text", "--user_agent"] {
            assert!(!bash.contains(snake), "completions offer {}", snake);
        }
    }
}
