pub mod error;
pub mod extract;
pub mod fetch;
pub mod parse;
pub mod preprocess;
pub mod rank;
pub mod segment;
pub mod select;
pub mod summarize;
pub mod summary;

pub use error::{GistError, Result};
pub use extract::{ExtractConfig, Page, extract_page, extract_page_with_config};
pub use fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FetchConfig, decode_html, fetch_file, fetch_stdin, parse_url};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use parse::Document;
#[doc(hidden)]
pub use preprocess::{NON_CONTENT_TAGS, PreprocessConfig, preprocess_html};
pub use rank::{Counting, FrequencyProfile, RankConfig, ScoredSentence, Scoring, rank, tokenize};
pub use segment::{DEFAULT_MIN_CHARS, Sentence, segment, split_sentences};
pub use select::{DEFAULT_SENTENCES, select_top};
pub use summarize::{Summarizer, SummaryConfig, SummaryConfigBuilder, summarize};
#[cfg(feature = "fetch")]
pub use summarize::{fetch_and_summarize, fetch_and_summarize_with_config};
pub use summary::{NO_SUMMARY, OutputFormat, Summary, UNTITLED};
