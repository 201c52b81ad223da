use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("gist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize web pages into their key sentences")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(-n --sentences <NUM> "Number of sentences in the summary").default_value("5"))
        .arg(
            clap::Arg::new("min_chars")
                .long("min-chars")
                .value_name("NUM")
                .help("Minimum sentence length in characters")
                .default_value("40"),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, markdown, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "markdown", "json"]),
        )
        .arg(
            clap::Arg::new("full_text")
                .long("full-text")
                .action(clap::ArgAction::SetTrue)
                .help("Append the full extracted text after the summary"),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("15"))
        .arg(
            clap::Arg::new("user_agent")
                .long("user-agent")
                .value_name("UA")
                .help("Custom User-Agent for HTTP requests"),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "gist", &completions_dir).unwrap();
    }

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
