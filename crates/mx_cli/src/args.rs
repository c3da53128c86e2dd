use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mx_client::DEFAULT_API_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    /// Accepts `45`, `30s`, `1m30s` or `1h 5m`. A trailing bare number is
    /// seconds.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut seconds = 0u64;
        while !rest.is_empty() {
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if end == 0 {
                return Err(format!("Expected a number at '{}'", rest));
            }
            let (number, tail) = rest.split_at(end);
            let value: u64 = number
                .parse()
                .map_err(|_| format!("Number too large in duration: {}", number))?;
            rest = tail.trim_start();

            let scale = match rest.chars().next() {
                None => 1,
                Some('s') => 1,
                Some('m') => 60,
                Some('h') => 3600,
                Some(c) if c.is_ascii_digit() => return Err(format!("Missing unit after {}", value)),
                Some(c) => return Err(format!("Invalid duration unit: {}", c)),
            };
            if !rest.is_empty() {
                rest = rest[1..].trim_start();
            }

            seconds = value
                .checked_mul(scale)
                .and_then(|v| seconds.checked_add(v))
                .ok_or_else(|| "Duration is too long".to_string())?;
        }

        if seconds == 0 {
            return Err("Duration must be longer than zero".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse articles by date, tag or author", long_about = None)]
pub struct Cli {
    /// Base URL of the articles API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Per-request timeout (e.g. 30s, 1m, 1m30s)
    #[arg(long, default_value = "30s")]
    pub timeout: HumanDuration,
    /// Read articles from a JSON file instead of the API
    #[arg(long)]
    pub fixture: Option<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
    /// Write logs to this file (the interactive browser logs nowhere otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive card grid (default)
    Browse,
    /// Print the available dates and tags
    Filters,
    /// Print the articles for one criterion; tag wins over author, author over date
    Articles {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// One or more comma-separated tags
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Serve a JSON file of articles with the same API
    Serve {
        path: PathBuf,
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 6051)]
        port: u16,
    },
}
