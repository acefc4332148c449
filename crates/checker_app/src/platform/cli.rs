use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::logging::LogTarget;

/// checker - ask the fallacy-detection backend about a comment or a page
#[derive(Parser, Debug)]
#[command(name = "checker", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./checker.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Language hint sent with single analyses
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Use the non-streaming endpoints with simulated progress
    #[arg(long, global = true)]
    pub fallback: bool,

    /// Keep the overlay until its hide timer fires instead of exiting on the result
    #[arg(long, global = true)]
    pub hold: bool,

    /// Where log output goes
    #[arg(long, global = true, value_enum, default_value = "file")]
    pub log: LogTarget,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one selected comment against the page it appears on
    Single {
        /// The selected comment text
        #[arg(short, long)]
        text: String,

        /// URL of the page the comment was taken from
        #[arg(short, long)]
        page: String,
    },

    /// Check every comment of a page (reddit threads)
    Batch {
        /// URL of the page
        #[arg(short, long)]
        page: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_with_global_flags() {
        let args = Args::try_parse_from([
            "checker",
            "single",
            "--text",
            "You're wrong because you're stupid",
            "--page",
            "https://news.example.com/a",
            "--fallback",
        ])
        .unwrap();

        assert!(args.fallback);
        assert_eq!(args.log, LogTarget::File);
        assert!(matches!(args.command, Commands::Single { ref text, .. } if text.starts_with("You're")));
    }

    #[test]
    fn batch_requires_page() {
        assert!(Args::try_parse_from(["checker", "batch"]).is_err());
    }
}
