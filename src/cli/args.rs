//! CLI argument definitions using clap
//!
//! Commands:
//! - shopsearch serve [--port <port>]
//! - shopsearch plan [--mode <mode>] [--explain]
//! - shopsearch index [--count <n>]
//! - shopsearch synonyms --file <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// shopsearch - faceted product search over Elasticsearch
#[derive(Parser, Debug)]
#[command(name = "shopsearch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP search API
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Read a search request from stdin and print the engine query
    Plan {
        /// products_only, products_with_aggs or products_with_filtered_aggs
        #[arg(long, default_value = "products_with_filtered_aggs")]
        mode: String,

        /// Print a readable plan instead of the engine query
        #[arg(long)]
        explain: bool,
    },

    /// Recreate the index and fill it with generated products
    Index {
        /// Number of products; 0 or less uses the configured default
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        count: i64,
    },

    /// Replace the synonym rules with the lines of a file
    Synonyms {
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_defaults() {
        let cli = Cli::try_parse_from(["shopsearch", "plan"]).unwrap();
        match cli.command {
            Command::Plan { mode, explain } => {
                assert_eq!(mode, "products_with_filtered_aggs");
                assert!(!explain);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["shopsearch", "index", "--count", "200", "--config", "shop.json"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("shop.json")));
        assert!(matches!(cli.command, Command::Index { count: 200 }));
    }

    #[test]
    fn test_synonyms_requires_file() {
        assert!(Cli::try_parse_from(["shopsearch", "synonyms"]).is_err());
    }
}
