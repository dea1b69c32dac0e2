// Command-line interface definitions and parsing for htmlsup

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Page to validate
    pub url: Option<String>,

    // Discovery
    /// Follow links on the page: true, false or the maximum number of pages
    #[arg(short = 'c', long, value_name = "VALUE", help_heading = "Discovery")]
    pub crawl: Option<String>,

    /// Also follow links to other hosts
    #[arg(long, help_heading = "Discovery")]
    pub any_host: bool,

    /// Validate the page alone when its links cannot be fetched
    #[arg(long, help_heading = "Discovery")]
    pub discovery_fallback: bool,

    // Network
    /// Validator endpoint (default: https://validator.w3.org/nu/)
    #[arg(long, value_name = "URL", help_heading = "Network")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Network")]
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress spinner
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    /// Prefix of document tags (default: htmlsup)
    #[arg(long, value_name = "NAME", help_heading = "Output & Verbosity")]
    pub tag_namespace: Option<String>,

    /// Chart segments below this percentage merge into "Other" (default: 5)
    #[arg(long, value_name = "PERCENT", help_heading = "Output & Verbosity")]
    pub chart_threshold: Option<f64>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        crawl: cli.crawl.as_ref().map(|s| s.trim().to_string()),
        any_host: cli.any_host,
        discovery_fallback: cli.discovery_fallback,
        validator_endpoint: cli.endpoint.clone(),
        user_agent: cli.user_agent.clone(),
        timeout: cli.timeout,
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        tag_namespace: cli.tag_namespace.clone(),
        chart_threshold: cli.chart_threshold,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
