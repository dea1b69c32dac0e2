use clap::{CommandFactory, Parser};
use htmlsup::config::{CliConfig, Config};
use htmlsup::core::constants::output_formats;
use htmlsup::core::{HtmlSupError, OutputKind};
use htmlsup::discovery::HttpLinkScraper;
use htmlsup::pipeline::{RunRequest, run};
use htmlsup::reporting::{DocumentReport, logging};
use htmlsup::ui::completion::print_completions;
use htmlsup::ui::output;
use htmlsup::ui::{Cli, Commands, ProgressReporter, cli_to_config};
use htmlsup::validation::W3cValidator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    // Validate that a URL is provided when not using completions
    if cli.url.is_none() {
        eprintln!("Error: No URL provided");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(1);
    }

    match run_htmlsup_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        None => None,
    }
}

/// Main validation logic extracted from main() for testing
pub async fn run_htmlsup_logic(cli: &Cli) -> Result<i32, HtmlSupError> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(settings.verbose, settings.quiet);
    logging::log_config_info(&config);

    let request = RunRequest::parse(
        cli.url.as_deref(),
        config.crawl.as_deref(),
        Some(settings.report_format()),
    )?;
    let scraper = HttpLinkScraper::from_config(&config)?;
    let validator = W3cValidator::from_config(&config)?;

    let mut progress = ProgressReporter::new(settings.show_progress());
    progress.start(&format!("Validating {}", request.seed));
    let result = run(&request, &config, &scraper, &validator).await;

    match result {
        Ok(report) => {
            progress.finish_with_message("Validation complete");
            let mut stdout = std::io::stdout();
            output::write_report(&mut stdout, &report, settings.is_text())?;
            Ok(0)
        }
        Err(e) => {
            progress.finish_and_clear();
            if request.output == OutputKind::Document {
                let failure = DocumentReport::failure(&request.seed, &e, &config.render_options());
                println!("{}", output::document_to_json(&failure)?);
            }
            logging::log_error("Run failed", Some(&e));
            Err(e)
        }
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, HtmlSupError> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub no_progress: bool,
    pub output_format: String,
}

impl OutputSettings {
    pub fn is_text(&self) -> bool {
        self.output_format == output_formats::TEXT
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress && self.is_text()
    }

    /// Report kind requested from the pipeline; text is rendered from the raw report
    pub fn report_format(&self) -> &str {
        if self.is_text() {
            output_formats::RAW
        } else {
            &self.output_format
        }
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    OutputSettings {
        quiet: cli_config.quiet,
        verbose: config.verbose.unwrap_or(false),
        no_progress: cli_config.no_progress,
        output_format: config
            .output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("htmlsup").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_handle_completion_commands_none() {
        let cli = parse(&["https://example.com"]);
        assert_eq!(handle_completion_commands(&cli), None);
    }

    #[test]
    fn test_load_and_merge_config_no_config_flag() {
        let cli_config = CliConfig {
            no_config: true,
            timeout: Some(15),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config).unwrap();

        assert_eq!(config.timeout, Some(15));
        assert_eq!(config.output_format.as_deref(), Some(output_formats::DEFAULT));
    }

    #[test]
    fn test_load_and_merge_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"output_format = \"document\"\ntag_namespace = \"qa\"")
            .unwrap();

        let cli_config = CliConfig {
            config_file: Some(file.path().to_string_lossy().to_string()),
            tag_namespace: Some("cli".to_string()),
            ..Default::default()
        };
        let config = load_and_merge_config(&cli_config).unwrap();

        assert_eq!(config.output_format.as_deref(), Some("document"));
        assert_eq!(config.tag_namespace.as_deref(), Some("cli"));
    }

    #[test]
    fn test_load_and_merge_config_invalid_cli_value() {
        let cli_config = CliConfig {
            no_config: true,
            crawl: Some("never".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            load_and_merge_config(&cli_config),
            Err(HtmlSupError::Config(_))
        ));
    }

    #[test]
    fn test_output_settings() {
        let cli_config = CliConfig::default();
        let settings = setup_output_settings(&cli_config, &Config::default());

        assert!(settings.is_text());
        assert!(settings.show_progress());
        assert_eq!(settings.report_format(), output_formats::RAW);

        let config = Config {
            output_format: Some(output_formats::DOCUMENT.to_string()),
            ..Default::default()
        };
        let quiet = CliConfig {
            quiet: true,
            ..Default::default()
        };
        let settings = setup_output_settings(&quiet, &config);

        assert!(!settings.is_text());
        assert!(!settings.show_progress());
        assert_eq!(settings.report_format(), output_formats::DOCUMENT);
    }
}
