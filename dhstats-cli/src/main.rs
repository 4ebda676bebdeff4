//! dhstats CLI - Design history statistics
//!
//! Scans a design-history tree and prints the statistics report

use clap::{Args, Parser, Subcommand};
use dhstats_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success,
    performance::measure_sync, ErrorContext, StatsConfig, StatsError, StatsResult,
};
use dhstats_report::{ReportFormat, ReportRenderer, Statistics};
use dhstats_scan::CorpusScanner;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "dhstats")]
#[command(about = "Statistics over design history documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    report: ReportArgs,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// Project root containing the design history views
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Design history directory, relative to the root
    #[arg(long)]
    base_dir: Option<String>,

    /// Number of features in the iteration ranking
    #[arg(long)]
    top: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the design history and print the report (default)
    Report(ReportArgs),

    /// Manage configuration
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Validate the effective configuration
        #[arg(long)]
        validate: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> StatsResult<()> {
    let mut config = load_config(cli.config.as_ref())?;

    let mut logging_config = config.logging.clone();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }
    init_logging(&logging_config).map_err(|e| StatsError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check the [logging] section of your configuration"),
    })?;

    info!("Starting dhstats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Report(args)) => handle_report(args, &mut config),
        Some(Commands::Config {
            show,
            init,
            validate,
        }) => handle_config(show, init, validate, &config),
        None => handle_report(cli.report, &mut config),
    }
}

fn load_config(config_path: Option<&PathBuf>) -> StatsResult<StatsConfig> {
    if let Some(path) = config_path {
        return StatsConfig::from_file(path);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("dhstats").join("config.toml")),
        Some(PathBuf::from("dhstats.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            return StatsConfig::from_file(path);
        }
    }

    Ok(StatsConfig::default())
}

fn handle_report(args: ReportArgs, config: &mut StatsConfig) -> StatsResult<()> {
    if let Some(base_dir) = args.base_dir {
        config.scan.base_dir = base_dir;
    }
    if let Some(top) = args.top {
        config.report.top_n = top;
    }
    config.validate()?;
    let format: ReportFormat = args.format.parse()?;

    let scanner = CorpusScanner::from_config(&args.root, &config.scan)?;
    log_operation_start!("scan", base_dir = %scanner.base_dir().display());
    let outcome = measure_sync("scan", || scanner.scan_with_failures());
    log_operation_success!(
        "scan",
        features = outcome.features.len(),
        failures = outcome.failures.len()
    );

    let stats = Statistics::aggregate(&outcome.features);
    let renderer = ReportRenderer::new(config.report.clone());
    let report = renderer.render_as(format, &stats, &outcome.features)?;

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout
        .write_all(report.as_bytes())
        .and_then(|()| stdout.flush())
    {
        log_operation_error!("write_report", e);
        return Err(e.into());
    }

    Ok(())
}

fn handle_config(show: bool, init: bool, validate: bool, config: &StatsConfig) -> StatsResult<()> {
    if init {
        let config_path = default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        StatsConfig::default().save_to_file(&config_path)?;
        println!("Configuration initialized at: {}", config_path.display());
    }

    if show {
        let rendered = toml::to_string_pretty(config).map_err(|e| StatsError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("show_config"),
        })?;
        println!("{}", rendered);
    }

    if validate {
        match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                println!("Configuration validation failed: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}

/// Default configuration file location
fn default_config_path() -> StatsResult<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .map(|d| d.join("dhstats").join("config.toml"))
        .ok_or_else(|| StatsError::Config {
            message: "Could not determine a configuration directory".to_string(),
            source: None,
            context: ErrorContext::new("cli")
                .with_operation("default_config_path")
                .with_suggestion("Pass --config with an explicit path"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_root_runs_report() {
        let cli = Cli::try_parse_from(["dhstats", "prototype", "--top", "5"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.report.root, PathBuf::from("prototype"));
        assert_eq!(cli.report.top, Some(5));
    }

    #[test]
    fn test_global_flags_before_report_subcommand() {
        let cli = Cli::try_parse_from(["dhstats", "-v", "report", "x"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Report(args)) => assert_eq!(args.root, PathBuf::from("x")),
            _ => panic!("Expected report subcommand"),
        }
    }

    #[test]
    fn test_global_flags_before_config_subcommand() {
        let cli =
            Cli::try_parse_from(["dhstats", "--config", "c.toml", "config", "--show"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Config { show: true, .. })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dhstats", "report", "x", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_error_is_reported_by_display() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/dhstats.toml"))).unwrap_err();
        let shown = format!("Error: {}", err);
        assert!(shown.starts_with("Error: Configuration error: Failed to read config file"));
        assert!(!shown.contains("ErrorContext"));
    }
}
