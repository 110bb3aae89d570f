use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use depadvice::config::{Config, Severity};
use depadvice::report::{ReportFormat, Reporter};
use depadvice::{Analyzer, BuildInput};

/// depadvice - dependency advice for multi-module builds
#[derive(Parser, Debug)]
#[command(name = "depadvice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Materialized build input (JSON or YAML)
    input: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (defaults to the config file's report.format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on any advice, regardless of per-category severity
    #[arg(long)]
    fail_on_advice: bool,

    /// Show the dependency path behind each added transitive
    #[arg(long)]
    traces: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("depadvice v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let input = BuildInput::from_file(&cli.input)?;

    let analyzer = Analyzer::new(&config);
    let report = analyzer.analyze_build(&input);

    let format = match cli.format.clone() {
        Some(format) => format.into(),
        None => ReportFormat::from_name(&config.report.format),
    };
    Reporter::new(format, cli.output.clone())
        .with_traces(config.report.show_traces)
        .report(&report)?;

    if report.should_fail() {
        if !cli.quiet {
            eprintln!("{}", "Dependency analysis failed".red().bold());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from next to the input file
        let root = cli.input.parent().unwrap_or_else(|| Path::new("."));
        Config::from_default_locations(root)?
    };

    // Override with CLI arguments
    if cli.fail_on_advice && config.issues.any.severity != Severity::Ignore {
        config.issues.any.severity = Severity::Fail;
    }
    if cli.traces {
        config.report.show_traces = true;
    }

    Ok(config)
}
