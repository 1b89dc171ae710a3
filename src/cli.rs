//! CLI argument parsing for launchdash

use crate::binder::DashboardState;
use crate::config::{DashboardConfig, DEFAULT_BIND, DEFAULT_DATA_PATH};
use crate::dataset::Dataset;
use crate::filter::{self, PayloadRange, SiteFilter, ALL_SITES};
use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the summary subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Which chart to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Success proportion pie chart (site selection only)
    Proportion,
    /// Payload vs. outcome scatter chart (site and payload range)
    Correlation,
}

#[derive(Parser, Debug)]
#[command(name = "launchdash")]
#[command(version)]
#[command(about = "Interactive dashboard for SpaceX launch outcomes", long_about = None)]
pub struct Cli {
    /// Enable debug tracing on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Dataset location shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// CSV file with launch records
    #[arg(short = 'd', long = "data", value_name = "CSV", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,
}

/// Payload bound argument, checked the same way as range expressions
fn mass_arg(value: &str) -> std::result::Result<f64, String> {
    filter::parse_mass(value).map_err(|e| e.to_string())
}

/// Dashboard control values
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Launch site to show, or ALL for every site
    #[arg(short = 's', long = "site", value_name = "SITE", default_value = ALL_SITES)]
    pub site: String,

    /// Lower payload bound in kg (default: dataset minimum)
    #[arg(long = "low", value_name = "KG", value_parser = mass_arg, allow_hyphen_values = true)]
    pub low: Option<f64>,

    /// Upper payload bound in kg (default: dataset maximum)
    #[arg(long = "high", value_name = "KG", value_parser = mass_arg, allow_hyphen_values = true)]
    pub high: Option<f64>,

    /// Payload range as LOW,HIGH or LOW..HIGH
    #[arg(long = "payload", value_name = "RANGE", conflicts_with_all = ["low", "high"])]
    pub payload: Option<String>,
}

impl SelectionArgs {
    /// Resolve the control values against the dataset bounds
    pub fn to_state(&self, dataset: &Dataset) -> Result<DashboardState> {
        let initial = DashboardState::initial(dataset);

        let payload = match &self.payload {
            Some(expr) => PayloadRange::from_expr(expr)?,
            None => PayloadRange::new(
                self.low.unwrap_or(initial.payload.low),
                self.high.unwrap_or(initial.payload.high),
            ),
        };

        Ok(DashboardState {
            site: SiteFilter::from_selection(&self.site),
            payload,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the interactive dashboard over HTTP
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Address to listen on
        #[arg(short = 'b', long = "bind", value_name = "ADDR", default_value = DEFAULT_BIND)]
        bind: String,
    },

    /// Print one chart specification as JSON
    Chart {
        /// Chart to compute
        #[arg(value_enum)]
        kind: ChartKind,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Indent the JSON output
        #[arg(long = "pretty")]
        pretty: bool,
    },

    /// Write the dashboard as a static HTML page
    Render {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (default: stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print per-site launch and success counts
    Summary {
        #[command(flatten)]
        data: DataArgs,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl Command {
    /// Server configuration, for the `serve` subcommand
    pub fn dashboard_config(&self) -> Option<DashboardConfig> {
        match self {
            Command::Serve { data, bind } => Some(
                DashboardConfig::default()
                    .with_data_path(data.data.clone())
                    .with_bind(bind.clone()),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LaunchRecord, Outcome};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 500.0, Outcome::Failure),
            LaunchRecord::new("KSC LC-39A", 9600.0, Outcome::Success),
        ])
    }

    fn selection(cli: Cli) -> SelectionArgs {
        match cli.command {
            Command::Chart { selection, .. } | Command::Render { selection, .. } => selection,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_serve_defaults() {
        let cli = Cli::parse_from(["launchdash", "serve"]);
        let config = cli.command.dashboard_config().unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_serve_overrides() {
        let cli = Cli::parse_from([
            "launchdash",
            "serve",
            "--data",
            "launches.csv",
            "--bind",
            "0.0.0.0:9000",
        ]);
        let config = cli.command.dashboard_config().unwrap();
        assert_eq!(config.data_path, PathBuf::from("launches.csv"));
        assert_eq!(config.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_cli_debug_flag_is_global() {
        let cli = Cli::parse_from(["launchdash", "summary", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_chart_kind() {
        let cli = Cli::parse_from(["launchdash", "chart", "correlation", "--pretty"]);
        match &cli.command {
            Command::Chart { kind, pretty, .. } => {
                assert_eq!(*kind, ChartKind::Correlation);
                assert!(*pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.command.dashboard_config().is_none());
    }

    #[test]
    fn test_selection_defaults_to_initial_state() {
        let dataset = dataset();
        let cli = Cli::parse_from(["launchdash", "chart", "proportion"]);
        let state = selection(cli).to_state(&dataset).unwrap();
        assert_eq!(state, DashboardState::initial(&dataset));
    }

    #[test]
    fn test_selection_low_high() {
        let cli = Cli::parse_from([
            "launchdash",
            "render",
            "--site",
            "KSC LC-39A",
            "--low",
            "1000",
        ]);
        let state = selection(cli).to_state(&dataset()).unwrap();
        assert_eq!(state.site, SiteFilter::Site("KSC LC-39A".to_string()));
        assert_eq!(state.payload, PayloadRange::new(1000.0, 9600.0));
    }

    #[test]
    fn test_selection_payload_expr() {
        let cli = Cli::parse_from(["launchdash", "chart", "correlation", "--payload", "0,0"]);
        let state = selection(cli).to_state(&dataset()).unwrap();
        assert_eq!(state.payload, PayloadRange::new(0.0, 0.0));
    }

    #[test]
    fn test_selection_invalid_payload_expr() {
        let cli = Cli::parse_from(["launchdash", "chart", "correlation", "--payload", "heavy"]);
        assert!(selection(cli).to_state(&dataset()).is_err());
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        for value in ["NaN", "inf", "-inf", "heavy"] {
            let result =
                Cli::try_parse_from(["launchdash", "chart", "correlation", "--low", value]);
            assert!(result.is_err(), "--low {value} should be rejected");
            let result =
                Cli::try_parse_from(["launchdash", "render", "--high", value]);
            assert!(result.is_err(), "--high {value} should be rejected");
        }
    }

    #[test]
    fn test_payload_conflicts_with_low() {
        let result = Cli::try_parse_from([
            "launchdash",
            "chart",
            "correlation",
            "--payload",
            "0,1",
            "--low",
            "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_format() {
        let cli = Cli::parse_from(["launchdash", "summary", "--format", "json"]);
        match cli.command {
            Command::Summary { format, .. } => assert_eq!(format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
