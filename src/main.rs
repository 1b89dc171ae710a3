use anyhow::{Context, Result};
use clap::Parser;
use launchdash::{
    binder,
    cli::{ChartKind, Cli, Command, DataArgs, OutputFormat},
    dataset::Dataset,
    html_output::HtmlOutput,
    server,
    stats::{DatasetSummary, StatsTracker},
};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber. `--debug` turns on everything; the server
/// logs at `info` (or `RUST_LOG`) even without it.
fn init_tracing(debug: bool, serving: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if serving {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the dataset; any failure here is fatal
fn load_dataset(args: &DataArgs) -> Result<Dataset> {
    Dataset::load(&args.data)
        .with_context(|| format!("failed to load launch dataset {}", args.data.display()))
}

/// Run the HTTP server on a multi-threaded tokio runtime
fn run_server(command: &Command) -> Result<()> {
    let Some(config) = command.dashboard_config() else {
        anyhow::bail!("serve configuration missing");
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(server::serve(&config))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug, matches!(args.command, Command::Serve { .. }));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Serve { .. } => run_server(&args.command)?,
        Command::Chart {
            kind,
            data,
            selection,
            pretty,
        } => {
            let dataset = load_dataset(data)?;
            let state = selection.to_state(&dataset)?;
            let figure = match kind {
                ChartKind::Proportion => binder::proportion_chart(&dataset, &state.site),
                ChartKind::Correlation => {
                    binder::correlation_chart(&dataset, &state.site, state.payload)
                }
            };
            let json = if *pretty {
                figure.to_json_pretty()?
            } else {
                figure.to_json()?
            };
            writeln!(out, "{}", json)?;
        }
        Command::Render {
            data,
            selection,
            output,
        } => {
            let dataset = load_dataset(data)?;
            let state = selection.to_state(&dataset)?;
            let html = HtmlOutput::new(&dataset, state).to_html();
            match output {
                Some(path) => std::fs::write(path, html)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => out.write_all(html.as_bytes())?,
            }
        }
        Command::Summary { data, format } => {
            let dataset = load_dataset(data)?;
            match format {
                OutputFormat::Text => {
                    StatsTracker::from_records(dataset.records()).write_summary(&mut out)?;
                    if let Some((min, max)) = dataset.payload_bounds() {
                        writeln!(out, "payload range: {} - {} kg", min, max)?;
                    }
                }
                OutputFormat::Json => {
                    let summary = DatasetSummary::from_dataset(&dataset);
                    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
                }
            }
        }
    }

    Ok(())
}
