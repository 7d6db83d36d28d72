//! CrossLab CLI: run a crossover simulation or serve the HTTP API.
//!
//! Commands:
//! - `simulate`: one simulation from flags and/or a TOML config file
//! - `serve`: HTTP API plus the static frontend

mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crosslab_runner::config::{AppConfig, DataConfig, DataSourceKind};
use crosslab_runner::export::{generate_report, write_result_json, write_trades_csv};
use crosslab_runner::run_simulation_with;

const DEFAULT_LOG_FILTER: &str = "crosslab=info,tower_http=info";

#[derive(Parser)]
#[command(
    name = "crosslab",
    about = "CrossLab: moving-average crossover backtester"
)]
struct Cli {
    /// TOML config file. Flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Data source selection shared by both commands.
#[derive(clap::Args)]
struct DataArgs {
    /// Where prices come from.
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Directory of `<SYMBOL>.csv` files for `--source csv`.
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Use traded prices instead of split/dividend adjusted ones.
    #[arg(long, default_value_t = false)]
    raw: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Yahoo,
    Csv,
    Synthetic,
}

impl From<SourceArg> for DataSourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Yahoo => DataSourceKind::Yahoo,
            SourceArg::Csv => DataSourceKind::Csv,
            SourceArg::Synthetic => DataSourceKind::Synthetic,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print a summary.
    Simulate {
        /// Ticker symbol (e.g., AAPL).
        #[arg(long)]
        symbol: Option<String>,

        /// Start date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), exclusive.
        #[arg(long)]
        end: Option<String>,

        /// Short moving-average window.
        #[arg(long)]
        ma1: Option<i64>,

        /// Long moving-average window.
        #[arg(long)]
        ma2: Option<i64>,

        #[command(flatten)]
        data: DataArgs,

        /// Write the full result as JSON.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the trade list as CSV.
        #[arg(long)]
        trades_csv: Option<PathBuf>,
    },
    /// Serve the HTTP API and the frontend.
    Serve {
        #[arg(long, env = "CROSSLAB_HOST")]
        host: Option<String>,

        #[arg(long, env = "CROSSLAB_PORT")]
        port: Option<u16>,

        /// Directory holding index.html, result.html and static assets.
        #[arg(long, env = "CROSSLAB_FRONTEND_DIR")]
        frontend_dir: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Simulate {
            symbol,
            start,
            end,
            ma1,
            ma2,
            data,
            output,
            trades_csv,
        } => {
            let sim = &mut config.simulation;
            if let Some(symbol) = symbol {
                sim.symbol = symbol;
            }
            if let Some(start) = start {
                sim.start_date = start;
            }
            if let Some(end) = end {
                sim.end_date = end;
            }
            if let Some(ma1) = ma1 {
                sim.ma1_window = ma1;
            }
            if let Some(ma2) = ma2 {
                sim.ma2_window = ma2;
            }
            apply_data_args(&mut config.data, data);
            run_simulate_cmd(&config, output, trades_csv)
        }
        Commands::Serve {
            host,
            port,
            frontend_dir,
            data,
        } => {
            let srv = &mut config.server;
            if let Some(host) = host {
                srv.host = host;
            }
            if let Some(port) = port {
                srv.port = port;
            }
            if let Some(dir) = frontend_dir {
                srv.frontend_dir = dir;
            }
            apply_data_args(&mut config.data, data);
            run_serve_cmd(&config)
        }
    }
}

fn apply_data_args(data: &mut DataConfig, args: DataArgs) {
    if let Some(source) = args.source {
        data.source = source.into();
    }
    if let Some(dir) = args.csv_dir {
        data.csv_dir = dir;
    }
    if args.raw {
        data.adjust = false;
    }
}

fn run_simulate_cmd(
    config: &AppConfig,
    output: Option<PathBuf>,
    trades_csv: Option<PathBuf>,
) -> Result<()> {
    let provider = config
        .data
        .build_provider()
        .context("failed to set up data provider")?;
    let request = config.simulation.to_request();

    let result = run_simulation_with(&request, provider.as_ref(), config.data.adjust_mode())?;

    println!("{}", generate_report(&result));

    if let Some(path) = output {
        write_result_json(&path, &result)?;
        println!("Result saved to: {}", path.display());
    }
    if let Some(path) = trades_csv {
        write_trades_csv(&path, &result.trades)?;
        println!("Trades saved to: {}", path.display());
    }

    Ok(())
}

fn run_serve_cmd(config: &AppConfig) -> Result<()> {
    // Built outside the runtime: the Yahoo provider owns a blocking HTTP
    // client, which must not be created or dropped on an async worker.
    let provider = config
        .data
        .build_provider()
        .context("failed to set up data provider")?;
    let state = server::AppState {
        provider: provider.clone(),
        adjust: config.data.adjust_mode(),
    };

    let addr = config.server.bind_addr();
    info!(
        %addr,
        provider = provider.name(),
        frontend = %config.server.frontend_dir.display(),
        "starting server"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(async {
        let app = server::router(state, &config.server.frontend_dir);
        server::serve(&addr, app).await
    })?;

    drop(runtime);
    drop(provider);
    Ok(())
}
