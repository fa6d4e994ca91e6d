use clap::{Parser, Subcommand};
use sales_forecast::data::{DataLoader, DateRange, MalformedRows, RecordStore};
use sales_forecast::error::{ForecastError, LoadError, Result};
use sales_forecast::export::write_records;
use sales_forecast::sample::generate_sales;
use sales_forecast::session::{DashboardSession, Granularity};
use sales_forecast::utils::date_parser::parse_date;
use sales_forecast::DashboardConfig;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sales_report", version, about = "Sales summaries, trend forecasts and stock alerts")]
struct Cli {
    /// TOML config file
    #[arg(short = 'c', long, env = "SALES_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Sales CSV file (overrides the config)
    #[arg(short = 'd', long)]
    data: Option<PathBuf>,

    /// First order date to include (defaults to the earliest in the data)
    #[arg(long)]
    from: Option<String>,

    /// Last order date to include (defaults to the latest in the data)
    #[arg(long)]
    to: Option<String>,

    /// Skip malformed rows instead of failing the load
    #[arg(long)]
    skip_malformed: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline figures, category sales, best sellers and monthly trend
    Summary,
    /// Linear trend forecast of sales
    Forecast {
        /// Periods to project
        #[arg(long)]
        horizon: Option<usize>,
        /// Regress on monthly totals instead of daily totals
        #[arg(long)]
        monthly: bool,
    },
    /// Stock risk against total sales in range
    Stock {
        /// Current stock level
        #[arg(long)]
        capacity: Option<f64>,
    },
    /// Filtered records as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a synthetic sales file
    Demo {
        #[arg(long, default_value_t = 365)]
        days: usize,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SummaryJson {
    range: DateRange,
    total_sales: f64,
    total_profit: f64,
    total_orders: usize,
    category_sales: Vec<(String, f64)>,
    top_products: Vec<(String, f64)>,
    monthly_sales: Vec<(String, f64)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    if let Command::Demo { days, seed, output } = &cli.command {
        let records = generate_sales(*days, *seed);
        info!(records = records.len(), "generated demo data");
        return write_records(open_output(output.as_ref())?, &records);
    }

    let store = Arc::new(load_store(&cli, &config)?);
    let mut session = DashboardSession::new(Arc::clone(&store));
    session.set_range(resolve_range(&cli, &store)?);

    if session.records().is_empty() {
        warn!(range = %session.range(), "no records in selected range");
    }

    match &cli.command {
        Command::Summary => {
            let summary = session.summary();
            let report = SummaryJson {
                range: session.range(),
                total_sales: summary.total_sales,
                total_profit: summary.total_profit,
                total_orders: summary.total_orders,
                category_sales: session.category_sales().into_iter().collect(),
                top_products: session.top_products(config.dashboard.top_products),
                monthly_sales: session
                    .monthly_sales()
                    .into_iter()
                    .map(|(month, total)| (month.format("%Y-%m").to_string(), total))
                    .collect(),
            };
            print_json(&report)
        }
        Command::Forecast { horizon, monthly } => {
            let horizon = config.check_horizon(horizon.unwrap_or(config.forecast.default_horizon))?;
            let granularity = if *monthly {
                Granularity::Monthly
            } else {
                Granularity::Daily
            };
            print_json(&session.forecast(horizon, granularity)?)
        }
        Command::Stock { capacity } => {
            let capacity = capacity.unwrap_or(config.stock.default_capacity);
            print_json(&session.stock(capacity)?)
        }
        Command::Export { output } => {
            write_records(open_output(output.as_ref())?, session.records())
        }
        Command::Demo { .. } => Ok(()),
    }
}

fn load_store(cli: &Cli, config: &DashboardConfig) -> Result<RecordStore> {
    let policy = if cli.skip_malformed {
        MalformedRows::Skip
    } else {
        config.malformed_rows
    };
    let path = cli.data.clone().unwrap_or_else(|| config.data_path.clone());

    let store = DataLoader::new().with_malformed_rows(policy).load_path(&path)?;
    let report = store.report();
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "malformed rows were dropped");
    }
    Ok(store)
}

fn resolve_range(cli: &Cli, store: &RecordStore) -> Result<DateRange> {
    let span = store
        .span()
        .ok_or(ForecastError::Load(LoadError::Empty))?;

    let parse = |raw: &Option<String>, fallback| match raw {
        Some(text) => parse_date(text).ok_or_else(|| {
            ForecastError::Config(format!("cannot parse date '{}'", text))
        }),
        None => Ok(fallback),
    };

    Ok(DateRange::new(
        parse(&cli.from, span.start())?,
        parse(&cli.to, span.end())?,
    ))
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    Ok(writer)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
