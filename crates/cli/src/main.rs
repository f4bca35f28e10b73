//! Command line interface for the gold price simulator.
use anyhow::{Context, Result};
use chrono::{Duration, Local};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use goldsim_api::{ApiServer, ServerConfig};
use goldsim_domain::enums::{NoiseModel, TrendDirection};
use goldsim_domain::value_objects::simulation_parameters::DEFAULT_GOLD_PRICE;
use goldsim_domain::value_objects::{SimulationParameters, SimulationReport};
use goldsim_simulation::aggregator::ScenarioAggregator;
use goldsim_simulation::catalog::EventScenarioCatalog;
use goldsim_simulation::impact::{MacroFactors, MacroImpactModel};
use goldsim_simulation::noise::{UniformNoise, entropy_seed, seeded_source};
use goldsim_simulation::snapshot::standard_snapshots;
use goldsim_simulation::ticker::{LivePriceTicker, TickerConfig};
use prettytable::{Table, row};
use tracing::debug;

#[derive(Parser)]
#[command(name = "goldsim")]
#[command(about = "Monte Carlo what-if simulator for gold prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum NoiseArg {
    /// Uniform shocks in [-1, 1)
    Uniform,
    /// Standard normal shocks
    Gaussian,
}

impl From<NoiseArg> for NoiseModel {
    fn from(arg: NoiseArg) -> Self {
        match arg {
            NoiseArg::Uniform => NoiseModel::Uniform,
            NoiseArg::Gaussian => NoiseModel::Gaussian,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the five market scenarios
    Simulate {
        /// Starting gold price in USD
        #[arg(short, long, default_value_t = DEFAULT_GOLD_PRICE)]
        price: f64,

        /// Days to simulate
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Annual volatility (0.15 = 15%)
        #[arg(short, long, default_value_t = 0.15)]
        volatility: f64,

        /// Trend bias: -1 bearish, 0 neutral, 1 bullish
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        trend: i8,

        /// Market shock at the midpoint, in percent
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        shock: f64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Noise model
        #[arg(long, value_enum, default_value_t = NoiseArg::Uniform)]
        noise: NoiseArg,

        /// Give every scenario its own generator and run them in parallel
        #[arg(long)]
        parallel: bool,

        /// Pull inputs into the dashboard slider ranges first
        #[arg(long)]
        clamp: bool,
    },
    /// Project the market events onto a price
    Events {
        /// Current gold price in USD
        #[arg(short, long, default_value_t = DEFAULT_GOLD_PRICE)]
        price: f64,
    },
    /// Blend macro factors into a base forecast
    Impact {
        /// Base forecast, one price per day
        #[arg(long, value_delimiter = ',', required = true)]
        base: Vec<f64>,

        /// Policy rate change, percentage points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        interest_rate: f64,

        /// Inflation change, percentage points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        inflation: f64,

        /// Dollar index change, percent
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dollar: f64,

        /// Market volatility score (0-100)
        #[arg(long, default_value_t = 0.0)]
        market_volatility: f64,

        /// Geopolitical risk score (0-100)
        #[arg(long, default_value_t = 0.0)]
        geopolitical_risk: f64,
    },
    /// Print a run of synthetic live quotes, one per minute
    Ticker {
        /// Number of ticks
        #[arg(short, long, default_value_t = 10)]
        count: u32,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// OHLC snapshots for 1D, 1W, 1M and 3M
    Snapshots {
        /// Current gold price in USD
        #[arg(short, long, default_value_t = DEFAULT_GOLD_PRICE)]
        price: f64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start the HTTP API
    Serve {
        /// Overrides GOLDSIM_HOST
        #[arg(long)]
        host: Option<String>,

        /// Overrides GOLDSIM_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            price,
            days,
            volatility,
            trend,
            shock,
            seed,
            noise,
            parallel,
            clamp,
        } => {
            let trend = TrendDirection::try_from(trend)?;
            let mut params = SimulationParameters::new(price)
                .with_time_horizon(days)
                .with_volatility(volatility)
                .with_trend(trend)
                .with_shock(shock);
            if clamp {
                params = params.clamped_to_ui_ranges();
            }
            let model = NoiseModel::from(noise);
            let seed = seed.unwrap_or_else(entropy_seed);

            println!(
                "🚀 Simulating {} days from ${:.2} ({} noise, seed {})...",
                params.time_horizon_days, params.current_price, model, seed
            );

            let aggregator = ScenarioAggregator::default();
            let results = if parallel {
                aggregator.run_all_parallel(&params, model, seed)?
            } else {
                aggregator.run_all(&params, &mut seeded_source(model, seed))?
            };
            print_report(&SimulationReport::new(results));
        }
        Commands::Events { price } => {
            let projections = EventScenarioCatalog::standard()?.project_f64(price)?;

            let mut table = Table::new();
            table.add_row(row![
                "Event",
                "Timeframe",
                "Probability",
                "Projected",
                "Change",
                "Impact"
            ]);
            for p in &projections {
                table.add_row(row![
                    p.name,
                    p.timeframe,
                    format!("{:.0}% ({:?})", p.probability * 100.0, p.probability_tier()),
                    format!("${:.2}", p.projected_price.value),
                    format!("{:+.2} ({})", p.price_change, p.percent_label()),
                    p.impact
                ]);
            }
            println!("\n📊 Event scenarios at ${price:.2}");
            table.printstd();
        }
        Commands::Impact {
            base,
            interest_rate,
            inflation,
            dollar,
            market_volatility,
            geopolitical_risk,
        } => {
            let factors = MacroFactors {
                interest_rate_change: interest_rate,
                inflation_change: inflation,
                dollar_strength_change: dollar,
                market_volatility,
                geopolitical_risk,
            };
            let forecast = MacroImpactModel::default().blend(&base, factors)?;
            let today = Local::now().date_naive();

            let mut table = Table::new();
            table.add_row(row!["Day", "Date", "Base", "Scenario", "Delta"]);
            let rows = forecast
                .base_predictions
                .iter()
                .zip(&forecast.scenario_predictions)
                .enumerate();
            for (i, (base, scenario)) in rows {
                let day = i as i64 + 1;
                table.add_row(row![
                    day,
                    today + Duration::days(day),
                    format!("${base:.2}"),
                    format!("${scenario:.2}"),
                    format!("{:+.2}", scenario - base)
                ]);
            }
            table.printstd();
        }
        Commands::Ticker { count, seed } => {
            let mut noise = match seed {
                Some(seed) => UniformNoise::seeded(seed),
                None => UniformNoise::from_os(),
            };
            let mut ticker = LivePriceTicker::new(TickerConfig::default());
            let start = Local::now();

            let mut table = Table::new();
            table.add_row(row!["Time", "Price", "Session"]);
            for minute in 0..count {
                let at = start + Duration::minutes(i64::from(minute));
                let tick = ticker.tick(&at, &mut noise);
                table.add_row(row![
                    at.format("%H:%M"),
                    format!("${:.2}", tick.price),
                    format!("{:?}", tick.session)
                ]);
            }
            table.printstd();
            debug!(ticks = ticker.history().len(), "ticker run finished");
        }
        Commands::Snapshots { price, seed } => {
            let mut noise = seeded_source(NoiseModel::Uniform, seed.unwrap_or_else(entropy_seed));
            let snapshots = standard_snapshots(price, &mut noise)?;

            let mut table = Table::new();
            table.add_row(row!["Period", "Open", "High", "Low", "Close", "Volume"]);
            for s in &snapshots {
                table.add_row(row![
                    s.period,
                    format!("{:.2}", s.open),
                    format!("{:.2}", s.high),
                    format!("{:.2}", s.low),
                    format!("{:.2}", s.close),
                    s.volume
                ]);
            }
            table.printstd();
        }
        Commands::Serve { host, port } => {
            let mut config = ServerConfig::from_env().context("invalid server configuration")?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            println!("📡 Serving on http://{}/api/v1", config.bind_address());
            ApiServer::new(config).run().await?;
        }
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    let mut table = Table::new();
    table.add_row(row![
        "Scenario",
        "Final",
        "High",
        "Low",
        "Volatility",
        "ROI"
    ]);
    for r in &report.results {
        table.add_row(row![
            r.scenario_name,
            format!("${:.2}", r.final_price),
            format!("${:.2}", r.max_price),
            format!("${:.2}", r.min_price),
            format!("{:.1}%", r.volatility_percent),
            r.roi_label()
        ]);
    }

    println!("\n📊 What-if results");
    table.printstd();

    if let (Some(best), Some(worst)) = (report.best(), report.worst()) {
        println!("Best:     {} ({})", best.scenario_name, best.roi_label());
        println!("Worst:    {} ({})", worst.scenario_name, worst.roi_label());
    }
    println!("Mean ROI: {:+.2}%", report.mean_roi());
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
    fn test_simulate_accepts_negative_values() {
        let cli = Cli::try_parse_from([
            "goldsim", "simulate", "--trend", "-1", "--shock", "-25", "--seed", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                trend, shock, seed, ..
            } => {
                assert_eq!(trend, -1);
                assert_eq!(shock, -25.0);
                assert_eq!(seed, Some(4));
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_impact_parses_price_list() {
        let cli = Cli::try_parse_from(["goldsim", "impact", "--base", "2000,2010.5"]).unwrap();
        match cli.command {
            Commands::Impact { base, .. } => assert_eq!(base, vec![2000.0, 2010.5]),
            _ => panic!("expected impact"),
        }
    }
}
