use chrono::{Duration, Utc};
use clap::Parser;
use spray_advisor_core::{
    advisory::WindUpperBound, AdvisorConfig, AdvisorySession, Celsius, ConditionClassifier,
    Degrees, DeltaTEngine, HistoryWindow, Percent, QueryOrder, SessionError, SimulatedSource,
    SourceError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Spray advisory demo with a simulated weather station
#[derive(Parser, Debug)]
#[command(name = "spray-advisor-demo")]
#[command(about = "Delta T spray advisory demo", long_about = None)]
struct Args {
    /// Number of simulated readings to ingest
    #[arg(short = 'n', long, default_value_t = 24)]
    samples: usize,

    /// Simulator seed (same seed, same readings)
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Seconds between simulated readings (must be positive)
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(i64).range(1..))]
    interval_secs: i64,

    /// History capacity (overrides the config)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Use the 0-50°C temperature domain and 100-reading history
    #[arg(long)]
    narrow_domain: bool,

    /// Accept wind up to 12 km/h instead of 10 km/h
    #[arg(long)]
    relaxed_wind: bool,

    /// JSON config file (flags above are applied on top)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compute a single reading instead of running the simulator
    #[arg(long, num_args = 2, value_names = ["TEMP", "RH"], allow_hyphen_values = true)]
    compute: Option<Vec<f64>>,
}

fn build_config(args: &Args) -> spray_advisor_core::Result<AdvisorConfig> {
    let mut config = match &args.config {
        Some(path) => AdvisorConfig::load(path)?,
        None if args.narrow_domain => AdvisorConfig::narrow(),
        None => AdvisorConfig::default(),
    };
    if args.relaxed_wind {
        config = config.with_wind_bound(WindUpperBound::Relaxed);
    }
    if let Some(capacity) = args.capacity {
        config.history_capacity = capacity;
    }
    config.validate()?;
    Ok(config)
}

fn reading_interval(seconds: i64) -> Result<Duration, String> {
    if seconds <= 0 {
        return Err(format!("interval must be positive, got {seconds}s"));
    }
    Duration::try_seconds(seconds).ok_or_else(|| format!("interval of {seconds}s is too large"))
}

fn compute_once(config: &AdvisorConfig, temperature: f64, humidity: f64) -> ExitCode {
    let components = DeltaTEngine::new(config.temperature_domain)
        .and_then(|engine| Ok((engine, ConditionClassifier::new(config.thresholds)?)));
    let (engine, classifier) = match components {
        Ok(components) => components,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match engine.compute(Celsius::new(temperature), Percent::new(humidity)) {
        Ok(result) => {
            let condition = classifier.classify_delta_t(result.delta_t);
            let point = config
                .chart
                .locate(Celsius::new(temperature), Percent::new(humidity));
            println!("Dry bulb:   {:.1}°C", temperature);
            println!("Humidity:   {:.1}%", humidity);
            println!("Wet bulb:   {}", result.wet_bulb);
            println!("Delta T:    {}", result.delta_t);
            println!("Dew point:  {}", result.dew_point);
            println!("Feels like: {}", result.feels_like);
            println!("Condition:  {}", condition.category);
            println!("            {}", condition.description);
            println!("Chart:      ({}, {})", point.rounded().0, point.rounded().1);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spray_advisor_core=info,demo_headless=info,warn".into()),
        )
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(values) = &args.compute {
        return compute_once(&config, values[0], values[1]);
    }

    println!("=== Spray Advisory Demo ===\n");

    let mut session = match AdvisorySession::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let interval = match reading_interval(args.interval_secs) {
        Ok(interval) => interval,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut source = SimulatedSource::new(args.seed, Utc::now(), interval);
    info!(
        "Simulating {} readings every {}s (seed {})",
        args.samples, args.interval_secs, args.seed
    );

    println!(
        "{:<20} {:>8} {:>7} {:>8} {:<16} {:<16} {:>4} {:<20} {:>10}",
        "Time", "Temp", "RH", "Delta T", "Condition", "Wind", "Dir", "Inversion", "Chart"
    );

    for _ in 0..args.samples {
        match session.poll(&mut source) {
            Ok(update) => {
                let reading = &update.record.reading;
                let wind = update
                    .assessment
                    .wind
                    .as_ref()
                    .map_or("no data", |w| w.category.label());
                let direction = reading.wind_direction.map_or("-", Degrees::compass_point);
                let (x, y) = update.position.rounded();
                println!(
                    "{:<20} {:>8} {:>7} {:>8} {:<16} {:<16} {:>4} {:<20} {:>10}",
                    reading.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    reading.upper_temp.to_string(),
                    reading.humidity.to_string(),
                    update.record.metrics.delta_t.to_string(),
                    update.assessment.delta_t.category.label(),
                    wind,
                    direction,
                    update.assessment.inversion.label(),
                    format!("({x}, {y})"),
                );
                if update.assessment.spray_recommended() {
                    info!("Spray window open at {}", reading.timestamp);
                }
            }
            Err(SessionError::Source(SourceError::Exhausted)) => break,
            Err(e) => error!("{}", e),
        }
    }

    if let Some(stats) = session.history().stats() {
        println!();
        println!("Readings stored: {}", stats.count);
        println!(
            "Delta T: min {}, mean {}, max {}",
            stats.min_delta_t, stats.mean_delta_t, stats.max_delta_t
        );
        println!("Trail points: {}", session.trail(HistoryWindow::All).len());

        println!("\nLatest readings:");
        for record in session
            .history()
            .query(HistoryWindow::All, QueryOrder::LatestFirst)
            .take(5)
        {
            println!(
                "  {}  {} / {}  Delta T {}  {}",
                record.timestamp().format("%H:%M"),
                record.reading.upper_temp,
                record.reading.humidity,
                record.metrics.delta_t,
                record.metrics.condition.category
            );
        }
    }

    ExitCode::SUCCESS
}
