use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use surya_math::deg_to_dms;
use surya_rs::{
    ALL_BODIES, Body, CalendarDate, Calculator, ModelConfig, PositionResult, ahargana,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "surya", about = "Surya Siddhanta planetary model")]
struct Cli {
    /// JSON file with lunar/conjunction limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Save the correction log here (JSON lines) after the command
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Longitude of one body, or every body with "all"
    Position {
        /// Body name (Sun, Moon, Mars, ..., Moon_Apogee, Moon_Node) or "all"
        body: String,
        /// Proleptic Julian date, YYYY-MM-DD (negative years allowed)
        #[arg(allow_hyphen_values = true)]
        date: String,
    },
    /// Lunar latitude, tithi and eclipse conditions
    Lunar {
        #[arg(allow_hyphen_values = true)]
        date: String,
    },
    /// Conjunctions, aspects and groups of the seven classical bodies
    Conjunctions {
        #[arg(allow_hyphen_values = true)]
        date: String,
    },
    /// Run the self-checks
    Validate,
    /// Days elapsed since the Kali Yuga epoch
    Ahargana {
        #[arg(allow_hyphen_values = true)]
        date: String,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_hyphen_values = true)]
        deg: f64,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_date(s: &str) -> anyhow::Result<CalendarDate> {
    s.parse()
        .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

fn parse_bodies(s: &str) -> anyhow::Result<Vec<Body>> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(ALL_BODIES.to_vec());
    }
    Ok(vec![s.parse()?])
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_position(p: &PositionResult) {
    let stages: Vec<&str> = p.corrections_applied.iter().map(|s| s.as_str()).collect();
    println!(
        "{:<12} {:>12.6} deg  ({})  mean {:.6}  manda {:.6}  [{}]{}",
        p.body.name(),
        p.true_longitude,
        deg_to_dms(p.true_longitude),
        p.mean_longitude,
        p.manda_corrected,
        stages.join(", "),
        if p.is_approximate { "  approximate" } else { "" }
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ModelConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ModelConfig::default(),
    };
    let mut calc = Calculator::with_config(config)?;

    match &cli.command {
        Commands::Position { body, date } => {
            let date = parse_date(date)?;
            let mut results = Vec::new();
            for body in parse_bodies(body)? {
                results.push(calc.position_on(body, date)?);
            }
            if cli.json {
                print_json(&results)?;
            } else {
                println!("{date}  ahargana {}", results[0].ahargana);
                results.iter().for_each(print_position);
            }
        }

        Commands::Lunar { date } => {
            let date = parse_date(date)?;
            let l = calc.lunar_phenomena(date.year(), date.month(), date.day())?;
            if cli.json {
                print_json(&l)?;
            } else {
                println!("{date}");
                println!(
                    "  Moon {:.4} deg  Sun {:.4} deg  Node {:.4} deg",
                    l.moon_longitude, l.sun_longitude, l.node_longitude
                );
                println!("  Latitude: {:.4} deg", l.latitude.latitude);
                println!(
                    "  Tithi {} ({:.1}% done, next in {:.2} h)",
                    l.tithi.tithi_number,
                    l.tithi.tithi_fraction * 100.0,
                    l.tithi.time_to_next_tithi_hours
                );
                for e in [&l.solar_eclipse, &l.lunar_eclipse] {
                    println!(
                        "  {:?} eclipse: {}  (elongation {:.3}, node distance {:.3}, magnitude {:.3})",
                        e.kind,
                        if e.eclipse_occurring { "possible" } else { "no" },
                        e.elongation,
                        e.node_distance,
                        e.magnitude
                    );
                }
            }
        }

        Commands::Conjunctions { date } => {
            let date = parse_date(date)?;
            let r = calc.conjunctions(date.year(), date.month(), date.day())?;
            if cli.json {
                print_json(&r)?;
            } else {
                println!("{date}");
                for p in &r.positions {
                    println!("  {:<8} {:>10.4} deg", p.body.name(), p.longitude);
                }
                if r.pairs.is_empty() {
                    println!("  No conjunctions or aspects");
                }
                for p in &r.pairs {
                    let c = &p.conjunction;
                    println!(
                        "  {:<18} sep {:>7.3}  {}{}{}",
                        c.label(),
                        c.separation,
                        p.configuration.configuration,
                        if c.is_close && !c.is_exact { " (close)" } else { "" },
                        if c.is_planetary_war { " planetary war" } else { "" }
                    );
                }
                match r.group.min_longitude_range {
                    Some(span) => println!(
                        "  Group: {} (span {:.2} deg, limit {:.1})",
                        if r.group.is_group { "yes" } else { "no" },
                        span,
                        r.group.group_limit
                    ),
                    None => println!("  Group: no"),
                }
            }
        }

        Commands::Validate => {
            let report = calc.validate()?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!(
                    "Epoch: JDN {} ahargana {} ({})",
                    report.epoch.epoch_jdn,
                    report.epoch.epoch_ahargana,
                    if report.epoch.passed { "ok" } else { "FAILED" }
                );
                println!("Mean motion vs modern sidereal periods:");
                for m in &report.mean_motion {
                    println!(
                        "  {:<8} {:.8} vs {:.8} deg/day  period error {:.4} d",
                        m.body.name(),
                        m.ss_daily_motion,
                        m.modern_daily_motion,
                        m.period_error
                    );
                }
                println!("First correction sign test:");
                for c in &report.manda_physics.cases {
                    println!(
                        "  kendra {:>5.1}: {} (expected {}) {}",
                        c.kendra,
                        c.actual,
                        c.expected,
                        if c.correct { "ok" } else { "FAILED" }
                    );
                }
                for p in &report.positions {
                    println!(
                        "{} ({}): Sun {:.4} deg  Moon {:.4} deg",
                        p.description, p.date, p.sun_longitude, p.moon_longitude
                    );
                }
                println!("Overall: {}", if report.passed() { "passed" } else { "FAILED" });
            }
        }

        Commands::Ahargana { date } => {
            let date = parse_date(date)?;
            let days = ahargana(date.year(), date.month(), date.day())?;
            println!("{date}: JDN {}  ahargana {days}", date.jdn());
        }

        Commands::Dms { deg } => {
            println!("{}", deg_to_dms(*deg));
        }
    }

    if let Some(path) = &cli.log_file {
        calc.save_log(path)
            .with_context(|| format!("saving correction log to {}", path.display()))?;
        info!(path = %path.display(), entries = calc.log().len(), "correction log saved");
    }
    Ok(())
}
