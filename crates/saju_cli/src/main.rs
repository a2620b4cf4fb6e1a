use std::process::ExitCode;

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use saju_calendar::{
    BirthInput, CalendarType, Gender, NoLunarSource, NullTermSource, SolarTermProvider,
    StaticCityTable,
};
use saju_engine::{Providers, analyze, derive_chart};
use tracing::error;

#[derive(Parser)]
#[command(name = "saju", about = "Four-pillar chart and luck-trajectory CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BirthArgs {
    /// Civil birth date, YYYYMMDD
    #[arg(long)]
    date: String,
    /// Civil birth time, HHMM
    #[arg(long, default_value = "1230")]
    time: String,
    /// Gender: male, female, or unknown
    #[arg(long, default_value = "unknown")]
    gender: String,
    /// Interpret the date as a lunar calendar date
    #[arg(long)]
    lunar: bool,
    /// The lunar month is a leap month
    #[arg(long)]
    leap_month: bool,
    /// The birth time is unknown (noon placeholder is used)
    #[arg(long)]
    time_unknown: bool,
    /// Birth outside the reference timezone
    #[arg(long)]
    overseas: bool,
    /// City of an overseas birth
    #[arg(long, default_value = "")]
    city: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Full chart analysis as pretty-printed JSON
    Analyze {
        #[command(flatten)]
        birth: BirthArgs,
        /// Anchor year for the climate trend (defaults to the current year)
        #[arg(long)]
        reference_year: Option<i32>,
    },
    /// Just the four natal pillars
    Pillars {
        #[command(flatten)]
        birth: BirthArgs,
    },
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    match s.to_ascii_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        "unknown" => Ok(Gender::Unknown),
        other => Err(format!("unrecognized gender {other:?}")),
    }
}

fn birth_input(args: &BirthArgs) -> Result<BirthInput, String> {
    Ok(BirthInput {
        calendar: if args.lunar {
            CalendarType::Lunar
        } else {
            CalendarType::Solar
        },
        date: args.date.clone(),
        time: args.time.clone(),
        gender: parse_gender(&args.gender)?,
        leap_month: args.leap_month,
        time_unknown: args.time_unknown,
        overseas: args.overseas,
        city: args.city.clone(),
    })
}

fn offline_providers() -> Providers {
    Providers {
        terms: SolarTermProvider::new(Box::new(NullTermSource)),
        lunar: Box::new(NoLunarSource),
        cities: Box::new(StaticCityTable),
    }
}

fn fail(message: &str) -> ExitCode {
    error!("{message}");
    let body = serde_json::json!({ "error": message });
    eprintln!("{body}");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            birth,
            reference_year,
        } => {
            let input = match birth_input(&birth) {
                Ok(input) => input,
                Err(msg) => return fail(&msg),
            };
            let reference = reference_year.unwrap_or_else(|| chrono::Utc::now().year());
            match analyze(&input, &offline_providers(), reference) {
                Ok(report) => match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(err) => return fail(&format!("serialization failed: {err}")),
                },
                Err(err) => return fail(&err.to_string()),
            }
        }

        Commands::Pillars { birth } => {
            let input = match birth_input(&birth) {
                Ok(input) => input,
                Err(msg) => return fail(&msg),
            };
            let providers = offline_providers();
            let normalized = match saju_calendar::normalize_birth(
                &input,
                providers.lunar.as_ref(),
                providers.cities.as_ref(),
            ) {
                Ok(n) => n,
                Err(err) => return fail(&err.to_string()),
            };
            match derive_chart(&normalized, &providers.terms) {
                Ok(derived) => {
                    let chart = derived.chart;
                    println!(
                        "{} ({})  {} ({})  {} ({})  {} ({})",
                        chart.year.name(),
                        chart.year.hanja(),
                        chart.month.name(),
                        chart.month.hanja(),
                        chart.day.name(),
                        chart.day.hanja(),
                        chart.hour.name(),
                        chart.hour.hanja()
                    );
                    if !derived.hour_candidates.is_empty() {
                        let names: Vec<String> =
                            derived.hour_candidates.iter().map(|g| g.name()).collect();
                        println!("hour candidates: {}", names.join(", "));
                    }
                }
                Err(err) => return fail(&err.to_string()),
            }
        }
    }

    ExitCode::SUCCESS
}
