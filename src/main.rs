//! Life Expectancy CLI
//!
//! Prints personalized life-expectancy statistics for an age, sex and country

use anyhow::{Context, Result};
use clap::Parser;
use life_expectancy::analysis::RiskOutlook;
use life_expectancy::table::{DEFAULT_COUNTRY, DEFAULT_DATA_PATH};
use life_expectancy::{format_age, format_percent, AnalysisConfig, Engine, Query, Sex};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Personal life expectancy from population mortality tables")]
struct Args {
    /// Current age in whole years
    #[arg(short, long)]
    age: usize,

    /// Sex: F, M, or empty for the combined population
    #[arg(short, long, default_value = "")]
    sex: Sex,

    /// Country code as listed in countries.json
    #[arg(short, long, default_value = DEFAULT_COUNTRY)]
    country: String,

    /// Directory holding <country>.csv tables and countries.json
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Compare raw accumulated probability against 1% instead of the normalized 0.8%
    #[arg(long)]
    legacy_threshold: bool,

    /// Write the remaining-life series to this CSV file
    #[arg(long)]
    chart_csv: Option<PathBuf>,

    /// Print statistics for every supported age
    #[arg(long)]
    life_table: bool,

    /// Print the full evaluation as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if args.legacy_threshold {
        AnalysisConfig::legacy()
    } else {
        AnalysisConfig::default()
    };
    let engine = Engine::from_directory(&args.data_dir, config);
    let catalog = engine.catalog();
    let location = catalog
        .display_name(&args.country)
        .unwrap_or(&args.country)
        .to_string();

    let query = Query::new(args.country.clone(), args.sex, args.age);
    let evaluation = engine
        .evaluate(&query)
        .with_context(|| format!("Failed to evaluate {:?}", query))?;
    let stats = &evaluation.statistics;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        if stats.age != args.age {
            println!("Age {} is beyond the {} table, using {}", args.age, location, stats.age);
        }
        println!("Location: {} ({})", location, args.sex);
        println!("  Life expectancy at birth: {}", format_age(stats.mean_at_birth));
        println!(
            "  Died before age {}: {}",
            stats.age,
            format_percent(stats.killed_off)
        );
        println!("  Life expectancy at {}: {}", stats.age, format_age(stats.mean));
        println!(
            "  Years still to go: {}",
            format_age(stats.remaining_life_expectancy())
        );
        println!("  There is also {}", RiskOutlook::classify(stats).describe());
    }

    if let Some(path) = &args.chart_csv {
        let file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        evaluation.chart.write_csv(file)?;
        println!("\nRemaining-life series written to: {}", path.display());
    }

    if args.life_table {
        let rows = engine.life_table(&args.country, args.sex)?;
        println!(
            "\n{:>4} {:>10} {:>8} {:>8} {:>6} {:>10}",
            "Age", "Died", "Mean", "Left", "Years", "Risk"
        );
        println!("{}", "-".repeat(52));
        for row in &rows {
            println!(
                "{:>4} {:>10} {:>8} {:>8} {:>6} {:>10}",
                row.age,
                format_percent(row.killed_off),
                format_age(row.mean),
                format_age(row.remaining_years),
                row.years_to_go.map_or("-".to_string(), |y| y.to_string()),
                row.impending_death_probability
                    .map_or("-".to_string(), format_percent),
            );
        }
    }

    Ok(())
}
