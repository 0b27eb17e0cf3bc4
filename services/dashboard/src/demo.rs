use clap::Args;
use freshscore::config::AppConfig;
use freshscore::error::AppError;
use freshscore::freshness::{
    DisabledAnimationSource, FreshnessDashboard, ItemReading, PerishableCategory, ScoreReport,
    ScoringModel,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Item category, e.g. milk, frozen_food, vaccines
    #[arg(long, default_value = "strawberries")]
    pub(crate) category: PerishableCategory,
    /// Internal temperature in °C (0 to 25)
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    pub(crate) temperature: f64,
    /// Relative humidity in percent (30 to 100)
    #[arg(long, default_value_t = 75)]
    pub(crate) humidity: u8,
    /// Hours in transit (0 to 48)
    #[arg(long, default_value_t = 8.0)]
    pub(crate) duration_hours: f64,
    /// Distance covered in km (0 to 2000)
    #[arg(long, default_value_t = 250.0)]
    pub(crate) distance_km: f64,
    /// Number of door openings (0 to 10)
    #[arg(long, default_value_t = 2)]
    pub(crate) door_openings: u8,
    /// Override the number of trees in the throwaway forest
    #[arg(long)]
    pub(crate) trees: Option<usize>,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let mut scoring = config.scoring;
    if let Some(trees) = args.trees {
        scoring.trees = trees;
    }

    let reading = ItemReading::new(
        args.category,
        args.temperature,
        args.humidity,
        args.duration_hours,
        args.distance_km,
        args.door_openings,
    )?;

    let dashboard = FreshnessDashboard::new(
        ScoringModel::new(scoring),
        Arc::new(DisabledAnimationSource),
    );
    let report = dashboard.submit(reading)?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {}", err),
        }
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &ScoreReport) {
    let reading = &report.reading;
    println!("FreshScore evaluation");
    println!(
        "Item: {} | {:.1} °C | {}% RH | {:.1} h | {:.0} km | {} door openings",
        reading.category().label(),
        reading.temperature(),
        reading.humidity(),
        reading.duration_hours(),
        reading.distance_km(),
        reading.door_openings()
    );

    println!("\nEncoded features");
    for (name, value) in report.features.iter() {
        if value != 0.0 || !name.starts_with("category_") {
            println!("  {:<24} {}", name, value);
        }
    }

    println!("\nFreshScore: {}", report.score);
    println!("Tier: {}", report.tier.label());
    println!("  {}", report.tier.headline());
    println!("  {}", report.tier.guidance());
    println!(
        "Evaluated at {}",
        report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
