use clap::Args;
use std::path::PathBuf;
use wws_listings::error::AppError;
use wws_listings::listings::{assess_listing, validate_draft, ListingAssessment};
use wws_listings::scoring::{calculate_wws, ApartmentAttributes};
use wws_listings::seed::SeedImporter;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Floor area in square meters
    #[arg(long, default_value_t = 0.0)]
    pub(crate) size_m2: f64,
    /// Number of heated rooms
    #[arg(long, default_value_t = 0)]
    pub(crate) num_rooms: u32,
    /// WOZ valuation in euro
    #[arg(long)]
    pub(crate) woz_value: Option<f64>,
    /// Energy label (A-G)
    #[arg(long)]
    pub(crate) energy_label: Option<String>,
    /// Number of quality kitchen appliances
    #[arg(long)]
    pub(crate) kitchen_appliances: Option<u32>,
    /// Number of quality bathroom fixtures
    #[arg(long)]
    pub(crate) bathroom_fixtures: Option<u32>,
    /// Balcony or garden area in square meters
    #[arg(long)]
    pub(crate) outdoor_space_m2: Option<f64>,
    /// Storage area in square meters
    #[arg(long)]
    pub(crate) storage_space_m2: Option<f64>,
    /// Heating type, e.g. central or district
    #[arg(long)]
    pub(crate) heating_type: Option<String>,
    /// Insulation level, e.g. full or double_glazing
    #[arg(long)]
    pub(crate) insulation_level: Option<String>,
    /// Mark the unit as a listed monument
    #[arg(long)]
    pub(crate) monument: bool,
    /// Advertised monthly rent to compare against the maximum
    #[arg(long)]
    pub(crate) advertised_rent: Option<f64>,
}

impl ScoreArgs {
    fn attributes(&self) -> ApartmentAttributes {
        ApartmentAttributes {
            size_m2: self.size_m2,
            num_rooms: self.num_rooms,
            woz_value: self.woz_value,
            energy_label: self.energy_label.clone(),
            kitchen_appliances_count: self.kitchen_appliances,
            bathroom_fixtures_count: self.bathroom_fixtures,
            outdoor_space_m2: self.outdoor_space_m2,
            storage_space_m2: self.storage_space_m2,
            heating_type: self.heating_type.clone(),
            insulation_level: self.insulation_level.clone(),
            is_monument: self.monument.then_some(true),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct SeedArgs {
    /// JSON array or CSV file of listings
    pub(crate) path: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) {
    let assessed = assess_listing(&args.attributes(), args.advertised_rent);
    for line in render_assessment(&assessed) {
        println!("{line}");
    }
}

pub(crate) fn run_seed_preview(args: SeedArgs) -> Result<(), AppError> {
    let drafts = SeedImporter::from_path(&args.path)?;
    println!("Seed preview: {} listing(s) from {}", drafts.len(), args.path.display());

    let mut invalid = 0;
    for (index, draft) in drafts.iter().enumerate() {
        if let Err(err) = validate_draft(draft) {
            invalid += 1;
            println!("- #{index} {}: rejected ({err})", draft.title);
            continue;
        }

        let score = calculate_wws(&draft.attributes);
        println!(
            "- #{index} {}: {} points, max rent {:.2}, advertised {:.2}",
            draft.title, score.points, score.max_rent, draft.advertised_rent
        );
    }

    if invalid > 0 {
        println!("\n{invalid} invalid record(s); seeding this file would abort the batch.");
    }

    Ok(())
}

fn render_assessment(assessed: &ListingAssessment) -> Vec<String> {
    let assessment = &assessed.assessment;
    let mut lines = vec!["WWS point breakdown".to_string()];

    if assessment.components.is_empty() {
        lines.push("- no scoring attributes supplied".to_string());
    }
    for component in &assessment.components {
        lines.push(format!(
            "- {}: {:+} ({})",
            component.category.label(),
            component.points,
            component.detail
        ));
    }

    if assessment.raw_total < 0.0 {
        lines.push(format!(
            "Raw total {} clamped to 0",
            assessment.raw_total
        ));
    }
    lines.push(format!("Total points: {}", assessment.result.points));
    lines.push(format!(
        "Maximum legal rent: {:.2}",
        assessment.result.max_rent
    ));

    if let Some(comparison) = &assessed.comparison {
        lines.push(format!("Advertised rent: {:.2}", comparison.advertised_rent));
        lines.push(comparison.summary.clone());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_args_map_monument_flag() {
        let args = ScoreArgs {
            size_m2: 40.0,
            monument: true,
            ..ScoreArgs::default()
        };
        let attributes = args.attributes();
        assert_eq!(attributes.is_monument, Some(true));
        assert!(ScoreArgs::default().attributes().is_monument.is_none());
    }

    #[test]
    fn render_reports_clamped_total_and_comparison() {
        let args = ScoreArgs {
            size_m2: 1.0,
            energy_label: Some("G".to_string()),
            advertised_rent: Some(400.0),
            ..ScoreArgs::default()
        };
        let assessed = assess_listing(&args.attributes(), args.advertised_rent);
        let lines = render_assessment(&assessed);

        assert!(lines.contains(&"- Energy label: -10 (energy label G)".to_string()));
        assert!(lines.contains(&"Raw total -9 clamped to 0".to_string()));
        assert!(lines.contains(&"Total points: 0".to_string()));
        assert!(lines.contains(&"Maximum legal rent: 0.00".to_string()));
        assert!(lines.iter().any(|line| line.contains("400.00 higher")));
    }
}
