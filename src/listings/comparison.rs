use serde::{Deserialize, Serialize};

use super::domain::Apartment;
use crate::scoring::{round_cents, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentVerdict {
    AboveMaximum,
    BelowMaximum,
    AtMaximum,
}

impl RentVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AboveMaximum => "Above maximum",
            Self::BelowMaximum => "Below maximum",
            Self::AtMaximum => "At maximum",
        }
    }
}

/// Advertised rent measured against the WWS maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentComparison {
    pub advertised_rent: f64,
    pub max_rent: f64,
    /// `advertised_rent - max_rent`, in cents precision.
    pub difference: f64,
    pub verdict: RentVerdict,
    pub summary: String,
}

impl RentComparison {
    pub fn new(advertised_rent: f64, score: &ScoreResult) -> Self {
        let max_rent = score.max_rent;
        let difference = round_cents(advertised_rent - max_rent);
        let verdict = if difference > 0.0 {
            RentVerdict::AboveMaximum
        } else if difference < 0.0 {
            RentVerdict::BelowMaximum
        } else {
            RentVerdict::AtMaximum
        };

        let summary = match verdict {
            RentVerdict::AboveMaximum => format!(
                "The advertised rent is {} higher than the maximum legal rent based on WWS points.",
                format_eur(difference)
            ),
            RentVerdict::BelowMaximum => format!(
                "The advertised rent is {} lower than the maximum legal rent based on WWS points.",
                format_eur(-difference)
            ),
            RentVerdict::AtMaximum => {
                "The advertised rent matches the maximum legal rent based on WWS points."
                    .to_string()
            }
        };

        Self {
            advertised_rent,
            max_rent,
            difference,
            verdict,
            summary,
        }
    }
}

/// Stored apartment as exposed over HTTP, with its rent comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApartmentView {
    #[serde(flatten)]
    pub apartment: Apartment,
    pub rent_comparison: RentComparison,
}

impl From<Apartment> for ApartmentView {
    fn from(apartment: Apartment) -> Self {
        let rent_comparison = RentComparison::new(apartment.listing.advertised_rent, &apartment.score());
        Self {
            apartment,
            rent_comparison,
        }
    }
}

fn format_eur(amount: f64) -> String {
    format!("\u{20ac}{amount:.2}")
}
