//! Simplified Woningwaarderingsstelsel (WWS) point calculator.
//!
//! Maps the physical attributes of a unit to a point total and the maximum
//! rent those points allow. The weights approximate the category structure of
//! the Dutch rent-point system; they are not the official schedule.

mod attributes;
mod rules;

pub use attributes::{ApartmentAttributes, EnergyLabel};

use serde::{Deserialize, Serialize};

/// Euro of monthly rent allowed per WWS point.
pub const RENT_PER_POINT: f64 = 5.50;

/// Scoring category, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WwsCategory {
    Size,
    Rooms,
    Valuation,
    EnergyLabel,
    Kitchen,
    Bathroom,
    OutdoorSpace,
    StorageSpace,
    Heating,
    Insulation,
    Monument,
}

impl WwsCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Size => "Surface area",
            Self::Rooms => "Rooms",
            Self::Valuation => "WOZ valuation",
            Self::EnergyLabel => "Energy label",
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::OutdoorSpace => "Outdoor space",
            Self::StorageSpace => "Storage space",
            Self::Heating => "Heating",
            Self::Insulation => "Insulation",
            Self::Monument => "Monument status",
        }
    }
}

/// Points a single category added to (or removed from) the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: WwsCategory,
    pub points: f64,
    pub detail: String,
}

/// Final point total and the rent cap derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub points: u32,
    #[serde(rename = "maxRent")]
    pub max_rent: f64,
}

impl ScoreResult {
    /// Builds a result from an accumulated total, clamping negatives to zero.
    ///
    /// Points round half to even, so a total of 12.5 becomes 12 and 13.5
    /// becomes 14. A NaN total scores zero; totals beyond `u32::MAX`,
    /// including an overflowed `+inf`, saturate at `u32::MAX`. The rent is
    /// rounded to cents, half away from zero.
    pub fn from_total(total: f64) -> Self {
        let clamped = if total.is_nan() { 0.0 } else { total.max(0.0) };
        let points = clamped.round_ties_even() as u32;
        Self {
            points,
            max_rent: max_rent_for(points),
        }
    }
}

/// Maximum monthly rent for a point total, in euro with two decimals.
pub fn max_rent_for(points: u32) -> f64 {
    round_cents(f64::from(points) * RENT_PER_POINT)
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score with the per-category trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WwsAssessment {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub raw_total: f64,
    pub components: Vec<ScoreComponent>,
}

/// Scores a unit and keeps the category breakdown for auditing.
pub fn assess(attributes: &ApartmentAttributes) -> WwsAssessment {
    let (components, raw_total) = rules::score_attributes(attributes);
    WwsAssessment {
        result: ScoreResult::from_total(raw_total),
        raw_total,
        components,
    }
}

/// Computes WWS points and the maximum legal rent. Never fails: absent or
/// unusable attributes contribute nothing.
pub fn calculate_wws(attributes: &ApartmentAttributes) -> ScoreResult {
    assess(attributes).result
}
