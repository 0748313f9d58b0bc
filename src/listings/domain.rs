use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::{ApartmentAttributes, ScoreResult};

/// Sequential identifier assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApartmentId(pub u64);

impl fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Listing payload accepted on create, update, and seed import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentDraft {
    pub title: String,
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub advertised_rent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_date: Option<NaiveDate>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(flatten)]
    pub attributes: ApartmentAttributes,
}

/// Draft paired with the score computed for it, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredListing {
    pub draft: ApartmentDraft,
    pub score: ScoreResult,
}

/// Stored listing row including the derived WWS fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: ApartmentId,
    #[serde(flatten)]
    pub listing: ApartmentDraft,
    pub wws_points: u32,
    pub wws_max_rent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Apartment {
    pub fn from_scored(id: ApartmentId, scored: ScoredListing, now: DateTime<Utc>) -> Self {
        Self {
            id,
            listing: scored.draft,
            wws_points: scored.score.points,
            wws_max_rent: scored.score.max_rent,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn score(&self) -> ScoreResult {
        ScoreResult {
            points: self.wws_points,
            max_rent: self.wws_max_rent,
        }
    }
}

/// Filter and paging options for the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl ListingQuery {
    pub fn matches(&self, apartment: &Apartment) -> bool {
        match self.city.as_deref().map(str::trim) {
            Some(city) if !city.is_empty() => apartment.listing.city.eq_ignore_ascii_case(city),
            _ => true,
        }
    }

    /// Filters, orders newest first, then applies offset and limit.
    pub fn apply<'a, I>(&self, apartments: I) -> Vec<Apartment>
    where
        I: IntoIterator<Item = &'a Apartment>,
    {
        let mut selected: Vec<Apartment> = apartments
            .into_iter()
            .filter(|apartment| self.matches(apartment))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        selected
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}
