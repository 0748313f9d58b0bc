use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::comparison::RentComparison;
use super::domain::{Apartment, ApartmentDraft, ApartmentId, ListingQuery, ScoredListing};
use super::repository::{ApartmentRepository, RepositoryError};
use super::validation::{validate_draft, ValidationError};
use crate::scoring::{self, ApartmentAttributes, WwsAssessment};

/// Service composing validation, WWS scoring, and the listing repository.
pub struct ListingService<R> {
    repository: Arc<R>,
}

impl<R> ListingService<R>
where
    R: ApartmentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self, query: &ListingQuery) -> Result<Vec<Apartment>, ListingServiceError> {
        Ok(self.repository.list(query)?)
    }

    pub fn get(&self, id: ApartmentId) -> Result<Apartment, ListingServiceError> {
        let apartment = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound(id))?;
        Ok(apartment)
    }

    /// Validate and score a new listing, then persist it with the derived
    /// WWS fields.
    pub fn create(&self, draft: ApartmentDraft) -> Result<Apartment, ListingServiceError> {
        let scored = score_draft(draft)?;
        let stored = self.repository.insert(scored)?;
        info!(
            id = %stored.id,
            title = %stored.listing.title,
            points = stored.wws_points,
            max_rent = stored.wws_max_rent,
            "apartment created"
        );
        Ok(stored)
    }

    /// Replace a listing's fields and recompute its score.
    pub fn update(
        &self,
        id: ApartmentId,
        draft: ApartmentDraft,
    ) -> Result<Apartment, ListingServiceError> {
        let scored = score_draft(draft)?;
        let stored = self.repository.update(id, scored)?;
        info!(
            id = %stored.id,
            points = stored.wws_points,
            max_rent = stored.wws_max_rent,
            "apartment updated"
        );
        Ok(stored)
    }

    pub fn delete(&self, id: ApartmentId) -> Result<Apartment, ListingServiceError> {
        let removed = self
            .repository
            .delete(id)?
            .ok_or(RepositoryError::NotFound(id))?;
        info!(id = %removed.id, "apartment deleted");
        Ok(removed)
    }

    /// Replace the catalog with a batch of drafts.
    ///
    /// Any invalid record or storage failure aborts the whole batch.
    pub fn seed(&self, drafts: Vec<ApartmentDraft>) -> Result<SeedSummary, ListingServiceError> {
        if drafts.is_empty() {
            warn!("seed batch is empty; catalog left untouched");
            return Ok(SeedSummary::default());
        }

        info!(count = drafts.len(), "scoring seed batch");
        let mut batch = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.into_iter().enumerate() {
            let title = draft.title.clone();
            let scored = score_draft(draft).map_err(|err| match err {
                ListingServiceError::Validation(source) => ListingServiceError::InvalidSeedRecord {
                    index,
                    title,
                    source,
                },
                other => other,
            })?;
            batch.push(scored);
        }

        let stored = self.repository.replace_all(batch)?;
        for apartment in &stored {
            info!(
                id = %apartment.id,
                title = %apartment.listing.title,
                points = apartment.wws_points,
                max_rent = apartment.wws_max_rent,
                "seeded apartment"
            );
        }

        Ok(SeedSummary {
            inserted: stored.iter().map(SeededApartment::from).collect(),
        })
    }
}

/// Score attributes without storing anything, optionally comparing an
/// advertised rent against the result.
pub fn assess_listing(
    attributes: &ApartmentAttributes,
    advertised_rent: Option<f64>,
) -> ListingAssessment {
    let assessment = scoring::assess(attributes);
    let comparison = advertised_rent
        .filter(|rent| rent.is_finite())
        .map(|rent| RentComparison::new(rent, &assessment.result));
    ListingAssessment {
        assessment,
        comparison,
    }
}

fn score_draft(draft: ApartmentDraft) -> Result<ScoredListing, ListingServiceError> {
    validate_draft(&draft)?;
    let score = scoring::calculate_wws(&draft.attributes);
    Ok(ScoredListing { draft, score })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingAssessment {
    #[serde(flatten)]
    pub assessment: WwsAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<RentComparison>,
}

/// Outcome of a seed run, one entry per stored row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedSummary {
    pub inserted: Vec<SeededApartment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeededApartment {
    pub id: ApartmentId,
    pub title: String,
    pub wws_points: u32,
    pub wws_max_rent: f64,
}

impl From<&Apartment> for SeededApartment {
    fn from(apartment: &Apartment) -> Self {
        Self {
            id: apartment.id,
            title: apartment.listing.title.clone(),
            wws_points: apartment.wws_points,
            wws_max_rent: apartment.wws_max_rent,
        }
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("seed record {index} ('{title}') is invalid: {source}")]
    InvalidSeedRecord {
        index: usize,
        title: String,
        source: ValidationError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
