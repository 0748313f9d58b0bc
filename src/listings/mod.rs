//! Apartment catalog: validation, scoring on write, storage seam, and HTTP
//! routes.

pub mod comparison;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use comparison::{ApartmentView, RentComparison, RentVerdict};
pub use domain::{Apartment, ApartmentDraft, ApartmentId, ListingQuery, ScoredListing};
pub use repository::{ApartmentRepository, RepositoryError};
pub use router::{listing_router, CalculateRequest};
pub use service::{
    assess_listing, ListingAssessment, ListingService, ListingServiceError, SeedSummary,
    SeededApartment,
};
pub use validation::{validate_draft, FieldViolation, ValidationError};
