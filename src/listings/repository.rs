use super::domain::{Apartment, ApartmentId, ListingQuery, ScoredListing};

/// Storage abstraction so the listing service can run against any backend.
///
/// Implementations assign ids and timestamps, the way a database would for
/// serial keys and `CURRENT_TIMESTAMP` defaults.
pub trait ApartmentRepository: Send + Sync {
    fn insert(&self, listing: ScoredListing) -> Result<Apartment, RepositoryError>;
    fn update(&self, id: ApartmentId, listing: ScoredListing)
        -> Result<Apartment, RepositoryError>;
    fn fetch(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError>;
    fn list(&self, query: &ListingQuery) -> Result<Vec<Apartment>, RepositoryError>;
    fn delete(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError>;
    /// Clears the catalog, restarts the id sequence at 1, and stores the
    /// batch. Either the whole batch is stored or nothing changes.
    fn replace_all(&self, listings: Vec<ScoredListing>) -> Result<Vec<Apartment>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("apartment {0} not found")]
    NotFound(ApartmentId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
