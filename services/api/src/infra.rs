use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wws_listings::listings::{
    Apartment, ApartmentId, ApartmentRepository, ListingQuery, RepositoryError, ScoredListing,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct CatalogRows {
    rows: BTreeMap<ApartmentId, Apartment>,
    last_id: u64,
}

impl CatalogRows {
    fn store(&mut self, listing: ScoredListing) -> Apartment {
        self.last_id += 1;
        let id = ApartmentId(self.last_id);
        let apartment = Apartment::from_scored(id, listing, Utc::now());
        self.rows.insert(id, apartment.clone());
        apartment
    }
}

/// Process-local catalog backing the service binary.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApartmentRepository {
    catalog: Arc<Mutex<CatalogRows>>,
}

impl ApartmentRepository for InMemoryApartmentRepository {
    fn insert(&self, listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        let mut guard = self.catalog.lock().expect("repository mutex poisoned");
        Ok(guard.store(listing))
    }

    fn update(&self, id: ApartmentId, listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        let mut guard = self.catalog.lock().expect("repository mutex poisoned");
        let created_at = guard
            .rows
            .get(&id)
            .map(|existing| existing.created_at)
            .ok_or(RepositoryError::NotFound(id))?;

        let mut apartment = Apartment::from_scored(id, listing, Utc::now());
        apartment.created_at = created_at;
        guard.rows.insert(id, apartment.clone());
        Ok(apartment)
    }

    fn fetch(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let guard = self.catalog.lock().expect("repository mutex poisoned");
        Ok(guard.rows.get(&id).cloned())
    }

    fn list(&self, query: &ListingQuery) -> Result<Vec<Apartment>, RepositoryError> {
        let guard = self.catalog.lock().expect("repository mutex poisoned");
        Ok(query.apply(guard.rows.values()))
    }

    fn delete(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let mut guard = self.catalog.lock().expect("repository mutex poisoned");
        Ok(guard.rows.remove(&id))
    }

    fn replace_all(&self, listings: Vec<ScoredListing>) -> Result<Vec<Apartment>, RepositoryError> {
        let mut guard = self.catalog.lock().expect("repository mutex poisoned");
        *guard = CatalogRows::default();
        Ok(listings
            .into_iter()
            .map(|listing| guard.store(listing))
            .collect())
    }
}
