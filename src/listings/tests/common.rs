use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use crate::listings::domain::{
    Apartment, ApartmentDraft, ApartmentId, ListingQuery, ScoredListing,
};
use crate::listings::repository::{ApartmentRepository, RepositoryError};
use crate::listings::service::ListingService;
use crate::scoring::ApartmentAttributes;

pub(crate) fn attributes() -> ApartmentAttributes {
    ApartmentAttributes {
        size_m2: 75.0,
        num_rooms: 2,
        woz_value: Some(250_000.0),
        energy_label: Some("B".to_string()),
        outdoor_space_m2: Some(10.0),
        heating_type: Some("central".to_string()),
        insulation_level: Some("full".to_string()),
        ..ApartmentAttributes::default()
    }
}

pub(crate) fn draft(title: &str) -> ApartmentDraft {
    ApartmentDraft {
        title: title.to_string(),
        address: "Prinsengracht 263".to_string(),
        city: "Amsterdam".to_string(),
        postal_code: Some("1016 GV".to_string()),
        latitude: Some(52.3752),
        longitude: Some(4.8840),
        advertised_rent: 1_200.0,
        description: Some("Bright two-room apartment on the canal.".to_string()),
        num_bedrooms: Some(1),
        num_bathrooms: Some(1),
        property_type: Some("apartment".to_string()),
        year_built: Some(1890),
        availability_date: NaiveDate::from_ymd_opt(2025, 11, 1),
        images: vec!["https://img.example/canal-1.jpg".to_string()],
        features: vec!["balcony".to_string(), "dishwasher".to_string()],
        attributes: attributes(),
    }
}

pub(crate) fn draft_in(title: &str, city: &str) -> ApartmentDraft {
    ApartmentDraft {
        city: city.to_string(),
        ..draft(title)
    }
}

pub(crate) fn build_service() -> (ListingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ListingService::new(repository.clone());
    (service, repository)
}

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<ApartmentId, Apartment>,
    next_id: u64,
    ticks: i64,
}

impl MemoryState {
    fn allocate_id(&mut self) -> ApartmentId {
        self.next_id += 1;
        ApartmentId(self.next_id)
    }

    /// Deterministic clock so ordering by `created_at` is observable.
    fn tick(&mut self) -> chrono::DateTime<Utc> {
        self.ticks += 1;
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid base time")
            + Duration::seconds(self.ticks)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub(crate) fn len(&self) -> usize {
        self.state.lock().expect("repository mutex poisoned").rows.len()
    }
}

impl ApartmentRepository for MemoryRepository {
    fn insert(&self, listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let id = state.allocate_id();
        let now = state.tick();
        let apartment = Apartment::from_scored(id, listing, now);
        state.rows.insert(id, apartment.clone());
        Ok(apartment)
    }

    fn update(&self, id: ApartmentId, listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let now = state.tick();
        let existing = state.rows.get(&id).ok_or(RepositoryError::NotFound(id))?;
        let mut apartment = Apartment::from_scored(id, listing, now);
        apartment.created_at = existing.created_at;
        state.rows.insert(id, apartment.clone());
        Ok(apartment)
    }

    fn fetch(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.rows.get(&id).cloned())
    }

    fn list(&self, query: &ListingQuery) -> Result<Vec<Apartment>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(query.apply(state.rows.values()))
    }

    fn delete(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.rows.remove(&id))
    }

    fn replace_all(&self, listings: Vec<ScoredListing>) -> Result<Vec<Apartment>, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        state.rows.clear();
        state.next_id = 0;
        let mut stored = Vec::with_capacity(listings.len());
        for listing in listings {
            let id = state.allocate_id();
            let now = state.tick();
            let apartment = Apartment::from_scored(id, listing, now);
            state.rows.insert(id, apartment.clone());
            stored.push(apartment);
        }
        Ok(stored)
    }
}

pub(crate) struct UnavailableRepository;

impl ApartmentRepository for UnavailableRepository {
    fn insert(&self, _listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        Err(unavailable())
    }

    fn update(&self, _id: ApartmentId, _listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        Err(unavailable())
    }

    fn fetch(&self, _id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        Err(unavailable())
    }

    fn list(&self, _query: &ListingQuery) -> Result<Vec<Apartment>, RepositoryError> {
        Err(unavailable())
    }

    fn delete(&self, _id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        Err(unavailable())
    }

    fn replace_all(&self, _listings: Vec<ScoredListing>) -> Result<Vec<Apartment>, RepositoryError> {
        Err(unavailable())
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}
