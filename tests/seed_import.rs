use chrono::{TimeZone, Utc};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use wws_listings::listings::{
    Apartment, ApartmentId, ApartmentRepository, ListingQuery, ListingService,
    ListingServiceError, RepositoryError, ScoredListing,
};
use wws_listings::seed::{SeedFormat, SeedImporter};

#[derive(Default)]
struct VecRepository {
    rows: Mutex<Vec<Apartment>>,
}

impl VecRepository {
    fn stored(&self, listing: ScoredListing, index: usize) -> Apartment {
        let stamp = Utc
            .timestamp_opt(1_700_000_000 + index as i64, 0)
            .single()
            .expect("valid timestamp");
        Apartment::from_scored(ApartmentId(index as u64 + 1), listing, stamp)
    }
}

impl ApartmentRepository for VecRepository {
    fn insert(&self, listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let apartment = self.stored(listing, rows.len());
        rows.push(apartment.clone());
        Ok(apartment)
    }

    fn update(&self, id: ApartmentId, _listing: ScoredListing) -> Result<Apartment, RepositoryError> {
        Err(RepositoryError::NotFound(id))
    }

    fn fetch(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    fn list(&self, query: &ListingQuery) -> Result<Vec<Apartment>, RepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(query.apply(rows.iter()))
    }

    fn delete(&self, id: ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let position = rows.iter().position(|row| row.id == id);
        Ok(position.map(|index| rows.remove(index)))
    }

    fn replace_all(&self, listings: Vec<ScoredListing>) -> Result<Vec<Apartment>, RepositoryError> {
        let stored: Vec<Apartment> = listings
            .into_iter()
            .enumerate()
            .map(|(index, listing)| self.stored(listing, index))
            .collect();
        *self.rows.lock().expect("rows lock") = stored.clone();
        Ok(stored)
    }
}

const CSV_SEED: &str = "\
title,address,city,postal_code,advertised_rent,images,features,size_m2,num_rooms,woz_value,energy_label,outdoor_space_m2,heating_type,insulation_level,is_monument
Canal flat,Prinsengracht 263,Amsterdam,1016 GV,1200,https://img.example/a.jpg|https://img.example/b.jpg,balcony|dishwasher,75,2,250000,B,10,central,full,
Student room,Oudegracht 12,Utrecht,,450,,,20,1,,G,,,,
";

const JSON_SEED: &str = r#"[
  {
    "title": "Monument loft",
    "address": "Herengracht 1",
    "city": "Amsterdam",
    "advertised_rent": 900.0,
    "size_m2": 60,
    "num_rooms": 2,
    "is_monument": true
  }
]"#;

#[test]
fn csv_seed_flows_through_to_scored_catalog() {
    let drafts =
        SeedImporter::from_reader(Cursor::new(CSV_SEED), SeedFormat::Csv).expect("csv parses");
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].images.len(), 2);
    assert_eq!(drafts[0].features, vec!["balcony", "dishwasher"]);
    assert!(drafts[1].postal_code.is_none());
    assert!(drafts[1].attributes.woz_value.is_none());

    let service = ListingService::new(Arc::new(VecRepository::default()));
    let summary = service.seed(drafts).expect("seeded");

    assert_eq!(summary.inserted.len(), 2);
    assert_eq!(summary.inserted[0].wws_points, 150);
    assert_eq!(summary.inserted[0].wws_max_rent, 825.0);
    // 20 + 5 - 10
    assert_eq!(summary.inserted[1].wws_points, 15);
    assert_eq!(summary.inserted[1].wws_max_rent, 82.5);

    let utrecht = service
        .list(&ListingQuery {
            city: Some("utrecht".to_string()),
            ..ListingQuery::default()
        })
        .expect("listed");
    assert_eq!(utrecht.len(), 1);
    assert_eq!(utrecht[0].listing.title, "Student room");
}

#[test]
fn json_seed_scores_monument_bonus() {
    let drafts = SeedImporter::from_json_reader(Cursor::new(JSON_SEED)).expect("json parses");
    let service = ListingService::new(Arc::new(VecRepository::default()));
    let summary = service.seed(drafts).expect("seeded");

    // 60 + 10 + 15
    assert_eq!(summary.inserted[0].wws_points, 85);
    assert_eq!(summary.inserted[0].wws_max_rent, 467.5);
}

#[test]
fn invalid_seed_record_reports_its_position() {
    let mut drafts =
        SeedImporter::from_reader(Cursor::new(CSV_SEED), SeedFormat::Csv).expect("csv parses");
    drafts[1].attributes.energy_label = Some("Z".to_string());

    let repository = Arc::new(VecRepository::default());
    let service = ListingService::new(repository.clone());
    let err = service.seed(drafts).expect_err("invalid label rejected");

    match err {
        ListingServiceError::InvalidSeedRecord { index, title, .. } => {
            assert_eq!(index, 1);
            assert_eq!(title, "Student room");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(repository.rows.lock().expect("rows lock").is_empty());
}

#[test]
fn malformed_seed_files_surface_parse_errors() {
    let missing_rent = "title,address,city\nLoft,Dam 1,Amsterdam\n";
    assert!(SeedImporter::from_csv_reader(Cursor::new(missing_rent)).is_err());
    assert!(SeedImporter::from_json_reader(Cursor::new("{\"title\": 1}")).is_err());
}
