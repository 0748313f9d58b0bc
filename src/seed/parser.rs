use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::listings::ApartmentDraft;
use crate::scoring::ApartmentAttributes;

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<ApartmentDraft>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<ApartmentDraft>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut drafts = Vec::new();

    for record in csv_reader.deserialize::<SeedRow>() {
        let row = record?;
        drafts.push(row.into_draft());
    }

    Ok(drafts)
}

/// Flat CSV shape of a seed record; list columns are `|`-separated.
#[derive(Debug, Deserialize)]
struct SeedRow {
    title: String,
    address: String,
    city: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    postal_code: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    advertised_rent: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default)]
    num_bedrooms: Option<u32>,
    #[serde(default)]
    num_bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    property_type: Option<String>,
    #[serde(default)]
    year_built: Option<i32>,
    #[serde(default)]
    availability_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    images: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    features: Option<String>,
    #[serde(default)]
    size_m2: Option<f64>,
    #[serde(default)]
    num_rooms: Option<u32>,
    #[serde(default)]
    woz_value: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    energy_label: Option<String>,
    #[serde(default)]
    kitchen_appliances_count: Option<u32>,
    #[serde(default)]
    bathroom_fixtures_count: Option<u32>,
    #[serde(default)]
    outdoor_space_m2: Option<f64>,
    #[serde(default)]
    storage_space_m2: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    heating_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    insulation_level: Option<String>,
    #[serde(default)]
    is_monument: Option<bool>,
}

impl SeedRow {
    fn into_draft(self) -> ApartmentDraft {
        ApartmentDraft {
            title: self.title,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            latitude: self.latitude,
            longitude: self.longitude,
            advertised_rent: self.advertised_rent,
            description: self.description,
            num_bedrooms: self.num_bedrooms,
            num_bathrooms: self.num_bathrooms,
            property_type: self.property_type,
            year_built: self.year_built,
            availability_date: self.availability_date,
            images: split_list(self.images.as_deref()),
            features: split_list(self.features.as_deref()),
            attributes: ApartmentAttributes {
                size_m2: self.size_m2.unwrap_or(0.0),
                num_rooms: self.num_rooms.unwrap_or(0),
                woz_value: self.woz_value,
                energy_label: self.energy_label,
                kitchen_appliances_count: self.kitchen_appliances_count,
                bathroom_fixtures_count: self.bathroom_fixtures_count,
                outdoor_space_m2: self.outdoor_space_m2,
                storage_space_m2: self.storage_space_m2,
                heating_type: self.heating_type,
                insulation_level: self.insulation_level,
                is_monument: self.is_monument,
            },
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
