use serde::{Deserialize, Serialize};

/// Physical characteristics of a unit that feed the WWS point calculation.
///
/// Every optional field may be missing; the engine treats a missing value,
/// a non-positive number, and an unrecognised label the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApartmentAttributes {
    #[serde(default)]
    pub size_m2: f64,
    #[serde(default)]
    pub num_rooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woz_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen_appliances_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathroom_fixtures_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_space_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_space_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_monument: Option<bool>,
}

impl ApartmentAttributes {
    pub fn new(size_m2: f64, num_rooms: u32) -> Self {
        Self {
            size_m2,
            num_rooms,
            ..Self::default()
        }
    }

    /// Parsed energy label, if the raw value names one of A through G.
    pub fn energy_label(&self) -> Option<EnergyLabel> {
        self.energy_label.as_deref().and_then(EnergyLabel::parse)
    }
}

/// EU energy efficiency rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyLabel {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::E,
            Self::F,
            Self::G,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }

    /// Case-insensitive parse; surrounding whitespace is not stripped.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|label| label.label().eq_ignore_ascii_case(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_label_parse_ignores_case() {
        assert_eq!(EnergyLabel::parse("b"), Some(EnergyLabel::B));
        assert_eq!(EnergyLabel::parse("G"), Some(EnergyLabel::G));
        assert_eq!(EnergyLabel::parse("A+"), None);
        assert_eq!(EnergyLabel::parse(" a"), None);
        assert_eq!(EnergyLabel::parse(""), None);
    }

    #[test]
    fn attributes_deserialize_with_missing_fields() {
        let attributes: ApartmentAttributes =
            serde_json::from_str(r#"{"size_m2": 42.5, "energy_label": "c"}"#)
                .expect("attributes parse");
        assert_eq!(attributes.size_m2, 42.5);
        assert_eq!(attributes.num_rooms, 0);
        assert_eq!(attributes.energy_label(), Some(EnergyLabel::C));
        assert!(attributes.is_monument.is_none());
    }
}
