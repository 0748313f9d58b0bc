use super::attributes::{ApartmentAttributes, EnergyLabel};
use super::{ScoreComponent, WwsCategory};

/// Point offset per energy label. Only category that can subtract points.
pub(crate) const ENERGY_LABEL_POINTS: [(EnergyLabel, i32); 7] = [
    (EnergyLabel::A, 20),
    (EnergyLabel::B, 15),
    (EnergyLabel::C, 10),
    (EnergyLabel::D, 5),
    (EnergyLabel::E, 0),
    (EnergyLabel::F, -5),
    (EnergyLabel::G, -10),
];

const POINTS_PER_ROOM: f64 = 5.0;
const WOZ_PER_POINT: f64 = 10_000.0;
const POINTS_PER_KITCHEN_APPLIANCE: f64 = 3.0;
const POINTS_PER_BATHROOM_FIXTURE: f64 = 5.0;
const OUTDOOR_POINTS_PER_M2: f64 = 0.5;
const OUTDOOR_CAP: f64 = 50.0;
const STORAGE_POINTS_PER_M2: f64 = 0.75;
const STORAGE_CAP: f64 = 20.0;
const HEATING_BONUS: f64 = 10.0;
const FULL_INSULATION_BONUS: f64 = 10.0;
const DOUBLE_GLAZING_BONUS: f64 = 5.0;
const MONUMENT_BONUS: f64 = 15.0;

pub(crate) fn energy_label_points(label: EnergyLabel) -> i32 {
    ENERGY_LABEL_POINTS
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Accumulates every category in a fixed order and returns the components
/// that applied together with the unclamped total.
pub(crate) fn score_attributes(attributes: &ApartmentAttributes) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::new();
    let mut total = 0.0;

    let mut push = |category: WwsCategory, points: f64, detail: String| {
        total += points;
        components.push(ScoreComponent {
            category,
            points,
            detail,
        });
    };

    if let Some(size) = positive(attributes.size_m2) {
        push(
            WwsCategory::Size,
            size.floor(),
            format!("{size} m2 at 1 point per whole m2"),
        );
    }

    if attributes.num_rooms > 0 {
        push(
            WwsCategory::Rooms,
            f64::from(attributes.num_rooms) * POINTS_PER_ROOM,
            format!("{} heated room(s) at 5 points each", attributes.num_rooms),
        );
    }

    if let Some(woz) = attributes.woz_value.and_then(positive) {
        push(
            WwsCategory::Valuation,
            (woz / WOZ_PER_POINT).floor(),
            format!("WOZ value {woz:.0} at 1 point per 10000"),
        );
    }

    if let Some(label) = attributes.energy_label() {
        push(
            WwsCategory::EnergyLabel,
            f64::from(energy_label_points(label)),
            format!("energy label {}", label.label()),
        );
    }

    if let Some(count) = attributes.kitchen_appliances_count.filter(|count| *count > 0) {
        push(
            WwsCategory::Kitchen,
            f64::from(count) * POINTS_PER_KITCHEN_APPLIANCE,
            format!("{count} kitchen appliance(s) at 3 points each"),
        );
    }

    if let Some(count) = attributes.bathroom_fixtures_count.filter(|count| *count > 0) {
        push(
            WwsCategory::Bathroom,
            f64::from(count) * POINTS_PER_BATHROOM_FIXTURE,
            format!("{count} bathroom fixture(s) at 5 points each"),
        );
    }

    if let Some(area) = attributes.outdoor_space_m2.and_then(positive) {
        let (points, capped) = capped_area_points(area, OUTDOOR_POINTS_PER_M2, OUTDOOR_CAP);
        push(
            WwsCategory::OutdoorSpace,
            points,
            area_detail("outdoor space", area, capped, OUTDOOR_CAP),
        );
    }

    if let Some(area) = attributes.storage_space_m2.and_then(positive) {
        let (points, capped) = capped_area_points(area, STORAGE_POINTS_PER_M2, STORAGE_CAP);
        push(
            WwsCategory::StorageSpace,
            points,
            area_detail("storage space", area, capped, STORAGE_CAP),
        );
    }

    if let Some(heating) = attributes
        .heating_type
        .as_deref()
        .filter(|value| is_collective_heating(value))
    {
        push(
            WwsCategory::Heating,
            HEATING_BONUS,
            format!("{} heating", heating.to_ascii_lowercase()),
        );
    }

    if let Some(level) = attributes.insulation_level.as_deref() {
        let bonus = if level.eq_ignore_ascii_case("full") {
            Some((FULL_INSULATION_BONUS, "full insulation"))
        } else if level.eq_ignore_ascii_case("double_glazing") {
            Some((DOUBLE_GLAZING_BONUS, "double glazing"))
        } else {
            None
        };

        if let Some((points, detail)) = bonus {
            push(WwsCategory::Insulation, points, detail.to_string());
        }
    }

    if attributes.is_monument == Some(true) {
        push(
            WwsCategory::Monument,
            MONUMENT_BONUS,
            "listed monument".to_string(),
        );
    }

    (components, total)
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn is_collective_heating(value: &str) -> bool {
    value.eq_ignore_ascii_case("central") || value.eq_ignore_ascii_case("district")
}

fn capped_area_points(area: f64, rate: f64, cap: f64) -> (f64, bool) {
    let raw = (area * rate).floor();
    (raw.min(cap), raw > cap)
}

fn area_detail(name: &str, area: f64, capped: bool, cap: f64) -> String {
    if capped {
        format!("{name} {area} m2, capped at {cap:.0} points")
    } else {
        format!("{name} {area} m2")
    }
}
