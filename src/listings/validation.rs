use serde::Serialize;

use super::domain::ApartmentDraft;
use crate::scoring::EnergyLabel;

/// A single rejected field on an inbound listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found on a draft, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("listing failed validation: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{} {}", violation.field, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rejects drafts the scoring engine would otherwise silently treat as
/// absent data, such as negative floor areas.
pub fn validate_draft(draft: &ApartmentDraft) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    for (field, value) in [
        ("title", &draft.title),
        ("address", &draft.address),
        ("city", &draft.city),
    ] {
        if value.trim().is_empty() {
            violations.push(FieldViolation {
                field,
                message: "must not be empty".to_string(),
            });
        }
    }

    let attributes = &draft.attributes;
    check_non_negative(&mut violations, "advertised_rent", Some(draft.advertised_rent));
    check_non_negative(&mut violations, "size_m2", Some(attributes.size_m2));
    check_non_negative(&mut violations, "woz_value", attributes.woz_value);
    check_non_negative(&mut violations, "outdoor_space_m2", attributes.outdoor_space_m2);
    check_non_negative(&mut violations, "storage_space_m2", attributes.storage_space_m2);

    check_range(&mut violations, "latitude", draft.latitude, 90.0);
    check_range(&mut violations, "longitude", draft.longitude, 180.0);

    if let Some(label) = attributes.energy_label.as_deref() {
        if EnergyLabel::parse(label).is_none() {
            violations.push(FieldViolation {
                field: "energy_label",
                message: format!("'{label}' is not an energy label between A and G"),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn check_non_negative(violations: &mut Vec<FieldViolation>, field: &'static str, value: Option<f64>) {
    match value {
        Some(value) if !value.is_finite() => violations.push(FieldViolation {
            field,
            message: "must be a finite number".to_string(),
        }),
        Some(value) if value < 0.0 => violations.push(FieldViolation {
            field,
            message: format!("must not be negative (got {value})"),
        }),
        _ => {}
    }
}

fn check_range(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: Option<f64>,
    bound: f64,
) {
    if let Some(value) = value {
        if !value.is_finite() || value.abs() > bound {
            violations.push(FieldViolation {
                field,
                message: format!("must be between -{bound} and {bound}"),
            });
        }
    }
}
