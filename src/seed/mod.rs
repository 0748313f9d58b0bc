//! Bulk listing import from JSON or CSV seed files.

mod parser;

use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::listings::ApartmentDraft;

/// Accepted seed file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Csv,
}

impl SeedFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub enum SeedImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    UnsupportedFormat(String),
}

impl fmt::Display for SeedImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedImportError::Io(err) => write!(f, "failed to read seed file: {err}"),
            SeedImportError::Json(err) => write!(f, "invalid JSON seed data: {err}"),
            SeedImportError::Csv(err) => write!(f, "invalid CSV seed data: {err}"),
            SeedImportError::UnsupportedFormat(path) => {
                write!(f, "seed file '{path}' must end in .json or .csv")
            }
        }
    }
}

impl std::error::Error for SeedImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedImportError::Io(err) => Some(err),
            SeedImportError::Json(err) => Some(err),
            SeedImportError::Csv(err) => Some(err),
            SeedImportError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for SeedImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SeedImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for SeedImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads listing drafts for a batch import. Scoring and storage happen in
/// [`crate::listings::ListingService::seed`].
pub struct SeedImporter;

impl SeedImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApartmentDraft>, SeedImportError> {
        let path = path.as_ref();
        let format = SeedFormat::from_path(path)
            .ok_or_else(|| SeedImportError::UnsupportedFormat(path.display().to_string()))?;
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: SeedFormat,
    ) -> Result<Vec<ApartmentDraft>, SeedImportError> {
        match format {
            SeedFormat::Json => Self::from_json_reader(reader),
            SeedFormat::Csv => Self::from_csv_reader(reader),
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<ApartmentDraft>, SeedImportError> {
        Ok(parser::parse_json(reader)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<ApartmentDraft>, SeedImportError> {
        Ok(parser::parse_csv(reader)?)
    }
}
