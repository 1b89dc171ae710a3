//! Launch dataset loading
//!
//! The dataset is read once at startup and never mutated afterwards. Every
//! filter and chart borrows records from it.

use crate::csv_input::{self, CsvRow};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Column holding the launch site name
pub const COLUMN_LAUNCH_SITE: &str = "Launch Site";
/// Column holding the payload mass in kilograms
pub const COLUMN_PAYLOAD_MASS: &str = "Payload Mass (kg)";
/// Column holding the outcome class (1 = success, 0 = failure)
pub const COLUMN_CLASS: &str = "class";
/// Optional column holding the flight number
pub const COLUMN_FLIGHT_NUMBER: &str = "Flight Number";
/// Optional column holding the booster version category
pub const COLUMN_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Errors that can occur while loading the launch dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value {value:?} for column {column:?} on line {line}")]
    InvalidField {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Invalid outcome class {value:?} on line {line} (expected 0 or 1)")]
    InvalidOutcome { line: usize, value: String },

    #[error("Negative payload mass {value} on line {line}")]
    NegativePayload { line: usize, value: f64 },

    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("Dataset contains no launch records")]
    Empty,
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Binary launch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the `class` column. Accepts `0`/`1` and their float spellings.
    pub fn from_class(value: &str) -> Option<Self> {
        match value.trim() {
            "1" | "1.0" => Some(Outcome::Success),
            "0" | "0.0" => Some(Outcome::Failure),
            _ => None,
        }
    }

    /// Numeric class used as the y value of the correlation chart
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    /// Human-readable label used for pie slices
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

/// One launch attempt
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: Option<String>,
}

impl LaunchRecord {
    /// Create a record with only the required fields
    pub fn new(launch_site: impl Into<String>, payload_mass_kg: f64, outcome: Outcome) -> Self {
        Self {
            flight_number: None,
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_category: None,
        }
    }

    /// Hover text shown next to a scatter point
    pub fn hover_text(&self) -> String {
        let mut text = match self.flight_number {
            Some(n) => format!("Flight {}", n),
            None => self.launch_site.clone(),
        };
        if let Some(ref booster) = self.booster_category {
            text.push_str(&format!(" ({})", booster));
        }
        text
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    launch_site: usize,
    payload_mass: usize,
    class: usize,
    flight_number: Option<usize>,
    booster_category: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &CsvRow) -> Result<Self> {
        let find = |name: &str| header.fields.iter().position(|f| f.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()));

        Ok(Self {
            launch_site: require(COLUMN_LAUNCH_SITE)?,
            payload_mass: require(COLUMN_PAYLOAD_MASS)?,
            class: require(COLUMN_CLASS)?,
            flight_number: find(COLUMN_FLIGHT_NUMBER),
            booster_category: find(COLUMN_BOOSTER_CATEGORY),
        })
    }

    fn required<'a>(&self, row: &'a CsvRow, index: usize, column: &str) -> Result<&'a str> {
        row.field(index).ok_or_else(|| DatasetError::InvalidField {
            line: row.line,
            column: column.to_string(),
            value: String::new(),
        })
    }

    fn parse_record(&self, row: &CsvRow) -> Result<LaunchRecord> {
        let launch_site = self.required(row, self.launch_site, COLUMN_LAUNCH_SITE)?;
        if launch_site.is_empty() {
            return Err(DatasetError::InvalidField {
                line: row.line,
                column: COLUMN_LAUNCH_SITE.to_string(),
                value: String::new(),
            });
        }

        let raw_mass = self.required(row, self.payload_mass, COLUMN_PAYLOAD_MASS)?;
        let payload_mass_kg = raw_mass
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .ok_or_else(|| DatasetError::InvalidField {
                line: row.line,
                column: COLUMN_PAYLOAD_MASS.to_string(),
                value: raw_mass.to_string(),
            })?;
        if payload_mass_kg < 0.0 {
            return Err(DatasetError::NegativePayload {
                line: row.line,
                value: payload_mass_kg,
            });
        }

        let raw_class = self.required(row, self.class, COLUMN_CLASS)?;
        let outcome = Outcome::from_class(raw_class).ok_or_else(|| DatasetError::InvalidOutcome {
            line: row.line,
            value: raw_class.to_string(),
        })?;

        let flight_number = match self.flight_number.and_then(|i| row.field(i)) {
            Some(raw) if !raw.is_empty() => {
                Some(raw.parse::<u32>().map_err(|_| DatasetError::InvalidField {
                    line: row.line,
                    column: COLUMN_FLIGHT_NUMBER.to_string(),
                    value: raw.to_string(),
                })?)
            }
            _ => None,
        };

        let booster_category = self
            .booster_category
            .and_then(|i| row.field(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(LaunchRecord {
            flight_number,
            launch_site: launch_site.to_string(),
            payload_mass_kg,
            outcome,
            booster_category,
        })
    }
}

/// Immutable, ordered collection of launch records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
}

impl Dataset {
    /// Build a dataset from already-parsed records
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from a CSV file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_csv(&text)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            "loaded launch dataset"
        );
        Ok(dataset)
    }

    /// Parse a dataset from CSV text with a header row
    pub fn from_csv(text: &str) -> Result<Self> {
        let rows = csv_input::parse_rows(text)?;
        let mut rows = rows.iter();

        let header = rows.next().ok_or(DatasetError::Empty)?;
        let columns = ColumnIndex::from_header(header)?;
        debug!(?columns, "resolved dataset columns");

        let records = rows
            .map(|row| columns.parse_record(row))
            .collect::<Result<Vec<_>>>()?;

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { records })
    }

    /// All records in file order
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest payload mass, or `None` for an empty dataset
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        let mut masses = self.records.iter().map(|r| r.payload_mass_kg);
        let first = masses.next()?;
        Some(masses.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }

    /// Distinct launch sites in order of first appearance
    pub fn sites(&self) -> Vec<&str> {
        let mut sites: Vec<&str> = Vec::new();
        for record in &self.records {
            if !sites.contains(&record.launch_site.as_str()) {
                sites.push(&record.launch_site);
            }
        }
        sites
    }
}
