//! Launch record filtering by site and payload mass
//!
//! Supports:
//! - Site selection: a single site name, or the `ALL` sentinel
//! - Payload ranges: inclusive `[low, high]` bounds in kilograms
//!
//! Both filters are independent predicates and can be applied in any order.

use crate::dataset::LaunchRecord;
use anyhow::{bail, Result};

/// Dropdown value that selects every launch site
pub const ALL_SITES: &str = "ALL";

/// Parse one payload bound in kilograms. Non-finite values are rejected.
pub fn parse_mass(value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => bail!("Invalid payload bound: {:?}", value.trim()),
    }
}

/// Site filter that determines which launch records to include
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteFilter {
    /// Every site (the `ALL` sentinel)
    #[default]
    All,
    /// Exactly one site, matched by name
    Site(String),
}

impl SiteFilter {
    /// Create a filter that includes all sites
    pub fn all() -> Self {
        SiteFilter::All
    }

    /// Interpret a dropdown value. Unknown site names are not rejected; they
    /// simply match nothing.
    pub fn from_selection(selection: &str) -> Self {
        if selection == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(selection.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteFilter::All)
    }

    /// The dropdown value this filter corresponds to
    pub fn selection(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(name) => name,
        }
    }

    /// Check if a record should be included
    pub fn should_include(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(name) => record.launch_site == *name,
        }
    }

    /// Keep the matching records, preserving order
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a LaunchRecord>
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        records
            .into_iter()
            .filter(|r| self.should_include(r))
            .collect()
    }
}

/// Inclusive payload mass range in kilograms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Create a range. `low > high` is allowed and matches nothing.
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Parse a range expression like "2000,5000" or "2000..5000"
    pub fn from_expr(expr: &str) -> Result<Self> {
        let (low, high) = match expr.split_once("..").or_else(|| expr.split_once(',')) {
            Some(parts) => parts,
            None => bail!(
                "Invalid payload range: {}. Expected format: LOW,HIGH or LOW..HIGH",
                expr
            ),
        };

        Ok(Self::new(parse_mass(low)?, parse_mass(high)?))
    }

    /// Check if a payload mass lies within the range, bounds included
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    /// Check if a record should be included
    pub fn should_include(&self, record: &LaunchRecord) -> bool {
        self.contains(record.payload_mass_kg)
    }

    /// Keep the matching records, preserving order
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a LaunchRecord>
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        records
            .into_iter()
            .filter(|r| self.should_include(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Outcome;

    fn records() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure),
            LaunchRecord::new("KSC LC-39A", 2490.0, Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 4535.0, Outcome::Success),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Failure),
        ]
    }

    #[test]
    fn test_all_includes_everything() {
        let records = records();
        let filter = SiteFilter::all();
        assert_eq!(filter.apply(&records).len(), records.len());
        assert!(filter.is_all());
    }

    #[test]
    fn test_from_selection_all_sentinel() {
        assert_eq!(SiteFilter::from_selection("ALL"), SiteFilter::All);
        assert_eq!(
            SiteFilter::from_selection("KSC LC-39A"),
            SiteFilter::Site("KSC LC-39A".to_string())
        );
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        assert!(!SiteFilter::from_selection("all").is_all());
    }

    #[test]
    fn test_single_site() {
        let records = records();
        let filter = SiteFilter::from_selection("CCAFS LC-40");
        let matched = filter.apply(&records);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|r| r.launch_site == "CCAFS LC-40"));
        assert_eq!(matched[0].payload_mass_kg, 0.0);
        assert_eq!(matched[1].payload_mass_kg, 4535.0);
    }

    #[test]
    fn test_unknown_site_matches_nothing() {
        let records = records();
        let filter = SiteFilter::from_selection("Vandenberg SLC-4E");
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_selection_round_trip() {
        assert_eq!(SiteFilter::All.selection(), "ALL");
        assert_eq!(SiteFilter::from_selection("KSC LC-39A").selection(), "KSC LC-39A");
    }

    #[test]
    fn test_payload_range_inclusive_bounds() {
        let range = PayloadRange::new(2490.0, 4535.0);
        assert!(range.contains(2490.0));
        assert!(range.contains(4535.0));
        assert!(range.contains(3000.0));
        assert!(!range.contains(2489.9));
        assert!(!range.contains(4535.1));
    }

    #[test]
    fn test_payload_range_apply() {
        let records = records();
        let matched = PayloadRange::new(1000.0, 5000.0).apply(&records);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].launch_site, "KSC LC-39A");
    }

    #[test]
    fn test_payload_range_zero_width() {
        let records = records();
        assert_eq!(PayloadRange::new(0.0, 0.0).apply(&records).len(), 1);
        assert!(PayloadRange::new(1.0, 1.0).apply(&records).is_empty());
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let records = records();
        assert!(PayloadRange::new(5000.0, 1000.0).apply(&records).is_empty());
    }

    #[test]
    fn test_filters_compose() {
        let records = records();
        let by_payload = PayloadRange::new(0.0, 5000.0).apply(&records);
        let both = SiteFilter::from_selection("CCAFS LC-40").apply(by_payload);
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_payload_range_from_expr() {
        assert_eq!(
            PayloadRange::from_expr("2000,5000").unwrap(),
            PayloadRange::new(2000.0, 5000.0)
        );
        assert_eq!(
            PayloadRange::from_expr("0..9600.5").unwrap(),
            PayloadRange::new(0.0, 9600.5)
        );
        assert_eq!(
            PayloadRange::from_expr(" 10 , 20 ").unwrap(),
            PayloadRange::new(10.0, 20.0)
        );
    }

    #[test]
    fn test_parse_mass_rejects_non_finite() {
        assert_eq!(parse_mass(" 2500 ").unwrap(), 2500.0);
        assert!(parse_mass("NaN").is_err());
        assert!(parse_mass("inf").is_err());
        assert!(parse_mass("-inf").is_err());
        assert!(parse_mass("").is_err());
    }

    #[test]
    fn test_invalid_range_expression() {
        assert!(PayloadRange::from_expr("5000").is_err());
        assert!(PayloadRange::from_expr("a,b").is_err());
        assert!(PayloadRange::from_expr("1,inf").is_err());
    }
}
