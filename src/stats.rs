//! Launch outcome statistics
//!
//! Per-site launch and success counts for the proportion chart and the
//! `summary` subcommand.

use crate::dataset::{Dataset, LaunchRecord, Outcome};
use crate::filter::SiteFilter;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};

/// Statistics for a single launch site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteStats {
    /// Number of launches from this site
    pub launches: u64,
    /// Number of successful launches
    pub successes: u64,
}

impl SiteStats {
    pub fn failures(&self) -> u64 {
        self.launches - self.successes
    }

    /// Success rate in percent (0.0 when there are no launches)
    pub fn success_rate(&self) -> f64 {
        if self.launches > 0 {
            (self.successes as f64 / self.launches as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Tracks statistics for all sites, remembering first-appearance order
#[derive(Debug, Default)]
pub struct StatsTracker {
    /// Site names in the order they were first recorded
    order: Vec<String>,
    /// Map from site name to statistics
    stats: HashMap<String, SiteStats>,
}

impl StatsTracker {
    /// Create a new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker from a sequence of records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        let mut tracker = Self::new();
        for record in records {
            tracker.record(record);
        }
        tracker
    }

    /// Record one launch
    pub fn record(&mut self, record: &LaunchRecord) {
        if !self.stats.contains_key(&record.launch_site) {
            self.order.push(record.launch_site.clone());
        }
        let entry = self.stats.entry(record.launch_site.clone()).or_default();
        entry.launches += 1;
        if record.outcome.is_success() {
            entry.successes += 1;
        }
    }

    /// Sites with their statistics, in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteStats)> {
        self.order
            .iter()
            .filter_map(|site| self.stats.get(site).map(|s| (site.as_str(), s)))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Totals across every site
    pub fn totals(&self) -> SiteStats {
        self.stats.values().fold(SiteStats::default(), |acc, s| SiteStats {
            launches: acc.launches + s.launches,
            successes: acc.successes + s.successes,
        })
    }

    /// Write a per-site summary table
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.is_empty() {
            writeln!(out, "No launches recorded.")?;
            return Ok(());
        }

        writeln!(out, "launches successes  failures  success% site")?;
        writeln!(out, "-------- --------- --------- --------- --------------------")?;

        for (site, stats) in self.iter() {
            writeln!(
                out,
                "{:>8} {:>9} {:>9} {:>9.2} {}",
                stats.launches,
                stats.successes,
                stats.failures(),
                stats.success_rate(),
                site
            )?;
        }

        let totals = self.totals();
        writeln!(out, "-------- --------- --------- --------- --------------------")?;
        writeln!(
            out,
            "{:>8} {:>9} {:>9} {:>9.2} total",
            totals.launches,
            totals.successes,
            totals.failures(),
            totals.success_rate()
        )?;

        Ok(())
    }
}

/// Per-site entry of the summary response
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub site: String,
    pub launches: u64,
    pub successes: u64,
}

/// Dataset summary: everything the page needs to build its controls
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub successes: u64,
    pub payload_min: f64,
    pub payload_max: f64,
    pub sites: Vec<SiteSummary>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let tracker = StatsTracker::from_records(dataset.records());
        let (payload_min, payload_max) = dataset.payload_bounds().unwrap_or((0.0, 0.0));
        Self {
            records: dataset.len(),
            successes: tracker.totals().successes,
            payload_min,
            payload_max,
            sites: tracker
                .iter()
                .map(|(site, stats)| SiteSummary {
                    site: site.to_string(),
                    launches: stats.launches,
                    successes: stats.successes,
                })
                .collect(),
        }
    }
}

/// One labeled count for a proportion chart slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCount {
    pub label: String,
    pub count: u64,
}

/// Result of aggregating a filtered record set by outcome
///
/// The shape depends on the site selection: `ALL` yields successful
/// launches per site, a single site yields its success/failure split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeAggregate {
    /// Successful launches per site, in first-appearance order
    SuccessesBySite(Vec<LabeledCount>),
    /// Success and failure counts for one site
    SiteOutcomes {
        site: String,
        success: u64,
        failure: u64,
    },
}

impl OutcomeAggregate {
    /// Aggregate a record subset according to the site selection
    pub fn compute(site: &SiteFilter, records: &[&LaunchRecord]) -> Self {
        match site {
            SiteFilter::All => {
                let tracker = StatsTracker::from_records(records.iter().copied());
                OutcomeAggregate::SuccessesBySite(
                    tracker
                        .iter()
                        .map(|(site, stats)| LabeledCount {
                            label: site.to_string(),
                            count: stats.successes,
                        })
                        .collect(),
                )
            }
            SiteFilter::Site(name) => {
                let success = records
                    .iter()
                    .filter(|r| r.outcome == Outcome::Success)
                    .count() as u64;
                OutcomeAggregate::SiteOutcomes {
                    site: name.clone(),
                    success,
                    failure: records.len() as u64 - success,
                }
            }
        }
    }

    /// Chart slices in display order. Empty when nothing was aggregated.
    pub fn slices(&self) -> Vec<LabeledCount> {
        match self {
            OutcomeAggregate::SuccessesBySite(counts) => counts.clone(),
            OutcomeAggregate::SiteOutcomes {
                success, failure, ..
            } => {
                if success + failure == 0 {
                    return Vec::new();
                }
                vec![
                    LabeledCount {
                        label: Outcome::Success.label().to_string(),
                        count: *success,
                    },
                    LabeledCount {
                        label: Outcome::Failure.label().to_string(),
                        count: *failure,
                    },
                ]
            }
        }
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        match self {
            OutcomeAggregate::SuccessesBySite(counts) => counts.iter().map(|c| c.count).sum(),
            OutcomeAggregate::SiteOutcomes {
                success, failure, ..
            } => success + failure,
        }
    }
}
