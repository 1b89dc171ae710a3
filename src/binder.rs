//! Chart binders: pure functions from dashboard inputs to chart specifications
//!
//! The proportion chart depends on the site selection only. The correlation
//! chart depends on the site selection and the payload range. Neither keeps
//! state between calls; every call recomputes from the full dataset.

use crate::chart::{Axis, Figure, Legend, Title, Trace};
use crate::dataset::{Dataset, COLUMN_LAUNCH_SITE, COLUMN_PAYLOAD_MASS};
use crate::filter::{PayloadRange, SiteFilter};
use crate::stats::OutcomeAggregate;
use serde::Serialize;
use tracing::debug;

/// Y axis label of the correlation chart
pub const OUTCOME_AXIS_LABEL: &str = "Launch Outcome";

/// Current state of the dashboard controls
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl DashboardState {
    /// Initial control state: all sites, full payload range
    pub fn initial(dataset: &Dataset) -> Self {
        let (low, high) = dataset.payload_bounds().unwrap_or((0.0, 0.0));
        Self {
            site: SiteFilter::All,
            payload: PayloadRange::new(low, high),
        }
    }

    /// Evaluate both binders for this state
    pub fn render(&self, dataset: &Dataset) -> DashboardCharts {
        DashboardCharts {
            proportion: proportion_chart(dataset, &self.site),
            correlation: correlation_chart(dataset, &self.site, self.payload),
        }
    }
}

/// Both charts for one dashboard state, embedded in the page as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub proportion: Figure,
    pub correlation: Figure,
}

/// Title of the proportion chart for a site selection
pub fn proportion_title(site: &SiteFilter) -> String {
    match site {
        SiteFilter::All => "Total Success Launches by Site".to_string(),
        SiteFilter::Site(name) => format!("Total Success vs. Failure Launches for site {}", name),
    }
}

/// Title of the correlation chart for a site selection
pub fn correlation_title(site: &SiteFilter) -> String {
    let subject = match site {
        SiteFilter::All => "all sites",
        SiteFilter::Site(name) => name,
    };
    format!("Correlation between Payload and Success for {}", subject)
}

/// Proportion chart: site filter, then outcome aggregation, then a pie
pub fn proportion_chart(dataset: &Dataset, site: &SiteFilter) -> Figure {
    let subset = site.apply(dataset.records());
    let aggregate = OutcomeAggregate::compute(site, &subset);
    let slices = aggregate.slices();

    debug!(
        site = site.selection(),
        records = subset.len(),
        slices = slices.len(),
        total = aggregate.total(),
        "computed proportion chart"
    );

    let (labels, values) = slices.into_iter().map(|s| (s.label, s.count)).unzip();

    let mut figure = Figure::new(proportion_title(site));
    figure.add_trace(Trace::pie(labels, values));
    figure
}

/// Correlation chart: payload filter, then site filter, then one scatter
/// series per site with x = payload mass and y = outcome class
pub fn correlation_chart(dataset: &Dataset, site: &SiteFilter, payload: PayloadRange) -> Figure {
    let in_range = payload.apply(dataset.records());
    let subset = if site.is_all() {
        in_range
    } else {
        site.apply(in_range)
    };

    let mut series: Vec<(&str, Vec<f64>, Vec<u8>, Vec<String>)> = Vec::new();
    for record in &subset {
        let index = match series
            .iter()
            .position(|(name, ..)| *name == record.launch_site)
        {
            Some(i) => i,
            None => {
                series.push((record.launch_site.as_str(), Vec::new(), Vec::new(), Vec::new()));
                series.len() - 1
            }
        };
        let (_, x, y, text) = &mut series[index];
        x.push(record.payload_mass_kg);
        y.push(record.outcome.class());
        text.push(record.hover_text());
    }

    debug!(
        site = site.selection(),
        low = payload.low,
        high = payload.high,
        points = subset.len(),
        series = series.len(),
        "computed correlation chart"
    );

    let mut figure = Figure::new(correlation_title(site));
    for (name, x, y, text) in series {
        figure.add_trace(Trace::scatter(name, x, y, text));
    }
    figure.layout.xaxis = Some(Axis::titled(COLUMN_PAYLOAD_MASS));
    figure.layout.yaxis = Some(Axis::titled(OUTCOME_AXIS_LABEL).with_ticks(vec![0.0, 1.0]));
    figure.layout.legend = Some(Legend {
        title: Title {
            text: COLUMN_LAUNCH_SITE.to_string(),
        },
    });
    figure
}
