//! Chart specifications
//!
//! Figures serialize to the Plotly.js JSON figure schema (`data` + `layout`),
//! so the dashboard page hands them to `Plotly.react` unchanged.

use serde::{Deserialize, Serialize};

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Create a figure with a title and no traces
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::titled(title),
        }
    }

    /// Add a trace
    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    /// Total number of plotted values across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A single data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Category chart: one slice per label
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Point chart: x/y pairs for one named series
    Scatter {
        name: String,
        x: Vec<f64>,
        y: Vec<u8>,
        mode: String,
        /// Hover text, one entry per point
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        text: Vec<String>,
    },
}

impl Trace {
    /// Create a pie trace
    pub fn pie(labels: Vec<String>, values: Vec<u64>) -> Self {
        Trace::Pie {
            labels,
            values,
            name: None,
        }
    }

    /// Create a marker-only scatter trace
    pub fn scatter(name: impl Into<String>, x: Vec<f64>, y: Vec<u8>, text: Vec<String>) -> Self {
        Trace::Scatter {
            name: name.into(),
            x,
            y,
            mode: "markers".to_string(),
            text,
        }
    }

    /// Number of plotted values
    pub fn len(&self) -> usize {
        match self {
            Trace::Pie { values, .. } => values.len(),
            Trace::Scatter { x, .. } => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Series name (`None` for pies)
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Pie { name, .. } => name.as_deref(),
            Trace::Scatter { name, .. } => Some(name),
        }
    }
}

/// Text element (titles)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

/// Axis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title { text: text.into() },
            tickvals: None,
        }
    }

    /// Restrict ticks to the given values
    pub fn with_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.tickvals = Some(ticks);
        self
    }
}

/// Legend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
}

/// Figure layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Layout {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title { text: text.into() },
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}
