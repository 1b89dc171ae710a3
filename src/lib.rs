//! Launchdash - interactive dashboard for SpaceX launch outcomes
//!
//! This library loads a static launch dataset once, filters it by launch
//! site and payload mass, aggregates outcomes, and produces Plotly-compatible
//! chart specifications for a single-page dashboard served over HTTP.

pub mod binder;
pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_input;
pub mod dataset;
pub mod filter;
pub mod html_output;
pub mod server;
pub mod stats;
