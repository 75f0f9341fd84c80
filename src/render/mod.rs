//! Server-side rendering helpers for the chart and map pages.

pub mod chart;
pub mod map;

pub use chart::{production_chart, CHART_TITLE};
pub use map::{markers, markers_json, Marker};
