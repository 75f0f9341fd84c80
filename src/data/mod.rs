//! Flat-file datasets: loading, joining and replacement.
//!
//! Every read goes to disk. Nothing is cached, so a page always reflects the
//! files as they are at request time, including right after an upload.

pub mod join;
pub mod replace;
pub mod tables;

pub use join::{combine, join, ProductionRow, ProductionView};
pub use replace::{replace_dataset, DatasetKind, ReplaceOutcome};
pub use tables::{
    find_country, find_mineral, get_country, get_mineral, load_countries, load_minerals,
    load_production, Country, Mineral, ProductionRecord,
};
