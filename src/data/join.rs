//! Denormalized production view: production records joined with their
//! country and mineral, with presentation column names.

use serde::Serialize;
use std::collections::HashMap;

use super::tables::{self, Country, Mineral, ProductionRecord};
use crate::error::Result;
use crate::paths::DataPaths;

/// One joined row. Serializes with the display column names: `CountryName`
/// becomes `Country`, `MineralName` becomes `Mineral`, `Production_tonnes`
/// becomes `Production (tonnes)` and `ExportValue_BillionUSD` becomes
/// `Export Value (Billion USD)`. Every other column keeps its source name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionRow {
    #[serde(rename = "CountryID")]
    pub country_id: i64,
    #[serde(rename = "MineralID")]
    pub mineral_id: i64,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Production (tonnes)")]
    pub production_tonnes: f64,
    #[serde(rename = "Export Value (Billion USD)")]
    pub export_value_billion_usd: f64,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "GDP_BillionUSD")]
    pub gdp_billion_usd: f64,
    #[serde(rename = "MiningRevenue_BillionUSD")]
    pub mining_revenue_billion_usd: f64,
    #[serde(rename = "KeyProjects")]
    pub key_projects: String,
    #[serde(rename = "Mineral")]
    pub mineral: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "MarketPriceUSD_per_tonne")]
    pub market_price_usd_per_tonne: f64,
}

impl ProductionRow {
    fn new(record: &ProductionRecord, country: &Country, mineral: &Mineral) -> Self {
        Self {
            country_id: record.country_id,
            mineral_id: record.mineral_id,
            year: record.year,
            production_tonnes: record.production_tonnes,
            export_value_billion_usd: record.export_value_billion_usd,
            country: country.name.clone(),
            gdp_billion_usd: country.gdp_billion_usd,
            mining_revenue_billion_usd: country.mining_revenue_billion_usd,
            key_projects: country.key_projects.clone(),
            mineral: mineral.name.clone(),
            description: mineral.description.clone(),
            market_price_usd_per_tonne: mineral.market_price_usd_per_tonne,
        }
    }

    /// Cell values in `ProductionView::COLUMNS` order, formatted for display.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.country_id.to_string(),
            self.mineral_id.to_string(),
            self.year.to_string(),
            self.production_tonnes.to_string(),
            self.export_value_billion_usd.to_string(),
            self.country.clone(),
            self.gdp_billion_usd.to_string(),
            self.mining_revenue_billion_usd.to_string(),
            self.key_projects.clone(),
            self.mineral.clone(),
            self.description.clone(),
            self.market_price_usd_per_tonne.to_string(),
        ]
    }
}

/// Production records joined with countries and minerals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductionView {
    pub rows: Vec<ProductionRow>,
}

impl ProductionView {
    /// Output header in column order.
    pub const COLUMNS: [&'static str; 12] = [
        "CountryID",
        "MineralID",
        "Year",
        "Production (tonnes)",
        "Export Value (Billion USD)",
        "Country",
        "GDP_BillionUSD",
        "MiningRevenue_BillionUSD",
        "KeyProjects",
        "Mineral",
        "Description",
        "MarketPriceUSD_per_tonne",
    ];

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Distinct country names in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.country.as_str()))
    }

    /// Distinct mineral names in order of first appearance.
    pub fn minerals(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.mineral.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Load all three tables and join them.
pub fn combine(paths: &DataPaths) -> Result<ProductionView> {
    let countries = tables::load_countries(paths)?;
    let minerals = tables::load_minerals(paths)?;
    let production = tables::load_production(paths)?;
    Ok(join(&countries, &minerals, &production))
}

/// Inner join on CountryID, then on MineralID.
///
/// Records whose keys do not resolve are dropped without error. A key that
/// matches several rows yields one output row per match. Output follows the
/// order of `production`.
pub fn join(countries: &[Country], minerals: &[Mineral], production: &[ProductionRecord]) -> ProductionView {
    let mut by_country: HashMap<i64, Vec<&Country>> = HashMap::new();
    for country in countries {
        by_country.entry(country.id).or_default().push(country);
    }

    let mut by_mineral: HashMap<i64, Vec<&Mineral>> = HashMap::new();
    for mineral in minerals {
        by_mineral.entry(mineral.id).or_default().push(mineral);
    }

    let mut rows = Vec::with_capacity(production.len());
    let mut dropped = 0usize;

    for record in production {
        let (Some(cs), Some(ms)) = (by_country.get(&record.country_id), by_mineral.get(&record.mineral_id)) else {
            dropped += 1;
            continue;
        };
        for country in cs {
            for mineral in ms {
                rows.push(ProductionRow::new(record, country, mineral));
            }
        }
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} production records with unresolved keys", dropped);
    }

    ProductionView { rows }
}
