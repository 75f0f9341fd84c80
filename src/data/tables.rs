//! Typed CSV tables for countries, minerals and production records.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::paths::DataPaths;

/// Row of countries.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    #[serde(rename = "CountryID")]
    pub id: i64,
    #[serde(rename = "CountryName")]
    pub name: String,
    #[serde(rename = "GDP_BillionUSD")]
    pub gdp_billion_usd: f64,
    #[serde(rename = "MiningRevenue_BillionUSD")]
    pub mining_revenue_billion_usd: f64,
    #[serde(rename = "KeyProjects")]
    pub key_projects: String,
}

impl Country {
    pub const COLUMNS: [&'static str; 5] = [
        "CountryID",
        "CountryName",
        "GDP_BillionUSD",
        "MiningRevenue_BillionUSD",
        "KeyProjects",
    ];

    /// URL of the country's profile page
    pub fn profile_path(&self) -> String {
        format!("/country/{}", urlencoding::encode(&self.name))
    }
}

/// Row of minerals.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mineral {
    #[serde(rename = "MineralID")]
    pub id: i64,
    #[serde(rename = "MineralName")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "MarketPriceUSD_per_tonne")]
    pub market_price_usd_per_tonne: f64,
}

impl Mineral {
    pub const COLUMNS: [&'static str; 4] = [
        "MineralID",
        "MineralName",
        "Description",
        "MarketPriceUSD_per_tonne",
    ];

    /// URL of the mineral's profile page
    pub fn profile_path(&self) -> String {
        format!("/mineral/{}", urlencoding::encode(&self.name))
    }
}

/// Row of production.csv. Both IDs are foreign keys.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductionRecord {
    #[serde(rename = "CountryID")]
    pub country_id: i64,
    #[serde(rename = "MineralID")]
    pub mineral_id: i64,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Production_tonnes")]
    pub production_tonnes: f64,
    #[serde(rename = "ExportValue_BillionUSD")]
    pub export_value_billion_usd: f64,
}

impl ProductionRecord {
    pub const COLUMNS: [&'static str; 5] = [
        "CountryID",
        "MineralID",
        "Year",
        "Production_tonnes",
        "ExportValue_BillionUSD",
    ];
}

pub fn load_countries(paths: &DataPaths) -> Result<Vec<Country>> {
    load_table(&paths.countries_file(), &Country::COLUMNS)
}

pub fn load_minerals(paths: &DataPaths) -> Result<Vec<Mineral>> {
    load_table(&paths.minerals_file(), &Mineral::COLUMNS)
}

pub fn load_production(paths: &DataPaths) -> Result<Vec<ProductionRecord>> {
    load_table(&paths.production_file(), &ProductionRecord::COLUMNS)
}

/// First country with exactly this name (case-sensitive).
pub fn find_country<'a>(countries: &'a [Country], name: &str) -> Option<&'a Country> {
    countries.iter().find(|c| c.name == name)
}

/// First mineral with exactly this name (case-sensitive).
pub fn find_mineral<'a>(minerals: &'a [Mineral], name: &str) -> Option<&'a Mineral> {
    minerals.iter().find(|m| m.name == name)
}

pub fn get_country(paths: &DataPaths, name: &str) -> Result<Country> {
    let countries = load_countries(paths)?;
    find_country(&countries, name)
        .cloned()
        .ok_or_else(|| DashboardError::NotFound("Country".to_string()))
}

pub fn get_mineral(paths: &DataPaths, name: &str) -> Result<Mineral> {
    let minerals = load_minerals(paths)?;
    find_mineral(&minerals, name)
        .cloned()
        .ok_or_else(|| DashboardError::NotFound("Mineral".to_string()))
}

/// Parse a whole CSV file into typed rows.
///
/// The header must contain every column in `required` (any order, extra
/// columns allowed). Cells are trimmed before conversion.
fn load_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(DashboardError::DataUnavailable(path_str, "file not found".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DashboardError::DataUnavailable(path_str.clone(), e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| classify_csv_error(&path_str, e))?
        .clone();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::SchemaMismatch(
            path_str,
            format!("missing columns: {}", missing.join(", ")),
        ));
    }

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|e| classify_csv_error(&path_str, e))?;

    tracing::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn classify_csv_error(path: &str, err: csv::Error) -> DashboardError {
    match err.kind() {
        csv::ErrorKind::Io(_) => DashboardError::DataUnavailable(path.to_string(), err.to_string()),
        _ => DashboardError::SchemaMismatch(path.to_string(), err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;
    use std::fs;

    #[test]
    fn test_load_seeded_tables() {
        let env = TestEnv::new().unwrap();

        let countries = load_countries(&env.paths).unwrap();
        assert_eq!(countries.len(), 3);
        assert_eq!(countries[0].name, "Zambia");
        assert_eq!(countries[0].gdp_billion_usd, 29.8);

        let minerals = load_minerals(&env.paths).unwrap();
        assert_eq!(minerals.len(), 3);
        assert_eq!(minerals[1].name, "Cobalt");

        let production = load_production(&env.paths).unwrap();
        assert_eq!(production.len(), 5);
        assert_eq!(production[0].year, 2022);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let env = TestEnv::new().unwrap();
        fs::remove_file(env.paths.minerals_file()).unwrap();

        let result = load_minerals(&env.paths);
        assert!(matches!(result, Err(DashboardError::DataUnavailable(_, _))));
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let env = TestEnv::new().unwrap();
        env.write("countries.csv", "CountryID,CountryName\n1,Zed\n");

        match load_countries(&env.paths) {
            Err(DashboardError::SchemaMismatch(_, detail)) => {
                assert!(detail.contains("GDP_BillionUSD"));
                assert!(detail.contains("MiningRevenue_BillionUSD"));
                assert!(detail.contains("KeyProjects"));
                assert!(!detail.contains("CountryName"));
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_is_schema_mismatch() {
        let env = TestEnv::new().unwrap();
        env.write("production.csv", "");

        let result = load_production(&env.paths);
        assert!(matches!(result, Err(DashboardError::SchemaMismatch(_, _))));
    }

    #[test]
    fn test_bad_cell_is_schema_mismatch() {
        let env = TestEnv::new().unwrap();
        env.write(
            "production.csv",
            "CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD\n1,1,twenty,5,1.0\n",
        );

        let result = load_production(&env.paths);
        assert!(matches!(result, Err(DashboardError::SchemaMismatch(_, _))));
    }

    #[test]
    fn test_column_order_and_extras_ignored() {
        let env = TestEnv::new().unwrap();
        env.write(
            "minerals.csv",
            "Notes, MarketPriceUSD_per_tonne ,MineralName,MineralID,Description\n\
             x, 8500 , Copper ,7,Conductive metal\n",
        );

        let minerals = load_minerals(&env.paths).unwrap();
        assert_eq!(
            minerals,
            vec![Mineral {
                id: 7,
                name: "Copper".to_string(),
                description: "Conductive metal".to_string(),
                market_price_usd_per_tonne: 8500.0,
            }]
        );
    }

    #[test]
    fn test_get_country_by_exact_name() {
        let env = TestEnv::new().unwrap();

        let country = get_country(&env.paths, "Chile").unwrap();
        assert_eq!(country.id, 3);
        assert_eq!(country.key_projects, "Escondida");

        assert_eq!(
            get_country(&env.paths, "chile"),
            Err(DashboardError::NotFound("Country".to_string()))
        );
    }

    #[test]
    fn test_get_mineral_not_found() {
        let env = TestEnv::new().unwrap();

        assert!(get_mineral(&env.paths, "Cobalt").is_ok());
        assert_eq!(
            get_mineral(&env.paths, "Unobtainium"),
            Err(DashboardError::NotFound("Mineral".to_string()))
        );
    }

    #[test]
    fn test_profile_path_is_encoded() {
        let env = TestEnv::new().unwrap();
        let countries = load_countries(&env.paths).unwrap();
        assert_eq!(countries[1].profile_path(), "/country/DR%20Congo");

        let minerals = load_minerals(&env.paths).unwrap();
        assert_eq!(minerals[0].profile_path(), "/mineral/Copper");
    }

    #[test]
    fn test_find_returns_first_duplicate() {
        let countries = vec![
            Country {
                id: 1,
                name: "Zed".to_string(),
                gdp_billion_usd: 1.0,
                mining_revenue_billion_usd: 0.5,
                key_projects: "A".to_string(),
            },
            Country {
                id: 2,
                name: "Zed".to_string(),
                gdp_billion_usd: 2.0,
                mining_revenue_billion_usd: 0.5,
                key_projects: "B".to_string(),
            },
        ];
        assert_eq!(find_country(&countries, "Zed").map(|c| c.id), Some(1));
    }
}
