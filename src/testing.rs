//! Test utilities: a throwaway data directory seeded with sample files.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::paths::{DataPaths, COUNTRIES_FILE, MINERALS_FILE, PRODUCTION_FILE, USERS_FILE};

pub const USERS_JSON: &str = r#"[
  {"username": "alice", "password": "pw1", "role": "Admin"},
  {"username": "bob", "password": "pw2", "role": "Viewer"}
]"#;

pub const COUNTRIES_CSV: &str = "\
CountryID,CountryName,GDP_BillionUSD,MiningRevenue_BillionUSD,KeyProjects
1,Zambia,29.8,5.2,Kansanshi Mine
2,DR Congo,64.7,12.1,Kamoa-Kakula
3,Chile,301.0,28.4,Escondida
";

pub const MINERALS_CSV: &str = "\
MineralID,MineralName,Description,MarketPriceUSD_per_tonne
1,Copper,Ductile metal used in wiring,8500
2,Cobalt,Battery cathode metal,33000
3,Lithium,Light alkali metal,13000
";

/// Last row references a country that does not exist
pub const PRODUCTION_CSV: &str = "\
CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD
1,1,2022,830000,6.9
2,2,2022,130000,4.3
3,1,2022,5330000,44.2
2,1,2023,2500000,20.5
9,1,2023,1000,0.1
";

/// Temporary data directory holding users.json and the three tables.
///
/// The directory is removed when the value is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for file persistence)
    pub temp: TempDir,
    /// Paths rooted at `<temp>/data`
    pub paths: DataPaths,
}

impl TestEnv {
    pub fn new() -> std::io::Result<Self> {
        let temp = TempDir::new()?;
        let data_dir = temp.path().join("data");
        fs::create_dir(&data_dir)?;

        fs::write(data_dir.join(USERS_FILE), USERS_JSON)?;
        fs::write(data_dir.join(COUNTRIES_FILE), COUNTRIES_CSV)?;
        fs::write(data_dir.join(MINERALS_FILE), MINERALS_CSV)?;
        fs::write(data_dir.join(PRODUCTION_FILE), PRODUCTION_CSV)?;

        Ok(Self {
            temp,
            paths: DataPaths::new(data_dir),
        })
    }

    /// Root of the temporary directory (the data directory is `data/` below it).
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Overwrite a file in the data directory.
    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.paths.data_dir().join(name), contents).unwrap();
    }
}
