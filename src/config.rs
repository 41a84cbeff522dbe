// ⚙️ Configuration - Chart Relations
// Paths and column names, overridable from the CLI

use std::path::PathBuf;

/// Column names the loader looks up in the CSV header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// Subject identifier column
    pub wish: String,

    /// Observation date column
    pub date: String,

    /// Free-text references column
    pub same_as: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            wish: "WISH".to_string(),
            date: "Date".to_string(),
            same_as: "Same As".to_string(),
        }
    }
}

impl ColumnNames {
    /// All required columns, in the order they are reported
    pub fn required(&self) -> [&str; 3] {
        [&self.wish, &self.date, &self.same_as]
    }
}

#[derive(Debug, Clone)]
pub struct RelationsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub columns: ColumnNames,

    /// Indented JSON output (default: true)
    pub pretty: bool,
}

impl Default for RelationsConfig {
    fn default() -> Self {
        RelationsConfig {
            input: PathBuf::from("charts.csv"),
            output: PathBuf::from("relations.json"),
            columns: ColumnNames::default(),
            pretty: true,
        }
    }
}
