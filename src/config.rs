//! Configuration loader - YAML settings + .env overrides

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::classify::Tiering;
use crate::dimension::Dimension;
use crate::view::ScatterScope;

/// Plotly's default qualitative palette
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A",
    "#19D3F3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52",
];

/// Main configuration loaded from explorer.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub columns: ColumnScheme,
    pub palette: Palette,
    pub view: ViewConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub delimiter: char,
    /// Cell values read as a missing observation
    pub missing_values: Vec<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/V-Dem-CPD-Party-V2.csv"),
            delimiter: ',',
            missing_values: vec!["".into(), "NA".into(), "NaN".into(), "nan".into()],
        }
    }
}

/// Logical field -> physical column names.
///
/// Dataset releases differ in how dimension columns are decorated
/// (`v2paimmig` vs `v2paimmig_osp`), so dimension columns are derived from
/// `dimension_suffix` unless `overrides` names one explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnScheme {
    pub country: String,
    pub party: String,
    pub year: String,
    pub dimension_suffix: String,
    pub economic: String,
    pub social: String,
    pub overrides: HashMap<Dimension, String>,
}

impl Default for ColumnScheme {
    fn default() -> Self {
        Self {
            country: "country_name".into(),
            party: "v2paenname".into(),
            year: "year".into(),
            dimension_suffix: "_osp".into(),
            economic: "v2pariglef_osp".into(),
            social: "ep_v6_lib_cons".into(),
            overrides: HashMap::new(),
        }
    }
}

impl ColumnScheme {
    /// Physical column holding `dimension`
    pub fn dimension_column(&self, dimension: Dimension) -> String {
        self.overrides
            .get(&dimension)
            .cloned()
            .unwrap_or_else(|| format!("{}{}", dimension.id(), self.dimension_suffix))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<String>);

impl Default for Palette {
    fn default() -> Self {
        Palette(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub scatter_scope: ScatterScope,
    pub tiering: Tiering,
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub file_name: String,
    pub rotation: LogRotation,
    /// Filter directives used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_name: "party_explorer.log".into(),
            rotation: LogRotation::Daily,
            filter: "info,party_explorer=debug,tower_http=debug".into(),
        }
    }
}

/// Settings loaded from .env / the process environment
#[derive(Debug, Clone)]
pub struct Secrets {
    pub data_file: Option<PathBuf>,
    pub port: u16,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.palette.0.is_empty(), "palette must contain at least one color");
        ensure!(
            self.dataset.delimiter.is_ascii(),
            "dataset.delimiter must be a single-byte character, got {:?}",
            self.dataset.delimiter
        );
        ensure!(!self.logging.file_name.is_empty(), "logging.file_name must not be empty");
        Ok(())
    }

    /// Apply environment overrides
    pub fn with_secrets(mut self, secrets: &Secrets) -> Self {
        if let Some(path) = &secrets.data_file {
            self.dataset.path = path.clone();
        }
        if let Some(dir) = &secrets.log_dir {
            self.logging.dir = dir.clone();
        }
        self
    }
}

impl Secrets {
    /// Load secrets from .env file
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Secrets {
            data_file: std::env::var("DATA_FILE").ok().map(PathBuf::from),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    #[test]
    fn test_default_columns() {
        let scheme = ColumnScheme::default();
        assert_eq!(scheme.dimension_column(Dimension::Immigration), "v2paimmig_osp");
    }

    #[test]
    fn test_undecorated_scheme_with_override() {
        let yaml = indoc! {r#"
            columns:
              dimension_suffix: ""
              economic: v2pariglef
              overrides:
                v2palgbt: lgbt_position
        "#};
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.columns.dimension_column(Dimension::Immigration), "v2paimmig");
        assert_eq!(config.columns.dimension_column(Dimension::LgbtEquality), "lgbt_position");
        assert_eq!(config.columns.economic, "v2pariglef");
        // untouched sections keep their defaults
        assert_eq!(config.columns.country, "country_name");
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            indoc! {r#"
                dataset:
                  path: parties.tsv
                  delimiter: "\t"
                palette: ["red", "blue"]
                view:
                  scatter_scope: latest-year
                  tiering: published
            "#}
            .as_bytes(),
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("parties.tsv"));
        assert_eq!(config.dataset.delimiter, '\t');
        assert_eq!(config.palette.0, vec!["red", "blue"]);
        assert_eq!(config.view.scatter_scope, ScatterScope::LatestYear);
        assert_eq!(config.view.tiering, Tiering::Published);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "palette: []").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("palette"));
    }

    #[test]
    fn test_data_file_override() {
        let secrets = Secrets {
            data_file: Some(PathBuf::from("/tmp/other.csv")),
            port: 8080,
            log_dir: None,
        };
        let config = Config::default().with_secrets(&secrets);
        assert_eq!(config.dataset.path, PathBuf::from("/tmp/other.csv"));
        assert_eq!(config.logging.dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_logging_section() {
        let yaml = indoc! {r#"
            logging:
              dir: /var/log/party_explorer
              rotation: hourly
        "#};
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.logging.rotation, LogRotation::Hourly);
        assert_eq!(config.logging.file_name, "party_explorer.log");

        let secrets = Secrets {
            data_file: None,
            port: 8080,
            log_dir: Some(PathBuf::from("/tmp/explorer-logs")),
        };
        let config = config.with_secrets(&secrets);
        assert_eq!(config.logging.dir, PathBuf::from("/tmp/explorer-logs"));
    }
}
