//! TOML configuration file support.
//!
//! Data locations and query defaults can live in a config file instead of
//! being repeated on every invocation:
//!
//! ```toml
//! # jobatlas.toml
//! [data]
//! dir = "data"
//! skills = "exports/skills_by_career_area.csv"
//!
//! [defaults]
//! reference = "CA"
//! comparison = "TN"
//! table = "career"
//! top_n = 10
//! metric = "state_share"
//! tick_interval_ms = 1200
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use jobatlas::dataset::DataPaths;
use jobatlas::model::MetricKind;
use jobatlas::schema::TableKind;

/// Root configuration structure for jobatlas.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the snapshot tables live.
    #[serde(default)]
    pub data: DataConfig,

    /// Query defaults used when a flag is omitted.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Snapshot locations. Per-table paths override `dir`.
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    /// Directory holding the tables under their default file names.
    pub dir: Option<PathBuf>,

    /// Density table path.
    pub density: Option<PathBuf>,

    /// Career share table path.
    pub career_share: Option<PathBuf>,

    /// Career intensity table path.
    pub career_intensity: Option<PathBuf>,

    /// Skills table path.
    pub skills: Option<PathBuf>,
}

/// Defaults for query flags.
#[derive(Debug, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Reference state (name or code).
    pub reference: Option<String>,

    /// Comparison state (name or code).
    pub comparison: Option<String>,

    /// Table compared by default (career, intensity or skills).
    pub table: Option<String>,

    /// Number of categories ranked.
    pub top_n: Option<usize>,

    /// Metric name, e.g. "state_share" or "us_share".
    pub metric: Option<String>,

    /// Milliseconds between animation ticks.
    pub tick_interval_ms: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if one was given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve table locations. A directory given on the command line
    /// replaces the configured one; per-table paths still win over both.
    pub fn data_paths(&self, dir_override: Option<&Path>) -> DataPaths {
        let dir = dir_override
            .map(Path::to_path_buf)
            .or_else(|| self.data.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut paths = DataPaths::in_dir(dir);
        if let Some(p) = &self.data.density {
            paths.density = Some(p.clone());
        }
        if let Some(p) = &self.data.career_share {
            paths.career_share = Some(p.clone());
        }
        if let Some(p) = &self.data.career_intensity {
            paths.career_intensity = Some(p.clone());
        }
        if let Some(p) = &self.data.skills {
            paths.skills = Some(p.clone());
        }
        paths
    }

    /// Configured default metric, if any.
    pub fn metric(&self) -> Result<Option<MetricKind>> {
        self.defaults
            .metric
            .as_deref()
            .map(|m| m.parse::<MetricKind>())
            .transpose()
            .context("Invalid [defaults] metric")
    }

    /// Configured default comparison table, if any.
    pub fn table(&self) -> Result<Option<TableKind>> {
        match self.defaults.table.as_deref() {
            None => Ok(None),
            Some(name) => match TableKind::from_name(name) {
                Some(TableKind::Density) | None => {
                    anyhow::bail!("Invalid [defaults] table {:?}: expected career, intensity or skills", name)
                }
                Some(kind) => Ok(Some(kind)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [data]
            dir = "snapshots"
            skills = "elsewhere/skills.csv"

            [defaults]
            reference = "California"
            comparison = "TN"
            table = "skills"
            top_n = 5
            metric = "us_share"
            tick_interval_ms = 800
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.defaults.reference.as_deref(), Some("California"));
        assert_eq!(config.defaults.top_n, Some(5));
        assert_eq!(config.defaults.tick_interval_ms, Some(800));
        assert_eq!(config.metric().unwrap(), Some(MetricKind::NationalShare));
        assert_eq!(config.table().unwrap(), Some(TableKind::Skills));

        let paths = config.data_paths(None);
        assert_eq!(
            paths.density,
            Some(Path::new("snapshots").join(jobatlas::dataset::DEFAULT_DENSITY_FILE))
        );
        assert_eq!(paths.skills, Some(PathBuf::from("elsewhere/skills.csv")));
    }

    #[test]
    fn test_dir_override() {
        let config = Config::from_str("[data]\ndir = \"a\"\n").unwrap();
        let paths = config.data_paths(Some(Path::new("b")));
        assert_eq!(
            paths.career_share,
            Some(Path::new("b").join(jobatlas::dataset::DEFAULT_CAREER_SHARE_FILE))
        );
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.defaults.top_n, None);
        assert_eq!(config.metric().unwrap(), None);
        assert_eq!(config.table().unwrap(), None);
    }

    #[test]
    fn test_invalid_defaults() {
        let config = Config::from_str("[defaults]\nmetric = \"median\"\ntable = \"density\"\n").unwrap();
        assert!(config.metric().is_err());
        assert!(config.table().is_err());
    }

    #[test]
    fn test_unknown_field_type_rejected() {
        assert!(Config::from_str("[defaults]\ntop_n = \"ten\"\n").is_err());
    }
}
