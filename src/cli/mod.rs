use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use jobatlas::model::{MetricKind, PeriodRange};
use jobatlas::schema::TableKind;

mod animate;
mod compare;
mod rollup;
mod validate;

mod config;

pub use config::Config;

/// jobatlas - Compare AI job-posting metrics across U.S. states
#[derive(Parser)]
#[command(name = "jobatlas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the snapshot CSVs (overrides the config file)
    #[arg(short = 'd', long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Table a comparison runs against.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TableArg {
    /// Career areas by share of the state's AI jobs
    Career,
    /// Career areas by AI intensity
    Intensity,
    /// Skills within career areas
    Skills,
}

impl From<TableArg> for TableKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Career => TableKind::CareerShare,
            TableArg::Intensity => TableKind::CareerIntensity,
            TableArg::Skills => TableKind::Skills,
        }
    }
}

/// Metric computed for each value.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MetricArg {
    /// Numerator over the state's own total
    StateShare,
    /// Share within a career area's jobs
    Intensity,
    /// Numerator over the national total
    #[value(alias = "us-share")]
    NationalShare,
}

impl From<MetricArg> for MetricKind {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::StateShare => MetricKind::ShareOfSelf,
            MetricArg::Intensity => MetricKind::Intensity,
            MetricArg::NationalShare => MetricKind::NationalShare,
        }
    }
}

/// Inclusive year range flags shared by several commands.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct YearArgs {
    /// First year (inclusive)
    #[arg(long, value_name = "YEAR")]
    from: Option<i32>,

    /// Last year (inclusive)
    #[arg(long, value_name = "YEAR")]
    to: Option<i32>,
}

impl YearArgs {
    /// `None` when neither bound is given; a missing bound copies the other.
    pub fn range(&self) -> Result<Option<PeriodRange>> {
        let range = match (self.from, self.to) {
            (None, None) => return Ok(None),
            (Some(start), None) => PeriodRange::single(start),
            (None, Some(end)) => PeriodRange::single(end),
            (Some(start), Some(end)) => PeriodRange::new(start, end)?,
        };
        Ok(Some(range))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a reference state's categories and compare another state against them
    Compare {
        /// Reference state (name or postal code)
        #[arg(value_name = "REFERENCE")]
        reference: Option<String>,

        /// Comparison state (name or postal code)
        #[arg(value_name = "COMPARISON")]
        comparison: Option<String>,

        /// Table to compare
        #[arg(short = 't', long, value_enum)]
        table: Option<TableArg>,

        /// Number of categories to rank
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Metric to rank by
        #[arg(short = 'm', long, value_enum)]
        metric: Option<MetricArg>,

        /// Only these categories (repeatable; "ALL" disables the filter)
        #[arg(long = "category", value_name = "LABEL")]
        categories: Vec<String>,

        /// Only skills within these career areas (repeatable)
        #[arg(long = "career-area", value_name = "LABEL")]
        career_areas: Vec<String>,

        #[command(flatten)]
        years: YearArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Roll the density table up per state
    Rollup {
        #[command(flatten)]
        years: YearArgs,

        /// Metric to compute
        #[arg(short = 'm', long, value_enum)]
        metric: Option<MetricArg>,

        /// One rollup per year instead of one over the whole range
        #[arg(long)]
        frames: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Play the year animation and print each frame
    Animate {
        #[command(flatten)]
        years: YearArgs,

        /// Number of ticks to run (defaults to one full cycle)
        #[arg(long)]
        ticks: Option<usize>,

        /// Metric shown per frame
        #[arg(short = 'm', long, value_enum)]
        metric: Option<MetricArg>,

        /// Wait the tick interval between frames
        #[arg(long)]
        realtime: bool,

        /// Milliseconds between ticks when running in real time
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Check every configured table for integrity problems
    Validate,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Metric from the flag, then the config file, then the default.
fn resolve_metric(flag: Option<MetricArg>, config: &Config) -> Result<MetricKind> {
    match flag {
        Some(arg) => Ok(arg.into()),
        None => Ok(config.metric()?.unwrap_or_default()),
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let paths = config.data_paths(cli.data_dir.as_deref());

    match cli.command {
        Commands::Compare {
            reference,
            comparison,
            table,
            top_n,
            metric,
            categories,
            career_areas,
            years,
            json,
        } => {
            let table = match table {
                Some(arg) => arg.into(),
                None => config.table()?.unwrap_or(TableKind::CareerShare),
            };
            compare::run(compare::CompareArgs {
                paths,
                table,
                reference: reference.or_else(|| config.defaults.reference.clone()),
                comparison: comparison.or_else(|| config.defaults.comparison.clone()),
                top_n: top_n.or(config.defaults.top_n),
                metric: resolve_metric(metric, &config)?,
                categories,
                career_areas,
                range: years.range()?,
                json,
            })
        }
        Commands::Rollup {
            years,
            metric,
            frames,
            json,
        } => rollup::run(
            paths,
            years.range()?,
            resolve_metric(metric, &config)?,
            frames,
            json,
        ),
        Commands::Animate {
            years,
            ticks,
            metric,
            realtime,
            interval_ms,
        } => animate::run(
            paths,
            years.range()?,
            ticks,
            resolve_metric(metric, &config)?,
            realtime.then(|| {
                interval_ms
                    .or(config.defaults.tick_interval_ms)
                    .unwrap_or(jobatlas::animation::DEFAULT_TICK_INTERVAL_MS)
            }),
        ),
        Commands::Validate => validate::run(paths),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "jobatlas", "-vv", "compare", "CA", "Tennessee", "--table", "skills", "-n", "5",
            "--career-area", "Engineering", "--from", "2021", "--to", "2023",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Compare {
                reference,
                comparison,
                table,
                top_n,
                career_areas,
                years,
                ..
            } => {
                assert_eq!(reference.as_deref(), Some("CA"));
                assert_eq!(comparison.as_deref(), Some("Tennessee"));
                assert!(matches!(table, Some(TableArg::Skills)));
                assert_eq!(top_n, Some(5));
                assert_eq!(career_areas, ["Engineering"]);
                assert_eq!(years.range().unwrap(), Some(PeriodRange { start: 2021, end: 2023 }));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_year_args() {
        assert_eq!(YearArgs::default().range().unwrap(), None);
        let single = YearArgs { from: Some(2022), to: None };
        assert_eq!(single.range().unwrap(), Some(PeriodRange::single(2022)));
        let backwards = YearArgs { from: Some(2023), to: Some(2020) };
        assert!(backwards.range().is_err());
    }

    #[test]
    fn test_metric_alias() {
        let cli = Cli::try_parse_from(["jobatlas", "rollup", "--metric", "us-share"]).unwrap();
        match cli.command {
            Commands::Rollup { metric, .. } => {
                assert!(matches!(metric, Some(MetricArg::NationalShare)))
            }
            _ => panic!("expected rollup"),
        }
    }
}
