use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::LoadError;
use crate::model::MetricRow;
use crate::schema::{columns, HeaderIndex, SchemaValidationError, TableKind};
use crate::states;

/// A loaded snapshot table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTable {
    /// Which snapshot this is
    pub kind: TableKind,
    /// Rows in file order
    pub rows: Vec<MetricRow>,
}

impl MetricTable {
    /// Create a table from rows
    pub fn new(kind: TableKind, rows: Vec<MetricRow>) -> Self {
        Self { kind, rows }
    }

    /// Rows in file order
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct (code, name) pairs sorted by name, for entity pickers
    pub fn entities(&self) -> Vec<(String, String)> {
        let mut seen = BTreeSet::new();
        for row in &self.rows {
            seen.insert((row.entity_name.clone(), row.entity.clone()));
        }
        seen.into_iter().map(|(name, code)| (code, name)).collect()
    }

    /// Distinct category labels, sorted
    pub fn categories(&self) -> Vec<String> {
        distinct(self.rows.iter().filter_map(|r| r.category.as_deref()))
    }

    /// Distinct secondary labels, sorted
    pub fn secondaries(&self) -> Vec<String> {
        distinct(self.rows.iter().filter_map(|r| r.secondary.as_deref()))
    }
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    labels
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Resolved column positions for one table kind
#[derive(Debug, Default)]
struct Layout {
    state_name: usize,
    state_abbrev: Option<usize>,
    year: Option<usize>,
    category: Option<usize>,
    secondary: Option<usize>,
    numerator: Option<usize>,
    denominator: Option<usize>,
    value: Option<usize>,
}

impl Layout {
    fn resolve(kind: TableKind, headers: &HeaderIndex) -> Result<Self, SchemaValidationError> {
        headers.validate(kind)?;

        let mut layout = Layout {
            state_name: headers.require(&[columns::STATE_NAME])?,
            state_abbrev: headers.optional(columns::STATE_ABBREV),
            year: headers.optional(columns::YEAR),
            ..Default::default()
        };

        match kind {
            TableKind::Density => {
                layout.numerator = Some(headers.require(&[columns::AI_JOBS_COUNT])?);
                layout.denominator = Some(headers.require(&[columns::ALL_JOBS_STATE_YEAR])?);
            }
            TableKind::CareerShare => {
                layout.category = Some(headers.require(&[columns::CAREER_AREA])?);
                layout.numerator = Some(headers.require(&[columns::ENTRY_COUNT])?);
                layout.denominator = Some(headers.require(&[columns::TOTAL_JOBS])?);
                layout.value = headers.optional(columns::PROPORTION);
            }
            TableKind::CareerIntensity => {
                layout.category = Some(headers.require(&[columns::CAREER_AREA])?);
                layout.numerator = headers.optional(columns::AI_JOBS_COUNT);
                layout.denominator = headers.optional(columns::TOTAL_JOBS);
                layout.value = Some(headers.require(&[columns::INTENSITY])?);
            }
            TableKind::Skills => {
                layout.category = Some(headers.require(&[columns::SKILLS_NAME])?);
                layout.secondary = Some(headers.require(&[columns::CAREER_AREA])?);
                layout.numerator = Some(headers.require(&[columns::SKILL_COUNT, columns::COUNT])?);
                layout.denominator = Some(headers.require(&[columns::TOTAL_AI_LISTINGS])?);
                layout.value = headers.optional(columns::PROPORTION);
            }
        }

        Ok(layout)
    }
}

/// Numeric coercion: anything unparseable or non-finite becomes 0
fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Years may be exported as "2021" or "2021.0"
fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i32)
    })
}

/// Read a table of the given kind from any reader
pub fn read_table<R: Read>(kind: TableKind, reader: R) -> Result<MetricTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = HeaderIndex::new(csv_reader.headers()?.iter());
    let layout = Layout::resolve(kind, &headers).map_err(|e| match e {
        SchemaValidationError::MissingColumn(column) => LoadError::MissingColumn { table: kind, column },
    })?;

    let mut rows = Vec::new();
    let mut unknown_states = BTreeSet::new();

    for record in csv_reader.records() {
        let record = record?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let entity_name = field(Some(layout.state_name)).trim().to_string();
        let abbrev = field(layout.state_abbrev).trim();
        let entity = if !abbrev.is_empty() {
            abbrev.to_uppercase()
        } else if let Some(code) = states::code_for(&entity_name) {
            code.to_string()
        } else {
            unknown_states.insert(entity_name.clone());
            entity_name.clone()
        };

        rows.push(MetricRow {
            entity,
            entity_name,
            category: layout.category.map(|i| field(Some(i)).trim().to_string()),
            secondary: layout.secondary.map(|i| field(Some(i)).trim().to_string()),
            numerator: coerce_number(field(layout.numerator)),
            denominator: coerce_number(field(layout.denominator)),
            period: layout.year.and_then(|i| parse_year(field(Some(i)))),
            value: layout.value.map(|i| coerce_number(field(Some(i)))),
        });
    }

    for name in &unknown_states {
        warn!("{} table: no state code for {:?}, keeping full name as entity", kind, name);
    }
    debug!("Read {} rows from {} table", rows.len(), kind);

    Ok(MetricTable::new(kind, rows))
}

/// Load a table of the given kind from a CSV file
pub fn load_table<P: AsRef<Path>>(kind: TableKind, path: P) -> Result<MetricTable, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_table(kind, BufReader::new(file))?;
    info!("Loaded {} table from {} ({} rows)", kind, path.display(), table.len());
    Ok(table)
}

/// Load the density snapshot (per state and year)
pub fn load_density_table<P: AsRef<Path>>(path: P) -> Result<MetricTable, LoadError> {
    load_table(TableKind::Density, path)
}

/// Load the career-area share snapshot
pub fn load_career_share_table<P: AsRef<Path>>(path: P) -> Result<MetricTable, LoadError> {
    load_table(TableKind::CareerShare, path)
}

/// Load the career-area intensity snapshot
pub fn load_career_intensity_table<P: AsRef<Path>>(path: P) -> Result<MetricTable, LoadError> {
    load_table(TableKind::CareerIntensity, path)
}

/// Load the skills snapshot
pub fn load_skills_table<P: AsRef<Path>>(path: P) -> Result<MetricTable, LoadError> {
    load_table(TableKind::Skills, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("12"), 12.0);
        assert_eq!(coerce_number(" 0.25 "), 0.25);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("n/a"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("2021.0"), Some(2021));
        assert_eq!(parse_year("2021.5"), None);
        assert_eq!(parse_year(""), None);
    }
}
