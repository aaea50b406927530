//! Dataset accessor - loads the party/country/year table once
//!
//! Records are immutable after load. Queries hand out borrowed rows, so the
//! view builder never copies more than one country's slice.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;

use crate::config::{ColumnScheme, DatasetConfig};
use crate::dimension::Dimension;
use crate::error::DataSourceError;

/// One party-country-year observation
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country_name: String,
    pub party_name: String,
    pub year: i32,
    scores: [Option<f64>; 12],
    pub economic: Option<f64>,
    pub social: Option<f64>,
}

impl Record {
    pub fn score(&self, dimension: Dimension) -> Option<f64> {
        self.scores[dimension as usize]
    }
}

/// Column positions resolved against the file header
struct ColumnIndex {
    country: usize,
    party: usize,
    year: usize,
    dimensions: [(usize, String); 12],
    economic: usize,
    social: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnScheme) -> Result<Self, DataSourceError> {
        let mut missing = Vec::new();
        let mut find = |name: &str| -> usize {
            match headers.iter().position(|h| h.trim() == name) {
                Some(idx) => idx,
                None => {
                    missing.push(name.to_string());
                    usize::MAX
                }
            }
        };

        let country = find(&columns.country);
        let party = find(&columns.party);
        let year = find(&columns.year);
        let dimensions = Dimension::ALL.map(|d| {
            let name = columns.dimension_column(d);
            (find(&name), name)
        });
        let economic = find(&columns.economic);
        let social = find(&columns.social);

        if !missing.is_empty() {
            return Err(DataSourceError::MissingColumns(missing));
        }

        Ok(Self { country, party, year, dimensions, economic, social })
    }
}

/// The full record set
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Load the dataset named by `config`
    pub fn load(config: &DatasetConfig, columns: &ColumnScheme) -> Result<Self, DataSourceError> {
        tracing::info!("Loading dataset from {:?}", config.path);
        let file = File::open(&config.path).map_err(|source| DataSourceError::Open {
            path: config.path.clone(),
            source,
        })?;
        let dataset = Self::from_reader(file, config, columns)?;
        tracing::info!(
            "Dataset loaded: {} records, {} countries",
            dataset.len(),
            dataset.distinct_countries().len()
        );
        Ok(dataset)
    }

    /// Parse delimited text from any reader
    pub fn from_reader<R: Read>(
        reader: R,
        config: &DatasetConfig,
        columns: &ColumnScheme,
    ) -> Result<Self, DataSourceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(config.delimiter as u8)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let index = ColumnIndex::resolve(&headers, columns)?;
        tracing::debug!("Resolved dataset columns against {} headers", headers.len());

        let is_missing = |value: &str| config.missing_values.iter().any(|m| m == value);

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

            let required = |idx: usize, column: &str| -> Result<String, DataSourceError> {
                let value = cell(idx);
                if is_missing(value) {
                    Err(DataSourceError::MissingField { line, column: column.to_string() })
                } else {
                    Ok(value.to_string())
                }
            };
            let score = |idx: usize, column: &str| -> Result<Option<f64>, DataSourceError> {
                let value = cell(idx);
                if is_missing(value) {
                    return Ok(None);
                }
                let malformed = || DataSourceError::Malformed {
                    line,
                    column: column.to_string(),
                    value: value.to_string(),
                };
                // NaN counts as missing; anything else must sit on the ordinal scale
                match value.parse::<f64>() {
                    Ok(v) if v.is_nan() => Ok(None),
                    Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
                    _ => Err(malformed()),
                }
            };

            let country_name = required(index.country, &columns.country)?;
            let party_name = required(index.party, &columns.party)?;
            let year_text = required(index.year, &columns.year)?;
            let year = parse_year(&year_text).ok_or_else(|| DataSourceError::Malformed {
                line,
                column: columns.year.clone(),
                value: year_text.clone(),
            })?;

            let mut scores = [None; 12];
            for (slot, (idx, name)) in scores.iter_mut().zip(index.dimensions.iter()) {
                *slot = score(*idx, name)?;
            }

            records.push(Record {
                country_name,
                party_name,
                year,
                scores,
                economic: score(index.economic, &columns.economic)?,
                social: score(index.social, &columns.social)?,
            });
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Country names in first-appearance order
    pub fn distinct_countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records()
            .iter()
            .map(|r| r.country_name.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// All rows for `country`, ordered by year; rows sharing a year keep
    /// their source order. Unknown countries give an empty vec.
    pub fn rows_for_country(&self, country: &str) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self
            .records()
            .iter()
            .filter(|r| r.country_name == country)
            .collect();
        rows.sort_by_key(|r| r.year);
        rows
    }
}

/// Latest year among `rows`, `None` when there are no rows
pub fn most_recent_year(rows: &[&Record]) -> Option<i32> {
    rows.iter().map(|r| r.year).max()
}

/// Accepts "2019" as well as "2019.0"
fn parse_year(text: &str) -> Option<i32> {
    text.parse::<i32>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|y| y.fract() == 0.0 && y.abs() < i32::MAX as f64)
            .map(|y| y as i32)
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::config::Config;

    pub fn header() -> String {
        let columns = ColumnScheme::default();
        let mut names = vec![columns.country.clone(), columns.party.clone(), columns.year.clone()];
        names.extend(Dimension::ALL.iter().map(|d| columns.dimension_column(*d)));
        names.push(columns.economic.clone());
        names.push(columns.social.clone());
        names.join(",")
    }

    /// Build one CSV line; dimensions not listed are left empty
    pub fn row(
        country: &str,
        party: &str,
        year: i32,
        dims: &[(Dimension, f64)],
        economic: Option<f64>,
        social: Option<f64>,
    ) -> String {
        let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        let mut cells = vec![country.to_string(), party.to_string(), year.to_string()];
        cells.extend(Dimension::ALL.iter().map(|d| {
            fmt(dims.iter().find(|(dim, _)| dim == d).map(|(_, v)| *v))
        }));
        cells.push(fmt(economic));
        cells.push(fmt(social));
        cells.join(",")
    }

    pub fn dataset(rows: &[String]) -> Dataset {
        let text = format!("{}\n{}\n", header(), rows.join("\n"));
        let config = Config::default();
        Dataset::from_reader(text.as_bytes(), &config.dataset, &config.columns).unwrap()
    }
}
