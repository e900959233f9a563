//! Tabular loading: delimited text -> FIPS-keyed numeric values.

use std::io::Cursor;

use ahash::AHashMap;
use polars::{
    frame::DataFrame,
    io::SerReader,
    prelude::{CsvReadOptions, DataType},
};

use crate::error::{Error, Result};
use crate::fetch::fetch_text;

/// An immutable mapping from regional code to numeric value, built from one
/// tabular resource. Discarded and rebuilt whenever the dataset URL changes.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    values: AHashMap<i64, f64>,
    dropped: usize,
}

impl Dataset {
    /// Look up the value for a regional code.
    pub fn get(&self, key: i64) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Number of distinct keys that parsed successfully.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of source rows dropped because the key or value failed to parse.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.keys().copied()
    }

    /// Build a dataset from two named columns of a DataFrame.
    ///
    /// A missing column fails the whole load; a row whose key is not an
    /// integer or whose value is not a float is dropped, not an error.
    /// Duplicate keys follow map-insertion semantics: last write wins.
    pub fn from_frame(df: &DataFrame, key_column: &str, value_column: &str) -> Result<Self> {
        let keys = string_column(df, key_column)?;
        let vals = string_column(df, value_column)?;

        let keys = keys.str().map_err(Error::load)?;
        let vals = vals.str().map_err(Error::load)?;

        let mut values = AHashMap::with_capacity(df.height());
        let mut dropped = 0;
        for (key, val) in keys.into_iter().zip(vals.into_iter()) {
            let key = key.and_then(parse_key);
            let val = val.and_then(|v| v.trim().parse::<f64>().ok());
            match (key, val) {
                (Some(key), Some(val)) => {
                    values.insert(key, val);
                }
                _ => dropped += 1,
            }
        }

        Ok(Self { values, dropped })
    }
}

/// Fetch a column as String, casting if the reader inferred something else.
fn string_column(
    df: &DataFrame,
    name: &str,
) -> Result<polars::prelude::Column> {
    let column = df
        .column(name)
        .map_err(|_| Error::load(format!("[dataset] missing column {name:?}")))?;
    column
        .cast(&DataType::String)
        .map_err(|e| Error::load(format!("[dataset] column {name:?}: {e}")))
}

/// Parse a regional code, tolerating FIPS zero-padding ("01001" -> 1001).
fn parse_key(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse comma-delimited text (header row required) into a [`Dataset`].
pub fn parse_dataset(text: &str, key_column: &str, value_column: &str) -> Result<Dataset> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // read everything as String
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()
        .map_err(|e| Error::load(format!("[dataset] failed to parse CSV: {e}")))?;
    Dataset::from_frame(&df, key_column, value_column)
}

/// Fetch and parse the tabular resource at `url`.
pub fn load_dataset(url: &str, key_column: &str, value_column: &str) -> Result<Dataset> {
    let text = fetch_text(url)?;
    parse_dataset(&text, key_column, value_column)
}
