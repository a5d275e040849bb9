use crate::csv::{
    error::FileError,
    metadata::{CsvColumnMetadata, infer_columns},
};
use csv::{ReaderBuilder, StringRecord};
use model::{
    core::value::Value,
    records::dataset::{Column, Dataset},
};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            has_header: true,
        }
    }
}

/// Load a whole CSV file into a typed dataset.
///
/// Two passes over the in-memory records: one to infer a type tag per column
/// (promotion chain), one to parse cells under the inferred tag. A cell that
/// does not fit its column degrades to null rather than failing the load.
pub fn load(path: &Path, options: &CsvOptions) -> Result<Dataset, FileError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = if options.has_header {
        reader.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        let width = reader.headers()?.len();
        (0..width).map(|i| format!("col_{i}")).collect()
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| FileError::Read(e.to_string()))?;
        records.push(record);
    }

    let metadata = infer_columns(&headers, &records);
    let columns = metadata
        .iter()
        .map(|m| Column::new(&m.name, m.data_type))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        rows.push(parse_row(record, &metadata));
    }

    Dataset::new(columns, rows).map_err(|e| FileError::Read(e.to_string()))
}

/// Column metadata only, for schema inspection. Shares the load path so the
/// reported tags are exactly what `load` would produce.
pub fn inspect(path: &Path, options: &CsvOptions) -> Result<Vec<CsvColumnMetadata>, FileError> {
    let dataset = load(path, options)?;
    Ok(dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(ordinal, c)| CsvColumnMetadata {
            name: c.name.clone(),
            data_type: c.data_type,
            ordinal,
        })
        .collect())
}

fn parse_row(record: &StringRecord, metadata: &[CsvColumnMetadata]) -> Vec<Value> {
    let mut cells = Vec::with_capacity(metadata.len());
    for meta in metadata {
        let raw = record.get(meta.ordinal).unwrap_or("");
        let value = match meta.data_type.parse_value(raw) {
            Some(v) => v,
            None => {
                warn!(
                    "Cell '{raw}' does not fit column '{}' ({}); treated as null",
                    meta.name, meta.data_type
                );
                Value::Null
            }
        };
        cells.push(value);
    }
    cells
}
