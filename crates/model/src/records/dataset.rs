use crate::core::{data_type::DataType, value::Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Row {index} has {got} cells, expected {expected}")]
    RowWidth {
        index: usize,
        got: usize,
        expected: usize,
    },

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Mask length {got} does not match row count {expected}")]
    MaskLength { got: usize, expected: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Column {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Column-oriented table: an ordered column list plus row-major cells.
/// Every row holds exactly one cell per column, enforced at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Result<Self, DatasetError> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RowWidth {
                    index,
                    got: row.len(),
                    expected: columns.len(),
                });
            }
        }
        Ok(Dataset { columns, rows })
    }

    pub fn empty(columns: Vec<Column>) -> Self {
        Dataset {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    /// Re-tag a column, overriding whatever type inference produced. The tag
    /// travels with the column so every later coercion sees it.
    pub fn override_type(&mut self, name: &str, data_type: DataType) -> Result<(), DatasetError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))?;
        self.columns[idx].data_type = data_type;
        Ok(())
    }

    /// Positional mask selection. Keeps rows where the mask is true, in their
    /// original order; the mask length must equal the row count.
    pub fn select(&self, mask: &[bool]) -> Result<Dataset, DatasetError> {
        if mask.len() != self.rows.len() {
            return Err(DatasetError::MaskLength {
                got: mask.len(),
                expected: self.rows.len(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();
        Ok(Dataset {
            columns: self.columns.clone(),
            rows,
        })
    }
}
