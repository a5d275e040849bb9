use crate::core::value::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Column type tag. Drives how raw cells are parsed and which coercions the
/// filter operators attempt first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Number,
    Date,
    Text,
}

/// The promotion sequence: start at the current tag and widen until the
/// sample value fits. Text accepts everything, so inference always lands.
const CHAIN: &[DataType] = &[DataType::Number, DataType::Date, DataType::Text];

/// Check if the tag can parse the given raw cell.
fn can_parse(data_type: DataType, raw: &str) -> bool {
    if raw.is_empty() {
        return true; // treat empty as null
    }
    match data_type {
        DataType::Number => raw.trim().parse::<f64>().is_ok(),
        DataType::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").is_ok(),
        DataType::Text => true,
    }
}

impl DataType {
    /// Parse one raw cell under this tag. Empty cells are null; a cell the
    /// tag cannot represent yields None so the caller decides how to degrade.
    pub fn parse_value(&self, raw: &str) -> Option<Value> {
        if raw.is_empty() {
            return Some(Value::Null);
        }
        let trimmed = raw.trim();
        match self {
            DataType::Number => {
                if let Ok(i) = trimmed.parse::<i64>() {
                    Some(Value::Int(i))
                } else {
                    trimmed.parse::<f64>().ok().map(Value::Float)
                }
            }
            DataType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            DataType::Text => Some(Value::String(raw.to_string())),
        }
    }

    /// Widen this tag until it can hold the sample value.
    pub fn promote(&self, raw: &str) -> DataType {
        // Find our index in the promotion chain (fallback to start)
        let start = CHAIN.iter().position(|t| t == self).unwrap_or(0);
        CHAIN[start..]
            .iter()
            .copied()
            .find(|t| can_parse(*t, raw))
            .unwrap_or(DataType::Text)
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Number
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "num" => Ok(DataType::Number),
            "date" => Ok(DataType::Date),
            "text" | "string" => Ok(DataType::Text),
            other => Err(format!("Unknown column type: {other}")),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Number => write!(f, "number"),
            DataType::Date => write!(f, "date"),
            DataType::Text => write!(f, "text"),
        }
    }
}
