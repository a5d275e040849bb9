use crate::core::data_type::DataType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, hash::Hash};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Null,
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use Value::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Int(v) => v.hash(state),
            Float(v) => {
                // Hash the bits of the float to handle NaN and -0.0 correctly
                let bits = v.to_bits();
                bits.hash(state);
            }
            Boolean(v) => v.hash(state),
            String(v) => v.hash(state),
            Date(v) => v.hash(state),
            Timestamp(v) => v.hash(state),
            Null => {} // Nothing to hash for Null
        }
    }
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::String(v) => v.trim().parse::<f64>().ok(),
            Value::Date(_) => None,
            Value::Timestamp(_) => None,
            Value::Null => None,
        }
    }

    /// Day-precision coercion: timestamps drop their time-of-day, strings are
    /// tried as `%Y-%m-%d` first and RFC 3339 second.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(v) => Some(*v),
            Value::Timestamp(v) => Some(v.date_naive()),
            Value::String(v) => {
                let trimmed = v.trim();
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().or_else(|| {
                    DateTime::parse_from_rfc3339(trimmed)
                        .ok()
                        .map(|ts| ts.date_naive())
                })
            }
            Value::Int(_) => None,
            Value::Float(_) => None,
            Value::Boolean(_) => None,
            Value::Null => None,
        }
    }

    /// The display string used by the string operators and quick search.
    /// Null renders empty so it never matches a substring probe.
    pub fn render(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Date(v) => v.to_string(),
            Value::Timestamp(v) => v.to_rfc3339(),
            Value::Null => String::new(),
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Number,
            Value::Float(_) => DataType::Number,
            Value::Boolean(_) => DataType::Text,
            Value::String(_) => DataType::Text,
            Value::Date(_) => DataType::Date,
            Value::Timestamp(_) => DataType::Date,
            Value::Null => DataType::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn numeric_coercion_parses_strings() {
        assert_eq!(Value::String(" 42.5 ".into()).as_f64(), Some(42.5));
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::String("abc".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn date_coercion_drops_time_of_day() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(Value::Timestamp(ts).as_date(), Some(day));
        assert_eq!(Value::String("2024-03-15".into()).as_date(), Some(day));
        assert_eq!(Value::Int(20240315).as_date(), None);
    }

    #[test]
    fn cross_kind_numeric_compare() {
        assert_eq!(
            Value::Int(3).compare(&Value::Float(3.0)),
            Some(Ordering::Equal)
        );
        assert!(Value::Int(3).equal(&Value::Float(3.0)));
        assert!(!Value::String("3".into()).equal(&Value::Int(3)));
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(Value::Null.render(), "");
        assert!(Value::Null.is_null());
    }
}
