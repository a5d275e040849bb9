use crate::error::ConditionError;
use model::core::{data_type::DataType, value::Value};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The fixed operator set. Each operator declares the operand shape it
/// accepts, checked when the condition is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Between,
    DateEquals,
    DateAfter,
    DateBefore,
    DateBetween,
    IsNull,
    IsNotNull,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    Empty,
    Scalar,
    Range,
}

impl OperandShape {
    fn describe(&self) -> &'static str {
        match self {
            OperandShape::Empty => "no",
            OperandShape::Scalar => "one",
            OperandShape::Range => "two",
        }
    }
}

impl FilterOperator {
    pub fn operand_shape(&self) -> OperandShape {
        match self {
            FilterOperator::IsNull | FilterOperator::IsNotNull => OperandShape::Empty,
            FilterOperator::Between | FilterOperator::DateBetween => OperandShape::Range,
            _ => OperandShape::Scalar,
        }
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" | "equals" => Ok(FilterOperator::Equals),
            "!=" | "<>" | "ne" | "not_equals" => Ok(FilterOperator::NotEquals),
            "contains" => Ok(FilterOperator::Contains),
            "not_contains" => Ok(FilterOperator::NotContains),
            "starts_with" => Ok(FilterOperator::StartsWith),
            "ends_with" => Ok(FilterOperator::EndsWith),
            ">" | "gt" => Ok(FilterOperator::GreaterThan),
            "<" | "lt" => Ok(FilterOperator::LessThan),
            ">=" | "ge" => Ok(FilterOperator::GreaterEqual),
            "<=" | "le" => Ok(FilterOperator::LessEqual),
            "between" => Ok(FilterOperator::Between),
            "date_eq" | "date_equals" => Ok(FilterOperator::DateEquals),
            "date_after" => Ok(FilterOperator::DateAfter),
            "date_before" => Ok(FilterOperator::DateBefore),
            "date_between" => Ok(FilterOperator::DateBetween),
            "is_null" => Ok(FilterOperator::IsNull),
            "is_not_null" => Ok(FilterOperator::IsNotNull),
            "matches" | "regex" => Ok(FilterOperator::Regex),
            other => Err(format!("Unsupported operator: {other}")),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::GreaterEqual => "greater_equal",
            FilterOperator::LessEqual => "less_equal",
            FilterOperator::Between => "between",
            FilterOperator::DateEquals => "date_equals",
            FilterOperator::DateAfter => "date_after",
            FilterOperator::DateBefore => "date_before",
            FilterOperator::DateBetween => "date_between",
            FilterOperator::IsNull => "is_null",
            FilterOperator::IsNotNull => "is_not_null",
            FilterOperator::Regex => "regex",
        };
        write!(f, "{name}")
    }
}

/// Operand payload, shaped by the operator's declared arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Empty,
    Scalar(Value),
    Range(Value, Value),
}

impl Operand {
    pub fn shape(&self) -> OperandShape {
        match self {
            Operand::Empty => OperandShape::Empty,
            Operand::Scalar(_) => OperandShape::Scalar,
            Operand::Range(_, _) => OperandShape::Range,
        }
    }
}

/// AND/OR tag joining two adjacent conditions in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    And,
    Or,
}

impl FromStr for Combinator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Combinator::And),
            "or" => Ok(Combinator::Or),
            other => Err(format!("Unsupported combinator: {other}")),
        }
    }
}

/// One column/operator/operand predicate. Immutable once built; the UI
/// pattern for editing is remove-and-re-add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCondition {
    column: String,
    operator: FilterOperator,
    operand: Operand,
    hint: Option<DataType>,
}

impl FilterCondition {
    pub fn new(
        column: &str,
        operator: FilterOperator,
        operand: Operand,
    ) -> Result<Self, ConditionError> {
        let expected = operator.operand_shape();
        if operand.shape() != expected {
            return Err(ConditionError::OperandShape {
                operator: operator.to_string(),
                expected: expected.describe(),
                got: operand.shape().describe(),
            });
        }

        if let Operand::Range(low, high) = &operand {
            match operator {
                FilterOperator::Between => validate_range(
                    operator,
                    low.as_f64(),
                    high.as_f64(),
                    low,
                    high,
                    "numeric",
                )?,
                FilterOperator::DateBetween => validate_range(
                    operator,
                    low.as_date(),
                    high.as_date(),
                    low,
                    high,
                    "date",
                )?,
                _ => {}
            }
        }

        Ok(FilterCondition {
            column: column.to_string(),
            operator,
            operand,
            hint: None,
        })
    }

    /// Attach an explicit type hint, overriding the column's inferred tag
    /// during raw-value comparisons.
    pub fn with_hint(mut self, hint: DataType) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn hint(&self) -> Option<DataType> {
        self.hint
    }
}

fn validate_range<T: PartialOrd>(
    operator: FilterOperator,
    low: Option<T>,
    high: Option<T>,
    raw_low: &Value,
    raw_high: &Value,
    expected: &'static str,
) -> Result<(), ConditionError> {
    match (low, high) {
        (Some(l), Some(h)) => {
            if l > h {
                Err(ConditionError::EmptyRange {
                    low: raw_low.render(),
                    high: raw_high.render(),
                })
            } else {
                Ok(())
            }
        }
        _ => Err(ConditionError::RangeType {
            operator: operator.to_string(),
            expected,
        }),
    }
}
