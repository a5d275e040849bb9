use connectors::csv::error::FileError;
use engine_filter::error::ConditionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the input file: {0}")]
    InputRead(#[from] FileError),

    #[error("Invalid filter expression '{expr}': {reason}")]
    InvalidExpression { expr: String, reason: String },

    #[error("Invalid filter condition: {0}")]
    InvalidCondition(#[from] ConditionError),

    #[error("Invalid type override '{0}': expected '<column>=<number|date|text>'")]
    InvalidTypeOverride(String),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Invalid delimiter '{0}': must be a single-byte character")]
    InvalidDelimiter(char),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
