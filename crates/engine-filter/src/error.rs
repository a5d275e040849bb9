use thiserror::Error;

/// Construction-time validation failures. A condition that fails these checks
/// is never created; the caller re-prompts instead.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("Operator '{operator}' expects {expected} operand(s), got {got}")]
    OperandShape {
        operator: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Operator '{operator}' requires {expected} range bounds")]
    RangeType {
        operator: String,
        expected: &'static str,
    },

    #[error("Range lower bound '{low}' exceeds upper bound '{high}'")]
    EmptyRange { low: String, high: String },
}

/// Per-condition evaluation failures. These never abort an `apply` call: the
/// affected condition degrades to an all-false mask and the error is handed
/// back to the caller as a warning.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
