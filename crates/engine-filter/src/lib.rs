pub mod condition;
pub mod error;
pub mod eval;
pub mod mask;
pub mod pipeline;
pub mod search;
pub mod set;
