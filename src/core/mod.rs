pub mod errors;
pub mod execution;
pub mod results;
pub mod types;
