pub mod models;
pub mod error;
pub mod config;
pub mod candidates;
pub mod oracle;
pub mod enumerator;
pub mod cli;

/// Console output for classification lines and the final listing
pub mod reporting;
