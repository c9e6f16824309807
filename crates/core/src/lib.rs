//! Domain logic for the logscope log analytics service.
//!
//! Everything in this crate is pure: line parsing, filter normalization,
//! analytics shaping and upload filename rules. Persistence lives in
//! `logscope-db`, HTTP in `logscope-api`.

pub mod analytics;
pub mod error;
pub mod filters;
pub mod levels;
pub mod parser;
pub mod types;
pub mod upload;
