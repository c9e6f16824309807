//! Row models and query DTOs.
//!
//! - `log_entry`: the `log_entries` row, the source file listing and the
//!   filter DTO for log queries
//! - `analytics`: rows returned by the grouped-count queries

pub mod analytics;
pub mod log_entry;
