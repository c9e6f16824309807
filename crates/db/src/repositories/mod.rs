//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` (or a connection, when the caller owns a transaction)
//! as the first argument.

pub mod log_entry_repo;

pub use log_entry_repo::LogEntryRepo;
