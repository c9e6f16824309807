pub mod analytics;
pub mod files;
pub mod logs;
