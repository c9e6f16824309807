//! The set of log levels that the hourly matrix always reports.
//!
//! Levels outside the set are still counted. Any such level observed in scope
//! is added to every hourly bucket of every date, like a tracked one.

use crate::error::CoreError;

/// Levels reported by default, in display order.
pub const DEFAULT_TRACKED_LEVELS: [&str; 4] = ["INFO", "ERROR", "DEBUG", "WARNING"];

/// An ordered, duplicate-free list of level tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSet {
    levels: Vec<String>,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self {
            levels: DEFAULT_TRACKED_LEVELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl LevelSet {
    /// Build a level set, trimming tokens and dropping duplicates.
    ///
    /// Fails if a token is blank or the set ends up empty.
    pub fn new<I, S>(levels: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { levels: Vec::new() };
        for level in levels {
            let level = level.as_ref().trim();
            if level.is_empty() {
                return Err(CoreError::Validation(
                    "level names must not be blank".to_string(),
                ));
            }
            set.push(level);
        }
        if set.levels.is_empty() {
            return Err(CoreError::Validation(
                "at least one tracked level is required".to_string(),
            ));
        }
        Ok(set)
    }

    /// Parse a comma-separated list such as `INFO,ERROR,DEBUG,WARNING,TRACE`.
    pub fn parse_list(list: &str) -> Result<Self, CoreError> {
        Self::new(list.split(','))
    }

    /// Return a copy of the set extended with `level`.
    pub fn with_level(mut self, level: &str) -> Self {
        self.push(level);
        self
    }

    pub fn contains(&self, level: &str) -> bool {
        self.levels.iter().any(|l| l == level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn push(&mut self, level: &str) {
        if !self.contains(level) {
            self.levels.push(level.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_tracks_four_levels() {
        let set = LevelSet::default();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["INFO", "ERROR", "DEBUG", "WARNING"]
        );
    }

    #[test]
    fn parse_list_trims_and_dedupes() {
        let set = LevelSet::parse_list(" INFO, ERROR ,INFO,TRACE").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["INFO", "ERROR", "TRACE"]);
    }

    #[test]
    fn parse_list_rejects_blank_tokens() {
        assert_matches!(
            LevelSet::parse_list("INFO,,ERROR"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(LevelSet::parse_list(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn with_level_extends_once() {
        let set = LevelSet::default().with_level("FATAL").with_level("FATAL");
        assert_eq!(set.len(), 5);
        assert!(set.contains("FATAL"));
    }
}
