use std::env;

use crate::solver::SearchOptions;

/// Driver settings read from the environment. Unset or unparseable values
/// fall back to the defaults.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub dimension: usize,
    pub visited_set: bool,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dimension = lookup("PUZZLE_DIMENSION")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value >= 2)
            .unwrap_or(3);

        let visited_set = lookup("PUZZLE_VISITED_SET")
            .and_then(|raw| raw.trim().parse::<bool>().ok())
            .unwrap_or(true);

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        AppConfig {
            dimension,
            visited_set,
            log_level,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            visited_set: self.visited_set,
        }
    }
}
