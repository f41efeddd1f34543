use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::gesture::{Drag, DEFAULT_MIN_DISTANCE};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for the terminal front end.
///
/// Every field is optional in the TOML file:
/// ```toml
/// seed = 7
/// min_drag_distance = 30.0
/// show_feedback = true
///
/// [autoplay]
/// max_steps = 500
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub min_drag_distance: f64,
    /// Print the feedback class after each move.
    pub show_feedback: bool,
    pub autoplay: Autoplay,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Autoplay {
    /// Stop after this many moves even if the game is still running.
    pub max_steps: Option<u64>,
    /// Print the board after every move.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            min_drag_distance: DEFAULT_MIN_DISTANCE,
            show_feedback: true,
            autoplay: Autoplay::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Swipe recogniser; a non-finite or negative distance falls back to the default.
    pub fn drag(&self) -> Drag {
        match self.min_drag_distance {
            d if d.is_finite() && d >= 0.0 => Drag::new(d),
            _ => Drag::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.drag(), Drag::default());
    }

    #[test]
    fn parses_all_fields() {
        let cfg = Config::from_toml_str(
            r#"
            seed = 7
            min_drag_distance = 12.5
            show_feedback = false

            [autoplay]
            max_steps = 500
            verbose = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.drag(), Drag::new(12.5));
        assert!(!cfg.show_feedback);
        assert_eq!(cfg.autoplay.max_steps, Some(500));
        assert!(cfg.autoplay.verbose);
    }

    #[test]
    fn bad_distance_falls_back() {
        let cfg = Config::from_toml_str("min_drag_distance = -1.0").unwrap();
        assert_eq!(cfg.drag(), Drag::default());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = Config::from_toml_str("seed = \"abc\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_toml("/nonexistent/game-2048.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
