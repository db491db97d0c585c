use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the game
///
/// Every field has a default, so a JSON file only needs the keys it wants to
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Initial length of the snake, laid out along the top row
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Use a fixed seed for food placement
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that a game can be started with these settings
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size >= 2, "grid_size must be at least 2");
        ensure!(
            self.grid_size <= i32::MAX as usize,
            "grid_size {} does not fit grid coordinates",
            self.grid_size
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial_snake_length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.grid_size,
            "initial_snake_length {} does not fit a row of {} cells",
            self.initial_snake_length,
            self.grid_size
        );
        ensure!(
            self.initial_snake_length < self.cell_count(),
            "the initial snake leaves no room for food"
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(())
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.tick_interval_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_seed(7);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validation_rejects_bad_sizes() {
        assert!(GameConfig::new(1).validate().is_err());
        assert!(GameConfig::new(2).validate().is_err()); // snake of 3 does not fit

        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            grid_size: 2,
            initial_snake_length: 2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "grid_size": 12 }"#).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "grid_snake_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "grid_size": 8, "seed": 42 }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.grid_size, 8);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = GameConfig::from_json_file(Path::new("/nonexistent/grid_snake.json"));
        assert!(result.is_err());
    }
}
