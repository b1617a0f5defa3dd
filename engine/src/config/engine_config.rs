use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::obstacle::{DEFAULT_MAX_OBSTACLE_LENGTH, DEFAULT_OBSTACLE_THRESHOLD};
use crate::session::ObstacleRules;
use crate::types::GridSize;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 75;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub width: i32,
    pub height: i32,
    pub tick_interval_ms: u64,
    pub obstacle_threshold: u32,
    pub max_obstacle_length: u32,
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Defaults for a `width` x `height` grid. Obstacle lines are shortened to
    /// fit grids narrower than the default length.
    pub fn with_size(width: i32, height: i32) -> Self {
        let max_obstacle_length = u32::try_from(width)
            .map_or(DEFAULT_MAX_OBSTACLE_LENGTH, |width| DEFAULT_MAX_OBSTACLE_LENGTH.min(width.max(1)));
        Self {
            width,
            height,
            max_obstacle_length,
            ..Self::default()
        }
    }

    pub fn grid(&self) -> Result<GridSize, String> {
        GridSize::new(self.width, self.height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn obstacle_rules(&self) -> ObstacleRules {
        ObstacleRules {
            threshold: self.obstacle_threshold,
            max_length: self.max_obstacle_length,
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        self.grid()?;
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be greater than 0".to_string());
        }
        if self.tick_interval_ms > 10_000 {
            return Err("tick_interval_ms must not exceed 10000".to_string());
        }
        if self.obstacle_threshold == 0 {
            return Err("obstacle_threshold must be at least 1".to_string());
        }
        if self.max_obstacle_length == 0 {
            return Err("max_obstacle_length must be at least 1".to_string());
        }
        if self.max_obstacle_length as i64 > self.width as i64 {
            return Err("max_obstacle_length must not exceed width".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 58,
            height: 78,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            obstacle_threshold: DEFAULT_OBSTACLE_THRESHOLD,
            max_obstacle_length: DEFAULT_MAX_OBSTACLE_LENGTH,
            seed: None,
        }
    }
}
