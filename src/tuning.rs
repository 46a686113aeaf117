//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`GameTuning`]. The defaults
//! reproduce the reference balance; a JSON file can override any of it.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::food::{FoodKind, FoodRule};

/// Relative weight of one food kind in the primary draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub kind: FoodKind,
    pub weight: f64,
}

/// Optional second item rolled independently of the primary draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusSpawn {
    pub kind: FoodKind,
    pub probability: f64,
    /// Level at which the bonus roll starts happening
    pub min_level: u32,
}

/// Catalog entry: how a food kind looks and what eating it does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSpec {
    pub kind: FoodKind,
    pub color: String,
    pub rule: FoodRule,
}

/// Food economy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTable {
    /// Cumulative primary draw table (order matters)
    pub weights: Vec<SpawnWeight>,
    /// Kind used when the roll lands past the cumulative total
    pub fallback: FoodKind,
    /// Kinds that may not be the very first food of a run
    pub never_first: Vec<FoodKind>,
    pub bonus: Option<BonusSpawn>,
    pub catalog: Vec<FoodSpec>,
}

impl FoodTable {
    pub fn spec(&self, kind: FoodKind) -> Option<&FoodSpec> {
        self.catalog.iter().find(|s| s.kind == kind)
    }
}

impl Default for FoodTable {
    fn default() -> Self {
        Self {
            weights: vec![
                SpawnWeight { kind: FoodKind::Apple, weight: 0.7 },
                SpawnWeight { kind: FoodKind::Cherry, weight: 0.1 },
                SpawnWeight { kind: FoodKind::GoldenApple, weight: 0.05 },
                SpawnWeight { kind: FoodKind::GlitchBerry, weight: 0.02 },
            ],
            fallback: FoodKind::Apple,
            never_first: vec![FoodKind::GoldenApple, FoodKind::HubrisBerry],
            bonus: Some(BonusSpawn {
                kind: FoodKind::HubrisBerry,
                probability: 0.15,
                min_level: 1,
            }),
            catalog: vec![
                FoodSpec {
                    kind: FoodKind::Apple,
                    color: "#ff0000".into(),
                    rule: FoodRule::Flat { points: 1 },
                },
                FoodSpec {
                    kind: FoodKind::Cherry,
                    color: "#ff69b4".into(),
                    rule: FoodRule::Combo {
                        points: 1,
                        charges: COMBO_CHARGES,
                    },
                },
                FoodSpec {
                    kind: FoodKind::GoldenApple,
                    color: "#FFD700".into(),
                    rule: FoodRule::Jackpot { glow_ms: GLOW_MS },
                },
                FoodSpec {
                    kind: FoodKind::HubrisBerry,
                    color: "#4B0082".into(),
                    rule: FoodRule::Decaying {
                        base_points: 5,
                        base_multiplier: HUBRIS_BASE_MULTIPLIER,
                        decay_rate: HUBRIS_DECAY_RATE,
                        floor: HUBRIS_FLOOR,
                    },
                },
                FoodSpec {
                    kind: FoodKind::GlitchBerry,
                    color: "#00ffcc".into(),
                    rule: FoodRule::Cosmetic {
                        palette_ms: PALETTE_CYCLE_MS,
                        points: 0,
                    },
                },
            ],
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub grid_size: i32,
    pub initial_pos: IVec2,
    pub base_speed_ms: u32,
    pub min_speed_ms: u32,
    /// Consumptions per level-up
    pub speed_interval: u32,
    pub level_max: u32,
    pub speed_step_ms: u32,
    pub food: FoodTable,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_pos: IVec2::new(INITIAL_POS.0, INITIAL_POS.1),
            base_speed_ms: BASE_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_interval: SPEED_INTERVAL,
            level_max: LEVEL_MAX,
            speed_step_ms: SPEED_STEP_MS,
            food: FoodTable::default(),
        }
    }
}

impl GameTuning {
    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if !self.in_bounds(self.initial_pos) {
            return Err(ConfigError::StartOutsideGrid {
                x: self.initial_pos.x,
                y: self.initial_pos.y,
            });
        }
        if self.min_speed_ms > self.base_speed_ms {
            return Err(ConfigError::SpeedRange {
                min_ms: self.min_speed_ms,
                base_ms: self.base_speed_ms,
            });
        }
        if self.level_max == 0 {
            return Err(ConfigError::NoLevels);
        }

        let food = &self.food;
        let mut total = 0.0;
        for w in &food.weights {
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(ConfigError::BadWeight {
                    kind: w.kind.to_string(),
                    weight: w.weight,
                });
            }
            total += w.weight;
        }
        if total <= 0.0 {
            return Err(ConfigError::EmptyWeights);
        }

        let mut used: Vec<FoodKind> = food.weights.iter().map(|w| w.kind).collect();
        used.push(food.fallback);
        if let Some(bonus) = food.bonus {
            if !(0.0..=1.0).contains(&bonus.probability) {
                return Err(ConfigError::BadProbability(bonus.probability));
            }
            used.push(bonus.kind);
        }
        for kind in used {
            if food.spec(kind).is_none() {
                return Err(ConfigError::MissingCatalogEntry(kind.to_string()));
            }
        }
        Ok(())
    }

    /// Whether a cell lies inside `[0, grid_size)` on both axes
    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        (0..self.grid_size).contains(&pos.x) && (0..self.grid_size).contains(&pos.y)
    }
}
