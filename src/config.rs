/// Tunable game parameters, loadable from TOML.
///
/// Every section falls back to `Default`, so a config file only needs the
/// keys it wants to override.  Defaults reproduce the classic 1000×600 layout.

use std::path::Path;

use serde::Deserialize;

use crate::entities::{Category, CollectibleKind};
use crate::error::{GameError, GameResult};

// ── Screen constants ─────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 1000.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const GROUND_WIDTH: f32 = 600.0;

/// Ground segments needed to span four screens.
pub const GROUND_SEGMENTS: usize = ((SCREEN_WIDTH as usize) * 4) / (GROUND_WIDTH as usize);

// ── Sections ─────────────────────────────────────────────────────────────────

/// Which content the level generates.  Plain collectibles are always on.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Features {
    pub obstacles: bool,
    pub flying_hazards: bool,
    pub floating_platforms: bool,
    /// Flight, shield and multiplier collectibles.
    pub power_ups: bool,
}

impl Default for Features {
    fn default() -> Self {
        Features {
            obstacles: true,
            flying_hazards: true,
            floating_platforms: true,
            power_ups: true,
        }
    }
}

impl Features {
    pub fn enables(&self, category: Category) -> bool {
        match category {
            Category::Obstacle => self.obstacles,
            Category::Collectible => true,
            Category::Hazard => self.flying_hazards,
            Category::Platform => self.floating_platforms,
        }
    }

    /// Everything off except plain collectibles.
    pub fn minimal() -> Self {
        Features {
            obstacles: false,
            flying_hazards: false,
            floating_platforms: false,
            power_ups: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, units/s².
    pub gravity: f32,
    /// Initial upward velocity of a jump, units/s.
    pub jump_impulse: f32,
    /// Horizontal speed at t = 0.
    pub base_speed: f32,
    /// Speed gained per second of play.  Uncapped.
    pub speed_scaling: f32,
    /// Vertical speed while surfing.
    pub surf_speed: f32,
    pub ground_y: f32,
    /// Highest point a surfing player can reach.
    pub ceiling_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 2400.0,
            jump_impulse: 900.0,
            base_speed: 300.0,
            speed_scaling: 6.0,
            surf_speed: 350.0,
            ground_y: 0.0,
            ceiling_y: SCREEN_HEIGHT - 120.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamagePolicy {
    /// At most one damage application per update, however many hazards overlap.
    OncePerFrame,
    /// Every overlapping hazard deals damage.
    PerHazard,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
    pub hazard_damage: u32,
    pub coin_score: u32,
    pub coin_heal: u32,
    /// Seconds each run/surf animation frame is shown.
    pub run_frame_time: f32,
    /// Seconds a power-up lasts after pickup.
    pub power_up_duration: f32,
    pub damage_policy: DamagePolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            start_x: 200.0,
            width: 60.0,
            height: 80.0,
            max_health: 200,
            hazard_damage: 40,
            coin_score: 10,
            coin_heal: 5,
            run_frame_time: 0.1,
            power_up_duration: 5.0,
            damage_policy: DamagePolicy::OncePerFrame,
        }
    }
}

/// Size, spacing and allowed heights for one entity category.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpawnConfig {
    pub width: f32,
    pub height: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    /// Bottom-edge heights to pick from, uniformly.
    pub heights: Vec<f32>,
}

/// Relative spawn weights for collectible kinds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollectibleWeights {
    pub plain: u32,
    pub special: u32,
    pub shield: u32,
    pub multiplier: u32,
}

impl Default for CollectibleWeights {
    fn default() -> Self {
        CollectibleWeights {
            plain: 80,
            special: 7,
            shield: 8,
            multiplier: 5,
        }
    }
}

impl CollectibleWeights {
    pub fn table(&self) -> [(CollectibleKind, u32); 4] {
        [
            (CollectibleKind::Plain, self.plain),
            (CollectibleKind::Special, self.special),
            (CollectibleKind::Shield, self.shield),
            (CollectibleKind::Multiplier, self.multiplier),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Lookahead kept populated in front of the player.
    pub spawn_distance: f32,
    /// Empty run-up in front of the player at level start.
    pub safe_zone: f32,
    /// How far the camera's left edge trails the player.
    pub camera_offset: f32,
    pub ground_width: f32,
    pub ground_segments: usize,
    pub obstacles: SpawnConfig,
    pub collectibles: SpawnConfig,
    pub collectible_weights: CollectibleWeights,
    pub hazards: SpawnConfig,
    pub platforms: SpawnConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            spawn_distance: SCREEN_WIDTH,
            safe_zone: 400.0,
            camera_offset: 200.0,
            ground_width: GROUND_WIDTH,
            ground_segments: GROUND_SEGMENTS,
            obstacles: SpawnConfig {
                width: 40.0,
                height: 60.0,
                gap_min: 350.0,
                gap_max: 700.0,
                heights: vec![0.0],
            },
            collectibles: SpawnConfig {
                width: 30.0,
                height: 30.0,
                gap_min: 180.0,
                gap_max: 420.0,
                heights: vec![20.0, 140.0],
            },
            collectible_weights: CollectibleWeights::default(),
            hazards: SpawnConfig {
                width: 60.0,
                height: 40.0,
                gap_min: 650.0,
                gap_max: 880.0,
                heights: vec![100.0, 190.0],
            },
            platforms: SpawnConfig {
                width: 160.0,
                height: 16.0,
                gap_min: 450.0,
                gap_max: 780.0,
                heights: vec![110.0, 150.0],
            },
        }
    }
}

impl WorldConfig {
    pub fn spawn(&self, category: Category) -> &SpawnConfig {
        match category {
            Category::Obstacle => &self.obstacles,
            Category::Collectible => &self.collectibles,
            Category::Hazard => &self.hazards,
            Category::Platform => &self.platforms,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Log file; logging is disabled when absent.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

// ── Root ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed.  A fresh one is drawn per run when absent.
    pub seed: Option<u64>,
    pub features: Features,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub world: WorldConfig,
    pub logging: LoggingConfig,
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Rejects parameter sets the generator or physics cannot honour.
    pub fn validate(&self) -> GameResult<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.player.max_health == 0 {
            return invalid("player.max_health must be positive".into());
        }
        if self.player.width <= 0.0 || self.player.height <= 0.0 {
            return invalid("player size must be positive".into());
        }
        if self.player.run_frame_time <= 0.0 {
            return invalid("player.run_frame_time must be positive".into());
        }
        if self.world.spawn_distance <= 0.0 {
            return invalid("world.spawn_distance must be positive".into());
        }
        if self.world.ground_segments < 2 || self.world.ground_width <= 0.0 {
            return invalid("world needs at least two ground segments of positive width".into());
        }
        if self.physics.ceiling_y <= self.physics.ground_y {
            return invalid("physics.ceiling_y must be above physics.ground_y".into());
        }

        for category in Category::ALL {
            let spawn = self.world.spawn(category);
            let name = category.name();
            if spawn.width <= 0.0 || spawn.height <= 0.0 {
                return invalid(format!("world.{name}: size must be positive"));
            }
            if spawn.gap_min < 0.0 || spawn.gap_min > spawn.gap_max {
                return invalid(format!("world.{name}: need 0 <= gap_min <= gap_max"));
            }
            if spawn.gap_max + spawn.width >= self.world.spawn_distance {
                return invalid(format!(
                    "world.{name}: gap_max + width must stay below spawn_distance"
                ));
            }
            if spawn.heights.is_empty() {
                return invalid(format!("world.{name}: heights must not be empty"));
            }
        }

        let weights = &self.world.collectible_weights;
        if weights.table().iter().all(|(_, w)| *w == 0) {
            return invalid("world.collectible_weights must not all be zero".into());
        }

        Ok(())
    }
}
