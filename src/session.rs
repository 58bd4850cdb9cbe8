/// Game session controller: owns the config, the seeded RNG and the current
/// state, and is the surface a frame driver talks to.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Action, GameState, GameStatus, SoundEvent};
use crate::snapshot::{self, Snapshot};

pub struct Game {
    config: GameConfig,
    seed: u64,
    rng: StdRng,
    state: GameState,
    pending: Vec<SoundEvent>,
}

impl Game {
    /// A fresh level.  The same config and seed always produce the same layout.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = compute::init_state(&config, &mut rng);
        Game {
            config,
            seed,
            rng,
            state,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.session.status
    }

    pub fn exit_requested(&self) -> bool {
        self.state.session.exit_requested
    }

    /// Advance one frame.
    pub fn update(&mut self, dt: f32) {
        self.state = compute::tick(&self.state, &self.config, dt, &mut self.rng);
        self.pending.extend(self.state.events.iter().copied());
    }

    pub fn on_press(&mut self, action: Action) {
        if action == Action::Restart {
            if self.status() == GameStatus::GameOver {
                self.restart();
            }
            return;
        }
        self.state = compute::press(&self.state, action, &self.config);
    }

    pub fn on_release(&mut self, action: Action) {
        self.state = compute::release(&self.state, action, &self.config);
    }

    pub fn snapshot(&self) -> Snapshot {
        snapshot::snapshot(&self.state, &self.config)
    }

    /// Sound cues emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Back to the start of the level with the current seed.
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.state = compute::init_state(&self.config, &mut self.rng);
        self.pending.clear();
        log::debug!("restarted with seed {}", self.seed);
    }

    /// Restart on a different layout.
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.restart();
    }
}
