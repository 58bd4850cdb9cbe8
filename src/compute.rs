/// Frame pipeline.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`.  Side effects are limited
/// to the injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Action, Frontier, GameState, GameStatus, MotionState, Session, SoundEvent};
use crate::{collision, player, powerup, world};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the start-of-level state, including the initial world population.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let player = player::new_player(config);
    let mut session = Session {
        elapsed: 0.0,
        status: GameStatus::Playing,
        frontier: Frontier::default(),
        exit_requested: false,
    };
    let mut level = world::new_world(config);
    world::populate(&mut level, &mut session.frontier, player.x, config, rng);

    GameState {
        player,
        session,
        world: level,
        events: Vec::new(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn press(state: &GameState, action: Action, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    if next.session.status == GameStatus::GameOver && action != Action::Exit {
        return next;
    }

    let p = &mut next.player;
    match action {
        Action::Jump => {
            let was_held = p.jump_held;
            p.jump_held = true;
            // Holding the key through a landing does not re-jump.
            if !was_held && !player::start(p) {
                player::jump(p, &config.physics);
            }
        }
        Action::Up => p.vertical_input = 1,
        Action::Down => p.vertical_input = -1,
        Action::Exit => next.session.exit_requested = true,
        // Restart needs a fresh RNG; the session driver owns it.
        Action::Restart => {}
    }
    next
}

pub fn release(state: &GameState, action: Action, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    let p = &mut next.player;
    match action {
        Action::Jump => player::release_jump(p, &config.physics),
        Action::Up if p.vertical_input > 0 => p.vertical_input = 0,
        Action::Down if p.vertical_input < 0 => p.vertical_input = 0,
        _ => {}
    }
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt` seconds.  `dt` is used as given, so a long
/// stall produces one large step.
pub fn tick(state: &GameState, config: &GameConfig, dt: f32, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.events.clear();

    // ── 1. Terminal / pre-start ──────────────────────────────────────────────
    if next.session.status == GameStatus::GameOver {
        return next;
    }
    if next.player.state == MotionState::Idling {
        return next;
    }
    next.session.elapsed += dt;

    // ── 2. Player motion & animation ─────────────────────────────────────────
    player::update(
        &mut next.player,
        &mut next.world.platforms,
        config,
        next.session.elapsed,
        dt,
    );

    // ── 3. World generation ──────────────────────────────────────────────────
    world::maintain(
        &mut next.world,
        &mut next.session.frontier,
        next.player.x,
        config,
        rng,
    );

    // ── 4. Collisions & effects ──────────────────────────────────────────────
    collision::resolve(&mut next.player, &mut next.world, config, &mut next.events);

    // ── 5. Power-up timers ───────────────────────────────────────────────────
    powerup::update(&mut next.player, &config.physics, dt);

    // ── 6. Game-over check ───────────────────────────────────────────────────
    if next.player.health == 0 {
        next.session.status = GameStatus::GameOver;
        next.events.push(SoundEvent::GameOver);
        log::info!(
            "game over: score {} after {:.1}s at x={:.0}",
            next.player.score,
            next.session.elapsed,
            next.player.x
        );
    }

    next
}
