/// Player state machine: motion states, jump/gravity physics, platform
/// support and the run-cycle animation clock.

use crate::animation::CYCLE_FRAMES;
use crate::config::{GameConfig, PhysicsConfig};
use crate::entities::{Entity, MotionState, Player, PowerUpKind, PowerUps};

const GROUND_EPSILON: f32 = 0.001;

/// Horizontal speed after `elapsed` seconds of play.  Grows without bound.
pub fn speed(elapsed: f32, physics: &PhysicsConfig) -> f32 {
    physics.base_speed + physics.speed_scaling * elapsed
}

pub fn new_player(config: &GameConfig) -> Player {
    Player {
        x: config.player.start_x,
        y: config.physics.ground_y,
        vy: 0.0,
        width: config.player.width,
        height: config.player.height,
        state: MotionState::Idling,
        health: config.player.max_health,
        max_health: config.player.max_health,
        score: 0,
        power_ups: PowerUps::default(),
        anim_frame: 0,
        anim_timer: 0.0,
        jump_held: false,
        vertical_input: 0,
        standing_on: None,
        crashed: false,
    }
}

pub fn is_grounded(player: &Player, physics: &PhysicsConfig) -> bool {
    player.standing_on.is_some() || player.y <= physics.ground_y + GROUND_EPSILON
}

/// Health after taking `amount` damage, kept within `[0, max]`.
pub fn apply_damage(health: u32, amount: u32, max: u32) -> u32 {
    health.saturating_sub(amount).min(max)
}

pub fn heal(health: u32, amount: u32, max: u32) -> u32 {
    health.saturating_add(amount).min(max)
}

// ── Transitions ──────────────────────────────────────────────────────────────

/// Idling → Running.  Returns whether the run started.
pub fn start(player: &mut Player) -> bool {
    if player.state != MotionState::Idling {
        return false;
    }
    player.state = MotionState::Running;
    true
}

/// Running → Jumping.  Any other state ignores the jump.
pub fn jump(player: &mut Player, physics: &PhysicsConfig) -> bool {
    if player.state != MotionState::Running {
        return false;
    }
    player.state = MotionState::Jumping;
    player.vy = physics.jump_impulse;
    true
}

/// Jump key released: a grounded jumper goes back to running.
pub fn release_jump(player: &mut Player, physics: &PhysicsConfig) {
    player.jump_held = false;
    if player.state == MotionState::Jumping && player.vy <= 0.0 && is_grounded(player, physics) {
        player.state = MotionState::Running;
    }
}

pub fn enter_surfing(player: &mut Player) {
    if player.state == MotionState::Idling {
        return;
    }
    player.state = MotionState::Surfing;
    player.vy = 0.0;
}

/// Flight ran out.  An airborne player falls as if mid-jump.
pub fn end_surfing(player: &mut Player, physics: &PhysicsConfig) {
    if player.state != MotionState::Surfing {
        return;
    }
    player.vy = 0.0;
    player.state = if is_grounded(player, physics) {
        player.y = player.y.max(physics.ground_y);
        MotionState::Running
    } else {
        MotionState::Jumping
    };
}

/// The state a player returns to once a crash pulse has been applied.
fn settled_state(player: &Player, physics: &PhysicsConfig) -> MotionState {
    if player.power_ups.is_active(PowerUpKind::Flight) {
        MotionState::Surfing
    } else if is_grounded(player, physics) && player.vy <= 0.0 {
        MotionState::Running
    } else {
        MotionState::Jumping
    }
}

/// Crashing pulse: enter and leave within the same update.
pub fn crash(player: &mut Player, physics: &PhysicsConfig) {
    player.state = MotionState::Crashing;
    player.crashed = true;
    player.state = settled_state(player, physics);
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advances position, vertical physics and animation by `dt`.
pub fn update(
    player: &mut Player,
    platforms: &mut [Entity],
    config: &GameConfig,
    elapsed: f32,
    dt: f32,
) {
    player.crashed = false;
    if player.state == MotionState::Idling {
        return;
    }

    let physics = &config.physics;
    player.x += speed(elapsed, physics) * dt;

    if player.state == MotionState::Surfing {
        leave_platform(player, platforms);
        player.vy = f32::from(player.vertical_input) * physics.surf_speed;
        player.y = (player.y + player.vy * dt).clamp(physics.ground_y, physics.ceiling_y);
    } else {
        fall(player, platforms, physics, dt);
    }

    animate(player, config.player.run_frame_time, dt);
}

fn fall(player: &mut Player, platforms: &mut [Entity], physics: &PhysicsConfig, dt: f32) {
    if let Some(id) = player.standing_on {
        let bounds = player.bounds();
        let still_on = player.vy <= 0.0
            && platforms
                .iter()
                .any(|p| p.id == id && p.active && p.bounds.overlaps_span(&bounds, 0.0));
        if still_on {
            player.vy = 0.0;
            return;
        }
        leave_platform(player, platforms);
    }

    if player.vy <= 0.0 && player.y <= physics.ground_y + GROUND_EPSILON {
        land(player, physics.ground_y);
        return;
    }

    let prev_bottom = player.y;
    player.vy -= physics.gravity * dt;
    player.y += player.vy * dt;

    if player.vy <= 0.0 {
        let bounds = player.bounds();
        let landing = platforms
            .iter()
            .filter(|p| p.active && !p.broken && p.bounds.overlaps_span(&bounds, 0.0))
            .filter(|p| prev_bottom >= p.bounds.top() - GROUND_EPSILON && player.y <= p.bounds.top())
            .max_by(|a, b| a.bounds.top().total_cmp(&b.bounds.top()))
            .map(|p| (p.id, p.bounds.top()));
        if let Some((id, top)) = landing {
            land(player, top);
            player.standing_on = Some(id);
            return;
        }
    }

    if player.y <= physics.ground_y {
        land(player, physics.ground_y);
    } else if player.state == MotionState::Running {
        // Ran off a ledge.
        player.state = MotionState::Jumping;
    }
}

fn land(player: &mut Player, surface: f32) {
    player.y = surface;
    player.vy = 0.0;
    if player.state == MotionState::Jumping {
        player.state = MotionState::Running;
    }
}

/// Stepping off a platform crumbles it.
fn leave_platform(player: &mut Player, platforms: &mut [Entity]) {
    if let Some(id) = player.standing_on.take() {
        if let Some(platform) = platforms.iter_mut().find(|p| p.id == id) {
            platform.broken = true;
            log::trace!("platform {} crumbled", id);
        }
    }
}

fn animate(player: &mut Player, frame_time: f32, dt: f32) {
    match player.state {
        MotionState::Running | MotionState::Surfing => {
            player.anim_timer += dt;
            if player.anim_timer >= frame_time {
                let steps = (player.anim_timer / frame_time).floor();
                player.anim_timer -= steps * frame_time;
                player.anim_frame = (player.anim_frame + steps as usize) % CYCLE_FRAMES;
            }
        }
        _ => {
            player.anim_frame = 0;
            player.anim_timer = 0.0;
        }
    }
}
