/// Read-only view of a frame, handed to the renderer after each update.

use crate::animation::{self, Variant};
use crate::config::GameConfig;
use crate::entities::{
    EntityKind, GameState, GameStatus, GroundSegment, MotionState, PowerUpKind, Rect,
};
use crate::player;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub bounds: Rect,
    pub state: MotionState,
    pub crashed: bool,
    pub variant: Variant,
    pub texture: &'static str,
    pub health: u32,
    pub max_health: u32,
    pub score: u32,
    pub flight_remaining: f32,
    pub immunity_remaining: f32,
    pub multiplier_remaining: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub bounds: Rect,
    pub broken: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
    pub ground: Vec<GroundSegment>,
    /// World x of the left screen edge.
    pub camera_x: f32,
    pub elapsed: f32,
    pub speed: f32,
    pub status: GameStatus,
}

pub fn snapshot(state: &GameState, config: &GameConfig) -> Snapshot {
    let p = &state.player;
    let variant = Variant::from_power_ups(&p.power_ups);

    Snapshot {
        player: PlayerView {
            bounds: p.bounds(),
            state: p.state,
            crashed: p.crashed,
            variant,
            texture: animation::texture_key(p.state, variant, p.anim_frame),
            health: p.health,
            max_health: p.max_health,
            score: p.score,
            flight_remaining: p.power_ups.remaining(PowerUpKind::Flight),
            immunity_remaining: p.power_ups.remaining(PowerUpKind::Immunity),
            multiplier_remaining: p.power_ups.remaining(PowerUpKind::ScoreMultiplier),
        },
        entities: state
            .world
            .iter_active()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                bounds: e.bounds,
                broken: e.broken,
            })
            .collect(),
        ground: state.world.horizon.iter().copied().collect(),
        camera_x: p.x - config.world.camera_offset,
        elapsed: state.session.elapsed,
        speed: match (state.session.status, p.state) {
            (GameStatus::GameOver, _) | (_, MotionState::Idling) => 0.0,
            _ => player::speed(state.session.elapsed, &config.physics),
        },
        status: state.session.status,
    }
}
