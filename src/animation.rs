/// Sprite selection.  Active power-ups map to a visual variant, and the variant
/// maps through a static table to the texture keys a renderer should draw.

use crate::entities::{MotionState, PowerUpKind, PowerUps};

/// Number of frames in the run and surf cycles.
pub const CYCLE_FRAMES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Base,
    Flight,
    Shield,
    FlightShield,
}

impl Variant {
    pub fn from_power_ups(power_ups: &PowerUps) -> Self {
        let flight = power_ups.is_active(PowerUpKind::Flight);
        let shield = power_ups.is_active(PowerUpKind::Immunity);
        match (flight, shield) {
            (false, false) => Variant::Base,
            (true, false) => Variant::Flight,
            (false, true) => Variant::Shield,
            (true, true) => Variant::FlightShield,
        }
    }

    fn index(&self) -> usize {
        match self {
            Variant::Base => 0,
            Variant::Flight => 1,
            Variant::Shield => 2,
            Variant::FlightShield => 3,
        }
    }
}

pub struct AnimationSet {
    pub idle: &'static str,
    pub run: [&'static str; CYCLE_FRAMES],
    pub jump: &'static str,
    pub crash: &'static str,
    pub surf: [&'static str; CYCLE_FRAMES],
}

static ANIMATIONS: [AnimationSet; 4] = [
    AnimationSet {
        idle: "monkey_idle",
        run: ["monkey_run_1", "monkey_run_2"],
        jump: "monkey_jump",
        crash: "monkey_crash",
        surf: ["monkey_surf_1", "monkey_surf_2"],
    },
    AnimationSet {
        idle: "monkey_flight_idle",
        run: ["monkey_flight_run_1", "monkey_flight_run_2"],
        jump: "monkey_flight_jump",
        crash: "monkey_flight_crash",
        surf: ["monkey_flight_surf_1", "monkey_flight_surf_2"],
    },
    AnimationSet {
        idle: "monkey_shield_idle",
        run: ["monkey_shield_run_1", "monkey_shield_run_2"],
        jump: "monkey_shield_jump",
        crash: "monkey_shield_crash",
        surf: ["monkey_shield_surf_1", "monkey_shield_surf_2"],
    },
    AnimationSet {
        idle: "monkey_flight_shield_idle",
        run: ["monkey_flight_shield_run_1", "monkey_flight_shield_run_2"],
        jump: "monkey_flight_shield_jump",
        crash: "monkey_flight_shield_crash",
        surf: ["monkey_flight_shield_surf_1", "monkey_flight_shield_surf_2"],
    },
];

pub fn animation_set(variant: Variant) -> &'static AnimationSet {
    &ANIMATIONS[variant.index()]
}

/// Texture key for the given state and cycle frame.
pub fn texture_key(state: MotionState, variant: Variant, frame: usize) -> &'static str {
    let set = animation_set(variant);
    match state {
        MotionState::Idling => set.idle,
        MotionState::Running => set.run[frame % CYCLE_FRAMES],
        MotionState::Jumping => set.jump,
        MotionState::Crashing => set.crash,
        MotionState::Surfing => set.surf[frame % CYCLE_FRAMES],
    }
}
