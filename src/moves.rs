//! One row of data per action state.
//!
//! This table is the single source for hit windows, damage, reach, drag and
//! expiry. The state machine, the combat resolver and the tests all read it.

use crate::entities::ActionState;

/// An attacking state's hitbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub damage: f32,
    /// First active frame (inclusive).
    pub start: u32,
    /// Last active frame (inclusive).
    pub end: u32,
    /// Horizontal reach, strict.
    pub range: f32,
    /// Vertical reach, strict.
    pub y_range: f32,
    /// Hits behind the attacker as well as in front.
    pub omnidirectional: bool,
}

impl Hitbox {
    pub fn is_active(&self, state_timer: u32) -> bool {
        (self.start..=self.end).contains(&state_timer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSpec {
    pub hitbox: Option<Hitbox>,
    /// Per-tick horizontal velocity multiplier, applied while the state lasts.
    pub drag: Option<f32>,
    /// Ticks after which drag starts to apply.
    pub drag_after: u32,
    /// The state ends once `state_timer` exceeds this.
    pub expires_after: Option<u32>,
    /// Where the state goes when it expires.
    pub next: ActionState,
    /// Movement, attack, jump and block input is refused.
    pub busy: bool,
    /// The ink wave may cancel out of this state.
    pub skill_cancellable: bool,
}

const fn hitbox(damage: f32, start: u32, end: u32, range: f32, y_range: f32) -> Hitbox {
    Hitbox {
        damage,
        start,
        end,
        range,
        y_range,
        omnidirectional: false,
    }
}

const NEUTRAL: MoveSpec = MoveSpec {
    hitbox: None,
    drag: None,
    drag_after: 0,
    expires_after: None,
    next: ActionState::Idle,
    busy: false,
    skill_cancellable: false,
};

const LIGHT_ATTACK_RECOVERY: u32 = 18;

/// The table row for `state`.
pub fn spec(state: ActionState) -> MoveSpec {
    use ActionState::*;
    match state {
        Idle | Run => MoveSpec {
            skill_cancellable: true,
            ..NEUTRAL
        },
        Block => MoveSpec {
            skill_cancellable: true,
            ..NEUTRAL
        },
        Jump | Dead => NEUTRAL,
        Hit => MoveSpec {
            expires_after: Some(20),
            ..NEUTRAL
        },
        Attack1 | Attack2 => MoveSpec {
            hitbox: Some(hitbox(30.0, 5, 15, 80.0, 50.0)),
            drag: Some(0.8),
            expires_after: Some(LIGHT_ATTACK_RECOVERY),
            busy: true,
            skill_cancellable: true,
            ..NEUTRAL
        },
        Attack3 => MoveSpec {
            hitbox: Some(hitbox(50.0, 8, 15, 120.0, 50.0)),
            drag: Some(0.8),
            expires_after: Some(LIGHT_ATTACK_RECOVERY),
            busy: true,
            skill_cancellable: true,
            ..NEUTRAL
        },
        SkillUppercut => MoveSpec {
            hitbox: Some(hitbox(70.0, 2, 15, 80.0, 100.0)),
            drag: Some(0.8),
            expires_after: Some(LIGHT_ATTACK_RECOVERY),
            busy: true,
            ..NEUTRAL
        },
        SkillProjectile => MoveSpec {
            drag: Some(0.8),
            expires_after: Some(20),
            busy: true,
            ..NEUTRAL
        },
        SkillOmniSlash => MoveSpec {
            hitbox: Some(Hitbox {
                omnidirectional: true,
                ..hitbox(15.0, 5, 30, 150.0, 60.0)
            }),
            drag: Some(0.6),
            drag_after: OMNI_SLASH_BURST_FRAMES,
            expires_after: Some(35),
            busy: true,
            ..NEUTRAL
        },
        Dash => MoveSpec {
            drag: Some(0.7),
            drag_after: 11,
            expires_after: Some(15),
            busy: true,
            ..NEUTRAL
        },
        AirSlash => MoveSpec {
            hitbox: Some(hitbox(40.0, 5, 15, 80.0, 80.0)),
            expires_after: Some(20),
            next: Jump,
            busy: true,
            ..NEUTRAL
        },
        // Ends on landing rather than on a timer.
        AirDive => MoveSpec {
            hitbox: Some(hitbox(60.0, 2, 30, 80.0, 80.0)),
            busy: true,
            ..NEUTRAL
        },
    }
}

/// Frames of full-speed lunge at the start of the omni slash.
pub const OMNI_SLASH_BURST_FRAMES: u32 = 5;

/// Frame of the ink wave on which the projectile leaves the brush.
pub const PROJECTILE_SPAWN_FRAME: u32 = 10;

pub fn is_busy(state: ActionState) -> bool {
    spec(state).busy
}
