//! Point-mass integration for the two combatants.

use crate::entities::{ActionState, Entity, ARENA_WIDTH, GROUND_Y, WALL_MARGIN};

pub const GRAVITY: f32 = 0.9;
pub const WALK_SPEED: f32 = 9.0;
/// Upward impulse of a grounded jump (negative is up).
pub const JUMP_FORCE: f32 = -18.0;

/// Apply gravity and velocity, then settle on the ground and between the walls.
pub fn integrate(entity: &mut Entity) {
    entity.vy += GRAVITY;
    entity.x += entity.vx;
    entity.y += entity.vy;

    if entity.y >= GROUND_Y {
        entity.y = GROUND_Y;
        entity.vy = 0.0;
        entity.is_grounded = true;
        entity.jump_count = 0;
        if matches!(entity.state, ActionState::Jump | ActionState::AirSlash) {
            entity.enter(ActionState::Idle);
        }
    } else {
        entity.is_grounded = false;
    }

    entity.x = clamp_to_arena(entity.x);
}

pub fn clamp_to_arena(x: f32) -> f32 {
    x.clamp(WALL_MARGIN, ARENA_WIDTH - WALL_MARGIN)
}
