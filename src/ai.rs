//! Opponent policy.
//!
//! Evaluated once per tick, before the enemy's own state-machine step. The
//! policy acts on the entity directly (state, velocity, MP) instead of
//! producing key presses, so it can use AI-specific costs and speeds. All
//! randomness comes from the emitter's RNG; difficulty only enters through
//! `DifficultyProfile`.

use rand::Rng;

use crate::config::DifficultyProfile;
use crate::effects::{Burst, Emitter};
use crate::entities::{ActionState, Difficulty, Entity, Facing};
use crate::moves;
use crate::physics::{clamp_to_arena, JUMP_FORCE, WALK_SPEED};
use crate::state_machine::MAX_JUMPS;

/// The AI pays more for its skills than the player does.
pub const AI_MP_COST_MULT: f32 = 1.5;
pub const AI_UPPERCUT_COST: f32 = 15.0 * AI_MP_COST_MULT;
pub const AI_PROJECTILE_COST: f32 = 10.0 * AI_MP_COST_MULT;

pub const CLOSE_RANGE: f32 = 150.0;
pub const FAR_RANGE: f32 = 300.0;

const BLINK_CHANCE: f32 = 0.1;
const BLINK_OFFSET: f32 = 100.0;
const DOUBLE_JUMP_CHANCE: f32 = 0.1;
/// Target must be at least this far above before the AI double-jumps after it.
const DOUBLE_JUMP_HEIGHT: f32 = 100.0;
const GUARD_CHANCE: f32 = 0.05;
const BACK_OFF_CHANCE: f32 = 0.1;
const BACK_OFF_SPEED: f32 = 0.5;
const PROJECTILE_CHANCE: f32 = 0.1;
const HOP_CHANCE: f32 = 0.05;
const APPROACH_SPEED: f32 = 0.7;

/// What the policy settled on this tick. Returned for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Nothing this tick (stunned, busy, still reacting, or dead).
    Wait,
    Blink,
    DoubleJump,
    Uppercut,
    Guard,
    Attack,
    BackOff,
    Hold,
    Projectile,
    Approach,
    Hop,
}

/// Run the policy for `ai` against `target`.
pub fn drive<R: Rng>(
    ai: &mut Entity,
    target: &Entity,
    difficulty: Difficulty,
    fx: &mut Emitter<'_, R>,
) -> Decision {
    let profile = difficulty.profile();
    ai.can_jump = true;

    if difficulty == Difficulty::Grandmaster
        && ai.state == ActionState::Hit
        && fx.rng().gen::<f32>() < BLINK_CHANCE
    {
        ai.x = clamp_to_arena(target.x - target.facing.sign() * BLINK_OFFSET);
        ai.enter(ActionState::Idle);
        fx.burst(Burst::InkHit, ai.x, ai.y);
        tracing::trace!("grandmaster blink");
        return Decision::Blink;
    }

    if ai.is_dead() || ai.state == ActionState::Hit || moves::is_busy(ai.state) {
        return Decision::Wait;
    }

    let dx = target.x - ai.x;
    ai.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
    if ai.state_timer < profile.ai_reaction {
        return Decision::Wait;
    }

    let roll = fx.rng().gen::<f32>();
    let aggressive = roll < profile.ai_aggression;
    let use_skill = fx.rng().gen::<f32>() < profile.skill_rate;

    if try_double_jump(ai, target, roll, fx) {
        return Decision::DoubleJump;
    }

    let dist = dx.abs();
    if dist < CLOSE_RANGE {
        close_range(ai, target, aggressive, fx)
    } else if dist > FAR_RANGE {
        far_range(ai, &profile, use_skill, fx)
    } else {
        mid_range(ai, fx)
    }
}

/// Airborne only: chase a target well above with the second jump.
fn try_double_jump<R: Rng>(
    ai: &mut Entity,
    target: &Entity,
    roll: f32,
    fx: &mut Emitter<'_, R>,
) -> bool {
    let dy = target.y - ai.y;
    if ai.is_grounded
        || ai.jump_count >= MAX_JUMPS
        || dy >= -DOUBLE_JUMP_HEIGHT
        || roll >= DOUBLE_JUMP_CHANCE
    {
        return false;
    }
    ai.vy = JUMP_FORCE * 0.9;
    ai.jump_count += 1;
    ai.enter(ActionState::Jump);
    fx.burst(Burst::Mist, ai.x, ai.y + 20.0);
    true
}

fn close_range<R: Rng>(
    ai: &mut Entity,
    target: &Entity,
    aggressive: bool,
    fx: &mut Emitter<'_, R>,
) -> Decision {
    if target.state.is_light_attack() {
        if aggressive && ai.mp > AI_UPPERCUT_COST && ai.spend_mp(AI_UPPERCUT_COST) {
            ai.enter(ActionState::SkillUppercut);
            ai.vy = JUMP_FORCE * 1.2;
            ai.is_grounded = false;
            ai.jump_count = 1;
            return Decision::Uppercut;
        }
        raise_guard(ai);
        return Decision::Guard;
    }

    if aggressive {
        ai.enter(ActionState::Attack1);
        ai.vx = ai.facing.sign() * 2.0;
        return Decision::Attack;
    }

    if fx.rng().gen::<f32>() < GUARD_CHANCE {
        raise_guard(ai);
        Decision::Guard
    } else if fx.rng().gen::<f32>() < BACK_OFF_CHANCE {
        ai.enter(ActionState::Run);
        ai.vx = -ai.facing.sign() * WALK_SPEED * BACK_OFF_SPEED;
        Decision::BackOff
    } else {
        ai.enter(ActionState::Idle);
        ai.vx = 0.0;
        Decision::Hold
    }
}

fn far_range<R: Rng>(
    ai: &mut Entity,
    profile: &DifficultyProfile,
    use_skill: bool,
    fx: &mut Emitter<'_, R>,
) -> Decision {
    if profile.allow_skills
        && ai.mp > AI_PROJECTILE_COST
        && use_skill
        && fx.rng().gen::<f32>() < PROJECTILE_CHANCE
        && ai.spend_mp(AI_PROJECTILE_COST)
    {
        ai.enter(ActionState::SkillProjectile);
        ai.vx = 0.0;
        return Decision::Projectile;
    }
    ai.enter(ActionState::Run);
    ai.vx = ai.facing.sign() * WALK_SPEED;
    Decision::Approach
}

fn mid_range<R: Rng>(ai: &mut Entity, fx: &mut Emitter<'_, R>) -> Decision {
    if fx.rng().gen::<f32>() < HOP_CHANCE && ai.is_grounded {
        ai.enter(ActionState::Jump);
        ai.vy = JUMP_FORCE;
        ai.is_grounded = false;
        ai.jump_count = 1;
        return Decision::Hop;
    }
    ai.enter(ActionState::Run);
    ai.vx = ai.facing.sign() * WALK_SPEED * APPROACH_SPEED;
    Decision::Approach
}

fn raise_guard(ai: &mut Entity) {
    ai.enter(ActionState::Block);
    ai.is_blocking = true;
    ai.vx = 0.0;
}
