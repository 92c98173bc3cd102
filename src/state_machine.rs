//! Per-combatant action state machine.
//!
//! `update_entity` runs once per tick per combatant. Bookkeeping (timers, MP,
//! healing) always happens; then the priority rules run in order and the
//! first one that fires ends input processing for the tick. Per-state motion
//! and expiry run last, even for busy states.

use rand::Rng;

use crate::commands::{Command, CommandSet};
use crate::effects::{Burst, Emitter};
use crate::entities::{ActionState, Entity, Facing, ParticleColor, TrailPoint, TRAIL_LEN};
use crate::moves::{self, OMNI_SLASH_BURST_FRAMES, PROJECTILE_SPAWN_FRAME};
use crate::physics::{JUMP_FORCE, WALK_SPEED};

// ── Costs & tuning ────────────────────────────────────────────────────────────

pub const MP_REGEN: f32 = 10.0 / 60.0;
pub const BLOCK_MP_DRAIN: f32 = 5.0 / 60.0;
/// Minimum MP needed to raise a guard (strictly more than this).
pub const BLOCK_MIN_MP: f32 = 5.0;

pub const DASH_COST: f32 = 5.0;
pub const DASH_SPEED: f32 = 28.0;
pub const DASH_INVULNERABLE_FRAMES: u32 = 15;

pub const PROJECTILE_COST: f32 = 10.0;
pub const UPPERCUT_COST: f32 = 15.0;
pub const OMNI_SLASH_COST: f32 = 20.0;

const OMNI_SLASH_LUNGE: f32 = 15.0;
const OMNI_SLASH_BURST_SPEED: f32 = 20.0;
/// Open (exclusive) window on the ink wave's timer for chaining the omni slash.
const OMNI_CHAIN_WINDOW: (u32, u32) = (2, 25);

const DOUBLE_JUMP_SCALE: f32 = 0.9;
const UPPERCUT_JUMP_SCALE: f32 = 1.2;
pub const MAX_JUMPS: u8 = 2;
const AIR_DIVE_SPEED: f32 = 20.0;
const AIR_SLASH_STALL: f32 = -3.0;

/// A combo step needs the previous attack to be older than this.
pub const COMBO_MIN_FRAMES: u32 = 8;
const COMBO_LUNGE: [f32; 3] = [2.0, 5.0, 10.0];

pub const HEAL_COOLDOWN_FRAMES: u32 = 15 * 60;
/// (heal tick, fraction of max HP)
const HEAL_STAGES: [(u32, f32); 3] = [(1, 0.15), (30, 0.07), (60, 0.03)];
const HEAL_DURATION: u32 = 70;

// ── Driver ────────────────────────────────────────────────────────────────────

/// Who decides this combatant's actions.
#[derive(Clone, Copy, Debug)]
pub enum Driver<'a> {
    /// A human command set, run through every priority rule.
    Commands(&'a CommandSet),
    /// The AI controller already acted on the entity this tick; only the
    /// bookkeeping, the idle ground stop and per-state motion run.
    Policy,
}

/// Decoded view of a command set.
#[derive(Clone, Copy, Debug, Default)]
struct Intent {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    attack: bool,
    heal: bool,
    dash: Option<Facing>,
}

impl Intent {
    fn from_commands(commands: &CommandSet) -> Self {
        let dash = if commands.contains(Command::DashLeft) {
            Some(Facing::Left)
        } else if commands.contains(Command::DashRight) {
            Some(Facing::Right)
        } else {
            None
        };
        Intent {
            left: commands.contains(Command::Left),
            right: commands.contains(Command::Right),
            up: commands.contains(Command::Up),
            down: commands.contains(Command::Down),
            attack: commands.contains(Command::Attack),
            heal: commands.contains(Command::Heal),
            dash,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Advance one combatant by one tick.
pub fn update_entity<R: Rng>(entity: &mut Entity, driver: Driver<'_>, fx: &mut Emitter<'_, R>) {
    if entity.is_dead() {
        return;
    }

    entity.state_timer += 1;
    tick_timers(entity);
    tick_mp(entity);
    if entity.heal_active {
        tick_heal(entity, fx);
    }

    if entity.state == ActionState::Hit {
        if let Some(limit) = moves::spec(ActionState::Hit).expires_after {
            if entity.state_timer > limit {
                entity.enter(ActionState::Idle);
            }
        }
        return;
    }

    record_trail(entity);

    if let Driver::Commands(commands) = driver {
        let intent = Intent::from_commands(commands);
        if try_omni_chain(entity, &intent, fx) || try_skill_cancel(entity, &intent) {
            return;
        }
        handle_input(entity, &intent, fx);
    } else if entity.is_grounded && entity.state == ActionState::Idle {
        // No move command: an idle body on the ground stands still.
        entity.vx = 0.0;
    }

    update_action_physics(entity, fx);
}

// ── Bookkeeping ───────────────────────────────────────────────────────────────

fn tick_timers(entity: &mut Entity) {
    entity.heal_cooldown = entity.heal_cooldown.saturating_sub(1);
    if entity.invulnerable_timer > 0 {
        entity.invulnerable_timer -= 1;
    }
    if entity.invulnerable_timer == 0 {
        entity.is_invulnerable = false;
    }
}

fn tick_mp(entity: &mut Entity) {
    if entity.state == ActionState::Block {
        entity.mp -= BLOCK_MP_DRAIN;
        entity.clamp_pools();
        if entity.mp <= 0.0 {
            tracing::debug!(side = ?entity.side, "guard break");
            entity.enter(ActionState::Idle);
        }
    } else {
        entity.gain_mp(MP_REGEN);
    }
}

fn tick_heal<R: Rng>(entity: &mut Entity, fx: &mut Emitter<'_, R>) {
    entity.heal_timer += 1;
    if let Some(&(_, fraction)) = HEAL_STAGES
        .iter()
        .find(|(at, _)| *at == entity.heal_timer)
    {
        let amount = entity.max_hp * fraction;
        entity.restore_hp(amount);
        fx.float_text(
            entity.x,
            entity.y - entity.height,
            format!("+{}", amount.floor() as i64),
            ParticleColor::Jade,
            60,
        );
    }
    if entity.heal_timer > HEAL_DURATION {
        entity.heal_active = false;
        entity.heal_timer = 0;
    }
}

fn record_trail(entity: &mut Entity) {
    let streaking = matches!(
        entity.state,
        ActionState::Dash | ActionState::SkillOmniSlash
    );
    if entity.state_timer % 5 == 0 || streaking {
        entity.trail.push(TrailPoint {
            x: entity.x,
            y: entity.y,
            state: entity.state,
        });
        if entity.trail.len() > TRAIL_LEN {
            entity.trail.remove(0);
        }
    }
}

// ── Priority rules ────────────────────────────────────────────────────────────

/// Ink wave → omni slash chain.
fn try_omni_chain<R: Rng>(entity: &mut Entity, intent: &Intent, fx: &mut Emitter<'_, R>) -> bool {
    let (open, close) = OMNI_CHAIN_WINDOW;
    if entity.state != ActionState::SkillProjectile
        || entity.state_timer <= open
        || entity.state_timer >= close
        || !(intent.attack && intent.down)
        || !entity.spend_mp(OMNI_SLASH_COST)
    {
        return false;
    }
    tracing::trace!(side = ?entity.side, "omni slash");
    entity.enter(ActionState::SkillOmniSlash);
    entity.vx = entity.facing.sign() * OMNI_SLASH_LUNGE;
    fx.burst(Burst::InkDash, entity.x, entity.y);
    true
}

/// Down + attack cancels neutral, guard and light attacks into the ink wave.
fn try_skill_cancel(entity: &mut Entity, intent: &Intent) -> bool {
    if !entity.is_grounded
        || !(intent.down && intent.attack)
        || !moves::spec(entity.state).skill_cancellable
        || !entity.spend_mp(PROJECTILE_COST)
    {
        return false;
    }
    tracing::trace!(side = ?entity.side, from = ?entity.state, "ink wave");
    entity.enter(ActionState::SkillProjectile);
    entity.is_blocking = false;
    entity.vx = 0.0;
    true
}

fn handle_input<R: Rng>(entity: &mut Entity, intent: &Intent, fx: &mut Emitter<'_, R>) {
    if !intent.up {
        entity.can_jump = true;
    }
    if entity.is_grounded && intent.attack {
        try_combo_step(entity);
    }
    if moves::is_busy(entity.state) {
        return;
    }

    if let Some(dir) = intent.dash {
        if entity.spend_mp(DASH_COST) {
            entity.enter(ActionState::Dash);
            entity.facing = dir;
            entity.vx = dir.sign() * DASH_SPEED;
            entity.grant_invulnerability(DASH_INVULNERABLE_FRAMES);
            fx.burst(Burst::InkDash, entity.x, entity.y);
            return;
        }
    }

    if entity.is_grounded {
        handle_ground_input(entity, intent);
    } else {
        handle_air_input(entity, intent, fx);
    }

    if intent.heal && !entity.heal_active && entity.heal_potions > 0 && entity.heal_cooldown == 0 {
        entity.heal_potions -= 1;
        entity.heal_active = true;
        entity.heal_cooldown = HEAL_COOLDOWN_FRAMES;
    }
}

fn steer(entity: &mut Entity, intent: &Intent) -> bool {
    if intent.left {
        entity.vx = -WALK_SPEED;
        entity.facing = Facing::Left;
        true
    } else if intent.right {
        entity.vx = WALK_SPEED;
        entity.facing = Facing::Right;
        true
    } else {
        false
    }
}

fn handle_air_input<R: Rng>(entity: &mut Entity, intent: &Intent, fx: &mut Emitter<'_, R>) {
    steer(entity, intent);

    if intent.up && entity.can_jump && entity.jump_count < MAX_JUMPS {
        entity.vy = JUMP_FORCE * DOUBLE_JUMP_SCALE;
        entity.jump_count += 1;
        entity.can_jump = false;
        entity.enter(ActionState::Jump);
        fx.burst(Burst::Mist, entity.x, entity.y + 20.0);
    }

    if intent.down {
        entity.enter(ActionState::AirDive);
        entity.vy = AIR_DIVE_SPEED;
        entity.vx = 0.0;
    } else if intent.attack {
        entity.enter(ActionState::AirSlash);
        entity.vy = AIR_SLASH_STALL;
    }
}

fn handle_ground_input(entity: &mut Entity, intent: &Intent) {
    if steer(entity, intent) {
        if entity.state != ActionState::Block {
            entity.enter(ActionState::Run);
        }
    } else {
        entity.vx = 0.0;
        if entity.state == ActionState::Run {
            entity.enter(ActionState::Idle);
        }
    }

    if intent.up && entity.can_jump {
        entity.can_jump = false;
        entity.is_grounded = false;
        entity.jump_count = 1;
        if intent.attack && entity.spend_mp(UPPERCUT_COST) {
            tracing::trace!(side = ?entity.side, "uppercut");
            entity.enter(ActionState::SkillUppercut);
            entity.vy = JUMP_FORCE * UPPERCUT_JUMP_SCALE;
        } else {
            entity.enter(ActionState::Jump);
            entity.vy = JUMP_FORCE;
        }
        return;
    }

    if intent.down {
        if entity.mp > BLOCK_MIN_MP {
            entity.enter(ActionState::Block);
            entity.is_blocking = true;
        }
    } else if entity.state == ActionState::Block {
        entity.enter(ActionState::Idle);
    }

    if intent.attack
        && !entity.is_blocking
        && matches!(entity.state, ActionState::Idle | ActionState::Run)
    {
        entity.enter(ActionState::Attack1);
        entity.vx = entity.facing.sign() * COMBO_LUNGE[0];
    }
}

/// Light attack chain. Runs ahead of the busy gate, since the attacks it
/// continues are themselves busy.
fn try_combo_step(entity: &mut Entity) {
    if entity.state_timer <= COMBO_MIN_FRAMES {
        return;
    }
    let (next, lunge) = match entity.state {
        ActionState::Attack1 => (ActionState::Attack2, COMBO_LUNGE[1]),
        ActionState::Attack2 => (ActionState::Attack3, COMBO_LUNGE[2]),
        _ => return,
    };
    entity.enter(next);
    entity.vx = entity.facing.sign() * lunge;
}

// ── Per-state motion & expiry ─────────────────────────────────────────────────

fn update_action_physics<R: Rng>(entity: &mut Entity, fx: &mut Emitter<'_, R>) {
    let spec = moves::spec(entity.state);

    match entity.state {
        ActionState::SkillOmniSlash if entity.state_timer < OMNI_SLASH_BURST_FRAMES => {
            entity.vx = entity.facing.sign() * OMNI_SLASH_BURST_SPEED;
        }
        ActionState::SkillProjectile if entity.state_timer == PROJECTILE_SPAWN_FRAME => {
            fx.spawn_projectile(entity);
        }
        ActionState::AirDive if entity.is_grounded => {
            entity.enter(ActionState::Idle);
            return;
        }
        _ => {}
    }

    if let Some(drag) = spec.drag {
        if entity.state_timer >= spec.drag_after {
            entity.vx *= drag;
        }
    }
    if let Some(limit) = spec.expires_after {
        if entity.state_timer > limit {
            entity.enter(spec.next);
        }
    }
}
