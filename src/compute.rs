//! Match controller.
//!
//! `advance_tick` is the only writer of a `MatchState`. One simulated tick is
//! the fixed pipeline below; each stage is a plain function over the state so
//! it can be exercised on its own. All randomness comes through `rng`, so a
//! seeded RNG reproduces a match exactly.

use rand::Rng;

use crate::ai;
use crate::combat;
use crate::commands::CommandSet;
use crate::config::MatchConfig;
use crate::effects::{self, Emitter};
use crate::entities::{
    ActionState, Difficulty, Entity, Facing, MatchState, Side, ARENA_WIDTH, BASE_MAX_HP,
};
use crate::physics;
use crate::state_machine::{self, Driver};

pub const TICKS_PER_SECOND: u32 = 60;

const PLAYER_START_X: f32 = 200.0;
const ENEMY_START_X: f32 = ARENA_WIDTH - 200.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state for `difficulty`.
pub fn init_state(difficulty: Difficulty, config: &MatchConfig) -> MatchState {
    let profile = difficulty.profile();

    let mut player = Entity::new(
        Side::Player,
        PLAYER_START_X,
        Facing::Right,
        BASE_MAX_HP,
    );
    player.heal_potions = profile.potions;

    let mut enemy = Entity::new(
        Side::Enemy,
        ENEMY_START_X,
        Facing::Left,
        BASE_MAX_HP * profile.hp_mod,
    );
    enemy.scarf = profile.color;

    MatchState {
        player,
        enemy,
        projectiles: Vec::new(),
        particles: Vec::new(),
        difficulty,
        clock_ticks: config.match_seconds * TICKS_PER_SECOND,
        camera_shake: 0,
        game_speed: 1.0,
        speed_carry: 0.0,
        resume_speed: None,
        finish_ticks: 0,
        config: config.clone(),
    }
}

// ── Per-frame advance ────────────────────────────────────────────────────────

/// Advance the match by one frame of the external 60 Hz cadence.
///
/// At full speed this is exactly one simulated tick. In slow motion ticks are
/// owed fractionally and run once a whole tick has accumulated. At speed 0
/// nothing changes at all.
pub fn advance_tick<R: Rng>(state: &mut MatchState, commands: &CommandSet, rng: &mut R) {
    if state.game_speed <= 0.0 {
        return;
    }
    state.speed_carry += state.game_speed;
    while state.speed_carry >= 1.0 && state.game_speed > 0.0 {
        state.speed_carry -= 1.0;
        run_pipeline(state, commands, rng);
    }
}

/// Value-returning form of `advance_tick`; the input snapshot is untouched.
pub fn tick<R: Rng>(state: &MatchState, commands: &CommandSet, rng: &mut R) -> MatchState {
    let mut next = state.clone();
    advance_tick(&mut next, commands, rng);
    next
}

/// One full simulated tick, in order.
pub fn run_pipeline<R: Rng>(state: &mut MatchState, commands: &CommandSet, rng: &mut R) {
    step_player(state, commands, rng);
    step_enemy(state, rng);
    integrate_bodies(state);
    resolve_combat(state, rng);
    advance_effects(state);
    settle_match(state);
}

// ── Pipeline stages ──────────────────────────────────────────────────────────

pub fn step_player<R: Rng>(state: &mut MatchState, commands: &CommandSet, rng: &mut R) {
    let MatchState {
        player,
        projectiles,
        particles,
        ..
    } = state;
    let mut fx = Emitter::new(projectiles, particles, rng);
    state_machine::update_entity(player, Driver::Commands(commands), &mut fx);
}

/// AI decision, then the enemy's own state-machine step. The AI sees the
/// player as already updated this tick.
pub fn step_enemy<R: Rng>(state: &mut MatchState, rng: &mut R) {
    let MatchState {
        player,
        enemy,
        projectiles,
        particles,
        difficulty,
        ..
    } = state;
    let mut fx = Emitter::new(projectiles, particles, rng);
    let decision = ai::drive(enemy, player, *difficulty, &mut fx);
    if decision != ai::Decision::Wait {
        tracing::trace!(?decision, "enemy decision");
    }
    state_machine::update_entity(enemy, Driver::Policy, &mut fx);
}

pub fn integrate_bodies(state: &mut MatchState) {
    physics::integrate(&mut state.player);
    physics::integrate(&mut state.enemy);
}

pub fn resolve_combat<R: Rng>(state: &mut MatchState, rng: &mut R) {
    if state.is_over() {
        return;
    }
    let hits = combat::detect_hits(state);
    let MatchState {
        player,
        enemy,
        projectiles,
        particles,
        camera_shake,
        ..
    } = state;
    let mut fx = Emitter::new(projectiles, particles, rng);
    for hit in &hits {
        let target = match hit.target {
            Side::Player => &mut *player,
            Side::Enemy => &mut *enemy,
        };
        combat::apply_hit(hit, target, camera_shake, &mut fx);
    }
}

pub fn advance_effects(state: &mut MatchState) {
    effects::advance_projectiles(&mut state.projectiles, &mut state.particles);
    effects::advance_particles(&mut state.particles);
}

/// Camera shake, clock, KOs, and the post-KO freeze.
pub fn settle_match(state: &mut MatchState) {
    state.camera_shake = state.camera_shake.saturating_sub(1);

    if !state.is_over() {
        state.clock_ticks = state.clock_ticks.saturating_sub(1);
        if state.clock_ticks == 0 {
            resolve_time_over(state);
        }
    }

    check_knockouts(state);

    if state.is_over() {
        state.finish_ticks += 1;
        if state.finish_ticks >= state.config.ko_linger_ticks {
            state.game_speed = 0.0;
            state.speed_carry = 0.0;
        }
    }
}

/// The side with more HP wins; the player keeps a tie.
fn resolve_time_over(state: &mut MatchState) {
    let loser = if state.player.hp >= state.enemy.hp {
        Side::Enemy
    } else {
        Side::Player
    };
    tracing::debug!(
        player_hp = state.player.hp,
        enemy_hp = state.enemy.hp,
        ?loser,
        "time over"
    );
    let entity = state.entity_mut(loser);
    entity.hp = 0.0;
    knock_out(state, loser);
}

/// A double KO goes against the player.
fn check_knockouts(state: &mut MatchState) {
    if state.is_over() {
        return;
    }
    if state.player.hp <= 0.0 {
        knock_out(state, Side::Player);
    } else if state.enemy.hp <= 0.0 {
        knock_out(state, Side::Enemy);
    }
}

fn knock_out(state: &mut MatchState, side: Side) {
    let slow_motion = match side {
        Side::Player => state.config.player_ko_slow_motion,
        Side::Enemy => state.config.enemy_ko_slow_motion,
    };
    let entity = state.entity_mut(side);
    entity.force(ActionState::Dead);
    entity.vx = 0.0;
    entity.is_blocking = false;

    // exactly one side goes down
    let survivor = state.entity_mut(side.opponent());
    if survivor.hp <= 0.0 {
        survivor.hp = 1.0;
    }

    state.game_speed = slow_motion;
    tracing::debug!(?side, slow_motion, "knockout");
}

// ── Pause ────────────────────────────────────────────────────────────────────

/// Freeze the match, remembering the current speed.
pub fn pause(state: &mut MatchState) {
    if state.resume_speed.is_some() || state.game_speed <= 0.0 {
        return;
    }
    state.resume_speed = Some(state.game_speed);
    state.game_speed = 0.0;
}

/// Undo `pause`. A match frozen by its finish stays frozen.
pub fn resume(state: &mut MatchState) {
    if let Some(speed) = state.resume_speed.take() {
        state.game_speed = speed;
    }
}
