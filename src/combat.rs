//! Hit detection and hit application.
//!
//! Detection reads both combatants and the projectile list and only marks
//! projectiles as spent; every other change happens in `apply_hit`, after
//! all hits of the tick are known.

use rand::Rng;

use crate::effects::{Burst, Emitter};
use crate::entities::{ActionState, Entity, MatchState, ParticleColor, Projectile, Side};
use crate::moves;

/// Fraction of damage that goes through a guard.
pub const CHIP_DAMAGE_RATIO: f32 = 0.1;
pub const BLOCK_MP_REFUND: f32 = 10.0;
pub const HIT_STUN_INVULNERABLE_FRAMES: u32 = 20;
pub const KNOCKBACK_SPEED: f32 = 5.0;
pub const CAMERA_SHAKE_FRAMES: u32 = 5;

const PROJECTILE_REACH_X: f32 = 40.0;
const PROJECTILE_REACH_Y: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSource {
    Melee(ActionState),
    Projectile,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub target: Side,
    pub damage: f32,
    pub source: HitSource,
}

fn can_be_hit(target: &Entity) -> bool {
    !target.is_invulnerable && !target.is_dead()
}

fn is_facing(attacker: &Entity, target: &Entity) -> bool {
    let dir = attacker.facing.sign();
    (target.x - attacker.x) * dir > 0.0
}

/// The melee hit `attacker` lands on `target` this tick, if any.
pub fn melee_hit(attacker: &Entity, target: &Entity) -> Option<Hit> {
    if !can_be_hit(target) {
        return None;
    }
    let hitbox = moves::spec(attacker.state).hitbox?;
    if !hitbox.is_active(attacker.state_timer) {
        return None;
    }
    let dist = (attacker.x - target.x).abs();
    let y_dist = (attacker.y - target.y).abs();
    let in_reach = dist < hitbox.range && y_dist < hitbox.y_range;
    if in_reach && (hitbox.omnidirectional || is_facing(attacker, target)) {
        Some(Hit {
            target: target.side,
            damage: hitbox.damage,
            source: HitSource::Melee(attacker.state),
        })
    } else {
        None
    }
}

/// Connect `projectile` with `target` if it is in reach, marking it spent.
pub fn projectile_hit(projectile: &mut Projectile, target: &Entity) -> Option<Hit> {
    if projectile.hit || projectile.owner == target.side || !can_be_hit(target) {
        return None;
    }
    let dist = (projectile.x - target.x).abs();
    let y_dist = (projectile.y - target.mid_y()).abs();
    if dist < PROJECTILE_REACH_X && y_dist < PROJECTILE_REACH_Y {
        projectile.hit = true;
        Some(Hit {
            target: target.side,
            damage: projectile.damage,
            source: HitSource::Projectile,
        })
    } else {
        None
    }
}

/// Every hit landing this tick: melee (player first), then projectiles.
pub fn detect_hits(state: &mut MatchState) -> Vec<Hit> {
    let mut hits = Vec::new();
    hits.extend(melee_hit(&state.player, &state.enemy));
    hits.extend(melee_hit(&state.enemy, &state.player));

    let MatchState {
        player,
        enemy,
        projectiles,
        ..
    } = state;
    for projectile in projectiles.iter_mut() {
        let target = match projectile.owner {
            Side::Player => &*enemy,
            Side::Enemy => &*player,
        };
        hits.extend(projectile_hit(projectile, target));
    }
    hits
}

/// Apply one hit to its target.
pub fn apply_hit<R: Rng>(
    hit: &Hit,
    target: &mut Entity,
    camera_shake: &mut u32,
    fx: &mut Emitter<'_, R>,
) {
    if target.is_blocking && target.mp > 0.0 {
        target.take_damage(hit.damage * CHIP_DAMAGE_RATIO);
        target.gain_mp(BLOCK_MP_REFUND);
        fx.burst(Burst::Spark, target.x, target.mid_y());
        fx.float_text(
            target.x,
            target.y - target.height - 20.0,
            "+MP".to_string(),
            ParticleColor::Azure,
            40,
        );
        return;
    }

    target.take_damage(hit.damage);
    target.force(ActionState::Hit);
    target.vx = -target.facing.sign() * KNOCKBACK_SPEED;
    target.grant_invulnerability(HIT_STUN_INVULNERABLE_FRAMES);
    *camera_shake = CAMERA_SHAKE_FRAMES;
    fx.burst(Burst::InkHit, target.x, target.mid_y());
}
