use ink_duel::combat::*;
use ink_duel::compute::init_state;
use ink_duel::config::MatchConfig;
use ink_duel::effects::{Emitter, PROJECTILE_DAMAGE, PROJECTILE_LIFE, PROJECTILE_SIZE};
use ink_duel::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn attacker(state: ActionState, timer: u32) -> Entity {
    let mut e = Entity::new(Side::Player, 400.0, Facing::Right, BASE_MAX_HP);
    e.state = state;
    e.state_timer = timer;
    e
}

fn target_at(x: f32) -> Entity {
    Entity::new(Side::Enemy, x, Facing::Left, BASE_MAX_HP)
}

fn ink_wave_at(target: &Entity) -> Projectile {
    Projectile {
        owner: Side::Player,
        x: target.x + 10.0,
        y: target.mid_y(),
        vx: 15.0,
        vy: 0.0,
        width: PROJECTILE_SIZE,
        height: PROJECTILE_SIZE,
        damage: PROJECTILE_DAMAGE,
        life: PROJECTILE_LIFE,
        hit: false,
    }
}

// ── Detection ─────────────────────────────────────────────────────────────────

#[test]
fn melee_lands_inside_window() {
    let a = attacker(ActionState::Attack1, 5);
    let hit = melee_hit(&a, &target_at(460.0)).unwrap();
    assert_eq!(hit.target, Side::Enemy);
    assert_eq!(hit.damage, 30.0);
    assert_eq!(hit.source, HitSource::Melee(ActionState::Attack1));
}

#[test]
fn melee_misses_outside_window() {
    assert!(melee_hit(&attacker(ActionState::Attack1, 4), &target_at(460.0)).is_none());
    assert!(melee_hit(&attacker(ActionState::Attack1, 16), &target_at(460.0)).is_none());
    assert!(melee_hit(&attacker(ActionState::Attack3, 7), &target_at(460.0)).is_none());
}

#[test]
fn melee_range_is_strict() {
    let a = attacker(ActionState::Attack1, 10);
    assert!(melee_hit(&a, &target_at(480.0)).is_none());
    assert!(melee_hit(&a, &target_at(479.0)).is_some());
}

#[test]
fn melee_needs_facing_unless_omnidirectional() {
    let behind = target_at(340.0);
    assert!(melee_hit(&attacker(ActionState::Attack1, 10), &behind).is_none());
    let hit = melee_hit(&attacker(ActionState::SkillOmniSlash, 10), &behind).unwrap();
    assert_eq!(hit.damage, 15.0);
}

#[test]
fn vertical_reach_is_checked() {
    let mut high = target_at(450.0);
    high.y = GROUND_Y - 60.0;
    assert!(melee_hit(&attacker(ActionState::Attack1, 10), &high).is_none());
    assert!(melee_hit(&attacker(ActionState::SkillUppercut, 10), &high).is_some());
}

#[test]
fn invulnerable_and_dead_targets_are_skipped() {
    let a = attacker(ActionState::Attack3, 10);
    let mut t = target_at(450.0);
    t.grant_invulnerability(5);
    assert!(melee_hit(&a, &t).is_none());

    let mut t = target_at(450.0);
    t.force(ActionState::Dead);
    assert!(melee_hit(&a, &t).is_none());
}

#[test]
fn projectile_connects_once() {
    let t = target_at(500.0);
    let mut p = ink_wave_at(&t);
    let hit = projectile_hit(&mut p, &t).unwrap();
    assert_eq!(hit.source, HitSource::Projectile);
    assert_eq!(hit.damage, 60.0);
    assert!(p.hit);
    assert!(projectile_hit(&mut p, &t).is_none());
}

#[test]
fn projectile_ignores_its_owner() {
    let mut own = target_at(500.0);
    own.side = Side::Player;
    let mut p = ink_wave_at(&own);
    assert!(projectile_hit(&mut p, &own).is_none());
    assert!(!p.hit);
}

#[test]
fn detect_hits_lists_player_melee_first() {
    let mut state = init_state(Difficulty::Medium, &MatchConfig::default());
    state.player.x = 400.0;
    state.player.state = ActionState::Attack1;
    state.player.state_timer = 10;
    state.enemy.x = 450.0;
    state.enemy.state = ActionState::Attack3;
    state.enemy.state_timer = 10;
    let p = ink_wave_at(&state.enemy);
    state.projectiles.push(p);

    let hits = detect_hits(&mut state);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].target, Side::Enemy);
    assert_eq!(hits[0].source, HitSource::Melee(ActionState::Attack1));
    assert_eq!(hits[1].target, Side::Player);
    assert_eq!(hits[1].damage, 50.0);
    assert_eq!(hits[2].source, HitSource::Projectile);
    assert!(state.projectiles[0].hit);
}

// ── Application ───────────────────────────────────────────────────────────────

#[test]
fn clean_hit_staggers() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    let mut shake = 0;
    let mut t = target_at(450.0);
    t.state = ActionState::Run;
    let hit = Hit {
        target: Side::Enemy,
        damage: 30.0,
        source: HitSource::Melee(ActionState::Attack1),
    };
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        apply_hit(&hit, &mut t, &mut shake, &mut fx);
    }
    assert_eq!(t.hp, 970.0);
    assert_eq!(t.state, ActionState::Hit);
    assert_eq!(t.state_timer, 0);
    assert_eq!(t.vx, KNOCKBACK_SPEED);
    assert!(t.is_invulnerable);
    assert_eq!(t.invulnerable_timer, HIT_STUN_INVULNERABLE_FRAMES);
    assert_eq!(shake, CAMERA_SHAKE_FRAMES);
    assert!(!particles.is_empty());
}

#[test]
fn guarded_hit_chips_and_refunds() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    let mut shake = 0;
    let mut t = target_at(450.0);
    t.state = ActionState::Block;
    t.is_blocking = true;
    t.mp = 50.0;
    let hit = Hit {
        target: Side::Enemy,
        damage: 50.0,
        source: HitSource::Melee(ActionState::Attack3),
    };
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        apply_hit(&hit, &mut t, &mut shake, &mut fx);
    }
    assert_eq!(t.hp, 995.0);
    assert_eq!(t.mp, 60.0);
    assert_eq!(t.state, ActionState::Block);
    assert!(!t.is_invulnerable);
    assert_eq!(shake, 0);
    assert!(particles.iter().any(|p| p.text.as_deref() == Some("+MP")));
}

#[test]
fn empty_guard_takes_full_damage() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    let mut shake = 0;
    let mut t = target_at(450.0);
    t.state = ActionState::Block;
    t.is_blocking = true;
    t.mp = 0.0;
    let hit = Hit {
        target: Side::Enemy,
        damage: 60.0,
        source: HitSource::Projectile,
    };
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        apply_hit(&hit, &mut t, &mut shake, &mut fx);
    }
    assert_eq!(t.hp, 940.0);
    assert_eq!(t.state, ActionState::Hit);
    assert!(!t.is_blocking);
}

#[test]
fn damage_never_drops_hp_below_zero() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    let mut shake = 0;
    let mut t = target_at(450.0);
    t.hp = 10.0;
    let hit = Hit {
        target: Side::Enemy,
        damage: 70.0,
        source: HitSource::Melee(ActionState::SkillUppercut),
    };
    let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
    apply_hit(&hit, &mut t, &mut shake, &mut fx);
    assert_eq!(t.hp, 0.0);
}
