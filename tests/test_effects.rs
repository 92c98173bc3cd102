use ink_duel::effects::*;
use ink_duel::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn projectile(x: f32, vx: f32, life: u32) -> Projectile {
    Projectile {
        owner: Side::Player,
        x,
        y: 400.0,
        vx,
        vy: 0.0,
        width: PROJECTILE_SIZE,
        height: PROJECTILE_SIZE,
        damage: PROJECTILE_DAMAGE,
        life,
        hit: false,
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_leaves_at_right_wall() {
    let mut projectiles = vec![projectile(900.0, 15.0, 100)];
    let mut particles = Vec::new();
    for _ in 0..3 {
        advance_projectiles(&mut projectiles, &mut particles);
    }
    assert_eq!(projectiles.len(), 1);
    assert_eq!(projectiles[0].x, 945.0);
    advance_projectiles(&mut projectiles, &mut particles);
    assert!(projectiles.is_empty());
}

#[test]
fn projectile_leaves_at_left_wall() {
    let mut projectiles = vec![projectile(20.0, -15.0, 100)];
    let mut particles = Vec::new();
    advance_projectiles(&mut projectiles, &mut particles);
    assert_eq!(projectiles.len(), 1);
    advance_projectiles(&mut projectiles, &mut particles);
    assert!(projectiles.is_empty());
}

#[test]
fn projectile_life_runs_out() {
    let mut projectiles = vec![projectile(480.0, 0.0, 3)];
    let mut particles = Vec::new();
    advance_projectiles(&mut projectiles, &mut particles);
    advance_projectiles(&mut projectiles, &mut particles);
    assert_eq!(projectiles[0].life, 1);
    advance_projectiles(&mut projectiles, &mut particles);
    assert!(projectiles.is_empty());
}

#[test]
fn spent_projectile_is_culled() {
    let mut p = projectile(480.0, 15.0, 100);
    p.hit = true;
    let mut projectiles = vec![p];
    let mut particles = Vec::new();
    advance_projectiles(&mut projectiles, &mut particles);
    assert!(projectiles.is_empty());
}

#[test]
fn projectile_drops_ink_every_other_frame() {
    let mut projectiles = vec![projectile(100.0, 15.0, 100)];
    let mut particles = Vec::new();
    advance_projectiles(&mut projectiles, &mut particles);
    assert!(particles.is_empty());
    advance_projectiles(&mut projectiles, &mut particles);
    assert_eq!(particles.len(), 1);
    assert_eq!(particles[0].kind, ParticleKind::Ink);
}

#[test]
fn spawn_in_front_of_caster() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    let caster = Entity::new(Side::Enemy, 600.0, Facing::Left, BASE_MAX_HP);
    let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
    fx.spawn_projectile(&caster);

    let p = &projectiles[0];
    assert_eq!(p.owner, Side::Enemy);
    assert_eq!(p.x, 560.0);
    assert_eq!(p.y, caster.mid_y());
    assert_eq!(p.vx, -PROJECTILE_SPEED);
    assert_eq!(p.life, PROJECTILE_LIFE);
    assert!(!p.hit);
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[test]
fn burst_sizes() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        fx.burst(Burst::InkHit, 300.0, 400.0);
    }
    assert_eq!(particles.len(), 17);
    particles.clear();
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        fx.burst(Burst::Spark, 300.0, 400.0);
    }
    assert_eq!(particles.len(), 8);
    assert!(particles.iter().all(|p| p.kind == ParticleKind::Spark));
    particles.clear();
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        fx.burst(Burst::Mist, 300.0, 400.0);
    }
    assert_eq!(particles.len(), 5);
}

#[test]
fn particles_expire_after_their_life() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut projectiles = Vec::new();
    let mut particles = Vec::new();
    {
        let mut fx = Emitter::new(&mut projectiles, &mut particles, &mut rng);
        fx.float_text(100.0, 100.0, "+MP".to_string(), ParticleColor::Azure, 40);
    }
    for _ in 0..39 {
        advance_particles(&mut particles);
    }
    assert_eq!(particles.len(), 1);
    assert_eq!(particles[0].y, 100.0 - 39.0);
    advance_particles(&mut particles);
    assert!(particles.is_empty());
}

#[test]
fn ink_falls() {
    let mut particles = vec![Particle {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
        life: 10,
        max_life: 10,
        size: 4.0,
        kind: ParticleKind::Ink,
        color: ParticleColor::Black,
        text: None,
    }];
    advance_particles(&mut particles);
    assert!(particles[0].vy > 0.0);
}
