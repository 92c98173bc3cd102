use ink_duel::entities::*;
use ink_duel::physics::*;

fn fighter() -> Entity {
    Entity::new(Side::Enemy, 480.0, Facing::Left, BASE_MAX_HP)
}

#[test]
fn gravity_pulls_airborne_body() {
    let mut e = fighter();
    e.y = 300.0;
    e.vy = 0.0;
    integrate(&mut e);
    assert_eq!(e.vy, GRAVITY);
    assert_eq!(e.y, 300.0 + GRAVITY);
    assert!(!e.is_grounded);
}

#[test]
fn landing_settles_and_resets_jumps() {
    let mut e = fighter();
    e.state = ActionState::Jump;
    e.is_grounded = false;
    e.jump_count = 2;
    e.y = 449.0;
    e.vy = 5.0;
    integrate(&mut e);
    assert_eq!(e.y, GROUND_Y);
    assert_eq!(e.vy, 0.0);
    assert!(e.is_grounded);
    assert_eq!(e.jump_count, 0);
    assert_eq!(e.state, ActionState::Idle);
}

#[test]
fn air_slash_lands_into_idle() {
    let mut e = fighter();
    e.state = ActionState::AirSlash;
    e.state_timer = 7;
    e.y = 440.0;
    e.vy = 12.0;
    integrate(&mut e);
    assert_eq!(e.state, ActionState::Idle);
    assert_eq!(e.state_timer, 0);
}

#[test]
fn air_dive_is_left_to_the_state_machine() {
    let mut e = fighter();
    e.state = ActionState::AirDive;
    e.y = 440.0;
    e.vy = 20.0;
    integrate(&mut e);
    assert!(e.is_grounded);
    assert_eq!(e.state, ActionState::AirDive);
}

#[test]
fn standing_body_stays_on_ground() {
    let mut e = fighter();
    for _ in 0..10 {
        integrate(&mut e);
    }
    assert_eq!(e.y, GROUND_Y);
    assert!(e.is_grounded);
}

#[test]
fn walls_clamp_horizontal_position() {
    let mut e = fighter();
    e.x = 930.0;
    e.vx = 28.0;
    integrate(&mut e);
    assert_eq!(e.x, ARENA_WIDTH - WALL_MARGIN);

    e.x = 25.0;
    e.vx = -28.0;
    integrate(&mut e);
    assert_eq!(e.x, WALL_MARGIN);
}

#[test]
fn clamp_to_arena_bounds() {
    assert_eq!(clamp_to_arena(-50.0), 20.0);
    assert_eq!(clamp_to_arena(480.0), 480.0);
    assert_eq!(clamp_to_arena(2000.0), 940.0);
}
