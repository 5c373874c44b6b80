use super::*;
use crate::common::test_utils::{fixed_time_with_delta, run_system_once};

const DT: f32 = 1.0 / 60.0;

fn duel_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerClips::default());
    world.insert_resource(PlayerInput::default());
    world.insert_resource(fixed_time_with_delta(DT));
    world
}

fn spawn_player(world: &mut World, state: PlayerState, contacts: u32) -> Entity {
    world
        .spawn((
            Player,
            Transform::from_xyz(8.0, 5.0, 1.0),
            Health::new(20),
            Facing::Right,
            HitCooldown::default(),
            Hitbox::default(),
            StateTime::default(),
            state,
            DoubleJump { available: true },
            GroundContacts { count: contacts },
            LinearVelocity::ZERO,
            GravityScale(1.0),
        ))
        .id()
}

fn tick(world: &mut World) {
    run_system_once(world, update_player);
}

#[test]
fn ground_jump_launches_and_keeps_the_air_jump() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Grounded { walking: false }, 1);
    world.resource_mut::<PlayerInput>().jump = true;

    tick(&mut world);

    let vel = world.get::<LinearVelocity>(player).unwrap();
    assert_eq!(vel.y, 10.0);
    assert_eq!(
        *world.get::<PlayerState>(player).unwrap(),
        PlayerState::Rising {
            double_jumped: false
        }
    );
    assert!(world.get::<DoubleJump>(player).unwrap().available);
    // The edge press was consumed.
    assert!(!world.resource::<PlayerInput>().jump);
}

#[test]
fn air_jump_is_consumed_and_then_refused() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Falling, 0);

    world.resource_mut::<PlayerInput>().jump = true;
    tick(&mut world);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().y, 10.0);
    assert_eq!(
        *world.get::<PlayerState>(player).unwrap(),
        PlayerState::Rising { double_jumped: true }
    );
    assert!(!world.get::<DoubleJump>(player).unwrap().available);

    // A second air press does nothing.
    world.get_mut::<LinearVelocity>(player).unwrap().y = -2.0;
    world.resource_mut::<PlayerInput>().jump = true;
    tick(&mut world);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().y, -2.0);
}

#[test]
fn landing_restores_the_air_jump() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Falling, 1);
    world.get_mut::<DoubleJump>(player).unwrap().available = false;

    tick(&mut world);

    assert_eq!(
        *world.get::<PlayerState>(player).unwrap(),
        PlayerState::Landing
    );
    assert!(world.get::<DoubleJump>(player).unwrap().available);
}

#[test]
fn dash_locks_velocity_and_disables_gravity() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Grounded { walking: false }, 1);
    *world.get_mut::<Facing>(player).unwrap() = Facing::Left;
    world.resource_mut::<PlayerInput>().dash = true;

    tick(&mut world);

    let vel = world.get::<LinearVelocity>(player).unwrap();
    assert_eq!(vel.0, Vec2::new(-15.0, 0.0));
    assert_eq!(world.get::<GravityScale>(player).unwrap().0, 0.0);
    assert!(world.get::<PlayerState>(player).unwrap().is_dashing());
}

#[test]
fn dash_expiry_restores_gravity() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Dashing { remaining: 0.001 }, 0);
    world.get_mut::<GravityScale>(player).unwrap().0 = 0.0;

    tick(&mut world);

    assert_eq!(world.get::<GravityScale>(player).unwrap().0, 1.0);
    assert_eq!(
        *world.get::<PlayerState>(player).unwrap(),
        PlayerState::Falling
    );
}

#[test]
fn second_press_inside_the_window_upgrades_the_combo() {
    let mut world = duel_world();
    let player = spawn_player(
        &mut world,
        PlayerState::Attacking {
            kind: AttackKind::Combo1,
            combo_timer: 0.1,
            effect: EffectWindow::Spent,
        },
        1,
    );
    world.resource_mut::<PlayerInput>().attack = true;

    tick(&mut world);

    let PlayerState::Attacking { kind, .. } = *world.get::<PlayerState>(player).unwrap() else {
        panic!("expected an attack state");
    };
    assert_eq!(kind, AttackKind::Combo2);
}

#[test]
fn late_press_does_not_upgrade_the_combo() {
    let mut world = duel_world();
    let player = spawn_player(
        &mut world,
        PlayerState::Attacking {
            kind: AttackKind::Combo1,
            combo_timer: 0.35,
            effect: EffectWindow::Spent,
        },
        1,
    );
    world.resource_mut::<PlayerInput>().attack = true;

    tick(&mut world);

    let PlayerState::Attacking { kind, .. } = *world.get::<PlayerState>(player).unwrap() else {
        panic!("expected an attack state");
    };
    assert_eq!(kind, AttackKind::Combo1);
}

#[test]
fn down_attack_requires_being_airborne() {
    let mut world = duel_world();
    // Grounded: the press falls through to a normal combo opener.
    let grounded = spawn_player(&mut world, PlayerState::Grounded { walking: false }, 1);
    {
        let mut input = world.resource_mut::<PlayerInput>();
        input.attack = true;
        input.down_attack = true;
    }
    tick(&mut world);
    let PlayerState::Attacking { kind, .. } = *world.get::<PlayerState>(grounded).unwrap() else {
        panic!("expected an attack state");
    };
    assert_eq!(kind, AttackKind::Combo1);
    world.despawn(grounded);

    // Airborne: the same press starts the down attack.
    let airborne = spawn_player(&mut world, PlayerState::Falling, 0);
    {
        let mut input = world.resource_mut::<PlayerInput>();
        input.attack = true;
        input.down_attack = true;
    }
    tick(&mut world);
    let PlayerState::Attacking { kind, .. } = *world.get::<PlayerState>(airborne).unwrap() else {
        panic!("expected an attack state");
    };
    assert_eq!(kind, AttackKind::Down);
}

#[test]
fn effect_window_fires_once_then_is_spent() {
    let mut world = duel_world();
    let player = spawn_player(
        &mut world,
        PlayerState::Attacking {
            kind: AttackKind::Combo1,
            combo_timer: 0.0,
            effect: EffectWindow::Pending,
        },
        1,
    );
    // Just before the trigger frame of the opener clip.
    world.get_mut::<StateTime>(player).unwrap().0 = 0.055;

    tick(&mut world);

    let PlayerState::Attacking { effect, .. } = *world.get::<PlayerState>(player).unwrap() else {
        panic!("expected an attack state");
    };
    assert!(matches!(effect, EffectWindow::Open { .. }));
    assert!(!world.get::<Hitbox>(player).unwrap().0.is_empty());

    // Run past the effect duration; the window closes and never reopens.
    for _ in 0..9 {
        tick(&mut world);
    }
    let PlayerState::Attacking { effect, .. } = *world.get::<PlayerState>(player).unwrap() else {
        panic!("expected an attack state");
    };
    assert_eq!(effect, EffectWindow::Spent);
    assert!(world.get::<Hitbox>(player).unwrap().0.is_empty());
}

#[test]
fn dead_player_is_frozen() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Grounded { walking: false }, 1);
    world.get_mut::<Health>(player).unwrap().hp = 0;
    world.get_mut::<LinearVelocity>(player).unwrap().x = 3.0;
    {
        let mut input = world.resource_mut::<PlayerInput>();
        input.left = true;
        input.jump = true;
    }

    tick(&mut world);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().x, 3.0);
    assert_eq!(
        *world.get::<PlayerState>(player).unwrap(),
        PlayerState::Grounded { walking: false }
    );
    // Edge presses are still drained so they cannot fire posthumously.
    assert!(!world.resource::<PlayerInput>().jump);
}

#[test]
fn walking_commands_velocity_and_flips_facing() {
    let mut world = duel_world();
    let player = spawn_player(&mut world, PlayerState::Grounded { walking: false }, 1);
    world.resource_mut::<PlayerInput>().left = true;

    tick(&mut world);

    assert_eq!(world.get::<LinearVelocity>(player).unwrap().x, -5.0);
    assert_eq!(*world.get::<Facing>(player).unwrap(), Facing::Left);
    assert_eq!(
        *world.get::<PlayerState>(player).unwrap(),
        PlayerState::Grounded { walking: true }
    );
}
