use glam::{Vec2, Vec3};
use locomotion_core::fsm::StateId;
use locomotion_core::host::{CharacterBody, FlatGround};
use locomotion_core::{LocomotionCfg, Player};

const DT: f32 = 1.0 / 60.0;

fn step(player: &mut Player, body: &mut FlatGround) {
    player.update(DT);
    player.physics_update(body, DT);
    player.state.input.jump_pressed = false;
}

fn mount_ladder(player: &mut Player, body: &mut FlatGround) {
    player.state.on_ladder = true;
    // Hanging above the floor, as if grabbed mid-ladder.
    body.pos = Vec3::new(0.0, 2.0, 0.0);
    let _ = body.move_and_slide(Vec3::ZERO, DT);
    player.request_transition("Ladder");
    assert_eq!(player.current_state(), StateId::Ladder);
}

#[test]
fn rung_climb_covers_bar_spacing_then_yields() {
    let cfg = LocomotionCfg {
        bar_spacing: 1.0,
        ladder_speed: 2.0,
        ..LocomotionCfg::default()
    };
    let mut player = Player::new(cfg);
    let mut body = FlatGround::new(Vec3::ZERO);
    mount_ladder(&mut player, &mut body);

    // Hold forward (up the ladder).
    player.state.input.axis = Vec2::new(0.0, -1.0);

    // Collect per-tick vertical movement; rung boundaries show up as the
    // single zero-velocity tick where the outer loop regains control.
    let start_y = body.position().y;
    let mut boundaries: Vec<(usize, f32)> = Vec::new();
    let mut climbing = false;
    for tick in 0..600 {
        step(&mut player, &mut body);
        let vy = player.local_velocity().y;
        if vy > 0.0 {
            climbing = true;
        } else if climbing {
            climbing = false;
            boundaries.push((tick, body.position().y));
        }
        if boundaries.len() >= 3 {
            break;
        }
    }
    assert!(boundaries.len() >= 3, "should complete several rungs");

    // Distance covered between consecutive rung completions is one bar.
    let (t1, y1) = boundaries[1];
    let (t2, y2) = boundaries[2];
    assert!(
        ((y2 - y1) - 1.0).abs() < 0.15,
        "one rung advances ~bar_spacing, got {}",
        y2 - y1
    );
    // At full ladder speed a one-meter rung takes ~0.5 s plus the one-tick
    // handoff between rungs.
    let rung_ticks = t2 - t1;
    assert!(
        (28..=38).contains(&rung_ticks),
        "rung duration should be near bar_spacing/ladder_speed, got {rung_ticks} ticks"
    );
    assert!(body.position().y > start_y + 2.0, "made real progress upward");
}

#[test]
fn no_vertical_input_hangs_in_place() {
    let mut player = Player::new(LocomotionCfg::default());
    let mut body = FlatGround::new(Vec3::ZERO);
    mount_ladder(&mut player, &mut body);

    let y0 = body.position().y;
    for _ in 0..120 {
        step(&mut player, &mut body);
    }
    assert!((body.position().y - y0).abs() < 1e-4, "gravity is suspended on the ladder");
    assert_eq!(player.current_state(), StateId::Ladder);
}

#[test]
fn climbing_down_to_the_floor_exits_to_idle() {
    let mut player = Player::new(LocomotionCfg::default());
    let mut body = FlatGround::new(Vec3::ZERO);
    mount_ladder(&mut player, &mut body);

    // Backward input climbs down.
    player.state.input.axis = Vec2::new(0.0, 1.0);
    let mut t = 0.0f32;
    while player.current_state() == StateId::Ladder && t < 10.0 {
        step(&mut player, &mut body);
        t += DT;
    }
    assert_eq!(player.current_state(), StateId::Idle);
    assert_eq!(body.position().y, 0.0);
}

#[test]
fn jump_dismount_kicks_upward_into_air() {
    let mut player = Player::new(LocomotionCfg::default());
    let mut body = FlatGround::new(Vec3::ZERO);
    mount_ladder(&mut player, &mut body);

    player.state.input.jump_pressed = true;
    step(&mut player, &mut body);
    assert_eq!(player.current_state(), StateId::Air);
    assert!(
        (player.local_velocity().y - player.state.cfg.ladder_jump_velocity).abs() < 1e-4,
        "dismount applies the ladder jump impulse"
    );
}

#[test]
fn leaving_the_ladder_volume_exits_to_air() {
    let mut player = Player::new(LocomotionCfg::default());
    let mut body = FlatGround::new(Vec3::ZERO);
    mount_ladder(&mut player, &mut body);

    player.state.on_ladder = false;
    step(&mut player, &mut body);
    assert_eq!(player.current_state(), StateId::Air);
}

#[test]
fn ladder_narrows_camera_yaw_until_exit() {
    let mut player = Player::new(LocomotionCfg::default());
    let mut body = FlatGround::new(Vec3::ZERO);
    mount_ladder(&mut player, &mut body);

    player.apply_mouse_delta(-100_000.0, 0.0);
    let clamped = player.state.camera.yaw();
    assert!(
        clamped <= locomotion_core::camera::LADDER_YAW_LIMIT_DEG.to_radians() + 1e-4,
        "yaw constrained while climbing"
    );

    player.state.input.jump_pressed = true;
    step(&mut player, &mut body);
    player.apply_mouse_delta(-100_000.0, 0.0);
    assert!(
        player.state.camera.yaw() > clamped + 1.0,
        "constraint lifted after dismount"
    );
}
