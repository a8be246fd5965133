//! Headless harness: drives the locomotion core through a scripted input
//! tape on a flat ground plane and logs every state transition.
//!
//! Useful for eyeballing tuning changes without a renderer:
//! `RUST_LOG=debug cargo run -p locomotion-harness -- --seconds 12`

use anyhow::Result;
use clap::Parser;
use glam::{Vec2, Vec3};
use locomotion_core::host::{CharacterBody, FlatGround};
use locomotion_core::Player;

#[derive(Parser, Debug)]
#[command(about = "Run the locomotion core through a scripted session")]
struct Args {
    /// Simulated wall-clock duration.
    #[arg(long, default_value_t = 12.0)]
    seconds: f32,
    /// Fixed physics tick rate.
    #[arg(long, default_value_t = 60)]
    hz: u32,
}

/// Scripted input for a given session time.
fn drive(t: f32) -> (Vec2, bool, bool) {
    let mut axis = Vec2::ZERO;
    let mut jump = false;
    let mut ladder = false;
    match t {
        // Sprint forward, jump mid-run, keep running after landing.
        t if (0.5..5.0).contains(&t) => {
            axis = Vec2::new(0.0, -1.0);
            jump = (2.0..2.03).contains(&t);
        }
        // Brief strafe to exercise the off-forward sprint penalty.
        t if (5.5..7.0).contains(&t) => axis = Vec2::new(1.0, 0.0),
        // Hop up to grab the ladder, then climb for the rest of the session.
        t if (7.8..7.83).contains(&t) => jump = true,
        t if t >= 8.0 => {
            axis = Vec2::new(0.0, -1.0);
            ladder = true;
        }
        _ => {}
    }
    (axis, jump, ladder)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = data_runtime::configs::locomotion::load_default()?;
    let mut player = Player::new(cfg);
    let mut body = FlatGround::new(Vec3::ZERO);

    let dt = 1.0 / args.hz as f32;
    let steps = (args.seconds / dt).ceil() as u32;
    let mut last_state = player.current_state();
    let mut was_on_ladder = false;

    for i in 0..steps {
        let t = i as f32 * dt;
        let (axis, jump, ladder) = drive(t);
        player.state.input.axis = axis;
        player.state.input.jump_pressed = jump;
        player.state.on_ladder = ladder;
        if ladder && !was_on_ladder {
            // The ladder volume trigger fires the named transition signal.
            player.request_transition("Ladder");
        }
        was_on_ladder = ladder;

        player.update(dt);
        player.physics_update(&mut body, dt);
        player.state.input.jump_pressed = false;

        if player.current_state() != last_state {
            log::info!(
                "t={t:5.2}s  {:>13} -> {:<13} speed={:5.2} pos={:6.2},{:6.2},{:6.2}",
                last_state.name(),
                player.current_state().name(),
                player.current_speed(),
                body.position().x,
                body.position().y,
                body.position().z,
            );
            last_state = player.current_state();
        }
    }

    println!(
        "done: state={} speed={:.2} pos={:.2},{:.2},{:.2}",
        player.current_state().name(),
        player.current_speed(),
        body.position().x,
        body.position().y,
        body.position().z,
    );
    Ok(())
}
