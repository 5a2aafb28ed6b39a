//! Headless demo: replays a short scripted match through a camera session.
//!
//! Usage: `fieldview [--options FILE] [--save-options FILE] [--schema FILE]
//! [--stereo] [--seed N] [--frames N]`
//!
//! Set `RUST_LOG=debug` to see controller and tracking transitions.

use std::path::PathBuf;

use fieldview::controller::ControllerKind;
use fieldview::game::{EntityId, EntityKind, PlayMode, Team};
use fieldview::picking::Scene;
use fieldview::tracking::TrackStatus;
use fieldview::util::frame_timing::FrameTiming;
use fieldview::{
    CameraError, CameraSession, GameState, Options, SurfaceCapabilities,
    Viewport,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::Duration;

const FRAME_MS: f64 = 1000.0 / 60.0;

struct Args {
    options: Option<PathBuf>,
    save_options: Option<PathBuf>,
    schema: Option<PathBuf>,
    stereo: bool,
    seed: u64,
    frames: u32,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = Self {
            options: None,
            save_options: None,
            schema: None,
            stereo: false,
            seed: 2008,
            frames: 720,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next().ok_or_else(|| format!("{flag} needs a value"))
            };
            match flag.as_str() {
                "--options" => args.options = Some(value()?.into()),
                "--save-options" => args.save_options = Some(value()?.into()),
                "--schema" => args.schema = Some(value()?.into()),
                "--stereo" => args.stereo = true,
                "--seed" => {
                    args.seed =
                        value()?.parse().map_err(|e| format!("--seed: {e}"))?;
                }
                "--frames" => {
                    args.frames =
                        value()?.parse().map_err(|e| format!("--frames: {e}"))?;
                }
                other => return Err(format!("unknown argument {other}")),
            }
        }
        Ok(args)
    }
}

/// Ball with a random-walk velocity, kept on the field.
struct BallMotion {
    velocity: Vec3,
    rng: StdRng,
}

impl BallMotion {
    fn step(&mut self, position: Vec3, state: &GameState) -> Vec3 {
        let dt = (FRAME_MS / 1000.0) as f32;
        self.velocity += Vec3::new(
            self.rng.random_range(-0.5..0.5),
            0.0,
            self.rng.random_range(-0.5..0.5),
        );
        self.velocity = self.velocity.clamp_length_max(4.0);
        let field = state.field();
        let half = Vec3::new(field.length * 0.5, 0.0, field.width * 0.5);
        let next = position + self.velocity * dt;
        if next.x.abs() > half.x {
            self.velocity.x = -self.velocity.x;
        }
        if next.z.abs() > half.z {
            self.velocity.z = -self.velocity.z;
        }
        next.clamp(-half, half) + Vec3::Y * position.y
    }
}

fn spawn_teams(state: &mut GameState) -> EntityId {
    let ball = state.spawn(EntityKind::Ball, Vec3::new(0.0, 0.042, 0.0));
    for (team, side) in [(Team::Left, -1.0), (Team::Right, 1.0)] {
        for number in 1..=3u8 {
            let x = side * (2.0 + 3.0 * f32::from(number));
            let z = (f32::from(number) - 2.0) * 4.0;
            let _ = state.spawn(
                EntityKind::Agent { team, number },
                Vec3::new(x, 0.0, z),
            );
        }
    }
    ball
}

/// Referee script: what happens at which frame.
fn referee(frame: u32, state: &mut GameState) {
    match frame {
        0 => state.set_play_mode(PlayMode::BeforeKickOff),
        60 => state.set_play_mode(PlayMode::KickOff(Team::Left)),
        120 => state.set_play_mode(PlayMode::PlayOn),
        330 => state.set_play_mode(PlayMode::CornerKick(Team::Right)),
        390 => state.set_play_mode(PlayMode::PlayOn),
        450 => state.set_play_mode(PlayMode::GoalKick(Team::Left)),
        510 => state.set_play_mode(PlayMode::PlayOn),
        600 => {
            state.set_score(1, 0);
            state.set_play_mode(PlayMode::Goal(Team::Left));
        }
        690 => state.set_play_mode(PlayMode::GameOver),
        f if f % 60 == 0 => state.set_time(f as f32 / 60.0),
        _ => {}
    }
}

fn run(args: &Args) -> Result<(), CameraError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(path) = &args.save_options {
        options.save(path)?;
        log::info!("wrote options to {}", path.display());
    }
    if let Some(path) = &args.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        std::fs::write(path, schema)?;
        log::info!("wrote options schema to {}", path.display());
    }

    let capabilities = if args.stereo {
        SurfaceCapabilities::STEREO
    } else {
        SurfaceCapabilities::MONO
    };
    let mut state = GameState::default();
    let ball = spawn_teams(&mut state);
    let mut session = CameraSession::new(
        capabilities,
        Viewport::new(1280, 720),
        &mut state,
        &options,
    )?;

    let mut motion = BallMotion {
        velocity: Vec3::ZERO,
        rng: StdRng::seed_from_u64(args.seed),
    };
    let mut timing = FrameTiming::new(Duration::from_millis(2));
    let mut settled_frames = 0u32;

    for frame in 0..args.frames {
        referee(frame, &mut state);
        if state.play_mode() == PlayMode::PlayOn {
            if let Some(position) = state.entity_position(ball) {
                let next = motion.step(position, &state);
                let _ = state.move_entity(ball, next);
            }
        }

        match frame {
            150 => {
                let scene = Scene::from_game_state(&state);
                let viewport = session.viewport();
                let (cx, cy) =
                    (viewport.width as f32 * 0.5, viewport.height as f32 * 0.5);
                let picker = session.picker(&scene);
                if let Some(spot) = picker.pick_field(cx, cy) {
                    log::info!("screen center is over field point {spot}");
                }
                let picked = picker.pick(cx, cy);
                log::info!("picked {picked:?} at screen center");
                let target = picked.unwrap_or(ball);
                session.set_target(Some(target), &state);
            }
            240 => {
                let pan = ControllerKind::ScriptedPan.build(&options);
                session.replace_controller(pan, &mut state);
            }
            270 => session.resize(Viewport::new(720, 1280)),
            300 => session.set_target(None, &state),
            320 => {
                let vantage = ControllerKind::Vantage.build(&options);
                session.replace_controller(vantage, &mut state);
                session.resize(Viewport::new(1280, 720));
            }
            _ => {}
        }

        timing.begin();
        let report = session.update(FRAME_MS, &state)?;
        let _ = timing.end();
        if report.tracking == TrackStatus::Settled {
            settled_frames += 1;
        }
        if frame % 120 == 0 {
            log::info!(
                "frame {frame}: {:?} at {} ({:?}, {:?})",
                state.play_mode(),
                report.pose.position,
                report.phase,
                report.tracking
            );
        }
    }

    log::info!(
        "{} frames, average camera cost {:.4} ms, {} over budget, {} \
         settled tracking frames",
        timing.frames(),
        timing.average_ms(),
        timing.over_budget(),
        settled_frames
    );
    session.shutdown(&mut state);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!(
                "Usage: fieldview [--options FILE] [--save-options FILE] \
                 [--schema FILE] [--stereo] [--seed N] [--frames N]"
            );
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
