//! Per-frame camera costs: session update, tracking and picking.
#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fieldview::game::{EntityKind, PlayMode, Team};
use fieldview::picking::Scene;
use fieldview::util::easing::Easing;
use fieldview::{
    CameraSession, GameState, Options, SurfaceCapabilities, Viewport,
};
use glam::Vec3;

fn populated_state(agents: u8) -> GameState {
    let mut state = GameState::default();
    let _ = state.spawn(EntityKind::Ball, Vec3::new(0.0, 0.042, 0.0));
    for number in 0..agents {
        let team = if number % 2 == 0 { Team::Left } else { Team::Right };
        let x = f32::from(number) - f32::from(agents) * 0.5;
        let _ = state.spawn(
            EntityKind::Agent { team, number },
            Vec3::new(x, 0.0, f32::from(number % 5) - 2.0),
        );
    }
    state
}

fn easing_benchmark(c: &mut Criterion) {
    let easing = Easing::DEFAULT;
    let _ = c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(easing.evaluate(black_box(0.5))))
    });
}

fn session_update_benchmark(c: &mut Criterion) {
    let mut state = populated_state(22);
    let ball = state.ball().map(|b| b.id);
    let mut session = CameraSession::new(
        SurfaceCapabilities::MONO,
        Viewport::default(),
        &mut state,
        &Options::default(),
    )
    .unwrap();
    state.set_play_mode(PlayMode::PlayOn);
    session.set_target(ball, &state);

    let _ = c.bench_function("session_update_tracking", |b| {
        b.iter(|| black_box(session.update(black_box(16.0), &state)))
    });
}

fn picking_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");
    for agents in [4u8, 22, 100] {
        let mut state = populated_state(agents);
        let scene = Scene::from_game_state(&state);
        let session = CameraSession::new(
            SurfaceCapabilities::MONO,
            Viewport::default(),
            &mut state,
            &Options::default(),
        )
        .unwrap();
        let _ = group.bench_function(format!("{agents}_agents"), |b| {
            let picker = session.picker(&scene);
            b.iter(|| {
                black_box(picker.pick(black_box(640.0), black_box(360.0)))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    session_update_benchmark,
    picking_benchmark
);
criterion_main!(benches);
