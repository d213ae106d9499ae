use bevy::math::{Vec2, Vec3};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bevy_smooth_cam::math::smooth_damp_vec2;
use bevy_smooth_cam::pan::PanCam;
use bevy_smooth_cam::rotation::{GyroRotationSettings, RotationState};

const DT: f32 = 1.0 / 60.0;

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("gyro_integrate", |b| {
        let settings = GyroRotationSettings::default();
        let mut state = RotationState::default();
        b.iter(|| settings.integrate(&mut state, black_box(Vec3::new(0.2, 0.1, 0.05)), DT));
    });

    c.bench_function("pan_step", |b| {
        let mut cam = PanCam::default();
        b.iter(|| cam.step(black_box(Vec2::new(0.4, -0.2)), DT));
    });

    c.bench_function("smooth_damp_vec2", |b| {
        let mut velocity = Vec2::ZERO;
        b.iter(|| {
            smooth_damp_vec2(
                black_box(Vec2::new(3.0, -4.0)),
                Vec2::ZERO,
                &mut velocity,
                0.1,
                f32::INFINITY,
                DT,
            )
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
