//! Animator per-frame cost.
//!
//! Builds a procedural skeleton (a spine with two arms per vertebra) and
//! measures `Animator::tick` with and without an active crossfade.

use std::f32::consts::TAU;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Mat4, Quat, Vec3};

use marionette::animation::{
    AnimatedModel, AnimationClip, Animator, Channel, InterpolationMode, KeyframeTrack, Sampler,
    TargetPath,
};
use marionette::prelude::{AnimationSettings, Node, Scene, Skin};

const KEYFRAMES: usize = 30;

fn skeleton(vertebrae: usize) -> (Vec<Node>, Vec<usize>) {
    let mut nodes = Vec::with_capacity(vertebrae * 3);
    for v in 0..vertebrae {
        let base = v * 3;
        let mut children = vec![base + 1, base + 2];
        if v + 1 < vertebrae {
            children.push(base + 3);
        }
        nodes.push(
            Node::new(&format!("spine_{v}"))
                .with_translation(Vec3::Y * 0.2)
                .with_children(children),
        );
        nodes.push(Node::new(&format!("arm_l_{v}")).with_translation(Vec3::X * 0.3));
        nodes.push(Node::new(&format!("arm_r_{v}")).with_translation(Vec3::NEG_X * 0.3));
    }
    let joints = (0..nodes.len()).collect();
    (nodes, joints)
}

fn swing_clip(name: &str, node_count: usize, amplitude: f32) -> AnimationClip {
    let times: Vec<f32> = (0..KEYFRAMES).map(|i| i as f32 / 30.0).collect();
    let mut samplers = Vec::with_capacity(node_count);
    let mut channels = Vec::with_capacity(node_count);
    for node in 0..node_count {
        let phase = node as f32 * 0.37;
        let rotations = times
            .iter()
            .map(|t| Quat::from_rotation_z(amplitude * (t * TAU + phase).sin()))
            .collect();
        samplers.push(Sampler::Quaternion(
            KeyframeTrack::rotation(times.clone(), rotations, InterpolationMode::Linear).unwrap(),
        ));
        channels.push(Channel {
            node,
            target: TargetPath::Rotation,
            sampler: node,
        });
    }
    AnimationClip::new(name, samplers, channels).unwrap()
}

fn animator(vertebrae: usize, transition: bool) -> Animator {
    let settings = AnimationSettings {
        max_joints: vertebrae * 3,
        ..AnimationSettings::lenient()
    };
    let (nodes, joints) = skeleton(vertebrae);
    let count = nodes.len();
    let skin = Skin::new("body", joints, vec![Mat4::IDENTITY; count]).unwrap();
    let scene = Scene::new(nodes, Some(skin), &settings).unwrap();
    let model = AnimatedModel::new(
        scene,
        vec![swing_clip("Idle", count, 0.1), swing_clip("Run", count, 0.6)],
    )
    .unwrap();

    let mut animator = Animator::new(model, settings);
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    if transition {
        // Long enough to stay blending for the whole measurement
        animator
            .add_transition("Idle", "Run", 1.0e6, |_| true, 0.0)
            .unwrap();
    }
    animator
}

fn bench_tick(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut group = c.benchmark_group("animator_tick");
    for vertebrae in [10, 33] {
        let joints = vertebrae * 3;

        let mut playing = animator(vertebrae, false);
        group.bench_with_input(BenchmarkId::new("single_state", joints), &joints, |b, _| {
            b.iter(|| {
                playing.tick(black_box(1.0 / 60.0));
                black_box(playing.scene().joint_palette().as_bytes().len())
            });
        });

        let mut blending = animator(vertebrae, true);
        group.bench_with_input(BenchmarkId::new("crossfade", joints), &joints, |b, _| {
            b.iter(|| {
                blending.tick(black_box(1.0 / 60.0));
                black_box(blending.scene().joint_palette().as_bytes().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
