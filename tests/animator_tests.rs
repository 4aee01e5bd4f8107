//! Animator Tests
//!
//! Tests for:
//! - Transition activation (first match, start state, predicates on signals)
//! - Crossfade blending: lerp translation, slerp rotation, unweighted scale
//! - Transition completion and reuse
//! - Strict and lenient configuration
//! - AnimationSystem ticking several animators

use std::cell::Cell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::{Quat, Vec3};

use marionette::animation::{
    AnimatedModel, AnimationClip, AnimationSystem, Animator, Channel, InterpolationMode,
    KeyframeTrack, Sampler, Signal, TargetPath,
};
use marionette::prelude::{AnimationSettings, MarionetteError, Node, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Fixtures
// ============================================================================

/// A one-second clip holding a constant pose on node 0.
fn pose_clip(name: &str, translation: Vec3, rotation: Quat, scale: Option<Vec3>) -> AnimationClip {
    let times = vec![0.0, 1.0];
    let mut samplers = vec![
        Sampler::Vector3(
            KeyframeTrack::new(times.clone(), vec![translation; 2], InterpolationMode::Linear).unwrap(),
        ),
        Sampler::Quaternion(
            KeyframeTrack::rotation(times.clone(), vec![rotation; 2], InterpolationMode::Linear).unwrap(),
        ),
    ];
    let mut channels = vec![
        Channel {
            node: 0,
            target: TargetPath::Translation,
            sampler: 0,
        },
        Channel {
            node: 0,
            target: TargetPath::Rotation,
            sampler: 1,
        },
    ];
    if let Some(scale) = scale {
        samplers.push(Sampler::Vector3(
            KeyframeTrack::new(times, vec![scale; 2], InterpolationMode::Step).unwrap(),
        ));
        channels.push(Channel {
            node: 0,
            target: TargetPath::Scale,
            sampler: 2,
        });
    }
    AnimationClip::new(name, samplers, channels).unwrap()
}

fn model() -> AnimatedModel {
    let settings = AnimationSettings::default();
    let scene = Scene::new(
        vec![Node::new("hips").with_children([1]), Node::new("spine")],
        None,
        &settings,
    )
    .unwrap();
    AnimatedModel::new(
        scene,
        vec![
            pose_clip("Idle", Vec3::X, Quat::IDENTITY, None),
            pose_clip(
                "Run",
                Vec3::new(0.0, 0.0, 2.0),
                Quat::from_rotation_y(FRAC_PI_2),
                Some(Vec3::splat(2.0)),
            ),
            pose_clip("Jump", Vec3::Y, Quat::IDENTITY, None),
        ],
    )
    .unwrap()
}

fn idle_run_animator(duration: f32) -> Animator {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    animator
        .add_transition("Idle", "Run", duration, |_| true, 0.0)
        .unwrap();
    animator
}

fn hips_position(animator: &Animator) -> Vec3 {
    animator.scene().node(0).unwrap().transform.position
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn idle_to_run_completes_on_second_tick() {
    let mut animator = idle_run_animator(0.2);

    animator.tick(0.1);
    assert!(animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Idle"));
    assert!(approx(animator.active_transition().unwrap().progress(), 0.5));

    animator.tick(0.1);
    assert!(!animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Run"));
    assert!(approx(animator.transitions()[0].progress(), 0.0));
}

#[test]
fn transition_blends_translation_by_progress() {
    let mut animator = idle_run_animator(0.2);

    // Progress 0: the source pose
    animator.tick(0.1);
    assert!(vec3_approx(hips_position(&animator), Vec3::X));

    // Progress 0.5: halfway between Idle and Run
    animator.tick(0.1);
    assert!(vec3_approx(hips_position(&animator), Vec3::new(0.5, 0.0, 1.0)));

    // Run is current now
    animator.tick(0.1);
    assert!(vec3_approx(hips_position(&animator), Vec3::new(0.0, 0.0, 2.0)));
}

#[test]
fn transition_slerps_rotation() {
    let mut animator = idle_run_animator(0.2);
    animator.tick(0.1);
    animator.tick(0.1);

    let rotation = animator.scene().node(0).unwrap().transform.rotation;
    let expected = Quat::from_rotation_y(FRAC_PI_2 / 2.0);
    assert!(rotation.dot(expected).abs() > 1.0 - EPSILON);
    assert!(approx(rotation.length(), 1.0));
}

#[test]
fn transition_writes_scale_unweighted() {
    let mut animator = idle_run_animator(1.0);
    animator.tick(0.1);

    let node = animator.scene().node(0).unwrap();
    assert!(vec3_approx(node.transform.scale, Vec3::splat(2.0)));
    assert!(vec3_approx(node.transform.position, Vec3::X));
}

#[test]
fn world_transforms_follow_the_animated_root() {
    let mut animator = idle_run_animator(0.2);
    animator.tick(0.1);
    let spine = animator.scene().world_transform(1).unwrap();
    assert!(vec3_approx(Vec3::from(spine.translation), Vec3::X));
}

// ============================================================================
// Activation rules
// ============================================================================

#[test]
fn first_matching_transition_wins() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    animator.add_animation_state("Jump", 1.0, false).unwrap();
    animator.add_transition("Idle", "Jump", 0.1, |_| false, 0.0).unwrap();
    animator.add_transition("Idle", "Run", 0.1, |_| true, 0.0).unwrap();
    animator.add_transition("Idle", "Jump", 0.1, |_| true, 0.0).unwrap();

    animator.tick(0.05);
    assert_eq!(animator.active_transition().unwrap().end_name(), "Run");
}

#[test]
fn transitions_from_other_states_are_ignored() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    animator.add_transition("Run", "Idle", 0.1, |_| true, 0.0).unwrap();

    animator.tick(0.05);
    assert!(!animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Idle"));
}

#[test]
fn predicates_read_signals() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    animator
        .add_transition("Idle", "Run", 0.12, |ctx| ctx.signals.flag(Signal::Moving), 0.0)
        .unwrap();
    animator
        .add_transition("Run", "Idle", 0.14, |ctx| !ctx.signals.flag(Signal::Moving), 0.0)
        .unwrap();

    for _ in 0..5 {
        animator.tick(0.05);
    }
    assert_eq!(animator.current_state_name(), Some("Idle"));

    animator.signals_mut().set(Signal::Moving, true);
    for _ in 0..5 {
        animator.tick(0.05);
    }
    assert_eq!(animator.current_state_name(), Some("Run"));

    animator.signals_mut().set(Signal::Moving, false);
    for _ in 0..5 {
        animator.tick(0.05);
    }
    assert_eq!(animator.current_state_name(), Some("Idle"));
}

#[test]
fn predicate_not_evaluated_while_blending() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    animator
        .add_transition(
            "Idle",
            "Run",
            1.0,
            move |_| {
                counter.set(counter.get() + 1);
                true
            },
            0.0,
        )
        .unwrap();

    for _ in 0..5 {
        animator.tick(0.1);
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn predicate_sees_current_state() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Jump", 1.0, false).unwrap();
    animator.add_animation_state("Idle", 1.0, true).unwrap();
    animator
        .add_transition("Jump", "Idle", 1.0, |ctx| ctx.state.is_finished(), 0.0)
        .unwrap();

    animator.tick(0.5);
    assert!(!animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Jump"));

    // Jump finishes during this tick; the blend starts and advances to 0.6
    animator.tick(0.6);
    assert!(animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Jump"));
    assert!(approx(animator.active_transition().unwrap().progress(), 0.6));

    animator.tick(0.5);
    assert!(!animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Idle"));
}

#[test]
fn finished_predicate_with_short_blend_completes_in_same_tick() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Jump", 1.0, false).unwrap();
    animator.add_animation_state("Idle", 1.0, true).unwrap();
    animator
        .add_transition("Jump", "Idle", 0.1, |ctx| ctx.state.is_finished(), 0.0)
        .unwrap();

    animator.tick(0.5);
    assert_eq!(animator.current_state_name(), Some("Jump"));
    animator.tick(0.6);
    assert!(!animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Idle"));
}

// ============================================================================
// Completion & reuse
// ============================================================================

/// Number of `tick(dt)` calls until an always-true Idle -> Run blend is done.
fn ticks_to_complete(duration: f32, dt: f32) -> usize {
    let mut animator = idle_run_animator(duration);
    let mut ticks = 0;
    loop {
        animator.tick(dt);
        ticks += 1;
        if !animator.is_transitioning() {
            assert_eq!(animator.current_state_name(), Some("Run"));
            return ticks;
        }
        assert!(ticks < 1000, "blend never completed");
    }
}

#[test]
fn progress_reaching_exactly_one_completes_the_blend() {
    // 0.125 * 4.0 is exact: progress goes 0.5 then 1.0
    let mut animator = idle_run_animator(0.25);
    animator.tick(0.125);
    assert!(animator.is_transitioning());
    assert!(approx(animator.active_transition().unwrap().progress(), 0.5));

    animator.tick(0.125);
    assert!(!animator.is_transitioning());
    assert_eq!(animator.current_state_name(), Some("Run"));
}

#[test]
fn completion_tick_follows_blend_duration() {
    assert_eq!(ticks_to_complete(0.2, 0.1), 2);
    assert_eq!(ticks_to_complete(0.3, 0.1), 3);
    assert_eq!(ticks_to_complete(0.12, 1.0 / 60.0), 8);
    assert_eq!(ticks_to_complete(0.14, 1.0 / 60.0), 9);
}

#[test]
fn progress_is_monotonic_until_completion() {
    let mut animator = idle_run_animator(0.35);
    let mut last = 0.0;
    let mut ticks = 0;
    while ticks == 0 || animator.is_transitioning() {
        animator.tick(0.05);
        ticks += 1;
        if let Some(transition) = animator.active_transition() {
            assert!(transition.progress() >= last);
            last = transition.progress();
        }
        assert!(ticks < 100);
    }
    assert_eq!(animator.current_state_name(), Some("Run"));
}

#[test]
fn completed_transition_resets_previous_state() {
    let mut animator = idle_run_animator(0.2);
    animator.tick(0.1);
    animator.tick(0.1);

    let idle = animator.state("Idle").unwrap();
    assert!(approx(idle.time(), 0.0));
    let run = animator.state("Run").unwrap();
    assert!(approx(run.time(), 0.2));
}

#[test]
fn transition_is_reusable() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    animator.set_default_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    animator.add_transition("Idle", "Run", 0.1, |_| true, 0.0).unwrap();
    animator.add_transition("Run", "Idle", 0.1, |_| true, 0.0).unwrap();

    let mut seen = Vec::new();
    for _ in 0..12 {
        animator.tick(0.05);
        seen.push(animator.current_state_name().unwrap().to_string());
    }
    assert!(seen.iter().filter(|s| *s == "Run").count() > 1);
    assert!(animator.transitions().iter().all(|t| t.progress() < 1.0));
}

#[test]
fn set_default_state_abandons_transition() {
    let mut animator = idle_run_animator(1.0);
    animator.tick(0.1);
    assert!(animator.is_transitioning());

    animator.set_default_state("Idle", 1.0, true).unwrap();
    assert!(!animator.is_transitioning());
    assert!(approx(animator.transitions()[0].progress(), 0.0));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn strict_configuration_rejects_unknown_names() {
    let mut animator = Animator::new(model(), AnimationSettings::strict());
    assert!(matches!(
        animator.set_default_state("Swim", 1.0, true),
        Err(MarionetteError::InvalidConfiguration(_))
    ));
    animator.add_animation_state("Idle", 1.0, true).unwrap();
    assert!(matches!(
        animator.add_transition("Idle", "Swim", 0.1, |_| true, 0.0),
        Err(MarionetteError::InvalidConfiguration(_))
    ));
}

#[test]
fn lenient_configuration_ignores_unknown_names() {
    let mut animator = Animator::new(model(), AnimationSettings::lenient());
    animator.set_default_state("Swim", 1.0, true).unwrap();
    animator.add_transition("Swim", "Idle", 0.1, |_| true, 0.0).unwrap();
    assert!(animator.current_state().is_none());
    assert!(animator.transitions().is_empty());
    animator.tick(0.1);
}

#[test]
fn non_positive_blend_duration_is_rejected() {
    let mut animator = Animator::new(model(), AnimationSettings::lenient());
    animator.add_animation_state("Idle", 1.0, true).unwrap();
    animator.add_animation_state("Run", 1.0, true).unwrap();
    for duration in [0.0, -0.5] {
        assert!(matches!(
            animator.add_transition("Idle", "Run", duration, |_| true, 0.0),
            Err(MarionetteError::InvalidConfiguration(_))
        ));
    }
}

// ============================================================================
// AnimationSystem
// ============================================================================

#[test]
fn system_ticks_every_animator() {
    let mut system = AnimationSystem::new();
    let a = system.add(idle_run_animator(0.2));
    let b = system.add(idle_run_animator(0.2));
    assert_eq!(system.len(), 2);

    system.tick(0.1);
    system.tick(0.1);
    for key in [a, b] {
        assert_eq!(system.get(key).unwrap().current_state_name(), Some("Run"));
    }

    assert!(system.remove(a).is_some());
    assert!(system.get(a).is_none());
    assert_eq!(system.len(), 1);
}
