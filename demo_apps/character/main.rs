//! Headless character demo.
//!
//! A three-bone skinned arm loaded from a JSON model description. A player
//! object presses and releases "run" on a fixed schedule; the animator
//! crossfades Idle -> Run in 0.12 s and Run -> Idle in 0.14 s. Each state
//! change and the joint palette of the hand are printed.

use glam::Vec3;
use serde_json::json;

use marionette::prelude::*;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u64 = 360;

/// Seconds of simulated time between run key presses and releases.
const RUN_TOGGLE_PERIOD: f32 = 1.5;

fn arm_model() -> serde_json::Value {
    json!({
        "nodes": [
            { "name": "shoulder", "children": [1] },
            { "name": "elbow", "children": [2], "translation": [0.0, 1.0, 0.0] },
            { "name": "hand", "translation": [0.0, 1.0, 0.0] }
        ],
        "skin": {
            "name": "arm",
            "joints": [0, 1, 2],
            "inverse_bind_matrices": [
                [1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0,  0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, -1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, -2.0, 0.0, 1.0]
            ]
        },
        "clips": [
            {
                "name": "Idle",
                "samplers": [{
                    "times": [0.0, 1.0, 2.0],
                    "values": [0.0, 0.0, 0.0, 1.0,  0.0, 0.0, 0.0998, 0.995,  0.0, 0.0, 0.0, 1.0]
                }],
                "channels": [{ "node": 1, "path": "rotation", "sampler": 0 }]
            },
            {
                "name": "Run",
                "samplers": [
                    {
                        "times": [0.0, 0.3, 0.6],
                        "values": [0.0, 0.0, 0.479, 0.878,  0.0, 0.0, -0.479, 0.878,  0.0, 0.0, 0.479, 0.878]
                    },
                    {
                        "times": [0.0, 0.3, 0.6],
                        "values": [0.0, 0.0, 0.0,  0.0, 0.1, 0.0,  0.0, 0.0, 0.0]
                    }
                ],
                "channels": [
                    { "node": 0, "path": "rotation", "sampler": 0 },
                    { "node": 0, "path": "translation", "sampler": 1 }
                ]
            }
        ]
    })
}

/// Gameplay object standing in for keyboard input.
struct Player {
    animator: AnimatorKey,
    running: bool,
    next_toggle: f32,
}

impl Startable for Player {
    fn start(&mut self, ctx: &mut FrameContext<'_>) {
        self.next_toggle = ctx.frame.time + RUN_TOGGLE_PERIOD;
    }
}

impl Updatable for Player {
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if ctx.frame.time >= self.next_toggle {
            self.running = !self.running;
            self.next_toggle += RUN_TOGGLE_PERIOD;
            println!(
                "[{:6.3}s] run key {}",
                ctx.frame.time,
                if self.running { "pressed" } else { "released" }
            );
        }
        if let Some(animator) = ctx.animation.get_mut(self.animator) {
            animator.signals_mut().set(Signal::Moving, self.running);
        }
    }
}

impl Destroyable for Player {
    fn destroy(&mut self, _ctx: &mut FrameContext<'_>) {
        println!("Player removed");
    }
}

impl GameObject for Player {
    fn name(&self) -> &str {
        "player"
    }

    fn as_startable(&mut self) -> Option<&mut dyn Startable> {
        Some(self)
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_destroyable(&mut self) -> Option<&mut dyn Destroyable> {
        Some(self)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = AnimationSettings::default();
    let model = AnimatedModel::from_json(&arm_model().to_string(), &settings)?;
    println!(
        "Loaded arm: {} nodes, clips: {:?}",
        model.scene().len(),
        model.clip_names().collect::<Vec<_>>()
    );

    let mut animator = Animator::new(model, settings);
    animator.set_default_state("Idle", 1.0, true)?;
    animator.add_animation_state("Run", 1.0, true)?;
    animator.add_transition("Idle", "Run", 0.12, |ctx| ctx.signals.flag(Signal::Moving), 0.0)?;
    animator.add_transition("Run", "Idle", 0.14, |ctx| !ctx.signals.flag(Signal::Moving), 0.0)?;

    log::info!(
        "Animator ready: {} states, {} transitions",
        animator.state_count(),
        animator.transitions().len()
    );

    let mut app = Application::new();
    let animator = app.animation.add(animator);
    app.add_object(Box::new(Player {
        animator,
        running: false,
        next_toggle: 0.0,
    }));

    let mut last_state = String::new();
    for _ in 0..FRAMES {
        let frame = app.frame(FRAME_DT);

        let Some(animator) = app.animation.get(animator) else {
            break;
        };
        let state = match (animator.current_state_name(), animator.active_transition()) {
            (_, Some(t)) => format!("{} -> {}", t.start_name(), t.end_name()),
            (Some(name), None) => name.to_string(),
            (None, None) => "<none>".to_string(),
        };
        if state != last_state {
            let hand = animator.scene().joint_matrices()?[2];
            let tip = hand.transform_point3(Vec3::new(0.0, 2.5, 0.0));
            println!(
                "[{:6.3}s] frame {:3}: {state:<14} fingertip at ({:+.3}, {:+.3}, {:+.3})",
                frame.time, frame.frame_count, tip.x, tip.y, tip.z
            );
            last_state = state;
        }
    }

    let palette = app
        .animation
        .get(animator)
        .map_or(0, |a| a.scene().joint_palette().as_bytes().len());
    println!("Final joint palette: {palette} bytes");

    app.shutdown();
    log::info!("Demo finished after {FRAMES} frames");
    Ok(())
}
