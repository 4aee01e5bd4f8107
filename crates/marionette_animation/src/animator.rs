use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use marionette_core::{AnimationSettings, MarionetteError, Result};
use marionette_scene::Scene;

use crate::model::AnimatedModel;
use crate::signals::Signals;
use crate::state::{AnimationState, StateKey};
use crate::transition::{Transition, TransitionContext};

/// State machine driving one [`AnimatedModel`].
///
/// Owns the model's scene for the duration of its life and is the only
/// writer of its node attributes. Each [`tick`](Self::tick) samples the
/// current state, fires at most one transition, blends an active transition
/// and finally refreshes world transforms and joint matrices.
#[derive(Debug)]
pub struct Animator {
    model: AnimatedModel,
    settings: AnimationSettings,

    states: SlotMap<StateKey, AnimationState>,
    state_lookup: FxHashMap<String, StateKey>,
    current: Option<StateKey>,

    transitions: Vec<Transition>,
    active_transition: Option<usize>,

    signals: Signals,
}

impl Animator {
    #[must_use]
    pub fn new(model: AnimatedModel, settings: AnimationSettings) -> Self {
        Self {
            model,
            settings,
            states: SlotMap::with_key(),
            state_lookup: FxHashMap::default(),
            current: None,
            transitions: Vec::new(),
            active_transition: None,
            signals: Signals::default(),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Registers a state playing the clip called `name`.
    ///
    /// Registering an existing name updates its time scale and loop flag.
    pub fn add_animation_state(&mut self, name: &str, time_scale: f32, looping: bool) -> Result<()> {
        self.register_state(name, time_scale, looping).map(|_| ())
    }

    /// Registers the state if needed and makes it current, abandoning any
    /// running transition.
    pub fn set_default_state(&mut self, name: &str, time_scale: f32, looping: bool) -> Result<()> {
        let Some(key) = self.register_state(name, time_scale, looping)? else {
            return Ok(());
        };

        self.abandon_transition();
        if let Some(state) = self.states.get_mut(key) {
            state.reset();
        }
        self.current = Some(key);
        log::debug!("Animator default state: '{name}'");
        Ok(())
    }

    /// Registers a transition from `start` to `end`, checked in registration
    /// order every tick while `start` is current and nothing is blending.
    ///
    /// A non-positive `duration` is always an error. `offset` is where the
    /// destination starts playing.
    pub fn add_transition<F>(
        &mut self,
        start: &str,
        end: &str,
        duration: f32,
        predicate: F,
        offset: f32,
    ) -> Result<()>
    where
        F: Fn(&TransitionContext<'_>) -> bool + 'static,
    {
        let start_key = self.state_lookup.get(start).copied();
        let end_key = self.state_lookup.get(end).copied();

        let (Some(start_key), Some(end_key)) = (start_key, end_key) else {
            let missing = if start_key.is_none() { start } else { end };
            return self.reject(format!(
                "transition '{start}' -> '{end}' names unknown state '{missing}'"
            ));
        };

        let transition = Transition::new(
            (start, start_key),
            (end, end_key),
            duration,
            offset,
            Box::new(predicate),
        )?;
        self.transitions.push(transition);
        log::debug!("Animator transition added: '{start}' -> '{end}' ({duration}s)");
        Ok(())
    }

    fn register_state(&mut self, name: &str, time_scale: f32, looping: bool) -> Result<Option<StateKey>> {
        if !time_scale.is_finite() {
            return Err(MarionetteError::InvalidConfiguration(format!(
                "state '{name}' has a non-finite time scale"
            )));
        }

        if let Some(&key) = self.state_lookup.get(name) {
            if let Some(state) = self.states.get_mut(key) {
                state.time_scale = time_scale;
                state.looping = looping;
            }
            return Ok(Some(key));
        }

        let Some(clip) = self.model.clip(name) else {
            return self
                .reject(format!("no animation clip named '{name}'"))
                .map(|()| None);
        };

        let state = AnimationState::new(name, Arc::clone(clip), time_scale, looping);
        let key = self.states.insert(state);
        self.state_lookup.insert(name.to_string(), key);
        Ok(Some(key))
    }

    /// Strict settings turn bad names into errors; lenient ones log and
    /// carry on.
    fn reject(&self, message: String) -> Result<()> {
        if self.settings.strict_configuration {
            Err(MarionetteError::InvalidConfiguration(message))
        } else {
            log::warn!("{message}; ignoring");
            Ok(())
        }
    }

    fn abandon_transition(&mut self) {
        if let Some(index) = self.active_transition.take()
            && let Some(transition) = self.transitions.get_mut(index)
        {
            transition.reset();
        }
    }

    // ========================================================================
    // Per-frame evaluation
    // ========================================================================

    /// Advances the animator by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Self {
            model,
            states,
            current,
            transitions,
            active_transition,
            signals,
            ..
        } = self;
        let scene = model.scene_mut();

        // 1. Sample and advance the current state
        if let Some(state) = current.and_then(|key| states.get_mut(key)) {
            state.calculate_animation(scene);
            state.update(dt);
        }

        // 2. Fire the first matching transition
        if active_transition.is_none()
            && let Some(current_key) = *current
            && let Some(state) = states.get(current_key)
        {
            let context = TransitionContext {
                state,
                signals: &*signals,
            };
            let fired = transitions
                .iter()
                .position(|t| t.start() == current_key && t.should_trigger(&context));

            if let Some(index) = fired {
                let transition = &transitions[index];
                if let Some(destination) = states.get_mut(transition.end()) {
                    destination.reset();
                    if transition.offset() > 0.0 {
                        destination.seek(transition.offset());
                    }
                }
                *active_transition = Some(index);
                log::debug!(
                    "Transition '{}' -> '{}' started",
                    transition.start_name(),
                    transition.end_name()
                );
            }
        }

        // 3. Blend the active transition
        if let Some(index) = *active_transition
            && let Some(transition) = transitions.get_mut(index)
        {
            let still_active = match states.get_mut(transition.end()) {
                Some(destination) => transition.apply(dt, destination, scene),
                None => false,
            };

            if !still_active {
                if let Some(previous) = current.and_then(|key| states.get_mut(key)) {
                    previous.reset();
                }
                *current = Some(transition.end());
                transition.reset();
                *active_transition = None;
                log::debug!("Transition to '{}' finished", transition.end_name());
            }
        }

        // 4. Local, world, then joint matrices
        scene.update_transforms();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn model(&self) -> &AnimatedModel {
        &self.model
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.model.scene()
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[must_use]
    pub fn current_state(&self) -> Option<&AnimationState> {
        self.current.and_then(|key| self.states.get(key))
    }

    #[must_use]
    pub fn current_state_name(&self) -> Option<&str> {
        self.current_state().map(AnimationState::name)
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<&AnimationState> {
        self.state_lookup
            .get(name)
            .and_then(|&key| self.states.get(key))
    }

    #[inline]
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.active_transition.is_some()
    }

    #[must_use]
    pub fn active_transition(&self) -> Option<&Transition> {
        self.active_transition
            .and_then(|index| self.transitions.get(index))
    }

    #[inline]
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    #[inline]
    #[must_use]
    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    #[inline]
    pub fn signals_mut(&mut self) -> &mut Signals {
        &mut self.signals
    }
}
