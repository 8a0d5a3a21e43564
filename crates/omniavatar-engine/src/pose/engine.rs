//! Pose state machine.

use omniavatar_spec::{
    validate_pose_state, AnimationClip, ErrorCode, PosePreset, PoseState, PoseStateMode,
};
use thiserror::Error;
use tracing::debug;

use super::{ClipSampler, JointRotations, PoseTable};

/// Errors from pose engine operations. Failed operations leave the engine
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PoseError {
    #[error("playback speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f64),

    #[error("invalid pose state: {message}")]
    InvalidState { code: ErrorCode, message: String },
}

impl PoseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PoseError::InvalidSpeed(_) => ErrorCode::InvalidPlaybackSpeed,
            PoseError::InvalidState { code, .. } => *code,
        }
    }
}

/// Exactly one of: nothing selected, a static preset, or a running clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseMode {
    Idle,
    StaticPosed(PosePreset),
    Animating {
        clip: AnimationClip,
        playing: bool,
        speed: f64,
        elapsed: f64,
    },
}

/// Drives joint rotations from a pose or animation selection.
///
/// The host calls [`PoseEngine::advance`] once per frame with the frame time.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseEngine {
    mode: PoseMode,
    /// Speed carried into the next animation selection.
    speed: f64,
}

impl Default for PoseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseEngine {
    pub fn new() -> Self {
        Self {
            mode: PoseMode::Idle,
            speed: 1.0,
        }
    }

    /// Rebuilds an engine from a snapshot, validating it first.
    ///
    /// Unknown ids in the snapshot fall back the same way the selectors do.
    pub fn from_state(state: &PoseState) -> Result<Self, PoseError> {
        let validation = validate_pose_state(state);
        if let Some(error) = validation.errors.first() {
            return Err(match error.code {
                ErrorCode::InvalidPlaybackSpeed => PoseError::InvalidSpeed(state.playback_speed),
                code => PoseError::InvalidState {
                    code,
                    message: error.message.clone(),
                },
            });
        }
        let mut engine = Self::new();
        engine.speed = state.playback_speed;
        match state.mode {
            PoseStateMode::Idle => {}
            PoseStateMode::Static => {
                engine.select_pose(state.pose_id.as_deref().unwrap_or_default());
            }
            PoseStateMode::Animated => {
                engine.select_animation(state.animation_id.as_deref().unwrap_or_default());
                if let PoseMode::Animating {
                    playing, elapsed, ..
                } = &mut engine.mode
                {
                    *playing = state.is_playing;
                    *elapsed = state.elapsed_time;
                }
            }
        }
        Ok(engine)
    }

    pub fn mode(&self) -> PoseMode {
        self.mode
    }

    /// Selects a static pose, clearing any animation. Unknown ids select the
    /// T-pose. Returns the preset in effect.
    pub fn select_pose(&mut self, id: &str) -> PosePreset {
        let preset = PosePreset::from_id(id).unwrap_or_else(|| {
            debug!("unknown pose id '{}', using tpose", id);
            PosePreset::Tpose
        });
        self.mode = PoseMode::StaticPosed(preset);
        preset
    }

    /// Selects an animation, clearing any static pose, and starts playing it
    /// from the beginning. Unknown ids select the T-pose and return `None`.
    pub fn select_animation(&mut self, id: &str) -> Option<AnimationClip> {
        match AnimationClip::from_id(id) {
            Some(clip) => {
                self.mode = PoseMode::Animating {
                    clip,
                    playing: true,
                    speed: self.speed,
                    elapsed: 0.0,
                };
                Some(clip)
            }
            None => {
                debug!("unknown animation id '{}', using tpose", id);
                self.mode = PoseMode::StaticPosed(PosePreset::Tpose);
                None
            }
        }
    }

    /// Resumes the current animation. No effect without one.
    pub fn play(&mut self) {
        self.set_playing(true);
    }

    /// Freezes the current animation at its present phase.
    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Flips play/pause and returns the new playing flag.
    pub fn toggle_playback(&mut self) -> bool {
        let now = !self.is_playing();
        self.set_playing(now);
        self.is_playing()
    }

    fn set_playing(&mut self, value: bool) {
        if let PoseMode::Animating { playing, .. } = &mut self.mode {
            *playing = value;
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, PoseMode::Animating { playing: true, .. })
    }

    /// Sets the playback speed multiplier.
    pub fn set_speed(&mut self, value: f64) -> Result<(), PoseError> {
        if !value.is_finite() || value < 0.0 {
            return Err(PoseError::InvalidSpeed(value));
        }
        self.speed = value;
        if let PoseMode::Animating { speed, .. } = &mut self.mode {
            *speed = value;
        }
        Ok(())
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Advances animation time by `dt` seconds scaled by the speed. Time only
    /// moves while playing; negative or non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: f64) -> JointRotations {
        if dt.is_finite() && dt >= 0.0 {
            if let PoseMode::Animating {
                playing: true,
                speed,
                elapsed,
                ..
            } = &mut self.mode
            {
                let next = *elapsed + dt * *speed;
                if next.is_finite() {
                    *elapsed = next;
                }
            }
        }
        self.rotations()
    }

    /// Clears the selection.
    pub fn stop(&mut self) {
        self.mode = PoseMode::Idle;
    }

    /// Clears the selection and restores the default speed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current joint rotations. Idle yields the T-pose.
    pub fn rotations(&self) -> JointRotations {
        match self.mode {
            PoseMode::Idle => JointRotations::tpose(),
            PoseMode::StaticPosed(preset) => preset.rotations().sanitized(),
            PoseMode::Animating { clip, elapsed, .. } => clip.sample(elapsed),
        }
    }

    /// Serializable snapshot.
    pub fn state(&self) -> PoseState {
        match self.mode {
            PoseMode::Idle => PoseState {
                playback_speed: self.speed,
                ..PoseState::default()
            },
            PoseMode::StaticPosed(preset) => PoseState {
                mode: PoseStateMode::Static,
                pose_id: Some(preset.id().to_string()),
                playback_speed: self.speed,
                ..PoseState::default()
            },
            PoseMode::Animating {
                clip,
                playing,
                speed,
                elapsed,
            } => PoseState {
                mode: PoseStateMode::Animated,
                pose_id: None,
                animation_id: Some(clip.id().to_string()),
                is_playing: playing,
                playback_speed: speed,
                elapsed_time: elapsed,
            },
        }
    }
}
