//! Pose preset and animation clip ids, and the pose state snapshot.

use serde::{Deserialize, Serialize};

/// A static pose preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosePreset {
    Tpose,
    Apose,
    Relaxed,
    ArmsCrossed,
    HandsHips,
    Walking,
    Running,
    Sitting,
    Waving,
    Thinking,
    Pointing,
    Presenting,
}

impl PosePreset {
    pub const ALL: [PosePreset; 12] = [
        PosePreset::Tpose,
        PosePreset::Apose,
        PosePreset::Relaxed,
        PosePreset::ArmsCrossed,
        PosePreset::HandsHips,
        PosePreset::Walking,
        PosePreset::Running,
        PosePreset::Sitting,
        PosePreset::Waving,
        PosePreset::Thinking,
        PosePreset::Pointing,
        PosePreset::Presenting,
    ];

    /// Returns the preset id.
    pub fn id(&self) -> &'static str {
        match self {
            PosePreset::Tpose => "tpose",
            PosePreset::Apose => "apose",
            PosePreset::Relaxed => "relaxed",
            PosePreset::ArmsCrossed => "arms_crossed",
            PosePreset::HandsHips => "hands_hips",
            PosePreset::Walking => "walking",
            PosePreset::Running => "running",
            PosePreset::Sitting => "sitting",
            PosePreset::Waving => "waving",
            PosePreset::Thinking => "thinking",
            PosePreset::Pointing => "pointing",
            PosePreset::Presenting => "presenting",
        }
    }

    /// Parses a preset id (`t-pose` and `t_pose` spellings are accepted).
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "t_pose" => return Some(PosePreset::Tpose),
            "a_pose" => return Some(PosePreset::Apose),
            _ => {}
        }
        Self::ALL.into_iter().find(|p| p.id() == normalized)
    }
}

/// A periodic animation clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationClip {
    Idle,
    Walk,
    Run,
    Jump,
    Wave,
    Dance,
    Clap,
    Nod,
    ShakeHead,
    Talk,
}

impl AnimationClip {
    pub const ALL: [AnimationClip; 10] = [
        AnimationClip::Idle,
        AnimationClip::Walk,
        AnimationClip::Run,
        AnimationClip::Jump,
        AnimationClip::Wave,
        AnimationClip::Dance,
        AnimationClip::Clap,
        AnimationClip::Nod,
        AnimationClip::ShakeHead,
        AnimationClip::Talk,
    ];

    /// Returns the clip id.
    pub fn id(&self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::Walk => "walk",
            AnimationClip::Run => "run",
            AnimationClip::Jump => "jump",
            AnimationClip::Wave => "wave",
            AnimationClip::Dance => "dance",
            AnimationClip::Clap => "clap",
            AnimationClip::Nod => "nod",
            AnimationClip::ShakeHead => "shake_head",
            AnimationClip::Talk => "talk",
        }
    }

    /// Parses a clip id (`shake-head` is accepted).
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.id() == normalized)
    }

    /// Loop period in seconds.
    pub fn period(&self) -> f64 {
        match self {
            AnimationClip::Idle => 4.0,
            AnimationClip::Walk => 1.0,
            AnimationClip::Run => 0.6,
            AnimationClip::Jump => 0.8,
            AnimationClip::Wave => 1.5,
            AnimationClip::Dance => 4.0,
            AnimationClip::Clap => 1.2,
            AnimationClip::Nod => 1.0,
            AnimationClip::ShakeHead => 1.0,
            AnimationClip::Talk => 2.0,
        }
    }
}

/// Pose engine mode as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseStateMode {
    Idle,
    Static,
    Animated,
}

/// Serializable snapshot of the pose engine.
///
/// Exactly one of `pose_id` and `animation_id` is set unless the mode is idle,
/// in which case both are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseState {
    pub mode: PoseStateMode,
    pub pose_id: Option<String>,
    pub animation_id: Option<String>,
    pub is_playing: bool,
    pub playback_speed: f64,
    pub elapsed_time: f64,
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            mode: PoseStateMode::Idle,
            pose_id: None,
            animation_id: None,
            is_playing: false,
            playback_speed: 1.0,
            elapsed_time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_ids_round_trip() {
        for pose in PosePreset::ALL {
            assert_eq!(PosePreset::from_id(pose.id()), Some(pose));
            assert_eq!(serde_json::to_value(pose).unwrap(), pose.id());
        }
        assert_eq!(PosePreset::from_id("T-Pose"), Some(PosePreset::Tpose));
        assert_eq!(PosePreset::from_id("moonwalk"), None);
    }

    #[test]
    fn test_clip_ids_round_trip() {
        for clip in AnimationClip::ALL {
            assert_eq!(AnimationClip::from_id(clip.id()), Some(clip));
            assert!(clip.period() > 0.0);
        }
        assert_eq!(
            AnimationClip::from_id("shake-head"),
            Some(AnimationClip::ShakeHead)
        );
    }
}
