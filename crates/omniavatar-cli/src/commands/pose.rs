//! Pose command implementation
//!
//! Runs the pose state machine and prints the resulting joint rotations.

use anyhow::{anyhow, Result};
use colored::Colorize;
use omniavatar_engine::{JointRotations, PoseEngine};
use omniavatar_spec::{AnimationClip, PosePreset, PoseState};
use serde::Serialize;
use std::process::ExitCode;

use super::print_json;

/// Pose selection shared by the commands that build a scene.
#[derive(Debug, Clone, Default)]
pub struct PoseArgs {
    pub pose: Option<String>,
    pub animation: Option<String>,
    /// Seconds of playback to advance.
    pub time: f64,
    pub speed: Option<f64>,
}

impl PoseArgs {
    /// Builds the engine: speed first, then selection, then playback time.
    pub fn engine(&self) -> Result<PoseEngine> {
        let mut engine = PoseEngine::new();
        if let Some(speed) = self.speed {
            engine
                .set_speed(speed)
                .map_err(|e| anyhow!("{} ({})", e, e.code()))?;
        }
        if let Some(animation) = &self.animation {
            engine.select_animation(animation);
        } else if let Some(pose) = &self.pose {
            engine.select_pose(pose);
        }
        engine.advance(self.time);
        Ok(engine)
    }
}

#[derive(Debug, Serialize)]
struct PoseOutput {
    state: PoseState,
    rotations: JointRotations,
}

/// Run the pose command
///
/// `list` prints the available pose and animation ids instead.
pub fn run(args: &PoseArgs, list: bool, json_output: bool) -> Result<ExitCode> {
    if list {
        return list_ids(json_output);
    }

    let engine = args.engine()?;
    let state = engine.state();
    let rotations = engine.rotations();

    if json_output {
        print_json(&PoseOutput { state, rotations })?;
        return Ok(ExitCode::SUCCESS);
    }

    let selection = state
        .animation_id
        .as_deref()
        .or(state.pose_id.as_deref())
        .unwrap_or("idle");
    println!("{} {}", "Pose:".cyan().bold(), selection);
    if state.animation_id.is_some() {
        println!(
            "{} t={:.3}s speed={} playing={}",
            "Playback:".dimmed(),
            state.elapsed_time,
            state.playback_speed,
            state.is_playing
        );
    }
    for (joint, [x, y, z]) in rotations.entries() {
        println!("  {:<10} [{:>7.3}, {:>7.3}, {:>7.3}]", joint.name(), x, y, z);
    }
    Ok(ExitCode::SUCCESS)
}

fn list_ids(json_output: bool) -> Result<ExitCode> {
    let poses: Vec<&str> = PosePreset::ALL.iter().map(|p| p.id()).collect();
    let clips: Vec<&str> = AnimationClip::ALL.iter().map(|c| c.id()).collect();
    if json_output {
        print_json(&serde_json::json!({ "poses": poses, "animations": clips }))?;
    } else {
        println!("{} {}", "Poses:".cyan().bold(), poses.join(", "));
        println!("{} {}", "Animations:".cyan().bold(), clips.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniavatar_engine::PoseMode;

    #[test]
    fn test_animation_wins_over_pose() {
        let args = PoseArgs {
            pose: Some("sitting".to_string()),
            animation: Some("walk".to_string()),
            time: 0.5,
            speed: Some(2.0),
        };
        let engine = args.engine().unwrap();
        match engine.mode() {
            PoseMode::Animating { elapsed, speed, .. } => {
                assert_eq!(speed, 2.0);
                assert!((elapsed - 1.0).abs() < 1e-12);
            }
            other => panic!("expected animation, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_speed_is_rejected() {
        let args = PoseArgs {
            speed: Some(-1.0),
            ..PoseArgs::default()
        };
        let err = args.engine().unwrap_err();
        assert!(err.to_string().contains("E006"));
    }

    #[test]
    fn test_no_selection_is_tpose() {
        let engine = PoseArgs::default().engine().unwrap();
        assert_eq!(engine.rotations(), JointRotations::tpose());
    }
}
