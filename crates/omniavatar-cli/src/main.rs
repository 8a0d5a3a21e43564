//! OmniAvatar CLI - build, pose, and export parametric avatars
//!
//! This binary provides commands for creating and validating avatar profiles,
//! inspecting their measurements and assembled scene, running the pose engine,
//! exporting to GLB/glTF/OBJ/JSON/PNG, and managing saved avatars.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use omniavatar_cli::commands::{self, pose::PoseArgs};
use omniavatar_cli::input;

/// OmniAvatar - Parametric Humanoid Avatar Engine
#[derive(Parser)]
#[command(name = "omniavatar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Pose selection flags shared by assemble and export.
#[derive(clap::Args, Debug, Clone, Default)]
struct PoseFlags {
    /// Static pose preset id
    #[arg(long, conflicts_with = "animation")]
    pose: Option<String>,

    /// Animation clip id
    #[arg(long)]
    animation: Option<String>,

    /// Seconds of animation playback
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Playback speed multiplier
    #[arg(long)]
    speed: Option<f64>,
}

impl From<PoseFlags> for PoseArgs {
    fn from(flags: PoseFlags) -> Self {
        PoseArgs {
            pose: flags.pose,
            animation: flags.animation,
            time: flags.time,
            speed: flags.speed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new profile with neutral sliders
    New {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Profile id (default: derived from the name)
        #[arg(long)]
        id: Option<String>,

        /// Outfit preset (business, casual, streetwear, formal, worker)
        #[arg(long)]
        outfit: Option<String>,

        /// Output profile path
        #[arg(short, long)]
        out: String,
    },

    /// Validate a profile file
    Validate {
        /// Path to the profile (JSON)
        profile: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print body measurements of a profile
    Measure {
        /// Path to the profile (JSON)
        profile: String,

        /// Also list every dimension in meters
        #[arg(long)]
        all: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble a profile and print its scene summary
    Assemble {
        /// Path to the profile (JSON)
        profile: String,

        #[command(flatten)]
        pose: PoseFlags,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the pose engine and print joint rotations
    Pose {
        #[command(flatten)]
        pose: PoseFlags,

        /// List pose and animation ids
        #[arg(long)]
        list: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Export an assembled profile
    Export {
        /// Path to the profile (JSON)
        profile: String,

        /// Output format (glb, gltf, obj, json, png); inferred from --out if omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Output file path
        #[arg(short, long)]
        out: String,

        #[command(flatten)]
        pose: PoseFlags,
    },

    /// Generate a random profile
    Randomize {
        /// Seed (default: time-based)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Output profile path
        #[arg(short, long)]
        out: String,
    },

    /// Manage saved avatars
    Store {
        /// Saved-avatar file (default: <data dir>/omniavatar/avatars.json)
        #[arg(long, global = true)]
        store: Option<PathBuf>,

        #[command(subcommand)]
        command: StoreCommands,
    },
}

#[derive(Subcommand)]
enum StoreCommands {
    /// Save a profile file, replacing any entry with the same id
    Save {
        /// Path to the profile (JSON)
        profile: String,
    },

    /// List saved avatars
    List {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a saved avatar to a profile file
    Load {
        /// Avatar id
        id: String,

        /// Output profile path
        #[arg(short, long)]
        out: String,
    },

    /// Delete a saved avatar
    Delete {
        /// Avatar id
        id: String,
    },
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    // Logs go to stderr so --json output on stdout stays parseable.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = input::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::New {
            name,
            id,
            outfit,
            out,
        } => commands::new::run(&name, id.as_deref(), outfit.as_deref(), &out),
        Commands::Validate { profile, json } => commands::validate::run(&profile, json),
        Commands::Measure { profile, all, json } => commands::measure::run(&profile, all, json),
        Commands::Assemble {
            profile,
            pose,
            json,
        } => commands::assemble::run(&profile, &pose.into(), &config, json),
        Commands::Pose { pose, list, json } => commands::pose::run(&pose.into(), list, json),
        Commands::Export {
            profile,
            format,
            out,
            pose,
        } => commands::export::run(&profile, format.as_deref(), &out, &pose.into(), &config),
        Commands::Randomize { seed, out } => commands::randomize::run(seed, &out),
        Commands::Store { store, command } => {
            let store_path = input::store_path(store.as_deref())?;
            match command {
                StoreCommands::Save { profile } => commands::store::save(&store_path, &profile),
                StoreCommands::List { json } => commands::store::list(&store_path, json),
                StoreCommands::Load { id, out } => commands::store::load(&store_path, &id, &out),
                StoreCommands::Delete { id } => commands::store::delete(&store_path, &id),
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
