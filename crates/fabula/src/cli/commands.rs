//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fabula - illustrated, narrated three-scene stories from a theme
#[derive(Parser, Debug)]
#[command(name = "fabula")]
#[command(about = "Generate, narrate and export illustrated three-scene stories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story for a theme, narrate it, and navigate it
    Tell {
        /// The story theme, e.g. "a brave knight and a friendly dragon"
        #[arg(long)]
        theme: String,

        /// Export the finished story as an MP4 at this path
        #[arg(long)]
        export: Option<PathBuf>,

        /// Skip narration (silent engine)
        #[arg(long)]
        quiet: bool,

        /// Directory for generated scene images
        #[arg(long, default_value = "story-output")]
        work_dir: PathBuf,

        /// Also save the story as JSON at this path
        #[arg(long)]
        save_json: Option<PathBuf>,

        /// Exit after narration instead of entering the navigation loop
        #[arg(long)]
        no_interact: bool,
    },

    /// Export a previously saved story JSON as an MP4
    Export {
        /// Path to a story JSON saved with `tell --save-json`
        #[arg(long)]
        story: PathBuf,

        /// Output MP4 path
        #[arg(long, default_value = "story.mp4")]
        out: PathBuf,
    },
}
