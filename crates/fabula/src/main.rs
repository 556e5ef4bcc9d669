//! Fabula CLI binary.
//!
//! This binary provides command-line access to Fabula's functionality:
//! - Generate and narrate a three-scene illustrated story from a theme
//! - Export a generated story as an MP4 slideshow

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, run_export, run_tell};

    // Load .env (for GEMINI_API_KEY) before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Tell {
            theme,
            export,
            quiet,
            work_dir,
            save_json,
            no_interact,
        } => {
            run_tell(cli::TellOptions {
                theme,
                export,
                quiet,
                work_dir,
                save_json,
                no_interact,
            })
            .await?;
        }

        Commands::Export { story, out } => {
            run_export(&story, &out).await?;
        }
    }

    Ok(())
}
