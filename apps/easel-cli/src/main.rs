use anyhow::Context;
use clap::{Parser, Subcommand};
use easel_scene::{SceneFile, SceneManager};
use easel_surface::{Canvas, CanvasRegistry};
use easel_tools::SceneInspector;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "easel-cli", about = "CLI tool for easel scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render a scene file to a PNG image
    Render {
        /// Scene description file (.yaml, .yml or .json)
        scene: PathBuf,
        /// Output image path
        #[arg(short, long, default_value = "scene.png")]
        out: PathBuf,
        /// Number of render passes to run before writing the image
        #[arg(short, long, default_value = "1")]
        frames: u32,
        /// Force dev mode on, enabling component size warnings
        #[arg(long)]
        dev: bool,
    },
    /// Render a scene file once and print what it contains
    Inspect {
        /// Scene description file (.yaml, .yml or .json)
        scene: PathBuf,
        /// Force dev mode on, enabling component size warnings
        #[arg(long)]
        dev: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("easel-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", easel_common::crate_info());
            println!("surface: {}", easel_surface::crate_info());
            println!("scene: {}", easel_scene::crate_info());
            println!("tools: {}", easel_tools::crate_info());
        }
        Commands::Render {
            scene,
            out,
            frames,
            dev,
        } => {
            let mut manager = open_scene(&scene, dev)?;
            for _ in 0..frames {
                manager.render().context("render pass failed")?;
            }
            let stats = manager.frame_stats();
            println!(
                "Rendered {} frame(s): {} component(s), {} warning(s), last frame {:?}",
                stats.frame,
                stats.components_drawn,
                stats.warnings.len(),
                stats.frame_time
            );

            manager
                .surface()
                .to_image()
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        Commands::Inspect { scene, dev } => {
            let mut manager = open_scene(&scene, dev)?;
            if let Err(e) = manager.render() {
                tracing::error!("render pass failed: {e}");
                match SceneInspector::render_failure(&manager, &e) {
                    Some(failure) => println!("{failure}"),
                    None => println!("Render failed: {e}"),
                }
            }

            println!("{}", SceneInspector::summary(&manager));
            for id in manager.component_ids() {
                if let Some(info) = SceneInspector::inspect_component(&manager, id) {
                    println!("  {info}");
                }
            }
            let oversized = SceneInspector::oversized(&manager);
            if oversized.is_empty() {
                println!("All components fit the scene");
            } else {
                for (id, warning) in oversized {
                    println!("  [{}] {warning}", id.short());
                }
            }
        }
    }

    Ok(())
}

/// Load a scene file and build it against an in-memory canvas host.
fn open_scene(path: &Path, force_dev: bool) -> anyhow::Result<SceneManager<Canvas>> {
    let mut file = SceneFile::load(path)
        .with_context(|| format!("failed to load scene file {}", path.display()))?;
    if force_dev {
        file.scene.dev_mode = true;
    }
    let mut host = CanvasRegistry::new().with_target(file.scene.target_id.clone());
    let manager = file.build(&mut host)?;
    tracing::info!(components = manager.len(), "scene ready");
    Ok(manager)
}
