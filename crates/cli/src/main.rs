use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use raycaster::gen::{draw_scene, FieldCfg, ReplayToken};
use raycaster::{Scene, SceneCfg};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene_file;

use provenance::{write_sidecar, Doc, Payload};
use scene_file::{cast, SceneFile};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Light-area casting runner")]
struct Cmd {
    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute every light's area for a scene file
    Cast {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Also write the player light's sight layers
        #[arg(long)]
        sight: bool,
    },
    /// Write a scene file with the demo obstacles (or a seeded random field)
    Example {
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        #[arg(long)]
        out: PathBuf,
        /// Draw a random obstacle field from this seed instead
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Cast { scene, out, sight } => run_cast(&scene, &out, sight),
        Action::Example {
            width,
            height,
            out,
            seed,
        } => run_example(width, height, &out, seed),
        Action::Report => report(),
    }
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn run_cast(scene_path: &Path, out: &Path, sight: bool) -> Result<()> {
    tracing::info!(scene = %scene_path.display(), out = %out.display(), sight, "cast");
    let scene = SceneFile::read(scene_path)?
        .to_scene()
        .with_context(|| format!("invalid scene {}", scene_path.display()))?;
    let result = cast(&scene, sight);
    let vertices: usize = result.lights.iter().map(|l| l.vertices.len()).sum();
    tracing::info!(lights = result.lights.len(), vertices, "light areas");
    write_json(out, &result)?;
    let payload = Payload::new(
        "cast",
        json!({
            "sight": sight,
            "polygons": scene.polygons().len(),
            "lights": scene.lights().len(),
            "dynamic_collisions": scene.cfg().dynamic_collisions,
        }),
    )
    .with_input(scene_path);
    write_sidecar(out, payload)?;
    Ok(())
}

fn example_scene(width: f64, height: f64, seed: Option<u64>) -> Result<Scene> {
    ensure!(
        width > 0.0 && height > 0.0,
        "canvas must have positive size, got {width}x{height}"
    );
    let scene = match seed {
        Some(seed) => {
            let field = FieldCfg {
                width,
                height,
                ..FieldCfg::default()
            };
            draw_scene(SceneCfg::default(), field, ReplayToken { seed, index: 0 })
        }
        None => {
            let mut scene = Scene::with_boundary_rect(SceneCfg::default(), width, height);
            scene.add_example_polygons();
            scene
        }
    };
    Ok(scene)
}

fn run_example(width: f64, height: f64, out: &Path, seed: Option<u64>) -> Result<()> {
    tracing::info!(width, height, out = %out.display(), seed = ?seed, "example");
    let scene = example_scene(width, height, seed)?;
    write_json(out, &SceneFile::from_scene(&scene))?;
    let payload = Payload::new(
        "example",
        json!({ "width": width, "height": height, "seed": seed }),
    );
    write_sidecar(out, payload)?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = Doc::new(Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
