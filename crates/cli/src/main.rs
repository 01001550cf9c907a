use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hangview::model::{Scene, ViewParams};
use hangview::scene::{build_preview, estimate_max_drop, rotation_frames, Preview};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run the hanging-sphere preview engine on a scene file")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write the depth-ordered primitives for one view
    Preview {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Write one preview per rotation step (animated export sequence)
    Frames {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 36)]
        count: usize,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Overrides for the view stored in the scene file.
#[derive(Args, Clone, Debug, Default)]
struct ViewArgs {
    #[arg(long)]
    rotation_deg: Option<f64>,
    #[arg(long)]
    strength: Option<f64>,
    #[arg(long)]
    perspective: Option<f64>,
    #[arg(long)]
    layer_spread: Option<f64>,
}

impl ViewArgs {
    fn apply(&self, mut view: ViewParams) -> ViewParams {
        if let Some(v) = self.rotation_deg {
            view.rotation_deg = v;
        }
        if let Some(v) = self.strength {
            view.rotation_strength = v;
        }
        if let Some(v) = self.perspective {
            view.perspective_factor = v;
        }
        if let Some(v) = self.layer_spread {
            view.layer_spread_in = v;
        }
        view
    }
}

/// Scene file: a `Scene` with an optional stored view.
#[derive(Deserialize)]
struct SceneFile {
    #[serde(flatten)]
    scene: Scene,
    #[serde(default)]
    view: ViewParams,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Preview { scene, out, view } => preview(&scene, &out, &view),
        Action::Frames {
            scene,
            out_dir,
            count,
            view,
        } => frames(&scene, &out_dir, count, &view),
        Action::Report => report(),
    }
}

fn load_scene(path: &Path, overrides: &ViewArgs) -> Result<(Scene, ViewParams)> {
    let bytes = fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
    let file: SceneFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing scene {}", path.display()))?;
    let view = overrides.apply(file.view);
    Ok((file.scene, view))
}

fn write_preview(out: &Path, preview: &Preview) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(preview)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

fn preview(scene_path: &Path, out: &Path, overrides: &ViewArgs) -> Result<()> {
    let (scene, view) = load_scene(scene_path, overrides)?;
    tracing::info!(
        scene = %scene_path.display(),
        out = %out.display(),
        elements = scene.elements.len(),
        rotation_deg = view.rotation_deg,
        "preview"
    );
    let preview = build_preview(&scene, &view);
    if !preview.skipped.is_empty() {
        tracing::warn!(skipped = ?preview.skipped, "elements skipped");
    }
    if !preview.over_ceiling.is_empty() {
        tracing::warn!(
            over_ceiling = ?preview.over_ceiling,
            max_drop_in = preview.max_drop_in,
            ceiling_in = scene.project.ceiling_height_in,
            "geometry passes the ceiling height"
        );
    }
    write_preview(out, &preview)?;
    let payload = Payload::new(
        "preview",
        serde_json::json!({
            "scene": scene_path.to_string_lossy(),
            "view": view,
            "primitives": preview.primitives.len(),
            "max_drop_in": preview.max_drop_in,
        }),
    )
    .with_elements(scene.elements.len());
    write_sidecar(out, payload)?;
    Ok(())
}

fn frames(scene_path: &Path, out_dir: &Path, count: usize, overrides: &ViewArgs) -> Result<()> {
    let (scene, view) = load_scene(scene_path, overrides)?;
    let envelope = estimate_max_drop(&scene, &view);
    tracing::info!(
        scene = %scene_path.display(),
        out_dir = %out_dir.display(),
        count,
        envelope_in = envelope,
        "frames"
    );
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;
    let mut outputs = Vec::with_capacity(count);
    for (i, preview) in rotation_frames(&scene, view, count).enumerate() {
        let out = out_dir.join(format!("frame_{i:03}.json"));
        write_preview(&out, &preview)?;
        outputs.push(out);
    }
    let index = out_dir.join("frames.json");
    let names: Vec<String> = outputs
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    fs::write(&index, serde_json::to_vec_pretty(&names)?)
        .with_context(|| format!("writing {}", index.display()))?;
    let payload = Payload::new(
        "frames",
        serde_json::json!({
            "scene": scene_path.to_string_lossy(),
            "view": view,
            "count": count,
            "envelope_in": envelope,
        }),
    )
    .with_elements(scene.elements.len());
    write_sidecar(&index, payload)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "engine_version": hangview::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
