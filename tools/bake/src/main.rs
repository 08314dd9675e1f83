/// Offline skirt baker: evaluates the deformed skirt over a frame range and
/// writes one Wavefront OBJ per frame, for inspection in any mesh viewer.
///
/// Positions and normals are baked in the skirt's local frame (identity
/// camera); the viewer supplies its own camera.
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wisp_core::mesh::{SkirtGrid, DEFAULT_DETAILS, DEFAULT_EXTENT};
use wisp_core::params::DeformParams;
use wisp_core::vertex::LocalVertex;

#[derive(Parser, Debug)]
#[command(name = "bake", about = "Bake animated skirt frames to Wavefront OBJ")]
struct Args {
    /// Number of frames to bake.
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// Seconds advanced per frame.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,

    /// Output directory (created if absent).
    #[arg(short, long, default_value = "data/bake")]
    out: PathBuf,

    /// Optional JSON file overriding the default animation parameters.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Subdivisions per full turn.
    #[arg(long, default_value_t = DEFAULT_DETAILS)]
    details: usize,

    /// Fixed flare bias applied to every frame (overrides the params file).
    #[arg(long)]
    flare: Option<f32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_json::from_str::<DeformParams>(&text)
                .with_context(|| format!("cannot parse {}", path.display()))?
        }
        None => DeformParams::default(),
    };
    if let Some(flare) = args.flare {
        params.flare = flare;
    }

    let grid = SkirtGrid::new(args.details, DEFAULT_EXTENT)
        .context("invalid grid parameters")?;
    fs::create_dir_all(&args.out)
        .with_context(|| format!("cannot create {}", args.out.display()))?;

    println!(
        "Baking {} frames ({} vertices, {} triangles each)…",
        args.frames,
        grid.vertices.len(),
        grid.indices.len() / 3
    );

    for frame in 0..args.frames {
        params.time = frame as f32 * args.dt;
        let locals = grid.deform_local(&params);

        let path = args.out.join(format!("skirt_{frame:04}.obj"));
        let obj = format_obj(&locals, &grid.indices)?;
        fs::write(&path, obj).with_context(|| format!("cannot write {}", path.display()))?;
    }

    println!("Wrote {} OBJ frames to {}", args.frames, args.out.display());
    Ok(())
}

/// Serialize deformed vertices and shared indices as OBJ text
/// (`v`/`vn` records plus `f` faces with position//normal references).
fn format_obj(locals: &[LocalVertex], indices: &[u32]) -> Result<String> {
    let mut buf = String::with_capacity(locals.len() * 64 + indices.len() * 8);

    for local in locals {
        let p = local.position;
        writeln!(buf, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for local in locals {
        let n = local.normal;
        writeln!(buf, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in indices.chunks_exact(3) {
        // OBJ indices are 1-based.
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(buf, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(buf)
}
