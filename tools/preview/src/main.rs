//! Diagnostic previewer — writes two PNG debug images to data/debug/.
//! Not part of the main pipeline; no tests, no clippy target.

use std::fs;
use std::path::Path;

use glam::{Mat4, Vec3, Vec4};
use image::{Rgb, RgbImage};
use wisp_core::displacement::Displacement;
use wisp_core::mesh::{SkirtGrid, DEFAULT_EXTENT};
use wisp_core::params::DeformParams;
use wisp_core::transforms::FrameTransforms;
use wisp_core::vertex::shade_vertex;

const W: u32 = 640;
const H: u32 = 360;
/// Time at which the debug frame is evaluated (seconds).
const DEBUG_TIME: f32 = 1.3;
/// Grid density for the point-splat render.
const SPLAT_DETAILS: usize = 256;

// ── Colour helpers ────────────────────────────────────────────────────────────

/// Signed value → diverging blue/white/red, saturating at ±vmax.
fn diverge(v: f32, vmax: f32) -> [u8; 3] {
    let t = (v / vmax).clamp(-1.0, 1.0);
    if t < 0.0 {
        let k = (255.0 * (1.0 + t)) as u8;
        [k, k, 255]
    } else {
        let k = (255.0 * (1.0 - t)) as u8;
        [255, k, k]
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let params = DeformParams {
        time: DEBUG_TIME,
        flare: 0.2,
        color: Vec4::new(0.9, 0.15, 0.1, 1.0),
        ..DeformParams::default()
    };

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir).expect("cannot create data/debug/");

    println!("Rendering displacement heatmap ({W}×{H})…");
    let heatmap = render_heatmap(&params);
    heatmap
        .save(out_dir.join("displacement.png"))
        .expect("cannot write displacement.png");

    println!("Rendering shaded splat ({W}×{H})…");
    let shaded = render_shaded(&params);
    shaded
        .save(out_dir.join("shaded.png"))
        .expect("cannot write shaded.png");

    println!("Done. Images in {}", out_dir.display());
}

/// Unwrapped parameter plane: angle across, height down, offset as colour.
/// Row 0 is the waistband and must come out neutral (zero offset).
fn render_heatmap(params: &DeformParams) -> RgbImage {
    let field = Displacement::from_params(params);
    // Envelope bound at the hem; the flare term widens it.
    let vmax = 0.8 * DEFAULT_EXTENT * DEFAULT_EXTENT * (1.0 + params.flare.abs());

    let mut img = RgbImage::new(W, H);
    for py in 0..H {
        let height = py as f32 / (H - 1) as f32 * DEFAULT_EXTENT;
        for px in 0..W {
            let angle = px as f32 / W as f32 * std::f32::consts::TAU;
            let dr = field.sample(height, angle);
            img.put_pixel(px, py, Rgb(diverge(dr, vmax)));
        }
    }
    img
}

/// Point-splat render through the full per-vertex routine: clip-space
/// projection with a depth test, view-space lambert shading.
fn render_shaded(params: &DeformParams) -> RgbImage {
    let grid = SkirtGrid::new(SPLAT_DETAILS, DEFAULT_EXTENT)
        .expect("preview grid parameters are valid");
    // Match the finite-difference step to this grid's density.
    let params = DeformParams { y_step: grid.y_step, ..*params };

    let eye = Vec3::new(1.1, 0.5, 1.1);
    let center = Vec3::new(0.0, -0.25, 0.0);
    let model_view = Mat4::look_at_rh(eye, center, Vec3::Y);
    let projection = Mat4::perspective_rh(45f32.to_radians(), W as f32 / H as f32, 0.1, 10.0);
    let transforms = FrameTransforms::from_model_view(model_view, projection);

    let mut img = RgbImage::from_pixel(W, H, Rgb([24, 24, 32]));
    let mut depth = vec![f32::INFINITY; (W * H) as usize];

    // Headlight along the view axis.
    let light = Vec3::Z;

    for &pv in &grid.vertices {
        let shaded = shade_vertex(pv, &params, &transforms);

        let clip = shaded.clip_position;
        if clip.w <= 0.0 {
            continue;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            continue;
        }
        let px = ((ndc.x + 1.0) * 0.5 * (W - 1) as f32) as i64;
        let py = ((1.0 - ndc.y) * 0.5 * (H - 1) as f32) as i64;

        let lambert = shaded.view_normal.dot(light).max(0.0);
        let shade = 0.15 + 0.85 * lambert;
        let rgb = Rgb([
            (shaded.color.x * shade * 255.0) as u8,
            (shaded.color.y * shade * 255.0) as u8,
            (shaded.color.z * shade * 255.0) as u8,
        ]);

        // 2×2 splat with a per-pixel depth test.
        for dy in 0..2i64 {
            for dx in 0..2i64 {
                let (x, y) = (px + dx, py + dy);
                if x < 0 || y < 0 || x >= W as i64 || y >= H as i64 {
                    continue;
                }
                let idx = (y as u32 * W + x as u32) as usize;
                if ndc.z < depth[idx] {
                    depth[idx] = ndc.z;
                    img.put_pixel(x as u32, y as u32, rgb);
                }
            }
        }
    }
    img
}
