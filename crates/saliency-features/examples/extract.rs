//! Example: saliency feature maps for one or more images.
//!
//! Loads each input as RGB in [0, 1], runs `FeatureExtractor` with a shared
//! configuration and writes a JSON summary (per-map size and value range).
//! With `--dump-dir`, every canonical map is also saved as a grayscale PNG
//! stretched to its own min/max. Inputs that fail to decode or extract are
//! logged and skipped.
//!
//! Run from the workspace root:
//!   cargo run -p saliency-features --example extract -- --help
//!   cargo run -p saliency-features --example extract -- data/a.png data/b.png --dump-dir out

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use image::{GrayImage, ImageReader, Luma};
use saliency_features::{FeatureConfig, FeatureExtractor, FeatureMaps, Image, ImageView};
use serde::Serialize;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Extract intensity, color-opponency and orientation feature maps")]
struct Args {
    /// Input images (any format the `image` crate decodes)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with a (partial) FeatureConfig; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of pyramid levels
    #[arg(long)]
    levels: Option<usize>,

    /// Override the channel selection, e.g. "DIO" or "IO"
    #[arg(long)]
    channels: Option<String>,

    /// Output JSON path (default: stdout)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for PNG dumps of the canonical maps
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MapSummary {
    channel: String,
    level: usize,
    native_size: (usize, usize),
    min: f32,
    max: f32,
    mean: f32,
}

#[derive(Serialize)]
struct ImageSummary {
    path: String,
    width: usize,
    height: usize,
    elapsed_ms: f64,
    maps: Vec<MapSummary>,
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a FeatureConfig,
    images: Vec<ImageSummary>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let default = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<FeatureConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => FeatureConfig::default(),
    };

    if let Some(levels) = args.levels {
        cfg.pyramid_levels = levels;
    }
    if let Some(channels) = &args.channels {
        cfg.channels = channels
            .parse()
            .with_context(|| format!("parsing --channels {channels}"))?;
    }
    Ok(cfg)
}

fn load_rgb(path: &Path) -> Result<Image<[f32; 3]>> {
    let rgb = ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .into_rgb32f();

    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let pixels = rgb.pixels().map(|p| p.0).collect();
    Image::from_vec(w, h, pixels).context("building RGB image")
}

fn stats(map: &Image<f32>) -> (f32, f32, f32) {
    let data = map.data();
    if data.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let min = data.iter().copied().fold(f32::INFINITY, f32::min);
    let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / data.len() as f64;
    (min, max, mean as f32)
}

fn summarize(maps: &FeatureMaps) -> Vec<MapSummary> {
    let mut out = Vec::new();
    for (channel, ch) in maps.iter() {
        for fm in ch.native() {
            let (min, max, mean) = stats(&fm.map);
            out.push(MapSummary {
                channel: maps.channel_name(channel),
                level: fm.level,
                native_size: fm.map.dims(),
                min,
                max,
                mean,
            });
        }
    }
    out
}

fn to_gray(map: &Image<f32>) -> GrayImage {
    let (min, max, _) = stats(map);
    let span = if max > min { max - min } else { 1.0 };
    GrayImage::from_fn(map.width() as u32, map.height() as u32, |x, y| {
        let v = map.get(x as usize, y as usize).copied().unwrap_or(min);
        Luma([(((v - min) / span) * 255.0).round().clamp(0.0, 255.0) as u8])
    })
}

fn dump_maps(dir: &Path, stem: &str, maps: &FeatureMaps) -> Result<usize> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = 0;
    for (channel, ch) in maps.iter() {
        for fm in ch.canonical() {
            let name = format!("{stem}_{}_L{}.png", maps.channel_name(channel), fm.level);
            let path = dir.join(name);
            to_gray(&fm.map)
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            written += 1;
        }
    }
    Ok(written)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let cfg = load_config(&args)?;
    let extractor = FeatureExtractor::new(cfg).context("invalid feature configuration")?;
    info!(
        levels = extractor.config().pyramid_levels,
        channels = %extractor.config().channels,
        angles = extractor.bank().len(),
        "extractor ready"
    );

    let mut images = Vec::with_capacity(args.inputs.len());
    let mut failures = 0usize;
    let total_start = Instant::now();

    for path in &args.inputs {
        let img = match load_rgb(path) {
            Ok(img) => img,
            Err(err) => {
                warn!(path = %path.display(), err = %format!("{err:#}"), "skipping unreadable image");
                failures += 1;
                continue;
            }
        };
        let view: ImageView<'_, [f32; 3]> = img.as_view();

        let t0 = Instant::now();
        let maps = match extractor.extract(&view) {
            Ok(maps) => maps,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping image");
                failures += 1;
                continue;
            }
        };
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
        info!(
            path = %path.display(),
            maps = maps.len(),
            elapsed_ms,
            "extracted"
        );

        if let Some(dir) = &args.dump_dir {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".into());
            let n = dump_maps(dir, &stem, &maps)?;
            info!(count = n, dir = %dir.display(), "dumped canonical maps");
        }

        images.push(ImageSummary {
            path: path.display().to_string(),
            width: img.width(),
            height: img.height(),
            elapsed_ms,
            maps: summarize(&maps),
        });
    }

    let total_ms = total_start.elapsed().as_secs_f64() * 1e3;
    info!(images = images.len(), total_ms, "done");

    let report = Report {
        config: extractor.config(),
        images,
    };
    match &args.out {
        Some(out) => {
            let file = std::fs::File::create(out)
                .with_context(|| format!("creating {}", out.display()))?;
            serde_json::to_writer_pretty(file, &report)
                .with_context(|| format!("writing JSON to {}", out.display()))?;
            info!(path = %out.display(), "report written");
        }
        None => {
            let text = serde_json::to_string_pretty(&report).context("serializing report")?;
            println!("{text}");
        }
    }

    if failures == args.inputs.len() {
        bail!("no image could be processed");
    }
    Ok(())
}
