//! Command-line arguments and the optional TOML config file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use avatar_cropper_core::{CropShape, CropperConfig, Size, Vec2};
use clap::Parser;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(
    name = "avatar-cropper-demo",
    version,
    about = "Replay crop gestures on an image and write the avatar as PNG"
)]
pub struct Cli {
    /// Source image (JPEG or PNG)
    pub input: PathBuf,

    /// Where to write the cropped PNG
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output shape: square or circle
    #[arg(long)]
    pub shape: Option<CropShape>,

    /// Simulated viewport size, e.g. 400x400
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<Size>,

    /// Pinch zoom factor applied about the viewport center
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Drag delta in screen units, e.g. -20,15
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    pub pan: Option<Vec2>,

    /// Double tap at a screen position, e.g. 200,200
    #[arg(long = "double-tap", value_parser = parse_vec2)]
    pub double_tap: Option<Vec2>,

    /// TOML file with `shape`, `viewport` and a `[cropper]` table
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

/// Contents of the `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub shape: Option<CropShape>,
    pub viewport: Option<Size>,
    pub cropper: CropperConfig,
}

impl DemoConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: DemoConfig = toml::from_str(content)?;
        config.cropper.validate()?;
        Ok(config)
    }
}

fn parse_pair(s: &str, separators: &[char]) -> Result<(f32, f32), String> {
    let (a, b) = s
        .split_once(separators)
        .ok_or_else(|| format!("expected two numbers separated by one of {:?}", separators))?;
    let a: f32 = a.trim().parse().map_err(|e| format!("{a:?}: {e}"))?;
    let b: f32 = b.trim().parse().map_err(|e| format!("{b:?}: {e}"))?;
    Ok((a, b))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (width, height) = parse_pair(s, &['x', 'X'])?;
    let size = Size::new(width, height);
    if !size.is_positive() {
        return Err(format!("viewport must be positive, got {s}"));
    }
    Ok(size)
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = parse_pair(s, &[','])?;
    Ok(Vec2::new(x, y))
}
