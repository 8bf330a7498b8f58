//! Avatar cropper demo.
//!
//! Loads an image on a blocking worker, fits it into a simulated viewport,
//! replays the requested gestures through a [`CropSession`] and writes the
//! cropped avatar as PNG.

mod cli;

use std::time::Duration;

use anyhow::{bail, Context};
use avatar_cropper_core::decode::load_source;
use avatar_cropper_core::{
    AnimationStatus, CropSession, DecodedImage, ImageSource, LoadTracker, Size, Vec2,
};
use clap::Parser;
use log::{debug, info};

use cli::{Cli, DemoConfig};

const DEFAULT_VIEWPORT: Size = Size::new(400.0, 400.0);

/// Simulated display refresh for the double-tap animation.
const FRAME: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    let shape = cli.shape.or(config.shape).unwrap_or_default();
    let viewport = cli.viewport.or(config.viewport).unwrap_or(DEFAULT_VIEWPORT);

    let mut tracker = LoadTracker::new();
    let image = load(&mut tracker, ImageSource::File(cli.input.clone())).await?;
    info!(
        "Loaded {} ({}x{})",
        cli.input.display(),
        image.width,
        image.height
    );

    let mut session = CropSession::with_config(shape, config.cropper);
    session.resize(viewport);
    if !session.load_image(image.width, image.height) {
        bail!("Image {} has no pixels", cli.input.display());
    }

    replay(&mut session, &cli, viewport);

    let avatar = session.crop(&image).context("Crop failed")?;
    let output = avatar
        .to_rgba_image()
        .context("Cropped buffer does not match its dimensions")?;
    output
        .save_with_format(&cli.output, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    info!(
        "Wrote {} avatar {}x{} to {}",
        shape,
        avatar.width,
        avatar.height,
        cli.output.display()
    );
    Ok(())
}

/// Decode `source` off the async runtime and accept it through `tracker`.
async fn load(
    tracker: &mut LoadTracker<ImageSource>,
    source: ImageSource,
) -> anyhow::Result<DecodedImage> {
    let ticket = tracker.begin(source.clone());
    let decoded = tokio::task::spawn_blocking(move || load_source(&source))
        .await
        .context("Decode worker panicked")?;

    let label = ticket.source().to_string();
    tracker
        .complete(ticket, decoded)
        .context("Load was superseded")?
        .with_context(|| format!("Failed to decode {}", label))
}

/// Apply the scripted gestures in a fixed order: pinch, drag, double tap.
fn replay(session: &mut CropSession, cli: &Cli, viewport: Size) {
    let center = viewport.center();

    if let Some(zoom) = cli.zoom {
        session.pinch(center, Vec2::ZERO, zoom);
        debug!("Pinch x{} -> scale {:.4}", zoom, session.state().scale());
    }

    if let Some(delta) = cli.pan {
        session.drag(delta);
        debug!("Drag {:?} -> offset {:?}", delta, session.state().offset());
    }

    if let Some(position) = cli.double_tap {
        if session.double_tap(position).is_some() {
            let mut frames = 0;
            loop {
                match session.tick(FRAME) {
                    AnimationStatus::Running(_) => frames += 1,
                    AnimationStatus::Finished(snapshot) => {
                        debug!(
                            "Double tap settled after {} frames at scale {:.4}",
                            frames + 1,
                            snapshot.scale
                        );
                        break;
                    }
                    AnimationStatus::Idle => break,
                }
            }
        }
    }
}
