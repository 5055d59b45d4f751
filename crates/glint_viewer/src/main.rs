mod cli;
mod scenes;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glint_renderer::{FrameBuffer, LightingMode, RenderConfig, Renderer};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let config = load_config(&args)?;
    let mut scene = scenes::build(args.scene, args.obj.as_deref())?;
    if args.time != 0.0 {
        scenes::animate(&mut scene, args.time);
    }

    let mut renderer = Renderer::new(config)?;
    let mut buffer = renderer.create_buffer();

    if args.all_modes {
        for _ in 0..LightingMode::ALL.len() {
            let mode = renderer.config().lighting_mode;
            renderer.render(&mut scene, &mut buffer)?;
            save_frame(&buffer, &mode_output_path(&args.output, mode))?;
            renderer.cycle_lighting_mode();
        }
    } else {
        renderer.render(&mut scene, &mut buffer)?;
        save_frame(&buffer, &args.output)?;
    }

    Ok(())
}

/// Config file values (or defaults), then command-line overrides.
fn load_config(args: &Args) -> Result<RenderConfig> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: RenderConfig = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            log::info!("Loaded render config from {}", path.display());
            config
        }
        None => RenderConfig::default(),
    };

    Ok(apply_overrides(config, args))
}

fn apply_overrides(mut config: RenderConfig, args: &Args) -> RenderConfig {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(mode) = args.mode {
        config.lighting_mode = mode.into();
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if args.no_shadows {
        config.shadows_enabled = false;
    }
    config
}

/// `render.png` becomes `render_brdf.png` for the brdf mode.
fn mode_output_path(output: &Path, mode: LightingMode) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "render".to_string());
    let file_name = match output.extension() {
        Some(ext) => format!("{}_{}.{}", stem, mode, ext.to_string_lossy()),
        None => format!("{}_{}", stem, mode),
    };
    output.with_file_name(file_name)
}

fn save_frame(buffer: &FrameBuffer, path: &Path) -> Result<()> {
    let image = image::RgbImage::from_raw(buffer.width, buffer.height, buffer.to_rgb8())
        .ok_or_else(|| anyhow!("Frame buffer does not match {}x{}", buffer.width, buffer.height))?;
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    log::info!("Saved {}", path.display());
    Ok(())
}
