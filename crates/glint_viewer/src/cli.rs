use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::LightingMode;
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Lighting modes as command-line values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Combined,
    ObservedArea,
    Radiance,
    Brdf,
}

impl From<ModeArg> for LightingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Combined => LightingMode::Combined,
            ModeArg::ObservedArea => LightingMode::ObservedArea,
            ModeArg::Radiance => LightingMode::Radiance,
            ModeArg::Brdf => LightingMode::Brdf,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Lambert room with Cook-Torrance spheres and culled triangles
    Reference,
    /// Lambert room with an OBJ mesh (needs --obj)
    Bunny,
    /// A lit floor and a single sphere
    Plane,
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A Whitted-style CPU ray tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "reference")]
    pub scene: SceneKind,

    /// OBJ file for the bunny scene
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// JSON render config; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Lighting term to show
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Skip shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    /// Render worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// Scene time in seconds; meshes spin a quarter turn per second
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Output file path (format from extension)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Render every lighting mode in cycle order, one file each
    #[arg(long)]
    pub all_modes: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
