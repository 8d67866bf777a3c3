/*
 * Neural Field
 *
 * Opens a window showing the particle field, or with --headless runs the
 * engine for a fixed number of frames against a recording surface and
 * reports what it drew.
 */

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use neural_field::{app, AppConfig, LifecycleController, QueuedHost, RecordingSurface, Theme, Viewport};

// Frame interval reported to the engine in headless runs
const HEADLESS_FRAME: Duration = Duration::from_micros(16_667);

#[derive(Parser, Debug)]
#[command(name = "neural-field", version, about = "Interactive particle-field backdrop")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour theme, overrides the config file
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Seed for a reproducible particle layout
    #[arg(long)]
    seed: Option<u64>,

    /// Number of particles, overrides the config file
    #[arg(long)]
    particles: Option<usize>,

    /// Run this many frames without a window and print a summary
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Viewport used by --headless, as WIDTHxHEIGHT
    #[arg(long, default_value = "800x600", value_parser = parse_viewport)]
    viewport: Viewport,
}

fn parse_viewport(text: &str) -> Result<Viewport, String> {
    let (w, h) = text
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{}`", text))?;
    let width: f32 = w.trim().parse().map_err(|_| format!("bad width `{}`", w))?;
    let height: f32 = h.trim().parse().map_err(|_| format!("bad height `{}`", h))?;
    Ok(Viewport::new(width, height))
}

// Config file first, then command line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("could not load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    if let Some(seed) = args.seed {
        config.field.seed = Some(seed);
    }
    if let Some(particles) = args.particles {
        config.field.particle_count = particles;
    }

    config.validate()?;
    Ok(config)
}

// Returns the terminated controller so callers can inspect the run
fn run_headless(config: AppConfig, frames: u64, viewport: Viewport) -> LifecycleController<QueuedHost> {
    let mut controller = LifecycleController::new(QueuedHost::new(viewport), config.field, config.theme);
    controller.start();

    let mut surface = RecordingSurface::new();
    let mut total_edges = 0usize;
    for _ in 0..frames {
        surface.reset();
        if !controller.pump(HEADLESS_FRAME, Some(&mut surface)) {
            break;
        }
        total_edges += controller.last_stats().edges;
    }

    let rendered = controller.frames_rendered();
    controller.terminate();

    let mean_edges = if rendered > 0 {
        total_edges as f64 / rendered as f64
    } else {
        0.0
    };
    info!(
        "headless run: {} frames, {} particles, {:.1} links per frame",
        rendered,
        controller.params().particle_count,
        mean_edges
    );
    controller
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    match args.headless {
        Some(frames) => {
            run_headless(config, frames, args.viewport);
        }
        None => app::launch(config),
    }

    Ok(())
}
