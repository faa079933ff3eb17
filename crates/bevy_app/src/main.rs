/*!
bubble_pop: window bootstrap for the bubble-popping game.

* Layered RON config (`assets/config/game.ron`, `assets/config/game.local.ron`, then any
  `--config` layers) with CLI overrides on top.
* Fatal config problems abort before a window opens; warnings are logged once logging is up.
* Seed from `--seed`, then `rng_seed` in config, then entropy.
*/

use anyhow::{Context, Result};
use bevy::prelude::*;
use bp_config::GameConfig;
use bp_core::{CorePlugin, GameConfigRes, RngSeed, Viewport};
use bp_gameplay::{AutoClosePlugin, GameplayPlugin};
use bp_rendering::RenderingPlugin;
use clap::Parser;
use std::path::PathBuf;

// Relative to the crate dir under `cargo run`, or to target/<profile>/ for a built binary; both
// land on the workspace `assets/`.
const ASSET_ROOT: &str = "../../assets";

#[derive(Parser, Debug)]
#[command(name = "bubble_pop", about = "Pop rising bubbles before they float away")]
struct Args {
    /// Extra config layer merged over the defaults (repeatable, later wins).
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// RNG seed for reproducible spawning.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    /// Exit after this many seconds (0 disables).
    #[arg(long = "auto-close", value_name = "SECS")]
    auto_close: Option<f32>,
}

/// What happened while loading config; logged at startup once the log plugin is installed.
#[derive(Resource, Debug, Default)]
struct ConfigReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn load_config(args: &Args) -> (GameConfig, ConfigReport) {
    let mut layers = vec![
        PathBuf::from("assets/config/game.ron"),
        PathBuf::from("assets/config/game.local.ron"),
    ];
    layers.extend(args.configs.iter().cloned());
    let (mut cfg, used, errors) = GameConfig::load_layered(&layers);
    apply_overrides(&mut cfg, args);
    let warnings = cfg.validate();
    (
        cfg,
        ConfigReport {
            used,
            errors,
            warnings,
        },
    )
}

fn apply_overrides(cfg: &mut GameConfig, args: &Args) {
    if let Some(w) = args.width {
        cfg.window.width = w;
    }
    if let Some(h) = args.height {
        cfg.window.height = h;
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }
    if args.seed.is_some() {
        cfg.rng_seed = args.seed;
    }
}

fn log_config_report(report: Res<ConfigReport>, cfg: Res<GameConfigRes>, seed: Res<RngSeed>) {
    for e in &report.errors {
        warn!("CONFIG LOAD ISSUE: {e}");
    }
    if report.used.is_empty() {
        info!("No config layers found; using defaults");
    } else {
        info!(used = ?report.used, "Config layers loaded");
    }
    for w in &report.warnings {
        warn!("CONFIG WARNING: {w}");
    }
    let c = &cfg.0;
    info!(?c.window, seed = seed.0, "Window config");
    info!(
        interval_ms = ?(c.spawn.interval_ms.min, c.spawn.interval_ms.max),
        radius = ?(c.spawn.radius_range.min, c.spawn.radius_range.max),
        clouds = c.clouds.enabled,
        layers = c.clouds.layers,
        "Runtime summary"
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (cfg, report) = load_config(&args);
    cfg.check().context("refusing to start with invalid configuration")?;

    let seed = cfg.rng_seed.unwrap_or_else(rand::random);
    let window_title = cfg.window.title.clone();
    let viewport = Viewport::new(cfg.window.width, cfg.window.height);

    let mut app = App::new();
    app.insert_resource(GameConfigRes(cfg.clone()))
        .insert_resource(RngSeed(seed))
        .insert_resource(viewport)
        .insert_resource(report)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: window_title,
                        resolution: (cfg.window.width, cfg.window.height).into(),
                        resizable: true,
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .set(AssetPlugin {
                    file_path: ASSET_ROOT.to_string(),
                    ..Default::default()
                }),
        )
        .add_plugins(CorePlugin)
        .add_plugins(RenderingPlugin)
        .add_plugins(GameplayPlugin)
        .add_plugins(AutoClosePlugin)
        .add_systems(Startup, log_config_report);

    app.run();
    Ok(())
}
