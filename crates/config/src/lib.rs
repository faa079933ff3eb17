// Pure data configuration crate (no Bevy dependency).
// Provides: data structures, layered RON loading, warnings for suspicious values and fatal
// checks for values the simulation cannot run with.

use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: "Bubble Pop".into(),
            auto_close: 0.0,
        }
    }
}

/// Frame clock tuning. Per-frame constants (bubble speed, fade step, cloud drift) are expressed
/// in units per nominal frame; real frame deltas are converted into nominal-frame steps.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    pub nominal_frame_ms: f32,
    /// Upper clamp for a single frame delta (stalls, window drags).
    pub max_frame_ms: f32,
    /// Ignore the real clock and advance exactly one nominal frame per update.
    pub fixed_step: bool,
}
impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            nominal_frame_ms: 16.67,
            max_frame_ms: 250.0,
            fixed_step: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}
impl<T: PartialOrd + Copy> SpawnRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// True when `min == max`: every sample yields the same value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Inter-arrival time between bubbles, resampled after every spawn.
    pub interval_ms: SpawnRange<f32>,
    pub radius_range: SpawnRange<f32>,
    /// Discrete rise speeds (pixels per nominal frame); one is picked uniformly per bubble.
    pub speeds: Vec<f32>,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ms: SpawnRange::new(500.0, 2000.0),
            radius_range: SpawnRange::new(20.0, 40.0),
            speeds: vec![0.8, 1.2, 1.6, 2.0, 2.4, 2.8],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BubbleStyleConfig {
    pub outline_alpha: f32,
    pub outline_width: f32,
}
impl Default for BubbleStyleConfig {
    fn default() -> Self {
        Self {
            outline_alpha: 0.7,
            outline_width: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PopEffectConfig {
    /// Radius growth per nominal frame, sampled once per effect.
    pub expansion_range: SpawnRange<f32>,
    /// Opacity lost per nominal frame.
    pub fade_step: f32,
}
impl Default for PopEffectConfig {
    fn default() -> Self {
        Self {
            expansion_range: SpawnRange::new(0.5, 1.0),
            fade_step: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CloudConfig {
    pub enabled: bool,
    /// Number of parallax layers; layer 0 is the furthest back.
    pub layers: u32,
    /// Clouds per layer (inclusive range).
    pub per_layer: SpawnRange<usize>,
    pub width_range: SpawnRange<f32>,
    /// Base drift speed, scaled by `(layer + 1) / 10`.
    pub speed_range: SpawnRange<f32>,
    /// height = aspect * width
    pub aspect: f32,
    pub base_opacity: f32,
    pub opacity_step: f32,
    /// Sprite image, relative to the asset folder.
    pub image: String,
}
impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            layers: 5,
            per_layer: SpawnRange::new(1, 3),
            width_range: SpawnRange::new(100.0, 250.0),
            speed_range: SpawnRange::new(0.1, 0.4),
            aspect: 0.6,
            base_opacity: 0.5,
            opacity_step: 0.1,
            image: "images/cloud.png".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Bubbles with radius below this are "small".
    pub small_below: f32,
    /// Bubbles with radius below this (and not small) are "medium"; the rest are "large".
    pub medium_below: f32,
    pub small_points: u32,
    pub medium_points: u32,
    pub large_points: u32,
}
impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            small_below: 25.0,
            medium_below: 35.0,
            small_points: 3,
            medium_points: 2,
            large_points: 1,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Full-screen backdrop image, relative to the asset folder. `None` = clear color only.
    pub image: Option<String>,
    /// sRGB clear color.
    pub clear_color: (f32, f32, f32),
}
impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            image: Some("images/background.png".into()),
            clear_color: (0.53, 0.81, 0.92),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub frame: FrameConfig,
    pub spawn: SpawnConfig,
    pub bubble: BubbleStyleConfig,
    pub pop_effect: PopEffectConfig,
    pub clouds: CloudConfig,
    pub scoring: ScoringConfig,
    pub background: BackgroundConfig,
    /// Fixed RNG seed; `None` draws one from entropy at startup.
    pub rng_seed: Option<u64>,
}

/// Fatal configuration problems, all collected in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub problems: Vec<String>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.problems.join("; "))
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Load from a single RON file (errors contain human-readable context).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Load file; on failure returns default config plus error string.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load multiple layers; later overrides earlier (deep merge).
    /// Skips missing files; returns (config, used_paths, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        match existing {
                            Some(ev) => merge_value(ev, v),
                            None => {
                                bm.insert(k, v);
                            }
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            if !path_ref.exists() {
                continue;
            }
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Fatal problems: values the simulation cannot run with. Fails fast at startup.
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut p: Vec<String> = Vec::new();

        if !positive(self.window.width) || !positive(self.window.height) {
            p.push(format!(
                "window dimensions must be > 0 (got {}x{})",
                self.window.width, self.window.height
            ));
        }
        if !positive(self.frame.nominal_frame_ms) {
            p.push("frame.nominal_frame_ms must be > 0".into());
        }
        if !self.frame.max_frame_ms.is_finite()
            || self.frame.max_frame_ms < self.frame.nominal_frame_ms
        {
            p.push(format!(
                "frame.max_frame_ms ({}) must be >= frame.nominal_frame_ms ({})",
                self.frame.max_frame_ms, self.frame.nominal_frame_ms
            ));
        }

        // NaN fails every comparison, so it has to be rejected explicitly.
        fn positive(v: f32) -> bool {
            v.is_finite() && v > 0.0
        }

        fn check_range(p: &mut Vec<String>, label: &str, r: &SpawnRange<f32>) {
            if !r.min.is_finite() || !r.max.is_finite() {
                p.push(format!("{label} bounds must be finite"));
            } else if r.is_inverted() {
                p.push(format!("{label} min ({}) greater than max ({})", r.min, r.max));
            }
        }

        let spawn = &self.spawn;
        check_range(&mut p, "spawn.interval_ms", &spawn.interval_ms);
        if spawn.interval_ms.min < 0.0 {
            p.push(format!(
                "spawn.interval_ms.min ({}) must not be negative",
                spawn.interval_ms.min
            ));
        }
        check_range(&mut p, "spawn.radius_range", &spawn.radius_range);
        if spawn.radius_range.min <= 0.0 {
            p.push(format!(
                "spawn.radius_range.min ({}) must be > 0",
                spawn.radius_range.min
            ));
        }
        if spawn.speeds.is_empty() {
            p.push("spawn.speeds must contain at least one speed".into());
        }
        if let Some(bad) = spawn.speeds.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            p.push(format!("spawn.speeds entries must be > 0 (got {bad})"));
        }

        check_range(&mut p, "pop_effect.expansion_range", &self.pop_effect.expansion_range);
        if self.pop_effect.expansion_range.min < 0.0 {
            p.push("pop_effect.expansion_range.min must not be negative".into());
        }
        if !positive(self.pop_effect.fade_step) {
            p.push(format!(
                "pop_effect.fade_step ({}) must be > 0 or effects never expire",
                self.pop_effect.fade_step
            ));
        }

        let clouds = &self.clouds;
        if clouds.enabled {
            if clouds.layers == 0 {
                p.push("clouds.layers must be > 0 when clouds are enabled".into());
            }
            if clouds.per_layer.is_inverted() {
                p.push(format!(
                    "clouds.per_layer min ({}) greater than max ({})",
                    clouds.per_layer.min, clouds.per_layer.max
                ));
            }
            check_range(&mut p, "clouds.width_range", &clouds.width_range);
            if clouds.width_range.min <= 0.0 {
                p.push("clouds.width_range.min must be > 0".into());
            }
            check_range(&mut p, "clouds.speed_range", &clouds.speed_range);
            if clouds.speed_range.min < 0.0 {
                p.push("clouds.speed_range.min must not be negative".into());
            }
            if !positive(clouds.aspect) {
                p.push("clouds.aspect must be > 0".into());
            }
        }

        if self.scoring.small_below > self.scoring.medium_below {
            p.push(format!(
                "scoring.small_below ({}) greater than scoring.medium_below ({})",
                self.scoring.small_below, self.scoring.medium_below
            ));
        }

        if p.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { problems: p })
        }
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width * self.window.height > 10_000_000.0 {
            w.push(format!(
                "very large window area: {}x{}",
                self.window.width, self.window.height
            ));
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.frame.fixed_step {
            w.push(
                "frame.fixed_step enabled; motion speed follows the display refresh rate".into(),
            );
        }
        let interval = &self.spawn.interval_ms;
        if interval.is_degenerate() {
            w.push(format!(
                "spawn.interval_ms min == max ({}) -> fixed spawn interval",
                interval.min
            ));
        }
        if interval.max < 50.0 {
            w.push(format!(
                "spawn.interval_ms.max {} very low; bubbles will flood the screen",
                interval.max
            ));
        }
        if self.spawn.radius_range.max * 2.0 > self.window.width {
            w.push(format!(
                "spawn.radius_range.max {}: bubble diameter exceeds window width; spawn x is centered",
                self.spawn.radius_range.max
            ));
        }
        if self.spawn.radius_range.max > self.scoring.medium_below
            && self.spawn.radius_range.min >= self.scoring.medium_below
        {
            w.push("every bubble falls in the large scoring tier".into());
        }
        if self.scoring.small_points < self.scoring.large_points {
            w.push(format!(
                "scoring.small_points {} lower than large_points {}; small bubbles are harder to hit",
                self.scoring.small_points, self.scoring.large_points
            ));
        }
        if self.pop_effect.fade_step >= 1.0 {
            w.push(format!(
                "pop_effect.fade_step {} >= 1; effects vanish after a single frame",
                self.pop_effect.fade_step
            ));
        }
        if self.clouds.enabled {
            if self.clouds.per_layer.max > 20 {
                w.push(format!(
                    "clouds.per_layer.max {} very high for a backdrop",
                    self.clouds.per_layer.max
                ));
            }
            if self.clouds.per_layer.max == 0 {
                w.push("clouds.per_layer.max is 0; no clouds will spawn".into());
            }
            let top = self.clouds.base_opacity
                + self.clouds.opacity_step * self.clouds.layers.saturating_sub(1) as f32;
            if !(0.0..=1.0).contains(&self.clouds.base_opacity) || top > 1.0 {
                w.push(format!(
                    "cloud opacity range {}..{} leaves 0..1; values are clamped",
                    self.clouds.base_opacity, top
                ));
            }
        }
        w
    }
}
