use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThymosConfig {
    pub heartbeat: HeartbeatConfig,
    pub sleep_wake: SleepWakeConfig,
    pub emotion: EmotionConfig,
    pub upgrade: UpgradeConfig,
}

impl ThymosConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: ThymosConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return
    /// defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("THYMOS_HEARTBEAT_SECS") {
            if let Ok(n) = v.parse() {
                self.heartbeat.interval_secs = n;
            }
        }
        if let Ok(v) = std::env::var("THYMOS_WAKE_TIME") {
            self.sleep_wake.wake = v;
        }
        if let Ok(v) = std::env::var("THYMOS_SLEEP_TIME") {
            self.sleep_wake.sleep = v;
        }
        if let Ok(v) = std::env::var("THYMOS_FRUSTRATION_THRESHOLD") {
            if let Ok(n) = v.parse() {
                self.emotion.frustration_threshold = n;
            }
        }
        if let Ok(v) = std::env::var("THYMOS_UPGRADE_EVERY") {
            if let Ok(n) = v.parse() {
                self.upgrade.every_ticks = n;
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Seconds between consciousness ticks.
    pub interval_secs: f64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self { interval_secs: 3.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SleepWakeConfig {
    /// Daily wake time, "HH:MM".
    pub wake: String,
    /// Daily sleep time, "HH:MM".
    pub sleep: String,
    /// Seconds between time-of-day polls.
    pub poll_secs: u64,
}

impl Default for SleepWakeConfig {
    fn default() -> Self {
        Self {
            wake: "07:00".to_string(),
            sleep: "23:00".to_string(),
            poll_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmotionConfig {
    /// Amount frustration drops per decay cycle.
    pub frustration_decay_rate: f32,
    /// Frustration level at which arbitration starts diversifying.
    pub frustration_threshold: f32,
    pub traits: TraitsConfig,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            frustration_decay_rate: 0.1,
            frustration_threshold: 0.7,
            traits: TraitsConfig::default(),
        }
    }
}

/// Initial personality coefficients, each in [0, 1].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraitsConfig {
    pub curiosity: f32,
    pub assertiveness: f32,
    pub openness: f32,
    pub empathy: f32,
    pub optimism: f32,
    pub sensitivity: f32,
    pub resilience: f32,
}

impl Default for TraitsConfig {
    fn default() -> Self {
        Self {
            curiosity: 0.5,
            assertiveness: 0.5,
            openness: 0.5,
            empathy: 0.5,
            optimism: 0.5,
            sensitivity: 0.5,
            resilience: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Run the self-improvement cycle every N ticks. 0 disables it.
    pub every_ticks: u64,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self { every_ticks: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ThymosConfig::default();
        assert!((cfg.heartbeat.interval_secs - 3.0).abs() < f64::EPSILON);
        assert_eq!(cfg.sleep_wake.wake, "07:00");
        assert!((cfg.emotion.frustration_threshold - 0.7).abs() < 1e-6);
        assert_eq!(cfg.upgrade.every_ticks, 50);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let toml = r#"
            [emotion]
            frustration_threshold = 0.5

            [emotion.traits]
            optimism = 0.9
        "#;
        let cfg: ThymosConfig = toml::from_str(toml).unwrap();
        assert!((cfg.emotion.frustration_threshold - 0.5).abs() < 1e-6);
        assert!((cfg.emotion.traits.optimism - 0.9).abs() < 1e-6);
        // Untouched sections keep defaults.
        assert!((cfg.emotion.traits.curiosity - 0.5).abs() < 1e-6);
        assert_eq!(cfg.sleep_wake.poll_secs, 60);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = ThymosConfig::load_or_default("/nonexistent/thymos.toml");
        assert_eq!(cfg.upgrade.every_ticks, 50);
    }
}
