use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("deadzone must be within [0.0, 1.0), got {0}")]
    InvalidDeadzone(f32),
}

/// Tunables of the bridge. Every field has a default; a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Symmetric joystick deadzone in normalized units.
    #[serde(default = "default_deadzone")]
    pub deadzone: f32,
    /// Length of one rumble pulse, in frames.
    #[serde(default = "default_rumble_frames")]
    pub rumble_frames: u32,
    /// LED mask refresh cadence, in frames.
    #[serde(default = "default_led_refresh_interval")]
    pub led_refresh_interval: u64,
    /// Discovery retry cadence while unbound, in frames.
    #[serde(default = "default_rescan_interval")]
    pub rescan_interval: u64,
    /// Scale applied to the extension accelerometer Y when zooming.
    #[serde(default = "default_zoom_scale")]
    pub zoom_scale: f32,
}

fn default_deadzone() -> f32 {
    0.3
}

fn default_rumble_frames() -> u32 {
    10
}

fn default_led_refresh_interval() -> u64 {
    10
}

fn default_rescan_interval() -> u64 {
    100
}

fn default_zoom_scale() -> f32 {
    0.1
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            deadzone: default_deadzone(),
            rumble_frames: default_rumble_frames(),
            led_refresh_interval: default_led_refresh_interval(),
            rescan_interval: default_rescan_interval(),
            zoom_scale: default_zoom_scale(),
        }
    }
}

/// Parse a YAML config. Unknown keys are rejected.
pub fn parse_config(input: &str) -> Result<BridgeConfig, ConfigError> {
    let config: BridgeConfig = serde_yaml::from_str(input)?;
    if !(0.0..1.0).contains(&config.deadzone) {
        return Err(ConfigError::InvalidDeadzone(config.deadzone));
    }
    Ok(config)
}
