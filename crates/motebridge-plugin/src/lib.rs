mod actuate;
mod binding;
mod config;
mod hotplug;
mod plugin;
mod runtime;
mod snapshot;
mod surface;
mod translate;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

pub use crate::binding::BindingManager;
pub use crate::config::{parse_config, BridgeConfig, ConfigError};
pub use crate::plugin::ControllerBridge;
pub use crate::snapshot::CommandSnapshot;
pub use crate::surface::{CameraMode, ViewerSurface};

/// Error type for binding a controller.
#[derive(Debug, Error)]
pub enum BindError {
    /// Discovery yielded no controllers to bind.
    #[error("no controllers found")]
    NoDevices,
    /// A device operation failed mid-bind; the binding was unwound.
    #[error("bind failed: {0}")]
    Device(#[from] motebridge_hid::Error),
}

/// Convenient result alias for binding operations.
pub type Result<T> = std::result::Result<T, BindError>;
