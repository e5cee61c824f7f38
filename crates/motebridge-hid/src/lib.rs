mod device;
mod types;

use thiserror::Error;

pub use crate::device::{Device, ExtensionReceiver, StateReceiver, Transport};
pub use crate::types::{
    Accel, Button, Buttons, DeviceId, Extension, ExtensionChange, IrSensitivity, LedMask,
    RawControllerState, ReportMode,
};

/// Error type for transport and device operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying transport backend failed (enumeration, HID I/O).
    #[error("backend error: {0}")]
    Backend(String),
    /// The device is not connected and the operation needs a connection.
    #[error("device not connected")]
    NotConnected,
    /// Operation is not supported by the device or backend.
    #[error("operation unsupported")]
    Unsupported,
}

/// Convenient result alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;
