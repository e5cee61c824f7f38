use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::types::{DeviceId, ExtensionChange, IrSensitivity, LedMask, RawControllerState, ReportMode};
use crate::Result;

/// Receiving end of a device's state-change stream.
pub type StateReceiver = Receiver<RawControllerState>;

/// Receiving end of a device's extension-change stream.
pub type ExtensionReceiver = Receiver<ExtensionChange>;

/// A discovered controller as exposed by the transport backend.
///
/// Subscriptions are channel-based: dropping a receiver unsubscribes, and the
/// backend prunes senders whose receiver is gone on the next failed send.
pub trait Device: Send + Sync {
    /// Returns the unique identifier of the underlying controller.
    fn id(&self) -> DeviceId;

    /// Subscribes to the state-change stream. One message per physical
    /// change, no reordering within the stream.
    fn subscribe_state(&self) -> StateReceiver;

    /// Subscribes to the extension attach/detach stream.
    fn subscribe_extension(&self) -> ExtensionReceiver;

    /// Requests an input report layout. `continuous` asks the device to
    /// report every polling interval instead of only on change.
    fn set_report_mode(
        &self,
        mode: ReportMode,
        sensitivity: IrSensitivity,
        continuous: bool,
    ) -> Result<()>;

    /// Opens the connection. May fail recoverably (device out of range,
    /// HID open refused).
    fn connect(&self) -> Result<()>;

    /// Closes the connection. Never fails; closing a closed device is a no-op.
    fn disconnect(&self);

    /// Sets the LED mask.
    fn set_leds(&self, mask: LedMask) -> Result<()>;

    /// Turns the rumble motor on or off.
    fn set_rumble(&self, on: bool) -> Result<()>;
}

/// Transport backend responsible for enumerating controllers.
pub trait Transport: Send + Sync {
    /// Enumerates currently reachable controllers. May legitimately return
    /// an empty list; backend failures surface as [`crate::Error`].
    fn discover(&self) -> Result<Vec<Arc<dyn Device>>>;
}
