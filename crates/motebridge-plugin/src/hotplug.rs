use std::sync::Arc;

use motebridge_hid::{Device, ExtensionChange, IrSensitivity, ReportMode};

/// Reporting mode transition table for extension attach/detach.
pub(crate) fn report_mode_for(change: ExtensionChange) -> ReportMode {
    match change {
        ExtensionChange::Inserted => ReportMode::IrExtensionAccel,
        ExtensionChange::Removed => ReportMode::IrAccel,
    }
}

/// Switches the report mode in lockstep with the extension event, on the
/// event thread, so the next state event already arrives under the correct
/// mode. Actuator failures are logged and never break the binding.
pub(crate) fn apply(device: &Arc<dyn Device>, change: ExtensionChange) {
    let mode = report_mode_for(change);
    if let Err(e) = device.set_report_mode(mode, IrSensitivity::Maximum, true) {
        log::warn!("report mode switch after extension change failed: {e}");
    }
}
