use std::sync::Arc;

use motebridge_hid::{Device, LedMask};

use crate::config::BridgeConfig;
use crate::snapshot::CommandSnapshot;
use crate::surface::ViewerSurface;

/// Applies the command snapshot to the viewer and the device actuators,
/// once per rendered frame.
pub(crate) struct FrameActuator {
    led_refresh_interval: u64,
}

impl FrameActuator {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            led_refresh_interval: config.led_refresh_interval.max(1),
        }
    }

    pub fn drive(
        &self,
        frame: u64,
        device: &Arc<dyn Device>,
        snapshot: &CommandSnapshot,
        surface: &dyn ViewerSurface,
    ) {
        let enabled = snapshot.is_enabled();

        // Movement is forwarded as a persistent on/off level every frame.
        // Disabling is a hard override: both signals go off regardless of
        // the translator state. Camera and rumble are not gated.
        if enabled {
            surface.move_forward(snapshot.move_up());
            surface.move_backward(snapshot.move_down());
        } else {
            surface.move_forward(false);
            surface.move_backward(false);
        }

        // Low-frequency LED refresh to avoid redundant actuator writes.
        if frame % self.led_refresh_interval == 0 {
            let mask = if enabled {
                LedMask::SLOT_1
            } else {
                LedMask::SLOT_4
            };
            if let Err(e) = device.set_leds(mask) {
                log::warn!("LED refresh failed: {e}");
            }
        }

        let rumble = snapshot.take_rumble_frame();
        if let Err(e) = device.set_rumble(rumble) {
            log::warn!("rumble write failed: {e}");
        }
    }
}
