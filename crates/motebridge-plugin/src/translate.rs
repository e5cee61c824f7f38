use std::sync::Arc;

use thiserror::Error;

use motebridge_hid::{Button, DeviceId, RawControllerState};

use crate::config::BridgeConfig;
use crate::snapshot::CommandSnapshot;
use crate::surface::ViewerSurface;

/// A state event that could not be translated. The event is dropped and the
/// snapshot is left untouched.
#[derive(Debug, Error)]
pub(crate) enum TranslateError {
    #[error("no active user object in the host")]
    NoActiveUser,
}

/// Derives commands from raw controller state, one event at a time.
///
/// Movement is level-triggered and re-evaluated on every event; rumble,
/// camera-mode toggle and enable/disable fire once per press edge. Edge
/// state lives here and starts fresh with every binding.
pub(crate) struct Translator {
    device: DeviceId,
    snapshot: Arc<CommandSnapshot>,
    surface: Arc<dyn ViewerSurface>,
    deadzone: f32,
    zoom_scale: f32,
    rumble_frames: u32,
    a_held: bool,
    minus_held: bool,
    c_held: bool,
}

impl Translator {
    pub fn new(
        device: DeviceId,
        snapshot: Arc<CommandSnapshot>,
        surface: Arc<dyn ViewerSurface>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            device,
            snapshot,
            surface,
            deadzone: config.deadzone,
            zoom_scale: config.zoom_scale,
            rumble_frames: config.rumble_frames,
            a_held: false,
            minus_held: false,
            c_held: false,
        }
    }

    /// Translates one state event. Events from any device other than the
    /// bound one are ignored.
    pub fn handle_event(&mut self, event: &RawControllerState) -> Result<(), TranslateError> {
        if event.id != self.device {
            return Ok(());
        }
        if !self.surface.has_active_user() {
            return Err(TranslateError::NoActiveUser);
        }

        let buttons = event.buttons;
        let ext = event.extension;
        let joy_x = ext.map_or(0.0, |e| e.joystick_x);
        let joy_y = ext.map_or(0.0, |e| e.joystick_y);

        // Level-triggered movement, re-evaluated every event.
        let up = joy_y > self.deadzone || buttons.contains(Button::Up);
        let down = joy_y < -self.deadzone || buttons.contains(Button::Down);
        self.snapshot.set_movement(up, down);

        // One-shot strafes, fired on every event that satisfies the condition.
        if joy_x < -self.deadzone || buttons.contains(Button::Left) {
            self.surface.strafe_left();
        }
        if joy_x > self.deadzone || buttons.contains(Button::Right) {
            self.surface.strafe_right();
        }

        // Continuous zoom while the extension trigger is held.
        if let Some(ext) = ext {
            if ext.z {
                self.surface.zoom(ext.accel.y * self.zoom_scale);
            }
        }

        // Camera free-look from the primary accelerometer while B is held.
        if buttons.contains(Button::B) {
            self.surface.free_look(event.accel.x, event.accel.z);
        }

        // Edge-triggered camera mode toggle on the extension C button.
        let c = ext.is_some_and(|e| e.c);
        if c && !self.c_held {
            let next = self.surface.camera_mode().toggled();
            self.surface.set_camera_mode(next);
        }
        self.c_held = c;

        // Edge-triggered rumble pulse, re-armable mid-pulse.
        let a = buttons.contains(Button::A);
        if a && !self.a_held {
            self.snapshot.arm_rumble(self.rumble_frames);
        }
        self.a_held = a;

        // Edge-triggered enable/disable. Gates movement only.
        let minus = buttons.contains(Button::Minus);
        if minus && !self.minus_held {
            self.snapshot.toggle_enabled();
        }
        self.minus_held = minus;

        Ok(())
    }
}
