use std::sync::Arc;

use motebridge_hid::Transport;

use crate::actuate::FrameActuator;
use crate::binding::BindingManager;
use crate::config::BridgeConfig;
use crate::snapshot::CommandSnapshot;
use crate::surface::ViewerSurface;
use crate::translate::Translator;

/// The controller bridge, as seen by the host application.
///
/// The host owns the loop: it calls [`start`](Self::start) once,
/// [`per_frame`](Self::per_frame) with a monotonically increasing frame
/// counter, and [`cleanup`](Self::cleanup) on shutdown. Nothing here blocks;
/// controller events are handled on a dedicated thread owned by the binding.
pub struct ControllerBridge {
    surface: Arc<dyn ViewerSurface>,
    config: BridgeConfig,
    binding: BindingManager,
    snapshot: Arc<CommandSnapshot>,
    actuator: FrameActuator,
}

impl ControllerBridge {
    pub fn new(
        transport: Arc<dyn Transport>,
        surface: Arc<dyn ViewerSurface>,
        config: BridgeConfig,
    ) -> Self {
        let actuator = FrameActuator::new(&config);
        Self {
            surface,
            config,
            binding: BindingManager::new(transport),
            snapshot: Arc::new(CommandSnapshot::new()),
            actuator,
        }
    }

    /// Initial discovery and bind. A missing or failing controller is a
    /// warning, never fatal; the per-frame re-scan will retry.
    pub fn start(&mut self) {
        self.try_bind();
    }

    /// Per-frame hook. While bound, applies the command snapshot to the
    /// viewer and drives the LED/rumble cadences. While unbound, retries
    /// discovery every `rescan_interval` frames.
    pub fn per_frame(&mut self, frame: u64) {
        if !self.binding.is_bound() {
            if frame % self.config.rescan_interval == 0 {
                self.try_bind();
            }
            return;
        }
        if let Some(device) = self.binding.device() {
            self.actuator
                .drive(frame, device, &self.snapshot, self.surface.as_ref());
        }
    }

    /// Releases the controller. Idempotent.
    pub fn cleanup(&mut self) {
        self.binding.unbind();
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    fn try_bind(&mut self) {
        let devices = self.binding.discover();
        let Some(device) = BindingManager::pick_active(devices) else {
            return;
        };
        let translator = Translator::new(
            device.id(),
            self.snapshot.clone(),
            self.surface.clone(),
            &self.config,
        );
        if let Err(e) = self.binding.bind(device, translator) {
            log::warn!("controller bind failed: {e}");
        }
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> &CommandSnapshot {
        &self.snapshot
    }
}
