use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender};

use motebridge_hid::{Device, IrSensitivity, LedMask, ReportMode, Transport};

use crate::runtime;
use crate::translate::Translator;
use crate::{BindError, Result};

struct ActiveBinding {
    device: Arc<dyn Device>,
    stop_tx: Sender<()>,
    events: JoinHandle<()>,
}

/// Owns the connection to the single active controller.
///
/// At most one device is ever bound; everything else discovery returns is
/// ignored. Binding and unbinding are driven from the host's init/cleanup
/// points only, never from the frame loop directly.
pub struct BindingManager {
    transport: Arc<dyn Transport>,
    active: Option<ActiveBinding>,
}

impl BindingManager {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            active: None,
        }
    }

    /// Enumerates reachable controllers. Transport failures are logged as
    /// warnings and degrade to an empty list, never propagate.
    pub fn discover(&self) -> Vec<Arc<dyn Device>> {
        match self.transport.discover() {
            Ok(devices) => {
                if devices.is_empty() {
                    log::warn!("no controllers found");
                }
                devices
            }
            Err(e) => {
                log::warn!("controller discovery failed: {e}");
                Vec::new()
            }
        }
    }

    /// Deterministic selection: the first discovered device wins.
    /// Selecting among multiple controllers is not implemented upstream.
    pub fn pick_active(mut devices: Vec<Arc<dyn Device>>) -> Option<Arc<dyn Device>> {
        if devices.is_empty() {
            None
        } else {
            Some(devices.swap_remove(0))
        }
    }

    /// Binds a device: subscribes both change streams, requests the
    /// IR+extension+accelerometer report at maximum sensitivity, opens the
    /// connection, lights LED slot 1 and starts the event thread.
    ///
    /// Any failure mid-sequence unwinds completely: both subscriptions are
    /// dropped and the manager stays unbound.
    pub(crate) fn bind(&mut self, device: Arc<dyn Device>, translator: Translator) -> Result<()> {
        if self.active.is_some() {
            log::debug!("bind skipped, a controller is already bound");
            return Ok(());
        }

        let state_rx = device.subscribe_state();
        let ext_rx = device.subscribe_extension();

        let opened = device
            .set_report_mode(ReportMode::IrExtensionAccel, IrSensitivity::Maximum, true)
            .and_then(|()| device.connect())
            .and_then(|()| device.set_leds(LedMask::SLOT_1));
        if let Err(e) = opened {
            // Unwind: dropping the receivers unsubscribes both streams.
            drop(state_rx);
            drop(ext_rx);
            device.disconnect();
            return Err(BindError::Device(e));
        }

        let (stop_tx, stop_rx) = bounded(1);
        let events =
            runtime::start_event_thread(device.clone(), state_rx, ext_rx, stop_rx, translator);
        log::info!("controller {} bound", device.id());
        self.active = Some(ActiveBinding {
            device,
            stop_tx,
            events,
        });
        Ok(())
    }

    /// Tears down the active binding: stops the event thread (dropping both
    /// subscriptions), turns the LEDs off and closes the connection.
    /// Idempotent; calling while unbound is a no-op.
    pub fn unbind(&mut self) {
        let Some(binding) = self.active.take() else {
            return;
        };
        let _ = binding.stop_tx.send(());
        if binding.events.join().is_err() {
            log::warn!("event thread panicked during unbind");
        }
        if let Err(e) = binding.device.set_leds(LedMask::OFF) {
            log::warn!("failed to clear LEDs during unbind: {e}");
        }
        binding.device.disconnect();
        log::info!("controller {} unbound", binding.device.id());
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    pub fn device(&self) -> Option<&Arc<dyn Device>> {
        self.active.as_ref().map(|b| &b.device)
    }
}

impl Drop for BindingManager {
    fn drop(&mut self) {
        self.unbind();
    }
}
