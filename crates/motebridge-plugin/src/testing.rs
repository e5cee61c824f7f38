//! Test doubles: a scriptable in-memory transport and a recording viewer
//! surface.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Sender};

use motebridge_hid::{
    Device, DeviceId, Error, ExtensionChange, ExtensionReceiver, IrSensitivity, LedMask,
    RawControllerState, ReportMode, StateReceiver, Transport,
};

use crate::surface::{CameraMode, ViewerSurface};

/// Polls a condition until it holds or the timeout elapses. Used to settle
/// assertions against the event thread.
pub(crate) fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    cond()
}

pub(crate) struct FakeDevice {
    id: DeviceId,
    state_subs: Mutex<Vec<Sender<RawControllerState>>>,
    ext_subs: Mutex<Vec<Sender<ExtensionChange>>>,
    connected: AtomicBool,
    fail_connect: AtomicBool,
    fail_leds: AtomicBool,
    leds: Mutex<Vec<LedMask>>,
    rumble: Mutex<Vec<bool>>,
    report_modes: Mutex<Vec<(ReportMode, IrSensitivity, bool)>>,
}

impl FakeDevice {
    pub fn new(id: DeviceId) -> Arc<Self> {
        Arc::new(Self {
            id,
            state_subs: Mutex::new(Vec::new()),
            ext_subs: Mutex::new(Vec::new()),
            connected: AtomicBool::new(false),
            fail_connect: AtomicBool::new(false),
            fail_leds: AtomicBool::new(false),
            leds: Mutex::new(Vec::new()),
            rumble: Mutex::new(Vec::new()),
            report_modes: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_connect(id: DeviceId) -> Arc<Self> {
        let device = Self::new(id);
        device.fail_connect.store(true, Ordering::Relaxed);
        device
    }

    pub fn failing_leds(id: DeviceId) -> Arc<Self> {
        let device = Self::new(id);
        device.fail_leds.store(true, Ordering::Relaxed);
        device
    }

    /// Broadcasts a state event, pruning dropped subscribers.
    pub fn push_state(&self, state: RawControllerState) {
        let mut subs = self.state_subs.lock().unwrap();
        subs.retain(|tx| tx.send(state).is_ok());
    }

    /// Broadcasts an extension change, pruning dropped subscribers.
    pub fn push_extension(&self, change: ExtensionChange) {
        let mut subs = self.ext_subs.lock().unwrap();
        subs.retain(|tx| tx.send(change).is_ok());
    }

    /// Counts subscribers still holding a receiver. Sends a neutral probe
    /// event to detect dropped receivers; only call when no listener is
    /// expected to react to it.
    pub fn live_state_subscribers(&self) -> usize {
        let mut subs = self.state_subs.lock().unwrap();
        subs.retain(|tx| tx.send(RawControllerState::neutral(self.id)).is_ok());
        subs.len()
    }

    pub fn live_extension_subscribers(&self) -> usize {
        let mut subs = self.ext_subs.lock().unwrap();
        subs.retain(|tx| tx.send(ExtensionChange::Removed).is_ok());
        subs.len()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn led_history(&self) -> Vec<LedMask> {
        self.leds.lock().unwrap().clone()
    }

    pub fn last_leds(&self) -> Option<LedMask> {
        self.leds.lock().unwrap().last().copied()
    }

    pub fn rumble_history(&self) -> Vec<bool> {
        self.rumble.lock().unwrap().clone()
    }

    pub fn report_mode_history(&self) -> Vec<(ReportMode, IrSensitivity, bool)> {
        self.report_modes.lock().unwrap().clone()
    }

    pub fn last_report_mode(&self) -> Option<ReportMode> {
        self.report_modes.lock().unwrap().last().map(|(m, _, _)| *m)
    }
}

impl Device for FakeDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn subscribe_state(&self) -> StateReceiver {
        let (tx, rx) = unbounded();
        self.state_subs.lock().unwrap().push(tx);
        rx
    }

    fn subscribe_extension(&self) -> ExtensionReceiver {
        let (tx, rx) = unbounded();
        self.ext_subs.lock().unwrap().push(tx);
        rx
    }

    fn set_report_mode(
        &self,
        mode: ReportMode,
        sensitivity: IrSensitivity,
        continuous: bool,
    ) -> motebridge_hid::Result<()> {
        self.report_modes
            .lock()
            .unwrap()
            .push((mode, sensitivity, continuous));
        Ok(())
    }

    fn connect(&self) -> motebridge_hid::Result<()> {
        if self.fail_connect.load(Ordering::Relaxed) {
            return Err(Error::Backend("connect refused".into()));
        }
        self.connected.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn disconnect(&self) {
        self.connected.store(false, Ordering::Relaxed);
    }

    fn set_leds(&self, mask: LedMask) -> motebridge_hid::Result<()> {
        if self.fail_leds.load(Ordering::Relaxed) {
            return Err(Error::Backend("led write failed".into()));
        }
        self.leds.lock().unwrap().push(mask);
        Ok(())
    }

    fn set_rumble(&self, on: bool) -> motebridge_hid::Result<()> {
        self.rumble.lock().unwrap().push(on);
        Ok(())
    }
}

pub(crate) struct FakeTransport {
    devices: Mutex<Vec<Arc<FakeDevice>>>,
    fail_discovery: AtomicBool,
    discover_calls: AtomicU32,
}

impl FakeTransport {
    pub fn new(devices: Vec<Arc<FakeDevice>>) -> Arc<Self> {
        Arc::new(Self {
            devices: Mutex::new(devices),
            fail_discovery: AtomicBool::new(false),
            discover_calls: AtomicU32::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn failing() -> Arc<Self> {
        let transport = Self::empty();
        transport.fail_discovery.store(true, Ordering::Relaxed);
        transport
    }

    /// Makes a device appear on the next discovery, as if just powered on.
    pub fn attach(&self, device: Arc<FakeDevice>) {
        self.devices.lock().unwrap().push(device);
    }

    pub fn discover_calls(&self) -> u32 {
        self.discover_calls.load(Ordering::Relaxed)
    }
}

impl Transport for FakeTransport {
    fn discover(&self) -> motebridge_hid::Result<Vec<Arc<dyn Device>>> {
        self.discover_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_discovery.load(Ordering::Relaxed) {
            return Err(Error::Backend("enumeration failed".into()));
        }
        let devices = self.devices.lock().unwrap();
        Ok(devices
            .iter()
            .map(|d| d.clone() as Arc<dyn Device>)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    MoveForward(bool),
    MoveBackward(bool),
    StrafeLeft,
    StrafeRight,
    Zoom(f32),
    FreeLook(f32, f32),
    SetCameraMode(CameraMode),
}

pub(crate) struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    mode: Mutex<CameraMode>,
    active_user: AtomicBool,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            mode: Mutex::new(CameraMode::ThirdPerson),
            active_user: AtomicBool::new(false),
        })
    }

    pub fn with_active_user() -> Arc<Self> {
        let surface = Self::new();
        surface.active_user.store(true, Ordering::Relaxed);
        surface
    }

    pub fn set_mode(&self, mode: CameraMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn mode(&self) -> CameraMode {
        *self.mode.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &SurfaceCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn zoom_deltas(&self) -> Vec<f32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Zoom(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn free_look_deltas(&self) -> Vec<(f32, f32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::FreeLook(dx, dz) => Some((dx, dz)),
                _ => None,
            })
            .collect()
    }

    pub fn forward_signals(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::MoveForward(on) => Some(on),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ViewerSurface for RecordingSurface {
    fn move_forward(&self, on: bool) {
        self.record(SurfaceCall::MoveForward(on));
    }

    fn move_backward(&self, on: bool) {
        self.record(SurfaceCall::MoveBackward(on));
    }

    fn strafe_left(&self) {
        self.record(SurfaceCall::StrafeLeft);
    }

    fn strafe_right(&self) {
        self.record(SurfaceCall::StrafeRight);
    }

    fn zoom(&self, delta: f32) {
        self.record(SurfaceCall::Zoom(delta));
    }

    fn free_look(&self, dx: f32, dz: f32) {
        self.record(SurfaceCall::FreeLook(dx, dz));
    }

    fn camera_mode(&self) -> CameraMode {
        self.mode()
    }

    fn set_camera_mode(&self, mode: CameraMode) {
        self.record(SurfaceCall::SetCameraMode(mode));
        self.set_mode(mode);
    }

    fn has_active_user(&self) -> bool {
        self.active_user.load(Ordering::Relaxed)
    }
}
