/// Unique identifier of a physical controller.
pub type DeviceId = u32;

/// Primary controller buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    Up,
    Down,
    Left,
    Right,
    Minus,
    Plus,
    Home,
    One,
    Two,
}

impl Button {
    #[inline]
    fn bit(self) -> u16 {
        1u16 << (self as u16)
    }
}

/// Button bitset carried by every state event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Buttons(u16);

impl Buttons {
    /// Create a new bitset from a slice of buttons.
    pub fn new(buttons: &[Button]) -> Self {
        let mut bits = 0;
        for b in buttons {
            bits |= b.bit();
        }
        Self(bits)
    }

    /// Create an empty bitset.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check if the bitset contains a button.
    #[inline]
    pub fn contains(&self, button: Button) -> bool {
        (self.0 & button.bit()) != 0
    }

    /// Insert a button into the bitset.
    #[inline]
    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    /// Remove a button from the bitset.
    #[inline]
    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    /// Check if no button is pressed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Normalized accelerometer vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accel {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Sub-state of the auxiliary extension, when one is attached.
/// Joystick axes are normalized to [-1.0, 1.0].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extension {
    pub joystick_x: f32,
    pub joystick_y: f32,
    pub c: bool,
    pub z: bool,
    pub accel: Accel,
}

/// Immutable controller state snapshot delivered on every change event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawControllerState {
    pub id: DeviceId,
    pub buttons: Buttons,
    pub accel: Accel,
    pub extension: Option<Extension>,
}

impl RawControllerState {
    /// A neutral state for the given device: no buttons, extension absent.
    pub fn neutral(id: DeviceId) -> Self {
        Self {
            id,
            buttons: Buttons::empty(),
            accel: Accel::default(),
            extension: None,
        }
    }
}

/// Extension attach/detach notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionChange {
    Inserted,
    Removed,
}

/// Input report layouts a device can be asked to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// IR camera + extension sub-state + accelerometer.
    IrExtensionAccel,
    /// IR camera + accelerometer only.
    IrAccel,
}

/// IR camera sensitivity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrSensitivity {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Maximum,
}

/// 4-bit LED mask, one bit per LED slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedMask(pub u8);

impl LedMask {
    /// All LEDs off.
    pub const OFF: LedMask = LedMask(0b0000);
    /// First slot lit, marks the active controller.
    pub const SLOT_1: LedMask = LedMask(0b0001);
    /// Fourth slot lit, marks a bound but disabled controller.
    pub const SLOT_4: LedMask = LedMask(0b1000);
}
