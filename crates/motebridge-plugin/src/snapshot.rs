use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Translated command state shared between the event thread (writer) and the
/// frame loop (reader).
///
/// Fields are consumed independently, so per-field atomicity is enough; no
/// lock and no transactional read. A frame may observe a value from a
/// slightly earlier or later event, which is acceptable.
#[derive(Debug)]
pub struct CommandSnapshot {
    move_up: AtomicBool,
    move_down: AtomicBool,
    enabled: AtomicBool,
    rumble_frames: AtomicU32,
}

impl Default for CommandSnapshot {
    fn default() -> Self {
        Self {
            move_up: AtomicBool::new(false),
            move_down: AtomicBool::new(false),
            enabled: AtomicBool::new(true),
            rumble_frames: AtomicU32::new(0),
        }
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the level-triggered movement intents for this event.
    /// Conflicting directions cancel: up and down are never both true.
    pub fn set_movement(&self, up: bool, down: bool) {
        let conflict = up && down;
        self.move_up.store(up && !conflict, Ordering::Relaxed);
        self.move_down.store(down && !conflict, Ordering::Relaxed);
    }

    #[inline]
    pub fn move_up(&self) -> bool {
        self.move_up.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn move_down(&self) -> bool {
        self.move_down.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle_enabled(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    /// (Re)arms the rumble countdown, overriding any in-progress pulse.
    pub fn arm_rumble(&self, frames: u32) {
        self.rumble_frames.store(frames, Ordering::Relaxed);
    }

    /// Consumes one frame of the rumble countdown. Returns whether the
    /// pulse is live this frame.
    pub fn take_rumble_frame(&self) -> bool {
        self.rumble_frames
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }

    #[cfg(test)]
    pub(crate) fn rumble_frames_remaining(&self) -> u32 {
        self.rumble_frames.load(Ordering::Relaxed)
    }
}
