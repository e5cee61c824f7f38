/// Camera modes exposed by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Build,
    ThirdPerson,
}

impl CameraMode {
    /// Explicit toggle transition table. Adding a mode forces this match to
    /// be revisited instead of silently falling through a boolean flip.
    pub fn toggled(self) -> CameraMode {
        match self {
            CameraMode::Build => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::Build,
        }
    }
}

/// Avatar and camera command surface of the host viewer.
///
/// The bridge only calls this; movement signals are persistent on/off
/// levels, strafes and mode switches are one-shot commands.
pub trait ViewerSurface: Send + Sync {
    fn move_forward(&self, on: bool);
    fn move_backward(&self, on: bool);
    fn strafe_left(&self);
    fn strafe_right(&self);
    fn zoom(&self, delta: f32);
    fn free_look(&self, dx: f32, dz: f32);
    fn camera_mode(&self) -> CameraMode;
    fn set_camera_mode(&self, mode: CameraMode);
    /// Whether an avatar/user object is currently active in the host.
    fn has_active_user(&self) -> bool;
}
