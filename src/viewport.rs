//! Map viewport interface

use trailnav_core::camera::CameraCommand;

/// Map camera sink driven by a navigation session.
pub trait ViewportController: Send {
    /// Animate the camera to `command`.
    fn set_camera(&mut self, command: &CameraCommand);
}

/// Viewport that only remembers the commands it received.
#[derive(Debug, Default, Clone)]
pub struct RecordingViewport {
    commands: Vec<CameraCommand>,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[CameraCommand] {
        &self.commands
    }

    pub fn last(&self) -> Option<&CameraCommand> {
        self.commands.last()
    }
}

impl ViewportController for RecordingViewport {
    fn set_camera(&mut self, command: &CameraCommand) {
        self.commands.push(*command);
    }
}

/// Viewport that logs each command.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingViewport;

impl ViewportController for LoggingViewport {
    fn set_camera(&mut self, command: &CameraCommand) {
        crate::log_debug!(
            "camera -> ({:.6}, {:.6}) heading {:.0} pitch {:.0} zoom {:.1}",
            command.center.latitude,
            command.center.longitude,
            command.heading,
            command.pitch,
            command.zoom
        );
    }
}
