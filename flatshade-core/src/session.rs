/// Render loop driving the pipeline frame after frame
///
/// Presentation and input belong to a [`Display`] implementation; the loop
/// only guarantees that every presented frame is completely rendered.
use std::time::Duration;

use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::framebuffer::FrameBuffer;
use crate::geometry::Mesh;
use crate::render::{FrameStats, Renderer};
use crate::transform::RotationState;

/// Metadata for a finished frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// 0-based frame number within the session
    pub index: u64,
    /// Rotation angle the frame was rendered at, in degrees
    pub angle: f32,
    pub stats: FrameStats,
}

/// The surface finished frames are handed to.
pub trait Display {
    type Error;

    /// Show a completely rendered frame.
    fn present(&mut self, frame: &FrameBuffer, info: &FrameInfo) -> Result<(), Self::Error>;

    /// Wait up to `timeout` for input. Returns `true` when the session should end.
    fn poll_exit(&mut self, timeout: Duration) -> Result<bool, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    /// The angle the next frame would have used
    pub final_angle: f32,
}

pub struct RenderLoop {
    mesh: Mesh,
    renderer: Renderer,
    frame: FrameBuffer,
    rotation: RotationState,
    rotation_step: f32,
    frame_wait: Duration,
    max_frames: Option<u64>,
    frames_rendered: u64,
}

impl RenderLoop {
    pub fn new(mesh: Mesh, config: &RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mesh,
            renderer: Renderer::new(config.light()?),
            frame: FrameBuffer::new(config.width, config.height, config.background),
            rotation: RotationState::new(config.initial_angle),
            rotation_step: config.rotation_step,
            frame_wait: Duration::from_millis(10),
            max_frames: None,
            frames_rendered: 0,
        })
    }

    /// Upper bound on the inter-frame input wait
    pub fn with_frame_wait(mut self, wait: Duration) -> Self {
        self.frame_wait = wait;
        self
    }

    /// Stop after `limit` frames even without an exit request
    pub fn with_max_frames(mut self, limit: Option<u64>) -> Self {
        self.max_frames = limit;
        self
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn angle(&self) -> f32 {
        self.rotation.degrees()
    }

    /// Render one frame at the current angle, then advance the angle.
    pub fn render_next(&mut self) -> FrameInfo {
        let angle = self.rotation.degrees();
        let stats = self.renderer.render_frame(&self.mesh, angle, &mut self.frame);
        self.rotation.advance(self.rotation_step);

        let info = FrameInfo {
            index: self.frames_rendered,
            angle,
            stats,
        };
        self.frames_rendered += 1;
        info
    }

    /// Render and present frames until the display asks to exit or the
    /// frame limit is reached. An exit request is only honoured between
    /// frames.
    pub fn run<D: Display>(&mut self, display: &mut D) -> Result<SessionSummary, D::Error> {
        info!(
            vertices = self.mesh.vertex_count(),
            faces = self.mesh.face_count(),
            width = self.frame.width(),
            height = self.frame.height(),
            "Starting render session"
        );

        let mut frames = 0u64;
        loop {
            let info = self.render_next();
            display.present(&self.frame, &info)?;
            frames += 1;

            if self.max_frames.is_some_and(|limit| frames >= limit) {
                debug!(frames, "Frame limit reached");
                break;
            }
            if display.poll_exit(self.frame_wait)? {
                debug!(frames, "Exit requested");
                break;
            }
        }

        let summary = SessionSummary {
            frames,
            final_angle: self.rotation.degrees(),
        };
        info!(frames = summary.frames, "Render session finished");
        Ok(summary)
    }
}
