/// Session parameters for a render run
use nalgebra::Vector3;

use crate::error::ConfigError;
use crate::shading::{Light, Rgb};

/// Largest framebuffer accepted by [`RenderConfig::validate`], 16384 x 16384.
pub const MAX_PIXELS: usize = 1 << 28;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Framebuffer width in pixels
    pub width: usize,
    /// Framebuffer height in pixels
    pub height: usize,
    /// Degrees added to the rotation angle after each frame
    pub rotation_step: f32,
    /// Starting rotation angle in degrees
    pub initial_angle: f32,
    /// Direction toward the light; normalized on validation
    pub light_direction: Vector3<f32>,
    pub background: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            rotation_step: 5.0,
            initial_angle: 0.0,
            light_direction: Vector3::new(0.0, 0.0, 1.0),
            background: Rgb::BLACK,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rotation_step(mut self, step: f32) -> Self {
        self.rotation_step = step;
        self
    }

    pub fn with_initial_angle(mut self, degrees: f32) -> Self {
        self.initial_angle = degrees;
        self
    }

    pub fn with_light_direction(mut self, direction: Vector3<f32>) -> Self {
        self.light_direction = direction;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        match self.width.checked_mul(self.height) {
            Some(pixels) if pixels <= MAX_PIXELS => {}
            _ => {
                return Err(ConfigError::TooManyPixels {
                    width: self.width,
                    height: self.height,
                })
            }
        }
        if !self.rotation_step.is_finite() {
            return Err(ConfigError::InvalidRotationStep(self.rotation_step));
        }
        if !self.initial_angle.is_finite() {
            return Err(ConfigError::InvalidInitialAngle(self.initial_angle));
        }
        self.light()?;
        Ok(())
    }

    /// The normalized light
    pub fn light(&self) -> Result<Light, ConfigError> {
        Light::new(self.light_direction).ok_or(ConfigError::InvalidLightDirection)
    }

}
