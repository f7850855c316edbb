/// Rigid rotation about the Y axis and the per-frame rotation angle
use nalgebra::{Rotation3, Vector3};

use crate::geometry::Vertex;

/// Current rotation angle in degrees, kept in `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    degrees: f32,
}

impl RotationState {
    pub fn new(degrees: f32) -> Self {
        Self {
            degrees: wrap_degrees(degrees),
        }
    }

    pub fn zero() -> Self {
        Self { degrees: 0.0 }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    /// Advance by `step` degrees, wrapping modulo 360
    pub fn advance(&mut self, step: f32) {
        self.degrees = wrap_degrees(self.degrees + step);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Transform builder for object-to-world rotation
pub struct Transform;

impl Transform {
    /// Right-handed rotation about +Y by `degrees`:
    ///
    /// ```text
    /// | cos θ  0  sin θ |
    /// |   0    1    0   |
    /// | -sin θ 0  cos θ |
    /// ```
    pub fn rotation_y(degrees: f32) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians())
    }

    /// Rotate a single vertex about the Y axis
    pub fn rotate_y(vertex: &Vertex, degrees: f32) -> Vertex {
        Self::rotation_y(degrees) * vertex
    }
}
