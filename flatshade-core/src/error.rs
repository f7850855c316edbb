/// Error types for mesh loading and render configuration
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort mesh loading. No partially loaded mesh is ever returned.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The mesh file could not be opened or read.
    #[error("failed to read mesh file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A geometry line was malformed. `line` is 1-based.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A face references a vertex outside the mesh.
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl MeshError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Invalid session parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("framebuffer dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("framebuffer {width}x{height} exceeds the maximum of {} pixels", crate::config::MAX_PIXELS)]
    TooManyPixels { width: usize, height: usize },

    #[error("light direction must be a finite, non-zero vector")]
    InvalidLightDirection,

    #[error("rotation step must be finite, got {0}")]
    InvalidRotationStep(f32),

    #[error("initial angle must be finite, got {0}")]
    InvalidInitialAngle(f32),
}

pub type MeshResult<T> = std::result::Result<T, MeshError>;
