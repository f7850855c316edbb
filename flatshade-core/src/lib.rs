/// flatshade core - software rasterization of flat-shaded meshes
///
/// Stateless pipeline pieces (OBJ loading, Y rotation, flat shading,
/// orthographic projection, depth-tested triangle fill) plus the frame loop
/// that drives them against an external display.

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod render;
pub mod session;
pub mod shading;
pub mod transform;

// Re-export commonly used types
pub use config::{RenderConfig, MAX_PIXELS};
pub use error::{ConfigError, MeshError, MeshResult};
pub use framebuffer::FrameBuffer;
pub use geometry::{Face, Mesh, Vertex};
pub use obj::{load_obj, parse_obj};
pub use projection::{ScreenPoint, Viewport};
pub use raster::{barycentric, rasterize, ScreenTriangle};
pub use render::{FrameStats, Renderer};
pub use session::{Display, FrameInfo, RenderLoop, SessionSummary};
pub use shading::{face_normal, shade_face, FaceShade, Light, Rgb};
pub use transform::{RotationState, Transform};
