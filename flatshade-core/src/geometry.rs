/// Geometry primitives for mesh rendering
use nalgebra::Point3;

use crate::error::{MeshError, MeshResult};

/// A vertex position in object space
pub type Vertex = Point3<f32>;

/// A polygon face as an ordered list of 0-based vertex indices.
///
/// Faces always hold at least three indices. Only the first three are
/// rendered; larger polygons are not fan-triangulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    /// Returns `None` when fewer than three indices are given.
    pub fn new(indices: Vec<usize>) -> Option<Self> {
        if indices.len() < 3 {
            return None;
        }
        Some(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The three indices consumed by the renderer
    pub fn triangle(&self) -> [usize; 3] {
        [self.indices[0], self.indices[1], self.indices[2]]
    }
}

/// An immutable indexed mesh.
///
/// Every face index is guaranteed to be within `0..vertex_count()`.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking that every face index refers to a vertex.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> MeshResult<Self> {
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Build a mesh from raw index triples, as used by the built-in shapes.
    pub fn from_triangles(vertices: Vec<Vertex>, triangles: &[[usize; 3]]) -> MeshResult<Self> {
        let faces = triangles
            .iter()
            .map(|t| Face { indices: t.to_vec() })
            .collect();
        Self::new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vertex positions of a face's rendered triangle
    pub fn face_vertices(&self, face: &Face) -> [Vertex; 3] {
        face.triangle().map(|i| self.vertices[i])
    }

    /// Axis-aligned bounding box as (min, max), or `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<(Vertex, Vertex)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.inf(v), max.sup(v))
        }))
    }

    /// Create an axis-aligned cube centred on the origin.
    ///
    /// 8 vertices and 12 triangles, wound counter-clockwise when viewed from
    /// outside so that face normals point outward.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];

        let triangles = [
            // Front (+z)
            [4, 5, 6],
            [4, 6, 7],
            // Back (-z)
            [1, 0, 3],
            [1, 3, 2],
            // Right (+x)
            [5, 1, 2],
            [5, 2, 6],
            // Left (-x)
            [0, 4, 7],
            [0, 7, 3],
            // Top (+y)
            [7, 6, 2],
            [7, 2, 3],
            // Bottom (-y)
            [0, 1, 5],
            [0, 5, 4],
        ];

        let faces = triangles
            .iter()
            .map(|t| Face { indices: t.to_vec() })
            .collect();
        Self { vertices, faces }
    }
}
