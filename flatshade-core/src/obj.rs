/// Loader for the minimal Wavefront OBJ subset: `v` and `f` lines
use std::fs;
use std::path::Path;

use nalgebra::Point3;
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, rest},
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face, Mesh, Vertex};

/// Load a mesh from an OBJ file.
///
/// A missing or unreadable file yields [`MeshError::Io`]; malformed geometry
/// yields [`MeshError::Parse`] with the offending 1-based line number. A file
/// without geometry is a valid, empty mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_obj(&text)?;
    match mesh.bounds() {
        Some((min, max)) => info!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            min = ?[min.x, min.y, min.z],
            max = ?[max.x, max.y, max.z],
            "Loaded mesh"
        ),
        None => info!(path = %path.display(), "Loaded empty mesh"),
    }
    Ok(mesh)
}

/// Parse OBJ text already held in memory.
///
/// Lines other than `v` and `f` (normals, texture coordinates, groups,
/// comments) are ignored. Face indices are resolved against every vertex
/// in the text, so a face may reference vertices that appear after it.
pub fn parse_obj(input: &str) -> MeshResult<Mesh> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut face_lines = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => vertices.push(parse_vertex(tokens, line_no)?),
            Some("f") => {
                faces.push(parse_face(tokens, line_no)?);
                face_lines.push(line_no);
            }
            Some(_) => skipped += 1,
            None => {}
        }
    }

    debug!(
        vertices = vertices.len(),
        faces = faces.len(),
        skipped,
        "Parsed OBJ text"
    );

    let vertex_count = vertices.len();
    for (face, line) in faces.iter().zip(&face_lines) {
        if let Some(&index) = face.indices().iter().find(|&&i| i >= vertex_count) {
            return Err(MeshError::parse(
                *line,
                format!(
                    "vertex index {} exceeds the {vertex_count} vertices in the file",
                    index + 1
                ),
            ));
        }
    }

    Mesh::new(vertices, faces)
}

fn parse_vertex<'a>(tokens: impl Iterator<Item = &'a str>, line: usize) -> MeshResult<Vertex> {
    let mut coords = [0.0f32; 3];
    let mut found = 0;
    // Anything past the third coordinate (w, vertex colours) is ignored
    for (slot, token) in coords.iter_mut().zip(tokens) {
        let (_, value) = coordinate(token)
            .map_err(|_| MeshError::parse(line, format!("invalid coordinate '{token}'")))?;
        if !value.is_finite() {
            return Err(MeshError::parse(
                line,
                format!("coordinate '{token}' is not finite"),
            ));
        }
        *slot = value;
        found += 1;
    }

    if found < 3 {
        return Err(MeshError::parse(
            line,
            format!("expected 3 coordinates, found {found}"),
        ));
    }

    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>, line: usize) -> MeshResult<Face> {
    let mut indices = Vec::with_capacity(3);
    for token in tokens {
        let (_, index) = vertex_index(token)
            .map_err(|_| MeshError::parse(line, format!("invalid vertex index '{token}'")))?;
        if index == 0 {
            return Err(MeshError::parse(line, "vertex indices are 1-based, got 0"));
        }
        indices.push(index - 1);
    }

    let count = indices.len();
    Face::new(indices).ok_or_else(|| {
        MeshError::parse(line, format!("face needs at least 3 vertices, found {count}"))
    })
}

fn coordinate(input: &str) -> IResult<&str, f32> {
    all_consuming(float)(input)
}

/// The integer prefix of a face token; `/texture/normal` suffixes are dropped.
fn vertex_index(input: &str) -> IResult<&str, usize> {
    all_consuming(terminated(
        map_res(digit1, str::parse::<usize>),
        opt(preceded(char('/'), rest)),
    ))(input)
}
