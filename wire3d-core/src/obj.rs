/// Wavefront OBJ loader: vertex positions and face loops only
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, i64 as signed, space0, space1},
    combinator::{eof, opt},
    multi::many1,
    number::complete::double,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use tracing::info;

use crate::error::{WireError, WireResult};
use crate::geometry::{Face, Point3D, Scene};

/// Raw mesh data from an OBJ file, with 0-based face indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    pub points: Vec<Point3D>,
    pub faces: Vec<Face>,
}

impl ObjMesh {
    /// Extract edges from the faces and package everything as a scene
    pub fn into_scene(self) -> WireResult<Scene> {
        Scene::from_faces(self.points, &self.faces)
    }
}

/// Parse OBJ text.
///
/// Only `v` and `f` records are read; everything else is skipped. Face
/// references may carry `/texture/normal` suffixes, which are ignored.
/// Negative references count back from the latest vertex.
pub fn parse_obj(text: &str) -> WireResult<ObjMesh> {
    let mut mesh = ObjMesh::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split_once('#').map_or(raw, |(head, _)| head).trim();

        match line.split_whitespace().next() {
            Some("v") => {
                let (_, point) = vertex_line(line).map_err(|_| {
                    WireError::malformed(line_no, "expected `v x y z` with three numeric coordinates")
                })?;
                if !point.iter().all(|c| c.is_finite()) {
                    return Err(WireError::malformed(
                        line_no,
                        format!("vertex coordinates must be finite, got {point}"),
                    ));
                }
                mesh.points.push(point);
            }
            Some("f") => {
                let (_, refs) = face_line(line).map_err(|_| {
                    WireError::malformed(line_no, "expected `f` followed by vertex references")
                })?;
                if refs.len() < 3 {
                    return Err(WireError::FaceTooSmall {
                        face: mesh.faces.len(),
                        len: refs.len(),
                    });
                }
                let face = refs
                    .into_iter()
                    .map(|r| resolve_reference(r, mesh.points.len(), line_no))
                    .collect::<WireResult<Face>>()?;
                mesh.faces.push(face);
            }
            _ => {}
        }
    }

    // Positive references may point at vertices declared later in the file
    let len = mesh.points.len();
    if let Some(&index) = mesh.faces.iter().flatten().find(|&&i| i >= len) {
        return Err(WireError::IndexOutOfRange { index, len });
    }

    Ok(mesh)
}

/// Parse OBJ text straight into a scene
pub fn parse_obj_scene(text: &str) -> WireResult<Scene> {
    let mesh = parse_obj(text)?;
    let faces = mesh.faces.len();
    let scene = mesh.into_scene()?;
    info!(
        vertices = scene.len(),
        faces,
        edges = scene.edge_count(),
        "loaded OBJ mesh"
    );
    Ok(scene)
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> WireResult<ObjMesh> {
    let text = fs::read_to_string(path)?;
    parse_obj(&text)
}

/// Read an OBJ file into a scene
pub fn load_obj_scene<P: AsRef<Path>>(path: P) -> WireResult<Scene> {
    let path = path.as_ref();
    info!(path = %path.display(), "reading OBJ file");
    let text = fs::read_to_string(path)?;
    parse_obj_scene(&text)
}

/// Turn a 1-based or negative relative reference into a 0-based index.
///
/// References that do not fit `usize` on this target are rejected rather
/// than truncated.
fn resolve_reference(reference: i64, seen: usize, line_no: usize) -> WireResult<usize> {
    let resolved = match reference {
        r if r > 0 => usize::try_from(r - 1).ok(),
        r if r < 0 => usize::try_from(r.unsigned_abs())
            .ok()
            .and_then(|back| seen.checked_sub(back)),
        _ => None,
    };
    resolved.ok_or_else(|| {
        WireError::malformed(
            line_no,
            format!("vertex reference {reference} does not name a vertex ({seen} defined so far)"),
        )
    })
}

fn coordinate(input: &str) -> IResult<&str, f64> {
    preceded(space1, double)(input)
}

fn vertex_line(input: &str) -> IResult<&str, Point3D> {
    let (input, _) = tag("v")(input)?;
    let (input, (x, y, z)) = tuple((coordinate, coordinate, coordinate))(input)?;
    let (input, _) = terminated(space0, eof)(input)?;
    Ok((input, Point3D::new(x, y, z)))
}

fn face_line(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f")(input)?;
    let (input, refs) = many1(preceded(space1, vertex_reference))(input)?;
    let (input, _) = terminated(space0, eof)(input)?;
    Ok((input, refs))
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only `i` is kept
fn vertex_reference(input: &str) -> IResult<&str, i64> {
    terminated(
        signed,
        opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
    )(input)
}
