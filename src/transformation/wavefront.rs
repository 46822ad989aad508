//! Wavefront (`.obj`) import and export of triangle meshes.

use crate::math::{Point, Real};
use crate::shape::{TriMesh, TriMeshBuilderError};
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Error while reading or writing a Wavefront file.
#[derive(thiserror::Error, Debug)]
pub enum WavefrontError {
    /// The file could not be opened or created.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The file content is not valid Wavefront.
    #[error("invalid Wavefront data: {0}")]
    Obj(#[from] ObjError),
    /// The file content is not a valid triangle mesh.
    #[error("invalid triangle mesh: {0}")]
    TriMesh(#[from] TriMeshBuilderError),
    /// A polygon references a vertex whose index does not fit in a `u32`.
    #[error("vertex index {0} does not fit in 32 bits")]
    IndexOverflow(usize),
}

/// Splits each polygon into a fan of triangles around its first corner.
fn fan_triangles<'a>(
    polys: impl IntoIterator<Item = &'a SimplePolygon>,
) -> Result<Vec<[u32; 3]>, WavefrontError> {
    let mut indices = Vec::new();

    for poly in polys {
        let corners = poly
            .0
            .iter()
            .map(|corner| {
                u32::try_from(corner.0).map_err(|_| WavefrontError::IndexOverflow(corner.0))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for k in 2..corners.len() {
            indices.push([corners[0], corners[k - 1], corners[k]]);
        }
    }

    Ok(indices)
}

impl TriMesh {
    /// Loads a triangle mesh from a Wavefront (`.obj`) file.
    ///
    /// The polygons of all the objects and groups of the file are merged into a single mesh.
    /// Polygons with more than three vertices are split into a fan of triangles around their
    /// first vertex; polygons with fewer are ignored. Texture coordinates and normals are
    /// ignored.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    #[allow(clippy::unnecessary_cast)]
    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Self, WavefrontError> {
        let file = File::open(path.as_ref())?;
        let data = ObjData::load_buf(BufReader::new(file))?;

        let vertices = data
            .position
            .iter()
            .map(|p| Point::new(p[0] as Real, p[1] as Real, p[2] as Real))
            .collect();
        let indices = fan_triangles(
            data.objects
                .iter()
                .flat_map(|object| &object.groups)
                .flat_map(|group| &group.polys),
        )?;

        log::debug!(
            "Loaded {} triangles from {}.",
            indices.len(),
            path.as_ref().display()
        );

        Ok(TriMesh::new(vertices, indices)?)
    }

    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    #[allow(clippy::unnecessary_cast)]
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), WavefrontError> {
        let mut file = BufWriter::new(File::create(path.as_ref())?);

        ObjData {
            position: self
                .vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            objects: vec![Object {
                groups: vec![Group {
                    polys: self
                        .indices()
                        .iter()
                        .map(|tri| {
                            SimplePolygon(
                                tri.iter()
                                    .map(|i| IndexTuple(*i as usize, None, None))
                                    .collect(),
                            )
                        })
                        .collect(),
                    name: String::new(),
                    index: 0,
                    material: None,
                }],
                name: String::new(),
            }],
            ..Default::default()
        }
        .write_to_buf(&mut file)?;

        file.flush()?;
        Ok(())
    }
}
