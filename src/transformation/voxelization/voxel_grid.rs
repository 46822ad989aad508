use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::transformation::voxelization::{Occupancy, VoxelizationError, VoxelizationParameters};

/// The index of the cell at `coords` into the flat array of a grid of dimensions `size`.
///
/// Cells are laid out with X varying fastest, then Y, then Z:
/// `(z * size.y + y) * size.x + x`. The same layout is used for the voxel grid and for the grid
/// of its corners (with dimensions `size + 1`).
#[inline]
pub fn linear_index(size: &Vector<u32>, coords: &Point<u32>) -> usize {
    (coords.z as usize * size.y as usize + coords.y as usize) * size.x as usize + coords.x as usize
}

/// The coordinates of the cell with the given index into the flat array of a grid of dimensions
/// `size`. This is the inverse of [`linear_index`].
#[inline]
pub fn coords_from_linear_index(size: &Vector<u32>, index: usize) -> Point<u32> {
    let sx = size.x as usize;
    let sy = size.y as usize;
    Point::new(
        (index % sx) as u32,
        ((index / sx) % sy) as u32,
        ((index / sx) / sy) as u32,
    )
}

/// A dense 3D grid of occupancy values.
///
/// The voxel with coordinates `(x, y, z)` covers the world-space box
/// `origin + [x, x + 1] * spacing` (and likewise for `y` and `z`). Voxel values are stored in a
/// flat array, in the order given by [`linear_index`].
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid<T: Occupancy = u8> {
    origin: Point<Real>,
    spacing: Real,
    size: Vector<u32>,
    data: Vec<T>,
}

impl<T: Occupancy> VoxelGrid<T> {
    /// Creates an empty grid covering the box with minimum corner `mins` and the given `extents`,
    /// surrounded by `padding` voxels on each side.
    ///
    /// Along each axis, the grid has `ceil(extents / spacing) + 2 * padding` voxels and starts at
    /// `mins - padding * spacing`.
    pub fn new(
        mins: Point<Real>,
        extents: Vector<Real>,
        spacing: Real,
        padding: u32,
    ) -> Result<Self, VoxelizationError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(VoxelizationError::InvalidSpacing(spacing));
        }

        if extents.iter().any(|e| !e.is_finite() || *e <= 0.0)
            || mins.coords.iter().any(|e| !e.is_finite())
        {
            return Err(VoxelizationError::DegenerateExtents(extents));
        }

        let padding_voxels = padding
            .checked_mul(2)
            .ok_or(VoxelizationError::GridTooLarge)?;
        let mut size = Vector::repeat(0u32);

        for i in 0..3 {
            let num_voxels = (extents[i] / spacing).ceil();

            if num_voxels >= u32::MAX as Real {
                return Err(VoxelizationError::GridTooLarge);
            }

            size[i] = (num_voxels as u32)
                .checked_add(padding_voxels)
                .ok_or(VoxelizationError::GridTooLarge)?;

            // The node grid has `size + 1` corners along each axis.
            if size[i] == u32::MAX {
                return Err(VoxelizationError::GridTooLarge);
            }
        }

        let len = (size.x as usize)
            .checked_mul(size.y as usize)
            .and_then(|len| len.checked_mul(size.z as usize))
            .ok_or(VoxelizationError::GridTooLarge)?;

        log::info!(
            "Allocating a {}x{}x{} voxel grid with spacing {}.",
            size.x,
            size.y,
            size.z,
            spacing
        );

        Ok(Self {
            origin: mins - Vector::repeat(padding as Real * spacing),
            spacing,
            size,
            data: vec![T::EMPTY; len],
        })
    }

    /// Creates an empty grid covering `aabb`, with the spacing and padding given by `params`.
    pub fn from_aabb(
        aabb: &Aabb,
        params: &VoxelizationParameters,
    ) -> Result<Self, VoxelizationError> {
        let extents = aabb.extents();
        let spacing = params.spacing(&extents)?;
        Self::new(aabb.mins, extents, spacing, params.padding)
    }

    /// The world-space position of the minimum corner of the voxel `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The edge length of each voxel.
    #[inline]
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn size(&self) -> Vector<u32> {
        self.size
    }

    /// The number of corners along each axis, i.e., `size + 1`.
    #[inline]
    pub fn node_grid_size(&self) -> Vector<u32> {
        self.size.add_scalar(1)
    }

    /// The total number of voxels of this grid.
    #[inline]
    pub fn num_voxels(&self) -> usize {
        self.data.len()
    }

    /// The voxel values, in the order given by [`linear_index`].
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The voxel values of the horizontal layer at height `z`, in the order given by
    /// [`linear_index`].
    ///
    /// Panics if `z >= self.size().z`.
    #[inline]
    pub fn layer(&self, z: u32) -> &[T] {
        let layer_len = self.size.x as usize * self.size.y as usize;
        let start = z as usize * layer_len;
        &self.data[start..start + layer_len]
    }

    /// The value of the voxel with the given linear index.
    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.data[index]
    }

    /// Sets the value of the voxel with the given linear index.
    ///
    /// The value should be [`Occupancy::EMPTY`] or [`Occupancy::FULL`].
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Flips the occupancy of the voxel with the given linear index.
    #[inline]
    pub fn toggle(&mut self, index: usize) {
        self.data[index] = self.data[index].toggled();
    }

    /// Is the voxel with the given linear index occupied?
    #[inline]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.data[index] != T::EMPTY
    }

    /// The number of occupied voxels.
    pub fn num_occupied(&self) -> usize {
        self.data.iter().filter(|v| **v != T::EMPTY).count()
    }

    /// Iterates through the coordinates of all the occupied voxels, in linear index order.
    pub fn occupied_voxels(&self) -> impl Iterator<Item = Point<u32>> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != T::EMPTY)
            .map(|(i, _)| self.voxel_coords(i))
    }

    /// The linear index of the voxel at `coords`.
    #[inline]
    pub fn linear_index(&self, coords: &Point<u32>) -> usize {
        linear_index(&self.size, coords)
    }

    /// The coordinates of the voxel with the given linear index.
    #[inline]
    pub fn voxel_coords(&self, index: usize) -> Point<u32> {
        coords_from_linear_index(&self.size, index)
    }

    /// The world-space center of the voxel at `coords`.
    #[inline]
    pub fn voxel_center(&self, coords: &Point<u32>) -> Point<Real> {
        self.origin + (coords.coords.cast::<Real>().add_scalar(0.5)) * self.spacing
    }

    /// The world-space position of the corner at `coords` of the grid of corners.
    ///
    /// The corner `(x, y, z)` is the minimum corner of the voxel `(x, y, z)`.
    #[inline]
    pub fn node_position(&self, coords: &Point<u32>) -> Point<Real> {
        self.origin + coords.coords.cast::<Real>() * self.spacing
    }

    /// The world-space AABB of the voxel at `coords`.
    #[inline]
    pub fn voxel_aabb(&self, coords: &Point<u32>) -> Aabb {
        let mins = self.node_position(coords);
        Aabb::new(mins, mins + Vector::repeat(self.spacing))
    }

    /// The world-space AABB of the whole grid.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.origin, self.node_position(&Point::from(self.size)))
    }
}
