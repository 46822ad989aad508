use crate::math::{Real, Vector};
use crate::transformation::voxelization::VoxelizationError;

/// Controls the size of the voxels of a [`VoxelGrid`](super::VoxelGrid).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VoxelResolution {
    /// The edge length of each voxel, in world units.
    Spacing(Real),
    /// The number of voxels along the longest axis of the voxelized domain.
    ///
    /// The voxel spacing is then the length of the longest side of the domain divided by this
    /// number.
    VoxelsAlongLongestAxis(u32),
}

impl Default for VoxelResolution {
    fn default() -> Self {
        VoxelResolution::Spacing(1.0)
    }
}

/// Parameters of a voxelization.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VoxelizationParameters {
    /// The size of the voxels.
    pub resolution: VoxelResolution,
    /// The number of empty voxels added on each side of the domain, along every axis.
    pub padding: u32,
}

impl VoxelizationParameters {
    /// Parameters with the given voxel spacing and no padding.
    pub fn with_spacing(spacing: Real) -> Self {
        Self {
            resolution: VoxelResolution::Spacing(spacing),
            padding: 0,
        }
    }

    /// Parameters with the given number of voxels along the longest axis, and no padding.
    pub fn with_voxels_along_longest_axis(num_voxels: u32) -> Self {
        Self {
            resolution: VoxelResolution::VoxelsAlongLongestAxis(num_voxels),
            padding: 0,
        }
    }

    /// Sets the padding of these parameters.
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// The voxel spacing for a domain with the given extents.
    ///
    /// The returned spacing isn’t validated: this is done when the grid is created.
    pub fn spacing(&self, extents: &Vector<Real>) -> Result<Real, VoxelizationError> {
        match self.resolution {
            VoxelResolution::Spacing(spacing) => Ok(spacing),
            VoxelResolution::VoxelsAlongLongestAxis(0) => Err(VoxelizationError::InvalidVoxelCount),
            VoxelResolution::VoxelsAlongLongestAxis(n) => Ok(extents.max() / n as Real),
        }
    }
}
