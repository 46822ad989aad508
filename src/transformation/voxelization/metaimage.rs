use crate::math::Point;
use crate::transformation::voxelization::{Occupancy, VoxelGrid};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// `path` followed by `.ext`, keeping any extension `path` already has.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut path = path.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    path.into()
}

impl<T: Occupancy> VoxelGrid<T> {
    /// The text of the MetaImage header (`.mhd`) describing this grid.
    ///
    /// `data_file` is the path of the raw data file, relative to the header.
    pub fn metaimage_header(&self, data_file: &str) -> String {
        let size = self.size();
        let spacing = self.spacing();
        let offset = self.voxel_center(&Point::origin());

        format!(
            "ObjectType = Image\n\
             NDims = 3\n\
             BinaryData = True\n\
             BinaryDataByteOrderMSB = False\n\
             DimSize = {} {} {}\n\
             ElementType = {}\n\
             ElementSpacing = {} {} {}\n\
             Offset = {} {} {}\n\
             ElementDataFile = {}\n",
            size.x,
            size.y,
            size.z,
            T::MET_ELEMENT_TYPE,
            spacing,
            spacing,
            spacing,
            offset.x,
            offset.y,
            offset.z,
            data_file
        )
    }

    /// Writes the voxel values, in linear index order, as little-endian bytes.
    pub fn write_raw(&self, out: &mut dyn Write) -> io::Result<()> {
        for value in self.data() {
            value.write_le(out)?;
        }

        Ok(())
    }

    /// Writes this grid as a MetaImage: a `.mhd` header and a `.raw` data file next to it.
    ///
    /// The files are named `path` followed by `.mhd` and `.raw` respectively: `scan.v2` gives
    /// `scan.v2.mhd` and `scan.v2.raw`. Returns the paths of the header and data files.
    pub fn write_metaimage(&self, path: impl AsRef<Path>) -> io::Result<(PathBuf, PathBuf)> {
        let header_path = append_extension(path.as_ref(), "mhd");
        let raw_path = append_extension(path.as_ref(), "raw");
        let raw_name = raw_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid MetaImage path: {}", path.as_ref().display()),
                )
            })?;

        let mut raw = BufWriter::new(File::create(&raw_path)?);
        self.write_raw(&mut raw)?;
        raw.flush()?;

        std::fs::write(&header_path, self.metaimage_header(&raw_name))?;

        log::info!(
            "Wrote MetaImage {} ({} voxels).",
            header_path.display(),
            self.num_voxels()
        );

        Ok((header_path, raw_path))
    }
}
