//! PNG slice-stack loading and export

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use ndarray::Array3;
use tracing::debug;

use crate::io::configuration::DEFAULT_VOID_THRESHOLD;
use crate::io::error::{AnalysisError, ErrorContext, Result, WithContext, invalid_volume};
use crate::spatial::volume::BinaryVolume;

/// How slice pixels map onto phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceFormat {
    /// Luminance above which a pixel is void
    pub threshold: u8,
    /// Swap the phases after thresholding
    pub invert: bool,
}

impl Default for SliceFormat {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VOID_THRESHOLD,
            invert: false,
        }
    }
}

impl SliceFormat {
    const fn is_void(self, luminance: u8) -> bool {
        (luminance > self.threshold) != self.invert
    }
}

fn is_png(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// PNG files directly inside `dir`, sorted by file name
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn list_slices(dir: &Path) -> Result<Vec<PathBuf>> {
    let context = || ErrorContext {
        path: Some(dir.to_path_buf()),
        operation: Some("listing slices"),
        ..Default::default()
    };
    let mut slices = Vec::new();
    for entry in fs::read_dir(dir).with_context(context())? {
        let path = entry.with_context(context())?.path();
        if is_png(&path) {
            slices.push(path);
        }
    }
    slices.sort();
    Ok(slices)
}

/// Load a directory of PNG slices as one volume
///
/// Slice `z` (in file name order) fills `[.., .., z]`; pixel `(x, y)` of a
/// slice fills `[x, y, z]`.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read or holds no PNG slices
/// - A slice cannot be decoded
/// - Slices differ in size
/// - The pitch is not a positive finite number
pub fn load_slice_stack(
    dir: &Path,
    format: SliceFormat,
    pitch: f64,
    unit: &str,
) -> Result<BinaryVolume> {
    let slices = list_slices(dir)?;
    let Some(first) = slices.first() else {
        return Err(invalid_volume(&format!(
            "no PNG slices in '{}'",
            dir.display()
        )));
    };

    let (width, height) = image::image_dimensions(first).map_err(|source| {
        AnalysisError::ImageLoad {
            path: first.clone(),
            source,
        }
    })?;
    let (nx, ny) = (width as usize, height as usize);
    let mut phases = Array3::from_elem((nx, ny, slices.len()), false);

    for (z, path) in slices.iter().enumerate() {
        let slice = image::open(path)
            .with_context(ErrorContext {
                path: Some(path.clone()),
                ..Default::default()
            })?
            .into_luma8();
        if slice.dimensions() != (width, height) {
            return Err(invalid_volume(&format!(
                "slice '{}' is {}x{}, expected {width}x{height}",
                path.display(),
                slice.width(),
                slice.height()
            )));
        }
        for (x, y, pixel) in slice.enumerate_pixels() {
            if let Some(voxel) = phases.get_mut([x as usize, y as usize, z]) {
                *voxel = format.is_void(pixel.0[0]);
            }
        }
    }
    debug!(
        path = %dir.display(),
        shape = ?(nx, ny, slices.len()),
        "loaded slice stack"
    );
    BinaryVolume::new(phases, pitch, unit)
}

/// Write a volume as PNG slices `slice_0000.png`, ... into `dir`
///
/// Void voxels are white and solid voxels black, so the default
/// [`SliceFormat`] reads the stack back unchanged.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a slice cannot be saved
pub fn write_slice_stack(volume: &BinaryVolume, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(ErrorContext {
        path: Some(dir.to_path_buf()),
        operation: Some("creating slice directory"),
        ..Default::default()
    })?;
    let [nx, ny, nz] = volume.shape();
    let phases = volume.phases();
    for z in 0..nz {
        let slice = GrayImage::from_fn(nx as u32, ny as u32, |x, y| {
            let void = phases
                .get([x as usize, y as usize, z])
                .copied()
                .unwrap_or(false);
            Luma([if void { u8::MAX } else { 0 }])
        });
        let path = dir.join(format!("slice_{z:04}.png"));
        slice.save(&path).with_context(ErrorContext {
            path: Some(path.clone()),
            ..Default::default()
        })?;
    }
    Ok(())
}
