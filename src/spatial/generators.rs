//! Synthetic two-phase volumes with known geometry
//!
//! All generators use unit pitch and the default length unit.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::io::configuration::DEFAULT_PITCH;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::volume::BinaryVolume;

fn squared_offset(index: (usize, usize, usize), center: [f64; 3]) -> f64 {
    let [cx, cy, cz] = center;
    let dx = index.0 as f64 - cx;
    let dy = index.1 as f64 - cy;
    let dz = index.2 as f64 - cz;
    dz.mul_add(dz, dx.mul_add(dx, dy * dy))
}

/// Void cube of edge `edge` holding one centred solid ball
///
/// # Errors
///
/// Returns an error if the ball is empty or touches the cube faces
pub fn enclosed_sphere(edge: usize, radius: f64) -> Result<BinaryVolume> {
    if !(radius.is_finite() && radius >= 1.0) {
        return Err(invalid_parameter("radius", &radius, &"must be at least 1"));
    }
    let center = (edge as f64 - 1.0) / 2.0;
    if radius + 1.0 > center {
        return Err(invalid_parameter(
            "radius",
            &radius,
            &format!("ball must stay clear of the faces of a {edge}-voxel cube"),
        ));
    }
    let limit = radius * radius;
    BinaryVolume::from_fn((edge, edge, edge), DEFAULT_PITCH, |index| {
        squared_offset(index, [center; 3]) > limit
    })
}

/// Cube of solid balls on a simple cubic lattice, void between them
///
/// Ball centres sit at `spacing / 2 + k * spacing` along every axis.
///
/// # Errors
///
/// Returns an error if `spacing` is below 2 or the radius is not positive
pub fn sphere_lattice(edge: usize, spacing: usize, radius: f64) -> Result<BinaryVolume> {
    if spacing < 2 {
        return Err(invalid_parameter("spacing", &spacing, &"must be at least 2"));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(invalid_parameter("radius", &radius, &"must be positive"));
    }
    let half = (spacing / 2) as f64;
    let limit = radius * radius;
    // Offset from the nearest lattice centre along one axis
    let offset = |position: usize| {
        let cell = position as f64 - half;
        cell - (cell / spacing as f64).round() * spacing as f64
    };
    BinaryVolume::from_fn((edge, edge, edge), DEFAULT_PITCH, |(x, y, z)| {
        let (dx, dy, dz) = (offset(x), offset(y), offset(z));
        dz.mul_add(dz, dx.mul_add(dx, dy * dy)) > limit
    })
}

/// Randomly placed non-overlapping solid balls in a void box
///
/// Draws uniform centres from a seeded `StdRng` and keeps each ball that
/// clears every earlier one, stopping after `count` balls or `100 * count`
/// draws.
///
/// # Errors
///
/// Returns an error if the shape is empty or the radius is not positive
pub fn random_sphere_packing(
    shape: (usize, usize, usize),
    radius: f64,
    count: usize,
    seed: u64,
) -> Result<BinaryVolume> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(invalid_parameter("radius", &radius, &"must be positive"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let extent = [shape.0 as f64, shape.1 as f64, shape.2 as f64];
    let mut centers: Vec<[f64; 3]> = Vec::with_capacity(count);
    let minimum_gap = 2.0 * radius;

    for _ in 0..count.saturating_mul(100) {
        if centers.len() == count {
            break;
        }
        let candidate = extent.map(|length| rng.random::<f64>() * length);
        let clear = centers.iter().all(|placed| {
            let squared: f64 = placed
                .iter()
                .zip(&candidate)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            squared >= minimum_gap * minimum_gap
        });
        if clear {
            centers.push(candidate);
        }
    }
    debug!(placed = centers.len(), requested = count, "random packing");

    let limit = radius * radius;
    BinaryVolume::from_fn(shape, DEFAULT_PITCH, |index| {
        centers
            .iter()
            .all(|&center| squared_offset(index, center) > limit)
    })
}

/// Solid cube crossed by a straight void slab along `axis`
///
/// The slab spans the full cube along `axis` and the axis after the next, and
/// covers `width` centred layers of the next axis `(axis + 1) % 3`.
///
/// # Errors
///
/// Returns an error if the axis exceeds 2 or the slab does not fit
pub fn slab_channel(edge: usize, axis: usize, width: usize) -> Result<BinaryVolume> {
    if axis > 2 {
        return Err(invalid_parameter("axis", &axis, &"must be 0, 1 or 2"));
    }
    if width == 0 || width >= edge {
        return Err(invalid_parameter(
            "width",
            &width,
            &format!("must lie between 1 and {}", edge.saturating_sub(1)),
        ));
    }
    let across = (axis + 1) % 3;
    let start = (edge - width) / 2;
    BinaryVolume::from_fn((edge, edge, edge), DEFAULT_PITCH, |(x, y, z)| {
        let position = [x, y, z].get(across).copied().unwrap_or(0);
        (start..start + width).contains(&position)
    })
}

/// Void box partitioned by solid baffles along x that force a zig-zag path
///
/// Baffles are one voxel thick, placed every `spacing` layers along x, span
/// the box in z, and leave a `gap` of open layers in y that alternates between
/// the low and high ends.
///
/// # Errors
///
/// Returns an error if `spacing` is below 2 or `gap` is not in `1..ny`
pub fn serpentine_channel(
    shape: (usize, usize, usize),
    spacing: usize,
    gap: usize,
) -> Result<BinaryVolume> {
    if spacing < 2 {
        return Err(invalid_parameter("spacing", &spacing, &"must be at least 2"));
    }
    let ny = shape.1;
    if gap == 0 || gap >= ny {
        return Err(invalid_parameter(
            "gap",
            &gap,
            &format!("must lie between 1 and {}", ny.saturating_sub(1)),
        ));
    }
    let nx = shape.0;
    BinaryVolume::from_fn(shape, DEFAULT_PITCH, |(x, y, _)| {
        let is_baffle = x > 0 && x + 1 < nx && x % spacing == 0;
        if !is_baffle {
            return true;
        }
        if (x / spacing) % 2 == 1 {
            y >= ny - gap
        } else {
            y < gap
        }
    })
}
