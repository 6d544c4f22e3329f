//! Chord-length statistics of the void phase along one axis

use ndarray::Axis;

use crate::analysis::distribution::{BinScale, Distribution};
use crate::io::configuration::CharacterizationConfig;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::volume::BinaryVolume;

/// Maximal void run on one sampled line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    /// Index of the first voxel of the run along the axis
    pub start: usize,
    /// Number of voxels in the run
    pub length: usize,
    /// Whether the run, or the line carrying it, touches a grid face
    pub touches_face: bool,
}

/// Void runs on lines along `axis`, sampling every `spacing + 1` lines
///
/// Lines are independent; runs are never joined across lines.
///
/// # Errors
///
/// Returns an error if `axis` exceeds 2
pub fn extract_chords(volume: &BinaryVolume, axis: usize, spacing: usize) -> Result<Vec<Chord>> {
    if axis > 2 {
        return Err(invalid_parameter("axis", &axis, &"must be 0, 1 or 2"));
    }
    let shape = volume.shape();
    let transverse: Vec<usize> = (0..3).filter(|&other| other != axis).collect();
    let (first, second) = match transverse.as_slice() {
        [a, b] => (shape.get(*a).copied().unwrap_or(0), shape.get(*b).copied().unwrap_or(0)),
        _ => (0, 0),
    };
    let stride = spacing + 1;
    let phases = volume.phases();
    let mut chords = Vec::new();

    for (line, lane) in phases.lanes(Axis(axis)).into_iter().enumerate() {
        let (i, j) = (line / second, line % second);
        if i % stride != 0 || j % stride != 0 {
            continue;
        }
        let on_face = i == 0 || j == 0 || i + 1 == first || j + 1 == second;
        let extent = lane.len();

        let mut run_start = None;
        for (position, &void) in lane.iter().enumerate() {
            match (void, run_start) {
                (true, None) => run_start = Some(position),
                (false, Some(start)) => {
                    chords.push(Chord {
                        start,
                        length: position - start,
                        touches_face: on_face || start == 0,
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            chords.push(Chord {
                start,
                length: extent - start,
                touches_face: true,
            });
        }
    }
    Ok(chords)
}

/// Distribution of chord lengths in voxel units
///
/// # Errors
///
/// Returns an error if the axis is invalid or no chord survives trimming
pub fn chord_length_distribution(
    volume: &BinaryVolume,
    config: &CharacterizationConfig,
) -> Result<Distribution> {
    volume.require_two_phases()?;
    let lengths: Vec<f64> = extract_chords(volume, config.axis, config.chord_spacing)?
        .into_iter()
        .filter(|chord| !(config.trim_chord_edges && chord.touches_face))
        .map(|chord| chord.length as f64)
        .collect();
    Distribution::from_samples("chord length", &lengths, config.bins, BinScale::Linear)
}
