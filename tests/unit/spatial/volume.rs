//! Tests for binary volume construction and phase bookkeeping

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use porestat::io::error::ErrorKind;
    use porestat::spatial::volume::BinaryVolume;

    // Tests rejection of grids with an empty dimension
    // Verified by removing the shape check in BinaryVolume::new
    #[test]
    fn test_new_rejects_empty_grid() {
        let result = BinaryVolume::new(Array3::from_elem((0, 2, 2), true), 1.0, "cm");

        assert!(result.is_err_and(|error| error.kind() == ErrorKind::InvalidVolume));
    }

    // Tests rejection of zero, negative and non-finite pitch
    // Verified by accepting any pitch
    #[test]
    fn test_new_rejects_invalid_pitch() {
        for pitch in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = BinaryVolume::new(Array3::from_elem((2, 2, 2), true), pitch, "cm");
            assert!(result.is_err(), "pitch {pitch} should be rejected");
        }
    }

    // Tests void counting and porosity of a one-layer void slab
    // Verified by counting solid voxels instead of void voxels
    #[test]
    fn test_porosity_counts_void_fraction() {
        let volume = BinaryVolume::from_fn((4, 4, 4), 0.5, |(x, _, _)| x < 1)
            .expect("volume construction should succeed");

        assert_eq!(volume.void_count(), 16);
        assert!((volume.porosity() - 0.25).abs() < 1e-12);
        assert_eq!(volume.shape(), [4, 4, 4]);
        assert_eq!(volume.len(), 64);
        assert!((volume.pitch() - 0.5).abs() < f64::EPSILON);
        assert!(!volume.is_single_phase());
        assert!(volume.require_two_phases().is_ok());
    }

    // Tests that single-phase volumes construct but fail the two-phase check
    // Verified by rejecting single-phase grids in the constructor
    #[test]
    fn test_single_phase_volumes_are_flagged() {
        for void in [true, false] {
            let volume = BinaryVolume::from_phases(Array3::from_elem((3, 3, 3), void))
                .expect("single-phase volume should construct");
            assert!(volume.is_single_phase());
            assert!(
                volume
                    .require_two_phases()
                    .is_err_and(|error| error.kind() == ErrorKind::InvalidVolume)
            );
        }
    }

    // Tests phase lookup inside and outside the grid
    // Verified by returning Some(false) outside the grid
    #[test]
    fn test_is_void_bounds() {
        let volume = BinaryVolume::from_fn((2, 2, 2), 1.0, |(x, y, z)| x + y + z == 0)
            .expect("volume construction should succeed");

        assert_eq!(volume.is_void([0, 0, 0]), Some(true));
        assert_eq!(volume.is_void([1, 1, 1]), Some(false));
        assert_eq!(volume.is_void([2, 0, 0]), None);
    }

    // Tests corner sub-cube extraction and clamping
    // Verified by slicing from the far corner
    #[test]
    fn test_corner_subvolume_is_clamped() {
        let volume = BinaryVolume::from_fn((4, 5, 6), 2.0, |(x, y, z)| x == 0 && y == 0 && z == 0)
            .expect("volume construction should succeed");

        let corner = volume.corner_subvolume(2);
        assert_eq!(corner.shape(), [2, 2, 2]);
        assert_eq!(corner.void_count(), 1);
        assert!((corner.pitch() - 2.0).abs() < f64::EPSILON);

        let clamped = volume.corner_subvolume(10);
        assert_eq!(clamped.shape(), [4, 5, 6]);
    }
}
