//! Tests for the lineal path distribution

#[cfg(test)]
mod tests {
    use porestat::analysis::lineal_path::{
        lineal_path_distribution, lineal_path_field, survival_probability,
    };
    use porestat::io::configuration::CharacterizationConfig;
    use porestat::io::error::ErrorKind;
    use porestat::spatial::distance::LinearMode;
    use porestat::spatial::generators::slab_channel;
    use porestat::spatial::volume::BinaryVolume;

    fn short_line() -> BinaryVolume {
        BinaryVolume::from_fn((4, 1, 1), 1.0, |(x, _, _)| x < 3).expect("volume")
    }

    // Tests segment survival along a run of three void voxels
    // Verified by counting solid anchors
    #[test]
    fn test_survival_probability() {
        let volume = short_line();

        assert!((survival_probability(&volume, 0, 1) - 1.0).abs() < 1e-12);
        assert!((survival_probability(&volume, 0, 2) - 2.0 / 3.0).abs() < 1e-12);
        assert!(survival_probability(&volume, 0, 4).abs() < 1e-12);
    }

    // Tests the two-sided run field along the axis
    // Verified by using the forward run only
    #[test]
    fn test_lineal_path_field() {
        let field = lineal_path_field(&short_line(), 0, LinearMode::Both);
        let values: Vec<f64> = field.iter().copied().collect();

        assert_eq!(values, vec![1.0, 2.0, 1.0, 0.0]);
    }

    // Tests the distribution over a slab and single-phase rejection
    // Verified by including solid voxels as zero-length samples
    #[test]
    fn test_lineal_path_distribution() {
        let volume = slab_channel(8, 0, 2).expect("slab");
        let distribution =
            lineal_path_distribution(&volume, &CharacterizationConfig::default()).expect("lpd");

        assert_eq!(distribution.sample_count(), volume.void_count());

        let void = BinaryVolume::from_fn((3, 3, 3), 1.0, |_| true).expect("volume");
        assert!(
            lineal_path_distribution(&void, &CharacterizationConfig::default())
                .is_err_and(|error| error.kind() == ErrorKind::InvalidVolume)
        );
    }
}
