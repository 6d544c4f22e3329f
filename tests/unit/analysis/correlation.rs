//! Tests for the two-point correlation function and its length scales

#[cfg(test)]
mod tests {
    use porestat::analysis::correlation::{TwoPointCorrelation, two_point_correlation};
    use porestat::io::configuration::CORRELATION_THRESHOLD;
    use porestat::io::error::ErrorKind;
    use porestat::spatial::generators::slab_channel;
    use porestat::spatial::volume::BinaryVolume;

    fn synthetic() -> TwoPointCorrelation {
        // Normalized values 1, 0.5, 0.2, 0 at porosity 0.5
        TwoPointCorrelation {
            distance: vec![0.0, 1.0, 2.0, 3.0],
            probability: vec![0.5, 0.375, 0.3, 0.25],
            porosity: 0.5,
        }
    }

    // Tests that the zero-lag probability equals the porosity
    // Verified by dropping the 1/N^2 normalization
    #[test]
    fn test_zero_lag_is_porosity() {
        let volume = slab_channel(8, 0, 2).expect("slab");
        let correlation = two_point_correlation(&volume, 5).expect("correlation");

        assert!(correlation.distance.first().is_some_and(|&d| d == 0.0));
        assert!(
            correlation
                .probability
                .first()
                .is_some_and(|&p| (p - volume.porosity()).abs() < 1e-9)
        );
        assert!(correlation.distance.windows(2).all(|pair| pair.first() < pair.last()));
        assert!(
            correlation
                .probability
                .iter()
                .all(|&p| (-1e-9..=volume.porosity() + 1e-9).contains(&p))
        );
    }

    // Tests normalization to one at the origin
    // Verified by subtracting porosity instead of its square
    #[test]
    fn test_normalized_starts_at_one() {
        let normalized = synthetic().normalized().expect("normalized");
        let expected = [1.0, 0.5, 0.2, 0.0];

        for (value, target) in normalized.iter().zip(expected) {
            assert!((value - target).abs() < 1e-12);
        }
    }

    // Tests interpolated correlation length, integral scale and slope
    // Verified by returning the last sample above threshold without interpolation
    #[test]
    fn test_scales() {
        let scales = synthetic().scales().expect("scales");

        let length = 1.0 + (CORRELATION_THRESHOLD - 0.5) / -0.3;
        assert!((scales.length - length).abs() < 1e-9);
        assert!((scales.integral_scale - 1.2).abs() < 1e-9);
        assert!(scales.slope_at_origin.is_some_and(|slope| (slope + 0.5).abs() < 1e-9));

        let physical = scales.to_physical(2.0);
        assert!((physical.length - 2.0 * length).abs() < 1e-9);
        assert!(physical.slope_at_origin.is_some_and(|slope| (slope + 0.25).abs() < 1e-9));
    }

    // Tests the fallbacks when the curve never drops or never rises above threshold
    // Verified by always interpolating
    #[test]
    fn test_length_fallbacks() {
        let flat = TwoPointCorrelation {
            distance: vec![0.0, 1.0, 2.0],
            probability: vec![0.5, 0.5, 0.5],
            porosity: 0.5,
        };
        assert!(flat.scales().is_ok_and(|scales| (scales.length - 2.0).abs() < 1e-12));

        let dropped = TwoPointCorrelation {
            distance: vec![0.0, 1.0],
            probability: vec![0.25, 0.25],
            porosity: 0.5,
        };
        assert!(dropped.scales().is_ok_and(|scales| scales.length == 0.0));
    }

    // Tests single-phase and undersampled inputs
    // Verified by normalizing with a zero span
    #[test]
    fn test_degenerate_inputs() {
        let single_phase = TwoPointCorrelation {
            distance: vec![0.0, 1.0],
            probability: vec![1.0, 1.0],
            porosity: 1.0,
        };
        assert!(
            single_phase
                .normalized()
                .is_err_and(|error| error.kind() == ErrorKind::DegenerateDistribution)
        );

        let empty = TwoPointCorrelation {
            distance: Vec::new(),
            probability: Vec::new(),
            porosity: 0.5,
        };
        assert!(empty.scales().is_err());

        let volume = slab_channel(8, 0, 2).expect("slab");
        assert!(
            two_point_correlation(&volume, 1)
                .is_err_and(|error| error.kind() == ErrorKind::InvalidParameter)
        );
    }

    // Tests that a single lag sample keeps the length and integral but not the slope
    // Verified by failing on curves shorter than two samples
    #[test]
    fn test_single_sample_keeps_length() {
        let volume = BinaryVolume::from_fn((1, 6, 6), 1.0, |(_, y, _)| y < 3).expect("volume");

        let correlation = two_point_correlation(&volume, 5).expect("correlation");
        assert_eq!(correlation.distance, vec![0.0]);

        let scales = correlation.scales().expect("scales");
        assert!(scales.length.abs() < f64::EPSILON);
        assert!(scales.integral_scale.abs() < f64::EPSILON);
        assert_eq!(scales.slope_at_origin, None);
        assert_eq!(scales.to_physical(2.0).slope_at_origin, None);
    }
}
