//! Tests for exact Euclidean, linear and boundary distance transforms

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use porestat::spatial::distance::{
        LinearMode, boundary_distance, euclidean_distance, linear_distance,
        mask_boundary_artifacts, solid_distance, squared_euclidean_distance, void_distance,
    };
    use porestat::spatial::volume::BinaryVolume;

    fn single_hole(edge: usize, hole: [usize; 3]) -> Array3<bool> {
        Array3::from_shape_fn((edge, edge, edge), |(x, y, z)| [x, y, z] != hole)
    }

    // Tests exact squared distances to a single background voxel
    // Verified by skipping the third separable pass
    #[test]
    fn test_squared_distance_is_exact() {
        let grid = single_hole(5, [2, 2, 2]);
        let field = squared_euclidean_distance(grid.view());

        assert!(field.get([2, 2, 2]).is_some_and(|&d| d == 0.0));
        assert!(field.get([0, 2, 2]).is_some_and(|&d| (d - 4.0).abs() < 1e-12));
        assert!(field.get([0, 0, 0]).is_some_and(|&d| (d - 12.0).abs() < 1e-12));
        assert!(field.get([4, 3, 2]).is_some_and(|&d| (d - 5.0).abs() < 1e-12));
    }

    // Tests brute-force agreement on an irregular grid
    // Verified by replacing the envelope with a one-sided scan
    #[test]
    fn test_distance_matches_brute_force() {
        let grid = Array3::from_shape_fn((6, 5, 4), |(x, y, z)| (x * 7 + y * 3 + z * 5) % 11 != 0);
        let field = euclidean_distance(grid.view());
        let background: Vec<[f64; 3]> = grid
            .indexed_iter()
            .filter(|(_, inside)| !**inside)
            .map(|((x, y, z), _)| [x as f64, y as f64, z as f64])
            .collect();

        for ((x, y, z), &value) in field.indexed_iter() {
            let expected = background
                .iter()
                .map(|[bx, by, bz]| {
                    ((x as f64 - bx).powi(2) + (y as f64 - by).powi(2) + (z as f64 - bz).powi(2))
                        .sqrt()
                })
                .fold(f64::INFINITY, f64::min);
            assert!((value - expected).abs() < 1e-9, "mismatch at {x},{y},{z}");
        }
    }

    // Tests that a grid without background stays at infinity
    // Verified by seeding grid faces as background
    #[test]
    fn test_no_background_is_infinite() {
        let grid = Array3::from_elem((3, 3, 3), true);
        let field = squared_euclidean_distance(grid.view());

        assert!(field.iter().all(|value| value.is_infinite()));
    }

    // Tests that void and solid distances are complementary
    // Verified by computing both fields on the void phase
    #[test]
    fn test_void_and_solid_distance_are_complementary() {
        let volume = BinaryVolume::from_phases(single_hole(4, [1, 1, 1]))
            .expect("volume construction should succeed");
        let void = void_distance(&volume);
        let solid = solid_distance(&volume);

        for (&v, &s) in void.iter().zip(solid.iter()) {
            assert!(v == 0.0 || s == 0.0);
        }
        assert!(solid.get([1, 1, 1]).is_some_and(|&d| (d - 1.0).abs() < 1e-12));
    }

    // Tests forward, backward and two-sided run lengths on one line
    // Verified by resetting runs one voxel late
    #[test]
    fn test_linear_distance_modes() {
        let pattern = [true, true, false, true, true, true];
        let grid = Array3::from_shape_fn((1, 1, 6), |(_, _, z)| pattern.get(z).copied().unwrap_or(false));
        let line = |mode| -> Vec<f64> { linear_distance(grid.view(), 2, mode).iter().copied().collect() };

        assert_eq!(line(LinearMode::Forward), vec![1.0, 2.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(line(LinearMode::Backward), vec![2.0, 1.0, 0.0, 3.0, 2.0, 1.0]);
        assert_eq!(line(LinearMode::Both), vec![1.0, 1.0, 0.0, 1.0, 2.0, 1.0]);
    }

    // Tests distance to the nearest grid face
    // Verified by dropping the upper face term
    #[test]
    fn test_boundary_distance() {
        let field = boundary_distance([3, 3, 5]);

        assert!(field.get([1, 1, 2]).is_some_and(|&d| (d - 2.0).abs() < f64::EPSILON));
        assert!(field.get([0, 1, 2]).is_some_and(|&d| (d - 1.0).abs() < f64::EPSILON));
        assert!(field.get([1, 1, 4]).is_some_and(|&d| (d - 1.0).abs() < f64::EPSILON));
    }

    // Tests zeroing of values exceeding the face distance
    // Verified by comparing with >= instead of >
    #[test]
    fn test_mask_boundary_artifacts() {
        let mut field = Array3::from_elem((3, 3, 3), 2.0);
        let masked = mask_boundary_artifacts(&mut field);

        assert_eq!(masked, 26);
        assert!(field.get([1, 1, 1]).is_some_and(|&d| (d - 2.0).abs() < f64::EPSILON));
        assert!(field.get([0, 0, 0]).is_some_and(|&d| d == 0.0));
    }
}
