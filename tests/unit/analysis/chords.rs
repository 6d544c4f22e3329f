//! Tests for chord extraction and chord length distributions

#[cfg(test)]
mod tests {
    use porestat::analysis::chords::{chord_length_distribution, extract_chords};
    use porestat::io::configuration::CharacterizationConfig;
    use porestat::io::error::ErrorKind;
    use porestat::spatial::volume::BinaryVolume;

    // Tests run detection on a single line
    // Verified by closing runs one voxel late
    #[test]
    fn test_runs_on_one_line() {
        let pattern = [false, true, true, false, true, true, true, false];
        let volume = BinaryVolume::from_fn((8, 1, 1), 1.0, |(x, _, _)| {
            pattern.get(x).copied().unwrap_or(false)
        })
        .expect("volume");

        let chords = extract_chords(&volume, 0, 0).expect("chords");
        let runs: Vec<(usize, usize)> = chords.iter().map(|c| (c.start, c.length)).collect();
        assert_eq!(runs, vec![(1, 2), (4, 3)]);
    }

    // Tests line sampling stride
    // Verified by sampling every line regardless of spacing
    #[test]
    fn test_spacing_skips_lines() {
        let volume = BinaryVolume::from_fn((5, 5, 5), 1.0, |_| true).expect("volume");

        assert_eq!(extract_chords(&volume, 0, 0).expect("chords").len(), 25);
        assert_eq!(extract_chords(&volume, 0, 1).expect("chords").len(), 9);
        assert!(
            extract_chords(&volume, 0, 1)
                .expect("chords")
                .iter()
                .all(|chord| chord.length == 5 && chord.touches_face)
        );
    }

    // Tests face flags for interior and boundary runs
    // Verified by flagging only runs that end at the lane end
    #[test]
    fn test_face_flags_and_trimming() {
        let volume = BinaryVolume::from_fn((6, 5, 5), 1.0, |(x, y, z)| {
            ((1..5).contains(&x) && y == 2 && z == 2) || (x, y, z) == (0, 0, 0)
        })
        .expect("volume");

        let chords = extract_chords(&volume, 0, 1).expect("chords");
        assert_eq!(chords.len(), 2);
        assert!(
            chords
                .iter()
                .any(|chord| chord.start == 1 && chord.length == 4 && !chord.touches_face)
        );

        let trimmed = chord_length_distribution(&volume, &CharacterizationConfig::default())
            .expect("distribution");
        assert_eq!(trimmed.sample_count(), 1);

        let mut keep_all = CharacterizationConfig::default();
        keep_all.trim_chord_edges = false;
        let untrimmed = chord_length_distribution(&volume, &keep_all).expect("distribution");
        assert_eq!(untrimmed.sample_count(), 2);
    }

    // Tests axis validation
    // Verified by clamping the axis
    #[test]
    fn test_invalid_axis() {
        let volume = BinaryVolume::from_fn((2, 2, 2), 1.0, |(x, _, _)| x == 0).expect("volume");

        assert!(
            extract_chords(&volume, 3, 0)
                .is_err_and(|error| error.kind() == ErrorKind::InvalidParameter)
        );
    }
}
