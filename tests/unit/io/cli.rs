//! Tests for command-line parsing, stack discovery and report rendering

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use porestat::algorithm::executor::Characterizer;
    use porestat::io::cli::{Cli, FileProcessor, render_report};
    use porestat::io::configuration::{CharacterizationConfig, DEFAULT_BINS};
    use porestat::io::error::ErrorKind;
    use porestat::io::image::write_slice_stack;
    use porestat::spatial::generators::slab_channel;
    use tempfile::TempDir;

    fn write_slab(dir: &Path) {
        let volume = slab_channel(6, 0, 2).expect("slab should build");
        write_slice_stack(&volume, dir).expect("stack should write");
    }

    // Tests argument defaults
    // Verified by changing the default bin count
    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["porestat", "scans"]);

        assert_eq!(cli.bins, DEFAULT_BINS);
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_filter(), "warn");
        assert!(!cli.slice_format().invert);
        assert_eq!(cli.config(), CharacterizationConfig::default());
    }

    // Tests that flags reach the configuration and slice format
    // Verified by ignoring the invert flag
    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "porestat", "scans", "-b", "8", "-r", "10", "-t", "64", "-i", "-q", "-v",
        ]);

        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_filter(), "debug");
        assert_eq!(cli.config().bins, 8);
        assert_eq!(cli.config().target_resolution, 10);
        assert_eq!(cli.slice_format().threshold, 64);
        assert!(cli.slice_format().invert);
    }

    // Tests that a slice directory target is its own stack
    // Verified by searching only subdirectories
    #[test]
    fn test_single_stack_target() {
        let dir = TempDir::new().expect("temp dir");
        write_slab(dir.path());
        let target = dir.path().to_string_lossy().to_string();

        let processor = FileProcessor::new(Cli::parse_from(["porestat", &target, "-q"]));
        let stacks = processor.collect_stacks().expect("stack should be found");

        assert_eq!(stacks, vec![dir.path().to_path_buf()]);
    }

    // Tests batch discovery of stack subdirectories in path order
    // Verified by returning subdirectories unsorted
    #[test]
    fn test_batch_target() {
        let dir = TempDir::new().expect("temp dir");
        write_slab(&dir.path().join("second"));
        write_slab(&dir.path().join("first"));
        std::fs::create_dir(dir.path().join("empty")).expect("dir should create");
        let target = dir.path().to_string_lossy().to_string();

        let processor = FileProcessor::new(Cli::parse_from(["porestat", &target, "-q"]));
        let stacks = processor.collect_stacks().expect("stacks should be found");

        assert_eq!(
            stacks,
            vec![dir.path().join("first"), dir.path().join("second")]
        );
    }

    // Tests rejection of targets without slices
    // Verified by accepting an empty stack list
    #[test]
    fn test_target_without_slices() {
        let dir = TempDir::new().expect("temp dir");
        let empty = dir.path().to_string_lossy().to_string();
        let processor = FileProcessor::new(Cli::parse_from(["porestat", &empty, "-q"]));
        assert!(
            processor
                .collect_stacks()
                .is_err_and(|error| error.kind() == ErrorKind::InvalidParameter)
        );

        let file = dir.path().join("scan.raw");
        std::fs::write(&file, [0_u8; 4]).expect("file should write");
        let file = file.to_string_lossy().to_string();
        let processor = FileProcessor::new(Cli::parse_from(["porestat", &file, "-q"]));
        assert!(
            processor
                .collect_stacks()
                .is_err_and(|error| error.kind() == ErrorKind::InvalidParameter)
        );
    }

    // Tests the report layout
    // Verified by dropping the REV lines
    #[test]
    fn test_render_report() {
        let volume = slab_channel(6, 0, 2).expect("slab should build");
        let config = CharacterizationConfig::default().with_target_resolution(3);
        let characterizer = Characterizer::new(config).expect("config should validate");
        let record = characterizer.characterize(&volume);
        let profile = [(2, 0.25), (4, 0.5)];

        let report = render_report(Path::new("scan"), &volume, &record, Some(&profile));

        assert!(report.starts_with("# scan (6x6x6, pitch 1 cm)\nporosity = "));
        assert!(report.contains("tortuosity1 = -\n"));
        assert!(report.contains("# tortuosity 1 failed (non-percolating axis)"));
        assert!(report.contains("rev 2 = 0.25\nrev 4 = 0.5\n"));
        assert!(report.ends_with("\n\n"));
    }

    // Tests a quiet end-to-end run over one stack
    // Verified by failing the run on a non-percolating axis
    #[test]
    fn test_process() {
        let dir = TempDir::new().expect("temp dir");
        write_slab(dir.path());
        let target = dir.path().to_string_lossy().to_string();

        let mut processor = FileProcessor::new(Cli::parse_from([
            "porestat", &target, "-q", "-r", "3", "--rev", "--rev-step", "2",
        ]));

        assert!(processor.process().is_ok());
    }

    // Tests that an invalid configuration stops processing
    // Verified by skipping validation before loading stacks
    #[test]
    fn test_process_invalid_config() {
        let dir = TempDir::new().expect("temp dir");
        write_slab(dir.path());
        let target = dir.path().to_string_lossy().to_string();

        let mut processor =
            FileProcessor::new(Cli::parse_from(["porestat", &target, "-q", "-b", "1"]));

        assert!(
            processor
                .process()
                .is_err_and(|error| error.kind() == ErrorKind::InvalidParameter)
        );
    }
}
