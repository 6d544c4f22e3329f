//! Command-line interface for characterizing PNG slice stacks

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::algorithm::executor::Characterizer;
use crate::algorithm::record::{DescriptorRecord, Stage};
use crate::analysis::porosity::rev_profile;
use crate::io::configuration::{
    CharacterizationConfig, DEFAULT_BINS, DEFAULT_LENGTH_UNIT, DEFAULT_PITCH, DEFAULT_REV_STEP,
    DEFAULT_TARGET_RESOLUTION, DEFAULT_VOID_THRESHOLD,
};
use crate::io::error::{ErrorContext, Result, WithContext, invalid_parameter};
use crate::io::image::{SliceFormat, list_slices, load_slice_stack};
use crate::io::progress::ProgressManager;
use crate::spatial::volume::BinaryVolume;

#[derive(Parser)]
#[command(name = "porestat")]
#[command(
    author,
    version,
    about = "Compute scalar microstructure descriptors of porous media from PNG slice stacks"
)]
/// Command-line arguments for the characterization tool
// Output toggles are independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of PNG slices, or a directory of such directories
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Physical length of one voxel edge
    #[arg(short, long, default_value_t = DEFAULT_PITCH)]
    pub pitch: f64,

    /// Physical length unit label
    #[arg(short, long, default_value = DEFAULT_LENGTH_UNIT)]
    pub unit: String,

    /// Histogram bins per distribution
    #[arg(short, long, default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Resolution the pore-size radius sweep is scaled against
    #[arg(short, long, default_value_t = DEFAULT_TARGET_RESOLUTION)]
    pub resolution: usize,

    /// Luminance above which a pixel is void
    #[arg(short, long, default_value_t = DEFAULT_VOID_THRESHOLD)]
    pub threshold: u8,

    /// Treat bright pixels as solid
    #[arg(short, long)]
    pub invert: bool,

    /// Also print the porosity of growing corner sub-cubes
    #[arg(long)]
    pub rev: bool,

    /// Sub-cube edge increment for --rev
    #[arg(long, default_value_t = DEFAULT_REV_STEP)]
    pub rev_step: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log stage diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Characterization settings from the command line
    pub fn config(&self) -> CharacterizationConfig {
        CharacterizationConfig::default()
            .with_bins(self.bins)
            .with_target_resolution(self.resolution)
    }

    /// Pixel-to-phase mapping from the command line
    pub const fn slice_format(&self) -> SliceFormat {
        SliceFormat {
            threshold: self.threshold,
            invert: self.invert,
        }
    }
}

/// Characterizes every slice stack under the target with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Characterize every volume under the target and print the reports
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The target holds no slice stacks
    /// - A slice stack cannot be loaded
    pub fn process(&mut self) -> Result<()> {
        let characterizer = Characterizer::new(self.cli.config())?;
        let stacks = self.collect_stacks()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(stacks.len());
        }

        let mut reports = Vec::with_capacity(stacks.len());
        for (index, stack) in stacks.iter().enumerate() {
            reports.push(self.process_stack(&characterizer, stack, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        // Reports are the program output
        #[allow(clippy::print_stdout)]
        for report in reports {
            print!("{report}");
        }
        Ok(())
    }

    /// Slice directories under the target, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a directory, cannot be read, or
    /// holds no PNG slices at either level
    pub fn collect_stacks(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a directory",
            ));
        }
        if !list_slices(target)?.is_empty() {
            return Ok(vec![target.clone()]);
        }

        let mut stacks = Vec::new();
        for entry in std::fs::read_dir(target).with_context(ErrorContext {
            path: Some(target.clone()),
            operation: Some("listing slice stacks"),
            ..Default::default()
        })? {
            let path = entry?.path();
            if path.is_dir() && !list_slices(&path)?.is_empty() {
                stacks.push(path);
            }
        }
        if stacks.is_empty() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"holds no PNG slices",
            ));
        }
        stacks.sort();
        Ok(stacks)
    }

    fn process_stack(
        &mut self,
        characterizer: &Characterizer,
        stack: &Path,
        index: usize,
    ) -> Result<String> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_volume(index, stack, Stage::ALL.len());
        }

        let volume = load_slice_stack(stack, self.cli.slice_format(), self.cli.pitch, &self.cli.unit)?;
        info!(path = %stack.display(), shape = ?volume.shape(), "characterizing");

        let mut run = characterizer.begin(&volume);
        loop {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_stage(index, run.completed(), run.next_stage());
            }
            if run.step().is_none() {
                break;
            }
        }
        let record = run.finish();

        let profile = if self.cli.rev {
            Some(rev_profile(&volume, self.cli.rev_step)?)
        } else {
            None
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_volume(index);
        }

        Ok(render_report(stack, &volume, &record, profile.as_deref()))
    }
}

/// Text block for one characterized volume
///
/// A `# ` header names the stack, then one `name = value` line per field
/// (`-` when absent), one `# ` line per stage failure, and `rev <edge> =
/// <porosity>` lines when a REV profile is given.
pub fn render_report(
    stack: &Path,
    volume: &BinaryVolume,
    record: &DescriptorRecord,
    profile: Option<&[(usize, f64)]>,
) -> String {
    let [nx, ny, nz] = volume.shape();
    let mut report = format!(
        "# {} ({nx}x{ny}x{nz}, pitch {} {})\n{record}",
        stack.display(),
        volume.pitch(),
        volume.unit()
    );
    for failure in record.failures() {
        let _ = writeln!(report, "# {failure}");
    }
    for &(edge, porosity) in profile.unwrap_or(&[]) {
        let _ = writeln!(report, "rev {edge} = {porosity}");
    }
    report.push('\n');
    report
}
