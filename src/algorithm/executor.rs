//! Stage-by-stage characterization of one volume into a descriptor record

use tracing::{debug, warn};

use crate::algorithm::record::{DescriptorRecord, Stage, StageFailure};
use crate::algorithm::solver::SolverConfig;
use crate::analysis::chords::chord_length_distribution;
use crate::analysis::correlation::two_point_correlation;
use crate::analysis::granulometry::pore_size_distribution;
use crate::analysis::lineal_path::lineal_path_distribution;
use crate::analysis::radial_density::radial_density_distribution;
use crate::analysis::topology::euler_characteristic;
use crate::analysis::tortuosity::tortuosity;
use crate::io::configuration::CharacterizationConfig;
use crate::io::error::{AnalysisError, Result, invalid_volume};
use crate::spatial::volume::BinaryVolume;

/// Runs every analyzer over a volume with one immutable configuration
#[derive(Debug, Clone)]
pub struct Characterizer {
    config: CharacterizationConfig,
}

impl Characterizer {
    /// Create a characterizer after validating the configuration
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error if any configuration value is unusable
    pub fn new(config: CharacterizationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration every stage runs with
    pub const fn config(&self) -> &CharacterizationConfig {
        &self.config
    }

    /// Run every stage and return the finished record
    ///
    /// Stage failures never abort the run; they leave their fields absent and
    /// are listed in [`DescriptorRecord::failures`].
    pub fn characterize(&self, volume: &BinaryVolume) -> DescriptorRecord {
        self.begin(volume).finish()
    }

    /// Start a run that executes one stage per [`CharacterizationRun::step`]
    pub fn begin<'a>(&'a self, volume: &'a BinaryVolume) -> CharacterizationRun<'a> {
        debug!(
            shape = ?volume.shape(),
            pitch = volume.pitch(),
            porosity = volume.porosity(),
            "characterization started"
        );
        CharacterizationRun {
            characterizer: self,
            volume,
            record: DescriptorRecord::default(),
            next: 0,
        }
    }

    fn solver(&self) -> SolverConfig {
        SolverConfig::new(self.config.solver_tolerance, self.config.solver_max_iterations)
    }
}

/// In-progress characterization of one volume
pub struct CharacterizationRun<'a> {
    characterizer: &'a Characterizer,
    volume: &'a BinaryVolume,
    record: DescriptorRecord,
    next: usize,
}

impl CharacterizationRun<'_> {
    /// Stage the next call to [`Self::step`] will run
    pub fn next_stage(&self) -> Option<Stage> {
        Stage::ALL.get(self.next).copied()
    }

    /// Number of stages already run
    pub const fn completed(&self) -> usize {
        self.next
    }

    /// Run the next stage, returning it, or `None` once every stage has run
    pub fn step(&mut self) -> Option<Stage> {
        let stage = self.next_stage()?;
        self.next += 1;
        debug!(%stage, "stage started");
        if let Err(error) = self.run_stage(stage) {
            match error {
                AnalysisError::InvalidVolume { .. } => {
                    debug!(%stage, %error, "stage skipped");
                }
                _ => warn!(%stage, %error, "stage failed"),
            }
            self.record.failures.push(StageFailure {
                stage,
                kind: error.kind(),
                message: error.to_string(),
            });
        }
        Some(stage)
    }

    /// Run any remaining stages and hand over the record
    pub fn finish(mut self) -> DescriptorRecord {
        while self.step().is_some() {}
        debug!(
            failures = self.record.failures.len(),
            "characterization finished"
        );
        self.record
    }

    fn run_stage(&mut self, stage: Stage) -> Result<()> {
        let volume = self.volume;
        let config = &self.characterizer.config;
        let pitch = volume.pitch();

        if stage != Stage::Porosity && volume.is_single_phase() {
            return Err(invalid_volume(&format!(
                "single-phase volume has no {stage}"
            )));
        }

        match stage {
            Stage::Porosity => {
                self.record.porosity = Some(volume.porosity());
            }
            Stage::PoreSize => {
                let moments = pore_size_distribution(volume, config)?.moments("pore size", pitch)?;
                self.record.pore_size = Some(moments);
            }
            Stage::ChordLength => {
                let moments =
                    chord_length_distribution(volume, config)?.moments("chord length", pitch)?;
                self.record.chord_length = Some(moments);
            }
            Stage::TwoPointCorrelation => {
                let scales = two_point_correlation(volume, config.bins)?.scales()?;
                self.record.correlation = Some(scales.to_physical(pitch));
            }
            Stage::LinealPath => {
                let moments =
                    lineal_path_distribution(volume, config)?.moments("lineal path", pitch)?;
                self.record.lineal_path = Some(moments);
            }
            Stage::RadialDensity => {
                let moments =
                    radial_density_distribution(volume, config)?.moments("radial density", pitch)?;
                self.record.radial_density = Some(moments);
            }
            Stage::EulerCharacteristic => {
                self.record.euler_characteristic = Some(euler_characteristic(volume)?);
            }
            Stage::Tortuosity { axis } => {
                let result = tortuosity(volume, axis, self.characterizer.solver())?;
                debug!(
                    axis,
                    tortuosity = result.tortuosity,
                    iterations = result.iterations,
                    "tortuosity solved"
                );
                if let Some(slot) = self.record.tortuosity.get_mut(axis) {
                    *slot = Some(result.tortuosity);
                }
            }
        }
        Ok(())
    }
}
