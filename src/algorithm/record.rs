//! Fixed descriptor set produced by one characterization run

use std::fmt;

use crate::analysis::correlation::CorrelationScales;
use crate::io::error::ErrorKind;
use crate::math::moments::MomentSet;

/// Characterization stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Void fraction
    Porosity,
    /// Local pore diameter distribution
    PoreSize,
    /// Chord length distribution
    ChordLength,
    /// Two-point correlation length scales
    TwoPointCorrelation,
    /// Lineal path distribution
    LinealPath,
    /// Radial density distribution
    RadialDensity,
    /// Euler characteristic of the phase boundary
    EulerCharacteristic,
    /// Tortuosity along one axis
    Tortuosity {
        /// Axis of the imposed gradient
        axis: usize,
    },
}

impl Stage {
    /// Every stage in execution order
    pub const ALL: [Self; 10] = [
        Self::Porosity,
        Self::PoreSize,
        Self::ChordLength,
        Self::TwoPointCorrelation,
        Self::LinealPath,
        Self::RadialDensity,
        Self::EulerCharacteristic,
        Self::Tortuosity { axis: 0 },
        Self::Tortuosity { axis: 1 },
        Self::Tortuosity { axis: 2 },
    ];

    /// Record fields this stage fills
    pub const fn field_names(self) -> &'static [&'static str] {
        match self {
            Self::Porosity => &["porosity"],
            Self::PoreSize => &["dp_mean", "dp_std", "dp_skewness", "dp_kurtosis"],
            Self::ChordLength => &["cl_mean", "cl_std", "cl_skewness", "cl_kurtosis"],
            Self::TwoPointCorrelation => {
                &["tpc_length", "tpc_integral_scale", "tpc_slope_at_origin"]
            }
            Self::LinealPath => &["lpd_mean", "lpd_std", "lpd_skewness", "lpd_kurtosis"],
            Self::RadialDensity => &["rdf_mean", "rdf_std", "rdf_skewness", "rdf_kurtosis"],
            Self::EulerCharacteristic => &["euler_characteristic"],
            Self::Tortuosity { axis: 0 } => &["tortuosity0"],
            Self::Tortuosity { axis: 1 } => &["tortuosity1"],
            Self::Tortuosity { .. } => &["tortuosity2"],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Porosity => f.write_str("porosity"),
            Self::PoreSize => f.write_str("pore size"),
            Self::ChordLength => f.write_str("chord length"),
            Self::TwoPointCorrelation => f.write_str("two-point correlation"),
            Self::LinealPath => f.write_str("lineal path"),
            Self::RadialDensity => f.write_str("radial density"),
            Self::EulerCharacteristic => f.write_str("Euler characteristic"),
            Self::Tortuosity { axis } => write!(f, "tortuosity {axis}"),
        }
    }
}

/// Why a stage left its fields absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// Stage that failed
    pub stage: Stage,
    /// Error classification
    pub kind: ErrorKind,
    /// Rendered error message
    pub message: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed ({}): {}", self.stage, self.kind, self.message)
    }
}

/// Scalar descriptors of one volume, absent where a stage failed
///
/// Length-valued fields are in the volume's physical unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorRecord {
    pub(crate) porosity: Option<f64>,
    pub(crate) pore_size: Option<MomentSet>,
    pub(crate) chord_length: Option<MomentSet>,
    pub(crate) correlation: Option<CorrelationScales>,
    pub(crate) lineal_path: Option<MomentSet>,
    pub(crate) radial_density: Option<MomentSet>,
    pub(crate) euler_characteristic: Option<i64>,
    pub(crate) tortuosity: [Option<f64>; 3],
    pub(crate) failures: Vec<StageFailure>,
}

fn moment_values(moments: Option<MomentSet>) -> [Option<f64>; 4] {
    moments.map_or([None; 4], |m| {
        [Some(m.mean), Some(m.std), Some(m.skewness), Some(m.kurtosis)]
    })
}

impl DescriptorRecord {
    /// Void fraction
    pub const fn porosity(&self) -> Option<f64> {
        self.porosity
    }

    /// Pore diameter moments
    pub const fn pore_size(&self) -> Option<MomentSet> {
        self.pore_size
    }

    /// Chord length moments
    pub const fn chord_length(&self) -> Option<MomentSet> {
        self.chord_length
    }

    /// Correlation length scales
    pub const fn correlation(&self) -> Option<CorrelationScales> {
        self.correlation
    }

    /// Lineal path moments
    pub const fn lineal_path(&self) -> Option<MomentSet> {
        self.lineal_path
    }

    /// Radial density moments
    pub const fn radial_density(&self) -> Option<MomentSet> {
        self.radial_density
    }

    /// Euler characteristic of the phase boundary
    pub const fn euler_characteristic(&self) -> Option<i64> {
        self.euler_characteristic
    }

    /// Tortuosity along `axis`; `None` for failed stages or axes above 2
    pub fn tortuosity(&self, axis: usize) -> Option<f64> {
        self.tortuosity.get(axis).copied().flatten()
    }

    /// Stage failures in execution order
    pub fn failures(&self) -> &[StageFailure] {
        &self.failures
    }

    /// Failure recorded for `stage`, if any
    pub fn failure(&self, stage: Stage) -> Option<&StageFailure> {
        self.failures.iter().find(|failure| failure.stage == stage)
    }

    /// Every field in stable order, `None` where absent
    pub fn fields(&self) -> Vec<(&'static str, Option<f64>)> {
        let correlation = self.correlation.map_or([None; 3], |c| {
            [Some(c.length), Some(c.integral_scale), c.slope_at_origin]
        });
        let mut values = Vec::with_capacity(24);
        values.push(self.porosity);
        values.extend(moment_values(self.pore_size));
        values.extend(moment_values(self.chord_length));
        values.extend(correlation);
        values.extend(moment_values(self.lineal_path));
        values.extend(moment_values(self.radial_density));
        // Euler characteristics stay far below 2^53
        #[allow(clippy::cast_precision_loss)]
        let euler = self.euler_characteristic.map(|chi| chi as f64);
        values.push(euler);
        values.extend(self.tortuosity);

        Stage::ALL
            .iter()
            .flat_map(|stage| stage.field_names().iter().copied())
            .zip(values)
            .collect()
    }

    /// Value of a named field
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .and_then(|(_, value)| value)
    }

    /// Names of absent fields in stable order
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether every field holds a value
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_some())
    }
}

impl fmt::Display for DescriptorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.fields() {
            match value {
                Some(value) => writeln!(f, "{name} = {value}")?,
                None => writeln!(f, "{name} = -")?,
            }
        }
        Ok(())
    }
}
