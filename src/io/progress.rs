//! Per-volume stage progress with automatic batching for large sets

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::algorithm::record::Stage;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

/// Display state of one volume
#[derive(Debug, Clone, Default)]
struct VolumeState {
    name: String,
    completed: usize,
    stages: usize,
    current: Option<Stage>,
}

/// Coordinates progress display while characterizing volumes
///
/// Shows one stage bar per volume for small batches and adds a single batch
/// bar once the volume count exceeds the individual bar limit; stage bars
/// then roll over the most recent volumes.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    volume_bars: Vec<ProgressBar>,
    volume_states: Vec<VolumeState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Volumes: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create an empty progress display
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            volume_bars: Vec::new(),
            volume_states: Vec::new(),
        }
    }

    /// Allocate bars for `volume_count` volumes
    pub fn initialize(&mut self, volume_count: usize) {
        if volume_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(volume_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..volume_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(STAGE_STYLE.clone());
            self.volume_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Whether a batch bar is shown
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Begin tracking a volume with `stages` stages to run
    pub fn start_volume(&mut self, index: usize, path: &Path, stages: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.volume_states.len() {
            self.volume_states.resize(index + 1, VolumeState::default());
        }
        if let Some(state) = self.volume_states.get_mut(index) {
            *state = VolumeState {
                name,
                completed: 0,
                stages,
                current: None,
            };
        }
        self.update_bars();
    }

    /// Report the stage about to run and how many have finished
    pub fn update_stage(&mut self, index: usize, completed: usize, stage: Option<Stage>) {
        if let Some(state) = self.volume_states.get_mut(index) {
            state.completed = completed;
            state.current = stage;
        }
        self.update_bars();
    }

    /// Mark a volume as characterized
    pub fn complete_volume(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.volume_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.completed = state.stages;
            state.current = None;
        }
        self.update_bars();
    }

    /// Clear every bar
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All volumes characterized");
        }
        let _ = self.multi_progress.clear();
    }

    // Show the most recent volumes on the available bars
    fn update_bars(&self) {
        let active: Vec<&VolumeState> = self
            .volume_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, state) in self.volume_bars.iter().zip(visible) {
            bar.set_length(state.stages as u64);
            bar.set_position(state.completed as u64);
            bar.set_prefix(state.name.clone());
            bar.set_message(
                state
                    .current
                    .map_or_else(String::new, |stage| stage.to_string()),
            );
        }

        for bar in self.volume_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
