use std::time::Duration;

use crate::{AnalysisKind, ProgressEvent};

/// One row of a scripted progress table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedStep {
    /// Percentage at which the step is considered reached.
    pub threshold: u8,
    pub message: String,
}

impl ScriptedStep {
    fn new(threshold: u8, message: &str) -> Self {
        Self {
            threshold,
            message: message.to_string(),
        }
    }
}

/// Display heuristics for one analysis kind.
///
/// None of these numbers are measured; they approximate how long the backend
/// usually takes and how many phases it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressProfile {
    pub total_steps: u32,
    pub nominal_duration: Duration,
    pub steps: Vec<ScriptedStep>,
}

impl ProgressProfile {
    pub fn single() -> Self {
        Self {
            total_steps: 6,
            nominal_duration: Duration::from_secs(8),
            steps: vec![
                ScriptedStep::new(10, "🔍 Initializing analysis..."),
                ScriptedStep::new(25, "📊 Processing comment text..."),
                ScriptedStep::new(45, "🧠 Analyzing logical patterns..."),
                ScriptedStep::new(65, "⚖️ Evaluating fallacy indicators..."),
                ScriptedStep::new(80, "📝 Generating assessment..."),
                ScriptedStep::new(95, "✨ Finalizing results..."),
            ],
        }
    }

    pub fn batch() -> Self {
        Self {
            total_steps: 8,
            nominal_duration: Duration::from_secs(25),
            steps: vec![
                ScriptedStep::new(5, "🌐 Fetching Reddit content..."),
                ScriptedStep::new(15, "📃 Parsing comments structure..."),
                ScriptedStep::new(30, "🔍 Analyzing comment #1-5..."),
                ScriptedStep::new(45, "🔍 Analyzing comment #6-10..."),
                ScriptedStep::new(60, "🔍 Analyzing comment #11-15..."),
                ScriptedStep::new(75, "🔍 Analyzing comment #16-20..."),
                ScriptedStep::new(90, "📊 Aggregating analysis results..."),
                ScriptedStep::new(95, "📋 Preparing summary report..."),
            ],
        }
    }

    pub fn for_kind(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::Single => Self::single(),
            AnalysisKind::Batch => Self::batch(),
        }
    }

    /// Period between simulated progress updates.
    pub fn tick_interval(&self) -> Duration {
        let steps = self.steps.len().max(1) as u32;
        self.nominal_duration / steps
    }

    /// Builds a progress event from a backend-reported percentage.
    ///
    /// Step and elapsed time are projections of the percentage onto
    /// `total_steps` and `nominal_duration`, not measurements.
    pub fn estimate(&self, progress: f64, message: impl Into<String>) -> ProgressEvent {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let total_steps = self.total_steps.max(1);
        let step = ((progress * f64::from(total_steps) / 100.0).ceil() as u32).clamp(1, total_steps);
        let elapsed_seconds =
            (progress * self.nominal_duration.as_secs_f64() / 100.0).floor() as u64;

        ProgressEvent {
            percentage: progress.round() as u8,
            message: message.into(),
            step,
            total_steps,
            elapsed_seconds,
        }
    }
}

/// Per-kind profiles, overridable from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profiles {
    pub single: ProgressProfile,
    pub batch: ProgressProfile,
}

impl Default for Profiles {
    fn default() -> Self {
        Self {
            single: ProgressProfile::single(),
            batch: ProgressProfile::batch(),
        }
    }
}

impl Profiles {
    pub fn get(&self, kind: AnalysisKind) -> &ProgressProfile {
        match kind {
            AnalysisKind::Single => &self.single,
            AnalysisKind::Batch => &self.batch,
        }
    }

    pub fn get_mut(&mut self, kind: AnalysisKind) -> &mut ProgressProfile {
        match kind {
            AnalysisKind::Single => &mut self.single,
            AnalysisKind::Batch => &mut self.batch,
        }
    }
}
