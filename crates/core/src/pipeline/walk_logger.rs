use std::collections::HashMap;
use std::time::Instant;

/// Observer for dataset walk events.
///
/// The walker reports through this trait so callers choose where progress,
/// timings and skipped samples go without touching the walk itself.
pub trait WalkLogger: Send {
    /// Report identifier-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage (`decode`, `detect`, `display`) took
    /// for one sample.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-sample metric (e.g. faces found).
    fn metric(&mut self, name: &str, value: f64);

    /// A sample or directory was skipped; the walk continues.
    fn skipped(&mut self, sample: &str, path: &str, reason: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Something was wrong with a sample that did not stop it from being
    /// displayed, e.g. unreadable ground truth.
    fn warn(&mut self, message: &str);

    /// Emit an end-of-walk summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullWalkLogger;

impl WalkLogger for NullWalkLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn skipped(&mut self, _sample: &str, _path: &str, _reason: &str) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// Sends events to the `log` facade and keeps per-stage timings and
/// metrics for a summary at the end of the walk.
///
/// Progress lines are throttled to every `throttle` identifiers.
pub struct LogWalkLogger {
    throttle: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total: usize,
    skipped: usize,
    warnings: usize,
}

impl LogWalkLogger {
    pub fn new(throttle: usize) -> Self {
        Self {
            throttle: throttle.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total: 0,
            skipped: 0,
            warnings: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty()
            && self.metrics.is_empty()
            && self.skipped == 0
            && self.warnings == 0
        {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Walk summary ({} identifiers, {} skipped, {} warnings, {:.1}s total):",
            self.total,
            self.skipped,
            self.warnings,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({} samples)",
                durations.len()
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let sum: f64 = values.iter().sum();
            let avg = sum / values.len().max(1) as f64;
            lines.push(format!("  {name}: avg {avg:.1}  total {sum:.0}"));
        }

        Some(lines.join("\n"))
    }

}

impl Default for LogWalkLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl WalkLogger for LogWalkLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total = total;
        if total > 0 && (current % self.throttle == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Walking: {current}/{total} identifiers ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn skipped(&mut self, sample: &str, path: &str, reason: &str) {
        self.skipped += 1;
        log::warn!("Skipping {sample} ({path}): {reason}");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
