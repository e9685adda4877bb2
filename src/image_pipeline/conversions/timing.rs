//! Wall-clock durations of the pipeline stages.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Stage durations in execution order. A stage that runs more than once
/// appears once per run.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &'static str, duration: Duration) {
        self.steps.push(StepTiming { name, duration });
    }

    /// Runs `f` and records how long it took under `name`.
    pub fn time<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.record(name, start.elapsed());
        value
    }

    /// Combined duration of every run of `name`, `None` if it never ran.
    pub fn step(&self, name: &str) -> Option<Duration> {
        self.steps
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.duration)
            .reduce(|a, b| a + b)
    }

    pub fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }
}

impl fmt::Display for PipelineTimings {
    /// One line per stage with its share of the total.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total().as_secs_f64();
        writeln!(f, "{:<24} {:>10} {:>7}", "step", "ms", "share")?;
        for step in &self.steps {
            let secs = step.duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            writeln!(f, "{:<24} {:>10.3} {:>6.1}%", step.name, secs * 1000.0, share)?;
        }
        writeln!(f, "{:<24} {:>10.3}", "total", total * 1000.0)
    }
}
