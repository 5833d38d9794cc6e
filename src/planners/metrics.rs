//! Episode outcome counting and sweep statistics

/// How a single episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    ReachedGoal { steps: usize },
    FellInHole { steps: usize },
    /// Step cap hit, or the strategy ran out of moves
    StepLimit { steps: usize },
}

impl EpisodeOutcome {
    pub fn steps(&self) -> usize {
        match *self {
            EpisodeOutcome::ReachedGoal { steps }
            | EpisodeOutcome::FellInHole { steps }
            | EpisodeOutcome::StepLimit { steps } => steps,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EpisodeOutcome::ReachedGoal { .. })
    }
}

/// Aggregated outcomes of a batch of episodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub successes: usize,
    pub hole_failures: usize,
    pub step_limit_failures: usize,
    /// Episodes abandoned because the simulator or policy failed
    pub aborted: usize,
    /// Steps across all completed episodes
    pub total_steps: usize,
}

impl OutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &EpisodeOutcome) {
        match outcome {
            EpisodeOutcome::ReachedGoal { .. } => self.successes += 1,
            EpisodeOutcome::FellInHole { .. } => self.hole_failures += 1,
            EpisodeOutcome::StepLimit { .. } => self.step_limit_failures += 1,
        }
        self.total_steps += outcome.steps();
    }

    pub fn record_aborted(&mut self) {
        self.aborted += 1;
    }

    /// Episodes that ran to an outcome (aborted ones excluded)
    pub fn episodes(&self) -> usize {
        self.successes + self.hole_failures + self.step_limit_failures
    }

    pub fn failures(&self) -> usize {
        self.hole_failures + self.step_limit_failures
    }

    pub fn success_rate(&self) -> f64 {
        self.share(self.successes)
    }

    pub fn hole_rate(&self) -> f64 {
        self.share(self.hole_failures)
    }

    pub fn step_limit_rate(&self) -> f64 {
        self.share(self.step_limit_failures)
    }

    pub fn avg_steps(&self) -> f64 {
        self.share(self.total_steps)
    }

    fn share(&self, count: usize) -> f64 {
        let episodes = self.episodes();
        if episodes > 0 {
            count as f64 / episodes as f64
        } else {
            0.0
        }
    }

    pub fn print_summary(&self, title: &str) {
        tracing::info!("=== Results for \"{}\" ===", title);
        tracing::info!("Episodes: {}", self.episodes());
        tracing::info!("Reached the goal: {}", self.successes);
        tracing::info!("Fell into a hole: {}", self.hole_failures);
        tracing::info!("Ran out of steps: {}", self.step_limit_failures);
        if self.aborted > 0 {
            tracing::warn!("Aborted: {}", self.aborted);
        }
        tracing::info!("Success rate: {:.2}%", self.success_rate() * 100.0);
        tracing::info!(
            "Failure rate: {:.2}% (hole {:.2}%, step limit {:.2}%)",
            (self.hole_rate() + self.step_limit_rate()) * 100.0,
            self.hole_rate() * 100.0,
            self.step_limit_rate() * 100.0
        );
        tracing::info!("Avg steps: {:.2}", self.avg_steps());
    }
}

/// Mean and population standard deviation of a set of rates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepStatistics {
    pub mean: f64,
    pub std_dev: f64,
}

impl SweepStatistics {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
