//! Drives strategies against a simulator and aggregates the outcomes.

use tracing::{debug, info, warn};

use crate::infra::{EpisodeError, ReportSink, Simulator};
use crate::state::Grid;

use super::metrics::{EpisodeOutcome, OutcomeCounts, SweepStatistics};
use super::random::RandomSource;
use super::strategies::{Blended, BranchUsage, Strategy};
use super::table::DirectionTable;

/// Result for one mixing probability of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaPoint {
    pub alpha: f64,
    pub counts: OutcomeCounts,
    pub usage: BranchUsage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlphaSweep {
    pub points: Vec<AlphaPoint>,
    /// Statistics over the per-alpha success rates, in percent
    pub statistics: SweepStatistics,
}

/// `n` evenly spaced mixing probabilities from 0 to 1 inclusive.
pub fn alpha_steps(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

pub struct ExperimentRunner<S: Simulator> {
    simulator: S,
    max_episode_steps: usize,
}

impl<S: Simulator> ExperimentRunner<S> {
    pub fn new(simulator: S, max_episode_steps: usize) -> Self {
        Self {
            simulator,
            max_episode_steps,
        }
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Play one episode: observe, act, repeat until the lake ends it, the
    /// strategy runs out of moves or the step cap is reached.
    pub fn run_episode<T: Strategy + ?Sized>(
        &mut self,
        strategy: &mut T,
    ) -> Result<EpisodeOutcome, EpisodeError> {
        let mut observation = self.simulator.reset()?;
        strategy.begin_episode();

        for steps in 0..self.max_episode_steps {
            let action = match strategy.next_action(observation)? {
                Some(action) => action,
                None => return Ok(EpisodeOutcome::StepLimit { steps }),
            };

            let outcome = self.simulator.step(action)?;
            if outcome.done {
                let steps = steps + 1;
                return Ok(if outcome.reached_goal() {
                    EpisodeOutcome::ReachedGoal { steps }
                } else {
                    EpisodeOutcome::FellInHole { steps }
                });
            }
            observation = outcome.observation;
        }

        Ok(EpisodeOutcome::StepLimit {
            steps: self.max_episode_steps,
        })
    }

    /// Run `episodes` episodes; a failed episode is logged, counted as aborted
    /// and the run continues.
    #[tracing::instrument(level = "debug", skip(self, strategy), fields(strategy = strategy.name()))]
    pub fn run<T: Strategy + ?Sized>(&mut self, strategy: &mut T, episodes: usize) -> OutcomeCounts {
        let mut counts = OutcomeCounts::new();
        for episode in 0..episodes {
            match self.run_episode(strategy) {
                Ok(outcome) => {
                    debug!("episode {}: {:?}", episode + 1, outcome);
                    counts.record(&outcome);
                }
                Err(err) => {
                    warn!("episode {} aborted: {}", episode + 1, err);
                    counts.record_aborted();
                }
            }
        }
        counts
    }

    /// Run, log a summary and hand the counts to `sink`.
    pub fn run_study<T: Strategy + ?Sized>(
        &mut self,
        strategy: &mut T,
        episodes: usize,
        sink: &mut dyn ReportSink,
    ) -> OutcomeCounts {
        let title = strategy.name().to_string();
        let counts = self.run(strategy, episodes);
        counts.print_summary(&title);
        report_outcomes(sink, &title, &counts);
        counts
    }

    /// Blended strategy at every alpha in `alphas`, followed by the
    /// success-rate trend chart.
    pub fn run_alpha_sweep<R: RandomSource + ?Sized>(
        &mut self,
        grid: &Grid,
        table: &DirectionTable,
        alphas: &[f64],
        episodes: usize,
        random: &mut R,
        sink: &mut dyn ReportSink,
    ) -> AlphaSweep {
        let mut points = Vec::with_capacity(alphas.len());

        for &alpha in alphas {
            let mut strategy = Blended::new(grid, table, alpha, &mut *random);
            let counts = self.run_study(&mut strategy, episodes, sink);
            let usage = strategy.usage();
            info!(
                "Greedy branch used {} times ({:.1}%), table branch {} times ({:.1}%)",
                usage.greedy,
                usage.greedy_share() * 100.0,
                usage.table,
                (1.0 - usage.greedy_share()) * 100.0
            );
            points.push(AlphaPoint {
                alpha: strategy.alpha(),
                counts,
                usage,
            });
        }

        let trend: Vec<(f64, f64)> = points
            .iter()
            .map(|point| (point.alpha, point.counts.success_rate() * 100.0))
            .collect();
        if let Err(err) = sink.trend_chart("\"Success Rate - Alpha\" Diagram", &trend) {
            warn!("trend report failed: {}", err);
        }

        let rates: Vec<f64> = trend.iter().map(|(_, rate)| *rate).collect();
        let statistics = SweepStatistics::from_values(&rates);
        info!("Success rates: {:?}", rates);
        info!("Average success rate: {:.2}%", statistics.mean);
        info!("Standard deviation of the success rate: {:.2}", statistics.std_dev);

        AlphaSweep { points, statistics }
    }
}

fn report_outcomes(sink: &mut dyn ReportSink, title: &str, counts: &OutcomeCounts) {
    let chart_title = format!("{}: Success/Failure numbers", title);
    if let Err(err) = sink.outcome_chart(&chart_title, counts) {
        warn!("report for \"{}\" failed: {}", title, err);
    }
}
