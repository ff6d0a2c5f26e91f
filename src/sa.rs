// Generic simulated annealing over an arbitrary solution type.
//
// Classic geometric schedule: temperature at step k is
// initial_temp * cooling_rate^k. A candidate that scores lower than the
// current solution is always taken; a worse one is taken with probability
// exp(-delta / temperature). The run ends after the configured number of
// iterations, or early if the neighbor function reports that no legal
// move remains, and returns the solution held at that point.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

const PROGRESS_INTERVAL: usize = 200_000;

/// Annealing schedule. Loaded from JSON with [`SAConfig::load`]; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SAConfig {
    pub initial_temp: f64,
    pub cooling_rate: f64,
    pub iterations: usize,
}

impl Default for SAConfig {
    fn default() -> Self {
        SAConfig {
            initial_temp: 100.0,
            cooling_rate: 0.95,
            iterations: 100_000,
        }
    }
}

impl SAConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: SAConfig = serde_json::from_str(&data)?;
        Ok(config)
    }
}

/// Outcome of an annealing run: the final solution plus run statistics.
#[derive(Debug)]
pub struct Annealed<T> {
    pub solution: T,
    pub score: f64,
    /// Iterations actually executed, which is less than the configured
    /// count when the neighborhood runs dry.
    pub iterations: usize,
    pub accepted: usize,
}

/// Anneal `start` under `config`. `neighbor` proposes a candidate near the
/// current solution or None when the solution has no neighbors; `score` is
/// the cost to minimize.
pub fn solve<T, R: Rng>(
    start: T,
    config: &SAConfig,
    mut neighbor: impl FnMut(&T, &mut R) -> Option<T>,
    mut score: impl FnMut(&T) -> f64,
    rng: &mut R,
) -> Annealed<T> {
    let mut solution = start;
    let mut current = score(&solution);
    let mut accepted = 0usize;

    for k in 0..config.iterations {
        if k % PROGRESS_INTERVAL == 0 && k > 0 {
            tracing::debug!("iteration {}: score {:.4}", k, current);
        }
        let Some(candidate) = neighbor(&solution, rng) else {
            tracing::debug!("no legal move left after {} iterations", k);
            return Annealed {
                solution,
                score: current,
                iterations: k,
                accepted,
            };
        };
        let candidate_score = score(&candidate);
        let temp = config.initial_temp * config.cooling_rate.powf(k as f64);
        if metropolis_accept(candidate_score - current, temp, rng) {
            solution = candidate;
            current = candidate_score;
            accepted += 1;
        }
    }

    Annealed {
        solution,
        score: current,
        iterations: config.iterations,
        accepted,
    }
}

fn metropolis_accept(delta: f64, temp: f64, rng: &mut impl Rng) -> bool {
    if delta < 0.0 {
        return true;
    }
    let probability = (-delta / temp).exp();
    rng.random::<f64>() < probability
}
