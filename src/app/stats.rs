use std::fmt::Write;

use crate::brains::BrainKind;

/// Step-count statistics for one brain across a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub kind: BrainKind,
    pub trials: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: usize,
    pub max: usize,
    /// Fraction of trials in which the brain ended on the goal
    pub goal_rate: f64,
}

impl Summary {
    /// `None` when there are no trials.
    pub fn from_steps(kind: BrainKind, steps: &[usize], reached_goal: &[bool]) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        let n = steps.len() as f64;
        let mean = steps.iter().sum::<usize>() as f64 / n;
        let variance = steps
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        let mut sorted = steps.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        };

        let reached = reached_goal.iter().filter(|&&r| r).count();
        Some(Summary {
            kind,
            trials: steps.len(),
            mean,
            median,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            goal_rate: reached as f64 / n,
        })
    }
}

/// Moving average over `window` consecutive values. Only full windows are reported, so the
/// result has `data.len() - window + 1` entries, or none if the window does not fit.
pub fn rolling_average(data: &[usize], window: usize) -> Vec<f64> {
    if window == 0 || window > data.len() {
        return Vec::new();
    }
    data.windows(window)
        .map(|w| w.iter().sum::<usize>() as f64 / window as f64)
        .collect()
}

/// Plain-text table of the summaries, one row per brain. `rolling_last` holds each brain's
/// latest rolling average over `window` trials, `None` when fewer trials ran.
pub fn format_table(summaries: &[Summary], rolling_last: &[Option<f64>], window: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>8} {:>8} {:>6} {:>6} {:>7} {:>12}",
        "Brain",
        "Avg steps",
        "Median",
        "StdDev",
        "Min",
        "Max",
        "Goal %",
        format!("Last {window}")
    );
    for (summary, rolling) in summaries.iter().zip(rolling_last) {
        let rolling = rolling.map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
        let _ = writeln!(
            out,
            "{:<10} {:>10.2} {:>8.1} {:>8.2} {:>6} {:>6} {:>6.1}% {:>12}",
            summary.kind.to_string(),
            summary.mean,
            summary.median,
            summary.std_dev,
            summary.min,
            summary.max,
            summary.goal_rate * 100.0,
            rolling
        );
    }
    out
}
