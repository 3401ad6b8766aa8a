//! Score normalization
//!
//! Maps raw backend scores onto a `0..=100` percentage scale under an
//! explicitly chosen [`ScorePolicy`] and sorts the batch best-first.

use super::{Hit, ScorePolicy, ViewResult};

/// Score each hit and sort by descending percentage.
///
/// The sort is stable, so equal percentages keep their input order.
pub fn normalize(hits: &[Hit], policy: ScorePolicy) -> Vec<ViewResult> {
    if hits.is_empty() {
        return Vec::new();
    }

    let scores: Vec<f64> = hits.iter().map(|h| finite_or_zero(h.score)).collect();
    let pcts: Vec<f64> = match policy {
        ScorePolicy::Absolute => scores.iter().map(|&s| absolute_pct(s)).collect(),
        ScorePolicy::MinMax => min_max_pcts(&scores),
    };

    let mut results: Vec<ViewResult> = hits
        .iter()
        .zip(pcts)
        .map(|(hit, score_pct)| ViewResult {
            hit: hit.clone(),
            score_pct,
        })
        .collect();

    results.sort_by(|a, b| b.score_pct.total_cmp(&a.score_pct));
    results
}

/// Drop results scored below `min_pct`
pub fn retain_min_pct(results: Vec<ViewResult>, min_pct: f64) -> Vec<ViewResult> {
    results
        .into_iter()
        .filter(|r| r.score_pct >= min_pct)
        .collect()
}

fn finite_or_zero(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

fn round_one_decimal(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

// 0.832 -> 83.2, rounded from per-mille so half points round up
fn absolute_pct(score: f64) -> f64 {
    ((score * 1000.0).round() / 10.0).clamp(0.0, 100.0)
}

fn min_max_pcts(scores: &[f64]) -> Vec<f64> {
    // Work on halves so `max - min` cannot overflow for wide finite batches
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min) / 2.0;
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max) / 2.0;
    let range = max - min;

    if range <= 0.0 {
        return vec![100.0; scores.len()];
    }

    scores
        .iter()
        .map(|&s| round_one_decimal((s / 2.0 - min) / range * 100.0).clamp(0.0, 100.0))
        .collect()
}
