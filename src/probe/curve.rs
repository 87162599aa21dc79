//! Per-epoch metric history with best-epoch selection

use std::collections::BTreeMap;

/// History of one scalar metric recorded once per epoch.
///
/// `best()` selects the maximum score; when several epochs tie on score, the
/// earliest epoch wins.
#[derive(Clone, Debug, Default)]
pub struct MetricCurve {
    scores: BTreeMap<usize, f64>,
}

impl MetricCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the score observed at `epoch`.
    pub fn record(&mut self, epoch: usize, score: f64) {
        self.scores.insert(epoch, score);
    }

    /// Number of recorded epochs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score at a specific epoch, if recorded.
    #[must_use]
    pub fn get(&self, epoch: usize) -> Option<f64> {
        self.scores.get(&epoch).copied()
    }

    /// `(epoch, score)` of the best epoch: highest score, earliest epoch on
    /// ties. `None` when nothing has been recorded.
    #[must_use]
    pub fn best(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        // BTreeMap iterates in ascending epoch order, so strict comparison
        // keeps the earliest epoch among ties.
        for (&epoch, &score) in &self.scores {
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((epoch, score)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_curve_has_no_best() {
        assert!(MetricCurve::new().best().is_none());
    }

    #[test]
    fn test_best_picks_maximum() {
        let mut curve = MetricCurve::new();
        curve.record(1, 0.3);
        curve.record(2, 0.8);
        curve.record(3, 0.5);
        assert_eq!(curve.best(), Some((2, 0.8)));
    }

    #[test]
    fn test_ties_resolve_to_earliest_epoch() {
        let mut curve = MetricCurve::new();
        curve.record(1, 0.5);
        curve.record(4, 0.9);
        curve.record(7, 0.9);
        curve.record(2, 0.9);
        assert_eq!(curve.best(), Some((2, 0.9)));
    }

    #[test]
    fn test_record_overwrites_epoch() {
        let mut curve = MetricCurve::new();
        curve.record(3, 0.1);
        curve.record(3, 0.7);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.get(3), Some(0.7));
    }
}
