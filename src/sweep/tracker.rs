//! Running minimum over evaluated combinations.
//!
//! Starts empty, so the first finite error always becomes the best. After
//! that a result only replaces the best when its error is strictly lower,
//! which makes the earliest combination win ties.

use crate::domain::EvalResult;

#[derive(Debug, Clone, Default)]
pub struct BestTracker {
    best: Option<EvalResult>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a result; returns `true` if it became the new best.
    pub fn offer(&mut self, result: &EvalResult) -> bool {
        if !result.error.is_finite() {
            return false;
        }
        let improves = match &self.best {
            None => true,
            Some(best) => result.error < best.error,
        };
        if improves {
            self.best = Some(result.clone());
        }
        improves
    }

    pub fn best(&self) -> Option<&EvalResult> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<EvalResult> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParamCombo;

    fn result(index: usize, error: f64) -> EvalResult {
        EvalResult {
            index,
            combo: ParamCombo {
                ct: index as f64,
                at: 1.0,
                css: 1.0,
                a2: 1.0,
            },
            path: format!("combo-{index}"),
            error,
        }
    }

    #[test]
    fn first_result_becomes_best() {
        let mut tracker = BestTracker::new();
        assert!(tracker.best().is_none());
        assert!(tracker.offer(&result(0, 123.0)));
        assert_eq!(tracker.best().map(|b| b.index), Some(0));
    }

    #[test]
    fn keeps_minimum_of_sequence() {
        let mut tracker = BestTracker::new();
        let accepted: Vec<bool> = [0.5, 0.2, 0.3]
            .iter()
            .enumerate()
            .map(|(i, &e)| tracker.offer(&result(i, e)))
            .collect();
        assert_eq!(accepted, vec![true, true, false]);

        let best = tracker.into_best().unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.error, 0.2);
    }

    #[test]
    fn ties_keep_earlier_result() {
        let mut tracker = BestTracker::new();
        tracker.offer(&result(0, 0.1));
        assert!(!tracker.offer(&result(1, 0.1)));
        assert_eq!(tracker.best().unwrap().index, 0);
    }

    #[test]
    fn non_finite_errors_are_ignored() {
        let mut tracker = BestTracker::new();
        assert!(!tracker.offer(&result(0, f64::NAN)));
        assert!(tracker.best().is_none());
        tracker.offer(&result(1, 0.4));
        assert!(!tracker.offer(&result(2, f64::NEG_INFINITY)));
        assert_eq!(tracker.best().unwrap().index, 1);
    }
}
