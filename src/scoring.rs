//! Scoring parameters for the local-alignment recurrence.
//!
//! Scores are real numbers and gaps use a flat per-position penalty: there is
//! no distinction between opening and extending a gap.

use crate::error::{Result, SwError};

/// Default reward for a pair of equal symbols.
pub const DEFAULT_MATCH_SCORE: f64 = 3.0;
/// Default cost of one gap position.
pub const DEFAULT_GAP_PENALTY: f64 = -2.0;

/// Relative tolerance under which two scores count as tied.
pub const SCORE_TOLERANCE: f64 = 1e-9;

/// Whether `a` and `b` are equal up to rounding, relative to their magnitude
/// (absolute below 1.0).
#[inline]
pub fn scores_tie(a: f64, b: f64) -> bool {
    (a - b).abs() <= SCORE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Match / mismatch / gap parameters.
///
/// `gap_penalty` is added as-is, so it is conventionally negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scoring {
    pub match_score: f64,
    pub mismatch_score: f64,
    pub gap_penalty: f64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_SCORE, None, DEFAULT_GAP_PENALTY)
    }
}

impl Scoring {
    /// Build a scoring; a missing `mismatch_score` mirrors the match score,
    /// i.e. becomes `-match_score`.
    pub fn new(match_score: f64, mismatch_score: Option<f64>, gap_penalty: f64) -> Self {
        Self {
            match_score,
            mismatch_score: mismatch_score.unwrap_or(-match_score),
            gap_penalty,
        }
    }

    pub fn with_match_score(mut self, match_score: f64) -> Self {
        self.match_score = match_score;
        self
    }

    pub fn with_mismatch_score(mut self, mismatch_score: f64) -> Self {
        self.mismatch_score = mismatch_score;
        self
    }

    pub fn with_gap_penalty(mut self, gap_penalty: f64) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    /// Substitution score for aligning `a` against `b`.
    #[inline]
    pub fn pair(&self, a: u8, b: u8) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Reject NaN or infinite parameters.
    ///
    /// The matrix builder assumes finite inputs; callers that accept scores
    /// from users should validate first.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("match_score", self.match_score),
            ("mismatch_score", self.mismatch_score),
            ("gap_penalty", self.gap_penalty),
        ] {
            if !value.is_finite() {
                return Err(SwError::InvalidScoring { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_noise_is_a_tie() {
        assert!(scores_tie(0.3 + -0.2, 0.1));
        assert!(scores_tie(0.1 + 0.2, 0.3));
        assert!(scores_tie(1e12 + 1e-3, 1e12));
        assert!(!scores_tie(0.1, 0.1 + 1e-6));
        assert!(!scores_tie(1e-8, 0.0));
    }

    #[test]
    fn defaults_follow_documented_values() {
        let s = Scoring::default();
        assert_eq!(s.match_score, 3.0);
        assert_eq!(s.mismatch_score, -3.0);
        assert_eq!(s.gap_penalty, -2.0);
    }

    #[test]
    fn missing_mismatch_mirrors_match() {
        let s = Scoring::new(5.0, None, -1.0);
        assert_eq!(s.mismatch_score, -5.0);
        let s = Scoring::new(5.0, Some(-0.5), -1.0);
        assert_eq!(s.mismatch_score, -0.5);
    }

    #[test]
    fn pair_distinguishes_equal_symbols() {
        let s = Scoring::default();
        assert_eq!(s.pair(b'A', b'A'), 3.0);
        assert_eq!(s.pair(b'A', b'C'), -3.0);
        assert_eq!(s.pair(b'-', b'-'), 3.0);
    }

    #[test]
    fn validate_rejects_non_finite() {
        assert!(Scoring::default().validate().is_ok());
        let bad = Scoring::default().with_gap_penalty(f64::NEG_INFINITY);
        assert!(matches!(
            bad.validate(),
            Err(SwError::InvalidScoring {
                name: "gap_penalty",
                ..
            })
        ));
        let bad = Scoring::default().with_match_score(f64::NAN);
        assert!(bad.validate().is_err());
    }
}
