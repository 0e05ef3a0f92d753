use crate::error::Result;
use crate::scoring::{Scoring, DEFAULT_GAP_PENALTY, DEFAULT_MATCH_SCORE};
use crate::traceback::TracebackStart;
use crate::Aligner;

/// Step-by-step configuration of an [`Aligner`].
///
/// A mismatch score left unset mirrors the match score at build time, so
/// `with_match_score(5.0)` alone yields a mismatch score of `-5.0`.
#[derive(Clone, Copy, Debug)]
pub struct AlignerBuilder {
    match_score: f64,
    mismatch_score: Option<f64>,
    gap_penalty: f64,
    start: TracebackStart,
}

impl Default for AlignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignerBuilder {
    pub fn new() -> Self {
        Self {
            match_score: DEFAULT_MATCH_SCORE,
            mismatch_score: None,
            gap_penalty: DEFAULT_GAP_PENALTY,
            start: TracebackStart::GlobalMax,
        }
    }
    pub fn with_match_score(mut self, match_score: f64) -> Self {
        self.match_score = match_score;
        self
    }
    pub fn with_mismatch_score(mut self, mismatch_score: f64) -> Self {
        self.mismatch_score = Some(mismatch_score);
        self
    }
    pub fn with_gap_penalty(mut self, gap_penalty: f64) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }
    pub fn with_traceback_start(mut self, start: TracebackStart) -> Self {
        self.start = start;
        self
    }
    pub fn scoring(&self) -> Scoring {
        Scoring::new(self.match_score, self.mismatch_score, self.gap_penalty)
    }
    pub fn build(self) -> Aligner {
        Aligner::with_start(self.scoring(), self.start)
    }
    /// Like [`build`](Self::build), rejecting non-finite parameters.
    pub fn try_build(self) -> Result<Aligner> {
        let scoring = self.scoring();
        scoring.validate()?;
        Ok(Aligner::with_start(scoring, self.start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwError;

    #[test]
    fn unset_mismatch_mirrors_match() {
        let aligner = AlignerBuilder::new().with_match_score(5.0).build();
        assert_eq!(aligner.scoring().mismatch_score, -5.0);
        assert_eq!(aligner.scoring().gap_penalty, -2.0);
    }

    #[test]
    fn explicit_values_win() {
        let aligner = AlignerBuilder::new()
            .with_match_score(2.0)
            .with_mismatch_score(-1.0)
            .with_gap_penalty(-0.5)
            .with_traceback_start(TracebackStart::AllPositive)
            .build();
        assert_eq!(*aligner.scoring(), Scoring::new(2.0, Some(-1.0), -0.5));
        assert_eq!(aligner.traceback_start(), TracebackStart::AllPositive);
    }

    #[test]
    fn try_build_validates() {
        assert!(AlignerBuilder::new().try_build().is_ok());
        let err = AlignerBuilder::new()
            .with_gap_penalty(f64::NAN)
            .try_build()
            .unwrap_err();
        assert!(matches!(err, SwError::InvalidScoring { name: "gap_penalty", .. }));
    }
}
