//! End-to-end local alignment: matrix fill followed by traceback.
//!
//! [`Aligner`] owns one scoring configuration and can be reused for any
//! number of sequence pairs. Each call builds a fresh [`ScoreMatrix`], so runs
//! are fully independent and share no state.

use crate::filter::Alignments;
use crate::matrix::ScoreMatrix;
use crate::scoring::Scoring;
use crate::traceback::{enumerate_from, TracebackStart};

/// Smith–Waterman aligner reporting every optimal local alignment.
///
/// ```
/// use swalign::Aligner;
///
/// let alignments = Aligner::default().align(b"TGTTACGG", b"GGTTGACTA");
/// assert_eq!(alignments.len(), 1);
/// let best = &alignments.as_slice()[0];
/// assert_eq!(best.score(), 13.0);
/// assert_eq!(best.aligned_seq1(), b"GTT-AC");
/// assert_eq!(best.aligned_seq2(), b"GTTGAC");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aligner {
    scoring: Scoring,
    start: TracebackStart,
}

impl Aligner {
    /// Aligner reporting all alignments tied at the global maximum.
    pub fn new(scoring: Scoring) -> Self {
        Self::with_start(scoring, TracebackStart::GlobalMax)
    }

    /// Aligner with an explicit choice of traceback start cells.
    pub fn with_start(scoring: Scoring, start: TracebackStart) -> Self {
        Self { scoring, start }
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn traceback_start(&self) -> TracebackStart {
        self.start
    }

    /// Build the matrix for `seq1` against `seq2`.
    ///
    /// Uses the anti-diagonal wavefront fill when the `parallel` feature is
    /// enabled.
    pub fn score_matrix(&self, seq1: &[u8], seq2: &[u8]) -> ScoreMatrix {
        #[cfg(feature = "parallel")]
        {
            ScoreMatrix::build_wavefront(seq1, seq2, &self.scoring)
        }
        #[cfg(not(feature = "parallel"))]
        {
            ScoreMatrix::build(seq1, seq2, &self.scoring)
        }
    }

    /// Align and drop the matrix.
    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> Alignments {
        self.align_with_matrix(seq1, seq2).1
    }

    /// Align and hand the matrix back as well, e.g. for printing.
    pub fn align_with_matrix(&self, seq1: &[u8], seq2: &[u8]) -> (ScoreMatrix, Alignments) {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("sw_align", n = seq1.len(), m = seq2.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let matrix = self.score_matrix(seq1, seq2);
        let alignments = enumerate_from(&matrix, seq1, seq2, self.start);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            global_max = matrix.global_max(),
            alignments = alignments.len(),
            "alignment finished"
        );

        (matrix, Alignments::new(alignments))
    }
}
